//! List repository contract and SQLite implementation.
//!
//! # Invariants
//! - `lists.id` comes from `AUTOINCREMENT`, so ids are never reused.
//! - Deleting a list does not touch `reminders`.

use crate::model::kind::ModelKind;
use crate::model::list::List;
use crate::model::RecordId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for list rows.
pub trait ListRepository {
    fn insert_list(&self, name: &str) -> RepoResult<List>;
    fn update_list(&self, list: &List) -> RepoResult<()>;
    fn get_list(&self, id: RecordId) -> RepoResult<Option<List>>;
    fn list_lists(&self) -> RepoResult<Vec<List>>;
    fn delete_list(&self, id: RecordId) -> RepoResult<()>;
    fn list_exists(&self, id: RecordId) -> RepoResult<bool>;
}

/// SQLite-backed list repository.
pub struct SqliteListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteListRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ListRepository for SqliteListRepository<'_> {
    fn insert_list(&self, name: &str) -> RepoResult<List> {
        self.conn
            .execute("INSERT INTO lists (name) VALUES (?1);", [name])?;
        Ok(List {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    fn update_list(&self, list: &List) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE lists SET name = ?1 WHERE id = ?2;",
            params![list.name.as_str(), list.id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: ModelKind::List,
                id: list.id,
            });
        }
        Ok(())
    }

    fn get_list(&self, id: RecordId) -> RepoResult<Option<List>> {
        let list = self
            .conn
            .query_row(
                "SELECT id, name FROM lists WHERE id = ?1;",
                [id],
                parse_list_row,
            )
            .optional()?;
        Ok(list)
    }

    fn list_lists(&self) -> RepoResult<Vec<List>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM lists ORDER BY id ASC;")?;
        let lists = stmt
            .query_map([], parse_list_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    fn delete_list(&self, id: RecordId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM lists WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: ModelKind::List,
                id,
            });
        }
        Ok(())
    }

    fn list_exists(&self, id: RecordId) -> RepoResult<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM lists WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

fn parse_list_row(row: &Row<'_>) -> rusqlite::Result<List> {
    Ok(List {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
