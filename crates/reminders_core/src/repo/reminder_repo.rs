//! Reminder repository contract and SQLite implementation.
//!
//! # Invariants
//! - `reminders.id` comes from `AUTOINCREMENT`, so ids are never reused.
//! - `list_id` is written as given; callers validate it first.

use crate::model::kind::ModelKind;
use crate::model::reminder::Reminder;
use crate::model::RecordId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const REMINDER_SELECT_SQL: &str = "SELECT id, text, list_id FROM reminders";

/// Repository interface for reminder rows.
pub trait ReminderRepository {
    fn insert_reminder(&self, text: &str, list_id: Option<RecordId>) -> RepoResult<Reminder>;
    fn update_reminder(&self, reminder: &Reminder) -> RepoResult<()>;
    fn get_reminder(&self, id: RecordId) -> RepoResult<Option<Reminder>>;
    fn list_reminders(&self) -> RepoResult<Vec<Reminder>>;
    /// Reminders whose back-reference equals `list_id`, ascending id.
    fn list_reminders_by_list(&self, list_id: RecordId) -> RepoResult<Vec<Reminder>>;
    fn delete_reminder(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed reminder repository.
pub struct SqliteReminderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReminderRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReminderRepository for SqliteReminderRepository<'_> {
    fn insert_reminder(&self, text: &str, list_id: Option<RecordId>) -> RepoResult<Reminder> {
        self.conn.execute(
            "INSERT INTO reminders (text, list_id) VALUES (?1, ?2);",
            params![text, list_id],
        )?;
        Ok(Reminder {
            id: self.conn.last_insert_rowid(),
            text: text.to_string(),
            list_id,
        })
    }

    fn update_reminder(&self, reminder: &Reminder) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE reminders SET text = ?1, list_id = ?2 WHERE id = ?3;",
            params![reminder.text.as_str(), reminder.list_id, reminder.id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: ModelKind::Reminder,
                id: reminder.id,
            });
        }
        Ok(())
    }

    fn get_reminder(&self, id: RecordId) -> RepoResult<Option<Reminder>> {
        let reminder = self
            .conn
            .query_row(
                &format!("{REMINDER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_reminder_row,
            )
            .optional()?;
        Ok(reminder)
    }

    fn list_reminders(&self) -> RepoResult<Vec<Reminder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REMINDER_SELECT_SQL} ORDER BY id ASC;"))?;
        let reminders = stmt
            .query_map([], parse_reminder_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reminders)
    }

    fn list_reminders_by_list(&self, list_id: RecordId) -> RepoResult<Vec<Reminder>> {
        let mut stmt = self.conn.prepare(&format!(
            "{REMINDER_SELECT_SQL} WHERE list_id = ?1 ORDER BY id ASC;"
        ))?;
        let reminders = stmt
            .query_map([list_id], parse_reminder_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reminders)
    }

    fn delete_reminder(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM reminders WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: ModelKind::Reminder,
                id,
            });
        }
        Ok(())
    }
}

fn parse_reminder_row(row: &Row<'_>) -> rusqlite::Result<Reminder> {
    Ok(Reminder {
        id: row.get("id")?,
        text: row.get("text")?,
        list_id: row.get("list_id")?,
    })
}
