//! Record store: typed collections over the in-memory database.
//!
//! # Responsibility
//! - Own the single connection backing all collections.
//! - Hand out `Schema` handles exposing typed `lists()` / `reminders()`
//!   collections to handlers, factories and seeds.
//! - Translate repository failures into store-level semantics.
//!
//! # Invariants
//! - Ids are assigned by the store, per collection, starting at 1 and never
//!   reused after deletion.
//! - `all()` returns records in insertion order.
//! - Every multi-row write runs inside one savepoint.

use crate::db::{open_db_in_memory, with_savepoint, DbError, DbResult};
use crate::model::kind::ModelKind;
use crate::model::RecordId;
use crate::repo::RepoError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod collections;
pub mod relations;

pub use collections::{Lists, Reminders};
pub use relations::RelationshipManager;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for record operations.
#[derive(Debug)]
pub enum StoreError {
    /// No record with this id exists in the target collection.
    NotFound { kind: ModelKind, id: RecordId },
    /// A reminder was about to be linked to a list that does not exist.
    IntegrityViolation { list_id: RecordId },
    /// Underlying storage failure.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::IntegrityViolation { list_id } => {
                write!(f, "cannot link reminder to missing list: {list_id}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::IntegrityViolation { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::from(value))
    }
}

/// Owner of the in-memory database.
///
/// Created once at startup and passed explicitly to whoever needs it. The
/// connection is `Send` but not `Sync`, which matches the one-request-at-a-time
/// model of the mock server.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens an empty, migrated store.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Returns a handle over the store's collections.
    pub fn schema(&self) -> Schema<'_> {
        Schema::new(&self.conn)
    }

    /// Runs `f` atomically: every write it makes is kept or none is.
    pub fn atomic<T, E>(
        &self,
        name: &str,
        f: impl FnOnce(Schema<'_>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<rusqlite::Error>,
    {
        let schema = self.schema();
        with_savepoint(&self.conn, name, || f(schema))
    }
}

/// Borrowed view of the store given to handlers and factories.
#[derive(Clone, Copy)]
pub struct Schema<'conn> {
    conn: &'conn Connection,
}

impl<'conn> Schema<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// The list collection.
    pub fn lists(&self) -> Lists<'conn> {
        Lists::new(self.conn)
    }

    /// The reminder collection.
    pub fn reminders(&self) -> Reminders<'conn> {
        Reminders::new(self.conn)
    }

    /// Relationship navigation and linking between lists and reminders.
    pub fn relations(&self) -> RelationshipManager<'conn> {
        RelationshipManager::new(self.conn)
    }

    /// Nested atomic scope on the same connection.
    pub fn atomic<T, E>(&self, name: &str, f: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<rusqlite::Error>,
    {
        with_savepoint(self.conn, name, f)
    }
}
