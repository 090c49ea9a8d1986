//! Repository layer over the store tables.
//!
//! # Responsibility
//! - Define per-model data access contracts.
//! - Keep SQL details out of the store and relationship layers.
//!
//! # Invariants
//! - Repositories do raw CRUD only; relationship checks live above them.
//! - Collection reads are ordered by ascending id, which is insertion order.
//! - Updates and deletes that touch no row return `NotFound`.

use crate::db::DbError;
use crate::model::kind::ModelKind;
use crate::model::RecordId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod list_repo;
pub mod reminder_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and lookup.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound { kind: ModelKind, id: RecordId },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
