//! Client-visible request errors.

use crate::model::kind::ModelKind;
use crate::model::RecordId;
use crate::server::request::Verb;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of one request. Each variant maps to a response status.
#[derive(Debug)]
pub enum ApiError {
    /// Lookup by id found nothing (404).
    NotFound { kind: ModelKind, id: String },
    /// Body could not be parsed into the expected attributes (400).
    MalformedRequest(String),
    /// Reminder would link to a missing list (422).
    IntegrityViolation { list_id: RecordId },
    /// No route registered for verb + path (404).
    RouteNotFound { verb: Verb, path: String },
    /// Anything else (500).
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::MalformedRequest(_) => 400,
            Self::IntegrityViolation { .. } => 422,
            Self::RouteNotFound { .. } => 404,
            Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::MalformedRequest(_) => "malformed_request",
            Self::IntegrityViolation { .. } => "integrity_violation",
            Self::RouteNotFound { .. } => "route_not_found",
            Self::Internal(_) => "internal",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::MalformedRequest(message) => write!(f, "malformed request: {message}"),
            Self::IntegrityViolation { list_id } => {
                write!(f, "cannot link reminder to missing list: {list_id}")
            }
            Self::RouteNotFound { verb, path } => {
                write!(f, "no route defined for {verb} {path}")
            }
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound { kind, id } => Self::NotFound {
                kind,
                id: id.to_string(),
            },
            StoreError::IntegrityViolation { list_id } => Self::IntegrityViolation { list_id },
            StoreError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Internal(value.to_string())
    }
}
