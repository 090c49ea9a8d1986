//! Core of the reminders mock API.
//!
//! An in-memory relational store for lists and reminders, factories and
//! seeds that populate it, and a router + serializer that answer REST-style
//! requests in-process.

pub mod config;
pub mod db;
pub mod factory;
pub mod logging;
pub mod model;
pub mod repo;
pub mod serializer;
pub mod server;
pub mod store;

pub use config::{ConfigError, Environment, ServerConfig};
pub use factory::seeds::SeedScript;
pub use factory::{Factories, ListBuild, ListTrait, ReminderBuild, WITH_REMINDERS_COUNT};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingError};
pub use model::kind::ModelKind;
pub use model::list::{List, ListMember, ListPatch, NewList};
pub use model::reminder::{NewReminder, Reminder, ReminderPatch};
pub use model::RecordId;
pub use serializer::{Collection, Payload, Record, RelationMode, Serializer, SerializerPolicy};
pub use server::{ApiError, MockServer, Request, Response, ServerError, Verb};
pub use store::{Schema, Store, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
