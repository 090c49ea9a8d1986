//! Domain model for lists and reminders.
//!
//! # Responsibility
//! - Define the typed records held by the store.
//! - Name each model the way wire documents and errors refer to it.
//!
//! # Invariants
//! - Every record carries a store-assigned `RecordId`.
//! - A reminder points at its list; a list never stores its reminders.

pub mod kind;
pub mod list;
pub mod reminder;

/// Store-assigned identifier, unique and never reused within one collection.
pub type RecordId = i64;
