//! List model.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes.
//! - Reminders are not stored on the list; they are derived from each
//!   reminder's `list_id`.

use super::RecordId;
use serde::{Deserialize, Serialize};

/// Named group of reminders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: RecordId,
    pub name: String,
}

/// Attributes for a direct list creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewList {
    pub name: String,
    /// Reminders linked to the new list as part of the same creation.
    pub members: Vec<ListMember>,
}

impl NewList {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Adds one member reminder to link on creation.
    pub fn with_member(mut self, member: ListMember) -> Self {
        self.members.push(member);
        self
    }
}

/// Reminder to attach while a list is being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMember {
    /// Create a new reminder with this text.
    New { text: String },
    /// Re-point an existing reminder at the new list.
    Existing(RecordId),
}

impl ListMember {
    pub fn new_text(text: impl Into<String>) -> Self {
        Self::New { text: text.into() }
    }
}

/// Partial update for a list. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPatch {
    pub name: Option<String>,
}
