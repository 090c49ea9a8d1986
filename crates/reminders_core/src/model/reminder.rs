//! Reminder model.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes.
//! - `list_id`, when set, referenced an existing list at the time it was
//!   written. It is not revalidated after the list is removed.

use super::RecordId;
use serde::{Deserialize, Serialize};

/// Single reminder, optionally belonging to one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: RecordId,
    pub text: String,
    /// Back-reference to the owning list. Source of truth for the
    /// list/reminder relationship.
    pub list_id: Option<RecordId>,
}

/// Attributes for a direct reminder creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewReminder {
    pub text: String,
    pub list_id: Option<RecordId>,
}

impl NewReminder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            list_id: None,
        }
    }

    pub fn in_list(mut self, list_id: RecordId) -> Self {
        self.list_id = Some(list_id);
        self
    }
}

/// Partial update for a reminder.
///
/// `list_id: Some(None)` unlinks the reminder; `None` leaves the link alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderPatch {
    pub text: Option<String>,
    pub list_id: Option<Option<RecordId>>,
}
