//! Model kinds known to the store.

use std::fmt::{Display, Formatter};

/// Collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKind {
    List,
    Reminder,
}

impl ModelKind {
    /// Singular name used as the root key of a single-record document.
    pub fn model_name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Reminder => "reminder",
        }
    }

    /// Plural name used as the root key of a collection document.
    pub fn collection_name(self) -> &'static str {
        match self {
            Self::List => "lists",
            Self::Reminder => "reminders",
        }
    }
}

impl Display for ModelKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.model_name())
    }
}
