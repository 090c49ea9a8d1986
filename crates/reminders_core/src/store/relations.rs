//! List/reminder relationship management.
//!
//! # Responsibility
//! - Validate reminder back-references before they are written.
//! - Derive a list's reminders from back-references on demand.
//! - Create a list together with its member reminders atomically.
//!
//! # Invariants
//! - `reminders.list_id` is the only stored edge; a list's reminder
//!   collection is always a query over it.
//! - A back-reference is checked only when written. Deleting a list leaves
//!   its reminders pointing at the removed id.

use crate::model::kind::ModelKind;
use crate::model::list::{List, ListMember, NewList};
use crate::model::reminder::{NewReminder, Reminder};
use crate::model::RecordId;
use crate::repo::list_repo::{ListRepository, SqliteListRepository};
use crate::repo::reminder_repo::{ReminderRepository, SqliteReminderRepository};
use crate::store::{StoreError, StoreResult};
use log::debug;
use rusqlite::Connection;

/// Enforces the single list-has-many-reminders relationship.
pub struct RelationshipManager<'conn> {
    conn: &'conn Connection,
    lists: SqliteListRepository<'conn>,
    reminders: SqliteReminderRepository<'conn>,
}

impl<'conn> RelationshipManager<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            lists: SqliteListRepository::new(conn),
            reminders: SqliteReminderRepository::new(conn),
        }
    }

    /// Fails with `IntegrityViolation` unless `list_id` names an existing list.
    pub fn ensure_linkable(&self, list_id: RecordId) -> StoreResult<()> {
        if self.lists.list_exists(list_id)? {
            Ok(())
        } else {
            Err(StoreError::IntegrityViolation { list_id })
        }
    }

    /// Inserts a reminder after checking its back-reference.
    pub fn create_reminder(&self, attrs: &NewReminder) -> StoreResult<Reminder> {
        if let Some(list_id) = attrs.list_id {
            self.ensure_linkable(list_id)?;
        }
        let reminder = self
            .reminders
            .insert_reminder(attrs.text.as_str(), attrs.list_id)?;
        debug!(
            "event=record_create module=store kind=reminder id={} linked={}",
            reminder.id,
            reminder.list_id.is_some()
        );
        Ok(reminder)
    }

    /// Points an existing reminder at `list_id`, or unlinks it with `None`.
    pub fn link(&self, reminder_id: RecordId, list_id: Option<RecordId>) -> StoreResult<Reminder> {
        let mut reminder = self.require_reminder(reminder_id)?;
        if let Some(list_id) = list_id {
            self.ensure_linkable(list_id)?;
        }
        reminder.list_id = list_id;
        self.reminders.update_reminder(&reminder)?;
        Ok(reminder)
    }

    /// Creates a list and links every member to it in one atomic step.
    ///
    /// A missing `ListMember::Existing` reminder fails the whole creation
    /// with `NotFound`; the list row is rolled back with it.
    pub fn create_list(&self, attrs: &NewList) -> StoreResult<List> {
        crate::db::with_savepoint(self.conn, "create_list", || {
            let list = self.lists.insert_list(attrs.name.as_str())?;
            for member in &attrs.members {
                match member {
                    ListMember::New { text } => {
                        self.reminders.insert_reminder(text.as_str(), Some(list.id))?;
                    }
                    ListMember::Existing(reminder_id) => {
                        self.link(*reminder_id, Some(list.id))?;
                    }
                }
            }
            debug!(
                "event=record_create module=store kind=list id={} members={}",
                list.id,
                attrs.members.len()
            );
            Ok(list)
        })
    }

    /// Reminders belonging to `list_id`.
    ///
    /// Fails with `NotFound` when the list itself does not exist; an existing
    /// list without reminders yields an empty vector.
    pub fn reminders_of(&self, list_id: RecordId) -> StoreResult<Vec<Reminder>> {
        if !self.lists.list_exists(list_id)? {
            return Err(StoreError::NotFound {
                kind: ModelKind::List,
                id: list_id,
            });
        }
        Ok(self.reminders.list_reminders_by_list(list_id)?)
    }

    /// The list a reminder belongs to. `None` when unset or dangling.
    pub fn list_of(&self, reminder: &Reminder) -> StoreResult<Option<List>> {
        match reminder.list_id {
            Some(list_id) => Ok(self.lists.get_list(list_id)?),
            None => Ok(None),
        }
    }

    fn require_reminder(&self, id: RecordId) -> StoreResult<Reminder> {
        self.reminders
            .get_reminder(id)?
            .ok_or(StoreError::NotFound {
                kind: ModelKind::Reminder,
                id,
            })
    }
}
