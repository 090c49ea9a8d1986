//! Typed collection handles: `schema.lists()` and `schema.reminders()`.

use crate::model::kind::ModelKind;
use crate::model::list::{List, ListPatch, NewList};
use crate::model::reminder::{NewReminder, Reminder, ReminderPatch};
use crate::model::RecordId;
use crate::repo::list_repo::{ListRepository, SqliteListRepository};
use crate::repo::reminder_repo::{ReminderRepository, SqliteReminderRepository};
use crate::store::relations::RelationshipManager;
use crate::store::{StoreError, StoreResult};
use log::debug;
use rusqlite::Connection;

/// List collection.
pub struct Lists<'conn> {
    repo: SqliteListRepository<'conn>,
    relations: RelationshipManager<'conn>,
}

impl<'conn> Lists<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self {
            repo: SqliteListRepository::new(conn),
            relations: RelationshipManager::new(conn),
        }
    }

    /// Creates a list, linking any members in the same atomic step.
    pub fn create(&self, attrs: NewList) -> StoreResult<List> {
        self.relations.create_list(&attrs)
    }

    /// Exact lookup by id.
    pub fn find(&self, id: RecordId) -> StoreResult<List> {
        self.repo.get_list(id)?.ok_or(StoreError::NotFound {
            kind: ModelKind::List,
            id,
        })
    }

    /// Every list in insertion order.
    pub fn all(&self) -> StoreResult<Vec<List>> {
        Ok(self.repo.list_lists()?)
    }

    /// Applies a partial update and returns the stored result.
    pub fn update(&self, id: RecordId, patch: ListPatch) -> StoreResult<List> {
        let mut list = self.find(id)?;
        if let Some(name) = patch.name {
            list.name = name;
        }
        self.repo.update_list(&list)?;
        Ok(list)
    }

    /// Removes the list. Its reminders keep their (now dangling) link.
    pub fn destroy(&self, id: RecordId) -> StoreResult<()> {
        self.repo.delete_list(id)?;
        debug!("event=record_destroy module=store kind=list id={id}");
        Ok(())
    }

    /// Derived has-many view: reminders pointing at list `id`.
    pub fn reminders(&self, id: RecordId) -> StoreResult<Vec<Reminder>> {
        self.relations.reminders_of(id)
    }
}

/// Reminder collection.
pub struct Reminders<'conn> {
    repo: SqliteReminderRepository<'conn>,
    relations: RelationshipManager<'conn>,
}

impl<'conn> Reminders<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self {
            repo: SqliteReminderRepository::new(conn),
            relations: RelationshipManager::new(conn),
        }
    }

    /// Creates a reminder; a `list_id` must name an existing list.
    pub fn create(&self, attrs: NewReminder) -> StoreResult<Reminder> {
        self.relations.create_reminder(&attrs)
    }

    /// Exact lookup by id.
    pub fn find(&self, id: RecordId) -> StoreResult<Reminder> {
        self.repo.get_reminder(id)?.ok_or(StoreError::NotFound {
            kind: ModelKind::Reminder,
            id,
        })
    }

    /// Every reminder in insertion order.
    pub fn all(&self) -> StoreResult<Vec<Reminder>> {
        Ok(self.repo.list_reminders()?)
    }

    /// Applies a partial update. A new list link is validated before any
    /// write happens.
    pub fn update(&self, id: RecordId, patch: ReminderPatch) -> StoreResult<Reminder> {
        let mut reminder = self.find(id)?;
        if let Some(Some(list_id)) = patch.list_id {
            self.relations.ensure_linkable(list_id)?;
        }
        if let Some(text) = patch.text {
            reminder.text = text;
        }
        if let Some(list_id) = patch.list_id {
            reminder.list_id = list_id;
        }
        self.repo.update_reminder(&reminder)?;
        Ok(reminder)
    }

    /// Removes the reminder. A second call for the same id fails.
    pub fn destroy(&self, id: RecordId) -> StoreResult<()> {
        self.repo.delete_reminder(id)?;
        debug!("event=record_destroy module=store kind=reminder id={id}");
        Ok(())
    }

    /// Belongs-to view: the reminder's list, if it still exists.
    pub fn list(&self, reminder: &Reminder) -> StoreResult<Option<List>> {
        self.relations.list_of(reminder)
    }
}
