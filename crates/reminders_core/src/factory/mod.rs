//! Record factories with per-type sequences and named traits.
//!
//! # Responsibility
//! - Generate default attributes from a per-type sequence number.
//! - Compose defaults, explicit overrides and traits in one fixed order.
//! - Bulk-create records for seeding and tests.
//!
//! # Invariants
//! - Sequences start at 1 and advance once per factory creation of that
//!   type. Direct store creations never advance them.
//! - A failed factory creation leaves both the store and the sequences as
//!   they were.
//! - Hooks run after the base record exists: the empty-list fill first
//!   (when enabled), then trait hooks in declaration order.

use crate::model::list::{List, ListMember, NewList};
use crate::model::reminder::{NewReminder, Reminder};
use crate::model::RecordId;
use crate::store::{Schema, StoreResult};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub mod seeds;

/// Reminders created by the `withReminders` trait and by the empty-list
/// fill.
pub const WITH_REMINDERS_COUNT: usize = 5;

/// Default list name for sequence number `i`.
pub fn list_name(i: u64) -> String {
    format!("List {i}")
}

/// Default reminder text for sequence number `i`.
pub fn reminder_text(i: u64) -> String {
    format!("Reminder {i}")
}

/// Named augmentation of the list factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTrait {
    /// After creation, add `WITH_REMINDERS_COUNT` factory reminders linked
    /// to the new list.
    WithReminders,
}

impl ListTrait {
    pub fn name(self) -> &'static str {
        match self {
            Self::WithReminders => "withReminders",
        }
    }
}

/// Unknown trait name passed to `ListTrait::from_str`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTrait(pub String);

impl Display for UnknownTrait {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown factory trait: {}", self.0)
    }
}

impl Error for UnknownTrait {}

impl FromStr for ListTrait {
    type Err = UnknownTrait;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "withReminders" | "with_reminders" => Ok(Self::WithReminders),
            other => Err(UnknownTrait(other.to_string())),
        }
    }
}

/// Build configuration for one factory list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListBuild {
    /// Overrides the sequence-generated name.
    pub name: Option<String>,
    /// Reminders linked during creation.
    pub members: Vec<ListMember>,
    traits: Vec<ListTrait>,
}

impl ListBuild {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_member(mut self, member: ListMember) -> Self {
        self.members.push(member);
        self
    }

    /// Links already created reminders to the list.
    pub fn with_existing(mut self, reminders: &[Reminder]) -> Self {
        self.members
            .extend(reminders.iter().map(|reminder| ListMember::Existing(reminder.id)));
        self
    }

    /// Adds a trait. Adding the same trait twice has no further effect.
    pub fn with_trait(mut self, list_trait: ListTrait) -> Self {
        if !self.traits.contains(&list_trait) {
            self.traits.push(list_trait);
        }
        self
    }

    pub fn traits(&self) -> &[ListTrait] {
        &self.traits
    }
}

/// Build configuration for one factory reminder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderBuild {
    /// Overrides the sequence-generated text.
    pub text: Option<String>,
    pub list_id: Option<RecordId>,
}

impl ReminderBuild {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn in_list(mut self, list_id: RecordId) -> Self {
        self.list_id = Some(list_id);
        self
    }
}

/// Next sequence number per model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sequences {
    list: u64,
    reminder: u64,
}

impl Default for Sequences {
    fn default() -> Self {
        Self {
            list: 1,
            reminder: 1,
        }
    }
}

/// Factory set for every model type.
#[derive(Debug, Default)]
pub struct Factories {
    sequences: Sequences,
    fill_empty_lists: bool,
}

impl Factories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factories whose list creations get `WITH_REMINDERS_COUNT` factory
    /// reminders whenever they end up with no members.
    pub fn filling_empty_lists() -> Self {
        Self {
            fill_empty_lists: true,
            ..Self::default()
        }
    }

    pub fn fills_empty_lists(&self) -> bool {
        self.fill_empty_lists
    }

    /// Sequence number the next factory list will use.
    pub fn next_list_sequence(&self) -> u64 {
        self.sequences.list
    }

    /// Sequence number the next factory reminder will use.
    pub fn next_reminder_sequence(&self) -> u64 {
        self.sequences.reminder
    }

    /// Creates one list: sequence → defaults → overrides → insert with
    /// members → empty-list fill → trait hooks.
    pub fn create_list(&mut self, schema: &Schema<'_>, build: ListBuild) -> StoreResult<List> {
        self.atomically(schema, "factory_list", |factories| {
            factories.build_list(schema, build)
        })
    }

    /// Creates `count` lists from the same build configuration.
    pub fn create_lists(
        &mut self,
        schema: &Schema<'_>,
        count: usize,
        build: ListBuild,
    ) -> StoreResult<Vec<List>> {
        self.atomically(schema, "factory_lists", |factories| {
            (0..count)
                .map(|_| factories.build_list(schema, build.clone()))
                .collect()
        })
    }

    /// Creates one reminder from sequence defaults and overrides.
    pub fn create_reminder(
        &mut self,
        schema: &Schema<'_>,
        build: ReminderBuild,
    ) -> StoreResult<Reminder> {
        self.atomically(schema, "factory_reminder", |factories| {
            factories.build_reminder(schema, &build)
        })
    }

    /// Creates `count` reminders from the same build configuration.
    pub fn create_reminders(
        &mut self,
        schema: &Schema<'_>,
        count: usize,
        build: ReminderBuild,
    ) -> StoreResult<Vec<Reminder>> {
        self.atomically(schema, "factory_reminders", |factories| {
            (0..count)
                .map(|_| factories.build_reminder(schema, &build))
                .collect()
        })
    }

    /// Runs `f` in a savepoint and restores the sequences when it fails.
    fn atomically<T>(
        &mut self,
        schema: &Schema<'_>,
        name: &str,
        f: impl FnOnce(&mut Self) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let snapshot = self.sequences;
        let result = schema.atomic(name, || f(self));
        if result.is_err() {
            self.sequences = snapshot;
        }
        result
    }

    fn build_list(&mut self, schema: &Schema<'_>, build: ListBuild) -> StoreResult<List> {
        let sequence = self.sequences.list;
        self.sequences.list += 1;

        let attrs = NewList {
            name: build.name.unwrap_or_else(|| list_name(sequence)),
            members: build.members,
        };
        let list = schema.lists().create(attrs)?;
        debug!(
            "event=factory_create module=factory kind=list id={} sequence={} traits={}",
            list.id,
            sequence,
            build.traits.len()
        );

        if self.fill_empty_lists && schema.lists().reminders(list.id)?.is_empty() {
            self.add_reminders(schema, &list)?;
        }
        for list_trait in &build.traits {
            self.after_create(schema, *list_trait, &list)?;
        }
        Ok(list)
    }

    fn after_create(
        &mut self,
        schema: &Schema<'_>,
        list_trait: ListTrait,
        list: &List,
    ) -> StoreResult<()> {
        match list_trait {
            ListTrait::WithReminders => self.add_reminders(schema, list),
        }
    }

    fn add_reminders(&mut self, schema: &Schema<'_>, list: &List) -> StoreResult<()> {
        let build = ReminderBuild::new().in_list(list.id);
        for _ in 0..WITH_REMINDERS_COUNT {
            self.build_reminder(schema, &build)?;
        }
        Ok(())
    }

    fn build_reminder(
        &mut self,
        schema: &Schema<'_>,
        build: &ReminderBuild,
    ) -> StoreResult<Reminder> {
        let sequence = self.sequences.reminder;
        self.sequences.reminder += 1;

        let attrs = NewReminder {
            text: build
                .text
                .clone()
                .unwrap_or_else(|| reminder_text(sequence)),
            list_id: build.list_id,
        };
        let reminder = schema.reminders().create(attrs)?;
        debug!(
            "event=factory_create module=factory kind=reminder id={} sequence={}",
            reminder.id, sequence
        );
        Ok(reminder)
    }
}

#[cfg(test)]
mod tests {
    use super::{list_name, reminder_text, Factories, ListBuild, ListTrait};

    #[test]
    fn default_generators_use_sequence_number() {
        assert_eq!(list_name(3), "List 3");
        assert_eq!(reminder_text(12), "Reminder 12");
    }

    #[test]
    fn trait_names_parse() {
        assert_eq!(
            "withReminders".parse::<ListTrait>().expect("known trait"),
            ListTrait::WithReminders
        );
        assert!("withAlarms".parse::<ListTrait>().is_err());
    }

    #[test]
    fn empty_list_fill_is_opt_in() {
        assert!(!Factories::new().fills_empty_lists());
        assert!(Factories::filling_empty_lists().fills_empty_lists());
    }

    #[test]
    fn duplicate_traits_are_collapsed() {
        let build = ListBuild::new()
            .with_trait(ListTrait::WithReminders)
            .with_trait(ListTrait::WithReminders);
        assert_eq!(build.traits(), &[ListTrait::WithReminders]);
    }
}
