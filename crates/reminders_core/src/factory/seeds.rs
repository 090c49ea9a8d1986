//! Startup seed scripts.
//!
//! Each script establishes a fixed initial state. Creation order decides ids
//! and sequence values, so changing the order changes what clients see.
//!
//! `SeedScript::Development` state:
//! - lists: `1 Home`, `2 Work`, `3 List 1`, `4 List 2`
//! - reminders: `Do taxes` (Home), `Visit bank` (Work), `Walk the dog`
//!   (none), `Reminder 1`..`Reminder 3` (none), `Reminder 4`..`Reminder 5`
//!   (List 1), `Reminder 6`..`Reminder 10` (List 2)
//!
//! `SeedScript::Production` state (factories fill empty lists):
//! - lists: `1 Home`, `2 List 1`
//! - reminders: `Do taxes` (Home), `Reminder 1`..`Reminder 5` (List 1)

use crate::factory::{Factories, ListBuild, ListTrait, ReminderBuild};
use crate::model::list::{ListMember, NewList};
use crate::model::reminder::NewReminder;
use crate::store::{Schema, StoreResult};
use log::info;
use std::fmt::{Display, Formatter};

/// Seed data set chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedScript {
    /// Mixed direct and factory data for exploring every route.
    Development,
    /// Small data set served with factories that fill empty lists.
    Production,
}

impl SeedScript {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    /// Factory set the server keeps using after this script ran.
    pub fn factories(self) -> Factories {
        match self {
            Self::Development => Factories::new(),
            Self::Production => Factories::filling_empty_lists(),
        }
    }
}

impl Display for SeedScript {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Populates an empty store with the data set of `script`.
pub fn seed(
    schema: &Schema<'_>,
    factories: &mut Factories,
    script: SeedScript,
) -> StoreResult<()> {
    schema.atomic("seed", || -> StoreResult<()> {
        match script {
            SeedScript::Development => seed_development(schema, factories),
            SeedScript::Production => seed_production(schema, factories),
        }
    })?;

    info!(
        "event=seed module=factory status=ok script={} lists={} reminders={}",
        script,
        schema.lists().all()?.len(),
        schema.reminders().all()?.len()
    );
    Ok(())
}

fn seed_development(schema: &Schema<'_>, factories: &mut Factories) -> StoreResult<()> {
    let home = schema.lists().create(NewList::named("Home"))?;
    schema
        .reminders()
        .create(NewReminder::new("Do taxes").in_list(home.id))?;

    let work = schema.lists().create(NewList::named("Work"))?;
    schema
        .reminders()
        .create(NewReminder::new("Visit bank").in_list(work.id))?;

    schema.reminders().create(NewReminder::new("Walk the dog"))?;

    factories.create_reminder(schema, ReminderBuild::new())?;
    factories.create_reminders(schema, 2, ReminderBuild::new())?;

    let members = factories.create_reminders(schema, 2, ReminderBuild::new())?;
    factories.create_list(schema, ListBuild::new().with_existing(&members))?;

    factories.create_list(schema, ListBuild::new().with_trait(ListTrait::WithReminders))?;
    Ok(())
}

fn seed_production(schema: &Schema<'_>, factories: &mut Factories) -> StoreResult<()> {
    let taxes = schema.reminders().create(NewReminder::new("Do taxes"))?;
    schema
        .lists()
        .create(NewList::named("Home").with_member(ListMember::Existing(taxes.id)))?;

    factories.create_list(schema, ListBuild::new())?;
    Ok(())
}
