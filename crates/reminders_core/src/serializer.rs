//! Response document serializer.
//!
//! # Responsibility
//! - Turn handler payloads into wire documents keyed by model name.
//! - Apply a per-relation policy: embed, reference, or omit.
//!
//! # Invariants
//! - Serialization only reads from the store.
//! - Embedding inlines the related record's own attributes, never its
//!   relations, so output depth is bounded.
//!
//! Shapes:
//! - record: `{ "<model>": { ...attributes, ...relations } }`
//! - collection: `{ "<models>": [ ... ] }`

use crate::model::kind::ModelKind;
use crate::model::list::List;
use crate::model::reminder::Reminder;
use crate::store::{Schema, StoreResult};
use serde_json::{json, Map, Value};

/// Single record returned by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    List(List),
    Reminder(Reminder),
}

impl Record {
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::List(_) => ModelKind::List,
            Self::Reminder(_) => ModelKind::Reminder,
        }
    }
}

impl From<List> for Record {
    fn from(value: List) -> Self {
        Self::List(value)
    }
}

impl From<Reminder> for Record {
    fn from(value: Reminder) -> Self {
        Self::Reminder(value)
    }
}

/// Ordered records of one model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    Lists(Vec<List>),
    Reminders(Vec<Reminder>),
}

impl Collection {
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Lists(_) => ModelKind::List,
            Self::Reminders(_) => ModelKind::Reminder,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Lists(items) => items.len(),
            Self::Reminders(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<List>> for Collection {
    fn from(value: Vec<List>) -> Self {
        Self::Lists(value)
    }
}

impl From<Vec<Reminder>> for Collection {
    fn from(value: Vec<Reminder>) -> Self {
        Self::Reminders(value)
    }
}

/// Everything a route handler may return.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Record(Record),
    Collection(Collection),
    /// Plain document passed through untouched.
    Json(Value),
    /// No response body.
    Empty,
}

impl From<Record> for Payload {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl From<Collection> for Payload {
    fn from(value: Collection) -> Self {
        Self::Collection(value)
    }
}

/// How one relation appears in a serialized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationMode {
    /// Inline the related record's attributes under the relation name.
    Embed,
    /// Write only the related id(s) under `<relation>Id` / `<relation>Ids`.
    Reference,
    /// Leave the relation out.
    Omit,
}

/// Serialization policy keyed by model relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerPolicy {
    /// `list.reminders` (has-many).
    pub list_reminders: RelationMode,
    /// `reminder.list` (belongs-to).
    pub reminder_list: RelationMode,
}

impl Default for SerializerPolicy {
    fn default() -> Self {
        Self {
            list_reminders: RelationMode::Omit,
            reminder_list: RelationMode::Embed,
        }
    }
}

/// Serializer bound to a policy and a read-only store view.
pub struct Serializer<'a, 'conn> {
    policy: &'a SerializerPolicy,
    schema: &'a Schema<'conn>,
}

impl<'a, 'conn> Serializer<'a, 'conn> {
    pub fn new(policy: &'a SerializerPolicy, schema: &'a Schema<'conn>) -> Self {
        Self { policy, schema }
    }

    /// Serializes a handler payload. `Payload::Empty` yields `None`.
    pub fn serialize(&self, payload: &Payload) -> StoreResult<Option<Value>> {
        let document = match payload {
            Payload::Record(record) => Some(self.serialize_record(record)?),
            Payload::Collection(collection) => Some(self.serialize_collection(collection)?),
            Payload::Json(value) => Some(value.clone()),
            Payload::Empty => None,
        };
        Ok(document)
    }

    /// `{ "<model>": { ... } }`
    pub fn serialize_record(&self, record: &Record) -> StoreResult<Value> {
        let body = match record {
            Record::List(list) => self.list_hash(list)?,
            Record::Reminder(reminder) => self.reminder_hash(reminder)?,
        };
        Ok(root(record.kind().model_name(), body))
    }

    /// `{ "<models>": [ ... ] }`
    pub fn serialize_collection(&self, collection: &Collection) -> StoreResult<Value> {
        let items = match collection {
            Collection::Lists(lists) => lists
                .iter()
                .map(|list| self.list_hash(list))
                .collect::<StoreResult<Vec<_>>>()?,
            Collection::Reminders(reminders) => reminders
                .iter()
                .map(|reminder| self.reminder_hash(reminder))
                .collect::<StoreResult<Vec<_>>>()?,
        };
        Ok(root(collection.kind().collection_name(), Value::Array(items)))
    }

    fn list_hash(&self, list: &List) -> StoreResult<Value> {
        let mut hash = list_attributes(list);
        match self.policy.list_reminders {
            RelationMode::Embed => {
                let reminders = self
                    .schema
                    .lists()
                    .reminders(list.id)?
                    .iter()
                    .map(reminder_attributes)
                    .map(Value::Object)
                    .collect();
                hash.insert("reminders".to_string(), Value::Array(reminders));
            }
            RelationMode::Reference => {
                let ids = self
                    .schema
                    .lists()
                    .reminders(list.id)?
                    .iter()
                    .map(|reminder| json!(reminder.id))
                    .collect();
                hash.insert("reminderIds".to_string(), Value::Array(ids));
            }
            RelationMode::Omit => {}
        }
        Ok(Value::Object(hash))
    }

    fn reminder_hash(&self, reminder: &Reminder) -> StoreResult<Value> {
        let mut hash = reminder_attributes(reminder);
        match self.policy.reminder_list {
            RelationMode::Embed => {
                let list = self
                    .schema
                    .reminders()
                    .list(reminder)?
                    .map_or(Value::Null, |list| Value::Object(list_attributes(&list)));
                hash.insert("list".to_string(), list);
            }
            RelationMode::Reference => {
                hash.insert("listId".to_string(), json!(reminder.list_id));
            }
            RelationMode::Omit => {}
        }
        Ok(Value::Object(hash))
    }
}

fn list_attributes(list: &List) -> Map<String, Value> {
    let mut hash = Map::new();
    hash.insert("id".to_string(), json!(list.id));
    hash.insert("name".to_string(), json!(list.name));
    hash
}

fn reminder_attributes(reminder: &Reminder) -> Map<String, Value> {
    let mut hash = Map::new();
    hash.insert("id".to_string(), json!(reminder.id));
    hash.insert("text".to_string(), json!(reminder.text));
    hash
}

fn root(key: &str, body: Value) -> Value {
    let mut document = Map::new();
    document.insert(key.to_string(), body);
    Value::Object(document)
}
