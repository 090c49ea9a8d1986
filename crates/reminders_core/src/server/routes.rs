//! REST surface consumed by the reminders UI.
//!
//! | Verb   | Path                       | Result                         |
//! |--------|----------------------------|--------------------------------|
//! | GET    | `/api/lists`               | every list                     |
//! | GET    | `/api/reminders`           | every reminder, list embedded  |
//! | POST   | `/api/reminders`           | created reminder               |
//! | GET    | `/api/reminders_static`    | fixed plain payload            |
//! | DELETE | `/api/reminders/:id`       | no body                        |
//! | GET    | `/api/lists/:id/reminders` | reminders of one list          |

use crate::model::kind::ModelKind;
use crate::model::reminder::NewReminder;
use crate::model::RecordId;
use crate::serializer::{Collection, Payload, Record};
use crate::server::error::ApiError;
use crate::server::request::Request;
use crate::server::router::{HandlerResult, RouteError, Router};
use crate::store::Schema;
use serde::Deserialize;
use serde_json::json;

/// Registers every route of the reminders API.
pub fn register(router: &mut Router) -> Result<(), RouteError> {
    router
        .get("/api/lists", all_lists)?
        .get("/api/reminders", all_reminders)?
        .post("/api/reminders", create_reminder)?
        .get("/api/reminders_static", static_reminders)?
        .delete("/api/reminders/:id", destroy_reminder)?
        .get("/api/lists/:id/reminders", list_reminders)?;
    Ok(())
}

/// Reminder attributes accepted by `POST /api/reminders`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReminderAttrs {
    text: String,
    #[serde(default, alias = "listId")]
    list: Option<IdRef>,
}

/// Client ids arrive as numbers or as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdRef {
    Number(RecordId),
    Text(String),
}

impl IdRef {
    fn resolve(self) -> Result<RecordId, ApiError> {
        match self {
            Self::Number(id) => Ok(id),
            Self::Text(raw) => raw.trim().parse().map_err(|_| {
                ApiError::MalformedRequest(format!("list id must be an integer, got `{raw}`"))
            }),
        }
    }
}

fn all_lists(schema: &Schema<'_>, _request: &Request) -> HandlerResult {
    Ok(Collection::Lists(schema.lists().all()?).into())
}

fn all_reminders(schema: &Schema<'_>, _request: &Request) -> HandlerResult {
    Ok(Collection::Reminders(schema.reminders().all()?).into())
}

fn create_reminder(schema: &Schema<'_>, request: &Request) -> HandlerResult {
    let attrs: ReminderAttrs = request.json_body()?;
    let list_id = attrs.list.map(IdRef::resolve).transpose()?;
    let reminder = schema.reminders().create(NewReminder {
        text: attrs.text,
        list_id,
    })?;
    Ok(Record::Reminder(reminder).into())
}

fn static_reminders(_schema: &Schema<'_>, _request: &Request) -> HandlerResult {
    Ok(Payload::Json(json!({
        "reminders": [
            { "id": 1, "text": "Walk the dog" },
            { "id": 2, "text": "Take out the trash" },
            { "id": 3, "text": "Work out" }
        ]
    })))
}

fn destroy_reminder(schema: &Schema<'_>, request: &Request) -> HandlerResult {
    let id = request.id_param("id", ModelKind::Reminder)?;
    schema.reminders().destroy(id)?;
    Ok(Payload::Empty)
}

fn list_reminders(schema: &Schema<'_>, request: &Request) -> HandlerResult {
    let id = request.id_param("id", ModelKind::List)?;
    Ok(Collection::Reminders(schema.lists().reminders(id)?).into())
}
