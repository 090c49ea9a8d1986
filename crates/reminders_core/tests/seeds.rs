use reminders_core::{Environment, ListBuild, MockServer, ReminderBuild, ServerConfig};
use serde_json::{json, Value};

fn seeded() -> MockServer {
    MockServer::start(ServerConfig::for_environment(Environment::Development)).unwrap()
}

fn reminder_texts(body: &Value) -> Vec<String> {
    body["reminders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["text"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn seeded_lists_come_back_in_seed_order() {
    let server = seeded();

    let response = server.get("/api/lists");
    assert_eq!(response.status, 200);
    assert_eq!(
        response.body.unwrap(),
        json!({
            "lists": [
                { "id": 1, "name": "Home" },
                { "id": 2, "name": "Work" },
                { "id": 3, "name": "List 1" },
                { "id": 4, "name": "List 2" }
            ]
        })
    );
}

#[test]
fn seeded_reminders_follow_the_script() {
    let server = seeded();

    let body = server.get("/api/reminders").body.unwrap();
    let texts = reminder_texts(&body);
    assert_eq!(texts.len(), 13);
    assert_eq!(
        &texts[..4],
        &["Do taxes", "Visit bank", "Walk the dog", "Reminder 1"]
    );
    assert_eq!(texts[12], "Reminder 10");
    assert_eq!(body["reminders"][2]["list"], Value::Null);
    assert_eq!(body["reminders"][0]["list"], json!({ "id": 1, "name": "Home" }));
}

#[test]
fn seeded_list_memberships() {
    let server = seeded();

    let home = server.get("/api/lists/1/reminders").body.unwrap();
    assert_eq!(reminder_texts(&home), vec!["Do taxes"]);

    let list_one = server.get("/api/lists/3/reminders").body.unwrap();
    assert_eq!(reminder_texts(&list_one), vec!["Reminder 4", "Reminder 5"]);

    let list_two = server.get("/api/lists/4/reminders").body.unwrap();
    assert_eq!(
        reminder_texts(&list_two),
        vec!["Reminder 6", "Reminder 7", "Reminder 8", "Reminder 9", "Reminder 10"]
    );
}

#[test]
fn factories_continue_after_seeding() {
    let mut server = seeded();

    let list = server.create_list(ListBuild::new()).unwrap();
    let reminder = server.create_reminder(ReminderBuild::new()).unwrap();

    assert_eq!(list.id, 5);
    assert_eq!(list.name, "List 3");
    assert_eq!(reminder.id, 14);
    assert_eq!(reminder.text, "Reminder 11");
}

#[test]
fn test_environment_starts_empty() {
    let server = MockServer::start(ServerConfig::for_environment(Environment::Test)).unwrap();

    assert_eq!(server.get("/api/lists").body.unwrap(), json!({ "lists": [] }));
    assert_eq!(
        server.get("/api/reminders").body.unwrap(),
        json!({ "reminders": [] })
    );
}

#[test]
fn production_seed_is_home_plus_one_filled_list() {
    let mut server =
        MockServer::start(ServerConfig::for_environment(Environment::Production)).unwrap();

    assert_eq!(
        server.get("/api/lists").body.unwrap(),
        json!({ "lists": [{ "id": 1, "name": "Home" }, { "id": 2, "name": "List 1" }] })
    );

    let home = server.get("/api/lists/1/reminders").body.unwrap();
    assert_eq!(reminder_texts(&home), vec!["Do taxes"]);

    let filled = server.get("/api/lists/2/reminders").body.unwrap();
    assert_eq!(
        reminder_texts(&filled),
        vec!["Reminder 1", "Reminder 2", "Reminder 3", "Reminder 4", "Reminder 5"]
    );

    let next = server.create_list(ListBuild::new()).unwrap();
    assert_eq!(next.name, "List 2");
    assert_eq!(server.schema().lists().reminders(next.id).unwrap().len(), 5);
}
