use reminders_core::{
    Environment, ListBuild, MockServer, RelationMode, Request, SerializerPolicy, ServerConfig,
    Verb,
};
use serde_json::{json, Value};

fn setup() -> MockServer {
    MockServer::start(ServerConfig::for_environment(Environment::Test)).unwrap()
}

fn ids(body: &Value, key: &str) -> Vec<i64> {
    body[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

fn error_message(body: &Value) -> String {
    body["errors"][0].as_str().unwrap().to_string()
}

#[test]
fn get_lists_returns_every_list() {
    let mut server = setup();
    server.create_lists(2, ListBuild::new()).unwrap();

    let response = server.get("/api/lists");
    assert_eq!(response.status, 200);
    assert_eq!(
        response.body.unwrap(),
        json!({ "lists": [{ "id": 1, "name": "List 1" }, { "id": 2, "name": "List 2" }] })
    );
}

#[test]
fn list_reminders_match_back_references() {
    let mut server = setup();
    server.post("/api/reminders", r#"{"text":"Loose"}"#);
    let home = server.create_list(ListBuild::new().named("Home")).unwrap();
    let work = server.create_list(ListBuild::new().named("Work")).unwrap();

    let a = server.post(
        "/api/reminders",
        format!(r#"{{"text":"A","list":{}}}"#, home.id),
    );
    let b = server.post(
        "/api/reminders",
        format!(r#"{{"text":"B","list":{}}}"#, work.id),
    );
    let c = server.post(
        "/api/reminders",
        format!(r#"{{"text":"C","listId":"{}"}}"#, home.id),
    );
    assert!(a.is_success() && b.is_success() && c.is_success());

    let home_body = server
        .get(&format!("/api/lists/{}/reminders", home.id))
        .body
        .unwrap();
    let expected: Vec<i64> = [a, c]
        .iter()
        .map(|r| r.body.as_ref().unwrap()["reminder"]["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids(&home_body, "reminders"), expected);

    let work_body = server
        .get(&format!("/api/lists/{}/reminders", work.id))
        .body
        .unwrap();
    assert_eq!(work_body["reminders"][0]["text"], json!("B"));
    assert_eq!(ids(&work_body, "reminders").len(), 1);
}

#[test]
fn list_reminders_for_missing_list_is_404() {
    let server = setup();

    let response = server.get("/api/lists/12/reminders");
    assert_eq!(response.status, 404);
    assert_eq!(error_message(&response.body.unwrap()), "list not found: 12");

    let response = server.get("/api/lists/abc/reminders");
    assert_eq!(response.status, 404);
}

#[test]
fn empty_list_has_empty_reminder_collection() {
    let mut server = setup();
    let list = server.create_list(ListBuild::new()).unwrap();

    let response = server.get(&format!("/api/lists/{}/reminders", list.id));
    assert_eq!(response.status, 200);
    assert_eq!(response.body.unwrap(), json!({ "reminders": [] }));
}

#[test]
fn post_without_list_embeds_null() {
    let server = setup();

    let response = server.post("/api/reminders", r#"{ "text": "Buy milk" }"#);
    assert_eq!(response.status, 201);
    assert_eq!(
        response.body.unwrap(),
        json!({ "reminder": { "id": 1, "text": "Buy milk", "list": null } })
    );
}

#[test]
fn post_with_list_embeds_current_list_attributes() {
    let mut server = setup();
    let list = server.create_list(ListBuild::new()).unwrap();
    assert_eq!(list.id, 1);

    let response = server.post("/api/reminders", r#"{ "text": "Pay bills", "list": 1 }"#);
    assert_eq!(response.status, 201);
    assert_eq!(
        response.body.unwrap(),
        json!({ "reminder": { "id": 1, "text": "Pay bills", "list": { "id": 1, "name": "List 1" } } })
    );
}

#[test]
fn get_reminders_embeds_each_list() {
    let mut server = setup();
    let list = server.create_list(ListBuild::new().named("Home")).unwrap();
    server.post("/api/reminders", r#"{"text":"Loose"}"#);
    server.post(
        "/api/reminders",
        format!(r#"{{"text":"Owned","list":{}}}"#, list.id),
    );

    let body = server.get("/api/reminders").body.unwrap();
    assert_eq!(
        body,
        json!({
            "reminders": [
                { "id": 1, "text": "Loose", "list": null },
                { "id": 2, "text": "Owned", "list": { "id": 1, "name": "Home" } }
            ]
        })
    );
}

#[test]
fn post_to_missing_list_is_rejected_without_writes() {
    let server = setup();

    let response = server.post("/api/reminders", r#"{"text":"Orphan","list":3}"#);
    assert_eq!(response.status, 422);
    assert_eq!(
        server.get("/api/reminders").body.unwrap(),
        json!({ "reminders": [] })
    );
}

#[test]
fn malformed_bodies_are_rejected_without_writes() {
    let server = setup();

    for body in [
        "",
        "not json",
        r#"{"list":1}"#,
        r#"{"text":"x","colour":"red"}"#,
        r#"{"text":"x","list":"one"}"#,
        "42",
    ] {
        let response = server.post("/api/reminders", body);
        assert_eq!(response.status, 400, "body `{body}` should be malformed");
    }
    assert_eq!(
        server.get("/api/reminders").body.unwrap(),
        json!({ "reminders": [] })
    );
}

#[test]
fn delete_removes_reminder_everywhere_and_second_delete_is_404() {
    let mut server = setup();
    let list = server.create_list(ListBuild::new()).unwrap();
    server.post(
        "/api/reminders",
        format!(r#"{{"text":"Walk the dog","list":{}}}"#, list.id),
    );

    let response = server.delete("/api/reminders/1");
    assert_eq!(response.status, 204);
    assert_eq!(response.body, None);

    assert_eq!(
        server.get("/api/reminders").body.unwrap(),
        json!({ "reminders": [] })
    );
    assert_eq!(
        server
            .get(&format!("/api/lists/{}/reminders", list.id))
            .body
            .unwrap(),
        json!({ "reminders": [] })
    );

    let second = server.delete("/api/reminders/1");
    assert_eq!(second.status, 404);
    assert_eq!(error_message(&second.body.unwrap()), "reminder not found: 1");
}

#[test]
fn static_route_returns_plain_payload() {
    let server = setup();

    let body = server.get("/api/reminders_static").body.unwrap();
    assert_eq!(ids(&body, "reminders"), vec![1, 2, 3]);
}

#[test]
fn unknown_route_is_404_with_error_body() {
    let server = setup();

    let response = server.handle(Request::new(Verb::Put, "/api/reminders/1"));
    assert_eq!(response.status, 404);
    assert_eq!(
        error_message(&response.body.unwrap()),
        "no route defined for PUT /api/reminders/1"
    );
}

#[test]
fn query_string_and_trailing_slash_are_ignored() {
    let mut server = setup();
    server.create_list(ListBuild::new()).unwrap();

    let response = server.get("/api/lists/?include=all");
    assert_eq!(response.status, 200);
    assert_eq!(ids(&response.body.unwrap(), "lists"), vec![1]);
}

#[test]
fn serializer_policy_can_reference_relations() {
    let mut server = setup();
    let list = server.create_list(ListBuild::new()).unwrap();
    server.post(
        "/api/reminders",
        format!(r#"{{"text":"Owned","list":{}}}"#, list.id),
    );

    server.set_serializer_policy(SerializerPolicy {
        list_reminders: RelationMode::Reference,
        reminder_list: RelationMode::Reference,
    });

    assert_eq!(
        server.get("/api/lists").body.unwrap(),
        json!({ "lists": [{ "id": 1, "name": "List 1", "reminderIds": [1] }] })
    );
    assert_eq!(
        server.get("/api/reminders").body.unwrap(),
        json!({ "reminders": [{ "id": 1, "text": "Owned", "listId": 1 }] })
    );
}

#[test]
fn non_canonical_id_segments_touch_nothing() {
    let server = setup();
    server.post("/api/reminders", r#"{"text":"Keep me"}"#);

    let response = server.delete("/api/reminders/+1");
    assert_eq!(response.status, 404);
    assert_eq!(error_message(&response.body.unwrap()), "reminder not found: +1");
    assert_eq!(server.get("/api/lists/01/reminders").status, 404);

    assert_eq!(ids(&server.get("/api/reminders").body.unwrap(), "reminders"), vec![1]);
}
