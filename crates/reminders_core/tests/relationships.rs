use reminders_core::{ListMember, ModelKind, NewList, NewReminder, Store, StoreError};

fn setup() -> Store {
    Store::open_in_memory().unwrap()
}

#[test]
fn list_reminders_are_exactly_the_back_referencing_reminders() {
    let store = setup();
    let schema = store.schema();

    let home = schema.lists().create(NewList::named("Home")).unwrap();
    let work = schema.lists().create(NewList::named("Work")).unwrap();
    let reminders = [
        schema
            .reminders()
            .create(NewReminder::new("Do taxes").in_list(home.id))
            .unwrap(),
        schema
            .reminders()
            .create(NewReminder::new("Visit bank").in_list(work.id))
            .unwrap(),
        schema
            .reminders()
            .create(NewReminder::new("Walk the dog"))
            .unwrap(),
        schema
            .reminders()
            .create(NewReminder::new("Mow lawn").in_list(home.id))
            .unwrap(),
    ];

    for list in [&home, &work] {
        let derived = schema.lists().reminders(list.id).unwrap();
        let expected: Vec<_> = reminders
            .iter()
            .filter(|reminder| reminder.list_id == Some(list.id))
            .cloned()
            .collect();
        assert_eq!(derived, expected);
    }
}

#[test]
fn relinking_moves_reminder_between_lists() {
    let store = setup();
    let schema = store.schema();

    let home = schema.lists().create(NewList::named("Home")).unwrap();
    let work = schema.lists().create(NewList::named("Work")).unwrap();
    let reminder = schema
        .reminders()
        .create(NewReminder::new("Call plumber").in_list(home.id))
        .unwrap();

    schema
        .relations()
        .link(reminder.id, Some(work.id))
        .unwrap();

    assert!(schema.lists().reminders(home.id).unwrap().is_empty());
    assert_eq!(schema.lists().reminders(work.id).unwrap().len(), 1);
}

#[test]
fn deleting_reminder_removes_it_from_list_view() {
    let store = setup();
    let schema = store.schema();

    let home = schema.lists().create(NewList::named("Home")).unwrap();
    let reminder = schema
        .reminders()
        .create(NewReminder::new("Do taxes").in_list(home.id))
        .unwrap();
    schema.reminders().destroy(reminder.id).unwrap();

    assert!(schema.lists().reminders(home.id).unwrap().is_empty());
}

#[test]
fn reminders_of_missing_list_is_not_found() {
    let store = setup();
    let schema = store.schema();

    let err = schema.lists().reminders(5).unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound {
            kind: ModelKind::List,
            id: 5
        }
    ));
}

#[test]
fn list_creation_links_new_and_existing_members() {
    let store = setup();
    let schema = store.schema();

    let existing = schema
        .reminders()
        .create(NewReminder::new("Do taxes"))
        .unwrap();
    let list = schema
        .lists()
        .create(
            NewList::named("Home")
                .with_member(ListMember::Existing(existing.id))
                .with_member(ListMember::new_text("Fix sink")),
        )
        .unwrap();

    let members = schema.lists().reminders(list.id).unwrap();
    let texts: Vec<&str> = members.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Do taxes", "Fix sink"]);
    assert!(members.iter().all(|r| r.list_id == Some(list.id)));
}

#[test]
fn list_creation_with_missing_member_leaves_store_unchanged() {
    let store = setup();
    let schema = store.schema();

    let err = schema
        .lists()
        .create(
            NewList::named("Home")
                .with_member(ListMember::new_text("Fix sink"))
                .with_member(ListMember::Existing(77)),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::NotFound {
            kind: ModelKind::Reminder,
            id: 77
        }
    ));
    assert!(schema.lists().all().unwrap().is_empty());
    assert!(schema.reminders().all().unwrap().is_empty());
}

#[test]
fn belongs_to_navigation_returns_owner() {
    let store = setup();
    let schema = store.schema();

    let home = schema.lists().create(NewList::named("Home")).unwrap();
    let linked = schema
        .reminders()
        .create(NewReminder::new("Do taxes").in_list(home.id))
        .unwrap();
    let loose = schema
        .reminders()
        .create(NewReminder::new("Walk the dog"))
        .unwrap();

    assert_eq!(schema.reminders().list(&linked).unwrap(), Some(home));
    assert_eq!(schema.reminders().list(&loose).unwrap(), None);
}
