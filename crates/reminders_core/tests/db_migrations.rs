use reminders_core::db::migrations::{apply_migrations, latest_version};
use reminders_core::db::open_db_in_memory;
use reminders_core::{NewList, NewReminder, Schema};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "lists");
    assert_table_exists(&conn, "reminders");
}

#[test]
fn applying_migrations_again_keeps_data() {
    let mut conn = open_db_in_memory().unwrap();
    Schema::new(&conn)
        .lists()
        .create(NewList::named("Home"))
        .unwrap();

    apply_migrations(&mut conn).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(Schema::new(&conn).lists().all().unwrap().len(), 1);
}

#[test]
fn deleted_ids_stay_retired_in_sqlite_sequence() {
    let conn = open_db_in_memory().unwrap();
    let schema = Schema::new(&conn);

    let first = schema.reminders().create(NewReminder::new("a")).unwrap();
    schema.reminders().destroy(first.id).unwrap();
    let second = schema.reminders().create(NewReminder::new("b")).unwrap();

    assert_eq!(second.id, first.id + 1);
    let seq: i64 = conn
        .query_row(
            "SELECT seq FROM sqlite_sequence WHERE name = 'reminders';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(seq, second.id);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
