mod helpers;

use signal_hub::db::migrations::{get_schema_version, run_migrations, CURRENT_SCHEMA_VERSION};
use signal_hub::db::schema::init_schema;

#[test]
fn fresh_db_migrates_to_current_version() {
    let conn = helpers::test_db();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn migrations_are_idempotent() {
    let mut conn = helpers::test_db();
    run_migrations(&mut conn).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn manual_v1_db_upgrades_and_keeps_rows() {
    // Simulate a v1 database with data written before the milestone column existed
    let mut conn = rusqlite::Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO timeline_entries (id, source, timestamp, type, text, summary, ingested_at) \
         VALUES ('e1', 'github', '2024-01-01T00:00:00Z', 'commit', 'fix', 'GITHUB commit - fix', '2024-01-01T00:00:00Z')",
        [],
    )
    .unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), 1);

    run_migrations(&mut conn).unwrap();

    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
    let (summary, milestone): (String, Option<String>) = conn
        .query_row(
            "SELECT summary, milestone FROM timeline_entries WHERE id = 'e1'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(summary, "GITHUB commit - fix");
    assert!(milestone.is_none());
}
