//! SQL DDL for the durable timeline store.
//!
//! Defines the `timeline_entries` and `schema_meta` tables. All DDL uses
//! `IF NOT EXISTS` for idempotent initialization; later columns arrive through
//! [`migrations`](super::migrations).

use rusqlite::Connection;

/// Schema version 1 DDL.
const SCHEMA_SQL: &str = r#"
-- Append-only timeline; seq defines store order
CREATE TABLE IF NOT EXISTS timeline_entries (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    source TEXT NOT NULL CHECK(source IN ('github','instagram','x','calendar','photos')),
    timestamp TEXT NOT NULL,
    type TEXT NOT NULL,
    text TEXT,
    image_url TEXT,
    tags TEXT NOT NULL DEFAULT '[]',
    characters TEXT NOT NULL DEFAULT '[]',
    summary TEXT NOT NULL,
    ingested_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_timeline_source ON timeline_entries(source);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"timeline_entries".to_string()));
        assert!(tables.contains(&"schema_meta".to_string()));
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
    }

    #[test]
    fn unknown_source_violates_check() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO timeline_entries (id, source, timestamp, type, summary, ingested_at) \
             VALUES ('a', 'myspace', 't', 'post', 's', 't')",
            [],
        );
        assert!(result.is_err());
    }
}
