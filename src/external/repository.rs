//! Timeline storage.
//!
//! [`TimelineRepository`] is the append-only store the hub writes into. Two
//! implementations ship: [`InMemoryTimeline`] (process lifetime, the default) and
//! [`SqliteTimeline`] (durable, backed by the `timeline_entries` table).

use anyhow::Context;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::error::{HubError, HubResult};
use crate::external::types::{ExternalEvent, ExternalSummary, Source};

/// Append-only, ordered store of timeline entries.
///
/// Implementations are synchronous; async callers should go through
/// `tokio::task::spawn_blocking`.
pub trait TimelineRepository: Send + Sync {
    /// Append one entry at the end of the timeline.
    fn append(&self, entry: &ExternalSummary) -> HubResult<()>;

    /// Append a batch so that its entries are contiguous in store order.
    fn append_all(&self, entries: &[ExternalSummary]) -> HubResult<()> {
        entries.iter().try_for_each(|entry| self.append(entry))
    }

    /// Every entry, in append order.
    fn all(&self) -> HubResult<Vec<ExternalSummary>>;
}

fn lock<T>(mutex: &Mutex<T>) -> HubResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|e| HubError::Internal(format!("timeline lock poisoned: {e}")))
}

/// Vec-backed timeline that lives as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryTimeline {
    entries: Mutex<Vec<ExternalSummary>>,
}

impl InMemoryTimeline {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimelineRepository for InMemoryTimeline {
    fn append(&self, entry: &ExternalSummary) -> HubResult<()> {
        lock(&self.entries)?.push(entry.clone());
        Ok(())
    }

    fn append_all(&self, entries: &[ExternalSummary]) -> HubResult<()> {
        lock(&self.entries)?.extend_from_slice(entries);
        Ok(())
    }

    fn all(&self) -> HubResult<Vec<ExternalSummary>> {
        Ok(lock(&self.entries)?.clone())
    }
}

/// SQLite-backed timeline. Store order is the `seq` autoincrement column.
pub struct SqliteTimeline {
    conn: Mutex<Connection>,
}

impl SqliteTimeline {
    /// Open (or create) the database file and wrap it.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let conn = crate::db::open_database(path).context("failed to open timeline database")?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap a connection whose schema is already initialized and migrated.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

fn insert_entry(conn: &Connection, entry: &ExternalSummary) -> HubResult<()> {
    let id = uuid::Uuid::now_v7().to_string();
    let now = chrono::Utc::now().to_rfc3339();
    let event = &entry.event;

    conn.execute(
        "INSERT INTO timeline_entries \
         (id, source, timestamp, type, text, image_url, tags, characters, milestone, summary, ingested_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            id,
            event.source.as_str(),
            event.timestamp,
            event.event_type,
            event.text,
            event.image_url,
            serde_json::to_string(&event.tags)?,
            serde_json::to_string(&event.characters)?,
            event.milestone,
            entry.summary,
            now,
        ],
    )?;
    Ok(())
}

impl TimelineRepository for SqliteTimeline {
    fn append(&self, entry: &ExternalSummary) -> HubResult<()> {
        let conn = lock(&self.conn)?;
        insert_entry(&conn, entry)
    }

    fn append_all(&self, entries: &[ExternalSummary]) -> HubResult<()> {
        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;
        for entry in entries {
            insert_entry(&tx, entry)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn all(&self) -> HubResult<Vec<ExternalSummary>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT source, timestamp, type, text, image_url, tags, characters, milestone, summary \
             FROM timeline_entries ORDER BY seq",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, Option<String>>(7)?,
                    row.get::<_, String>(8)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(
                |(source, timestamp, event_type, text, image_url, tags, characters, milestone, summary)|
                 -> HubResult<ExternalSummary> {
                    let source: Source = source.parse()?;
                    Ok(ExternalSummary {
                        event: ExternalEvent {
                            source,
                            timestamp,
                            event_type,
                            text,
                            image_url,
                            tags: serde_json::from_str(&tags)?,
                            characters: serde_json::from_str(&characters)?,
                            milestone,
                        },
                        summary,
                    })
                },
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(source: Source, text: &str) -> ExternalSummary {
        let event = ExternalEvent::new(source, "2024-01-01T00:00:00Z", "post")
            .with_text(text)
            .with_tags(["a", "b"]);
        ExternalSummary {
            summary: format!("{} post - {text}", source.as_str().to_uppercase()),
            event,
        }
    }

    fn sqlite() -> SqliteTimeline {
        SqliteTimeline::from_connection(crate::db::open_memory_database().unwrap())
    }

    #[test]
    fn in_memory_preserves_append_order() {
        let repo = InMemoryTimeline::new();
        repo.append(&entry(Source::X, "one")).unwrap();
        repo.append_all(&[entry(Source::Github, "two"), entry(Source::X, "three")])
            .unwrap();

        let texts: Vec<_> = repo
            .all()
            .unwrap()
            .into_iter()
            .map(|e| e.event.text.unwrap())
            .collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn in_memory_all_is_a_snapshot() {
        let repo = InMemoryTimeline::new();
        repo.append(&entry(Source::X, "one")).unwrap();
        let snapshot = repo.all().unwrap();
        repo.append(&entry(Source::X, "two")).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(repo.all().unwrap().len(), 2);
    }

    #[test]
    fn sqlite_round_trips_entries() {
        let repo = sqlite();
        let mut first = entry(Source::Calendar, "standup");
        first.event.characters = vec!["alice".into()];
        first.event.milestone = Some("meeting".into());
        first.event.image_url = Some("https://img".into());
        let second = entry(Source::Photos, "Paris");

        repo.append_all(&[first.clone(), second.clone()]).unwrap();

        assert_eq!(repo.all().unwrap(), vec![first, second]);
    }

    #[test]
    fn sqlite_empty_batch_is_noop() {
        let repo = sqlite();
        repo.append_all(&[]).unwrap();
        assert!(repo.all().unwrap().is_empty());
    }
}
