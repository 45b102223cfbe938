#![allow(dead_code)]

use rusqlite::Connection;
use signal_hub::db;
use signal_hub::external::{
    ExternalEvent, ExternalSummary, HubService, InMemoryTimeline, SqliteTimeline, Source,
};
use std::sync::Arc;

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    db::open_memory_database().unwrap()
}

/// A hub over an isolated in-memory timeline.
pub fn memory_hub() -> HubService {
    HubService::with_capacity(Arc::new(InMemoryTimeline::new()), 16)
}

/// A hub over an isolated in-memory SQLite timeline.
pub fn sqlite_hub() -> HubService {
    HubService::with_capacity(Arc::new(SqliteTimeline::from_connection(test_db())), 16)
}

/// Build a summarized entry directly, bypassing the pipeline.
pub fn summary(source: Source, timestamp: &str, event_type: &str, text: &str) -> ExternalSummary {
    ExternalSummary {
        event: ExternalEvent::new(source, timestamp, event_type).with_text(text),
        summary: format!("{} {event_type} - {text}", source.as_str().to_uppercase()),
    }
}
