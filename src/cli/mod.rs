//! One-shot CLI commands. These always work against the durable SQLite timeline at
//! `storage.db_path`, whatever backend `serve` is configured with.

pub mod doctor;
pub mod export;
pub mod ingest;
pub mod status;

use anyhow::Result;
use std::sync::Arc;

use signal_hub::config::HubConfig;
use signal_hub::external::{HubService, SqliteTimeline};

/// Open the on-disk timeline and wrap it in a hub.
pub fn open_hub(config: &HubConfig) -> Result<HubService> {
    let repo = SqliteTimeline::open(config.resolved_db_path())?;
    Ok(HubService::with_capacity(
        Arc::new(repo),
        config.ingest.notify_capacity,
    ))
}
