use anyhow::{Context, Result};
use std::path::Path;

use signal_hub::config::HubConfig;
use signal_hub::external::Source;

/// Ingest one JSON payload file and print the resulting timeline entries.
pub async fn ingest(config: &HubConfig, source: Source, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read payload file: {}", file.display()))?;
    let payload: serde_json::Value =
        serde_json::from_str(&json).context("failed to parse payload JSON")?;

    let hub = super::open_hub(config)?;
    let entries = hub
        .ingest(source, &payload)
        .await
        .with_context(|| format!("{source} ingest failed"))?;

    if entries.is_empty() {
        println!("Nothing to add from {source}.");
        return Ok(());
    }

    println!("Added {} {source} entries:", entries.len());
    for entry in &entries {
        let marker = entry
            .event
            .milestone
            .as_deref()
            .map(|m| format!(" [{m}]"))
            .unwrap_or_default();
        println!("  {}  {}{marker}", entry.event.timestamp, entry.summary);
    }

    Ok(())
}
