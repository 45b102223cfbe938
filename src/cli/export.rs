use anyhow::Result;

use signal_hub::config::HubConfig;

/// Export the whole timeline as JSON to stdout.
pub async fn export(config: &HubConfig) -> Result<()> {
    let hub = super::open_hub(config)?;
    let timeline = hub.status().await?.timeline;

    let json = serde_json::to_string_pretty(&timeline)?;
    println!("{json}");

    eprintln!("Exported {} timeline entries.", timeline.len());

    Ok(())
}
