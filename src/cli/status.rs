use anyhow::Result;

use signal_hub::config::HubConfig;

/// Display per-source connection state in the terminal.
pub async fn status(config: &HubConfig) -> Result<()> {
    let hub = super::open_hub(config)?;
    let status = hub.status().await?;

    println!("External Sources");
    println!("{}", "=".repeat(40));
    for source in &status.sources {
        let state = if source.connected { "connected" } else { "-" };
        println!(
            "  {:<12} {:<10} {}",
            source.source.as_str(),
            state,
            source.last_sync.as_deref().unwrap_or("never")
        );
    }
    println!();
    println!("Timeline entries:      {}", status.timeline.len());

    Ok(())
}
