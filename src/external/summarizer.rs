//! Summaries for timeline entries.
//!
//! [`summarize`] is async so a richer summarization step can slot in behind the
//! same signature; rendering today is purely local.

use crate::external::types::{ExternalEvent, ExternalSummary};

/// Render the one-line summary: `SOURCE type`, plus ` - text` when there is text.
pub fn render_summary(event: &ExternalEvent) -> String {
    let base = format!("{} {}", event.source.as_str().to_uppercase(), event.event_type);
    match event.display_text() {
        Some(text) => format!("{base} - {text}"),
        None => base,
    }
}

/// Attach a summary to every event. One-to-one and order-preserving.
pub async fn summarize(events: Vec<ExternalEvent>) -> Vec<ExternalSummary> {
    events
        .into_iter()
        .map(|event| ExternalSummary {
            summary: render_summary(&event),
            event,
        })
        .collect()
}
