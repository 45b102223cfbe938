//! Noise filtering for normalized events.

use crate::external::types::ExternalEvent;

/// Event types kept even when they carry no text.
pub const ALWAYS_ALLOW_TYPES: [&str; 2] = ["milestone", "story_highlight"];

/// Whether an event is worth keeping on the timeline.
pub fn is_meaningful(event: &ExternalEvent) -> bool {
    ALWAYS_ALLOW_TYPES.contains(&event.event_type.as_str())
        || event.text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

/// Drop events without meaningful text, unless they are structurally significant.
///
/// Order-preserving; the result is a subset of the input.
pub fn filter_noise(events: Vec<ExternalEvent>) -> Vec<ExternalEvent> {
    let before = events.len();
    let kept: Vec<ExternalEvent> = events.into_iter().filter(is_meaningful).collect();
    if kept.len() < before {
        tracing::debug!(dropped = before - kept.len(), kept = kept.len(), "filtered noise");
    }
    kept
}
