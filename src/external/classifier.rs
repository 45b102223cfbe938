//! Milestone classification.
//!
//! The classifier annotates rather than filters: every event passes through, and
//! those that look like milestones get a `milestone` marker for downstream readers.

use crate::external::types::ExternalEvent;

/// Event types that are milestones by construction.
const MILESTONE_TYPES: [&str; 3] = ["milestone", "story_highlight", "release"];

/// Keywords that promote an event to a milestone, checked in this order.
pub const MILESTONE_KEYWORDS: [&str; 5] = ["ship", "launch", "release", "milestone", "highlight"];

/// The milestone marker for an event, if it qualifies.
///
/// An existing marker wins, then a milestone-like event type, then the first
/// keyword found (case-insensitively) in the text.
pub fn detect_milestone(event: &ExternalEvent) -> Option<String> {
    if let Some(marker) = &event.milestone {
        return Some(marker.clone());
    }

    if MILESTONE_TYPES.contains(&event.event_type.as_str()) {
        return Some(event.event_type.clone());
    }

    let text = event.text.as_deref()?.to_lowercase();
    MILESTONE_KEYWORDS
        .iter()
        .find(|keyword| text.contains(*keyword))
        .map(|keyword| keyword.to_string())
}

/// Tag each event with its milestone marker. One-to-one and order-preserving.
pub fn classify_milestones(events: Vec<ExternalEvent>) -> Vec<ExternalEvent> {
    events
        .into_iter()
        .map(|event| {
            let milestone = detect_milestone(&event);
            ExternalEvent { milestone, ..event }
        })
        .collect()
}
