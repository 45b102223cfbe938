use serde::Deserialize;
use serde_json::Value;

use super::{first_present, parse_payload, timestamp_or_now};
use crate::error::HubResult;
use crate::external::types::{ExternalEvent, Source};

#[derive(Debug, Default, Deserialize)]
struct CalendarPayload {
    events: Option<Vec<CalendarEntry>>,
}

#[derive(Debug, Default, Deserialize)]
struct CalendarEntry {
    start: Option<String>,
    title: Option<String>,
    description: Option<String>,
    attendees: Option<Vec<String>>,
}

pub fn normalize(payload: &Value) -> HubResult<Vec<ExternalEvent>> {
    let payload: CalendarPayload = parse_payload(Source::Calendar, payload)?;

    Ok(payload
        .events
        .unwrap_or_default()
        .into_iter()
        .map(|entry| ExternalEvent {
            text: first_present([entry.description, entry.title]),
            tags: vec!["meeting".to_string()],
            characters: entry.attendees.unwrap_or_default(),
            ..ExternalEvent::new(Source::Calendar, timestamp_or_now(entry.start), "event")
        })
        .collect())
}
