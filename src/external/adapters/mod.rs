//! Source adapters: one pure mapping per integration from its raw JSON payload to
//! [`ExternalEvent`]s.
//!
//! Each adapter deserializes into a typed shape whose fields are all optional, so
//! absent collections normalize to nothing while wrongly-typed ones are rejected
//! with [`HubError::Validation`] before they reach the pipeline.

pub mod calendar;
pub mod github;
pub mod instagram;
pub mod photos;
pub mod x;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{HubError, HubResult};
use crate::external::types::{ExternalEvent, Source};

/// Signature shared by every adapter.
pub type Adapter = fn(&Value) -> HubResult<Vec<ExternalEvent>>;

/// Look up the adapter for a source.
pub fn adapter_for(source: Source) -> Adapter {
    match source {
        Source::Github => github::normalize,
        Source::Instagram => instagram::normalize,
        Source::X => x::normalize,
        Source::Calendar => calendar::normalize,
        Source::Photos => photos::normalize,
    }
}

/// Deserialize a payload into an adapter's typed shape.
///
/// `null` is treated as an empty object; any other non-object is rejected.
pub(crate) fn parse_payload<T>(source: Source, payload: &Value) -> HubResult<T>
where
    T: DeserializeOwned + Default,
{
    match payload {
        Value::Null => Ok(T::default()),
        Value::Object(_) => <T as Deserialize>::deserialize(payload)
            .map_err(|e| HubError::validation(source, e.to_string())),
        other => Err(HubError::validation(
            source,
            format!("expected a JSON object, got {}", json_kind(other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// First candidate that is present and non-empty.
pub(crate) fn first_present(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
}

/// The item's own timestamp, or the ingestion time when the source omitted it.
pub(crate) fn timestamp_or_now(timestamp: Option<String>) -> String {
    first_present([timestamp]).unwrap_or_else(|| chrono::Utc::now().to_rfc3339())
}
