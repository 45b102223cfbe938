use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{parse_payload, timestamp_or_now};
use crate::error::HubResult;
use crate::external::types::{ExternalEvent, Source};

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("hashtag pattern is valid"));

#[derive(Debug, Default, Deserialize)]
struct InstagramPayload {
    items: Option<Vec<Item>>,
}

#[derive(Debug, Default, Deserialize)]
struct Item {
    timestamp: Option<String>,
    media_type: Option<String>,
    caption: Option<String>,
    media_url: Option<String>,
}

/// Hashtags in caption order, without the leading `#`.
pub fn extract_hashtags(caption: Option<&str>) -> Vec<String> {
    caption
        .map(|caption| {
            HASHTAG
                .captures_iter(caption)
                .map(|c| c[1].to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Media items keep their own media type (`IMAGE`, `VIDEO`, `story`, ...) as the event type.
pub fn normalize(payload: &Value) -> HubResult<Vec<ExternalEvent>> {
    let payload: InstagramPayload = parse_payload(Source::Instagram, payload)?;

    Ok(payload
        .items
        .unwrap_or_default()
        .into_iter()
        .map(|item| {
            let tags = extract_hashtags(item.caption.as_deref());
            ExternalEvent {
                text: item.caption,
                image_url: item.media_url,
                tags,
                ..ExternalEvent::new(
                    Source::Instagram,
                    timestamp_or_now(item.timestamp),
                    item.media_type.unwrap_or_default(),
                )
            }
        })
        .collect())
}
