use serde::Deserialize;
use serde_json::Value;

use super::{parse_payload, timestamp_or_now};
use crate::error::HubResult;
use crate::external::types::{ExternalEvent, Source};

#[derive(Debug, Default, Deserialize)]
struct XPayload {
    posts: Option<Vec<Post>>,
}

#[derive(Debug, Default, Deserialize)]
struct Post {
    created_at: Option<String>,
    text: Option<String>,
    media_urls: Option<Vec<String>>,
}

/// Posts become `post` events; attached media surfaces as the first image and a `media` tag.
pub fn normalize(payload: &Value) -> HubResult<Vec<ExternalEvent>> {
    let payload: XPayload = parse_payload(Source::X, payload)?;

    Ok(payload
        .posts
        .unwrap_or_default()
        .into_iter()
        .map(|post| {
            let media = post.media_urls.unwrap_or_default();
            let tags = if media.is_empty() {
                Vec::new()
            } else {
                vec!["media".to_string()]
            };
            ExternalEvent {
                text: post.text,
                image_url: media.into_iter().next(),
                tags,
                ..ExternalEvent::new(Source::X, timestamp_or_now(post.created_at), "post")
            }
        })
        .collect())
}
