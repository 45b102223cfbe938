use serde::Deserialize;
use serde_json::Value;

use super::{first_present, parse_payload, timestamp_or_now};
use crate::error::HubResult;
use crate::external::types::{ExternalEvent, Source};

/// Caption used when a photo has neither a caption nor a location.
pub const DEFAULT_PHOTO_TEXT: &str = "Photo captured";

#[derive(Debug, Default, Deserialize)]
struct PhotosPayload {
    photos: Option<Vec<Photo>>,
}

#[derive(Debug, Default, Deserialize)]
struct Photo {
    captured_at: Option<String>,
    caption: Option<String>,
    location: Option<String>,
    url: Option<String>,
    people: Option<Vec<String>>,
}

/// Photos always carry text; the location doubles as caption and tag.
pub fn normalize(payload: &Value) -> HubResult<Vec<ExternalEvent>> {
    let payload: PhotosPayload = parse_payload(Source::Photos, payload)?;

    Ok(payload
        .photos
        .unwrap_or_default()
        .into_iter()
        .map(|photo| {
            let location = first_present([photo.location]);
            let text = first_present([photo.caption, location.clone()])
                .unwrap_or_else(|| DEFAULT_PHOTO_TEXT.to_string());

            let mut tags = vec!["photo".to_string()];
            tags.extend(location);

            ExternalEvent {
                text: Some(text),
                image_url: photo.url,
                tags,
                characters: photo.people.unwrap_or_default(),
                ..ExternalEvent::new(Source::Photos, timestamp_or_now(photo.captured_at), "photo")
            }
        })
        .collect())
}
