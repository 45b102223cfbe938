//! Core ingestion type definitions.
//!
//! Defines [`Source`] (the closed set of external integrations), [`ExternalEvent`]
//! (one normalized item), [`ExternalSummary`] (a persisted timeline entry), and the
//! status/notification shapes returned by the hub.

use serde::{Deserialize, Serialize};

use crate::error::HubError;

/// The external integrations the hub knows how to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Commits and closed milestones.
    Github,
    /// Posts, reels and stories with captions.
    Instagram,
    /// Posts on X (formerly Twitter).
    X,
    /// Calendar events with attendees.
    Calendar,
    /// Camera roll photos with EXIF location and tagged people.
    Photos,
}

impl Source {
    /// Every known source, in status-report order.
    pub const ALL: [Source; 5] = [
        Self::Github,
        Self::Instagram,
        Self::X,
        Self::Calendar,
        Self::Photos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Instagram => "instagram",
            Self::X => "x",
            Self::Calendar => "calendar",
            Self::Photos => "photos",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Source {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" => Ok(Self::Github),
            "instagram" => Ok(Self::Instagram),
            "x" => Ok(Self::X),
            "calendar" => Ok(Self::Calendar),
            "photos" => Ok(Self::Photos),
            _ => Err(HubError::UnknownSource(s.to_string())),
        }
    }
}

/// One item from an external source, normalized to the common shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEvent {
    /// Origin tag, set by the adapter and never changed downstream.
    pub source: Source,
    /// ISO 8601 timestamp of the item (ingestion time when the source has none).
    pub timestamp: String,
    /// Event kind: `commit`, `milestone`, `post`, `photo`, `event`, or an Instagram media type.
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Labels in insertion order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Participant names (attendees, tagged people).
    #[serde(default)]
    pub characters: Vec<String>,
    /// Marker assigned by the milestone classifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
}

impl ExternalEvent {
    /// A bare event with no text, media, tags, or participants.
    pub fn new(source: Source, timestamp: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            source,
            timestamp: timestamp.into(),
            event_type: event_type.into(),
            text: None,
            image_url: None,
            tags: Vec::new(),
            characters: Vec::new(),
            milestone: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// `text` if it is present and non-empty.
    pub fn display_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// An [`ExternalEvent`] with its rendered one-line summary, as stored in the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalSummary {
    #[serde(flatten)]
    pub event: ExternalEvent,
    pub summary: String,
}

/// Connection state for one source, derived from the timeline contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    pub source: Source,
    pub connected: bool,
    pub last_sync: Option<String>,
}

/// Response from [`HubService::status`](crate::external::hub::HubService::status).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubStatus {
    pub sources: Vec<SourceStatus>,
    pub timeline: Vec<ExternalSummary>,
}

/// Wire tag carried by every [`IngestDelta`].
pub const EXTERNAL_INGEST: &str = "external_ingest";

/// Notification sent once per ingest call with the newly persisted entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestDelta {
    #[serde(rename = "type")]
    pub kind: String,
    pub entries: Vec<ExternalSummary>,
}

impl IngestDelta {
    pub fn new(entries: Vec<ExternalSummary>) -> Self {
        Self {
            kind: EXTERNAL_INGEST.to_string(),
            entries,
        }
    }
}
