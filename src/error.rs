//! Error taxonomy for the ingestion pipeline.

use thiserror::Error;

use crate::external::types::Source;

/// Errors surfaced by adapters, the orchestrator, and timeline repositories.
#[derive(Debug, Error)]
pub enum HubError {
    /// The source tag does not name one of the known integrations.
    #[error("unknown source: {0}")]
    UnknownSource(String),

    /// The payload does not have the shape the adapter expects.
    #[error("invalid {origin} payload: {reason}")]
    Validation { origin: Source, reason: String },

    /// The timeline store failed to read or write.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A stored entry could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Lock poisoning or a failed blocking task.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HubError {
    pub fn validation(origin: Source, reason: impl Into<String>) -> Self {
        Self::Validation {
            origin,
            reason: reason.into(),
        }
    }
}

pub type HubResult<T> = std::result::Result<T, HubError>;
