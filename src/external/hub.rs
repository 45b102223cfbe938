//! Ingestion orchestrator.
//!
//! [`HubService::ingest`] is the single entry point. It runs the full pipeline for one
//! payload: normalize via the source adapter → drop noise → mark milestones →
//! summarize → persist, then sends exactly one [`IngestDelta`] on the notification
//! channel and returns the persisted entries.

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::error::{HubError, HubResult};
use crate::external::adapters;
use crate::external::classifier::classify_milestones;
use crate::external::filter::filter_noise;
use crate::external::repository::TimelineRepository;
use crate::external::summarizer::summarize;
use crate::external::types::{
    ExternalEvent, ExternalSummary, HubStatus, IngestDelta, Source, SourceStatus,
};

/// Orchestrates ingestion into an injected timeline repository.
///
/// Cheap to clone; clones share the repository and the notification channel.
#[derive(Clone)]
pub struct HubService {
    repo: Arc<dyn TimelineRepository>,
    deltas: broadcast::Sender<IngestDelta>,
}

impl HubService {
    pub fn new(repo: Arc<dyn TimelineRepository>, deltas: broadcast::Sender<IngestDelta>) -> Self {
        Self { repo, deltas }
    }

    /// Build a service with a fresh notification channel of the given capacity.
    pub fn with_capacity(repo: Arc<dyn TimelineRepository>, capacity: usize) -> Self {
        let (deltas, _) = broadcast::channel(capacity.max(1));
        Self::new(repo, deltas)
    }

    /// Receive one [`IngestDelta`] per subsequent ingest call.
    pub fn subscribe(&self) -> broadcast::Receiver<IngestDelta> {
        self.deltas.subscribe()
    }

    /// Run the full pipeline for one payload and notify subscribers.
    ///
    /// Validation failures abort before anything is stored or sent.
    pub async fn ingest(&self, source: Source, payload: &Value) -> HubResult<Vec<ExternalSummary>> {
        let normalized = self.normalize(source, payload)?;
        let normalized_count = normalized.len();

        let filtered = filter_noise(normalized);
        let classified = classify_milestones(filtered);
        let summaries = summarize(classified).await;
        let entries = self.persist(summaries).await?;

        tracing::info!(
            source = %source,
            normalized = normalized_count,
            persisted = entries.len(),
            "external ingest complete"
        );

        // No live receivers is not a failure.
        let receivers = self.deltas.send(IngestDelta::new(entries.clone())).unwrap_or(0);
        tracing::debug!(receivers, "ingest delta sent");

        Ok(entries)
    }

    /// String-keyed entry point for callers that receive the source tag as text.
    ///
    /// An unrecognized source resolves to no entries: nothing is stored or sent.
    pub async fn ingest_named(&self, source: &str, payload: &Value) -> HubResult<Vec<ExternalSummary>> {
        match source.parse::<Source>() {
            Ok(source) => self.ingest(source, payload).await,
            Err(HubError::UnknownSource(name)) => {
                tracing::warn!(source = %name, "ignoring payload from unknown source");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Map a raw payload to events with the source's adapter.
    pub fn normalize(&self, source: Source, payload: &Value) -> HubResult<Vec<ExternalEvent>> {
        let adapter = adapters::adapter_for(source);
        adapter(payload).inspect_err(|e| {
            tracing::warn!(source = %source, error = %e, "payload rejected");
        })
    }

    /// Append entries to the timeline in order and hand the same entries back.
    pub async fn persist(&self, entries: Vec<ExternalSummary>) -> HubResult<Vec<ExternalSummary>> {
        let repo = Arc::clone(&self.repo);
        tokio::task::spawn_blocking(move || -> HubResult<Vec<ExternalSummary>> {
            repo.append_all(&entries)?;
            Ok(entries)
        })
        .await
        .map_err(|e| HubError::Internal(format!("persist task failed: {e}")))?
    }

    /// Per-source connection state plus a snapshot of the whole timeline.
    pub async fn status(&self) -> HubResult<HubStatus> {
        let repo = Arc::clone(&self.repo);
        let timeline = tokio::task::spawn_blocking(move || repo.all())
            .await
            .map_err(|e| HubError::Internal(format!("status task failed: {e}")))??;

        Ok(HubStatus {
            sources: source_statuses(&timeline),
            timeline,
        })
    }
}

/// Connection state for every known source, in [`Source::ALL`] order.
///
/// `last_sync` is the timestamp of the last entry from that source in store order.
pub fn source_statuses(timeline: &[ExternalSummary]) -> Vec<SourceStatus> {
    Source::ALL
        .iter()
        .map(|&source| {
            let last = timeline.iter().rev().find(|entry| entry.event.source == source);
            SourceStatus {
                source,
                connected: last.is_some(),
                last_sync: last.map(|entry| entry.event.timestamp.clone()),
            }
        })
        .collect()
}
