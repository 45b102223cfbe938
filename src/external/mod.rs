//! External signals hub: adapters, noise filter, milestone classifier, summarizer,
//! timeline repositories, and the [`hub::HubService`] orchestrator that sequences them.

pub mod adapters;
pub mod classifier;
pub mod filter;
pub mod hub;
pub mod repository;
pub mod summarizer;
pub mod types;

pub use hub::HubService;
pub use repository::{InMemoryTimeline, SqliteTimeline, TimelineRepository};
pub use types::{ExternalEvent, ExternalSummary, HubStatus, IngestDelta, Source, SourceStatus};
