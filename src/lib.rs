//! External signals hub for a personal memoir timeline.
//!
//! Third-party payloads (GitHub, Instagram, X, Calendar, Photos) are normalized into a
//! common event shape, stripped of noise, marked as milestones where they qualify,
//! summarized into one-line timeline entries, and appended to a timeline store.
//! Every ingest call sends one notification with the entries it persisted.
//!
//! # Pipeline
//!
//! | Stage | Module | Contract |
//! |-------|--------|----------|
//! | Normalize | [`external::adapters`] | payload → events, typed validation at the boundary |
//! | Filter | [`external::filter`] | drop events without text unless structurally significant |
//! | Classify | [`external::classifier`] | annotate milestone markers, one-to-one |
//! | Summarize | [`external::summarizer`] | `SOURCE type - text` |
//! | Persist | [`external::repository`] | append-only, in memory or SQLite |
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`db`] — SQLite initialization, schema, migrations, and health checks
//! - [`error`] — The [`error::HubError`] taxonomy
//! - [`external`] — The ingestion pipeline and the [`external::HubService`] orchestrator
//! - [`server`] — HTTP surface over the hub (axum)

pub mod config;
pub mod db;
pub mod error;
pub mod external;
pub mod server;
