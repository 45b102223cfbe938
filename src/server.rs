//! HTTP surface for the hub.
//!
//! Provides [`router`] (ingest, status, and health routes over a [`HubService`]),
//! [`setup_hub`] (repository + channel wiring from config), and [`serve`], which
//! runs the router until ctrl-c.

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::config::{HubConfig, StorageBackend};
use crate::error::HubError;
use crate::external::{HubService, HubStatus, InMemoryTimeline, SqliteTimeline, TimelineRepository};

/// Build the timeline repository named by `storage.backend`.
pub fn open_repository(config: &HubConfig) -> Result<Arc<dyn TimelineRepository>> {
    let repo: Arc<dyn TimelineRepository> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("using in-memory timeline (not persisted across restarts)");
            Arc::new(InMemoryTimeline::new())
        }
        StorageBackend::Sqlite => {
            let db_path = config.resolved_db_path();
            let repo = SqliteTimeline::open(&db_path)?;
            tracing::info!(db = %db_path.display(), "sqlite timeline ready");
            Arc::new(repo)
        }
    };
    Ok(repo)
}

/// Shared setup: open the configured repository and wrap it in a hub.
pub fn setup_hub(config: &HubConfig) -> Result<HubService> {
    let repo = open_repository(config)?;
    Ok(HubService::with_capacity(repo, config.ingest.notify_capacity))
}

/// Error body returned by the ingest route.
struct ApiError(HubError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            HubError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            // `ingest_named` resolves unknown sources to an empty ingest, so reaching
            // here means a caller bypassed it.
            HubError::UnknownSource(_)
            | HubError::Storage(_)
            | HubError::Serialization(_)
            | HubError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl From<HubError> for ApiError {
    fn from(e: HubError) -> Self {
        Self(e)
    }
}

async fn ingest(
    State(hub): State<HubService>,
    Path(source): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    tracing::debug!(source = %source, "ingest request");
    let entries = hub.ingest_named(&source, &payload).await?;
    Ok(Json(json!({ "entries": entries })))
}

async fn status(State(hub): State<HubService>) -> Result<Json<HubStatus>, ApiError> {
    Ok(Json(hub.status().await?))
}

async fn health() -> &'static str {
    "ok"
}

/// Routes: `POST /external/{source}/ingest`, `GET /external/status`, `GET /health`.
pub fn router(hub: HubService) -> Router {
    Router::new()
        .route("/external/{source}/ingest", post(ingest))
        .route("/external/status", get(status))
        .route("/health", get(health))
        .with_state(hub)
}

/// Log every ingest delta until the hub's channel closes.
fn spawn_delta_logger(mut rx: broadcast::Receiver<crate::external::IngestDelta>) {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(delta) => {
                    tracing::info!(kind = %delta.kind, entries = delta.entries.len(), "timeline updated");
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "delta logger lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

/// Start the HTTP server and block until ctrl-c.
pub async fn serve(config: HubConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "starting signal hub");

    let hub = setup_hub(&config)?;
    spawn_delta_logger(hub.subscribe());

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "listening at http://{bind_addr}/external");

    axum::serve(listener, router(hub))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
            tracing::info!("shutting down signal hub");
        })
        .await?;

    Ok(())
}
