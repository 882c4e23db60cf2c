//! HTTP API server for the wotex node.
//!
//! Provides REST endpoints for node status, the current sentries, and
//! trust-distance queries.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

use wotex_core::Direction;
use wotex_explorer::{ExplorerError, TrustQuery, TrustReport};

use crate::state::NodeState;

// --- Response types ---

#[derive(Serialize)]
pub struct StatusResponse {
    pub version: String,
    pub uptime_secs: u64,
    pub dataset: String,
    pub members: usize,
    pub certifications: usize,
    pub pending_identities: usize,
    pub pending_certifications: usize,
    pub step_max: u32,
    pub max_hops: u32,
}

#[derive(Deserialize)]
pub struct PathsParams {
    /// Target key: uid, public key, or `uid[n]`.
    pub to: String,
    #[serde(default)]
    pub sandbox: bool,
    #[serde(default)]
    pub direction: Direction,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: ExplorerError) -> ApiError {
    let status = match err {
        ExplorerError::NotFound(_) => StatusCode::NOT_FOUND,
        ExplorerError::SandboxRequired(_) => StatusCode::CONFLICT,
        ExplorerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::warn!(%status, error = %err, "query failed");
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

// --- Handlers ---

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

async fn handle_status(State(state): State<Arc<NodeState>>) -> Json<StatusResponse> {
    let config = state.explorer.config();
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        dataset: state.dataset.display().to_string(),
        members: state.store.member_count(),
        certifications: state.store.link_count(),
        pending_identities: state.store.pending_identity_count(),
        pending_certifications: state.store.pending_certification_count(),
        step_max: config.step_max,
        max_hops: config.max_hops(),
    })
}

async fn handle_sentries(
    State(state): State<Arc<NodeState>>,
) -> Result<Json<TrustReport>, ApiError> {
    state
        .explorer
        .explore(TrustQuery::default())
        .await
        .map(Json)
        .map_err(error_response)
}

async fn handle_paths(
    State(state): State<Arc<NodeState>>,
    Query(params): Query<PathsParams>,
) -> Result<Json<TrustReport>, ApiError> {
    let query = TrustQuery::to(params.to)
        .with_sandbox(params.sandbox)
        .with_direction(params.direction);
    state
        .explorer
        .explore(query)
        .await
        .map(Json)
        .map_err(error_response)
}

// --- Server ---

pub fn build_router(state: Arc<NodeState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(handle_health))
        .route("/api/v1/status", get(handle_status))
        .route("/api/v1/sentries", get(handle_sentries))
        .route("/api/v1/paths", get(handle_paths))
        .with_state(state)
}

pub async fn start_api_server(
    listen_addr: SocketAddr,
    state: Arc<NodeState>,
) -> anyhow::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(%listen_addr, "HTTP API server started");
    axum::serve(listener, app).await?;
    Ok(())
}
