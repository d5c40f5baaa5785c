//! HTTP agent: sample ingestion and dashboard queries.
//!
//! This module provides the REST surface the dashboard polls:
//! - `POST /api/occupancy/update` records one sample
//! - `GET /api/occupancy/*` serves the computed views
//!
//! # Architecture
//!
//! ```text
//! Counter device ──→ POST /update ──→ MemoryStore ──→ core builders ──→ dashboard
//! ```
//!
//! Consumers poll for recomputed summaries; there are no subscriptions and no
//! streaming state. Every query handler takes a fresh snapshot of the store,
//! injects the current instant, and runs the pure builders.

use crate::core::{
    daily_summary, hourly_trend, recent_activity, resolve_limit, week_start, weekly_summary,
    ActivityEntry, DailySummary, EngineError, TimeRange, TrendPoint, WeeklySummary,
};
use crate::store::{Direction, MemoryStore, Sample, SampleStore};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind to (0 for random)
    pub port: u16,
    /// Reference timezone for bucketing and display
    pub tz: Tz,
    /// Default number of recent activity rows
    pub activity_limit: usize,
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(port: u16, tz: Tz, activity_limit: usize) -> Self {
        Self {
            port,
            tz,
            activity_limit,
        }
    }
}

/// Shared server state
pub struct ServerState {
    /// Recorded samples
    store: RwLock<MemoryStore>,
    /// Reference timezone
    tz: Tz,
    /// Default activity feed length
    activity_limit: usize,
}

impl ServerState {
    fn new(config: &ServerConfig) -> Self {
        Self {
            store: RwLock::new(MemoryStore::new()),
            tz: config.tz,
            activity_limit: config.activity_limit,
        }
    }
}

/// Success envelope for data endpoints
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Record listing envelope
#[derive(Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Sample>,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

fn bad_request(code: &str, error: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error,
            code: code.to_string(),
        }),
    )
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// One incoming sample from a counter device
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub timestamp: DateTime<Utc>,
    pub current_count: i64,
    pub direction: Option<Direction>,
}

/// POST /api/occupancy/update
///
/// Validation lives here, on the ingestion path; the engine assumes
/// well-formed samples.
async fn update(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<UpdateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Sample>>), (StatusCode, Json<ErrorResponse>)> {
    if request.current_count < 0 {
        return Err(bad_request(
            "NEGATIVE_COUNT",
            "current_count cannot be negative".to_string(),
        ));
    }

    let sample = Sample {
        timestamp: request.timestamp,
        count: request.current_count as u32,
        direction: request.direction,
    };

    state.store.write().await.record(sample.clone());
    tracing::debug!(count = sample.count, "recorded sample");

    Ok((StatusCode::CREATED, ApiResponse::ok(sample)))
}

/// GET /api/occupancy
async fn list(State(state): State<Arc<ServerState>>) -> Json<ListResponse> {
    let records = state.store.read().await.fetch_recent(100, false);
    Json(ListResponse {
        success: true,
        count: records.len(),
        data: records,
    })
}

/// GET /api/occupancy/latest
async fn latest(State(state): State<Arc<ServerState>>) -> Json<ApiResponse<Option<Sample>>> {
    let latest = state.store.read().await.latest().cloned();
    ApiResponse::ok(latest)
}

/// GET /api/occupancy/today
async fn today(State(state): State<Arc<ServerState>>) -> Json<ApiResponse<DailySummary>> {
    let now = Utc::now();
    let samples = state
        .store
        .read()
        .await
        .fetch_range(&TimeRange::today(now, state.tz));
    ApiResponse::ok(daily_summary(&samples, now, state.tz))
}

/// GET /api/occupancy/today-trend
async fn today_trend(State(state): State<Arc<ServerState>>) -> Json<ApiResponse<Vec<TrendPoint>>> {
    let now = Utc::now();
    let samples = state
        .store
        .read()
        .await
        .fetch_range(&TimeRange::today(now, state.tz));
    ApiResponse::ok(hourly_trend(&samples, state.tz))
}

#[derive(Deserialize)]
pub struct WeeklyParams {
    /// Explicit week start date (YYYY-MM-DD); defaults to the current week
    week: Option<NaiveDate>,
}

/// GET /api/occupancy/weekly
async fn weekly(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<WeeklyParams>,
) -> Json<ApiResponse<WeeklySummary>> {
    let begin = params.week.unwrap_or_else(|| week_start(Utc::now(), state.tz));
    let samples = state
        .store
        .read()
        .await
        .fetch_range(&TimeRange::week(begin, state.tz));
    ApiResponse::ok(weekly_summary(&samples, begin, state.tz))
}

#[derive(Deserialize)]
pub struct RecentParams {
    limit: Option<i64>,
}

/// GET /api/occupancy/recent
async fn recent(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<RecentParams>,
) -> Result<Json<ApiResponse<Vec<ActivityEntry>>>, (StatusCode, Json<ErrorResponse>)> {
    let limit = resolve_limit(params.limit.or(Some(state.activity_limit as i64))).map_err(
        |e| match e {
            EngineError::InvalidLimit(_) => bad_request("INVALID_LIMIT", e.to_string()),
            other => bad_request("INVALID_ARGUMENT", other.to_string()),
        },
    )?;

    let samples = state.store.read().await.fetch_recent(limit, true);
    Ok(ApiResponse::ok(recent_activity(&samples, limit, state.tz)))
}

/// Run the HTTP agent
pub async fn run(config: ServerConfig) -> anyhow::Result<(SocketAddr, tokio::sync::oneshot::Sender<()>)> {
    let state = Arc::new(ServerState::new(&config));

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/occupancy/update", post(update))
        .route("/api/occupancy", get(list))
        .route("/api/occupancy/latest", get(latest))
        .route("/api/occupancy/today", get(today))
        .route("/api/occupancy/today-trend", get(today_trend))
        .route("/api/occupancy/weekly", get(weekly))
        .route("/api/occupancy/recent", get(recent))
        .layer(
            // The dashboard is a browser SPA served from anywhere.
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    tracing::info!("Occupancy agent listening on http://{}", actual_addr);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("Server shutdown signal received");
            })
            .await
        {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok((actual_addr, shutdown_tx))
}
