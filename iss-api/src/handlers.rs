//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{debug, info, warn};

use iss_core::types::{format_epoch, Location, StateVector};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /epochs
pub async fn list_epochs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EpochsQuery>,
) -> Result<Json<Vec<String>>> {
    let epochs = state.service.list_epochs().await?;
    Ok(Json(query.apply(epochs)))
}

/// GET /epochs/:epoch
pub async fn get_epoch(
    State(state): State<Arc<AppState>>,
    Path(epoch): Path<String>,
) -> Result<Json<StateVector>> {
    Ok(Json(state.service.get_epoch(&epoch).await?))
}

/// GET /epochs/:epoch/location
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Path(epoch): Path<String>,
) -> Result<Json<Location>> {
    let location = state.service.get_location(&epoch).await?;
    debug!(epoch = %location.epoch, place = %location.geoposition, "Located");
    Ok(Json(location))
}

/// GET /epochs/:epoch/speed
pub async fn get_speed(
    State(state): State<Arc<AppState>>,
    Path(epoch): Path<String>,
) -> Result<Json<SpeedResponse>> {
    let speed = state.service.get_speed(&epoch).await?;
    Ok(Json(SpeedResponse { speed }))
}

/// GET /now
pub async fn get_now(State(state): State<Arc<AppState>>) -> Result<Json<NowResponse>> {
    let now = Utc::now();
    let location = state.service.nearest_to(now).await?;

    Ok(Json(NowResponse {
        location,
        now: format_epoch(now),
    }))
}

/// POST /refresh
pub async fn refresh(State(state): State<Arc<AppState>>) -> Result<Json<RefreshResponse>> {
    let stored = state.service.refresh().await?;
    info!(stored, "Refreshed on request");
    Ok(Json(RefreshResponse { stored }))
}

/// GET /health
///
/// Answers 503 with status `degraded` when the store cannot be read.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, count) = match state.service.store().len().await {
        Ok(count) => (StatusCode::OK, "ok", count),
        Err(e) => {
            warn!(error = %e, "Health check could not read the store");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", 0)
        }
    };

    let body = HealthResponse {
        status: status.into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        epochs_count: count,
    };
    (code, Json(body))
}
