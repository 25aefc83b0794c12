// HTTP request handlers
use crate::domain::live_state::LiveRow;
use crate::infrastructure::http_response::{accepts_brotli, error_response, into_response, json_response};
use crate::infrastructure::sse::dashboard_events;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct IngestAck {
    status: &'static str,
    steps: usize,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Ordered variable listing with metadata
pub async fn list_variables(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);

    match state.dashboard_service.list_variables().await {
        Ok(variables) => into_response(json_response(StatusCode::OK, &variables, compress).await),
        Err(e) => error_response(&e, compress).await,
    }
}

/// Every variable chart plus the anomaly history
pub async fn get_dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);

    match state.dashboard_service.render_dashboard().await {
        Ok(dashboard) => into_response(json_response(StatusCode::OK, &dashboard, compress).await),
        Err(e) => error_response(&e, compress).await,
    }
}

/// Re-rendered dashboard pushed on every live state change
pub async fn stream_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    dashboard_events(state.dashboard_service.clone(), state.live_state.subscribe())
}

/// Single variable chart
pub async fn get_chart(
    Path(name): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);

    match state.dashboard_service.render_variable(&name).await {
        Ok(chart) => into_response(json_response(StatusCode::OK, &chart, compress).await),
        Err(e) => error_response(&e, compress).await,
    }
}

/// Anomaly history chart
pub async fn get_anomaly(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);

    match state.dashboard_service.render_anomaly().await {
        Ok(chart) => into_response(json_response(StatusCode::OK, &chart, compress).await),
        Err(e) => error_response(&e, compress).await,
    }
}

/// Append one live row pushed by a bridge
pub async fn ingest(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(row): Json<LiveRow>,
) -> Response {
    let steps = state.live_state.append(&row).await;
    tracing::debug!("Ingested row time={} ({} steps held)", row.time, steps);

    let ack = IngestAck { status: "ok", steps };
    into_response(json_response(StatusCode::OK, &ack, accepts_brotli(&headers)).await)
}
