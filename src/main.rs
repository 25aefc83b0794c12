// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::{load_server_config, load_variables_config};
use crate::infrastructure::live_store::InMemoryLiveState;
use crate::infrastructure::stream_follower::StreamFollower;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_anomaly, get_chart, get_dashboard, health_check, ingest, list_variables, stream_dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let server_config = load_server_config()?;
    let variables_config = load_variables_config()?;

    // Initialize tracing, RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server_config.server.log_filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let registry = Arc::new(variables_config.registry()?);
    if registry.is_empty() {
        tracing::warn!("Variable registry is empty, charts will be auto-scaled without reference lines");
    } else {
        tracing::info!("Loaded {} registered variables", registry.len());
    }

    // Live state store, fed by POST /ingest and optionally by the upstream stream
    let live_state = Arc::new(InMemoryLiveState::new(server_config.server.window_size)?);

    if let Some(upstream) = &server_config.upstream {
        StreamFollower::new(
            &upstream.url,
            Duration::from_secs(upstream.reconnect_secs),
            live_state.clone(),
        )
        .spawn();
    } else {
        tracing::info!("No upstream configured, accepting rows on /ingest only");
    }

    // Create services (application layer)
    let dashboard_service = DashboardService::new(
        live_state.clone(),
        registry,
        variables_config.ordering_policy(),
        variables_config.include.clone(),
    );

    let state = Arc::new(AppState {
        dashboard_service,
        live_state,
    });

    // Build router (presentation layer)
    // Compression is applied per response, so no CompressionLayer here
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/variables", get(list_variables))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/charts/:name", get(get_chart))
        .route("/anomaly", get(get_anomaly))
        .route("/ingest", post(ingest))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = server_config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", server_config.server.bind))?;
    tracing::info!("Starting tep-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
