// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use triago_agent::Pipeline;
use triago_core::TriagoError;

use crate::handlers;

/// Scoring knobs the handlers need (mirrors `ScoringConfig` from
/// `triago-config` to avoid a dependency on the config crate here).
#[derive(Debug, Clone)]
pub struct ScoringSettings {
    /// Balance granted to a new session.
    pub initial_points: u32,
    /// Session cookie retention in seconds.
    pub cookie_max_age_secs: u64,
}

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The routing pipeline; one instance serves all requests.
    pub pipeline: Arc<Pipeline>,
    /// Scoring settings for cookie handling.
    pub scoring: ScoringSettings,
    /// Health state.
    pub health: HealthState,
}

/// Gateway server configuration (mirrors `GatewayConfig` from `triago-config`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the gateway router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(handlers::post_chat))
        .route("/api/session/init", get(handlers::get_session_init))
        .route(
            "/api/session/score",
            get(handlers::get_session_score).post(handlers::post_session_score),
        )
        .route("/health", get(handlers::get_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves:
/// - POST /api/chat
/// - GET /api/session/init
/// - GET/POST /api/session/score
/// - GET /health
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), TriagoError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TriagoError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| TriagoError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
