// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `triago serve` command implementation.
//!
//! Wires the Ollama provider into the routing pipeline and starts the
//! HTTP gateway.

use std::sync::Arc;

use tracing::{info, warn};

use triago_agent::{Pipeline, PipelineConfig};
use triago_config::model::TriagoConfig;
use triago_core::{HealthStatus, PluginAdapter, TriagoError};
use triago_gateway::{start_server, AppState, HealthState, ScoringSettings, ServerConfig};
use triago_ollama::OllamaProvider;

/// Runs the `triago serve` command.
///
/// Builds the provider and pipeline from configuration, probes provider
/// health once (a down model server is reported but not fatal -- the
/// pipeline degrades per its documented policies), and serves until the
/// process is stopped.
pub async fn run_serve(config: TriagoConfig) -> Result<(), TriagoError> {
    init_tracing(&config.agent.log_level);

    info!(agent = %config.agent.name, "starting triago serve");

    let provider = Arc::new(OllamaProvider::new(
        config.ollama.base_url.clone(),
        config.ollama.timeout_secs,
    )?);

    match provider.health_check().await? {
        HealthStatus::Healthy => {
            info!(base_url = %config.ollama.base_url, "ollama provider healthy");
        }
        HealthStatus::Degraded(detail) | HealthStatus::Unhealthy(detail) => {
            warn!(
                base_url = %config.ollama.base_url,
                detail = %detail,
                "ollama provider not healthy; filters will fail open/closed per policy"
            );
        }
    }

    let pipeline = Pipeline::new(
        provider,
        PipelineConfig {
            answer_model: config.ollama.answer_model.clone(),
            verdict_model: config.ollama.verdict_model.clone(),
            classifier_model: config.ollama.classifier_model.clone(),
            answer_temperature: config.ollama.answer_temperature,
            verdict_temperature: config.ollama.verdict_temperature,
        },
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
        scoring: ScoringSettings {
            initial_points: config.scoring.initial_points,
            cookie_max_age_secs: config.scoring.cookie_max_age_secs,
        },
        health: HealthState {
            start_time: std::time::Instant::now(),
        },
    };

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    start_server(&server_config, state).await
}

/// Initialize the tracing subscriber from the configured log level.
///
/// `RUST_LOG` overrides the config value when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("triago={log_level},warn")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
