// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Triago gateway.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Triago configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriagoConfig {
    /// Agent identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Ollama provider settings.
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Session scoring settings.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "triago".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Ollama provider configuration.
///
/// The answer model handles full responses; the verdict and classifier
/// models are smaller and cheaper, used only for gating.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    /// Ollama server address.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for full answers.
    #[serde(default = "default_answer_model")]
    pub answer_model: String,

    /// Model used for the intermediate verdict rubric.
    #[serde(default = "default_verdict_model")]
    pub verdict_model: String,

    /// Model used for the tier-2 domain classification.
    #[serde(default = "default_verdict_model")]
    pub classifier_model: String,

    /// Sampling temperature for answers.
    #[serde(default = "default_answer_temperature")]
    pub answer_temperature: f32,

    /// Sampling temperature for verdict and classification calls.
    #[serde(default = "default_verdict_temperature")]
    pub verdict_temperature: f32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            answer_model: default_answer_model(),
            verdict_model: default_verdict_model(),
            classifier_model: default_verdict_model(),
            answer_temperature: default_answer_temperature(),
            verdict_temperature: default_verdict_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_answer_model() -> String {
    "deepseek-r1:7b".to_string()
}

fn default_verdict_model() -> String {
    "deepseek-r1:1.5b".to_string()
}

fn default_answer_temperature() -> f32 {
    0.7
}

fn default_verdict_temperature() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    120
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Session scoring configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Balance granted to a new session.
    #[serde(default = "default_initial_points")]
    pub initial_points: u32,

    /// Session cookie retention in seconds.
    #[serde(default = "default_cookie_max_age_secs")]
    pub cookie_max_age_secs: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            initial_points: default_initial_points(),
            cookie_max_age_secs: default_cookie_max_age_secs(),
        }
    }
}

fn default_initial_points() -> u32 {
    100
}

fn default_cookie_max_age_secs() -> u64 {
    60 * 60 * 24 * 7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_models() {
        let config = TriagoConfig::default();
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
        assert_eq!(config.ollama.answer_model, "deepseek-r1:7b");
        assert_eq!(config.ollama.verdict_model, "deepseek-r1:1.5b");
        assert_eq!(config.ollama.answer_temperature, 0.7);
        assert_eq!(config.ollama.verdict_temperature, 0.3);
    }

    #[test]
    fn scoring_defaults() {
        let config = ScoringConfig::default();
        assert_eq!(config.initial_points, 100);
        assert_eq!(config.cookie_max_age_secs, 604_800);
    }

    #[test]
    fn unknown_section_field_rejected() {
        let toml_str = r#"
[ollama]
base_url = "http://localhost:11434"
modell = "typo"
"#;
        assert!(toml::from_str::<TriagoConfig>(toml_str).is_err());
    }
}
