// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid hosts, sane temperatures, and point balances.

use crate::diagnostic::ConfigError;
use crate::model::TriagoConfig;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TriagoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !VALID_LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                VALID_LOG_LEVELS.join("/"),
                config.agent.log_level
            ),
        });
    }

    if config.ollama.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "ollama.base_url must not be empty".to_string(),
        });
    } else if !config.ollama.base_url.starts_with("http://")
        && !config.ollama.base_url.starts_with("https://")
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "ollama.base_url must start with http:// or https://, got `{}`",
                config.ollama.base_url
            ),
        });
    }

    for (key, model) in [
        ("ollama.answer_model", &config.ollama.answer_model),
        ("ollama.verdict_model", &config.ollama.verdict_model),
        ("ollama.classifier_model", &config.ollama.classifier_model),
    ] {
        if model.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    for (key, temperature) in [
        ("ollama.answer_temperature", config.ollama.answer_temperature),
        ("ollama.verdict_temperature", config.ollama.verdict_temperature),
    ] {
        if !(0.0..=2.0).contains(&temperature) {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be within [0.0, 2.0], got {temperature}"),
            });
        }
    }

    if config.ollama.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "ollama.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    }

    if config.scoring.initial_points == 0 || config.scoring.initial_points > 1000 {
        errors.push(ConfigError::Validation {
            message: format!(
                "scoring.initial_points must be within [1, 1000], got {}",
                config.scoring.initial_points
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = TriagoConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_base_url_fails_validation() {
        let mut config = TriagoConfig::default();
        config.ollama.base_url = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("base_url"))));
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = TriagoConfig::default();
        config.ollama.base_url = "localhost:11434".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("http"))));
    }

    #[test]
    fn out_of_range_temperature_fails_validation() {
        let mut config = TriagoConfig::default();
        config.ollama.answer_temperature = 3.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("answer_temperature"))
        ));
    }

    #[test]
    fn bogus_log_level_fails_validation() {
        let mut config = TriagoConfig::default();
        config.agent.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))));
    }

    #[test]
    fn zero_initial_points_fails_validation() {
        let mut config = TriagoConfig::default();
        config.scoring.initial_points = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("initial_points"))));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = TriagoConfig::default();
        config.ollama.base_url = "".to_string();
        config.agent.log_level = "loud".to_string();
        config.scoring.initial_points = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3, "expected all errors, got {errors:?}");
    }
}
