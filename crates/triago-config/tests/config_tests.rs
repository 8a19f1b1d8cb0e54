// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Triago configuration system.

use triago_config::diagnostic::{suggest_key, ConfigError};
use triago_config::model::TriagoConfig;
use triago_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_triago_config() {
    let toml = r#"
[agent]
name = "support-bot"
log_level = "debug"

[ollama]
base_url = "http://ollama.internal:11434"
answer_model = "deepseek-r1:7b"
verdict_model = "deepseek-r1:1.5b"
classifier_model = "deepseek-r1:1.5b"
answer_temperature = 0.6
verdict_temperature = 0.2
timeout_secs = 90

[gateway]
host = "0.0.0.0"
port = 8080

[scoring]
initial_points = 100
cookie_max_age_secs = 86400
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "support-bot");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.ollama.base_url, "http://ollama.internal:11434");
    assert_eq!(config.ollama.answer_model, "deepseek-r1:7b");
    assert_eq!(config.ollama.verdict_model, "deepseek-r1:1.5b");
    assert_eq!(config.ollama.answer_temperature, 0.6);
    assert_eq!(config.ollama.timeout_secs, 90);
    assert_eq!(config.gateway.host, "0.0.0.0");
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(config.scoring.initial_points, 100);
    assert_eq!(config.scoring.cookie_max_age_secs, 86400);
}

/// Unknown field in [ollama] section produces an error.
#[test]
fn unknown_field_in_ollama_produces_error() {
    let toml = r#"
[ollama]
base_uri = "http://localhost:11434"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("base_uri"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let toml = "";
    let config = load_config_from_str(toml).expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "triago");
    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.ollama.base_url, "http://localhost:11434");
    assert_eq!(config.ollama.answer_model, "deepseek-r1:7b");
    assert_eq!(config.ollama.verdict_model, "deepseek-r1:1.5b");
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert_eq!(config.gateway.port, 3000);
    assert_eq!(config.scoring.initial_points, 100);
}

/// Environment variable style override maps ollama_base_url to ollama.base_url.
#[test]
fn dotted_override_reaches_ollama_base_url() {
    use figment::{providers::Serialized, Figment};

    let config: TriagoConfig = Figment::new()
        .merge(Serialized::defaults(TriagoConfig::default()))
        .merge(("ollama.base_url", "http://gpu-box:11434"))
        .extract()
        .expect("should set base_url via dot notation");

    assert_eq!(config.ollama.base_url, "http://gpu-box:11434");
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: TriagoConfig = Figment::new()
        .merge(Serialized::defaults(TriagoConfig::default()))
        .merge(Toml::file("/nonexistent/path/triago.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.agent.name, "triago");
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[logging]
level = "debug"
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("logging"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Unknown key "base_uri" in [ollama] produces suggestion "did you mean `base_url`?"
#[test]
fn diagnostic_error_includes_unknown_key() {
    let toml = r#"
[ollama]
base_uri = "http://localhost:11434"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    assert!(!errors.is_empty(), "should have at least one error");

    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "base_uri"
                && suggestion.as_deref() == Some("base_url")
                && valid_keys.contains("base_url")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error for 'base_uri' with suggestion 'base_url', got: {errors:?}"
    );
}

/// Unknown key with no close match does NOT produce a suggestion.
#[test]
fn diagnostic_no_suggestion_for_distant_typo() {
    let valid_keys = &["name", "log_level"];
    let suggestion = suggest_key("zzzzzz", valid_keys);
    assert!(suggestion.is_none(), "should not suggest for distant typo");
}

/// Invalid type (string where number expected) produces clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[gateway]
port = "not_a_number"
"#;

    let err = load_config_from_str(toml).expect_err("should reject invalid type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("port"),
        "error should mention type mismatch, got: {err_str}"
    );
}

/// ConfigError implements miette::Diagnostic (can be rendered).
#[test]
fn config_error_implements_diagnostic() {
    use miette::Diagnostic;

    let error = ConfigError::UnknownKey {
        key: "base_uri".to_string(),
        suggestion: Some("base_url".to_string()),
        valid_keys: "base_url, answer_model, verdict_model".to_string(),
        span: None,
        src: None,
    };

    let code = error.code();
    assert!(code.is_some(), "should have diagnostic code");

    let help = error.help();
    assert!(help.is_some(), "should have help text");
    let help_str = help.unwrap().to_string();
    assert!(
        help_str.contains("did you mean `base_url`"),
        "help should contain suggestion, got: {help_str}"
    );
}

/// ConfigError can be rendered using miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::GraphicalReportHandler;

    let error = ConfigError::UnknownKey {
        key: "base_uri".to_string(),
        suggestion: Some("base_url".to_string()),
        valid_keys: "base_url, answer_model, verdict_model".to_string(),
        span: None,
        src: None,
    };

    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    handler
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(!buf.is_empty(), "rendered report should not be empty");
    assert!(buf.contains("base_uri"), "rendered report should mention the key");
}

/// load_and_validate_str with valid TOML returns Ok config.
#[test]
fn load_and_validate_valid_toml() {
    let toml = r#"
[agent]
name = "test"
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should validate");
    assert_eq!(config.agent.name, "test");
}

/// Validation catches an out-of-range temperature.
#[test]
fn validation_catches_out_of_range_temperature() {
    let toml = r#"
[ollama]
answer_temperature = 9.0
"#;

    let errors = load_and_validate_str(toml).expect_err("bad temperature should fail");
    let has_validation_error = errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("answer_temperature"))
    });
    assert!(
        has_validation_error,
        "should have validation error for temperature"
    );
}
