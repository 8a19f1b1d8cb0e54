// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./triago.toml` > `~/.config/triago/triago.toml` > `/etc/triago/triago.toml`
//! with environment variable overrides via `TRIAGO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TriagoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/triago/triago.toml` (system-wide)
/// 3. `~/.config/triago/triago.toml` (user XDG config)
/// 4. `./triago.toml` (local directory)
/// 5. `TRIAGO_*` environment variables
pub fn load_config() -> Result<TriagoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagoConfig::default()))
        .merge(Toml::file("/etc/triago/triago.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("triago/triago.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("triago.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a specific TOML string only (no XDG lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TriagoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TriagoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TRIAGO_OLLAMA_BASE_URL` must map to
/// `ollama.base_url`, not `ollama.base.url`.
fn env_provider() -> Env {
    Env::prefixed("TRIAGO_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: TRIAGO_OLLAMA_BASE_URL -> "ollama_base_url"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("ollama_", "ollama.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("scoring_", "scoring.", 1);
        mapped.into()
    })
}
