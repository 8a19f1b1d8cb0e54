// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama generate API request/response types.

use serde::{Deserialize, Serialize};

/// Sampling options forwarded to the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A request to `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g., "deepseek-r1:7b").
    pub model: String,
    /// Fully assembled prompt text.
    pub prompt: String,
    /// Always false: the pipeline consumes complete responses only.
    pub stream: bool,
    /// Sampling options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerateOptions>,
}

/// A non-streaming response from `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Model that produced the response.
    pub model: String,
    /// Generated text.
    pub response: String,
    /// Whether generation finished.
    #[serde(default)]
    pub done: bool,
}

/// Error body returned by the Ollama server.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}
