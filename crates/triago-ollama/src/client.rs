// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Ollama generate API.
//!
//! Handles request construction, transient error retry, and error body
//! surfacing for a local or remote Ollama server.

use std::time::Duration;

use tracing::{debug, warn};

use triago_core::TriagoError;

use crate::types::{ApiErrorResponse, GenerateRequest, GenerateResponse};

/// Default Ollama server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// HTTP client for Ollama API communication.
///
/// Manages connection pooling and retry logic for transient errors
/// (429, 500, 503).
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl OllamaClient {
    /// Creates a new Ollama API client.
    ///
    /// # Arguments
    /// * `base_url` - Server address (e.g., "http://localhost:11434")
    /// * `timeout_secs` - Per-request timeout in seconds
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, TriagoError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TriagoError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a non-streaming generate request and returns the response.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, TriagoError> {
        let url = format!("{}/api/generate", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying generate request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(request)
                .send()
                .await
                .map_err(|e| TriagoError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "generate response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| TriagoError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                let generated: GenerateResponse =
                    serde_json::from_str(&body).map_err(|e| TriagoError::Provider {
                        message: format!("failed to parse API response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                return Ok(generated);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(TriagoError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let error_msg = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!("Ollama API error: {}", api_err.error)
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(TriagoError::Provider {
                message: error_msg,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| TriagoError::Provider {
            message: "generate request failed after retries".into(),
            source: None,
        }))
    }

    /// Probes the server's tag listing as a liveness check.
    pub async fn list_models(&self) -> Result<(), TriagoError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TriagoError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(TriagoError::Provider {
                message: format!("tag listing returned {}", response.status()),
                source: None,
            })
        }
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenerateOptions;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_request() -> GenerateRequest {
        GenerateRequest {
            model: "deepseek-r1:7b".into(),
            prompt: "Hello".into(),
            stream: false,
            options: Some(GenerateOptions {
                temperature: Some(0.7),
            }),
        }
    }

    #[tokio::test]
    async fn generate_success() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "model": "deepseek-r1:7b",
            "created_at": "2026-03-01T10:00:00Z",
            "response": "Hi there!",
            "done": true
        });

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({"stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri(), 30).unwrap();
        let result = client.generate(&test_request()).await.unwrap();

        assert_eq!(result.response, "Hi there!");
        assert!(result.done);
    }

    #[tokio::test]
    async fn generate_retries_on_500() {
        let server = MockServer::start().await;

        let success_body = serde_json::json!({
            "model": "deepseek-r1:7b",
            "created_at": "2026-03-01T10:00:00Z",
            "response": "After retry",
            "done": true
        });

        // First request returns 500, second returns 200.
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&success_body))
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri(), 30).unwrap();
        let result = client.generate(&test_request()).await.unwrap();
        assert_eq!(result.response, "After retry");
    }

    #[tokio::test]
    async fn generate_surfaces_api_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"error": "model 'missing' not found"})),
            )
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri(), 30).unwrap();
        let err = client.generate(&test_request()).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("model 'missing' not found"), "got: {msg}");
    }

    #[tokio::test]
    async fn list_models_ok_on_200() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"models": []})),
            )
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri(), 30).unwrap();
        assert!(client.list_models().await.is_ok());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/".into(), 30).unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
    }
}
