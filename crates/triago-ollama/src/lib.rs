// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama provider adapter for the Triago gateway.
//!
//! Wraps [`OllamaClient`] in the [`ProviderAdapter`] contract so the
//! pipeline can treat a local Ollama server as an opaque text-in/text-out
//! service.

pub mod client;
pub mod types;

use async_trait::async_trait;

use triago_core::traits::adapter::PluginAdapter;
use triago_core::traits::provider::ProviderAdapter;
use triago_core::types::{AdapterType, HealthStatus, ProviderRequest, ProviderResponse};
use triago_core::TriagoError;

pub use client::{OllamaClient, DEFAULT_BASE_URL};
use types::{GenerateOptions, GenerateRequest};

/// Provider adapter backed by an Ollama server.
pub struct OllamaProvider {
    client: OllamaClient,
}

impl OllamaProvider {
    /// Creates a provider talking to the given server address.
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, TriagoError> {
        Ok(Self {
            client: OllamaClient::new(base_url, timeout_secs)?,
        })
    }

    /// Creates a provider from an existing client.
    pub fn from_client(client: OllamaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, TriagoError> {
        match self.client.list_models().await {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), TriagoError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for OllamaProvider {
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> Result<ProviderResponse, TriagoError> {
        let generate = GenerateRequest {
            model: request.model,
            prompt: request.prompt,
            stream: false,
            options: request
                .temperature
                .map(|temperature| GenerateOptions {
                    temperature: Some(temperature),
                }),
        };

        let response = self.client.generate(&generate).await?;

        Ok(ProviderResponse {
            content: response.response,
            model: response.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn complete_maps_request_and_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "deepseek-r1:7b",
                "created_at": "2026-03-01T10:00:00Z",
                "response": "structured answer",
                "done": true
            })))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(server.uri(), 30).unwrap();
        let response = provider
            .complete(ProviderRequest {
                model: "deepseek-r1:7b".into(),
                prompt: "question".into(),
                temperature: Some(0.7),
            })
            .await
            .unwrap();

        assert_eq!(response.content, "structured answer");
        assert_eq!(response.model, "deepseek-r1:7b");
    }

    #[tokio::test]
    async fn health_check_reports_unreachable_server() {
        // Nothing is listening on this port.
        let provider = OllamaProvider::new("http://127.0.0.1:1".into(), 1).unwrap();
        let status = provider.health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Unhealthy(_)));
    }

    #[tokio::test]
    async fn health_check_healthy_when_tags_respond() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"models": []})),
            )
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(server.uri(), 30).unwrap();
        assert_eq!(
            provider.health_check().await.unwrap(),
            HealthStatus::Healthy
        );
    }

    #[test]
    fn adapter_identity() {
        let provider = OllamaProvider::new(DEFAULT_BASE_URL.into(), 30).unwrap();
        assert_eq!(provider.name(), "ollama");
        assert_eq!(provider.adapter_type(), AdapterType::Provider);
    }
}
