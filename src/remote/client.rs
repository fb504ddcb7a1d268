//! HTTP client for the pipeline service

use crate::remote::{
    ArtifactsResponse, LogsResponse, PipelineService, RunPipelineResponse, RunStepResponse,
    ServiceError, StatusResponse,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Well-known local endpoint of the pipeline service
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:6754";

/// Configuration for the service client
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the pipeline service
    pub base_url: String,

    /// Timeout for requests in seconds
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// reqwest-backed implementation of [`PipelineService`]
#[derive(Debug, Clone)]
pub struct HttpPipelineClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPipelineClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns `ServiceError::Transport` if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {} body={}", url, body);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Self::decode(response).await
    }

    /// Decode a response, treating any non-2xx body as error text
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("service returned {}: {}", status, body.trim());
            return Err(ServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| ServiceError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl PipelineService for HttpPipelineClient {
    async fn fetch_status(&self) -> Result<StatusResponse, ServiceError> {
        self.get_json("/api/status").await
    }

    async fn fetch_artifacts(&self) -> Result<ArtifactsResponse, ServiceError> {
        self.get_json("/api/artifacts").await
    }

    async fn fetch_logs(&self) -> Result<LogsResponse, ServiceError> {
        self.get_json("/api/logs").await
    }

    async fn run_step(
        &self,
        slug: &str,
        overrides: &Value,
    ) -> Result<RunStepResponse, ServiceError> {
        self.post_json(&format!("/api/run/{}", slug), overrides).await
    }

    async fn run_pipeline(&self, overrides: &Value) -> Result<RunPipelineResponse, ServiceError> {
        self.post_json("/api/run/pipeline", overrides).await
    }
}
