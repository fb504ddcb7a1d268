//! Client for the remote pipeline service

pub mod client;
pub mod types;

use async_trait::async_trait;
use serde_json::Value;

pub use client::{HttpPipelineClient, ServiceConfig, DEFAULT_BASE_URL};
pub use types::{
    ArtifactsResponse, LogsResponse, RunPipelineResponse, RunStepResponse, ServiceError,
    StatusResponse, StepStatusPayload,
};

/// Trait for reaching the pipeline service - allows for different implementations
#[async_trait]
pub trait PipelineService: Send + Sync {
    /// Read per-step status
    async fn fetch_status(&self) -> Result<StatusResponse, ServiceError>;

    /// Read the artifact listing
    async fn fetch_artifacts(&self) -> Result<ArtifactsResponse, ServiceError>;

    /// Read the raw log files
    async fn fetch_logs(&self) -> Result<LogsResponse, ServiceError>;

    /// Execute a single step with the given override payload
    async fn run_step(&self, slug: &str, overrides: &Value)
        -> Result<RunStepResponse, ServiceError>;

    /// Execute the whole pipeline with the given override payload
    async fn run_pipeline(&self, overrides: &Value) -> Result<RunPipelineResponse, ServiceError>;
}
