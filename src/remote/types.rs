//! Wire payloads and errors for the pipeline service

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error types for service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Non-success response from the service
    #[error("service error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Response body could not be interpreted
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Request never produced a response
    #[error("transport error: {0}")]
    Transport(String),
}

/// `GET /api/status` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub steps: HashMap<String, StepStatusPayload>,
}

/// Per-step entry inside the status response
///
/// Every field is optional on the wire; the service omits what a step never
/// produced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepStatusPayload {
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub metrics: HashMap<String, Value>,

    #[serde(default)]
    pub artifacts: HashMap<String, String>,

    #[serde(default)]
    pub logs: Vec<String>,
}

/// `GET /api/artifacts` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtifactsResponse {
    #[serde(default)]
    pub artifacts: HashMap<String, Vec<String>>,
}

/// `GET /api/logs` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: HashMap<String, String>,
}

/// `POST /api/run/<slug>` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunStepResponse {
    /// Result object for the executed step, shape defined by the service
    #[serde(default)]
    pub step: Value,
}

/// `POST /api/run/pipeline` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunPipelineResponse {
    /// Per-step result objects, shape defined by the service
    #[serde(default)]
    pub steps: Value,
}
