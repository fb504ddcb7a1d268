//! Read model of the remote pipeline state

use crate::remote::{ArtifactsResponse, LogsResponse, StatusResponse, StepStatusPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Reported status of a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// No result reported yet
    #[default]
    Pending,
    /// Step is currently executing
    Running,
    /// Step completed successfully
    Ok,
    /// Step reported a failure
    Error,
}

impl StatusKind {
    /// Interpret a status string from the service
    ///
    /// Anything outside the known vocabulary counts as an error, matching
    /// how the dashboard renders unexpected statuses.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "ok" => StatusKind::Ok,
            "running" => StatusKind::Running,
            "pending" => StatusKind::Pending,
            _ => StatusKind::Error,
        }
    }

    pub fn is_ok(self) -> bool {
        self == StatusKind::Ok
    }
}

/// Runtime result of a single step, as reported by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepRuntimeStatus {
    /// Reported status kind
    pub status: StatusKind,

    /// Step metrics (name -> scalar or structured value)
    pub metrics: HashMap<String, Value>,

    /// Step artifacts (label -> path)
    pub artifacts: HashMap<String, String>,

    /// Log excerpts emitted by the step
    pub logs: Vec<String>,
}

impl From<StepStatusPayload> for StepRuntimeStatus {
    fn from(payload: StepStatusPayload) -> Self {
        // An entry without an explicit status field counts as completed.
        let status = payload
            .status
            .as_deref()
            .map(StatusKind::parse)
            .unwrap_or(StatusKind::Ok);

        StepRuntimeStatus {
            status,
            metrics: payload.metrics,
            artifacts: payload.artifacts,
            logs: payload.logs,
        }
    }
}

/// An atomic read of the service's reported state
///
/// Snapshots are immutable values: the controller replaces its held snapshot
/// wholesale after a fully successful refresh and never patches one in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineSnapshot {
    /// Per-step runtime results, keyed by slug
    pub steps: HashMap<String, StepRuntimeStatus>,

    /// Artifact listing (bucket -> ordered file names)
    pub artifacts: HashMap<String, Vec<String>>,

    /// Raw log files (file name -> contents)
    pub log_files: HashMap<String, String>,
}

impl PipelineSnapshot {
    /// Build a snapshot from the three fetch payloads
    pub fn from_remote(
        status: StatusResponse,
        artifacts: ArtifactsResponse,
        logs: LogsResponse,
    ) -> Self {
        PipelineSnapshot {
            steps: status
                .steps
                .into_iter()
                .map(|(slug, payload)| (slug, payload.into()))
                .collect(),
            artifacts: artifacts.artifacts,
            log_files: logs.logs,
        }
    }

    /// Get the reported result for a step, if any
    pub fn step(&self, slug: &str) -> Option<&StepRuntimeStatus> {
        self.steps.get(slug)
    }

    /// Status kind for a step; a step absent from the snapshot is pending
    pub fn status_of(&self, slug: &str) -> StatusKind {
        self.steps
            .get(slug)
            .map(|step| step.status)
            .unwrap_or_default()
    }
}
