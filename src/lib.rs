//! pipectl - operator console for the smart-mode barcode data pipeline

pub mod cli;
pub mod controller;
pub mod core;
pub mod remote;

// Re-export commonly used types
pub use controller::{next_incomplete, Controller, GuidedNext};
pub use self::core::{
    compose_overrides, LogBuffer, PipelineSnapshot, Progress, RunTarget, StatusKind,
    StepDefinition, StepRegistry, StepRuntimeStatus, LOG_CAPACITY,
};
pub use remote::{HttpPipelineClient, PipelineService, ServiceConfig, ServiceError};
