//! Shared scripted service for deterministic, fast integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use pipectl::remote::{
    ArtifactsResponse, LogsResponse, PipelineService, RunPipelineResponse, RunStepResponse,
    ServiceError, StatusResponse, StepStatusPayload,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const ALL_SLUGS: [&str; 6] = [
    "ingest",
    "normalize",
    "classify",
    "validate",
    "dedupe",
    "publish",
];

/// Scripted stand-in for the remote pipeline service
///
/// Useful for:
/// - Exercising the controller without a live service
/// - Flipping individual endpoints into failure mid-test
/// - Counting calls to verify post-run refreshes
/// - Simulating a slow run to provoke lock contention
#[derive(Clone, Default)]
pub struct MockService {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    status: Mutex<StatusResponse>,
    artifacts: Mutex<ArtifactsResponse>,
    logs: Mutex<LogsResponse>,
    fail_status: AtomicBool,
    fail_artifacts: AtomicBool,
    fail_logs: AtomicBool,
    fail_runs: AtomicBool,
    complete_on_run: AtomicBool,
    run_delay_ms: AtomicU64,
    status_calls: AtomicUsize,
    run_calls: AtomicUsize,
    runs: Mutex<Vec<(String, Value)>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the `/api/status` payload
    pub fn with_status(self, payload: Value) -> Self {
        *self.inner.status.lock().unwrap() =
            serde_json::from_value(payload).expect("status payload decodes");
        self
    }

    /// Script the `/api/artifacts` payload
    pub fn with_artifacts(self, payload: Value) -> Self {
        *self.inner.artifacts.lock().unwrap() =
            serde_json::from_value(payload).expect("artifacts payload decodes");
        self
    }

    /// Script the `/api/logs` payload
    pub fn with_logs(self, payload: Value) -> Self {
        *self.inner.logs.lock().unwrap() =
            serde_json::from_value(payload).expect("logs payload decodes");
        self
    }

    /// Add artificial latency to run requests
    pub fn with_run_delay_ms(self, millis: u64) -> Self {
        self.inner.run_delay_ms.store(millis, Ordering::SeqCst);
        self
    }

    /// Make run requests fail with a 500
    pub fn failing_runs(self) -> Self {
        self.inner.fail_runs.store(true, Ordering::SeqCst);
        self
    }

    /// Mark the targeted step(s) ok once a run request succeeds
    pub fn completing_runs(self) -> Self {
        self.inner.complete_on_run.store(true, Ordering::SeqCst);
        self
    }

    pub fn set_status(&self, payload: Value) {
        *self.inner.status.lock().unwrap() =
            serde_json::from_value(payload).expect("status payload decodes");
    }

    pub fn set_fail_status(&self, fail: bool) {
        self.inner.fail_status.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_artifacts(&self, fail: bool) {
        self.inner.fail_artifacts.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_logs(&self, fail: bool) {
        self.inner.fail_logs.store(fail, Ordering::SeqCst);
    }

    /// Number of `/api/status` fetches seen so far
    pub fn status_calls(&self) -> usize {
        self.inner.status_calls.load(Ordering::SeqCst)
    }

    /// Number of run requests seen so far
    pub fn run_calls(&self) -> usize {
        self.inner.run_calls.load(Ordering::SeqCst)
    }

    /// Run requests seen so far: (endpoint slug, override payload)
    pub fn runs(&self) -> Vec<(String, Value)> {
        self.inner.runs.lock().unwrap().clone()
    }

    fn mark_ok(&self, slug: &str) {
        let mut status = self.inner.status.lock().unwrap();
        let entry = status.steps.entry(slug.to_string()).or_insert_with(StepStatusPayload::default);
        entry.status = Some("ok".to_string());
    }

    async fn record_run(&self, slug: &str, overrides: &Value) -> Result<(), ServiceError> {
        self.inner.run_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .runs
            .lock()
            .unwrap()
            .push((slug.to_string(), overrides.clone()));

        let delay = self.inner.run_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }

        if self.inner.fail_runs.load(Ordering::SeqCst) {
            return Err(ServiceError::Api {
                status: 500,
                body: format!("{} crashed", slug),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PipelineService for MockService {
    async fn fetch_status(&self) -> Result<StatusResponse, ServiceError> {
        self.inner.status_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_status.load(Ordering::SeqCst) {
            return Err(ServiceError::Api {
                status: 503,
                body: "status unavailable".to_string(),
            });
        }
        Ok(self.inner.status.lock().unwrap().clone())
    }

    async fn fetch_artifacts(&self) -> Result<ArtifactsResponse, ServiceError> {
        if self.inner.fail_artifacts.load(Ordering::SeqCst) {
            return Err(ServiceError::Api {
                status: 503,
                body: "artifact listing unavailable".to_string(),
            });
        }
        Ok(self.inner.artifacts.lock().unwrap().clone())
    }

    async fn fetch_logs(&self) -> Result<LogsResponse, ServiceError> {
        if self.inner.fail_logs.load(Ordering::SeqCst) {
            return Err(ServiceError::Api {
                status: 503,
                body: "log files unavailable".to_string(),
            });
        }
        Ok(self.inner.logs.lock().unwrap().clone())
    }

    async fn run_step(
        &self,
        slug: &str,
        overrides: &Value,
    ) -> Result<RunStepResponse, ServiceError> {
        self.record_run(slug, overrides).await?;
        if self.inner.complete_on_run.load(Ordering::SeqCst) {
            self.mark_ok(slug);
        }
        Ok(RunStepResponse::default())
    }

    async fn run_pipeline(&self, overrides: &Value) -> Result<RunPipelineResponse, ServiceError> {
        self.record_run("pipeline", overrides).await?;
        if self.inner.complete_on_run.load(Ordering::SeqCst) {
            for slug in ALL_SLUGS {
                self.mark_ok(slug);
            }
        }
        Ok(RunPipelineResponse::default())
    }
}

/// Status payload with the given slugs reported ok
pub fn ok_steps(slugs: &[&str]) -> Value {
    let mut steps = serde_json::Map::new();
    for slug in slugs {
        steps.insert(slug.to_string(), json!({ "status": "ok" }));
    }
    json!({ "steps": steps })
}
