//! Serialized execution requests

use crate::controller::Controller;
use crate::core::{compose_overrides, RunTarget};
use crate::remote::PipelineService;
use tracing::{info, warn};

impl<S: PipelineService> Controller<S> {
    /// Execute a single step by slug
    pub async fn run_step(&self, slug: &str) {
        self.run(RunTarget::Step(slug.to_string())).await;
    }

    /// Execute the whole pipeline
    pub async fn run_pipeline(&self) {
        self.run(RunTarget::Pipeline).await;
    }

    /// Issue one execution request, holding the run lock for its duration
    ///
    /// A call arriving while a request is already in flight is rejected
    /// immediately; there is no queuing. The lock guard releases on every
    /// exit path of the dispatch, and a refresh always follows the attempt
    /// so the held snapshot reflects the service's authoritative state even
    /// after a failure.
    async fn run(&self, target: RunTarget) {
        let Some(guard) = self.run_lock().try_acquire() else {
            warn!("run of {} rejected: lock held", target);
            self.trace(format!(
                "Run of {} rejected: another run is in flight",
                target
            ))
            .await;
            return;
        };

        info!("run of {} started", target);
        self.trace(format!("Run of {} started...", target)).await;

        let overrides = compose_overrides(&target, self.state().prefer_offline());

        let outcome = match &target {
            RunTarget::Step(slug) => self
                .service()
                .run_step(slug, &overrides)
                .await
                .map(|response| response.step.to_string()),
            RunTarget::Pipeline => self
                .service()
                .run_pipeline(&overrides)
                .await
                .map(|response| response.steps.to_string()),
        };

        match outcome {
            Ok(detail) => {
                info!("run of {} finished", target);
                self.trace(format!("Run of {} finished: {}", target, detail))
                    .await;
            }
            Err(err) => {
                warn!("run of {} failed: {}", target, err);
                self.trace(format!("Run of {} failed: {}", target, err))
                    .await;
            }
        }

        drop(guard);
        self.refresh().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{
        ArtifactsResponse, LogsResponse, RunPipelineResponse, RunStepResponse, ServiceError,
        StatusResponse,
    };
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingService {
        run_calls: AtomicUsize,
        refresh_calls: AtomicUsize,
        last_overrides: Mutex<Option<Value>>,
        fail_run: bool,
    }

    #[async_trait]
    impl PipelineService for RecordingService {
        async fn fetch_status(&self) -> Result<StatusResponse, ServiceError> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            Ok(StatusResponse::default())
        }

        async fn fetch_artifacts(&self) -> Result<ArtifactsResponse, ServiceError> {
            Ok(ArtifactsResponse::default())
        }

        async fn fetch_logs(&self) -> Result<LogsResponse, ServiceError> {
            Ok(LogsResponse::default())
        }

        async fn run_step(
            &self,
            _slug: &str,
            overrides: &Value,
        ) -> Result<RunStepResponse, ServiceError> {
            self.run_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_overrides.lock().unwrap() = Some(overrides.clone());
            if self.fail_run {
                Err(ServiceError::Api {
                    status: 500,
                    body: "step crashed".to_string(),
                })
            } else {
                Ok(RunStepResponse::default())
            }
        }

        async fn run_pipeline(
            &self,
            overrides: &Value,
        ) -> Result<RunPipelineResponse, ServiceError> {
            self.run_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_overrides.lock().unwrap() = Some(overrides.clone());
            Ok(RunPipelineResponse::default())
        }
    }

    #[tokio::test]
    async fn test_run_step_releases_lock_and_refreshes() {
        let controller = Controller::new(RecordingService::default());

        controller.run_step("ingest").await;

        assert!(!controller.run_lock_held());
        let service = controller.service();
        assert_eq!(service.run_calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_run_still_releases_and_refreshes() {
        let controller = Controller::new(RecordingService {
            fail_run: true,
            ..Default::default()
        });

        controller.run_step("normalize").await;

        assert!(!controller.run_lock_held());
        assert_eq!(
            controller.service().refresh_calls.load(Ordering::SeqCst),
            1
        );

        let log = controller.log_snapshot().await;
        assert!(log.iter().any(|e| e.contains("failed") && e.contains("500")));
    }

    #[tokio::test]
    async fn test_offline_overrides_reach_the_service() {
        let controller = Controller::new(RecordingService::default());
        controller.set_prefer_offline(true);

        controller.run_step("ingest").await;
        assert_eq!(
            controller.service().last_overrides.lock().unwrap().clone(),
            Some(json!({ "overrides": { "prefer_online": false } }))
        );

        controller.run_pipeline().await;
        assert_eq!(
            controller.service().last_overrides.lock().unwrap().clone(),
            Some(json!({ "overrides": { "ingest": { "prefer_online": false } } }))
        );
    }
}
