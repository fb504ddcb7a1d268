//! Snapshot synchronization against the remote service

use crate::controller::Controller;
use crate::core::PipelineSnapshot;
use crate::remote::PipelineService;
use tracing::{debug, info, warn};

impl<S: PipelineService> Controller<S> {
    /// Fetch status, artifacts and log files and replace the held snapshot
    ///
    /// The three reads are dispatched concurrently and joined before any
    /// result is observed. Commit is all-or-nothing: if any fetch fails the
    /// previously held snapshot is retained unchanged and a single
    /// aggregated failure entry lands in the trace log. Returns whether the
    /// refresh committed; callers observe the new state by reading the
    /// snapshot afterward.
    pub async fn refresh(&self) -> bool {
        debug!("refreshing pipeline snapshot");

        let fetched = tokio::try_join!(
            self.service().fetch_status(),
            self.service().fetch_artifacts(),
            self.service().fetch_logs(),
        );

        match fetched {
            Ok((status, artifacts, logs)) => {
                let next = PipelineSnapshot::from_remote(status, artifacts, logs);
                let log_files = next.log_files.len();

                *self.snapshot_cell().lock().await = next;
                *self.refreshed_at_cell().lock().await = Some(chrono::Local::now());

                info!("snapshot refreshed ({} log files)", log_files);
                self.trace(format!("State refreshed ({} log files)", log_files))
                    .await;
                true
            }
            Err(err) => {
                warn!("refresh failed: {}", err);
                self.trace(format!("Refresh failed: {}", err)).await;
                false
            }
        }
    }
}
