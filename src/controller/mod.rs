//! Orchestration controller - tracks remote state and serializes runs

mod guided;
mod refresh;
mod run;

pub use guided::{next_incomplete, GuidedNext};

use crate::core::{
    ControllerState, LogBuffer, PipelineSnapshot, Progress, RunLock, StepDefinition, StepRegistry,
};
use crate::remote::PipelineService;
use chrono::{DateTime, Local};
use tokio::sync::Mutex;

/// Client-side controller for the remote pipeline
///
/// Owns the read model of the service's reported state, the operator trace
/// log, selection and guided-mode flags, and the run lock. The service never
/// mutates controller state; the renderer only reads the views exposed here
/// and mutates through the operations.
pub struct Controller<S> {
    service: S,
    registry: StepRegistry,
    state: ControllerState,
    run_lock: RunLock,
    snapshot: Mutex<PipelineSnapshot>,
    log: Mutex<LogBuffer>,
    refreshed_at: Mutex<Option<DateTime<Local>>>,
}

impl<S: PipelineService> Controller<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            registry: StepRegistry::new(),
            state: ControllerState::new(),
            run_lock: RunLock::new(),
            snapshot: Mutex::new(PipelineSnapshot::default()),
            log: Mutex::new(LogBuffer::new()),
            refreshed_at: Mutex::new(None),
        }
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub(crate) fn service(&self) -> &S {
        &self.service
    }

    pub(crate) fn state(&self) -> &ControllerState {
        &self.state
    }

    pub(crate) fn run_lock(&self) -> &RunLock {
        &self.run_lock
    }

    pub(crate) fn snapshot_cell(&self) -> &Mutex<PipelineSnapshot> {
        &self.snapshot
    }

    pub(crate) fn refreshed_at_cell(&self) -> &Mutex<Option<DateTime<Local>>> {
        &self.refreshed_at
    }

    /// Append an entry to the operator trace log
    pub(crate) async fn trace(&self, message: impl AsRef<str>) {
        self.log.lock().await.append(message);
    }

    // --- selection -------------------------------------------------------

    pub fn selected_index(&self) -> usize {
        self.state.selected_index()
    }

    pub fn selected_step(&self) -> &'static StepDefinition {
        self.registry.by_index(self.state.selected_index())
    }

    /// Select a step position; out-of-range indices are clamped
    pub fn select_step(&self, index: usize) {
        self.state.select(index, self.registry.count());
    }

    #[allow(dead_code)]
    pub fn select_next(&self) {
        self.select_step(self.state.selected_index() + 1);
    }

    #[allow(dead_code)]
    pub fn select_prev(&self) {
        self.select_step(self.state.selected_index().saturating_sub(1));
    }

    // --- flags -----------------------------------------------------------

    pub fn prefer_offline(&self) -> bool {
        self.state.prefer_offline()
    }

    pub fn set_prefer_offline(&self, offline: bool) {
        self.state.set_prefer_offline(offline);
    }

    pub fn guided_enabled(&self) -> bool {
        self.state.guided_enabled()
    }

    pub fn run_lock_held(&self) -> bool {
        self.run_lock.is_held()
    }

    // --- read-only views -------------------------------------------------

    /// Current read model; a clone of the atomically held snapshot
    pub async fn snapshot(&self) -> PipelineSnapshot {
        self.snapshot.lock().await.clone()
    }

    /// Completion summary derived from the held snapshot
    pub async fn progress(&self) -> Progress {
        let snapshot = self.snapshot.lock().await;
        Progress::from_snapshot(&snapshot, &self.registry)
    }

    /// Trace log entries, oldest first
    pub async fn log_snapshot(&self) -> Vec<String> {
        self.log.lock().await.snapshot()
    }

    /// Wall-clock instant of the last successful refresh
    pub async fn refreshed_at(&self) -> Option<DateTime<Local>> {
        *self.refreshed_at.lock().await
    }
}
