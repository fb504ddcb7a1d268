//! Guided workflow planning

use crate::controller::Controller;
use crate::core::{PipelineSnapshot, StepRegistry};
use crate::remote::PipelineService;
use tracing::debug;

/// Recommended next action for the guided workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidedNext {
    /// Index of the first step not yet completed
    Step(usize),
    /// Every step in the sequence is completed
    Complete,
}

/// Find the first step in ordinal order whose status is not ok
pub fn next_incomplete(snapshot: &PipelineSnapshot, registry: &StepRegistry) -> GuidedNext {
    for step in registry.iter() {
        if !snapshot.status_of(step.slug).is_ok() {
            return GuidedNext::Step(step.ordinal);
        }
    }
    GuidedNext::Complete
}

impl<S: PipelineService> Controller<S> {
    pub fn set_guided(&self, enabled: bool) {
        debug!("guided mode {}", if enabled { "enabled" } else { "disabled" });
        self.state().set_guided(enabled);
    }

    /// Recommended next action from the held snapshot
    pub async fn next_incomplete(&self) -> GuidedNext {
        let snapshot = self.snapshot_cell().lock().await;
        next_incomplete(&snapshot, self.registry())
    }

    /// Recommendation for display; suppressed while guided mode is off
    pub async fn recommendation(&self) -> Option<GuidedNext> {
        if !self.guided_enabled() {
            return None;
        }
        Some(self.next_incomplete().await)
    }

    /// Select and execute the recommended next step
    ///
    /// No-op unless guided mode is enabled and no run is in flight.
    pub async fn guided_run(&self) {
        if !self.guided_enabled() || self.run_lock_held() {
            return;
        }

        if let GuidedNext::Step(index) = self.next_incomplete().await {
            self.select_step(index);
            let slug = self.registry().by_index(index).slug;
            self.run_step(slug).await;
        }
    }

    /// Advance the selection past the recommended next step
    ///
    /// Pure navigation: no runtime status changes, nothing is marked
    /// complete. No-op unless guided mode is enabled and no run is in
    /// flight.
    pub async fn guided_skip(&self) {
        if !self.guided_enabled() || self.run_lock_held() {
            return;
        }

        if let GuidedNext::Step(index) = self.next_incomplete().await {
            self.select_step(index + 1);
        }
    }
}
