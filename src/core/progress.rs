//! Derived pipeline progress

use crate::core::snapshot::{PipelineSnapshot, StatusKind};
use crate::core::steps::StepRegistry;
use serde::Serialize;

/// Completion summary derived from a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Steps reported ok
    pub completed: usize,

    /// Steps currently running
    pub running: usize,

    /// Completion percentage over the fixed sequence, rounded to an integer
    pub percent: u8,
}

impl Progress {
    pub fn from_snapshot(snapshot: &PipelineSnapshot, registry: &StepRegistry) -> Self {
        let mut completed = 0;
        let mut running = 0;

        for step in registry.iter() {
            match snapshot.status_of(step.slug) {
                StatusKind::Ok => completed += 1,
                StatusKind::Running => running += 1,
                StatusKind::Pending | StatusKind::Error => {}
            }
        }

        let percent = (100.0 * completed as f64 / registry.count() as f64).round() as u8;

        Progress {
            completed,
            running,
            percent,
        }
    }
}
