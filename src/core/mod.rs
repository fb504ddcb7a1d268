//! Core domain models for the pipeline console
//!
//! This module defines the fundamental data structures that represent the
//! step sequence, the remote read model, and controller-local state.

pub mod log;
pub mod overrides;
pub mod progress;
pub mod snapshot;
pub mod state;
pub mod steps;

pub use log::*;
pub use overrides::*;
pub use progress::*;
pub use snapshot::*;
pub use state::*;
pub use steps::*;
