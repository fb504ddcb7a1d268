//! Controller-local state and the run lock

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory operator state
///
/// Lives for the process lifetime only; nothing here is persisted. All
/// mutation goes through the controller operations.
#[derive(Debug, Default)]
pub struct ControllerState {
    selected_index: AtomicUsize,
    guided_enabled: AtomicBool,
    prefer_offline: AtomicBool,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index.load(Ordering::Acquire)
    }

    /// Select a step position, clamped to the valid range
    pub fn select(&self, index: usize, count: usize) {
        self.selected_index
            .store(index.min(count.saturating_sub(1)), Ordering::Release);
    }

    pub fn guided_enabled(&self) -> bool {
        self.guided_enabled.load(Ordering::Acquire)
    }

    pub fn set_guided(&self, enabled: bool) {
        self.guided_enabled.store(enabled, Ordering::Release);
    }

    pub fn prefer_offline(&self) -> bool {
        self.prefer_offline.load(Ordering::Acquire)
    }

    pub fn set_prefer_offline(&self, offline: bool) {
        self.prefer_offline.store(offline, Ordering::Release);
    }
}

/// Advisory mutual-exclusion flag for execution requests
///
/// Protects exactly one invariant: at most one execution request is in
/// flight. Not reentrant, not queued; a contender gets an immediate `None`.
#[derive(Debug, Clone, Default)]
pub struct RunLock {
    held: Arc<AtomicBool>,
}

impl RunLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to take the lock; the returned guard releases it on drop
    pub fn try_acquire(&self) -> Option<RunGuard> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| RunGuard {
                held: Arc::clone(&self.held),
            })
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// Scoped hold on the run lock; released on every exit path via drop
#[derive(Debug)]
pub struct RunGuard {
    held: Arc<AtomicBool>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.held.store(false, Ordering::Release);
    }
}
