//! Bounded operator trace log

use std::collections::VecDeque;

/// Maximum number of retained entries
pub const LOG_CAPACITY: usize = 200;

/// Append-only trace log shown to the operator
///
/// Entries are timestamped on append and evicted oldest-first once the
/// buffer exceeds its capacity. Entries are never edited or removed
/// individually.
#[derive(Debug, Default)]
pub struct LogBuffer {
    entries: VecDeque<String>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, prefixed with the current wall-clock time
    pub fn append(&mut self, message: impl AsRef<str>) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        self.entries
            .push_back(format!("[{}] {}", timestamp, message.as_ref()));
        while self.entries.len() > LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Full ordered sequence of entries, oldest first
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
