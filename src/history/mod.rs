//! Bounded per-thread conversation memory.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::types::Role;

/// A message as stored in conversation memory. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded, per-thread ordered log of role-tagged messages.
///
/// Threads are created implicitly on first append and live for the process
/// lifetime; eviction is strict FIFO per thread, count-based only. Appends
/// to the same thread serialize through the lock, so window order always
/// matches append order; different threads do not interfere.
pub struct HistoryStore {
    max_history: usize,
    threads: RwLock<HashMap<String, VecDeque<StoredMessage>>>,
}

impl HistoryStore {
    /// Create a store keeping the last `max_history` messages per thread.
    pub fn new(max_history: usize) -> Self {
        Self {
            max_history,
            threads: RwLock::new(HashMap::new()),
        }
    }

    /// Append a message to a thread, evicting the oldest beyond the bound.
    pub fn append(&self, thread_id: &str, role: Role, content: impl Into<String>) {
        let message = StoredMessage {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        };
        let mut threads = self.threads.write().expect("history lock poisoned");
        let log = threads.entry(thread_id.to_string()).or_default();
        log.push_back(message);
        while log.len() > self.max_history {
            log.pop_front();
        }
    }

    /// Snapshot of the most recent messages for a thread, oldest-first.
    /// Empty for an unknown thread id.
    pub fn window(&self, thread_id: &str) -> Vec<StoredMessage> {
        let threads = self.threads.read().expect("history lock poisoned");
        threads
            .get(thread_id)
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of messages currently held for a thread.
    pub fn len(&self, thread_id: &str) -> usize {
        let threads = self.threads.read().expect("history lock poisoned");
        threads.get(thread_id).map(|log| log.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, thread_id: &str) -> bool {
        self.len(thread_id) == 0
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_HISTORY)
    }
}
