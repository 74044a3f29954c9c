//! The aggregate root persisted to disk.

use serde::{Deserialize, Serialize};

use super::job::Job;

/// Everything the queue knows, in one durable document.
///
/// A job lives in exactly one bucket at a time. `pending` is FIFO (claims
/// take from the head, enqueues and retries append to the tail); order in
/// the other buckets is insignificant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueDocument {
    #[serde(default)]
    pub pending: Vec<Job>,
    #[serde(default)]
    pub in_flight: Vec<Job>,
    #[serde(default)]
    pub completed: Vec<Job>,
    #[serde(default)]
    pub failed: Vec<Job>,
    #[serde(default)]
    pub paused: bool,
}

/// Per-bucket sizes, as surfaced by `ferry status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueCounts {
    pub pending: usize,
    pub in_flight: usize,
    pub completed: usize,
    pub failed: usize,
}

impl QueueDocument {
    pub fn counts(&self) -> QueueCounts {
        QueueCounts {
            pending: self.pending.len(),
            in_flight: self.in_flight.len(),
            completed: self.completed.len(),
            failed: self.failed.len(),
        }
    }
}
