//! Persistent job queue: durable document, mutual-exclusion gate, and
//! lifecycle operations.
//!
//! All mutations are load→transform→save sequences executed under the gate's
//! exclusive advisory lock, so they are serialized across every process that
//! touches the queue (worker and CLI alike).

pub mod document;
pub mod gate;
pub mod job;
pub mod manager;
pub mod store;

pub use document::{QueueCounts, QueueDocument};
pub use gate::Gate;
pub use job::{Job, JobId};
pub use manager::{QueueManager, RetryDisposition};
pub use store::QueueStore;

#[cfg(test)]
mod tests;
