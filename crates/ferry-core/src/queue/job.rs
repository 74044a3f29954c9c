//! The unit of transfer work.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable job identifier, assigned at enqueue time. The sole correlation
/// key between buckets; never changes across lifecycle transitions.
pub type JobId = Uuid;

/// One queued transfer: a remote source, a local destination, and the
/// bookkeeping the lifecycle manager maintains as the job moves between
/// buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    /// Remote locator handed to the transfer engine.
    pub source: String,
    /// Local path the engine writes to.
    pub destination: PathBuf,
    pub display_name: String,
    pub size_bytes: u64,
    /// Failed attempts so far. Starts at 0; `retry_all_failed` resets it.
    #[serde(default)]
    pub retries: u32,
    pub enqueued_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_at: Option<i64>,
}

impl Job {
    pub fn new(source: &str, destination: &std::path::Path, display_name: &str, size_bytes: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.to_string(),
            destination: destination.to_path_buf(),
            display_name: display_name.to_string(),
            size_bytes,
            retries: 0,
            enqueued_at: unix_timestamp(),
            completed_at: None,
            failed_at: None,
        }
    }
}

/// Current time as Unix seconds (for bucket timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
