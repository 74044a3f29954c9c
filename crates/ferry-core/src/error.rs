//! Fatal error taxonomy. Per-job transfer failures live in `engine`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FerryError {
    /// The queue document exists but cannot be read or parsed. A missing
    /// document is not an error; the store treats it as "not yet initialized".
    #[error("queue store unavailable: {0}")]
    StoreUnavailable(String),

    /// Another worker instance holds a live pid file. Fatal at worker
    /// startup only; the second instance exits without touching any state.
    #[error("another worker is already running (pid {0})")]
    AlreadyRunning(u32),
}
