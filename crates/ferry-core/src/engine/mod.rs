//! Adapter for the external transfer engine.
//!
//! The engine does the actual byte moving (network I/O, chunking, checksum)
//! as an opaque subprocess; this crate only tells it what to transfer and
//! with how many streams, and observes success or failure.

use std::future::Future;

use thiserror::Error;

use crate::queue::Job;

pub mod command;

pub use command::CommandEngine;

/// Per-job failure. Never fatal to the worker; always routed through the
/// retry policy.
#[derive(Debug, Error)]
pub enum TransferFailure {
    #[error("failed to launch transfer engine: {0}")]
    Launch(std::io::Error),
    #[error("transfer engine exited with {0}")]
    Engine(std::process::ExitStatus),
}

/// One transfer invocation. Implemented by [`CommandEngine`] in production
/// and by in-memory fakes in tests.
pub trait TransferEngine: Send + Sync + 'static {
    fn transfer(
        &self,
        job: &Job,
        streams: u32,
    ) -> impl Future<Output = Result<(), TransferFailure>> + Send;
}
