//! Mutual-exclusion gate: an exclusive advisory lock on a dedicated file.
//!
//! The lock file carries no payload; its exclusive hold is the sole
//! serialization mechanism for queue mutations. Acquisition blocks (no
//! timeout) — hold times are a load+edit+save of a small document, so
//! waiting beats failing. The OS drops the lock if the holder dies.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Gate {
    path: PathBuf,
}

impl Gate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Run `action` while holding the exclusive lock. The lock is released
    /// on every exit path: explicitly on return, and by the OS on abnormal
    /// process termination (the file handle closes with the process).
    pub fn with_exclusive<T>(&self, action: impl FnOnce() -> Result<T>) -> Result<T> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&self.path)
            .with_context(|| format!("open lock file: {}", self.path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("lock {}", self.path.display()))?;
        let result = action();
        let _ = file.unlock();
        result
    }
}
