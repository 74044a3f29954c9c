//! Well-known locations for persisted state.
//!
//! Three files under one state directory: the queue document, the lock
//! resource guarding it, and the worker pid file. The lock file is distinct
//! from the document so an in-progress atomic rename never disturbs lock
//! holders.

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Paths to the queue document, lock file, and worker pid file.
#[derive(Debug, Clone)]
pub struct FerryPaths {
    pub queue: PathBuf,
    pub lock: PathBuf,
    pub pid: PathBuf,
}

impl FerryPaths {
    /// Default locations under the XDG state dir: `~/.local/state/ferry/`.
    pub fn default_paths() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("ferry")?;
        let state_dir = xdg_dirs.get_state_home().join("ferry");
        Ok(Self::at_dir(&state_dir))
    }

    /// Place all three files under a specific directory. Intended for tests
    /// and for the CLI's `--state-dir` override.
    pub fn at_dir(dir: &Path) -> Self {
        Self {
            queue: dir.join("queue.json"),
            lock: dir.join("queue.lock"),
            pid: dir.join("worker.pid"),
        }
    }
}
