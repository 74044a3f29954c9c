//! Single-instance guard: a pid file validated against the process table.
//!
//! A pid file is "live" only if the process it names still exists, so a
//! crashed worker's stale file never blocks the next one.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FerryError;

/// Holds the worker's liveness token for the lifetime of the process.
/// Dropping it (normal exit or signal-triggered shutdown) removes the file.
#[derive(Debug)]
pub struct InstanceGuard {
    path: PathBuf,
    pid: u32,
}

impl InstanceGuard {
    /// Claim the pid file. Fails with [`FerryError::AlreadyRunning`] if a
    /// live worker already holds it; silently replaces a stale file.
    pub fn acquire(path: &Path) -> Result<Self> {
        if let Some(pid) = read_live_pid(path) {
            return Err(FerryError::AlreadyRunning(pid).into());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let pid = std::process::id();
        fs::write(path, pid.to_string())
            .with_context(|| format!("write pid file: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            pid,
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// The pid recorded at `path`, if that process still exists.
pub fn read_live_pid(path: &Path) -> Option<u32> {
    let text = fs::read_to_string(path).ok()?;
    let pid: u32 = text.trim().parse().ok()?;
    pid_alive(pid).then_some(pid)
}

/// Whether a live worker holds the pid file. Used by the CLI status display
/// and by `start_worker_if_not_running`.
pub fn is_worker_alive(path: &Path) -> bool {
    read_live_pid(path).is_some()
}

#[cfg(unix)]
fn pid_alive(pid: u32) -> bool {
    // Signal 0 probes existence without delivering anything. EPERM still
    // means the process exists, just not ours to signal.
    let rc = unsafe { libc::kill(pid as libc::pid_t, 0) };
    rc == 0 || std::io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

#[cfg(not(unix))]
fn pid_alive(_pid: u32) -> bool {
    false
}
