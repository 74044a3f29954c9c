//! `ferry status` – bucket counts, pause flag, worker liveness.

use anyhow::Result;
use ferry_core::paths::FerryPaths;
use ferry_core::queue::QueueManager;
use ferry_core::worker;

pub fn run_status(queue: &QueueManager, paths: &FerryPaths) -> Result<()> {
    let counts = queue.counts()?;
    let paused = queue.is_paused()?;
    let alive = worker::is_worker_alive(&paths.pid);

    println!(
        "pending: {}  in-flight: {}  completed: {}  failed: {}",
        counts.pending, counts.in_flight, counts.completed, counts.failed
    );
    println!(
        "queue: {}  worker: {}",
        if paused { "paused" } else { "active" },
        if alive { "running" } else { "stopped" }
    );
    Ok(())
}
