//! `ferry add <source>` – queue a transfer and autostart the worker.

use anyhow::Result;
use ferry_core::paths::FerryPaths;
use ferry_core::queue::QueueManager;
use ferry_core::worker;
use std::path::{Path, PathBuf};

#[allow(clippy::too_many_arguments)]
pub fn run_add(
    queue: &QueueManager,
    paths: &FerryPaths,
    state_dir: Option<&Path>,
    source: &str,
    dest: Option<PathBuf>,
    name: Option<String>,
    size: u64,
    no_start: bool,
) -> Result<()> {
    let display_name = name.unwrap_or_else(|| {
        source
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(source)
            .to_string()
    });
    let destination = match dest {
        Some(d) => d,
        None => std::env::current_dir()?.join(&display_name),
    };

    let job = queue.enqueue(source, &destination, &display_name, size)?;
    println!("Queued {} -> {}", job.display_name, destination.display());

    if !no_start && worker::start_worker_if_not_running(paths, state_dir)? {
        println!("Worker started.");
    }
    Ok(())
}
