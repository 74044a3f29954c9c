//! `ferry remove <index>` – drop one pending job by queue position.

use anyhow::Result;
use ferry_core::queue::QueueManager;

pub fn run_remove(queue: &QueueManager, index: usize) -> Result<()> {
    match queue.remove_pending(index)? {
        Some(job) => println!("Removed {}", job.display_name),
        // The worker may have claimed it first; that race is accepted.
        None => println!("No pending job at index {index}"),
    }
    Ok(())
}
