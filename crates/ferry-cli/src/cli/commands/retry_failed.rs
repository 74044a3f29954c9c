//! `ferry retry-failed` – requeue everything in the failed bucket.

use anyhow::Result;
use ferry_core::queue::QueueManager;

pub fn run_retry_failed(queue: &QueueManager) -> Result<()> {
    let n = queue.retry_all_failed()?;
    if n == 0 {
        println!("No failed jobs.");
    } else {
        println!("Requeued {n} failed job(s).");
    }
    Ok(())
}
