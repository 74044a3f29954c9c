//! `ferry clear <bucket>` – empty one bucket.

use anyhow::Result;
use ferry_core::queue::QueueManager;

use crate::cli::ClearBucket;

pub fn run_clear(queue: &QueueManager, bucket: ClearBucket) -> Result<()> {
    let (n, label) = match bucket {
        ClearBucket::Pending => (queue.clear_pending()?, "pending"),
        ClearBucket::Completed => (queue.clear_completed()?, "completed"),
        ClearBucket::Failed => (queue.clear_failed()?, "failed"),
    };
    println!("Cleared {n} {label} job(s)");
    Ok(())
}
