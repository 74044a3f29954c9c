//! `ferry list` – print every job per bucket.

use anyhow::Result;
use ferry_core::queue::{Job, QueueManager};

fn print_bucket(title: &str, jobs: &[Job]) {
    if jobs.is_empty() {
        return;
    }
    println!("{title}:");
    for (i, job) in jobs.iter().enumerate() {
        let size_mib = job.size_bytes as f64 / 1_048_576.0;
        println!(
            "  [{}] {}  {:.1} MiB  retries: {}",
            i, job.display_name, size_mib, job.retries
        );
    }
}

pub fn run_list(queue: &QueueManager) -> Result<()> {
    let doc = queue.snapshot()?;
    if doc.pending.is_empty()
        && doc.in_flight.is_empty()
        && doc.completed.is_empty()
        && doc.failed.is_empty()
    {
        println!("Queue is empty.");
        return Ok(());
    }
    print_bucket("pending", &doc.pending);
    print_bucket("in-flight", &doc.in_flight);
    print_bucket("completed", &doc.completed);
    print_bucket("failed", &doc.failed);
    Ok(())
}
