//! `ferry pause` / `ferry resume` – toggle dispatching.
//!
//! Pausing does not interrupt in-flight transfers; the worker just stops
//! starting new ones until resumed.

use anyhow::Result;
use ferry_core::queue::QueueManager;

pub fn run_pause(queue: &QueueManager) -> Result<()> {
    queue.set_paused(true)?;
    println!("Queue paused.");
    Ok(())
}

pub fn run_resume(queue: &QueueManager) -> Result<()> {
    queue.set_paused(false)?;
    println!("Queue resumed.");
    Ok(())
}
