//! The long-lived worker process: single-instance guard, crash recovery,
//! poll loop, and batch dispatch to the transfer engine.

use std::path::Path;
use std::pin::pin;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinSet;
use tokio::time::sleep;

use crate::config::FerryConfig;
use crate::engine::TransferEngine;
use crate::paths::FerryPaths;
use crate::queue::{JobId, QueueManager, RetryDisposition};
use crate::scheduler::{self, DispatchPlan};

pub mod guard;

pub use guard::{is_worker_alive, InstanceGuard};

/// Poll loop driving the queue against the transfer engine.
///
/// One instance per machine (enforced by [`InstanceGuard`]); within a
/// dispatch, up to two engine subprocesses run concurrently. That is the
/// only parallelism in the system.
pub struct Worker<E: TransferEngine> {
    queue: QueueManager,
    engine: Arc<E>,
    paths: FerryPaths,
    poll_interval: Duration,
    idle_poll_limit: u32,
    launch_stagger: Duration,
}

impl<E: TransferEngine> Worker<E> {
    pub fn new(paths: FerryPaths, cfg: &FerryConfig, engine: E) -> Self {
        Self {
            queue: QueueManager::new(&paths, cfg.max_retries),
            engine: Arc::new(engine),
            paths,
            poll_interval: Duration::from_millis(cfg.poll_interval_ms),
            idle_poll_limit: cfg.idle_poll_limit,
            launch_stagger: Duration::from_millis(cfg.launch_stagger_ms),
        }
    }

    /// Run until the queue stays empty for the idle limit or a termination
    /// signal arrives. Returns Ok on both; the only startup failure that
    /// propagates is `AlreadyRunning`.
    pub async fn run(self) -> Result<()> {
        let guard = InstanceGuard::acquire(&self.paths.pid)?;
        tracing::info!(pid = guard.pid(), "worker started");

        let recovered = self.queue.recover_crashed()?;
        if recovered > 0 {
            tracing::info!(recovered, "requeued job(s) left in flight by a previous run");
        }

        let mut shutdown = pin!(shutdown_signal());
        let mut idle_polls = 0u32;

        loop {
            if self.queue.is_paused()? {
                // Paused time does not count toward the idle exit.
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = sleep(self.poll_interval) => continue,
                }
            }

            let counts = self.queue.counts()?;
            if counts.pending == 0 && counts.in_flight == 0 {
                idle_polls += 1;
                if idle_polls >= self.idle_poll_limit {
                    tracing::info!("queue idle for {} polls, exiting", idle_polls);
                    break;
                }
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = sleep(self.poll_interval) => continue,
                }
            }
            idle_polls = 0;

            let plan = scheduler::plan(counts.pending, counts.in_flight);
            if plan.is_empty() {
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = sleep(self.poll_interval) => continue,
                }
            }

            self.dispatch(plan).await?;
        }

        // Guard drop removes the pid file, on the signal path too.
        drop(guard);
        tracing::info!("worker stopped");
        Ok(())
    }

    /// Claim a batch, launch one engine invocation per job (staggered so two
    /// jobs don't open their connections in the same instant), and resolve
    /// each outcome independently. Batch members do not share fate.
    async fn dispatch(&self, plan: DispatchPlan) -> Result<()> {
        let batch = self.queue.claim_batch(plan.batch_size)?;
        if batch.is_empty() {
            // Raced with a concurrent remove/clear; whoever won the gate wins.
            return Ok(());
        }
        self.queue.mark_in_flight(&batch)?;
        let ids: Vec<JobId> = batch.iter().map(|j| j.id).collect();
        tracing::info!(
            batch = batch.len(),
            streams = plan.streams_per_job,
            "dispatching"
        );

        let mut tasks = JoinSet::new();
        for (i, job) in batch.into_iter().enumerate() {
            if i > 0 {
                sleep(self.launch_stagger).await;
            }
            let engine = Arc::clone(&self.engine);
            let streams = plan.streams_per_job;
            tasks.spawn(async move {
                let outcome = engine.transfer(&job, streams).await;
                (job, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let (job, outcome) = joined.map_err(|e| anyhow::anyhow!("transfer task join: {e}"))?;
            match outcome {
                Ok(()) => {
                    self.queue.complete(&job)?;
                    tracing::info!(name = %job.display_name, "transfer completed");
                }
                Err(err) => {
                    tracing::warn!(name = %job.display_name, error = %err, "transfer failed");
                    match self.queue.fail_or_retry(&job)? {
                        RetryDisposition::Requeued { retries } => {
                            tracing::info!(name = %job.display_name, retries, "requeued for retry");
                        }
                        RetryDisposition::Failed { retries } => {
                            tracing::warn!(name = %job.display_name, retries, "retries exhausted, job failed");
                        }
                        RetryDisposition::NotFound => {}
                    }
                }
            }
        }

        self.queue.release_in_flight(&ids)?;
        Ok(())
    }
}

/// Spawn a detached `ferry worker` child unless a live worker already holds
/// the pid file. Returns whether a new worker was started.
pub fn start_worker_if_not_running(
    paths: &FerryPaths,
    state_dir: Option<&Path>,
) -> Result<bool> {
    if is_worker_alive(&paths.pid) {
        return Ok(false);
    }
    let exe = std::env::current_exe()?;
    let mut cmd = std::process::Command::new(exe);
    if let Some(dir) = state_dir {
        cmd.arg("--state-dir").arg(dir);
    }
    cmd.arg("worker")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd.spawn()?;
    tracing::info!("worker process launched");
    Ok(true)
}

/// Resolves when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
