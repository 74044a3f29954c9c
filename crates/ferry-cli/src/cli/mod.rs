//! CLI for the ferry transfer-queue manager.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use ferry_core::config;
use ferry_core::paths::FerryPaths;
use ferry_core::queue::QueueManager;
use std::path::PathBuf;

use commands::{
    run_add, run_clear, run_list, run_pause, run_remove, run_resume, run_retry_failed,
    run_status, run_worker,
};

/// Top-level CLI for the ferry transfer-queue manager.
#[derive(Debug, Parser)]
#[command(name = "ferry")]
#[command(about = "ferry: persistent transfer queue with a 2-connection scheduler", long_about = None)]
pub struct Cli {
    /// Override the state directory (queue document, lock, pid file).
    #[arg(long, global = true, hide = true, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Queue a new transfer and start the worker if it is not running.
    Add {
        /// Remote locator to fetch (passed verbatim to the transfer engine).
        source: String,

        /// Local destination path (default: current dir + source file name).
        #[arg(long)]
        dest: Option<PathBuf>,

        /// Display name (default: last path segment of the source).
        #[arg(long)]
        name: Option<String>,

        /// Size in bytes, if known.
        #[arg(long, default_value_t = 0)]
        size: u64,

        /// Queue only; do not start the worker.
        #[arg(long)]
        no_start: bool,
    },

    /// Show bucket counts, the pause flag, and whether a worker is alive.
    Status,

    /// List the jobs in every bucket.
    List,

    /// Remove a pending job by its queue position (0-based).
    Remove {
        /// Position in the pending queue.
        index: usize,
    },

    /// Empty one bucket.
    Clear {
        #[arg(value_enum)]
        bucket: ClearBucket,
    },

    /// Pause dispatching (running transfers finish; nothing new starts).
    Pause,

    /// Resume dispatching.
    Resume,

    /// Move every failed job back to the queue with a fresh retry budget.
    RetryFailed,

    /// Run the worker loop in this process (normally started by `add`).
    Worker,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ClearBucket {
    Pending,
    Completed,
    Failed,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let paths = match &cli.state_dir {
            Some(dir) => FerryPaths::at_dir(dir),
            None => FerryPaths::default_paths()?,
        };
        let queue = QueueManager::new(&paths, cfg.max_retries);

        match cli.command {
            CliCommand::Add {
                source,
                dest,
                name,
                size,
                no_start,
            } => run_add(
                &queue,
                &paths,
                cli.state_dir.as_deref(),
                &source,
                dest,
                name,
                size,
                no_start,
            )?,
            CliCommand::Status => run_status(&queue, &paths)?,
            CliCommand::List => run_list(&queue)?,
            CliCommand::Remove { index } => run_remove(&queue, index)?,
            CliCommand::Clear { bucket } => run_clear(&queue, bucket)?,
            CliCommand::Pause => run_pause(&queue)?,
            CliCommand::Resume => run_resume(&queue)?,
            CliCommand::RetryFailed => run_retry_failed(&queue)?,
            CliCommand::Worker => run_worker(&paths, &cfg).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
