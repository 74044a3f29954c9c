//! Subprocess-backed transfer engine.

use std::process::Stdio;

use crate::config::EngineConfig;
use crate::queue::Job;

use super::{TransferEngine, TransferFailure};

/// Spawns the configured engine command once per job, with `{source}`,
/// `{destination}` and `{streams}` placeholders substituted into its
/// argument template. Outcome is the child's exit status; engine-internal
/// retries and timeouts are its own configuration.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self {
            program: cfg.program.clone(),
            args: cfg.args.clone(),
        }
    }

    fn render(template: &str, job: &Job, streams: u32) -> String {
        template
            .replace("{source}", &job.source)
            .replace("{destination}", &job.destination.to_string_lossy())
            .replace("{streams}", &streams.to_string())
    }
}

impl TransferEngine for CommandEngine {
    async fn transfer(&self, job: &Job, streams: u32) -> Result<(), TransferFailure> {
        let mut cmd = tokio::process::Command::new(&self.program);
        for arg in &self.args {
            cmd.arg(Self::render(arg, job, streams));
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        tracing::debug!(name = %job.display_name, streams, "launching transfer engine");
        let status = cmd.status().await.map_err(TransferFailure::Launch)?;
        if status.success() {
            Ok(())
        } else {
            Err(TransferFailure::Engine(status))
        }
    }
}
