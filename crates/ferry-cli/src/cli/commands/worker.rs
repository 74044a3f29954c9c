//! `ferry worker` – run the worker loop in this process.

use anyhow::Result;
use ferry_core::config::FerryConfig;
use ferry_core::engine::CommandEngine;
use ferry_core::paths::FerryPaths;
use ferry_core::worker::Worker;

pub async fn run_worker(paths: &FerryPaths, cfg: &FerryConfig) -> Result<()> {
    let engine = CommandEngine::from_config(&cfg.engine);
    Worker::new(paths.clone(), cfg, engine).run().await
}
