use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Transfer-engine invocation template (section `[engine]` in config.toml).
///
/// Each argument may contain `{source}`, `{destination}` and `{streams}`
/// placeholders, substituted per job before the engine is spawned. Engine
/// internals (its own retries, timeouts, chunking) are not exposed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Program to invoke for each transfer.
    pub program: String,
    /// Arguments passed to the program, after placeholder substitution.
    pub args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: "lftp".to_string(),
            args: vec![
                "-c".to_string(),
                "pget -n {streams} -c \"{source}\" -o \"{destination}\"".to_string(),
            ],
        }
    }
}

/// Global configuration loaded from `~/.config/ferry/config.toml`.
///
/// The connection ceiling is deliberately not configurable; see
/// `scheduler::CONNECTION_CEILING`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FerryConfig {
    /// Milliseconds the worker sleeps between queue polls.
    pub poll_interval_ms: u64,
    /// Consecutive empty polls before the worker exits on its own.
    pub idle_poll_limit: u32,
    /// Failed attempts before a job is moved to the failed bucket.
    pub max_retries: u32,
    /// Milliseconds between engine launches within one batch.
    pub launch_stagger_ms: u64,
    /// How to invoke the external transfer engine.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for FerryConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5000,
            idle_poll_limit: 12,
            max_retries: 3,
            launch_stagger_ms: 1000,
            engine: EngineConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ferry")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FerryConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FerryConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FerryConfig = toml::from_str(&data)?;
    Ok(cfg)
}
