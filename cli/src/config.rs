use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Default daily calorie goal. The goal is deliberately session-scoped:
/// it is a `--goal` flag, never persisted, and resets to this default on
/// every invocation.
pub const DEFAULT_GOAL: f64 = 2000.0;

pub struct Config {
    pub ledger_path: PathBuf,
    pub staged_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from("", "", "diario").context("Could not determine home directory")?;

        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        Ok(Config {
            ledger_path: data_dir.join("diario.csv"),
            staged_path: data_dir.join("staged.json"),
        })
    }
}
