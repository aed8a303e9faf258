use anyhow::Result;
use std::fs;
use std::path::PathBuf;

/// Per-user directories used by pg-explorer
pub struct AppPaths;

impl AppPaths {
    /// Log files; falls back to the temp directory when no data dir exists
    pub fn log_dir() -> Result<PathBuf> {
        let log_dir = match dirs::data_dir() {
            Some(dir) => dir.join("pg-explorer").join("logs"),
            None => std::env::temp_dir().join("pg-explorer"),
        };

        fs::create_dir_all(&log_dir)?;
        Ok(log_dir)
    }

    /// `.env` in the working directory
    pub fn env_file() -> Result<PathBuf> {
        Ok(std::env::current_dir()?.join(crate::config::db_config::ENV_FILE))
    }
}
