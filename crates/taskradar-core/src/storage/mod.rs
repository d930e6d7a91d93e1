mod config;
pub mod task_store;

pub use config::{ClassifierConfig, Config, PlotConfig};
pub use task_store::TaskStore;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/taskradar[-dev]/` based on TASKRADAR_ENV.
///
/// Set TASKRADAR_ENV=dev to use the development data directory, or
/// TASKRADAR_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TASKRADAR_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TASKRADAR_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("taskradar-dev")
            } else {
                base_dir.join("taskradar")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
