//! Path configuration - where settings and logs live.
//!
//! Resolution order: CLI `--config-dir` override, then the
//! `LIVRARIA_CONFIG_DIR` environment variable, then the platform dirs.

use std::path::PathBuf;

/// Directory name under the platform config/data roots.
pub const APP_DIR_NAME: &str = "livraria";

/// Environment variable overriding both directories.
pub const CONFIG_DIR_ENV: &str = "LIVRARIA_CONFIG_DIR";

#[derive(Debug, Clone)]
pub struct PathConfig {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl PathConfig {
    /// Resolve directories from CLI args and environment.
    pub fn from_env_and_cli(cli_override: Option<PathBuf>) -> Self {
        if let Some(dir) = cli_override {
            return Self::single_dir(dir);
        }
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Self::single_dir(PathBuf::from(dir));
        }

        let config_dir = dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);
        let data_dir = dirs_next::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);

        Self {
            config_dir,
            data_dir,
        }
    }

    // Overrides put config and data side by side in one directory
    fn single_dir(dir: PathBuf) -> Self {
        Self {
            config_dir: dir.clone(),
            data_dir: dir,
        }
    }
}

/// Create the application directories if missing.
pub fn ensure_dirs(paths: &PathConfig) -> std::io::Result<()> {
    std::fs::create_dir_all(&paths.config_dir)?;
    std::fs::create_dir_all(&paths.data_dir)?;
    Ok(())
}

/// Path of a file inside the config directory (persisted app state).
pub fn config_file(name: &str, paths: &PathConfig) -> PathBuf {
    paths.config_dir.join(name)
}

/// Path of a file inside the data directory (log files etc.).
pub fn data_file(name: &str, paths: &PathConfig) -> PathBuf {
    paths.data_dir.join(name)
}
