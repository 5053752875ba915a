use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "speedtype";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("speedtype_config.json"))
    }

    /// Logs go under $HOME/.local/state like other state files, with the
    /// platform data dir as a fallback.
    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join("speedtype.log");
        }

        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.data_local_dir().join("speedtype.log"))
            .unwrap_or_else(|| PathBuf::from("speedtype.log"))
    }
}
