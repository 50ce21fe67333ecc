use std::path::PathBuf;

use crate::errors::{RatReaderError, RatReaderResult};

pub const CONFIG_DIR_VAR: &str = "RATREADER_CONFIG_DIR";
pub const LOG_FILTER_VAR: &str = "RATREADER_LOG";

const APP_DIR: &str = "ratreader";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Process settings resolved from the environment. The persisted session
/// lives in the file at [`Settings::session_path`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_dir: PathBuf,
    pub log_filter: String,
}

impl Settings {
    pub fn from_env() -> RatReaderResult<Self> {
        // A .env in the working directory is optional
        dotenvy::dotenv().ok();

        let config_dir = match std::env::var_os(CONFIG_DIR_VAR) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .map(|d| d.join(APP_DIR))
                .ok_or_else(|| {
                    RatReaderError::Config(format!(
                        "Cannot determine config directory; set {}",
                        CONFIG_DIR_VAR
                    ))
                })?,
        };

        let log_filter =
            std::env::var(LOG_FILTER_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            config_dir,
            log_filter,
        })
    }

    pub fn session_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }
}
