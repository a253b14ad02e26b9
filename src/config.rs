use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::api::DEFAULT_API_URL;

/// Central configuration loaded from environment variables.
///
/// Everything has a sensible default; the .env file is loaded
/// automatically at startup via dotenvy.
pub struct Config {
    /// Base URL of the analysis service (LURECHECK_API_URL).
    pub api_url: String,
    /// Where the history file lives (LURECHECK_HISTORY_PATH).
    /// Defaults to `<platform data dir>/lurecheck/history.json`.
    pub history_path: PathBuf,
    /// Directory export artifacts are written into (LURECHECK_EXPORT_DIR).
    pub export_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self {
            api_url: env::var("LURECHECK_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            history_path: env::var("LURECHECK_HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_history_path()),
            export_dir: env::var("LURECHECK_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        })
    }
}

/// Platform data dir when available, current dir otherwise.
fn default_history_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("lurecheck").join("history.json"),
        None => PathBuf::from("./lurecheck-history.json"),
    }
}
