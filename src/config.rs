use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default search API base URL
pub const DEFAULT_SEARCH_API_URL: &str = "https://api.influwize.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the influencer search API
    #[serde(default = "default_search_api_url")]
    pub search_api_url: String,
    /// Base URL of the hosted auth/persistence backend
    pub backend_url: String,
    /// Publishable (anon) API key for the backend
    pub backend_anon_key: String,
    /// Directory CSV exports are written to; empty means current directory
    #[serde(default)]
    pub export_dir: String,
}

fn default_search_api_url() -> String {
    DEFAULT_SEARCH_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_api_url: default_search_api_url(),
            backend_url: String::new(),
            backend_anon_key: String::new(),
            export_dir: String::new(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".scout-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Path the cached session is persisted to
    pub fn session_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("session.json"))
    }

    /// Path of the log file
    pub fn log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("scout-tui.log"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Directory exports land in
    pub fn export_dir(&self) -> PathBuf {
        if self.export_dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.export_dir)
        }
    }
}
