//! Configuration management for starwatch using the prefer crate.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Statistics page scraped when no override is configured.
pub const DEFAULT_SOURCE_URL: &str = "https://planet4589.org/space/con/star/stats.html";

/// Hours after which the newest snapshot counts as stale. The scheduler runs
/// daily, so anything past a day plus slack means missed runs.
pub const DEFAULT_FRESHNESS_THRESHOLD_HOURS: i64 = 25;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// Statistics page to scrape.
    pub source_url: String,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Hours before the newest snapshot is reported stale.
    pub freshness_threshold_hours: i64,
}

impl Default for Settings {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("starwatch");

        Self {
            data_dir,
            database_filename: "starwatch.db".to_string(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            user_agent: "starwatch/0.4 (constellation statistics tracker)".to_string(),
            request_timeout: 30,
            freshness_threshold_hours: DEFAULT_FRESHNESS_THRESHOLD_HOURS,
        }
    }
}

impl Settings {
    /// Get the full path to the database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Target directory for data.
    #[serde(default)]
    pub target: Option<String>,
    /// Database filename.
    #[serde(default)]
    pub database: Option<String>,
    /// Statistics page URL; point this at a local fixture for testing.
    #[serde(default)]
    pub source_url: Option<String>,
    /// User agent string.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default)]
    pub request_timeout: Option<u64>,
    /// Hours before the newest snapshot is reported stale.
    #[serde(default)]
    pub freshness_threshold_hours: Option<i64>,
}

impl Config {
    /// Load configuration using the prefer crate, which discovers starwatch
    /// config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("starwatch").await {
            Ok(pref_config) => {
                let target: Option<String> = pref_config.get("target").await.ok();
                let database: Option<String> = pref_config.get("database").await.ok();
                let source_url: Option<String> = pref_config.get("source_url").await.ok();
                let user_agent: Option<String> = pref_config.get("user_agent").await.ok();
                let request_timeout: Option<u64> = pref_config.get("request_timeout").await.ok();
                let freshness_threshold_hours: Option<i64> =
                    pref_config.get("freshness_threshold_hours").await.ok();

                Config {
                    target,
                    database,
                    source_url,
                    user_agent,
                    request_timeout,
                    freshness_threshold_hours,
                }
            }
            Err(_) => {
                // No config file found, use defaults
                Self::default()
            }
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref target) = self.target {
            let path = shellexpand::tilde(target);
            settings.data_dir = PathBuf::from(path.as_ref());
        }
        if let Some(ref database) = self.database {
            settings.database_filename = database.clone();
        }
        if let Some(ref source_url) = self.source_url {
            settings.source_url = source_url.clone();
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(hours) = self.freshness_threshold_hours {
            settings.freshness_threshold_hours = hours;
        }
    }
}

/// Load settings from configuration.
pub async fn load_settings() -> Settings {
    let config = Config::load().await;
    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    settings
}
