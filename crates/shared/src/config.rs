//! Client configuration management.

use serde::Deserialize;

/// Top-level client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Backend API configuration.
    pub api: ApiConfig,
    /// Notification polling configuration.
    #[serde(default)]
    pub polling: PollingConfig,
    /// Cache tuning.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the panel backend, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Notification polling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// Seconds between background notification fetches.
    #[serde(default = "default_poll_interval_secs")]
    pub interval_secs: u64,
    /// Whether regaining window focus triggers an immediate fetch.
    #[serde(default = "default_refresh_on_focus")]
    pub refresh_on_focus: bool,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval_secs(),
            refresh_on_focus: default_refresh_on_focus(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_refresh_on_focus() -> bool {
    true
}

/// Cache tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// TTL for cached user lookups, in seconds.
    #[serde(default = "default_user_info_ttl_secs")]
    pub user_info_ttl_secs: u64,
    /// Maximum number of cached user lookups.
    #[serde(default = "default_user_info_capacity")]
    pub user_info_capacity: u64,
    /// TTL for cached permission templates, in seconds.
    #[serde(default = "default_template_ttl_secs")]
    pub template_ttl_secs: u64,
    /// Maximum number of cached permission templates.
    #[serde(default = "default_template_capacity")]
    pub template_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            user_info_ttl_secs: default_user_info_ttl_secs(),
            user_info_capacity: default_user_info_capacity(),
            template_ttl_secs: default_template_ttl_secs(),
            template_capacity: default_template_capacity(),
        }
    }
}

fn default_user_info_ttl_secs() -> u64 {
    300 // 5 minutes
}

fn default_user_info_capacity() -> u64 {
    512
}

fn default_template_ttl_secs() -> u64 {
    3600 // 1 hour
}

fn default_template_capacity() -> u64 {
    64
}

impl ClientConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FINBOARD").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
