use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Recipe API endpoint settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Durable storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Number of search results shown per page
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
}

/// Configuration for the external recipe API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent as the `key` query parameter when present
    pub api_key: Option<String>,
    /// Path of the search endpoint
    #[serde(default = "default_search_path")]
    pub search_path: String,
    /// Path of the detail endpoint; the recipe id is appended as a segment
    #[serde(default = "default_detail_path")]
    pub detail_path: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            search_path: default_search_path(),
            detail_path: default_detail_path(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for the durable key-value store
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON file per key
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            results_per_page: default_results_per_page(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://forkify-api.herokuapp.com/api".to_string()
}

fn default_search_path() -> String {
    "/search".to_string()
}

fn default_detail_path() -> String {
    "/get".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".recipe-planner")
}

fn default_results_per_page() -> usize {
    10
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// See [`load_config`] for the source priority.
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_PLANNER__ prefix
/// 2. config.toml file in current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_PLANNER__API__BASE_URL
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_PLANNER__API__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_PLANNER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
