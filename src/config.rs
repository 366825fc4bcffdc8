use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the recipe service, ending with the `recipes/` collection
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// API key sent as the `key` query parameter (also the ownership key of uploads)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Number of search results shown per page
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
    /// File holding the persisted bookmarks
    #[serde(default = "default_bookmarks_path")]
    pub bookmarks_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            timeout: default_timeout(),
            results_per_page: default_results_per_page(),
            bookmarks_path: default_bookmarks_path(),
        }
    }
}

// Default value functions
fn default_api_url() -> String {
    "https://forkify-api.herokuapp.com/api/v2/recipes/".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_results_per_page() -> usize {
    10
}

fn default_bookmarks_path() -> PathBuf {
    PathBuf::from("bookmarks.json")
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FORKIFY__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FORKIFY__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore: FORKIFY__RESULTS_PER_PAGE
        .add_source(
            Environment::with_prefix("FORKIFY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
