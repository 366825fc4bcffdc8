use std::path::PathBuf;
use std::time::Duration;

use crate::config::AppConfig;
use crate::service::{HttpRecipeService, RecipeService};
use crate::state::Store;
use crate::storage::{BookmarkStore, FileBookmarkStore, MemoryBookmarkStore};
use crate::ForkifyError;

/// Builder for configuring a [`Store`] and its collaborators
#[derive(Default)]
pub struct StoreBuilder {
    api_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    results_per_page: Option<usize>,
    bookmark_store: Option<Box<dyn BookmarkStore>>,
    service: Option<Box<dyn RecipeService>>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed every setting from a loaded configuration
    ///
    /// # Example
    /// ```no_run
    /// use forkify::{AppConfig, StoreBuilder};
    ///
    /// let config = AppConfig::load()?;
    /// let store = StoreBuilder::from_config(&config).build()?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_config(config: &AppConfig) -> Self {
        let mut builder = Self::new()
            .api_url(config.api_url.clone())
            .timeout(config.timeout_duration())
            .results_per_page(config.results_per_page)
            .bookmarks_file(config.bookmarks_path.clone());
        builder.api_key = config.api_key.clone();
        builder
    }

    /// Set the base URL of the recipe service
    ///
    /// # Example
    /// ```
    /// use forkify::StoreBuilder;
    ///
    /// let builder = StoreBuilder::new()
    ///     .api_url("https://forkify-api.herokuapp.com/api/v2/recipes/");
    /// ```
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the API key sent with every request
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the hard timeout of each request
    ///
    /// # Example
    /// ```
    /// use forkify::StoreBuilder;
    /// use std::time::Duration;
    ///
    /// let builder = StoreBuilder::new().timeout(Duration::from_secs(5));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn results_per_page(mut self, count: usize) -> Self {
        self.results_per_page = Some(count);
        self
    }

    /// Persist bookmarks to a JSON file
    pub fn bookmarks_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.bookmark_store = Some(Box::new(FileBookmarkStore::new(path)));
        self
    }

    /// Persist bookmarks to a custom store
    pub fn bookmark_store(mut self, store: impl BookmarkStore + 'static) -> Self {
        self.bookmark_store = Some(Box::new(store));
        self
    }

    /// Use a custom recipe service instead of the HTTP client
    pub fn service(mut self, service: impl RecipeService + 'static) -> Self {
        self.service = Some(Box::new(service));
        self
    }

    /// Build the store, loading persisted bookmarks
    ///
    /// Without a bookmark store, bookmarks live only in memory.
    ///
    /// # Errors
    /// Returns `ForkifyError::ValidationError` if `results_per_page` is zero.
    pub fn build(self) -> Result<Store, ForkifyError> {
        let defaults = AppConfig::default();
        let results_per_page = self.results_per_page.unwrap_or(defaults.results_per_page);
        if results_per_page == 0 {
            return Err(ForkifyError::ValidationError(
                "results_per_page must be at least 1".to_string(),
            ));
        }

        let timeout = self.timeout.unwrap_or_else(|| defaults.timeout_duration());
        let service = match self.service {
            Some(service) => service,
            None => Box::new(HttpRecipeService::new(
                self.api_url.unwrap_or(defaults.api_url),
                self.api_key,
                timeout,
            )),
        };
        let bookmark_store = self
            .bookmark_store
            .unwrap_or_else(|| Box::new(MemoryBookmarkStore::new()));

        Ok(Store::new(service, bookmark_store, results_per_page))
    }
}
