pub mod builder;
pub mod config;
pub mod controller;
pub mod draft;
pub mod error;
pub mod model;
pub mod render;
pub mod service;
pub mod state;
pub mod storage;
pub mod views;

pub use builder::StoreBuilder;
pub use config::AppConfig;
pub use controller::{command_channel, Command, CommandSender, Controller, Views};
pub use draft::RecipeDraft;
pub use error::ForkifyError;
pub use model::{Ingredient, NewRecipe, Recipe, SearchResult, SearchState};
pub use render::{Container, NodeRef, PatchStats};
pub use service::{HttpRecipeService, RecipeService};
pub use state::{AppState, Store};
pub use storage::{BookmarkStore, FileBookmarkStore, MemoryBookmarkStore};

/// Fetch a single recipe using the configuration from `config.toml` and
/// `FORKIFY__*` environment variables.
pub async fn fetch_recipe(id: &str) -> Result<Recipe, ForkifyError> {
    let config = AppConfig::load()?;
    let mut store = StoreBuilder::from_config(&config).build()?;
    let recipe = store.load_recipe(id).await?;
    Ok(recipe.clone())
}
