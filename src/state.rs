//! The application state store: the single source of truth for the current
//! recipe, the search and the bookmarks.
//!
//! Every mutating operation first awaits whatever it needs from the recipe
//! service and only then applies its in-memory changes in one synchronous
//! step. A failure at any point leaves the previous state untouched.

use log::{debug, error, info};

use crate::draft::RecipeDraft;
use crate::error::ForkifyError;
use crate::model::{Recipe, SearchResult, SearchState};
use crate::service::RecipeService;
use crate::storage::{deserialize_bookmarks, serialize_bookmarks, BookmarkStore};

/// Recipe, search and bookmark data for one application session
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub recipe: Option<Recipe>,
    pub search: SearchState,
    /// Insertion-ordered snapshots, unique by id
    pub bookmarks: Vec<Recipe>,
}

impl AppState {
    pub fn new(results_per_page: usize) -> Self {
        AppState {
            recipe: None,
            search: SearchState::new(results_per_page),
            bookmarks: Vec::new(),
        }
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.iter().any(|b| b.id == id)
    }
}

/// Owns the [`AppState`] together with its two collaborators
pub struct Store {
    state: AppState,
    service: Box<dyn RecipeService>,
    bookmark_store: Box<dyn BookmarkStore>,
}

impl Store {
    /// Create the store and load persisted bookmarks
    pub fn new(
        service: Box<dyn RecipeService>,
        bookmark_store: Box<dyn BookmarkStore>,
        results_per_page: usize,
    ) -> Self {
        let mut state = AppState::new(results_per_page);
        state.bookmarks = deserialize_bookmarks(bookmark_store.load().as_deref());
        info!("Loaded {} bookmark(s)", state.bookmarks.len());

        Store {
            state,
            service,
            bookmark_store,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.state.recipe.as_ref()
    }

    pub fn search(&self) -> &SearchState {
        &self.state.search
    }

    pub fn bookmarks(&self) -> &[Recipe] {
        &self.state.bookmarks
    }

    pub fn bookmark_store(&self) -> &dyn BookmarkStore {
        self.bookmark_store.as_ref()
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.state.is_bookmarked(id)
    }

    /// Fetch a recipe and make it the current one
    pub async fn load_recipe(&mut self, id: &str) -> Result<&Recipe, ForkifyError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ForkifyError::ValidationError(
                "A recipe id is required".to_string(),
            ));
        }

        let mut recipe = self.service.get_recipe(id).await.map_err(|e| {
            error!("Failed to load recipe {}: {}", id, e);
            e
        })?;
        recipe.bookmarked = self.state.is_bookmarked(&recipe.id);
        debug!("Loaded recipe {} (bookmarked: {})", recipe.id, recipe.bookmarked);

        Ok(&*self.state.recipe.insert(recipe))
    }

    /// Run a search and reset pagination to the first page
    pub async fn load_search_results(&mut self, query: &str) -> Result<(), ForkifyError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ForkifyError::ValidationError(
                "Please enter a search query".to_string(),
            ));
        }

        let results = self.service.search(query).await.map_err(|e| {
            error!("Search for '{}' failed: {}", query, e);
            e
        })?;
        info!("Search for '{}' returned {} result(s)", query, results.len());

        let search = &mut self.state.search;
        search.query = query.to_string();
        search.results = results;
        search.page = 1;
        Ok(())
    }

    /// Slice of the results on `page`; out-of-range pages are empty.
    ///
    /// Also records `page` as the current page.
    pub fn results_page(&mut self, page: usize) -> &[SearchResult] {
        // Page 0 yields nothing but never becomes the current page
        self.state.search.page = page.max(1);
        self.state.search.slice(page)
    }

    pub fn current_results_page(&mut self) -> &[SearchResult] {
        let page = self.state.search.page;
        self.results_page(page)
    }

    /// Rescale the current recipe's ingredients to `new_servings`
    pub fn update_servings(&mut self, new_servings: u32) -> Result<(), ForkifyError> {
        if new_servings < 1 {
            return Err(ForkifyError::ValidationError(
                "A recipe must have at least one serving".to_string(),
            ));
        }
        let recipe = self.state.recipe.as_mut().ok_or_else(|| {
            ForkifyError::ValidationError("No recipe is loaded".to_string())
        })?;

        debug!(
            "Scaling recipe {} from {} to {} servings",
            recipe.id, recipe.servings, new_servings
        );
        recipe.rescale(new_servings);
        Ok(())
    }

    /// Bookmark a recipe snapshot. Adding an id twice is a no-op.
    pub fn add_bookmark(&mut self, mut recipe: Recipe) -> Result<(), ForkifyError> {
        if self.state.is_bookmarked(&recipe.id) {
            debug!("Recipe {} is already bookmarked", recipe.id);
            return Ok(());
        }

        recipe.bookmarked = true;
        let id = recipe.id.clone();
        let mut bookmarks = self.state.bookmarks.clone();
        bookmarks.push(recipe);
        self.commit_bookmarks(bookmarks)?;

        self.mark_current(&id, true);
        info!("Bookmarked recipe {}", id);
        Ok(())
    }

    /// Remove the bookmark with `id`; absent ids are a no-op
    pub fn delete_bookmark(&mut self, id: &str) -> Result<(), ForkifyError> {
        let Some(index) = self.state.bookmarks.iter().position(|b| b.id == id) else {
            debug!("Recipe {} is not bookmarked", id);
            return Ok(());
        };

        let mut bookmarks = self.state.bookmarks.clone();
        bookmarks.remove(index);
        self.commit_bookmarks(bookmarks)?;

        self.mark_current(id, false);
        info!("Removed bookmark {}", id);
        Ok(())
    }

    /// Bookmark the current recipe, or un-bookmark it if it already is
    pub fn toggle_bookmark(&mut self) -> Result<(), ForkifyError> {
        let recipe = self
            .state
            .recipe
            .clone()
            .ok_or_else(|| ForkifyError::ValidationError("No recipe is loaded".to_string()))?;

        if recipe.bookmarked {
            self.delete_bookmark(&recipe.id)
        } else {
            self.add_bookmark(recipe)
        }
    }

    /// Wipe every bookmark, in memory and on disk
    pub fn clear_bookmarks(&mut self) -> Result<(), ForkifyError> {
        self.bookmark_store.clear()?;
        self.state.bookmarks.clear();
        if let Some(recipe) = self.state.recipe.as_mut() {
            recipe.bookmarked = false;
        }
        Ok(())
    }

    /// Parse and send a new recipe; on success it becomes the current recipe
    /// and is bookmarked.
    pub async fn upload_recipe(&mut self, draft: &RecipeDraft) -> Result<&Recipe, ForkifyError> {
        let new_recipe = draft.to_new_recipe()?;
        let mut recipe = self.service.upload(&new_recipe).await.map_err(|e| {
            error!("Upload of '{}' failed: {}", new_recipe.title, e);
            e
        })?;

        recipe.bookmarked = true;
        if !self.state.is_bookmarked(&recipe.id) {
            let mut bookmarks = self.state.bookmarks.clone();
            bookmarks.push(recipe.clone());
            self.commit_bookmarks(bookmarks)?;
        }
        info!("Uploaded recipe {}", recipe.id);

        Ok(&*self.state.recipe.insert(recipe))
    }

    /// Persist `bookmarks`, then install them. Nothing changes if saving fails.
    fn commit_bookmarks(&mut self, bookmarks: Vec<Recipe>) -> Result<(), ForkifyError> {
        let serialized = serialize_bookmarks(&bookmarks)?;
        self.bookmark_store.save(&serialized).map_err(|e| {
            error!("Failed to persist bookmarks: {}", e);
            e
        })?;
        self.state.bookmarks = bookmarks;
        Ok(())
    }

    fn mark_current(&mut self, id: &str, bookmarked: bool) {
        if let Some(recipe) = self.state.recipe.as_mut().filter(|r| r.id == id) {
            recipe.bookmarked = bookmarked;
        }
    }
}
