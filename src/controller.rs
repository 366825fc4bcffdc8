//! Command dispatch: the single loop that maps user commands to store
//! operations and re-renders the affected views.
//!
//! This is the recovery boundary. Store errors end here as error
//! placeholders; nothing is retried.

use log::{debug, error, warn};
use std::ops::ControlFlow;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::draft::RecipeDraft;
use crate::state::Store;
use crate::views::{
    AddRecipeView, BookmarksView, PaginationView, PreviewList, RecipeView, ResultsView,
    ViewRenderer,
};

/// Something the user asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// The location hash changed to a recipe id
    Navigate(String),
    Search(String),
    GoToPage(usize),
    UpdateServings(u32),
    /// Bookmark the open recipe, or remove its bookmark
    ToggleBookmark,
    Upload(RecipeDraft),
    /// Change nothing; observers still see the views afterwards
    Show,
    Quit,
}

pub type CommandSender = UnboundedSender<Command>;

pub fn command_channel() -> (CommandSender, UnboundedReceiver<Command>) {
    unbounded_channel()
}

/// Every screen region of the application
#[derive(Debug)]
pub struct Views {
    pub recipe: ViewRenderer<RecipeView>,
    pub results: ViewRenderer<ResultsView>,
    pub pagination: ViewRenderer<PaginationView>,
    pub bookmarks: ViewRenderer<BookmarksView>,
    pub add_recipe: ViewRenderer<AddRecipeView>,
}

impl Default for Views {
    fn default() -> Self {
        Views {
            recipe: ViewRenderer::new(RecipeView),
            results: ViewRenderer::new(ResultsView),
            pagination: ViewRenderer::new(PaginationView),
            bookmarks: ViewRenderer::new(BookmarksView),
            add_recipe: ViewRenderer::new(AddRecipeView),
        }
    }
}

pub struct Controller {
    store: Store,
    views: Views,
    location: Option<String>,
}

impl Controller {
    /// Wrap a store, paint the persisted bookmarks and an empty upload form
    pub fn new(store: Store) -> Self {
        let controller = Controller {
            store,
            views: Views::default(),
            location: None,
        };
        controller.render_bookmarks();
        controller.views.add_recipe.render(&RecipeDraft::new());
        controller
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    /// Recipe id in the location hash
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Handle commands until `Quit` arrives or every sender is gone.
    ///
    /// `after` sees the views once each command has been handled.
    pub async fn run<F>(&mut self, mut commands: UnboundedReceiver<Command>, mut after: F)
    where
        F: FnMut(&Views),
    {
        while let Some(command) = commands.recv().await {
            let flow = self.dispatch(command).await;
            after(&self.views);
            if flow.is_break() {
                break;
            }
        }
        debug!("Command loop finished");
    }

    pub async fn dispatch(&mut self, command: Command) -> ControlFlow<()> {
        debug!("Dispatching {:?}", command);
        match command {
            Command::Navigate(id) => self.control_recipe(id).await,
            Command::Search(query) => self.control_search(&query).await,
            Command::GoToPage(page) => self.control_pagination(page),
            Command::UpdateServings(servings) => self.control_servings(servings),
            Command::ToggleBookmark => self.control_bookmark(),
            Command::Upload(draft) => self.control_upload(&draft).await,
            Command::Show => {}
            Command::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    async fn control_recipe(&mut self, id: String) {
        let id = id.trim().trim_start_matches('#').to_string();
        if id.is_empty() {
            return;
        }
        self.location = Some(id.clone());
        self.views.recipe.render_spinner();

        // Mark the selected result without repainting the lists. A region
        // showing a placeholder keeps it.
        if self.views.results.shows_data() {
            let page = self.current_previews();
            self.views.results.update(&page);
        }
        if self.views.bookmarks.shows_data() {
            self.views
                .bookmarks
                .update(&PreviewList::from_recipes(self.store.bookmarks(), Some(&id)));
        }

        match self.store.load_recipe(&id).await {
            Ok(recipe) => self.views.recipe.render(recipe),
            Err(e) => {
                error!("Could not show recipe {}: {}", id, e);
                self.views.recipe.render_error(None);
            }
        }
    }

    async fn control_search(&mut self, query: &str) {
        self.views.results.render_spinner();
        if let Err(e) = self.store.load_search_results(query).await {
            warn!("Search failed: {}", e);
            self.views.results.render_error(Some(&e.to_string()));
            self.views.pagination.clear();
            return;
        }
        let page = self.current_previews();
        self.views.results.render(&page);
        self.views.pagination.render(self.store.search());
    }

    fn control_pagination(&mut self, page: usize) {
        let items = self.store.results_page(page).to_vec();
        let list = PreviewList::new(items, self.location.as_deref());
        self.views.results.render(&list);
        self.views.pagination.render(self.store.search());
    }

    fn control_servings(&mut self, servings: u32) {
        if let Err(e) = self.store.update_servings(servings) {
            warn!("Servings not updated: {}", e);
            self.views.recipe.render_error(Some(&e.to_string()));
            return;
        }
        if let Some(recipe) = self.store.recipe() {
            self.views.recipe.update(recipe);
        }
    }

    fn control_bookmark(&mut self) {
        if let Err(e) = self.store.toggle_bookmark() {
            error!("Bookmark not changed: {}", e);
            self.views.bookmarks.render_error(Some(&e.to_string()));
            return;
        }
        if let Some(recipe) = self.store.recipe() {
            self.views.recipe.update(recipe);
        }
        self.render_bookmarks();
    }

    async fn control_upload(&mut self, draft: &RecipeDraft) {
        self.views.add_recipe.render_spinner();
        let id = match self.store.upload_recipe(draft).await {
            Ok(recipe) => {
                self.views.recipe.render(recipe);
                recipe.id.clone()
            }
            Err(e) => {
                error!("Upload failed: {}", e);
                self.views.add_recipe.render_error(Some(&e.to_string()));
                return;
            }
        };
        self.views.add_recipe.render_message(None);
        self.location = Some(id);
        self.render_bookmarks();
    }

    fn render_bookmarks(&self) {
        self.views.bookmarks.render(&PreviewList::from_recipes(
            self.store.bookmarks(),
            self.location.as_deref(),
        ));
    }

    fn current_previews(&mut self) -> PreviewList {
        let items = self.store.current_results_page().to_vec();
        PreviewList::new(items, self.location.as_deref())
    }
}
