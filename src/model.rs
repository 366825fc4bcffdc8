use serde::{Deserialize, Serialize};

/// A single ingredient line. `quantity` stays unrounded until display time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: String,
    pub description: String,
}

/// A full recipe as held in application state and in bookmark snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image: String,
    pub source_url: String,
    pub servings: u32,
    pub cooking_time: f64,
    pub ingredients: Vec<Ingredient>,
    /// Ownership key, present only on user-submitted recipes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Derived from bookmark membership, never persisted
    #[serde(skip)]
    pub bookmarked: bool,
}

impl Recipe {
    /// Rescale every quantity from the current servings to `new_servings`.
    ///
    /// The ratio is taken before `servings` is overwritten, so each quantity is
    /// scaled exactly once.
    ///
    /// A recipe stored with zero servings has no ratio to scale by; only its
    /// servings count changes.
    pub fn rescale(&mut self, new_servings: u32) {
        if self.servings == 0 {
            self.servings = new_servings;
            return;
        }
        let old_servings = f64::from(self.servings);
        let new = f64::from(new_servings);
        for ingredient in &mut self.ingredients {
            if let Some(quantity) = ingredient.quantity.as_mut() {
                *quantity = *quantity * new / old_servings;
            }
        }
        self.servings = new_servings;
    }

    pub fn is_user_recipe(&self) -> bool {
        self.key.is_some()
    }
}

/// Projection of a recipe used by result and bookmark lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl From<&Recipe> for SearchResult {
    fn from(recipe: &Recipe) -> Self {
        SearchResult {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            publisher: recipe.publisher.clone(),
            image: recipe.image.clone(),
            key: recipe.key.clone(),
        }
    }
}

/// Search query, its results in server order and the current page
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResult>,
    /// 1-indexed
    pub page: usize,
    pub results_per_page: usize,
}

impl SearchState {
    pub fn new(results_per_page: usize) -> Self {
        SearchState {
            query: String::new(),
            results: Vec::new(),
            page: 1,
            results_per_page,
        }
    }

    /// Number of pages needed for the current results (0 when there are none)
    pub fn num_pages(&self) -> usize {
        self.results.len().div_ceil(self.results_per_page.max(1))
    }

    /// Results on `page`, clamped to the bounds of `results`
    pub fn slice(&self, page: usize) -> &[SearchResult] {
        if page == 0 {
            return &[];
        }
        let len = self.results.len();
        let start = (page - 1).saturating_mul(self.results_per_page).min(len);
        let end = page.saturating_mul(self.results_per_page).min(len);
        &self.results[start..end]
    }
}

/// Recipe body sent to the upload endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecipe {
    pub title: String,
    pub source_url: String,
    pub image_url: String,
    pub publisher: String,
    pub cooking_time: f64,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
}
