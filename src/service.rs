//! Client for the remote recipe service.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::ForkifyError;
use crate::model::{Ingredient, NewRecipe, Recipe, SearchResult};

/// Request/response API keyed by recipe id or search query
#[async_trait]
pub trait RecipeService: Send + Sync {
    async fn get_recipe(&self, id: &str) -> Result<Recipe, ForkifyError>;

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ForkifyError>;

    /// Returns the server-confirmed recipe, carrying its ownership key
    async fn upload(&self, recipe: &NewRecipe) -> Result<Recipe, ForkifyError>;
}

#[derive(Debug, Deserialize)]
struct RecipeEnvelope {
    data: RecipeData,
}

#[derive(Debug, Deserialize)]
struct RecipeData {
    recipe: ApiRecipe,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    data: SearchData,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    #[serde(default)]
    recipes: Vec<ApiSearchResult>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRecipe {
    id: String,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    source_url: String,
    #[serde(default)]
    image_url: String,
    servings: NonZeroU32,
    #[serde(default)]
    cooking_time: f64,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiSearchResult {
    id: String,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
    key: Option<String>,
}

impl From<ApiRecipe> for Recipe {
    fn from(api: ApiRecipe) -> Self {
        Recipe {
            id: api.id,
            title: api.title,
            publisher: api.publisher,
            image: api.image_url,
            source_url: api.source_url,
            servings: api.servings.get(),
            cooking_time: api.cooking_time,
            ingredients: api.ingredients,
            key: api.key,
            bookmarked: false,
        }
    }
}

impl From<ApiSearchResult> for SearchResult {
    fn from(api: ApiSearchResult) -> Self {
        SearchResult {
            id: api.id,
            title: api.title,
            publisher: api.publisher,
            image: api.image_url,
            key: api.key,
        }
    }
}

/// Which lookup a failed response belonged to; decides the error class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    ById,
    Other,
}

/// [`RecipeService`] over HTTP, every request raced against a timer
pub struct HttpRecipeService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpRecipeService {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        HttpRecipeService {
            client: Client::new(),
            base_url,
            api_key,
            timeout,
        }
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        lookup: Lookup,
    ) -> Result<T, ForkifyError> {
        let exchange = async move {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, ForkifyError>((status, body))
        };

        let (status, body) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| ForkifyError::timeout(self.timeout.as_secs().max(1)))??;
        debug!("Recipe service answered {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(failure(status, &body, lookup));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// `"{message} ({status})"`, classified by status and lookup kind
fn failure(status: StatusCode, body: &str, lookup: Lookup) -> ForkifyError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
    let detail = format!("{} ({})", message, status.as_u16());

    match (status, lookup) {
        (StatusCode::NOT_FOUND, _) | (StatusCode::BAD_REQUEST, Lookup::ById) => {
            ForkifyError::NotFoundError(detail)
        }
        _ => ForkifyError::TransportError(detail),
    }
}

#[async_trait]
impl RecipeService for HttpRecipeService {
    async fn get_recipe(&self, id: &str) -> Result<Recipe, ForkifyError> {
        let url = format!("{}{}", self.base_url, id);
        let request = self.with_key(self.client.get(url));
        let envelope: RecipeEnvelope = self.send(request, Lookup::ById).await?;
        Ok(envelope.data.recipe.into())
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ForkifyError> {
        let request = self.with_key(
            self.client
                .get(&self.base_url)
                .query(&[("search", query)]),
        );
        let envelope: SearchEnvelope = self.send(request, Lookup::Other).await?;
        Ok(envelope.data.recipes.into_iter().map(Into::into).collect())
    }

    async fn upload(&self, recipe: &NewRecipe) -> Result<Recipe, ForkifyError> {
        let request = self.with_key(self.client.post(&self.base_url).json(recipe));
        let envelope: RecipeEnvelope = self.send(request, Lookup::Other).await?;
        Ok(envelope.data.recipe.into())
    }
}
