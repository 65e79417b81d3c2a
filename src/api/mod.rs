mod http;

pub use http::HttpRecipeApi;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::search::RecipeSummary;

/// Full detail for one recipe as returned by the detail endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    pub source_url: String,
    /// Raw ingredient text, one entry per line
    pub ingredients: Vec<String>,
}

/// Access to the external recipe search and detail endpoints
///
/// Every call is a single attempt: no retry, no caching.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Search recipes; results keep the order the endpoint returned them in
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, FetchError>;

    /// Fetch the detail of one recipe
    async fn recipe(&self, id: &str) -> Result<RecipeDetail, FetchError>;
}
