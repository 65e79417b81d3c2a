use async_trait::async_trait;
use html_escape::decode_html_entities;
use log::debug;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{RecipeApi, RecipeDetail};
use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::search::RecipeSummary;

/// [`RecipeApi`] over HTTP with JSON responses
pub struct HttpRecipeApi {
    client: Client,
    search_url: Url,
    detail_url: Url,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    recipes: Vec<SummaryBody>,
}

#[derive(Debug, Deserialize)]
struct RecipeDetailResponse {
    recipe: DetailBody,
}

// Ids come back as strings from some deployments and numbers from others
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdValue {
    Text(String),
    Number(u64),
}

impl IdValue {
    fn into_string(self) -> String {
        match self {
            IdValue::Text(id) => id,
            IdValue::Number(id) => id.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    #[serde(alias = "recipe_id")]
    id: IdValue,
    title: String,
    #[serde(alias = "publisher")]
    author: String,
    #[serde(alias = "image_url")]
    img: String,
}

#[derive(Debug, Deserialize)]
struct DetailBody {
    #[serde(alias = "recipe_id")]
    id: IdValue,
    title: String,
    #[serde(alias = "publisher")]
    author: String,
    #[serde(alias = "image_url")]
    img: String,
    #[serde(default)]
    source_url: String,
    ingredients: Vec<String>,
}

impl HttpRecipeApi {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent("Mozilla/5.0 (compatible; RecipePlanner/0.1)")
            .build()?;

        Ok(Self {
            client,
            search_url: endpoint(&config.base_url, &config.search_path)?,
            detail_url: endpoint(&config.base_url, &config.detail_path)?,
            api_key: config.api_key.clone(),
        })
    }

    fn detail_url_for(&self, id: &str) -> Result<Url, FetchError> {
        let mut url = self.detail_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.detail_url.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let mut request = self.client.get(url.clone()).query(query);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        debug!("GET {}", url);
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, FetchError> {
        let response: SearchResponse = self
            .get_json(self.search_url.clone(), &[("q", query)])
            .await?;
        debug!("Search for {:?} returned {} recipes", query, response.recipes.len());

        response
            .recipes
            .into_iter()
            .map(RecipeSummary::try_from)
            .collect()
    }

    async fn recipe(&self, id: &str) -> Result<RecipeDetail, FetchError> {
        let url = self.detail_url_for(id)?;
        let response: RecipeDetailResponse = self.get_json(url, &[]).await?;
        let detail = RecipeDetail::try_from(response.recipe)?;
        debug!(
            "Recipe {} has {} ingredient lines",
            detail.id,
            detail.ingredients.len()
        );
        Ok(detail)
    }
}

impl TryFrom<SummaryBody> for RecipeSummary {
    type Error = FetchError;

    fn try_from(body: SummaryBody) -> Result<Self, Self::Error> {
        Ok(RecipeSummary {
            id: non_empty_id(body.id)?,
            title: decode_html_symbols(&body.title),
            author: decode_html_symbols(&body.author),
            img: body.img,
        })
    }
}

impl TryFrom<DetailBody> for RecipeDetail {
    type Error = FetchError;

    fn try_from(body: DetailBody) -> Result<Self, Self::Error> {
        Ok(RecipeDetail {
            id: non_empty_id(body.id)?,
            title: decode_html_symbols(&body.title),
            author: decode_html_symbols(&body.author),
            img: body.img,
            source_url: body.source_url,
            ingredients: body
                .ingredients
                .iter()
                .map(|line| decode_html_symbols(line))
                .collect(),
        })
    }
}

fn non_empty_id(id: IdValue) -> Result<String, FetchError> {
    let id = id.into_string();
    if id.trim().is_empty() {
        return Err(FetchError::Malformed("recipe without an id".to_string()));
    }
    Ok(id)
}

fn endpoint(base_url: &str, path: &str) -> Result<Url, FetchError> {
    let raw = format!("{}{}", base_url.trim_end_matches('/'), path);
    Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))
}

fn decode_html_symbols(text: &str) -> String {
    decode_html_entities(text).trim().to_string()
}
