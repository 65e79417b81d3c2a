#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use recipe_planner::{
    App, FetchError, ItemId, KeyValueStore, LikedRecipe, MemoryStore, Panel, Recipe, RecipeApi,
    RecipeDetail, RecipeSummary, ShoppingItem, View,
};
use tokio::sync::Notify;

/// Holds a request until the test releases it
#[derive(Default)]
pub struct Gate {
    pub started: Notify,
    pub release: Notify,
}

/// In-memory [`RecipeApi`] with canned answers
#[derive(Default)]
pub struct StubApi {
    searches: HashMap<String, Vec<RecipeSummary>>,
    recipes: HashMap<String, RecipeDetail>,
    gates: HashMap<String, Arc<Gate>>,
    pub search_calls: Mutex<Vec<String>>,
    pub recipe_calls: Mutex<Vec<String>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: &str, results: Vec<RecipeSummary>) -> Self {
        self.searches.insert(query.to_string(), results);
        self
    }

    pub fn with_recipe(mut self, detail: RecipeDetail) -> Self {
        self.recipes.insert(detail.id.clone(), detail);
        self
    }

    /// Make requests for `key` (a query or a recipe id) wait on the gate
    pub fn gated(mut self, key: &str, gate: Arc<Gate>) -> Self {
        self.gates.insert(key.to_string(), gate);
        self
    }

    pub fn search_count(&self) -> usize {
        self.search_calls.lock().unwrap().len()
    }

    async fn wait_for_gate(&self, key: &str) {
        if let Some(gate) = self.gates.get(key) {
            gate.started.notify_one();
            gate.release.notified().await;
        }
    }
}

fn not_found(what: &str) -> FetchError {
    FetchError::Status {
        status: 404,
        url: format!("stub://{what}"),
    }
}

#[async_trait]
impl RecipeApi for StubApi {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, FetchError> {
        self.search_calls.lock().unwrap().push(query.to_string());
        self.wait_for_gate(query).await;
        self.searches.get(query).cloned().ok_or_else(|| not_found(query))
    }

    async fn recipe(&self, id: &str) -> Result<RecipeDetail, FetchError> {
        self.recipe_calls.lock().unwrap().push(id.to_string());
        self.wait_for_gate(id).await;
        self.recipes.get(id).cloned().ok_or_else(|| not_found(id))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ShowLoading(Panel),
    HideLoading(Panel),
    SearchResults { ids: Vec<String>, page: usize },
    Highlight(String),
    Recipe { id: String, title: String, liked: bool },
    Servings(u32),
    ShoppingItem(ItemId),
    RemoveItem(ItemId),
    Like(String),
    RemoveLike(String),
    LikeButton(bool),
    LikeCount(usize),
    Alert(String),
}

/// [`View`] that records every call
#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<Event>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn rendered_recipes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Recipe { id, .. } => Some(id),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl View for RecordingView {
    fn show_loading(&self, panel: Panel) {
        self.push(Event::ShowLoading(panel));
    }

    fn hide_loading(&self, panel: Panel) {
        self.push(Event::HideLoading(panel));
    }

    fn render_search_results(&self, results: &[RecipeSummary], page: usize) {
        self.push(Event::SearchResults {
            ids: results.iter().map(|r| r.id.clone()).collect(),
            page,
        });
    }

    fn highlight_selected(&self, id: &str) {
        self.push(Event::Highlight(id.to_string()));
    }

    fn render_recipe(&self, recipe: &Recipe, is_liked: bool) {
        self.push(Event::Recipe {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            liked: is_liked,
        });
    }

    fn update_servings(&self, recipe: &Recipe) {
        self.push(Event::Servings(recipe.servings));
    }

    fn render_shopping_item(&self, item: &ShoppingItem) {
        self.push(Event::ShoppingItem(item.id));
    }

    fn remove_shopping_item(&self, id: &ItemId) {
        self.push(Event::RemoveItem(*id));
    }

    fn render_like(&self, like: &LikedRecipe) {
        self.push(Event::Like(like.id.clone()));
    }

    fn remove_like(&self, id: &str) {
        self.push(Event::RemoveLike(id.to_string()));
    }

    fn set_like_button(&self, liked: bool) {
        self.push(Event::LikeButton(liked));
    }

    fn set_like_count(&self, count: usize) {
        self.push(Event::LikeCount(count));
    }

    fn alert(&self, message: &str) {
        self.push(Event::Alert(message.to_string()));
    }
}

pub fn summary(id: &str, title: &str) -> RecipeSummary {
    RecipeSummary {
        id: id.to_string(),
        title: title.to_string(),
        author: "Closet Cooking".to_string(),
        img: format!("http://img.example/{id}.jpg"),
    }
}

pub fn detail(id: &str, title: &str, ingredients: &[&str]) -> RecipeDetail {
    RecipeDetail {
        id: id.to_string(),
        title: title.to_string(),
        author: "The Pioneer Woman".to_string(),
        img: format!("http://img.example/{id}.jpg"),
        source_url: format!("http://source.example/{id}"),
        ingredients: ingredients.iter().map(|l| l.to_string()).collect(),
    }
}

pub struct Harness {
    pub app: App,
    pub api: Arc<StubApi>,
    pub view: Arc<RecordingView>,
    pub storage: Arc<MemoryStore>,
}

pub fn harness(api: StubApi) -> Harness {
    harness_with_storage(api, Arc::new(MemoryStore::new()))
}

pub fn harness_with_storage(api: StubApi, storage: Arc<MemoryStore>) -> Harness {
    let api = Arc::new(api);
    let view = Arc::new(RecordingView::default());
    let app = App::new(api.clone(), view.clone(), storage.clone());
    Harness {
        app,
        api,
        view,
        storage,
    }
}

pub async fn stored_like_ids(storage: &MemoryStore) -> Vec<String> {
    let raw = storage
        .get(recipe_planner::likes::LIKES_KEY)
        .await
        .unwrap()
        .unwrap_or_else(|| "[]".to_string());
    let likes: Vec<LikedRecipe> = serde_json::from_str(&raw).unwrap();
    likes.into_iter().map(|l| l.id).collect()
}
