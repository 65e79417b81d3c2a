//! Orchestrates searches, recipe loading, the shopping list and likes in
//! response to [`Command`]s.
//!
//! Fetches run without holding the state lock, so several flows can be in
//! flight at once. Each search and recipe flow takes a generation number
//! when it starts and only commits its result if no newer flow of the same
//! kind has started since.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{Mutex, MutexGuard};

use crate::api::RecipeApi;
use crate::likes::LikesStore;
use crate::recipe::{Recipe, ServingsChange};
use crate::search::Search;
use crate::shopping_list::{ItemId, ShoppingList};
use crate::storage::KeyValueStore;
use crate::view::{Panel, View};

/// Input the application reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Run a new search with the given text
    SubmitSearch(String),
    /// Show another page of the current search results
    GoToPage(usize),
    /// Load the recipe named by a locator such as `#47746`
    Navigate(String),
    ChangeServings(ServingsChange),
    /// Add every ingredient of the current recipe to the shopping list
    AddToList,
    ToggleLike,
    UpdateCount(ItemId, f64),
    DeleteItem(ItemId),
}

/// Everything the application currently holds
#[derive(Default)]
pub struct AppState {
    pub search: Option<Search>,
    pub recipe: Option<Recipe>,
    pub list: Option<ShoppingList>,
    pub likes: Option<LikesStore>,
    search_generation: u64,
    recipe_generation: u64,
}

pub struct App {
    state: Mutex<AppState>,
    api: Arc<dyn RecipeApi>,
    view: Arc<dyn View>,
    storage: Arc<dyn KeyValueStore>,
}

impl App {
    pub fn new(
        api: Arc<dyn RecipeApi>,
        view: Arc<dyn View>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            state: Mutex::new(AppState::default()),
            api,
            view,
            storage,
        }
    }

    /// Lock and inspect the application state
    pub async fn state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().await
    }

    /// Restore persisted likes and show them
    pub async fn start(&self) {
        let mut likes = LikesStore::new(self.storage.clone());
        likes.read_storage().await;

        self.view.set_like_count(likes.num_likes());
        for like in likes.likes() {
            self.view.render_like(like);
        }

        self.state.lock().await.likes = Some(likes);
    }

    /// Handle one command; failures are reported through the view
    pub async fn dispatch(&self, command: Command) {
        debug!("Dispatching {:?}", command);
        match command {
            Command::SubmitSearch(query) => self.control_search(&query).await,
            Command::GoToPage(page) => self.go_to_page(page).await,
            Command::Navigate(locator) => self.control_recipe(&locator).await,
            Command::ChangeServings(change) => self.change_servings(change).await,
            Command::AddToList => self.control_list().await,
            Command::ToggleLike => self.control_like().await,
            Command::UpdateCount(id, quantity) => self.update_count(&id, quantity).await,
            Command::DeleteItem(id) => self.delete_item(&id).await,
        }
    }

    async fn control_search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            debug!("Ignoring empty search");
            return;
        }

        let generation = {
            let mut state = self.state.lock().await;
            state.search_generation += 1;
            state.search_generation
        };
        self.view.show_loading(Panel::SearchResults);

        let mut search = Search::new(query);
        let result = search.get_results(self.api.as_ref()).await;

        let mut state = self.state.lock().await;
        if state.search_generation != generation {
            debug!("Discarding stale results for {:?}", query);
            return;
        }
        self.view.hide_loading(Panel::SearchResults);

        match result {
            Ok(()) => {
                info!("Found {} recipes for {:?}", search.results.len(), query);
                self.view.render_search_results(&search.results, 1);
                state.search = Some(search);
            }
            Err(e) => {
                warn!("Search for {:?} failed: {}", query, e);
                self.view.alert("Something went wrong with the search...");
            }
        }
    }

    async fn go_to_page(&self, page: usize) {
        let state = self.state.lock().await;
        match &state.search {
            Some(search) => self.view.render_search_results(&search.results, page),
            None => debug!("No search to page through"),
        }
    }

    async fn control_recipe(&self, locator: &str) {
        let Some(id) = recipe_id_from_locator(locator) else {
            debug!("No recipe id in {:?}", locator);
            return;
        };

        let generation = {
            let mut state = self.state.lock().await;
            state.recipe_generation += 1;
            if state.search.is_some() {
                self.view.highlight_selected(&id);
            }
            state.recipe_generation
        };
        self.view.show_loading(Panel::Recipe);

        let mut recipe = Recipe::new(id.as_str());
        let result = recipe.get_recipe(self.api.as_ref()).await;

        let mut state = self.state.lock().await;
        if state.recipe_generation != generation {
            debug!("Discarding stale recipe {}", id);
            return;
        }
        self.view.hide_loading(Panel::Recipe);

        match result {
            Ok(()) => {
                recipe.parse_ingredients();
                recipe.calc_time();
                recipe.calc_servings();

                let is_liked = state
                    .likes
                    .as_ref()
                    .is_some_and(|likes| likes.is_liked(&id));
                self.view.render_recipe(&recipe, is_liked);
                state.recipe = Some(recipe);
            }
            Err(e) => {
                warn!("Loading recipe {} failed: {}", id, e);
                self.view.alert("Error processing recipe!");
            }
        }
    }

    async fn change_servings(&self, change: ServingsChange) {
        let mut state = self.state.lock().await;
        let Some(recipe) = state.recipe.as_mut() else {
            return;
        };
        if change == ServingsChange::Decrease && recipe.servings <= 1 {
            return;
        }
        if recipe.update_servings(change) {
            self.view.update_servings(recipe);
        }
    }

    async fn control_list(&self) {
        let mut state = self.state.lock().await;
        let AppState { recipe, list, .. } = &mut *state;
        let Some(recipe) = recipe.as_ref() else {
            debug!("No recipe to add to the shopping list");
            return;
        };

        let list = list.get_or_insert_with(ShoppingList::new);
        for ingredient in &recipe.ingredients {
            let item = list.add_item(
                ingredient.quantity,
                ingredient.unit.clone(),
                ingredient.name.clone(),
            );
            self.view.render_shopping_item(item);
        }
    }

    async fn control_like(&self) {
        let mut state = self.state.lock().await;
        let AppState { recipe, likes, .. } = &mut *state;
        let Some(recipe) = recipe.as_ref() else {
            debug!("No recipe to like");
            return;
        };
        let likes = likes.get_or_insert_with(|| LikesStore::new(self.storage.clone()));

        if likes.is_liked(&recipe.id) {
            likes.delete_like(&recipe.id).await;
            self.view.set_like_button(false);
            self.view.remove_like(&recipe.id);
        } else {
            let like = likes
                .add_like(
                    recipe.id.as_str(),
                    recipe.title.as_str(),
                    recipe.author.as_str(),
                    recipe.img.as_str(),
                )
                .await;
            self.view.set_like_button(true);
            self.view.render_like(&like);
        }
        self.view.set_like_count(likes.num_likes());
    }

    async fn update_count(&self, id: &ItemId, quantity: f64) {
        let mut state = self.state.lock().await;
        let updated = state
            .list
            .as_mut()
            .is_some_and(|list| list.update_count(id, quantity));
        if !updated {
            debug!("No shopping item {}", id);
        }
    }

    async fn delete_item(&self, id: &ItemId) {
        let mut state = self.state.lock().await;
        let removed = state.list.as_mut().and_then(|list| list.delete_item(id));
        match removed {
            Some(_) => self.view.remove_shopping_item(id),
            None => debug!("No shopping item {}", id),
        }
    }
}

/// Recipe id carried by a locator: the text after the last `#`, or the
/// whole locator when it has none
pub fn recipe_id_from_locator(locator: &str) -> Option<String> {
    let id = locator
        .rsplit_once('#')
        .map_or(locator, |(_, fragment)| fragment)
        .trim();
    (!id.is_empty()).then(|| id.to_string())
}
