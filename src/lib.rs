pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod ingredients;
pub mod likes;
pub mod recipe;
pub mod search;
pub mod shopping_list;
pub mod storage;
pub mod view;

use std::sync::Arc;

use log::debug;

pub use api::{HttpRecipeApi, RecipeApi, RecipeDetail};
pub use self::config::AppConfig;
pub use controller::{recipe_id_from_locator, App, AppState, Command};
pub use error::{Error, FetchError, StorageError};
pub use ingredients::{parse_ingredient, parse_ingredients, IngredientLine};
pub use likes::{LikedRecipe, LikesStore};
pub use recipe::{Recipe, ServingsChange};
pub use search::{RecipeSummary, Search};
pub use shopping_list::{ItemId, ShoppingItem, ShoppingList};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use view::{Panel, View};

/// Build an [`App`] talking to the configured HTTP API and storing likes
/// in the configured directory
pub fn build_app(config: &AppConfig, view: Arc<dyn View>) -> Result<App, Error> {
    let api = HttpRecipeApi::new(&config.api)?;
    let storage = FileStore::new(config.storage.dir.clone());
    debug!(
        "Using API at {} with storage in {}",
        config.api.base_url,
        storage.dir().display()
    );

    Ok(App::new(Arc::new(api), view, Arc::new(storage)))
}
