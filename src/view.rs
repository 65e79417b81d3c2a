use crate::likes::LikedRecipe;
use crate::recipe::Recipe;
use crate::search::RecipeSummary;
use crate::shopping_list::{ItemId, ShoppingItem};

/// Area of the screen a loading indicator is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    SearchResults,
    Recipe,
}

/// Rendering collaborator driven by the controller
///
/// Implementations only display what they are given; they never reach back
/// into application state.
pub trait View: Send + Sync {
    fn show_loading(&self, panel: Panel);
    fn hide_loading(&self, panel: Panel);

    /// Render the given 1-based page of `results`
    fn render_search_results(&self, results: &[RecipeSummary], page: usize);
    fn highlight_selected(&self, id: &str);

    fn render_recipe(&self, recipe: &Recipe, is_liked: bool);
    fn update_servings(&self, recipe: &Recipe);

    fn render_shopping_item(&self, item: &ShoppingItem);
    fn remove_shopping_item(&self, id: &ItemId);

    fn render_like(&self, like: &LikedRecipe);
    fn remove_like(&self, id: &str);
    fn set_like_button(&self, liked: bool);
    fn set_like_count(&self, count: usize);

    /// Tell the user something went wrong
    fn alert(&self, message: &str);
}
