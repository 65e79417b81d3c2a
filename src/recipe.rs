use crate::api::RecipeApi;
use crate::error::FetchError;
use crate::ingredients::{parse_ingredients, IngredientLine};

/// Servings assumed when the source data does not say
pub const DEFAULT_SERVINGS: u32 = 4;

/// Direction of a servings change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingsChange {
    Increase,
    Decrease,
}

/// One recipe with its fetched data and derived values
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    pub source_url: String,
    pub raw_ingredients: Vec<String>,
    pub ingredients: Vec<IngredientLine>,
    /// Zero until [`Recipe::calc_servings`] has run
    pub servings: u32,
    pub cook_time_minutes: u32,
}

impl Recipe {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            author: String::new(),
            img: String::new(),
            source_url: String::new(),
            raw_ingredients: Vec::new(),
            ingredients: Vec::new(),
            servings: 0,
            cook_time_minutes: 0,
        }
    }

    /// Fetch this recipe's detail; on failure nothing is changed
    pub async fn get_recipe(&mut self, api: &dyn RecipeApi) -> Result<(), FetchError> {
        let detail = api.recipe(&self.id).await?;
        self.title = detail.title;
        self.author = detail.author;
        self.img = detail.img;
        self.source_url = detail.source_url;
        self.raw_ingredients = detail.ingredients;
        Ok(())
    }

    pub fn parse_ingredients(&mut self) {
        self.ingredients = parse_ingredients(&self.raw_ingredients);
    }

    /// Rough estimate: 15 minutes for every 3 ingredients
    pub fn calc_time(&mut self) {
        let minutes = self.ingredients.len().saturating_mul(15) / 3;
        self.cook_time_minutes = u32::try_from(minutes).unwrap_or(u32::MAX);
    }

    pub fn calc_servings(&mut self) {
        if self.servings == 0 {
            self.servings = DEFAULT_SERVINGS;
        }
    }

    /// Move servings by one and rescale every known quantity to match
    ///
    /// Returns `false` without touching anything when decreasing from one
    /// serving or when servings have not been derived yet.
    pub fn update_servings(&mut self, change: ServingsChange) -> bool {
        let old = self.servings;
        let new = match change {
            ServingsChange::Increase if old > 0 => old.saturating_add(1),
            ServingsChange::Decrease if old > 1 => old - 1,
            _ => return false,
        };

        let ratio = f64::from(new) / f64::from(old);
        for ingredient in &mut self.ingredients {
            if let Some(quantity) = ingredient.quantity.as_mut() {
                *quantity *= ratio;
            }
        }
        self.servings = new;
        true
    }
}
