use crate::api::RecipeApi;
use crate::error::FetchError;

/// Lightweight search hit, before full detail is fetched
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
}

/// One search query and the results it produced
#[derive(Debug, Clone)]
pub struct Search {
    pub query: String,
    pub results: Vec<RecipeSummary>,
}

impl Search {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
        }
    }

    /// Run the query once against the search endpoint
    ///
    /// On failure `results` is left as it was.
    pub async fn get_results(&mut self, api: &dyn RecipeApi) -> Result<(), FetchError> {
        self.results = api.search(&self.query).await?;
        Ok(())
    }
}

/// Slice of `items` for a 1-based `page`; empty when the page is out of range
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

pub fn page_count(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(paginate(&items, 1, 10), &items[0..10]);
        assert_eq!(paginate(&items, 3, 10), &[21, 22, 23, 24, 25]);
        assert!(paginate(&items, 4, 10).is_empty());
        assert!(paginate(&items, 0, 10).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 0);
    }
}
