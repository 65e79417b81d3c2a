use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Storage key the whole likes collection is kept under
pub const LIKES_KEY: &str = "likes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedRecipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
}

/// Liked recipes, at most one per recipe id
///
/// Every mutation writes the full collection back to storage. Storage
/// failures are logged; the in-memory collection stays authoritative.
pub struct LikesStore {
    likes: Vec<LikedRecipe>,
    storage: Arc<dyn KeyValueStore>,
}

impl LikesStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            likes: Vec::new(),
            storage,
        }
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.iter().any(|like| like.id == id)
    }

    /// Add a like and persist; an id that is already liked is returned as is
    pub async fn add_like(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        img: impl Into<String>,
    ) -> LikedRecipe {
        let id = id.into();
        if let Some(existing) = self.likes.iter().find(|like| like.id == id) {
            return existing.clone();
        }

        let like = LikedRecipe {
            id,
            title: title.into(),
            author: author.into(),
            img: img.into(),
        };
        self.likes.push(like.clone());
        self.persist().await;
        like
    }

    /// Remove a like and persist; returns `false` when it was not liked
    pub async fn delete_like(&mut self, id: &str) -> bool {
        let Some(index) = self.likes.iter().position(|like| like.id == id) else {
            return false;
        };
        self.likes.remove(index);
        self.persist().await;
        true
    }

    pub fn num_likes(&self) -> usize {
        self.likes.len()
    }

    pub fn likes(&self) -> &[LikedRecipe] {
        &self.likes
    }

    /// Replace the in-memory collection with the stored one
    ///
    /// Missing or unreadable storage leaves an empty collection.
    pub async fn read_storage(&mut self) {
        self.likes = match self.load().await {
            Ok(likes) => likes,
            Err(e) => {
                warn!("Could not restore likes, starting empty: {}", e);
                Vec::new()
            }
        };
        info!("Restored {} liked recipes", self.likes.len());
    }

    async fn load(&self) -> Result<Vec<LikedRecipe>, StorageError> {
        let Some(raw) = self.storage.get(LIKES_KEY).await? else {
            return Ok(Vec::new());
        };
        let stored: Vec<LikedRecipe> = serde_json::from_str(&raw)?;

        let mut likes: Vec<LikedRecipe> = Vec::with_capacity(stored.len());
        for like in stored {
            if !likes.iter().any(|l| l.id == like.id) {
                likes.push(like);
            }
        }
        Ok(likes)
    }

    async fn persist(&self) {
        let result = match serde_json::to_string(&self.likes) {
            Ok(json) => self.storage.set(LIKES_KEY, &json).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            warn!("Failed to persist likes: {}", e);
        }
    }
}
