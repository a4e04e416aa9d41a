use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use crate::db::{load_json, save_json, KeyValueStore, StorageKey};
use crate::error::AppResult;
use crate::models::{Rating, RatingMap, WishlistSet};

/// The visitor's wishlist and ratings, persisted on every change
pub struct VisitorStateStore {
    store: Rc<dyn KeyValueStore>,
    wishlist: WishlistSet,
    ratings: RatingMap,
}

impl VisitorStateStore {
    /// Loads both entries, defaulting to empty on absence or corruption
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let wishlist = load_wishlist(store.as_ref());
        let ratings = load_ratings(store.as_ref());

        tracing::info!(
            wishlist_count = wishlist.len(),
            ratings_count = ratings.len(),
            "Loaded visitor state"
        );

        Self {
            store,
            wishlist,
            ratings,
        }
    }

    pub fn wishlist(&self) -> &WishlistSet {
        &self.wishlist
    }

    pub fn ratings(&self) -> &RatingMap {
        &self.ratings
    }

    pub fn is_wishlisted(&self, product_id: &str) -> bool {
        self.wishlist.contains(product_id)
    }

    pub fn rating(&self, product_id: &str) -> Option<Rating> {
        self.ratings.get(product_id).copied()
    }

    /// Flips membership and persists the whole set
    ///
    /// Returns the new membership. The in-memory set is updated even if the
    /// write fails.
    pub fn toggle_wishlist(&mut self, product_id: &str) -> AppResult<bool> {
        let member = if self.wishlist.remove(product_id) {
            false
        } else {
            self.wishlist.insert(product_id.to_string());
            true
        };

        tracing::info!(product_id = %product_id, wishlisted = member, "Toggled wishlist");
        save_json(self.store.as_ref(), StorageKey::Wishlist, &self.wishlist)?;
        Ok(member)
    }

    /// Overwrites the rating for `product_id` and persists the whole map
    ///
    /// Writes even when the value is unchanged.
    pub fn set_rating(&mut self, product_id: &str, rating: Rating) -> AppResult<()> {
        self.ratings.insert(product_id.to_string(), rating);

        tracing::info!(product_id = %product_id, rating = rating.value(), "Set rating");
        save_json(self.store.as_ref(), StorageKey::Ratings, &self.ratings)
    }
}

pub fn load_wishlist(store: &dyn KeyValueStore) -> WishlistSet {
    load_json::<Vec<String>>(store, StorageKey::Wishlist)
        .map(|ids| ids.into_iter().collect())
        .unwrap_or_default()
}

/// Loads ratings, dropping individual values outside 1..=5
pub fn load_ratings(store: &dyn KeyValueStore) -> RatingMap {
    let Some(raw) = load_json::<BTreeMap<String, Value>>(store, StorageKey::Ratings) else {
        return RatingMap::new();
    };

    raw.into_iter()
        .filter_map(|(id, value)| {
            let rating = value
                .as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .and_then(|v| Rating::new(v).ok());
            if rating.is_none() {
                tracing::warn!(product_id = %id, %value, "Dropping invalid stored rating");
            }
            rating.map(|r| (id, r))
        })
        .collect()
}
