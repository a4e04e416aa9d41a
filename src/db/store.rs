use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppResult;

/// The three independently persisted entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Catalog,
    Wishlist,
    Ratings,
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Catalog => write!(f, "eb_reel_cached_products"),
            StorageKey::Wishlist => write!(f, "eb_reel_user_wishlist"),
            StorageKey::Ratings => write!(f, "eb_reel_user_ratings"),
        }
    }
}

/// Persistent string key-value storage supplied by the host
///
/// Writes are synchronous and last-write-wins. Nothing in the widget ever
/// deletes an entry.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

/// Reads and decodes a JSON entry
///
/// Missing entries, unreadable storage and corrupt JSON all yield `None` so
/// callers can fall back to their documented default.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: StorageKey) -> Option<T> {
    let raw = match store.get(&key.to_string()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, key = %key, "Failed to read persisted entry");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, key = %key, "Discarding corrupt persisted entry");
            None
        }
    }
}

/// Encodes a value as JSON and writes it under `key`
pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: StorageKey, value: &T) -> AppResult<()> {
    let json = serde_json::to_string(value)?;
    store.set(&key.to_string(), &json)?;
    tracing::debug!(key = %key, bytes = json.len(), "Persisted entry");
    Ok(())
}
