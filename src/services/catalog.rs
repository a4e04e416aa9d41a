use std::rc::Rc;

use crate::db::{load_json, save_json, KeyValueStore, StorageKey};
use crate::models::CatalogSnapshot;
use crate::services::feed::CatalogFeed;

/// Session-scoped catalog: persisted snapshot, else one fetch, else empty
///
/// A persisted snapshot is returned as-is with no freshness check. It stays
/// until something outside the widget clears the storage entry.
pub struct CatalogCache {
    store: Rc<dyn KeyValueStore>,
    feed: Box<dyn CatalogFeed>,
}

impl CatalogCache {
    pub fn new(store: Rc<dyn KeyValueStore>, feed: Box<dyn CatalogFeed>) -> Self {
        Self { store, feed }
    }

    /// Resolves the product list
    ///
    /// Never fails: feed errors yield an empty snapshot and nothing is
    /// persisted, so the next call fetches again.
    pub async fn get(&self) -> CatalogSnapshot {
        if let Some(cached) = load_json::<CatalogSnapshot>(self.store.as_ref(), StorageKey::Catalog) {
            tracing::info!(count = cached.len(), "Using persisted catalog snapshot");
            return cached;
        }

        let products = match self.feed.fetch_products().await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %e, feed = self.feed.name(), "Catalog fetch failed, rendering nothing");
                return CatalogSnapshot::empty();
            }
        };

        let snapshot = CatalogSnapshot::new(products);
        if let Err(e) = save_json(self.store.as_ref(), StorageKey::Catalog, &snapshot) {
            tracing::error!(error = %e, "Failed to persist catalog snapshot");
        }

        tracing::info!(
            count = snapshot.len(),
            feed = self.feed.name(),
            "Fetched catalog snapshot"
        );
        snapshot
    }
}
