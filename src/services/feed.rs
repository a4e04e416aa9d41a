//! Remote catalog feed
//!
//! One GET returning a JSON array of product records. Records that cannot be
//! decoded are skipped; anything that is not an array is an error.

use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{FeedProduct, Product},
};

/// Source of the product list
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogFeed: Send + Sync {
    async fn fetch_products(&self) -> AppResult<Vec<Product>>;

    /// Feed name for logging
    fn name(&self) -> &'static str;
}

#[derive(Clone)]
pub struct HttpCatalogFeed {
    http_client: HttpClient,
    feed_url: String,
}

impl HttpCatalogFeed {
    pub fn new(feed_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            feed_url,
        }
    }
}

#[async_trait::async_trait]
impl CatalogFeed for HttpCatalogFeed {
    async fn fetch_products(&self) -> AppResult<Vec<Product>> {
        let response = self.http_client.get(&self.feed_url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog feed returned status {}: {}",
                status, body
            )));
        }

        let payload: Value = response.json().await?;
        decode_products(payload)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Decodes a feed payload, skipping records that do not decode
pub fn decode_products(payload: Value) -> AppResult<Vec<Product>> {
    let Value::Array(records) = payload else {
        return Err(AppError::ExternalApi(
            "Invalid catalog feed format: expected an array".to_string(),
        ));
    };

    let total = records.len();
    let products: Vec<Product> = records
        .into_iter()
        .filter_map(|record| {
            serde_json::from_value::<FeedProduct>(record)
                .map_err(AppError::from)
                .and_then(Product::try_from)
                .map_err(|e| tracing::warn!(error = %e, "Skipping undecodable catalog record"))
                .ok()
        })
        .collect();

    tracing::info!(
        received = total,
        decoded = products.len(),
        "Decoded catalog feed"
    );

    Ok(products)
}
