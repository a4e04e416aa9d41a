use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// A product tile in the carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "img", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
}

impl Product {
    /// True when an original price is present and greater than the current price
    pub fn is_discounted(&self) -> bool {
        self.original_price
            .is_some_and(|original| original > self.price)
    }
}

/// Ordered product list, immutable once resolved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// ============================================================================
// Catalog Feed Types
// ============================================================================

/// Raw record from the catalog feed
///
/// The feed is loosely typed: ids may be numbers, prices may be numbers or
/// numeric strings, and the original price may be missing, null or empty.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedProduct {
    pub id: Value,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub original_price: Value,
}

impl TryFrom<FeedProduct> for Product {
    type Error = AppError;

    fn try_from(raw: FeedProduct) -> Result<Self, Self::Error> {
        let id = match raw.id {
            Value::String(s) if !s.is_empty() => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(AppError::ExternalApi(format!(
                    "Invalid product id: {}",
                    other
                )))
            }
        };

        let price = parse_decimal(&raw.price)?
            .ok_or_else(|| AppError::ExternalApi(format!("Product {} has no price", id)))?;
        let original_price = parse_decimal(&raw.original_price)?;

        Ok(Product {
            id,
            url: raw.url,
            image_url: raw.img,
            name: raw.name,
            brand: raw.brand,
            price,
            original_price,
        })
    }
}

/// Decodes a price given as a JSON number or numeric string
///
/// Null and blank strings decode to `None`.
fn parse_decimal(value: &Value) -> Result<Option<Decimal>, AppError> {
    let text = match value {
        Value::Null => return Ok(None),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(AppError::ExternalApi(format!(
                "Invalid price value: {}",
                other
            )))
        }
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|e| AppError::ExternalApi(format!("Invalid price {:?}: {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn decode(value: Value) -> Result<Product, AppError> {
        let raw: FeedProduct = serde_json::from_value(value).unwrap();
        Product::try_from(raw)
    }

    #[test]
    fn test_feed_product_with_string_prices() {
        let product = decode(json!({
            "id": "1",
            "name": "Toy",
            "brand": "Acme",
            "price": "80.00",
            "original_price": "100.00"
        }))
        .unwrap();

        assert_eq!(product.id, "1");
        assert_eq!(product.price, Decimal::new(8000, 2));
        assert_eq!(product.original_price, Some(Decimal::new(10000, 2)));
        assert!(product.is_discounted());
    }

    #[test]
    fn test_feed_product_with_numeric_id_and_prices() {
        let product = decode(json!({
            "id": 42,
            "price": 333.33,
            "original_price": 499.99
        }))
        .unwrap();

        assert_eq!(product.id, "42");
        assert_eq!(product.price, Decimal::new(33333, 2));
        assert_eq!(product.original_price, Some(Decimal::new(49999, 2)));
        assert_eq!(product.url, None);
    }

    #[test]
    fn test_feed_product_blank_original_price_is_absent() {
        let product = decode(json!({ "id": "7", "price": 10, "original_price": "" })).unwrap();
        assert_eq!(product.original_price, None);
        assert!(!product.is_discounted());

        let product = decode(json!({ "id": "7", "price": 10, "original_price": null })).unwrap();
        assert_eq!(product.original_price, None);
    }

    #[test]
    fn test_feed_product_equal_prices_not_discounted() {
        let product = decode(json!({ "id": "7", "price": "10", "original_price": "10.00" })).unwrap();
        assert!(!product.is_discounted());
    }

    #[test]
    fn test_feed_product_rejects_missing_price() {
        assert!(decode(json!({ "id": "7" })).is_err());
        assert!(decode(json!({ "id": "7", "price": "abc" })).is_err());
    }

    #[test]
    fn test_feed_product_rejects_missing_id() {
        assert!(decode(json!({ "id": null, "price": 1 })).is_err());
        assert!(decode(json!({ "id": "", "price": 1 })).is_err());
    }

    #[test]
    fn test_snapshot_serde_round_trip() {
        let snapshot = CatalogSnapshot::new(vec![
            decode(json!({ "id": "1", "price": "80.00", "original_price": "100.00", "url": "https://x/1" }))
                .unwrap(),
            decode(json!({ "id": "2", "price": 1499.5, "img": "https://x/2.png" })).unwrap(),
        ]);

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: CatalogSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
        assert_eq!(restored.find("2").unwrap().image_url.as_deref(), Some("https://x/2.png"));
    }
}
