use std::collections::{BTreeMap, BTreeSet};

mod product;
mod rating;

pub use product::{CatalogSnapshot, FeedProduct, Product};
pub use rating::Rating;

/// Product identifiers the visitor has marked as favorites
pub type WishlistSet = BTreeSet<String>;

/// Star rating per product identifier, last write wins
pub type RatingMap = BTreeMap<String, Rating>;
