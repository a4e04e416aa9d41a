//! Product recommendation carousel for a storefront landing page.
//!
//! The widget resolves a product catalog (persisted snapshot first, network
//! second), renders it as a horizontally scrolling row of tiles, and lets the
//! visitor keep a wishlist and star ratings that persist across visits. All
//! contact with the embedding page goes through the traits in [`host`].

pub mod config;
pub mod db;
pub mod error;
pub mod host;
pub mod models;
pub mod services;
pub mod widget;

pub use config::WidgetConfig;
pub use error::{AppError, AppResult};
pub use widget::{Widget, WidgetDeps};
