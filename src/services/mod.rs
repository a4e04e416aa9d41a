pub mod carousel;
pub mod catalog;
pub mod dispatch;
pub mod feed;
pub mod render;
pub mod visitor_state;

pub use carousel::{CarouselEngine, Direction, ScrollState};
pub use catalog::CatalogCache;
pub use dispatch::{classify, EventDispatcher, HostEvent, Interaction, InteractionHandler};
pub use feed::{CatalogFeed, HttpCatalogFeed};
pub use render::{render_tile, render_tiles, PriceText, PriceView, TileView};
pub use visitor_state::VisitorStateStore;
