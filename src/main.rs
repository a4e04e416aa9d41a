use std::rc::Rc;

use product_reel::db::{create_redis_client, KeyValueStore, MemoryStore, RedisStore};
use product_reel::host::{HeadlessSurface, StaticLocation};
use product_reel::services::HttpCatalogFeed;
use product_reel::{Widget, WidgetConfig, WidgetDeps};
use tracing_subscriber::EnvFilter;

const VIEWPORT_WIDTH: f64 = 1440.0;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = WidgetConfig::from_env()?;

    let store: Rc<dyn KeyValueStore> = match &config.redis_url {
        Some(redis_url) => {
            tracing::info!(redis_url = %redis_url, "Using Redis storage");
            Rc::new(RedisStore::new(create_redis_client(redis_url)?))
        }
        None => {
            tracing::info!("Using in-memory storage");
            Rc::new(MemoryStore::new())
        }
    };

    let surface = HeadlessSurface::new(VIEWPORT_WIDTH).with_anchor(&config.anchor_selector);
    let deps = WidgetDeps {
        location: Box::new(StaticLocation(url::Url::parse(&config.page_url)?)),
        store,
        feed: Box::new(HttpCatalogFeed::new(config.feed_url.clone())),
        page: Box::new(surface.clone()),
        track: Box::new(surface.clone()),
    };

    let Some(widget) = Widget::activate(&config, deps).await else {
        return Ok(());
    };

    for tile in surface.tiles() {
        tracing::info!(
            id = %tile.id,
            heading = %tile.heading(),
            price = %tile.price.current(),
            badge = %tile.price.badge().unwrap_or_default(),
            stars = tile.filled_stars,
            wishlisted = tile.wishlisted,
            "Tile"
        );
    }
    tracing::info!(
        tiles = widget.snapshot().len(),
        step = widget.engine().step(),
        "Carousel ready"
    );

    Ok(())
}
