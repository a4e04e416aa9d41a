use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;
use url::Url;

use crate::config::WidgetConfig;
use crate::db::KeyValueStore;
use crate::error::AppResult;
use crate::host::{CarouselShell, HostPage, LocationProvider, MountPoint, TrackLayout};
use crate::models::{CatalogSnapshot, Rating};
use crate::services::{
    render_tile, render_tiles, CarouselEngine, CatalogCache, CatalogFeed, Direction,
    EventDispatcher, HostEvent, Interaction, InteractionHandler, VisitorStateStore,
};
use crate::services::dispatch::PointerEvent;

/// Host capabilities handed to the widget at activation
pub struct WidgetDeps {
    pub location: Box<dyn LocationProvider>,
    pub store: Rc<dyn KeyValueStore>,
    pub feed: Box<dyn CatalogFeed>,
    pub page: Box<dyn HostPage>,
    pub track: Box<dyn TrackLayout>,
}

/// The carousel and everything it owns
///
/// Built once per page activation. All state is owned here and lent to the
/// components that need it; nothing is shared globally.
pub struct Widget {
    catalog: Option<CatalogCache>,
    snapshot: CatalogSnapshot,
    visitor: VisitorStateStore,
    engine: CarouselEngine,
    page: Box<dyn HostPage>,
    dispatcher: EventDispatcher,
}

/// Whether the widget should run on `url`
pub fn is_target_page(config: &WidgetConfig, url: &Url) -> bool {
    url.origin().ascii_serialization() == config.origin && url.path() == config.path
}

impl Widget {
    /// Checks the page, loads visitor state and mounts the empty carousel
    ///
    /// Returns `None` on any other page. The catalog is not resolved yet; call
    /// [`Widget::load_catalog`] or let [`Widget::run`] resolve it.
    pub fn mount(config: &WidgetConfig, deps: WidgetDeps) -> Option<Self> {
        let url = deps.location.current_url();
        if !is_target_page(config, &url) {
            tracing::info!(url = %url, "Not the target page, widget stays inert");
            return None;
        }

        let visitor = VisitorStateStore::load(deps.store.clone());

        let mut page = deps.page;
        let mount = if page.has_anchor(&config.anchor_selector) {
            MountPoint::BeforeAnchor(config.anchor_selector.clone())
        } else {
            tracing::info!(
                anchor = %config.anchor_selector,
                "Insertion anchor missing, appending to document end"
            );
            MountPoint::DocumentEnd
        };
        page.mount_shell(&CarouselShell {
            title: config.title.clone(),
            mount,
        });

        Some(Self {
            catalog: Some(CatalogCache::new(deps.store, deps.feed)),
            snapshot: CatalogSnapshot::empty(),
            visitor,
            engine: CarouselEngine::new(deps.track),
            page,
            dispatcher: EventDispatcher::new(Duration::from_millis(config.resize_debounce_ms)),
        })
    }

    /// Mounts the widget and waits for the catalog before returning
    pub async fn activate(config: &WidgetConfig, deps: WidgetDeps) -> Option<Self> {
        let mut widget = Self::mount(config, deps)?;
        widget.load_catalog().await;
        Some(widget)
    }

    /// Resolves the catalog and renders every tile; later calls do nothing
    pub async fn load_catalog(&mut self) {
        if let Some(cache) = self.catalog.take() {
            let snapshot = cache.get().await;
            self.install_catalog(snapshot);
        }
    }

    fn install_catalog(&mut self, snapshot: CatalogSnapshot) {
        self.snapshot = snapshot;
        if self.snapshot.is_empty() {
            tracing::info!("Catalog is empty, carousel stays blank");
            return;
        }

        let tiles = render_tiles(&self.snapshot, self.visitor.wishlist(), self.visitor.ratings());
        self.page.render_tiles(&tiles);
        tracing::info!(tiles = tiles.len(), "Rendered carousel");
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    pub fn visitor(&self) -> &VisitorStateStore {
        &self.visitor
    }

    pub fn engine(&self) -> &CarouselEngine {
        &self.engine
    }

    /// Routes a click to the wishlist, rating or navigation handler
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<Interaction> {
        let mut router = Router {
            snapshot: &self.snapshot,
            visitor: &mut self.visitor,
            engine: &mut self.engine,
            page: self.page.as_mut(),
        };
        self.dispatcher.dispatch(event, &mut router)
    }

    /// Processes host events until the host closes the channel
    ///
    /// If the catalog has not been resolved yet, it is fetched while events
    /// keep being handled, and the tiles are rendered once it settles.
    pub async fn run(&mut self, mut events: mpsc::UnboundedReceiver<HostEvent>) {
        let pending = self.catalog.take();
        let mut fetching = pending.is_some();
        let fetch = async move {
            match pending {
                Some(cache) => Some(cache.get().await),
                None => None,
            }
        };
        tokio::pin!(fetch);

        loop {
            tokio::select! {
                snapshot = &mut fetch, if fetching => {
                    fetching = false;
                    if let Some(snapshot) = snapshot {
                        self.install_catalog(snapshot);
                    }
                }
                event = events.recv() => match event {
                    Some(HostEvent::Pointer(pointer)) => {
                        self.handle_pointer(&pointer);
                    }
                    Some(HostEvent::Resize) => self.dispatcher.on_resize(),
                    None => {
                        tracing::debug!("Host closed the event channel");
                        break;
                    }
                },
                Some(()) = self.dispatcher.snap_due() => self.engine.snap_to_grid(),
            }
        }
    }
}

/// Borrowed view of the widget that carries out classified interactions
struct Router<'a> {
    snapshot: &'a CatalogSnapshot,
    visitor: &'a mut VisitorStateStore,
    engine: &'a mut CarouselEngine,
    page: &'a mut dyn HostPage,
}

impl Router<'_> {
    /// Re-renders one tile from current visitor state
    fn refresh_tile(&mut self, product_id: &str) {
        match self.snapshot.find(product_id) {
            Some(product) => {
                let tile = render_tile(product, self.visitor.wishlist(), self.visitor.ratings());
                self.page.update_tile(&tile);
            }
            None => tracing::debug!(product_id = %product_id, "No rendered tile to refresh"),
        }
    }
}

impl InteractionHandler for Router<'_> {
    fn toggle_wishlist(&mut self, product_id: &str) -> AppResult<()> {
        let result = self.visitor.toggle_wishlist(product_id);
        self.refresh_tile(product_id);
        result.map(|_| ())
    }

    fn set_rating(&mut self, product_id: &str, rating: Rating) -> AppResult<()> {
        let result = self.visitor.set_rating(product_id, rating);
        self.refresh_tile(product_id);
        result
    }

    fn navigate(&mut self, direction: Direction) -> AppResult<()> {
        self.engine.scroll_by(direction);
        Ok(())
    }
}
