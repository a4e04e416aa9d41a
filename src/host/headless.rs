use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use url::Url;

use super::{CarouselShell, HostPage, LocationProvider, ScrollBehavior, TrackLayout};
use crate::services::carousel::Direction;
use crate::services::dispatch::{ElementNode, ElementRole, PointerEvent};
use crate::services::render::TileView;

/// A location that never changes
#[derive(Debug, Clone)]
pub struct StaticLocation(pub Url);

impl LocationProvider for StaticLocation {
    fn current_url(&self) -> Url {
        self.0.clone()
    }
}

/// One recorded scroll request, after clamping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCall {
    pub offset: f64,
    pub behavior: ScrollBehavior,
}

#[derive(Debug)]
struct SurfaceState {
    anchors: HashSet<String>,
    shell: Option<CarouselShell>,
    tiles: Vec<TileView>,
    viewport_width: f64,
    scroll_left: f64,
    scroll_calls: Vec<ScrollCall>,
}

/// In-memory page and track
///
/// Simulates the responsive flex track: column count and gap follow the
/// viewport width, tiles share the track width evenly, and scroll offsets are
/// clamped to `[0, content - viewport]`. Clones share the same state, so one
/// handle can be given to the widget as its page and another as its track
/// while a third is kept for inspection.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl HeadlessSurface {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(SurfaceState {
                anchors: HashSet::new(),
                shell: None,
                tiles: Vec::new(),
                viewport_width,
                scroll_left: 0.0,
                scroll_calls: Vec::new(),
            })),
        }
    }

    /// Adds an element the widget can mount against
    pub fn with_anchor(self, selector: &str) -> Self {
        self.state.borrow_mut().anchors.insert(selector.to_string());
        self
    }

    /// Changes the viewport width; the current offset is re-clamped but not aligned
    pub fn resize(&self, viewport_width: f64) {
        let mut state = self.state.borrow_mut();
        state.viewport_width = viewport_width;
        let clamped = clamp_offset(&state, state.scroll_left);
        state.scroll_left = clamped;
    }

    /// Moves the track as if the visitor dragged it
    pub fn drag_to(&self, offset: f64) {
        let mut state = self.state.borrow_mut();
        let clamped = clamp_offset(&state, offset);
        state.scroll_left = clamped;
    }

    pub fn shell(&self) -> Option<CarouselShell> {
        self.state.borrow().shell.clone()
    }

    pub fn tiles(&self) -> Vec<TileView> {
        self.state.borrow().tiles.clone()
    }

    pub fn tile(&self, id: &str) -> Option<TileView> {
        self.state.borrow().tiles.iter().find(|t| t.id == id).cloned()
    }

    pub fn scroll_calls(&self) -> Vec<ScrollCall> {
        self.state.borrow().scroll_calls.clone()
    }

    pub fn tile_width(&self) -> f64 {
        tile_width(self.state.borrow().viewport_width)
    }

    pub fn max_scroll(&self) -> f64 {
        max_scroll(&self.state.borrow())
    }

    // ── Pointer events shaped like the rendered markup ────────────────────

    /// Click on the heart icon inside a tile's wishlist toggle
    pub fn click_wishlist(&self, product_id: &str) -> PointerEvent {
        PointerEvent::new(vec![
            ElementNode::new(ElementRole::Other),
            ElementNode::new(ElementRole::WishlistToggle).with_data("id", product_id),
            ElementNode::new(ElementRole::ProductTile).with_data("id", product_id),
            ElementNode::new(ElementRole::Other),
        ])
    }

    /// Click on star slot `value` (1-based) inside a tile
    pub fn click_star(&self, product_id: &str, value: u8) -> PointerEvent {
        PointerEvent::new(vec![
            ElementNode::new(ElementRole::Star).with_data("value", &value.to_string()),
            ElementNode::new(ElementRole::Other).with_data("id", product_id),
            ElementNode::new(ElementRole::ProductTile).with_data("id", product_id),
            ElementNode::new(ElementRole::Other),
        ])
    }

    /// Click on the previous/next button
    pub fn click_nav(&self, direction: Direction) -> PointerEvent {
        PointerEvent::new(vec![
            ElementNode::new(ElementRole::NavButton).with_data("dir", direction.as_data()),
            ElementNode::new(ElementRole::Other),
        ])
    }

    /// Click on a tile's image, which is a plain link
    pub fn click_tile_image(&self, product_id: &str) -> PointerEvent {
        PointerEvent::new(vec![
            ElementNode::new(ElementRole::Other),
            ElementNode::new(ElementRole::ProductTile).with_data("id", product_id),
            ElementNode::new(ElementRole::Other),
        ])
    }
}

/// Columns shown at a given viewport width
fn columns(viewport_width: f64) -> f64 {
    if viewport_width < 992.0 {
        2.0
    } else if viewport_width < 1280.0 {
        3.0
    } else if viewport_width < 1480.0 {
        4.0
    } else {
        5.0
    }
}

fn gap(viewport_width: f64) -> f64 {
    if viewport_width < 576.0 {
        12.0
    } else {
        16.0
    }
}

fn tile_width(viewport_width: f64) -> f64 {
    let cols = columns(viewport_width);
    ((viewport_width - (cols - 1.0) * gap(viewport_width)) / cols).max(0.0)
}

fn max_scroll(state: &SurfaceState) -> f64 {
    let count = state.tiles.len() as f64;
    if count == 0.0 {
        return 0.0;
    }
    let width = state.viewport_width;
    let content = count * tile_width(width) + (count - 1.0) * gap(width);
    (content - width).max(0.0)
}

fn clamp_offset(state: &SurfaceState, offset: f64) -> f64 {
    offset.clamp(0.0, max_scroll(state))
}

impl HostPage for HeadlessSurface {
    fn has_anchor(&self, selector: &str) -> bool {
        self.state.borrow().anchors.contains(selector)
    }

    fn mount_shell(&mut self, shell: &CarouselShell) {
        self.state.borrow_mut().shell = Some(shell.clone());
    }

    fn render_tiles(&mut self, tiles: &[TileView]) {
        let mut state = self.state.borrow_mut();
        state.tiles = tiles.to_vec();
        let clamped = clamp_offset(&state, state.scroll_left);
        state.scroll_left = clamped;
    }

    fn update_tile(&mut self, tile: &TileView) {
        let mut state = self.state.borrow_mut();
        if let Some(existing) = state.tiles.iter_mut().find(|t| t.id == tile.id) {
            *existing = tile.clone();
        }
    }
}

impl TrackLayout for HeadlessSurface {
    fn first_tile_width(&self) -> Option<f64> {
        let state = self.state.borrow();
        if state.tiles.is_empty() {
            None
        } else {
            Some(tile_width(state.viewport_width))
        }
    }

    fn gap(&self) -> f64 {
        gap(self.state.borrow().viewport_width)
    }

    fn scroll_left(&self) -> f64 {
        self.state.borrow().scroll_left
    }

    fn scroll_by(&mut self, delta: f64, behavior: ScrollBehavior) {
        let target = self.state.borrow().scroll_left + delta;
        self.scroll_to(target, behavior);
    }

    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior) {
        let mut state = self.state.borrow_mut();
        let offset = clamp_offset(&state, offset);
        state.scroll_left = offset;
        state.scroll_calls.push(ScrollCall { offset, behavior });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::render::{PriceView, TileView};

    fn tile(id: &str) -> TileView {
        TileView {
            id: id.to_string(),
            link: "#".to_string(),
            image: String::new(),
            name: String::new(),
            brand: String::new(),
            price: PriceView::Standard(crate::services::render::format_price(
                rust_decimal::Decimal::ONE,
            )),
            filled_stars: 0,
            wishlisted: false,
        }
    }

    #[test]
    fn test_responsive_columns() {
        assert_eq!(HeadlessSurface::new(1500.0).tile_width(), (1500.0 - 4.0 * 16.0) / 5.0);
        assert_eq!(HeadlessSurface::new(1300.0).tile_width(), (1300.0 - 3.0 * 16.0) / 4.0);
        assert_eq!(HeadlessSurface::new(1000.0).tile_width(), (1000.0 - 2.0 * 16.0) / 3.0);
        assert_eq!(HeadlessSurface::new(500.0).tile_width(), (500.0 - 12.0) / 2.0);
    }

    #[test]
    fn test_empty_track_has_no_first_tile() {
        let surface = HeadlessSurface::new(1200.0);
        assert_eq!(surface.first_tile_width(), None);
        assert_eq!(surface.max_scroll(), 0.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut surface = HeadlessSurface::new(1000.0);
        let tiles: Vec<TileView> = (0..6).map(|i| tile(&i.to_string())).collect();
        surface.render_tiles(&tiles);

        surface.scroll_by(-50.0, ScrollBehavior::Smooth);
        assert_eq!(surface.scroll_left(), 0.0);

        surface.scroll_to(1.0e6, ScrollBehavior::Instant);
        assert_eq!(surface.scroll_left(), surface.max_scroll());
        assert_eq!(surface.scroll_calls().len(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let surface = HeadlessSurface::new(1000.0).with_anchor(".Section2A");
        let mut page = surface.clone();
        page.render_tiles(&[tile("a")]);
        assert_eq!(surface.tiles().len(), 1);
        assert!(surface.has_anchor(".Section2A"));
    }

    #[test]
    fn test_update_tile_ignores_unknown_id() {
        let mut surface = HeadlessSurface::new(1000.0);
        surface.render_tiles(&[tile("a")]);

        let mut changed = tile("b");
        changed.wishlisted = true;
        surface.update_tile(&changed);

        assert_eq!(surface.tiles().len(), 1);
        assert!(surface.tile("b").is_none());
    }
}
