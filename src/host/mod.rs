//! Capabilities the embedding page provides to the widget
//!
//! The widget never touches a real document. Everything it needs from the
//! host (where it is, where to mount, how wide a tile is, how to scroll) goes
//! through these traits so a headless implementation can stand in for tests
//! and for the command-line host.

use url::Url;

use crate::services::render::TileView;

pub mod headless;

pub use headless::{HeadlessSurface, StaticLocation};

/// Reports the page the widget was loaded on
pub trait LocationProvider {
    fn current_url(&self) -> Url;
}

/// Where the carousel shell is inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountPoint {
    /// Immediately before the first element matching the selector
    BeforeAnchor(String),
    /// Appended at the end of the document body
    DocumentEnd,
}

/// The static frame around the tiles: heading, nav buttons and an empty track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselShell {
    pub title: String,
    pub mount: MountPoint,
}

/// Page-level operations
pub trait HostPage {
    /// Whether an element matching `selector` exists on the page
    fn has_anchor(&self, selector: &str) -> bool;

    fn mount_shell(&mut self, shell: &CarouselShell);

    /// Replaces the track contents with `tiles`, in order
    fn render_tiles(&mut self, tiles: &[TileView]);

    /// Re-renders the single tile whose id matches `tile.id`
    fn update_tile(&mut self, tile: &TileView);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Animated
    Smooth,
    /// Jump without animation
    Instant,
}

/// Horizontal track geometry and scrolling
///
/// Implementations clamp offsets to the scrollable range the way a native
/// scroll container does; callers never bounds-check.
pub trait TrackLayout {
    /// Rendered width of the first tile, `None` when the track is empty
    fn first_tile_width(&self) -> Option<f64>;

    /// Gap between adjacent tiles
    fn gap(&self) -> f64;

    fn scroll_left(&self) -> f64;

    fn scroll_by(&mut self, delta: f64, behavior: ScrollBehavior);

    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior);
}
