use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::AppResult;
use crate::models::Rating;
use crate::services::carousel::Direction;

// ============================================================================
// Raw Events
// ============================================================================

/// What an element on the carousel is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    ProductTile,
    WishlistToggle,
    Star,
    NavButton,
    Other,
}

/// One element on the path from an event target up to the carousel root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub role: ElementRole,
    pub dataset: HashMap<String, String>,
}

impl ElementNode {
    pub fn new(role: ElementRole) -> Self {
        Self {
            role,
            dataset: HashMap::new(),
        }
    }

    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.dataset.insert(key.to_string(), value.to_string());
        self
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }
}

/// A click inside the carousel, target first, root last
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    pub path: Vec<ElementNode>,
}

impl PointerEvent {
    pub fn new(path: Vec<ElementNode>) -> Self {
        Self { path }
    }

    /// Index of the nearest element with `role`, searching outward from `from`
    fn closest(&self, role: ElementRole, from: usize) -> Option<usize> {
        self.path
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, node)| node.role == role)
            .map(|(i, _)| i)
    }

    /// `data-id` of the tile enclosing the element at `from`
    fn tile_id(&self, from: usize) -> Option<String> {
        let tile = self.closest(ElementRole::ProductTile, from)?;
        self.path[tile].data("id").map(str::to_string)
    }
}

/// Events the host forwards to the widget
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Pointer(PointerEvent),
    Resize,
}

// ============================================================================
// Classification
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    WishlistToggle(String),
    RatingSet(String, Rating),
    Navigate(Direction),
}

/// Maps a click to at most one interaction
///
/// The nearest wishlist toggle wins, then the nearest star, then a nav button.
/// A matching element with missing or malformed data yields `None` rather
/// than falling through to the next kind.
pub fn classify(event: &PointerEvent) -> Option<Interaction> {
    if let Some(at) = event.closest(ElementRole::WishlistToggle, 0) {
        let id = event.path[at]
            .data("id")
            .map(str::to_string)
            .or_else(|| event.tile_id(at))?;
        return Some(Interaction::WishlistToggle(id));
    }

    if let Some(at) = event.closest(ElementRole::Star, 0) {
        let id = event.tile_id(at)?;
        let value = event.path[at].data("value")?.trim().parse::<u8>().ok()?;
        let rating = Rating::new(value).ok()?;
        return Some(Interaction::RatingSet(id, rating));
    }

    if let Some(at) = event.closest(ElementRole::NavButton, 0) {
        let direction = Direction::from_data(event.path[at].data("dir")?)?;
        return Some(Interaction::Navigate(direction));
    }

    None
}

// ============================================================================
// Routing
// ============================================================================

/// Receiver of classified interactions
pub trait InteractionHandler {
    fn toggle_wishlist(&mut self, product_id: &str) -> AppResult<()>;

    fn set_rating(&mut self, product_id: &str, rating: Rating) -> AppResult<()>;

    fn navigate(&mut self, direction: Direction) -> AppResult<()>;
}

/// Debounced trigger backed by a cancellable timer task
///
/// Each `trigger` aborts the pending timer and starts a new one; only a timer
/// that survives the full quiet period sends a tick.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    tick_tx: mpsc::UnboundedSender<()>,
    tick_rx: mpsc::UnboundedReceiver<()>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        Self {
            delay,
            pending: None,
            tick_tx,
            tick_rx,
        }
    }

    /// Must be called from within a tokio runtime
    pub fn trigger(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let tx = self.tick_tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(());
        }));
    }

    /// Resolves when a timer fires
    pub async fn tick(&mut self) -> Option<()> {
        self.tick_rx.recv().await
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

/// Classifies host events and routes them
pub struct EventDispatcher {
    resize: Debouncer,
}

impl EventDispatcher {
    pub fn new(resize_quiet_period: Duration) -> Self {
        Self {
            resize: Debouncer::new(resize_quiet_period),
        }
    }

    /// Classifies a click and hands it to the matching handler
    ///
    /// Returns the interaction that was routed, if any. Handler failures are
    /// logged here and never reach the caller, so one broken interaction
    /// cannot stop the next event from being processed.
    pub fn dispatch(
        &self,
        event: &PointerEvent,
        handler: &mut dyn InteractionHandler,
    ) -> Option<Interaction> {
        let Some(interaction) = classify(event) else {
            tracing::trace!("Ignoring click outside interactive elements");
            return None;
        };

        let result = match &interaction {
            Interaction::WishlistToggle(id) => handler.toggle_wishlist(id),
            Interaction::RatingSet(id, rating) => handler.set_rating(id, *rating),
            Interaction::Navigate(direction) => handler.navigate(*direction),
        };

        if let Err(e) = result {
            tracing::error!(error = %e, ?interaction, "Interaction handler failed");
        }

        Some(interaction)
    }

    /// Restarts the resize quiet period
    pub fn on_resize(&mut self) {
        self.resize.trigger();
    }

    /// Resolves once per quiet period that elapsed after a resize burst
    pub async fn snap_due(&mut self) -> Option<()> {
        self.resize.tick().await
    }
}
