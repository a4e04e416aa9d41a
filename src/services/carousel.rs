use crate::host::{ScrollBehavior, TrackLayout};

/// Navigation direction of the prev/next buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Prev => -1.0,
            Direction::Next => 1.0,
        }
    }

    /// The `data-dir` value carried by the nav buttons
    pub fn as_data(self) -> &'static str {
        match self {
            Direction::Prev => "-1",
            Direction::Next => "1",
        }
    }

    pub fn from_data(value: &str) -> Option<Self> {
        match value.trim().parse::<i32>().ok()? {
            -1 => Some(Direction::Prev),
            1 => Some(Direction::Next),
            _ => None,
        }
    }
}

/// Current offset and step, derived from layout on demand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset: f64,
    pub step: f64,
}

/// Scroll-snap carousel over a host track
///
/// Never caches geometry: every operation reads the track again so layout
/// changes between calls are picked up.
pub struct CarouselEngine {
    track: Box<dyn TrackLayout>,
}

impl CarouselEngine {
    pub fn new(track: Box<dyn TrackLayout>) -> Self {
        Self { track }
    }

    /// One tile width plus the gap, or 0 when no tile is rendered
    pub fn step(&self) -> f64 {
        self.track
            .first_tile_width()
            .map_or(0.0, |width| width + self.track.gap())
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.track.scroll_left(),
            step: self.step(),
        }
    }

    /// Smoothly scrolls one step; the track clamps at either end
    pub fn scroll_by(&mut self, direction: Direction) {
        let step = self.step();
        tracing::debug!(?direction, step, "Scrolling carousel");
        self.track
            .scroll_by(step * direction.sign(), ScrollBehavior::Smooth);
    }

    /// Jumps to the nearest multiple of the step
    ///
    /// No-op while the track is empty.
    pub fn snap_to_grid(&mut self) {
        let ScrollState { offset, step } = self.scroll_state();
        if step <= 0.0 {
            return;
        }

        let target = (offset / step).round() * step;
        tracing::debug!(offset, step, target, "Snapping carousel to grid");
        self.track.scroll_to(target, ScrollBehavior::Instant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeTrackState {
        tile_width: Option<f64>,
        gap: f64,
        scroll_left: f64,
        calls: Vec<(f64, ScrollBehavior)>,
    }

    #[derive(Clone, Default)]
    struct FakeTrack(Rc<RefCell<FakeTrackState>>);

    impl TrackLayout for FakeTrack {
        fn first_tile_width(&self) -> Option<f64> {
            self.0.borrow().tile_width
        }

        fn gap(&self) -> f64 {
            self.0.borrow().gap
        }

        fn scroll_left(&self) -> f64 {
            self.0.borrow().scroll_left
        }

        fn scroll_by(&mut self, delta: f64, behavior: ScrollBehavior) {
            let mut state = self.0.borrow_mut();
            state.scroll_left += delta;
            state.calls.push((delta, behavior));
        }

        fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior) {
            let mut state = self.0.borrow_mut();
            state.scroll_left = offset;
            state.calls.push((offset, behavior));
        }
    }

    fn engine_with(tile_width: Option<f64>, gap: f64, scroll_left: f64) -> (CarouselEngine, FakeTrack) {
        let track = FakeTrack::default();
        {
            let mut state = track.0.borrow_mut();
            state.tile_width = tile_width;
            state.gap = gap;
            state.scroll_left = scroll_left;
        }
        (CarouselEngine::new(Box::new(track.clone())), track)
    }

    #[test]
    fn test_step_is_tile_plus_gap() {
        let (engine, _) = engine_with(Some(200.0), 16.0, 0.0);
        assert_eq!(engine.step(), 216.0);
    }

    #[test]
    fn test_step_zero_without_tiles() {
        let (engine, _) = engine_with(None, 16.0, 0.0);
        assert_eq!(engine.step(), 0.0);
    }

    #[test]
    fn test_scroll_by_moves_one_step_smoothly() {
        let (mut engine, track) = engine_with(Some(200.0), 16.0, 0.0);
        engine.scroll_by(Direction::Next);
        engine.scroll_by(Direction::Next);
        engine.scroll_by(Direction::Prev);

        let state = track.0.borrow();
        assert_eq!(
            state.calls,
            vec![
                (216.0, ScrollBehavior::Smooth),
                (216.0, ScrollBehavior::Smooth),
                (-216.0, ScrollBehavior::Smooth),
            ]
        );
        assert_eq!(state.scroll_left, 216.0);
    }

    #[test]
    fn test_snap_rounds_to_nearest_step() {
        let (mut engine, track) = engine_with(Some(200.0), 16.0, 300.0);
        engine.snap_to_grid();
        assert_eq!(track.0.borrow().calls, vec![(216.0, ScrollBehavior::Instant)]);

        track.0.borrow_mut().scroll_left = 340.0;
        engine.snap_to_grid();
        assert_eq!(track.0.borrow().scroll_left, 432.0);
    }

    #[test]
    fn test_snap_is_noop_without_tiles() {
        let (mut engine, track) = engine_with(None, 16.0, 123.0);
        engine.snap_to_grid();
        assert!(track.0.borrow().calls.is_empty());
        assert_eq!(track.0.borrow().scroll_left, 123.0);
    }

    #[test]
    fn test_snap_recomputes_step_after_layout_change() {
        let (mut engine, track) = engine_with(Some(200.0), 16.0, 432.0);
        track.0.borrow_mut().tile_width = Some(134.0);
        engine.snap_to_grid();
        assert_eq!(track.0.borrow().scroll_left, 450.0);
        assert_eq!(engine.scroll_state(), ScrollState { offset: 450.0, step: 150.0 });
    }

    #[test]
    fn test_direction_from_data() {
        assert_eq!(Direction::from_data("-1"), Some(Direction::Prev));
        assert_eq!(Direction::from_data("1"), Some(Direction::Next));
        assert_eq!(Direction::from_data("2"), None);
        assert_eq!(Direction::from_data("left"), None);
    }
}
