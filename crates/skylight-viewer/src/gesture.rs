//! Press-release gesture classification.
//!
//! A gallery page is one big gesture surface: press anywhere, hold,
//! and release in a zone to navigate. [`classify`] is the pure
//! release-point rule; [`GestureTracker`] carries the press timestamp
//! between events, the only state the scheme needs.

/// Minimum press duration for a navigation gesture. Shorter presses
/// are ordinary clicks and never navigate.
pub const MIN_GESTURE_MS: u64 = 300;

/// Height of the top band, in pixels, where the parent zone sits.
pub const TOP_BAND_PX: i32 = 200;

/// Navigation zone of a release point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Upper middle band: the containing album.
    Parent,
    /// Lower left: previous page.
    Previous,
    /// Lower right: next page.
    Next,
    /// No navigation.
    None,
}

/// Classify a release at horizontal fraction `px` (release x divided
/// by page width) and vertical pixel `py`, after a press of `dt_ms`.
///
/// First match wins:
///
/// - `dt_ms < 300`: [`Zone::None`] regardless of position;
/// - `0.3 < px < 0.6` and `py < 200`: [`Zone::Parent`];
/// - `px < 0.4` and `py >= 200`: [`Zone::Previous`];
/// - `px > 0.6` and `py >= 200`: [`Zone::Next`];
/// - otherwise [`Zone::None`].
///
/// Comparisons are exactly as written: a value sitting on an arm's
/// edge fails that arm and falls through to the ones below. So a press
/// of exactly 300 ms is long enough to navigate, while a release at
/// `px == 0.4` in the lower half satisfies neither side arm and yields
/// [`Zone::None`].
pub fn classify(px: f32, py: i32, dt_ms: u64) -> Zone {
    if dt_ms < MIN_GESTURE_MS {
        return Zone::None;
    }
    if 0.3 < px && px < 0.6 && py < TOP_BAND_PX {
        Zone::Parent
    } else if px < 0.4 && py >= TOP_BAND_PX {
        Zone::Previous
    } else if px > 0.6 && py >= TOP_BAND_PX {
        Zone::Next
    } else {
        Zone::None
    }
}

// ------------------------------------------------------------------
// Gesture tracker
// ------------------------------------------------------------------

/// A completed press-release gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    /// Release x in pixels.
    pub x: i32,
    /// Release y in pixels.
    pub y: i32,
    /// Press-to-release duration.
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackerState {
    Idle,
    Pressed { at_ms: u64 },
}

/// Tracks the press half of a gesture between input events.
///
/// A release with no preceding press yields nothing; a second press
/// restarts the timing.
#[derive(Debug)]
pub struct GestureTracker {
    state: TrackerState,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self {
            state: TrackerState::Idle,
        }
    }

    /// Arm the tracker with the press timestamp.
    pub fn press(&mut self, now_ms: u64) {
        self.state = TrackerState::Pressed { at_ms: now_ms };
    }

    /// Complete the gesture at the release point.
    pub fn release(&mut self, x: i32, y: i32, now_ms: u64) -> Option<Gesture> {
        match self.state {
            TrackerState::Idle => None,
            TrackerState::Pressed { at_ms } => {
                self.state = TrackerState::Idle;
                Some(Gesture {
                    x,
                    y,
                    duration_ms: now_ms.saturating_sub(at_ms),
                })
            },
        }
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.state, TrackerState::Pressed { .. })
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
