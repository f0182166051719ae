//! EXIF panel visibility.
//!
//! The injected metadata table starts hidden. Toggling fades it in or
//! out over a fixed duration with an ease-out curve; toggling again
//! mid-fade reverses from the current alpha instead of snapping.

use crate::animation::{Tween, easing};

/// Default fade duration for panel show/hide.
pub const DEFAULT_FADE_MS: u32 = 200;

/// Visibility states of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Hidden,
    FadingIn,
    Visible,
    FadingOut,
}

/// Visibility state machine for the injected EXIF table.
///
/// Without an injected table there is nothing to show and
/// [`ExifPanel::toggle`] is a no-op.
pub struct ExifPanel {
    state: PanelState,
    tween: Option<Tween>,
    fade_ms: u32,
    has_table: bool,
}

impl ExifPanel {
    /// A hidden panel with no table.
    pub fn new(fade_ms: u32) -> Self {
        Self {
            state: PanelState::Hidden,
            tween: None,
            fade_ms,
            has_table: false,
        }
    }

    /// Record whether a table was injected into the page.
    pub fn set_table(&mut self, present: bool) {
        self.has_table = present;
    }

    pub fn has_table(&self) -> bool {
        self.has_table
    }

    /// Flip the fade direction: hide a visible panel, show a hidden
    /// one. Mid-fade, the new fade starts from the current alpha.
    pub fn toggle(&mut self) {
        if !self.has_table {
            return;
        }
        let from = self.alpha();
        self.state = match self.state {
            PanelState::Hidden | PanelState::FadingOut => {
                self.tween = Some(Tween::new(from, 1.0, self.fade_ms, easing::ease_out_quad));
                PanelState::FadingIn
            },
            PanelState::Visible | PanelState::FadingIn => {
                self.tween = Some(Tween::new(from, 0.0, self.fade_ms, easing::ease_out_quad));
                PanelState::FadingOut
            },
        };
    }

    /// Advance the fade animation.
    pub fn tick(&mut self, dt_ms: u32) {
        let Some(tween) = self.tween.as_mut() else {
            return;
        };
        tween.tick(dt_ms);
        if tween.is_finished() {
            self.state = match self.state {
                PanelState::FadingIn => PanelState::Visible,
                PanelState::FadingOut => PanelState::Hidden,
                resting => resting,
            };
            self.tween = None;
        }
    }

    /// Whether the panel is logically visible (shown, or on its way).
    pub fn is_visible(&self) -> bool {
        matches!(self.state, PanelState::Visible | PanelState::FadingIn)
    }

    /// Current alpha in `0.0..=1.0`.
    pub fn alpha(&self) -> f32 {
        match &self.tween {
            Some(tween) => tween.value(),
            None if self.state == PanelState::Visible => 1.0,
            None => 0.0,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
