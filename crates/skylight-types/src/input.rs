//! Input event types for the page viewer.
//!
//! The viewer widget never sees raw platform input; whatever shell hosts it
//! maps native events to these variants. Events carry no timestamps -- the
//! handlers that care about timing take an explicit `now_ms` argument.

/// An input event delivered to the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed at absolute position (mouse or touch).
    PointerPress { x: i32, y: i32 },
    /// Pointer released.
    PointerRelease { x: i32, y: i32 },
    /// Character typed.
    Key(char),
    /// User requested quit.
    Quit,
}
