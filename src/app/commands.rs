//! Inbound input events to the application service.
//!
//! These are the edge-triggered touch events the outside world (touch
//! driver, event queue, tests) feeds into each tick.  Their meaning is
//! contextual: navigation always navigates, but `Action` depends on the
//! screen currently shown.

/// One debounced touch-down, for the three logical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Step back along the screen cycle.
    Previous,
    /// Step forward along the screen cycle.
    Next,
    /// Contextual action: toggles the pump on a pump screen, otherwise
    /// just confirms with a beep.
    Action,
}

impl From<crate::events::Event> for InputEvent {
    fn from(e: crate::events::Event) -> Self {
        match e {
            crate::events::Event::PrevPressed => Self::Previous,
            crate::events::Event::NextPressed => Self::Next,
            crate::events::Event::ActionPressed => Self::Action,
        }
    }
}
