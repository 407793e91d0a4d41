//! User interface — screen cycle, status derivation, diff-aware rendering.
//!
//! The UI never touches the display directly: [`render`] computes *what*
//! changed and issues primitive draw calls through the
//! [`DisplayPort`](crate::app::ports::DisplayPort) trait.

pub mod render;
pub mod screen;
pub mod status;

/// Display colours the core can request.  The display shim maps these to
/// panel-native RGB565 values; the core never deals in raw colour words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    /// Background.
    Black,
    White,
    Green,
    Yellow,
    Red,
    Blue,
}

/// Named text anchor positions on the round 240x240 panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPos {
    /// Dead centre (120, 120) — status text.
    Centre,
    /// Above centre (120, 100) — screen label.
    Label,
    /// Below centre (120, 145) — percentage / countdown value.
    Value,
}
