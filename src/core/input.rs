//! Host input forwarded to objects.
//!
//! The board doesn't poll any device. Hosts translate their own window or
//! terminal events into these types and hand them to the board.

use std::any::Any;

use serde::{Deserialize, Serialize};

/// A key release reported by the host.
///
/// `code` is host-defined; the engine never interprets it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    pub code: u32,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyEvent {
    /// A plain key with no modifiers.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self {
            code,
            shift: false,
            ctrl: false,
            alt: false,
        }
    }

    /// Set the shift modifier (builder pattern).
    #[must_use]
    pub const fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Set the ctrl modifier (builder pattern).
    #[must_use]
    pub const fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }
}

/// Opaque draw target.
///
/// The board passes whatever the host supplied straight through to each
/// attached object. Objects that know the concrete host type downcast it:
///
/// ```
/// use game_board::core::Canvas;
///
/// let mut lines: Vec<String> = Vec::new();
/// let canvas: &mut dyn Canvas = &mut lines;
/// if let Some(lines) = canvas.as_any_mut().downcast_mut::<Vec<String>>() {
///     lines.push("drawn".into());
/// }
/// assert_eq!(lines, ["drawn"]);
/// ```
pub trait Canvas {
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> Canvas for T {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
