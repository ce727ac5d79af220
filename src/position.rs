//! Scroll positions.
//!
//! A [`Position`] is the absolute offset of a scroll container, measured in
//! pixels from its top-left corner. The view uses it to restore scroll state
//! after a render and as the fallback target when an anchor cannot be
//! resolved.
//!
//! # Examples
//!
//! ```
//! use slipstream_view::Position;
//!
//! let pos = Position::new(0.0, 250.0);
//! assert_eq!(pos.y, 250.0);
//! assert_eq!(Position::ORIGIN, Position::new(0.0, 0.0));
//! ```

use serde::{Deserialize, Serialize};

/// Absolute scroll offset of a scroll container.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset in pixels from the left edge.
    pub x: f64,

    /// Vertical offset in pixels from the top edge.
    pub y: f64,
}

impl Position {
    /// The top-left corner of the scroll container.
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    /// Creates a new [`Position`] at the given offsets.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position {{ x: {}, y: {} }}", self.x, self.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
