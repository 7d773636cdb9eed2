//! Layer positioning.
//!
//! Positions are pixel offsets from the primary body's anchor point, which
//! the surfaces place at the centre of the document.

mod resolver;

use std::fmt;
use std::ops::Add;

use serde::Serialize;

pub use resolver::{resolve, resolve_layout, resolve_position, Anchor, LayerRef, Resolution, ResolvedLayout};

/// A pixel offset (x grows right, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
