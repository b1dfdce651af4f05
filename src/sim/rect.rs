//! Axis-aligned rectangle primitive
//!
//! World space has its origin at the top-left corner and y grows downward,
//! matching the bitmap row order.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rectangle, rejecting empty or negative extents
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Option<Self> {
        (width > 0.0 && height > 0.0).then_some(Self {
            x,
            y,
            width,
            height,
        })
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Length of the shared x projection (<= 0 when disjoint)
    #[inline]
    pub fn overlap_x(&self, other: &Rect) -> f32 {
        self.right().min(other.right()) - self.left().max(other.left())
    }

    /// Length of the shared y projection (<= 0 when disjoint)
    #[inline]
    pub fn overlap_y(&self, other: &Rect) -> f32 {
        self.bottom().min(other.bottom()) - self.top().max(other.top())
    }

    /// Strict AABB overlap; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.bottom() > other.top()
            && self.top() < other.bottom()
            && self.right() > other.left()
            && self.left() < other.right()
    }
}
