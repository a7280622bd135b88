//! Axis-aligned rectangle geometry for fighter bodies and attack hitboxes
//!
//! World coordinates: origin at the top-left of the arena, +x right, +y down
//! (canvas convention). A rect is its top-left corner plus extents.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height,
        }
    }

    /// Right edge x coordinate
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Bottom edge y coordinate
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Center point of the rect
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Check overlap with another rect (strict inequalities, so rects that
    /// merely share an edge do not count as touching)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }

    /// Check if a point is inside the rect
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.right()
            && point.y >= self.pos.y
            && point.y <= self.bottom()
    }
}
