//! Axis-aligned overlap tests
//!
//! Everything in the play area is an upright rectangle, so collision,
//! spawn placement and near-miss scoring all reduce to interval checks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `pos` is the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict AABB overlap; rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// True when the two rectangles share some horizontal band
    pub fn shares_row(&self, other: &Rect) -> bool {
        other.bottom() > self.top() && other.top() < self.bottom()
    }
}

/// Half-open horizontal span overlap: `[a_x, a_x + a_w)` against `[b_x, b_x + b_w)`
#[inline]
pub fn spans_overlap(a_x: f32, a_width: f32, b_x: f32, b_width: f32) -> bool {
    a_x < b_x + b_width && b_x < a_x + a_width
}

/// Near-miss check for one obstacle against the player
///
/// The obstacle must share the player's row and sit within `margin` of either
/// side without overlapping. Touching edges (gap of zero) count as a near miss.
pub fn near_miss(player: &Rect, obstacle: &Rect, margin: f32) -> bool {
    if !player.shares_row(obstacle) {
        return false;
    }
    let gap_right = obstacle.left() - player.right();
    let gap_left = player.left() - obstacle.right();
    (gap_right >= 0.0 && gap_right < margin) || (gap_left >= 0.0 && gap_left < margin)
}
