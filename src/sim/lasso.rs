//! Lasso geometry
//!
//! The rope leaves the anchor on the player's right edge and sags along a
//! fixed straight line: at full extension the tip is `max_drop` pixels below
//! the anchor, and shorter ropes scale that drop proportionally.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// Rope segment from anchor to tip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RopeSegment {
    pub anchor: Vec2,
    pub tip: Vec2,
}

impl RopeSegment {
    /// Build the segment for a rope of `length` out of `max_length`
    pub fn new(anchor: Vec2, length: f32, max_length: f32, max_drop: f32) -> Self {
        Self {
            anchor,
            tip: rope_tip(anchor, length, max_length, max_drop),
        }
    }

    /// Does this rope catch the given box?
    pub fn catches(&self, rect: &Rect) -> bool {
        segment_intersects_rect(self.anchor, self.tip, rect)
    }
}

/// Tip position for a rope of `length`
#[inline]
pub fn rope_tip(anchor: Vec2, length: f32, max_length: f32, max_drop: f32) -> Vec2 {
    let drop = if max_length > 0.0 {
        max_drop * length / max_length
    } else {
        0.0
    };
    anchor + Vec2::new(length, drop)
}

/// Segment vs rectangle test (Liang-Barsky clipping, edges inclusive)
///
/// Returns true if any point of the segment `a -> b` lies inside or on the
/// boundary of `rect`.
pub fn segment_intersects_rect(a: Vec2, b: Vec2, rect: &Rect) -> bool {
    let d = b - a;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;

    // (p, q) pairs for the left, right, top and bottom boundaries
    let edges = [
        (-d.x, a.x - rect.left()),
        (d.x, rect.right() - a.x),
        (-d.y, a.y - rect.top()),
        (d.y, rect.bottom() - a.y),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this boundary: reject if outside it
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return false;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return false;
            }
            t1 = t1.min(t);
        }
    }

    t0 <= t1
}
