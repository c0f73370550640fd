//! Core geometry types for fillpoly.
//!
//! ## Rust Lesson #3: Copy Types
//!
//! A `Point` is two `f64`s, sixteen bytes on the stack. Deriving `Copy`
//! lets us pass it around by value without `.clone()` everywhere, the same
//! way you pass numbers in JS. Anything that owns heap memory (like a
//! `Vec`) can't be `Copy`.

use serde::{Deserialize, Serialize};

/// A 2D point in canvas coordinates (y grows downward, like screen pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Both coordinates are neither NaN nor infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Distance from `p` to the closest point on the segment `a`-`b`.
///
/// Projects `p` onto the line through `a` and `b`, clamps the projection
/// parameter to `[0, 1]` so it stays on the segment, and measures from
/// there. A zero-length segment degrades to the distance to `a`.
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> f64 {
    if a == b {
        return p.distance(a);
    }

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    let projected = Point::new(a.x + t * dx, a.y + t * dy);

    p.distance(projected)
}

/// Bounding box of a point sequence as (min_x, min_y, max_x, max_y).
///
/// Returns `None` for an empty slice.
pub fn bounding_box(points: &[Point]) -> Option<(f64, f64, f64, f64)> {
    if points.is_empty() {
        return None;
    }

    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    Some((min_x, min_y, max_x, max_y))
}

// ============================================================================
// TESTS
// ============================================================================
