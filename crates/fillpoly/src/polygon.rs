//! The polygon entity: vertices, color, fill and selection state.

use crate::color::Rgb;
use crate::error::PolygonError;
use crate::geometry::{bounding_box, distance_point_to_segment, Point};
use crate::scanline::{fill_spans, FillSpans};

/// Smallest vertex count that closes a polygon.
pub const MIN_VERTICES: usize = 3;

/// Clicks closer than this to an outline count as hits.
pub const DEFAULT_HIT_TOLERANCE: f64 = 2.0;

/// A closed polygon owned by a [`Scene`](crate::scene::Scene).
///
/// ## Rust Lesson #5: Privacy as an Invariant
///
/// The fields are private, so the only way to build a `Polygon` is
/// [`Polygon::new`], which rejects short vertex lists. There are getters
/// for everything, setters for color and fill, and the selection setter is
/// `pub(crate)`: code outside this crate can't mark two polygons selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
    color: Rgb,
    fill_enabled: bool,
    selected: bool,
}

impl Polygon {
    /// Create an unfilled, unselected red polygon.
    pub fn new(vertices: Vec<Point>) -> Result<Self, PolygonError> {
        if vertices.len() < MIN_VERTICES {
            return Err(PolygonError::TooFewVertices { found: vertices.len() });
        }
        if let Some(index) = vertices.iter().position(|p| !p.is_finite()) {
            return Err(PolygonError::NonFiniteVertex { index });
        }
        Ok(Self {
            vertices,
            color: Rgb::default(),
            fill_enabled: false,
            selected: false,
        })
    }

    /// Vertices in insertion order. The last one connects back to the first.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    #[inline]
    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    #[inline]
    pub fn fill_enabled(&self) -> bool {
        self.fill_enabled
    }

    #[inline]
    pub fn set_fill_enabled(&mut self, enabled: bool) {
        self.fill_enabled = enabled;
    }

    #[inline]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    #[inline]
    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Iterate edges as `(start, end)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Get the bounding box as (min_x, min_y, max_x, max_y).
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        // Never empty: `new` guarantees at least three vertices.
        bounding_box(&self.vertices).unwrap_or((0.0, 0.0, 0.0, 0.0))
    }

    /// Hit test with the default tolerance.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.contains_point(p, DEFAULT_HIT_TOLERANCE)
    }

    /// Test whether a click at `p` hits this polygon.
    ///
    /// A point within `tolerance` of any edge is a hit even when it lies
    /// outside, so users can grab thin shapes by their outline. Everything
    /// else goes through even-odd ray casting: a ray to the right of `p`
    /// toggles `inside` at each edge it crosses.
    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        if self
            .edges()
            .any(|(a, b)| distance_point_to_segment(p, a, b) < tolerance)
        {
            return true;
        }

        let mut inside = false;
        for (a, b) in self.edges() {
            // Strict straddle: horizontal edges never pass, so y1 != y2 below
            if (a.y > p.y) != (b.y > p.y) {
                let x_intersect = (p.y - a.y) * (b.x - a.x) / (b.y - a.y) + a.x;
                if p.x <= x_intersect {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Horizontal fill spans for this polygon, lazily computed.
    ///
    /// Each call starts a fresh pass from the top scanline.
    #[inline]
    pub fn fill_spans(&self) -> FillSpans {
        fill_spans(&self.vertices)
    }
}

// ============================================================================
// TESTS
// ============================================================================
