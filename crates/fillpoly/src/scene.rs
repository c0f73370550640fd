//! The scene: an ordered stack of polygons with at most one selected.

use tracing::debug;

use crate::color::Rgb;
use crate::error::PolygonError;
use crate::geometry::Point;
use crate::polygon::{Polygon, DEFAULT_HIT_TOLERANCE};

/// Ordered collection of polygons.
///
/// Insertion order is z-order: later polygons draw on top and win hit
/// tests. The selection is stored as an index into `polygons`, never as a
/// second owner, and is cleared whenever the selected polygon leaves.
#[derive(Debug, Clone)]
pub struct Scene {
    polygons: Vec<Polygon>,
    selected: Option<usize>,
    hit_tolerance: f64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene using [`DEFAULT_HIT_TOLERANCE`].
    pub fn new() -> Self {
        Self::with_hit_tolerance(DEFAULT_HIT_TOLERANCE)
    }

    /// Create an empty scene with a custom edge-proximity tolerance.
    pub fn with_hit_tolerance(hit_tolerance: f64) -> Self {
        Self {
            polygons: Vec::new(),
            selected: None,
            hit_tolerance,
        }
    }

    #[inline]
    pub fn hit_tolerance(&self) -> f64 {
        self.hit_tolerance
    }

    /// Polygons in draw order (bottom first).
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Append a new default polygon and hand it back for further setup.
    pub fn add_polygon(&mut self, vertices: Vec<Point>) -> Result<&mut Polygon, PolygonError> {
        let polygon = Polygon::new(vertices)?;
        self.polygons.push(polygon);
        debug!(index = self.polygons.len() - 1, "polygon added");

        let last = self.polygons.len() - 1;
        Ok(&mut self.polygons[last])
    }

    /// The selected polygon, if any.
    pub fn selected(&self) -> Option<&Polygon> {
        self.selected.map(|i| &self.polygons[i])
    }

    /// Position of the selected polygon in draw order.
    #[inline]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Select the topmost polygon under `(x, y)`.
    ///
    /// Returns `false` and keeps the current selection when nothing is hit.
    pub fn select_at(&mut self, x: f64, y: f64) -> bool {
        let p = Point::new(x, y);
        let tolerance = self.hit_tolerance;

        // Reverse order: the polygon drawn last is the one on top
        let Some(hit) = self
            .polygons
            .iter()
            .rposition(|poly| poly.contains_point(p, tolerance))
        else {
            return false;
        };

        if let Some(previous) = self.selected {
            self.polygons[previous].set_selected(false);
        }
        self.polygons[hit].set_selected(true);
        self.selected = Some(hit);

        debug!(index = hit, x, y, "polygon selected");
        true
    }

    /// Remove the selected polygon.
    ///
    /// Returns `false` and does nothing when there is no selection.
    pub fn remove_selected(&mut self) -> bool {
        let Some(index) = self.selected.take() else {
            return false;
        };
        self.polygons.remove(index);
        debug!(index, remaining = self.polygons.len(), "selected polygon removed");
        true
    }

    /// Recolor the selected polygon. Returns `false` with no selection.
    pub fn set_selected_color(&mut self, color: Rgb) -> bool {
        match self.selected {
            Some(i) => {
                self.polygons[i].set_color(color);
                debug!(index = i, color = %color, "selected polygon recolored");
                true
            }
            None => false,
        }
    }

    /// Turn on filling for the selected polygon. Returns `false` with no
    /// selection.
    pub fn enable_fill_on_selected(&mut self) -> bool {
        match self.selected {
            Some(i) => {
                self.polygons[i].set_fill_enabled(true);
                debug!(index = i, "fill enabled");
                true
            }
            None => false,
        }
    }

    /// Drop every polygon and the selection.
    pub fn clear(&mut self) {
        self.polygons.clear();
        self.selected = None;
    }
}

// ============================================================================
// TESTS
// ============================================================================
