//! Error types for the fillpoly core.
//!
//! Operations that need a selection return `false` when there is none, and
//! zero-length edges are absorbed by the geometry code, so neither shows
//! up here.

use thiserror::Error;

use crate::polygon::MIN_VERTICES;

/// Reasons a vertex list can't become a polygon.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolygonError {
    /// Fewer than three vertices were supplied.
    #[error("a polygon needs at least {MIN_VERTICES} vertices, got {found}")]
    TooFewVertices {
        /// How many vertices were actually supplied.
        found: usize,
    },

    /// A vertex coordinate is NaN or infinite.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Position of the first offending vertex.
        index: usize,
    },

    /// A commit was issued while the editor was in selection mode.
    #[error("polygons can only be committed in draw mode")]
    NotDrawing,
}

/// A color string that is neither `#rrggbb` nor `r,g,b`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color '{input}': expected #rrggbb or r,g,b")]
pub struct ColorParseError {
    input: String,
}

impl ColorParseError {
    pub(crate) fn new(input: &str) -> Self {
        Self { input: input.to_string() }
    }
}
