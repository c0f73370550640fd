//! # fillpoly
//!
//! Polygon editing core: hit testing, a selection-aware scene, and a
//! scanline fill engine that turns polygons into horizontal spans.
//!
//! ## Rust Lesson #1: A Library With No UI
//!
//! Nothing in this crate knows about terminals, windows or images. The
//! front end owns the event loop and implements [`Surface`]; the core just
//! answers questions ("which polygon is under this click?") and emits
//! drawing primitives. That split is what makes every piece testable with
//! plain `cargo test`.
//!
//! ## Rust Lesson #2: Re-exports
//!
//! `pub use module::Type;` lifts a type to the crate root, so users write
//! `fillpoly::Scene` instead of `fillpoly::scene::Scene`.

pub mod color;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod polygon;
pub mod render;
pub mod scanline;
pub mod scene;

// Re-export common types at crate root for convenience.
pub use color::Rgb;
pub use editor::{Editor, Mode};
pub use error::{ColorParseError, PolygonError};
pub use geometry::{distance_point_to_segment, Point};
pub use polygon::{Polygon, DEFAULT_HIT_TOLERANCE, MIN_VERTICES};
pub use render::{render_scene, DisplayList, DrawCommand, RenderOptions, Surface};
pub use scanline::{fill_spans, FillSpans, Span};
pub use scene::Scene;
