//! The drawing boundary between the core and whatever paints pixels.
//!
//! The core never draws. A render pass walks the scene and hands plain
//! primitives (spans, outlines, polylines, markers) to a [`Surface`].
//! Front ends implement `Surface` for their canvas; [`DisplayList`] just
//! records the calls.

use tracing::trace;

use crate::color::Rgb;
use crate::geometry::Point;
use crate::scanline::Span;
use crate::scene::Scene;

/// Outline color of the selected polygon.
pub const SELECTED_OUTLINE: Rgb = Rgb::RED;

/// Outline color of every other polygon.
pub const OUTLINE: Rgb = Rgb::BLACK;

/// Something the render pass can draw onto.
///
/// ## Rust Lesson #7: Traits as Seams
///
/// A trait is an interface. The render pass is written once against
/// `&mut impl Surface` and works with a terminal canvas, a PNG buffer or
/// a test recorder without knowing which one it got. The compiler
/// generates a specialized copy per surface type, so there's no dynamic
/// dispatch cost.
pub trait Surface {
    /// Paint a 1-pixel-tall horizontal run.
    fn draw_span(&mut self, span: Span, color: Rgb);

    /// Stroke a closed polygon outline.
    fn draw_outline(&mut self, vertices: &[Point], color: Rgb);

    /// Stroke an open polyline through `points`.
    fn draw_polyline(&mut self, points: &[Point], color: Rgb);

    /// Draw a small filled dot centered on `center`.
    fn draw_marker(&mut self, center: Point, radius: f64, color: Rgb);
}

/// Per-pass drawing switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_outlines: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { show_outlines: true }
    }
}

/// Draw every polygon of `scene` in z-order.
///
/// For each polygon the fill goes down first (only when fill is enabled),
/// then the outline on top of it.
pub fn render_scene<S: Surface>(scene: &Scene, surface: &mut S, options: RenderOptions) {
    for (index, polygon) in scene.polygons().iter().enumerate() {
        if polygon.fill_enabled() {
            let color = polygon.color();
            let mut count = 0usize;
            for span in polygon.fill_spans() {
                surface.draw_span(span, color);
                count += 1;
            }
            trace!(index, spans = count, "polygon filled");
        }

        if options.show_outlines {
            let color = if polygon.is_selected() { SELECTED_OUTLINE } else { OUTLINE };
            surface.draw_outline(polygon.vertices(), color);
        }
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Span { span: Span, color: Rgb },
    Outline { vertices: Vec<Point>, color: Rgb },
    Polyline { points: Vec<Point>, color: Rgb },
    Marker { center: Point, radius: f64, color: Rgb },
}

/// A surface that records draw calls in order.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of span commands recorded.
    pub fn span_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Span { .. }))
            .count()
    }
}

impl Surface for DisplayList {
    fn draw_span(&mut self, span: Span, color: Rgb) {
        self.commands.push(DrawCommand::Span { span, color });
    }

    fn draw_outline(&mut self, vertices: &[Point], color: Rgb) {
        self.commands.push(DrawCommand::Outline { vertices: vertices.to_vec(), color });
    }

    fn draw_polyline(&mut self, points: &[Point], color: Rgb) {
        self.commands.push(DrawCommand::Polyline { points: points.to_vec(), color });
    }

    fn draw_marker(&mut self, center: Point, radius: f64, color: Rgb) {
        self.commands.push(DrawCommand::Marker { center, radius, color });
    }
}

impl IntoIterator for DisplayList {
    type Item = DrawCommand;
    type IntoIter = std::vec::IntoIter<DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
