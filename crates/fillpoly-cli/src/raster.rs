//! Pixel surface backed by a `tiny_skia::Pixmap`.
//!
//! Spans map straight onto pixel rows. Outlines and polylines are stroked
//! paths and markers are filled circles, all without anti-aliasing so the
//! output stays crisp like the fill. tiny-skia clips everything to the
//! canvas.

use std::path::Path;

use anyhow::{Context, Result};
use fillpoly::{Point, Rgb, Span, Surface};
use image::RgbaImage;
use tiny_skia::{
    Color, ColorU8, FillRule, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Stroke, Transform,
};

/// Outline pen width in pixels.
pub const OUTLINE_WIDTH: f32 = 2.0;

/// Raster canvas that implements the core drawing boundary.
pub struct RasterSurface {
    pixmap: Pixmap,
}

#[inline]
fn premultiplied(color: Rgb) -> PremultipliedColorU8 {
    ColorU8::from_rgba(color.r(), color.g(), color.b(), 255).premultiply()
}

fn paint(color: Rgb) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r(), color.g(), color.b(), 255);
    paint.anti_alias = false;
    paint
}

/// Build a path through `points`, or `None` when tiny-skia can't
/// represent it (too few points, coordinates beyond `f32`).
fn build_path(points: &[Point], closed: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

impl RasterSurface {
    /// Create a white canvas.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut pixmap = Pixmap::new(width, height)
            .with_context(|| format!("cannot create a {}x{} canvas", width, height))?;
        pixmap.fill(Color::WHITE);
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Color at a pixel, or `None` off the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Rgb(c.red(), c.green(), c.blue())
        })
    }

    /// Write the canvas as PNG (format picked from the extension).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let image = RgbaImage::from_raw(self.width(), self.height(), self.pixmap.data().to_vec())
            .context("pixmap size does not match its pixel buffer")?;
        image
            .save(path)
            .with_context(|| format!("failed to write image {}", path.display()))
    }

    fn stroke(&mut self, points: &[Point], closed: bool, color: Rgb) {
        let Some(path) = build_path(points, closed) else {
            return;
        };
        let stroke = Stroke { width: OUTLINE_WIDTH, ..Stroke::default() };
        self.pixmap.stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
    }
}

impl Surface for RasterSurface {
    fn draw_span(&mut self, span: Span, color: Rgb) {
        let (width, height) = (self.width() as i64, self.height() as i64);
        let y = span.y as i64;
        if y < 0 || y >= height {
            return;
        }
        let start = (span.x_start as i64).max(0);
        let end = (span.x_end as i64).min(width - 1);
        if start > end {
            return;
        }

        let row = (y * width) as usize;
        let pixels = self.pixmap.pixels_mut();
        pixels[row + start as usize..=row + end as usize].fill(premultiplied(color));
    }

    fn draw_outline(&mut self, vertices: &[Point], color: Rgb) {
        self.stroke(vertices, true, color);
    }

    fn draw_polyline(&mut self, points: &[Point], color: Rgb) {
        self.stroke(points, false, color);
    }

    fn draw_marker(&mut self, center: Point, radius: f64, color: Rgb) {
        let Some(circle) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        else {
            return;
        };
        self.pixmap
            .fill_path(&circle, &paint(color), FillRule::Winding, Transform::identity(), None);
    }
}
