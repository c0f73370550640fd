//! The editor session: everything a front end tracks between input events.
//!
//! The scene itself stays a plain model. The session adds the interaction
//! state around it: which mode clicks are in, the vertices placed so far,
//! the color new polygons get, and whether outlines are shown.

use std::fmt;

use tracing::{debug, warn};

use crate::color::Rgb;
use crate::error::PolygonError;
use crate::geometry::Point;
use crate::polygon::{Polygon, MIN_VERTICES};
use crate::render::{render_scene, RenderOptions, Surface};
use crate::scene::Scene;

/// Color of the in-progress polyline and its vertex markers.
pub const PREVIEW_COLOR: Rgb = Rgb::BLUE;

/// Radius of the in-progress vertex markers.
pub const PREVIEW_MARKER_RADIUS: f64 = 3.0;

/// What a primary click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Clicks place vertices of a new polygon.
    #[default]
    Draw,
    /// Clicks select the polygon under the pointer.
    Select,
}

impl Mode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::Draw => Mode::Select,
            Mode::Select => Mode::Draw,
        }
    }

    /// One-line hint for a status bar.
    pub fn hint(&self) -> &'static str {
        match self {
            Mode::Draw => "Draw mode: click to add vertices",
            Mode::Select => "Select mode: click to select polygons",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Draw => f.write_str("draw"),
            Mode::Select => f.write_str("select"),
        }
    }
}

/// Interactive editing session over a [`Scene`].
#[derive(Debug, Clone)]
pub struct Editor {
    scene: Scene,
    mode: Mode,
    pending: Vec<Point>,
    current_color: Rgb,
    show_outlines: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Scene::new())
    }
}

impl Editor {
    /// Start a session on `scene` in draw mode with red as the color.
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            mode: Mode::Draw,
            pending: Vec::new(),
            current_color: Rgb::default(),
            show_outlines: true,
        }
    }

    /// Set the color new polygons are committed with.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.current_color = color;
        self
    }

    /// Set the initial outline visibility.
    pub fn with_outlines(mut self, show: bool) -> Self {
        self.show_outlines = show;
        self
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Vertices placed since the last commit.
    #[inline]
    pub fn pending(&self) -> &[Point] {
        &self.pending
    }

    #[inline]
    pub fn current_color(&self) -> Rgb {
        self.current_color
    }

    #[inline]
    pub fn show_outlines(&self) -> bool {
        self.show_outlines
    }

    /// Primary click: add a vertex or select, depending on the mode.
    ///
    /// Returns whether anything changed. Non-finite points are ignored.
    pub fn click(&mut self, p: Point) -> bool {
        if !p.is_finite() {
            warn!(x = p.x, y = p.y, "non-finite click ignored");
            return false;
        }
        match self.mode {
            Mode::Draw => {
                self.pending.push(p);
                true
            }
            Mode::Select => self.scene.select_at(p.x, p.y),
        }
    }

    /// Close the pending vertices into a polygon.
    ///
    /// On error the pending buffer is left as it was so the user can keep
    /// adding vertices.
    pub fn commit(&mut self) -> Result<&Polygon, PolygonError> {
        if self.mode != Mode::Draw {
            warn!("commit ignored outside draw mode");
            return Err(PolygonError::NotDrawing);
        }
        if self.pending.len() < MIN_VERTICES {
            warn!(pending = self.pending.len(), "commit rejected");
            return Err(PolygonError::TooFewVertices { found: self.pending.len() });
        }

        let vertices = std::mem::take(&mut self.pending);
        let color = self.current_color;
        let polygon = self.scene.add_polygon(vertices)?;
        polygon.set_color(color);
        Ok(&*polygon)
    }

    /// Throw away the pending vertices.
    pub fn cancel(&mut self) {
        self.pending.clear();
    }

    /// Switch between draw and select mode, dropping pending vertices.
    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        self.pending.clear();
        debug!(mode = %self.mode, "mode switched");
        self.mode
    }

    /// Start over with an empty scene, keeping the hit tolerance.
    pub fn clear_scene(&mut self) {
        self.scene.clear();
        self.pending.clear();
        debug!("scene cleared");
    }

    /// Remove the selected polygon. Returns `false` with no selection.
    pub fn remove_selected(&mut self) -> bool {
        self.scene.remove_selected()
    }

    /// Enable fill on the selected polygon. Returns `false` with no
    /// selection.
    pub fn fill_selected(&mut self) -> bool {
        self.scene.enable_fill_on_selected()
    }

    /// Apply a picked color.
    ///
    /// With a selection the selected polygon is recolored; otherwise the
    /// color becomes the one the next commit uses.
    pub fn apply_color(&mut self, color: Rgb) {
        if !self.scene.set_selected_color(color) {
            self.current_color = color;
        }
    }

    /// Flip outline visibility and return the new state.
    pub fn toggle_outlines(&mut self) -> bool {
        self.show_outlines = !self.show_outlines;
        self.show_outlines
    }

    /// Draw the scene and the in-progress polygon.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        render_scene(
            &self.scene,
            surface,
            RenderOptions { show_outlines: self.show_outlines },
        );

        if self.pending.len() > 1 {
            surface.draw_polyline(&self.pending, PREVIEW_COLOR);
            for &p in &self.pending {
                surface.draw_marker(p, PREVIEW_MARKER_RADIUS, PREVIEW_COLOR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayList, DrawCommand};

    fn click_triangle(editor: &mut Editor, x: f64) {
        editor.click(Point::new(x, 0.0));
        editor.click(Point::new(x + 20.0, 0.0));
        editor.click(Point::new(x + 10.0, 20.0));
    }

    #[test]
    fn commit_needs_three_vertices() {
        let mut editor = Editor::default();
        editor.click(Point::new(0.0, 0.0));
        editor.click(Point::new(10.0, 0.0));

        let err = editor.commit().unwrap_err();
        assert_eq!(err, PolygonError::TooFewVertices { found: 2 });
        assert_eq!(editor.pending().len(), 2, "pending kept after rejection");
        assert!(editor.scene().is_empty());
    }

    #[test]
    fn non_finite_clicks_are_dropped() {
        let mut editor = Editor::default();
        assert!(!editor.click(Point::new(f64::NAN, 3.0)));
        assert!(!editor.click(Point::new(1.0, f64::INFINITY)));
        assert!(editor.pending().is_empty());

        click_triangle(&mut editor, 0.0);
        assert!(editor.commit().is_ok());
    }

    #[test]
    fn commit_uses_current_color_and_clears_buffer() {
        let mut editor = Editor::default().with_color(Rgb(0, 0, 200));
        click_triangle(&mut editor, 0.0);

        let poly = editor.commit().unwrap();
        assert_eq!(poly.color(), Rgb(0, 0, 200));
        assert_eq!(poly.vertices().len(), 3);
        assert!(editor.pending().is_empty());
        assert_eq!(editor.scene().len(), 1);
    }

    #[test]
    fn commit_in_select_mode_is_rejected() {
        let mut editor = Editor::default();
        editor.toggle_mode();
        assert_eq!(editor.commit().unwrap_err(), PolygonError::NotDrawing);
    }

    #[test]
    fn mode_switch_clears_pending() {
        let mut editor = Editor::default();
        editor.click(Point::new(1.0, 1.0));
        assert_eq!(editor.toggle_mode(), Mode::Select);
        assert!(editor.pending().is_empty());
        assert_eq!(editor.toggle_mode(), Mode::Draw);
    }

    #[test]
    fn select_mode_clicks_select() {
        let mut editor = Editor::default();
        click_triangle(&mut editor, 0.0);
        editor.commit().unwrap();

        editor.toggle_mode();
        assert!(editor.click(Point::new(10.0, 5.0)));
        assert!(editor.scene().selected().is_some());
        assert!(editor.pending().is_empty());
    }

    #[test]
    fn apply_color_without_selection_sets_next_color() {
        let mut editor = Editor::default();
        editor.apply_color(Rgb(1, 2, 3));
        assert_eq!(editor.current_color(), Rgb(1, 2, 3));

        click_triangle(&mut editor, 0.0);
        assert_eq!(editor.commit().unwrap().color(), Rgb(1, 2, 3));
    }

    #[test]
    fn apply_color_recolors_selection_only() {
        let mut editor = Editor::default();
        click_triangle(&mut editor, 0.0);
        editor.commit().unwrap();
        editor.toggle_mode();
        editor.click(Point::new(10.0, 5.0));

        editor.apply_color(Rgb(9, 9, 9));
        assert_eq!(editor.scene().polygons()[0].color(), Rgb(9, 9, 9));
        assert_eq!(editor.current_color(), Rgb::RED);
    }

    #[test]
    fn fill_and_remove_need_selection() {
        let mut editor = Editor::default();
        click_triangle(&mut editor, 0.0);
        editor.commit().unwrap();

        assert!(!editor.fill_selected());
        assert!(!editor.remove_selected());

        editor.toggle_mode();
        editor.click(Point::new(10.0, 5.0));
        assert!(editor.fill_selected());
        assert!(editor.scene().polygons()[0].fill_enabled());
        assert!(editor.remove_selected());
        assert!(editor.scene().is_empty());
    }

    #[test]
    fn clear_scene_keeps_tolerance() {
        let mut editor = Editor::new(Scene::with_hit_tolerance(7.5));
        click_triangle(&mut editor, 0.0);
        editor.commit().unwrap();
        editor.toggle_mode();
        assert!(editor.click(Point::new(10.0, 5.0)));

        editor.clear_scene();
        assert!(editor.scene().is_empty());
        assert_eq!(editor.scene().selected_index(), None);
        assert!(editor.pending().is_empty());
        assert_eq!(editor.scene().hit_tolerance(), 7.5);
    }

    #[test]
    fn preview_drawn_after_second_vertex() {
        let mut editor = Editor::default();
        editor.click(Point::new(0.0, 0.0));

        let mut list = DisplayList::new();
        editor.render(&mut list);
        assert!(list.is_empty(), "single vertex draws nothing");

        editor.click(Point::new(10.0, 0.0));
        list.clear();
        editor.render(&mut list);

        assert!(matches!(
            &list.commands()[0],
            DrawCommand::Polyline { points, color } if points.len() == 2 && *color == PREVIEW_COLOR
        ));
        let markers = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Marker { radius, .. } if *radius == PREVIEW_MARKER_RADIUS))
            .count();
        assert_eq!(markers, 2);
    }

    #[test]
    fn outline_toggle_reaches_render() {
        let mut editor = Editor::default();
        click_triangle(&mut editor, 0.0);
        editor.commit().unwrap();

        assert!(!editor.toggle_outlines());
        let mut list = DisplayList::new();
        editor.render(&mut list);
        assert!(list.is_empty());
    }
}
