//! Terminal polygon editor.
//!
//! Mouse driven: left click places vertices (draw mode) or selects (select
//! mode), right click closes the polygon. Everything else is on the
//! keyboard. The scene is drawn with ratatui's braille canvas, so one
//! terminal cell covers a 2x4 block of canvas dots.

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use fillpoly::{DisplayList, DrawCommand, Editor, Mode, Point, Rgb};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Context as CanvasContext, Line as CanvasLine},
        Block, Borders, Paragraph,
    },
};
use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::raster::RasterSurface;

/// Application state for the terminal editor.
struct App {
    editor: Editor,
    config: EditorConfig,
    /// Inner area of the canvas block from the last frame, for mouse mapping
    canvas_area: Rect,
    /// Pointer position in canvas coordinates
    pointer: Option<Point>,
    /// Last feedback line (validation errors, snapshot paths)
    message: Option<String>,
    palette_index: usize,
    should_quit: bool,
}

impl App {
    fn new(config: EditorConfig) -> Self {
        Self {
            editor: config.build_editor(),
            config,
            canvas_area: Rect::default(),
            pointer: None,
            message: None,
            palette_index: 0,
            should_quit: false,
        }
    }

    /// Map a terminal cell to canvas coordinates (y down, like the model).
    fn to_canvas(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.canvas_area;
        if area.width == 0 || area.height == 0 {
            return None;
        }
        if column < area.x || row < area.y || column >= area.x + area.width || row >= area.y + area.height {
            return None;
        }

        let fx = (column - area.x) as f64 + 0.5;
        let fy = (row - area.y) as f64 + 0.5;
        Some(Point::new(
            fx / area.width as f64 * self.config.canvas.width as f64,
            fy / area.height as f64 * self.config.canvas.height as f64,
        ))
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let point = self.to_canvas(mouse.column, mouse.row);
        self.pointer = point.or(self.pointer);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(p) = point {
                    self.editor.click(p);
                    self.message = None;
                }
            }
            MouseEventKind::Down(MouseButton::Right) => self.commit(),
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                self.editor.cancel();
                self.message = None;
            }
            KeyCode::Enter => self.commit(),
            KeyCode::Char('m') => {
                self.editor.toggle_mode();
                self.message = None;
            }
            KeyCode::Char('c') => {
                self.editor.clear_scene();
                self.message = Some("Scene cleared".to_string());
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if !self.editor.remove_selected() {
                    self.message = Some("Nothing selected".to_string());
                }
            }
            KeyCode::Char('f') => {
                if !self.editor.fill_selected() {
                    self.message = Some("Nothing selected".to_string());
                }
            }
            KeyCode::Char('e') => {
                self.editor.toggle_outlines();
            }
            KeyCode::Char('p') => {
                self.palette_index = (self.palette_index + 1) % self.config.palette.len();
                let color = self.config.palette[self.palette_index];
                self.editor.apply_color(color);
                self.message = Some(format!("Color {}", color));
            }
            KeyCode::Char('s') => {
                self.message = Some(match self.snapshot() {
                    Ok(path) => format!("Saved {}", path),
                    Err(e) => {
                        warn!(error = %e, "snapshot failed");
                        format!("Snapshot failed: {:#}", e)
                    }
                });
            }
            _ => {}
        }
    }

    fn commit(&mut self) {
        self.message = match self.editor.commit() {
            Ok(_) => None,
            Err(e) => Some(e.to_string()),
        };
    }

    /// Rasterize the editor view at canvas resolution and save it as PNG.
    fn snapshot(&self) -> Result<String> {
        let mut surface = RasterSurface::new(self.config.canvas.width, self.config.canvas.height)?;
        self.editor.render(&mut surface);

        let name = format!("fillpoly-{}.png", Local::now().format("%Y%m%d-%H%M%S"));
        let path = self.config.snapshot_dir.join(name);
        surface.save(&path)?;

        info!(path = %path.display(), "snapshot written");
        Ok(path.display().to_string())
    }
}

#[inline]
fn term_color(color: Rgb) -> Color {
    Color::Rgb(color.r(), color.g(), color.b())
}

/// Draw recorded commands onto a ratatui canvas, flipping y so the canvas
/// origin ends up top-left like the model's.
fn paint(ctx: &mut CanvasContext<'_>, commands: &DisplayList, height: f64) {
    let flip = |p: &Point| (p.x, height - p.y);

    let segment = |ctx: &mut CanvasContext<'_>, a: &Point, b: &Point, color: Rgb| {
        let (x1, y1) = flip(a);
        let (x2, y2) = flip(b);
        ctx.draw(&CanvasLine { x1, y1, x2, y2, color: term_color(color) });
    };

    for command in commands {
        match command {
            DrawCommand::Span { span, color } => {
                let y = height - span.y as f64;
                ctx.draw(&CanvasLine {
                    x1: span.x_start as f64,
                    y1: y,
                    x2: span.x_end as f64,
                    y2: y,
                    color: term_color(*color),
                });
            }
            DrawCommand::Outline { vertices, color } => {
                let n = vertices.len();
                for i in 0..n {
                    segment(ctx, &vertices[i], &vertices[(i + 1) % n], *color);
                }
            }
            DrawCommand::Polyline { points, color } => {
                for pair in points.windows(2) {
                    segment(ctx, &pair[0], &pair[1], *color);
                }
            }
            DrawCommand::Marker { center, radius, color } => {
                let (x, y) = flip(center);
                ctx.draw(&Circle { x, y, radius: *radius, color: term_color(*color) });
            }
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let editor = &app.editor;
    let width = app.config.canvas.width as f64;
    let height = app.config.canvas.height as f64;

    let mode_color = match editor.mode() {
        Mode::Draw => Color::Green,
        Mode::Select => Color::Cyan,
    };
    let canvas_block = Block::default()
        .title(format!(" fillpoly [{}] ", editor.mode()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(mode_color));
    app.canvas_area = canvas_block.inner(main_layout[0]);

    let mut commands = DisplayList::new();
    editor.render(&mut commands);

    let canvas = Canvas::default()
        .block(canvas_block)
        .background_color(Color::White)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| paint(ctx, &commands, height));
    frame.render_widget(canvas, main_layout[0]);

    // Status bar
    let pointer = app
        .pointer
        .map(|p| format!("({:.0}, {:.0})", p.x, p.y))
        .unwrap_or_else(|| "(-, -)".to_string());
    let selected = editor
        .scene()
        .selected_index()
        .map(|i| format!("#{}", i + 1))
        .unwrap_or_else(|| "none".to_string());

    let status = vec![
        Line::from(vec![
            Span::styled(editor.mode().hint(), Style::default().fg(mode_color)),
            Span::raw(format!(
                "   Coordinates: {}   Polygons: {}   Selected: {}   Pending: {}   ",
                pointer,
                editor.scene().len(),
                selected,
                editor.pending().len(),
            )),
            Span::styled("  ", Style::default().bg(term_color(editor.current_color()))),
            Span::raw(format!(" {}", editor.current_color())),
        ]),
        Line::from(Span::styled(
            app.message.clone().unwrap_or_default(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "L-click vertex/select  R-click/Enter close  Esc cancel  m mode  f fill  p color  e edges  x remove  c clear  s snapshot  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let status_bar = Paragraph::new(status).block(Block::default().borders(Borders::TOP));
    frame.render_widget(status_bar, main_layout[1]);
}

/// Run the terminal editor until the user quits.
pub fn run_tui(config: EditorConfig) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(config);
    info!("editor started");

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;

    info!(polygons = app.editor.scene().len(), "editor closed");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key.code),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        let mut app = App::new(EditorConfig::default());
        // 80x60 cells over an 800x600 canvas: one cell is 10x10 units
        app.canvas_area = Rect::new(1, 1, 80, 60);
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
    }

    fn left_click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    }

    #[test]
    fn maps_cells_to_canvas() {
        let app = app();
        assert_eq!(app.to_canvas(1, 1), Some(Point::new(5.0, 5.0)));
        assert_eq!(app.to_canvas(80, 60), Some(Point::new(795.0, 595.0)));
        assert_eq!(app.to_canvas(0, 5), None);
        assert_eq!(app.to_canvas(81, 5), None);
    }

    #[test]
    fn right_click_with_two_vertices_reports_error() {
        let mut app = app();
        left_click(&mut app, 5, 5);
        left_click(&mut app, 20, 5);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 10, 10));

        assert!(app.editor.scene().is_empty());
        let message = app.message.clone().unwrap_or_default();
        assert!(message.contains("at least 3"), "got '{}'", message);
    }

    #[test]
    fn draw_select_fill_remove_flow() {
        let mut app = app();
        left_click(&mut app, 5, 5);
        left_click(&mut app, 30, 5);
        left_click(&mut app, 30, 30);
        left_click(&mut app, 5, 30);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.editor.scene().len(), 1);
        assert!(app.message.is_none());

        app.handle_key(KeyCode::Char('m'));
        assert_eq!(app.editor.mode(), Mode::Select);
        left_click(&mut app, 15, 15);
        assert_eq!(app.editor.scene().selected_index(), Some(0));

        app.handle_key(KeyCode::Char('f'));
        assert!(app.editor.scene().polygons()[0].fill_enabled());

        app.handle_key(KeyCode::Char('p'));
        assert_eq!(app.editor.scene().polygons()[0].color(), app.config.palette[1]);

        app.handle_key(KeyCode::Delete);
        assert!(app.editor.scene().is_empty());
    }

    #[test]
    fn fill_without_selection_says_so() {
        let mut app = app();
        app.handle_key(KeyCode::Char('f'));
        assert_eq!(app.message.as_deref(), Some("Nothing selected"));
    }

    #[test]
    fn pointer_tracks_motion() {
        let mut app = app();
        app.handle_mouse(mouse(MouseEventKind::Moved, 11, 21));
        assert_eq!(app.pointer, Some(Point::new(105.0, 205.0)));
        assert!(app.editor.pending().is_empty());
    }

    #[test]
    fn snapshot_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = EditorConfig::default();
        config.canvas.width = 40;
        config.canvas.height = 30;
        config.snapshot_dir = dir.path().to_path_buf();

        let app = App::new(config);
        let path = app.snapshot().unwrap();
        assert!(std::path::Path::new(&path).exists());
    }
}
