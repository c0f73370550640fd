//! Scanline polygon fill.
//!
//! This is the HOT PATH for filled polygons: it runs once per filled
//! polygon on every redraw.
//!
//! The algorithm is the classic edge table / active edge table pair:
//!
//! 1. Every non-horizontal edge goes into the **edge table**, keyed by
//!    the integer scanline where it starts (its lower y). The table is
//!    sparse, so tall polygons cost nothing until they're walked.
//! 2. Walking down the scanlines, edges move from their bucket into the
//!    **active edge table** when they start and drop out when they end.
//! 3. On each scanline the active edges are sorted by their current x and
//!    consumed in pairs; each pair is one horizontal span of interior.
//! 4. Each active edge then steps its x by its inverse slope (dx/dy) for
//!    the next scanline.

use std::collections::BTreeMap;

use crate::geometry::Point;
use crate::polygon::MIN_VERTICES;

/// A horizontal run of pixels on one scanline, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub y: i32,
    pub x_start: i32,
    pub x_end: i32,
}

impl Span {
    #[inline]
    pub fn new(y: i32, x_start: i32, x_end: i32) -> Self {
        Self { y, x_start, x_end }
    }

    /// Pixel count covered by the span.
    #[inline]
    pub fn len(&self) -> usize {
        (self.x_end as i64 - self.x_start as i64) as usize + 1
    }

    /// Spans always cover at least one pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// One edge record in the edge table and the active edge table.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Edge {
    /// Scanline where the edge stops contributing.
    y_max: f64,
    /// Current x intersection; starts at the x of the lower endpoint.
    x: f64,
    /// dx/dy, added to `x` once per scanline.
    inverse_slope: f64,
}

/// Lazy iterator over the fill spans of one polygon.
///
/// ## Rust Lesson #6: Iterators Own Their State
///
/// Instead of returning a `Vec<Span>` we return a struct that implements
/// `Iterator`. Nothing is computed past the current scanline until the
/// caller asks for the next span, and `.collect()` still works when you
/// want everything at once. The iterator copies the edge data it needs,
/// so it doesn't borrow the polygon.
///
/// `Clone` gives a restartable snapshot: a clone resumes from exactly where
/// the original was.
#[derive(Debug, Clone)]
pub struct FillSpans {
    /// Edge table keyed by starting scanline. Only scanlines where an edge
    /// starts have an entry, and entries are removed as they go active.
    edge_table: BTreeMap<i32, Vec<Edge>>,
    /// Active edge table for the current scanline.
    active: Vec<Edge>,
    y_min: i32,
    y_max: i32,
    /// Scanline being emitted. Wider than `i32` so stepping past
    /// `i32::MAX` ends the walk instead of overflowing.
    y: i64,
    /// Index of the next pair to emit within `active`.
    cursor: usize,
    /// Whether `active` has been prepared for scanline `y`.
    primed: bool,
}

/// Compute the fill spans of a closed vertex ring.
///
/// Fewer than three vertices, or any NaN or infinite coordinate, yields an
/// empty iterator. Float-to-int casts saturate, so coordinates beyond the
/// `i32` range are pinned to its ends.
pub fn fill_spans(vertices: &[Point]) -> FillSpans {
    if vertices.len() < MIN_VERTICES || !vertices.iter().all(Point::is_finite) {
        return FillSpans::empty();
    }

    let min_y = vertices.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = vertices.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    let y_min = min_y.floor() as i32;
    let y_max = max_y.ceil() as i32;

    let mut edge_table: BTreeMap<i32, Vec<Edge>> = BTreeMap::new();

    let n = vertices.len();
    for i in 0..n {
        let mut p1 = vertices[i];
        let mut p2 = vertices[(i + 1) % n];

        // Horizontal edges never cross a scanline in the even-odd sense
        if p1.y == p2.y {
            continue;
        }
        if p1.y > p2.y {
            std::mem::swap(&mut p1, &mut p2);
        }

        let inverse_slope = (p2.x - p1.x) / (p2.y - p1.y);
        let start = p1.y.floor();
        let row = start as i32;
        // Zero unless the start was pinned to `i32::MIN`
        let skipped = row as f64 - start;

        edge_table.entry(row).or_default().push(Edge {
            y_max: p2.y,
            x: p1.x + skipped * inverse_slope,
            inverse_slope,
        });
    }

    FillSpans {
        edge_table,
        active: Vec::new(),
        y_min,
        y_max,
        y: y_min as i64,
        cursor: 0,
        primed: false,
    }
}

impl FillSpans {
    fn empty() -> Self {
        Self {
            edge_table: BTreeMap::new(),
            active: Vec::new(),
            y_min: 0,
            y_max: -1,
            y: 0,
            cursor: 0,
            primed: false,
        }
    }

    /// Integer scanline range `(y_min, y_max)`, or `None` when empty.
    pub fn scanline_range(&self) -> Option<(i32, i32)> {
        (self.y_min <= self.y_max).then_some((self.y_min, self.y_max))
    }

    /// Bring the active edge table up to date for scanline `self.y`.
    ///
    /// Returns `false` once every scanline has been walked.
    fn enter_scanline(&mut self) -> bool {
        if self.active.is_empty() {
            // Nothing active: jump to the next scanline where an edge starts
            let Some(&row) = self.edge_table.keys().next() else {
                return false;
            };
            self.y = self.y.max(row as i64);
        }
        if self.y > self.y_max as i64 {
            return false;
        }

        // In range after the check above
        let row = self.y as i32;
        if let Some(mut bucket) = self.edge_table.remove(&row) {
            self.active.append(&mut bucket);
        }

        let y = self.y as f64;
        self.active.retain(|edge| edge.y_max > y);

        // `sort_by` is stable, so ties keep edge-table insertion order
        self.active.sort_by(|a, b| a.x.total_cmp(&b.x));

        self.cursor = 0;
        self.primed = true;
        true
    }

    /// Step every active edge down to the next scanline.
    fn advance(&mut self) {
        for edge in &mut self.active {
            edge.x += edge.inverse_slope;
        }
        self.y += 1;
        self.primed = false;
    }
}

impl Iterator for FillSpans {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        loop {
            if self.primed {
                // An odd trailing edge has no partner and emits nothing
                if self.cursor + 1 < self.active.len() {
                    let x0 = self.active[self.cursor].x;
                    let x1 = self.active[self.cursor + 1].x;
                    self.cursor += 2;
                    return Some(Span::new(
                        self.y as i32,
                        x0.min(x1).floor() as i32,
                        x0.max(x1).floor() as i32,
                    ));
                }
                self.advance();
            }

            if !self.enter_scanline() {
                return None;
            }
        }
    }
}

impl std::iter::FusedIterator for FillSpans {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn spans_at(spans: &[Span], y: i32) -> Vec<Span> {
        spans.iter().copied().filter(|s| s.y == y).collect()
    }

    #[test]
    fn right_triangle_midline() {
        let tri = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        let spans: Vec<Span> = fill_spans(&tri).collect();

        let mid = spans_at(&spans, 5);
        assert_eq!(mid.len(), 1, "expected one span at y=5, got {:?}", mid);
        assert_eq!(mid[0].x_start, 0);
        assert!((mid[0].x_end - 5).abs() <= 1, "x_end should be ~5, got {}", mid[0].x_end);
    }

    #[test]
    fn right_triangle_full_pass() {
        let tri = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        let spans: Vec<Span> = fill_spans(&tri).collect();

        // Scanlines 0..=9 each get one span narrowing by one pixel
        assert_eq!(spans.len(), 10);
        for (i, span) in spans.iter().enumerate() {
            assert_eq!(span.y, i as i32);
            assert_eq!(span.x_start, 0);
            assert_eq!(span.x_end, 10 - i as i32);
        }
    }

    #[test]
    fn square_spans() {
        let sq = pts(&[(2.0, 3.0), (12.0, 3.0), (12.0, 8.0), (2.0, 8.0)]);
        let spans: Vec<Span> = fill_spans(&sq).collect();
        assert_eq!(spans.len(), 5);
        assert!(spans.iter().all(|s| s.x_start == 2 && s.x_end == 12));
        assert_eq!(spans.first().map(|s| s.y), Some(3));
        assert_eq!(spans.last().map(|s| s.y), Some(7));
    }

    #[test]
    fn spans_stay_within_scanline_bounds() {
        let poly = pts(&[(3.4, 1.7), (40.2, 12.9), (25.0, 33.3), (-4.5, 20.1)]);
        let iter = fill_spans(&poly);
        let (y_min, y_max) = iter.scanline_range().unwrap();
        assert_eq!((y_min, y_max), (1, 34));

        let spans: Vec<Span> = iter.collect();
        assert!(!spans.is_empty());
        assert!(spans.iter().all(|s| s.y >= y_min && s.y <= y_max));
        assert!(spans.iter().all(|s| s.x_start <= s.x_end));
    }

    #[test]
    fn concave_polygon_spans_do_not_overlap() {
        let u = pts(&[
            (0.0, 0.0),
            (30.0, 0.0),
            (30.0, 30.0),
            (20.0, 30.0),
            (20.0, 10.0),
            (10.0, 10.0),
            (10.0, 30.0),
            (0.0, 30.0),
        ]);
        let spans: Vec<Span> = fill_spans(&u).collect();

        // Below the crossbar each scanline has two arms
        let arms = spans_at(&spans, 20);
        assert_eq!(arms, vec![Span::new(20, 0, 10), Span::new(20, 20, 30)]);

        for y in 0..30 {
            let row = spans_at(&spans, y);
            for pair in row.windows(2) {
                assert!(
                    pair[0].x_end < pair[1].x_start,
                    "overlap on y={}: {:?}",
                    y,
                    pair
                );
            }
        }
    }

    #[test]
    fn too_few_vertices_is_empty() {
        assert_eq!(fill_spans(&[]).count(), 0);
        assert_eq!(fill_spans(&pts(&[(0.0, 0.0), (5.0, 5.0)])).count(), 0);
        assert_eq!(fill_spans(&[]).scanline_range(), None);
    }

    #[test]
    fn flat_polygon_has_no_spans() {
        // All edges horizontal: nothing enters the edge table
        let flat = pts(&[(0.0, 4.0), (10.0, 4.0), (5.0, 4.0)]);
        assert_eq!(fill_spans(&flat).count(), 0);
    }

    #[test]
    fn truncates_instead_of_rounding() {
        let tri = pts(&[(0.0, 0.0), (9.9, 0.0), (0.0, 2.0)]);
        let first = fill_spans(&tri).next().unwrap();
        assert_eq!(first, Span::new(0, 0, 9));
    }

    #[test]
    fn negative_coordinates_use_floor() {
        let sq = pts(&[(-5.5, -3.5), (4.5, -3.5), (4.5, 1.5), (-5.5, 1.5)]);
        let spans: Vec<Span> = fill_spans(&sq).collect();
        assert_eq!(spans.first().map(|s| s.y), Some(-4));
        // Edges start at y=-3.5 but are added on scanline -4 with x unchanged
        assert!(spans.iter().all(|s| s.x_start == -6 && s.x_end == 4));
    }

    #[test]
    fn clone_restarts_from_same_point() {
        let tri = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        let mut iter = fill_spans(&tri);
        iter.next();
        iter.next();

        let rest_a: Vec<Span> = iter.clone().collect();
        let rest_b: Vec<Span> = iter.collect();
        assert_eq!(rest_a, rest_b);
        assert_eq!(rest_a.len(), 8);
    }

    #[test]
    fn fresh_call_is_restartable() {
        let tri = pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)]);
        let a: Vec<Span> = fill_spans(&tri).collect();
        let b: Vec<Span> = fill_spans(&tri).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn bowtie_degrades_to_even_odd_pairs() {
        // Self-intersecting: still produces spans, no panic
        let bowtie = pts(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]);
        let spans: Vec<Span> = fill_spans(&bowtie).collect();
        assert!(!spans.is_empty());
        assert_eq!(spans_at(&spans, 2).len(), 2);
    }

    #[test]
    fn span_len_counts_inclusive_pixels() {
        assert_eq!(Span::new(0, 3, 3).len(), 1);
        assert_eq!(Span::new(0, 0, 9).len(), 10);
        assert_eq!(Span::new(0, i32::MIN, i32::MAX).len(), 1 << 32);
    }

    #[test]
    fn non_finite_vertices_give_no_spans() {
        let nan = pts(&[(0.0, 5.0), (10.0, f64::NAN), (0.0, 10.0)]);
        assert_eq!(fill_spans(&nan).count(), 0);

        let inf = pts(&[(0.0, 0.0), (f64::INFINITY, 3.0), (0.0, 10.0)]);
        assert_eq!(fill_spans(&inf).count(), 0);
        assert_eq!(fill_spans(&inf).scanline_range(), None);
    }

    #[test]
    fn extent_beyond_i32_is_pinned() {
        let tall = pts(&[(0.0, -3e9), (10.0, 0.0), (0.0, 3e9)]);
        let mut iter = fill_spans(&tall);
        assert_eq!(iter.scanline_range(), Some((i32::MIN, i32::MAX)));

        // The edges from y=-3e9 join on the first representable row with
        // x stepped forward to match
        let first = iter.next().unwrap();
        assert_eq!(first.y, i32::MIN);
        assert_eq!(first.x_start, 0);
        assert_eq!(first.x_end, 2);

        let rows: Vec<i32> = iter.take(3).map(|s| s.y).collect();
        assert_eq!(rows, vec![i32::MIN + 1, i32::MIN + 2, i32::MIN + 3]);
    }

    #[test]
    fn tall_polygon_starts_lazily() {
        let tall = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 1e8), (0.0, 1e8)]);
        let mut iter = fill_spans(&tall);
        assert_eq!(iter.next(), Some(Span::new(0, 0, 10)));
        assert_eq!(iter.nth(4), Some(Span::new(5, 0, 10)));
    }

    #[test]
    fn walk_ends_at_i32_max() {
        let top = pts(&[(0.0, 2147483645.0), (4.0, 2147483645.0), (0.0, 3e9)]);
        let spans: Vec<Span> = fill_spans(&top).collect();
        assert_eq!(spans.first().map(|s| s.y), Some(2147483645));
        assert_eq!(spans.last().map(|s| s.y), Some(i32::MAX));
        assert_eq!(spans.len(), 3);
    }

    fn edge(x: f64, inverse_slope: f64) -> Edge {
        Edge { y_max: 3.0, x, inverse_slope }
    }

    #[test]
    fn equal_x_edges_keep_insertion_order() {
        let mut iter = FillSpans {
            edge_table: BTreeMap::from([(0, vec![edge(5.0, -1.0), edge(5.0, 1.0), edge(5.0, 0.0)])]),
            active: Vec::new(),
            y_min: 0,
            y_max: 3,
            y: 0,
            cursor: 0,
            primed: false,
        };

        assert!(iter.enter_scanline());
        let slopes: Vec<f64> = iter.active.iter().map(|e| e.inverse_slope).collect();
        assert_eq!(slopes, vec![-1.0, 1.0, 0.0]);

        // Three edges: one pair, the trailing edge is left unpaired
        assert_eq!(iter.next(), Some(Span::new(0, 5, 5)));
        // Next row the edges fan out to x = 4, 6, 5 and re-sort to 4, 5, 6
        assert_eq!(iter.next(), Some(Span::new(1, 4, 5)));
        assert_eq!(iter.next(), Some(Span::new(2, 3, 5)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn shared_vertical_wall_pairs_stably() {
        // Two boxes drawn as one ring that runs up and back down x=10
        let ring = pts(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 4.0),
            (20.0, 4.0),
            (20.0, 0.0),
            (10.0, 0.0),
            (10.0, 4.0),
            (0.0, 4.0),
        ]);
        let spans: Vec<Span> = fill_spans(&ring).collect();
        for y in 0..4 {
            assert_eq!(
                spans_at(&spans, y),
                vec![Span::new(y, 0, 10), Span::new(y, 10, 20)],
                "row {}",
                y
            );
        }
    }
}
