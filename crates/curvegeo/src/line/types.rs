//! Polyline storage and the bookkeeping primitives everything else builds on.
//!
//! - `Polyline`: ordered points plus a closed flag; the closing span of a
//!   closed line is implicit (the first point is never repeated at the end).
//! - `SpanInfo`, `LineProps`: small value records returned by lookups.
//!
//! Code cross-refs: `metrics::classify`, `walk`, `crate::fragment::Fragment`

use nalgebra::Vector2;

use crate::transform::Affine2;

/// A point in the single planar frame supplied by the caller.
pub type Point = Vector2<f64>;

/// z-component of `a × b`. Positive when `b` turns counter-clockwise from `a`.
#[inline]
pub(crate) fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Ordered point sequence, open or closed.
///
/// Invariants:
/// - A closed line stores each vertex once; span `n-1` joins the last point
///   back to the first. Constructors drop a trailing duplicate of the first
///   point.
/// - Fewer than 2 points means no spans; span-dependent queries return `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    points: Vec<Point>,
    closed: bool,
}

/// Endpoints and extent of one span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpanInfo {
    pub start: Point,
    pub end: Point,
    pub delta: Point,
    pub length: f64,
}

/// Whole-line measurements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineProps {
    pub closed: bool,
    /// Only meaningful for closed lines.
    pub clockwise: bool,
    /// Enclosed (unsigned) area; zero for open lines.
    pub area: f64,
    pub length: f64,
}

impl Polyline {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        let mut line = Self { points, closed };
        if closed {
            line.drop_closing_duplicate();
        }
        line
    }

    #[inline]
    pub fn open(points: Vec<Point>) -> Self {
        Self::new(points, false)
    }

    /// Closed line; a repeated first point at the end is accepted and dropped.
    #[inline]
    pub fn ring(points: Vec<Point>) -> Self {
        Self::new(points, true)
    }

    /// Convenience for literals and tests.
    pub fn from_xy(coords: &[(f64, f64)], closed: bool) -> Self {
        Self::new(
            coords.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            closed,
        )
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn point(&self, i: usize) -> Option<Point> {
        self.points.get(i).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
        if closed {
            self.drop_closing_duplicate();
        }
    }

    fn drop_closing_duplicate(&mut self) {
        while self.points.len() > 1 && self.points.first() == self.points.last() {
            self.points.pop();
        }
    }

    pub fn push(&mut self, p: Point) {
        if self.closed && self.points.len() > 1 && self.points.first() == Some(&p) {
            return;
        }
        self.points.push(p);
    }

    /// Insert before index `i` (clamped to the end).
    pub fn insert(&mut self, i: usize, p: Point) {
        let i = i.min(self.points.len());
        self.points.insert(i, p);
    }

    pub fn extend<I: IntoIterator<Item = Point>>(&mut self, pts: I) {
        for p in pts {
            self.push(p);
        }
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Remove consecutive repeated points (and, when closed, a last point
    /// equal to the first).
    pub fn condense(&mut self) {
        self.points.dedup();
        if self.closed {
            self.drop_closing_duplicate();
        }
    }

    /// Number of spans: `n-1` open, `n` closed, `0` below two points.
    #[inline]
    pub fn span_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Endpoints of span `i`.
    #[inline]
    pub fn span(&self, i: usize) -> Option<(Point, Point)> {
        if i >= self.span_count() {
            return None;
        }
        let n = self.points.len();
        Some((self.points[i], self.points[(i + 1) % n]))
    }

    pub fn span_info(&self, i: usize) -> Option<SpanInfo> {
        let (start, end) = self.span(i)?;
        let delta = end - start;
        Some(SpanInfo {
            start,
            end,
            delta,
            length: delta.norm(),
        })
    }

    /// All spans as `(index, start, end)`.
    pub fn spans(&self) -> impl Iterator<Item = (usize, Point, Point)> + '_ {
        let n = self.points.len();
        (0..self.span_count()).map(move |i| (i, self.points[i], self.points[(i + 1) % n]))
    }

    /// Span joining two vertices visited one after the other, in either
    /// direction. `None` if they are not neighbours.
    pub fn span_of_hop(&self, from: usize, to: usize) -> Option<usize> {
        let n = self.points.len();
        if from >= n || to >= n || self.span_count() == 0 {
            return None;
        }
        let succ = |i: usize| -> Option<usize> {
            if i + 1 < n {
                Some(i + 1)
            } else if self.closed {
                Some(0)
            } else {
                None
            }
        };
        if succ(from) == Some(to) {
            Some(from)
        } else if succ(to) == Some(from) {
            Some(to)
        } else {
            None
        }
    }

    /// Shoelace signed area; positive for counter-clockwise. Zero when open.
    pub fn signed_area(&self) -> f64 {
        if !self.closed || self.points.len() < 3 {
            return 0.0;
        }
        let n = self.points.len();
        let mut a = 0.0;
        for i in 0..n {
            a += cross(self.points[i], self.points[(i + 1) % n]);
        }
        0.5 * a
    }

    pub fn length(&self) -> f64 {
        self.spans().map(|(_, a, b)| (b - a).norm()).sum()
    }

    pub fn properties(&self) -> LineProps {
        let signed = self.signed_area();
        LineProps {
            closed: self.closed,
            clockwise: signed < 0.0,
            area: signed.abs(),
            length: self.length(),
        }
    }

    /// True when the line has no spans or is shorter than `tol`.
    ///
    /// Nothing is shorter than a non-positive `tol`, so a line with spans is
    /// never too short then.
    pub fn too_short(&self, tol: f64) -> bool {
        self.points.len() <= 1 || self.length() < tol
    }

    /// Owned open copy of points `start..=end` (clamped to the line).
    pub fn portion(&self, start: usize, end: usize) -> Option<Polyline> {
        if start >= self.points.len() || start > end {
            return None;
        }
        let end = end.min(self.points.len() - 1);
        Some(Polyline::open(self.points[start..=end].to_vec()))
    }

    /// Index and distance of the nearest stored vertex.
    pub fn closest_vertex(&self, p: Point) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, q) in self.points.iter().enumerate() {
            let d2 = (q - p).norm_squared();
            if best.is_none_or(|(_, b)| d2 < b) {
                best = Some((i, d2));
                if d2 == 0.0 {
                    break;
                }
            }
        }
        best.map(|(i, d2)| (i, d2.sqrt()))
    }

    pub fn transform(&mut self, f: &Affine2) {
        for p in &mut self.points {
            *p = f.apply(*p);
        }
    }

    pub fn translate(&mut self, d: Point) {
        self.transform(&Affine2::translation(d));
    }

    /// Counter-clockwise rotation (radians) about `pivot`.
    pub fn rotate(&mut self, pivot: Point, angle: f64) {
        self.transform(&Affine2::rotation_about(pivot, angle));
    }

    pub fn scale(&mut self, pivot: Point, sx: f64, sy: f64) {
        self.transform(&Affine2::scaling_about(pivot, sx, sy));
    }
}
