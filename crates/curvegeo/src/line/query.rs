//! Whole-line predicates: box overlap, angular contiguity about a test point,
//! and copy detection.

use std::f64::consts::{PI, TAU};

use super::sight::segment_intersection;
use super::types::{Point, Polyline};

/// Axis-aligned box, edges included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Box spanned by two opposite corners, in any order.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }

    /// Does the segment `a → b` touch the box?
    fn meets_segment(&self, a: Point, b: Point) -> bool {
        if self.contains(a) || self.contains(b) {
            return true;
        }
        let c = self.corners();
        (0..4).any(|k| segment_intersection(a, b, c[k], c[(k + 1) % 4]).is_some())
    }
}

/// Bearing of `p` seen from `from`, radians in `(-π, π]`.
#[inline]
fn bearing(from: Point, p: Point) -> f64 {
    let d = p - from;
    d.y.atan2(d.x)
}

/// Is the bearing change from `a` to `b` larger than `max_turn`?
#[inline]
fn jumps(a: f64, b: f64, max_turn: f64) -> bool {
    let d = (b - a).rem_euclid(TAU);
    d.min(TAU - d) > max_turn
}

impl Polyline {
    /// Does any vertex or span of the line lie in `bbox`?
    ///
    /// Spans crossing the box without a vertex inside count too, including
    /// the closing span of a closed line.
    pub fn passes_through(&self, bbox: &BoundingBox) -> bool {
        match self.points() {
            [] => false,
            [p] => bbox.contains(*p),
            _ => self.spans().any(|(_, a, b)| bbox.meets_segment(a, b)),
        }
    }

    /// Bearings from `p` to consecutive vertices never change by more than
    /// `max_turn` radians.
    ///
    /// Only stored vertices are compared, so the closing span of a closed line
    /// is not checked. `false` for fewer than two points or `max_turn` outside
    /// `(0, π)`.
    pub fn is_contiguous_from(&self, p: Point, max_turn: f64) -> bool {
        if self.len() < 2 || !(max_turn > 0.0 && max_turn < PI) {
            return false;
        }
        self.points()
            .windows(2)
            .all(|w| !jumps(bearing(p, w[0]), bearing(p, w[1]), max_turn))
    }

    /// Split the line into open runs wherever the bearing from `p` jumps by
    /// more than `max_turn` radians.
    ///
    /// A run starts at the vertex after a jump; runs left with a single vertex
    /// are dropped. Empty for fewer than two points or `max_turn` outside
    /// `(0, π)`.
    pub fn contiguous_runs(&self, p: Point, max_turn: f64) -> Vec<Polyline> {
        let pts = self.points();
        if pts.len() < 2 || !(max_turn > 0.0 && max_turn < PI) {
            return Vec::new();
        }
        let mut runs = Vec::new();
        let mut current = vec![pts[0]];
        for w in pts.windows(2) {
            if jumps(bearing(p, w[0]), bearing(p, w[1]), max_turn) {
                if current.len() >= 2 {
                    runs.push(Polyline::open(std::mem::take(&mut current)));
                } else {
                    current.clear();
                }
            }
            current.push(w[1]);
        }
        if current.len() >= 2 {
            runs.push(Polyline::open(current));
        }
        runs
    }

    /// Same points as `other`, forwards or reversed.
    ///
    /// Exact coordinate comparison; the closed flags are not compared. `false`
    /// when either line has fewer than two points.
    pub fn matches(&self, other: &Polyline) -> bool {
        let (a, b) = (self.points(), other.points());
        if a.len() < 2 || a.len() != b.len() {
            return false;
        }
        a == b || a.iter().eq(b.iter().rev())
    }
}
