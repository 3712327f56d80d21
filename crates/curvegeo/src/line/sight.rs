//! Line-of-sight intersection against a polyline.
//!
//! Method
//! - Parameterise the sight line as `from + t·u` with unit `u` toward the
//!   second test point, and each span as `a + s·(b − a)`.
//! - Solve for `s`; an intersection lies on the span when `0 <= s <= 1`.
//!   Values just outside (within `SIGHT_SLACK`) are clamped onto the span and
//!   kept as fallbacks for round-off at span joints.
//! - The nearest intersection (by `|t|`) wins. Without any, the vertex nearest
//!   to the sight line is reported as the closest approach.

use super::types::{cross, Point, Polyline};
use crate::cfg::{BETWEEN_SLACK, PARALLEL_EPS, SIGHT_SLACK, SPAN_EPS};

/// Result of a line-of-sight probe.
///
/// With `hit = true`: `point` is the intersection, `distance` the signed
/// distance from `from` along the sight direction, `approach` is zero.
/// With `hit = false`: `point` is the line vertex closest to the sight line,
/// `approach` its perpendicular gap, `distance` its position along the sight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sight {
    pub hit: bool,
    pub point: Point,
    pub distance: f64,
    pub approach: f64,
    pub span: usize,
    /// Does `point` fall between the two test points (with 1% slack)?
    pub between: bool,
}

#[derive(Clone, Copy)]
struct Candidate {
    point: Point,
    distance: f64,
    span: usize,
}

/// Probe `line` along the sight line from `from` through `toward`.
///
/// With `back = false`, intersections behind `from` are ignored. Returns
/// `None` when the test points coincide or the line has no spans.
pub fn line_sight(line: &Polyline, from: Point, toward: Point, back: bool) -> Option<Sight> {
    let count = line.span_count();
    if count == 0 {
        return None;
    }
    let sv = toward - from;
    let len = sv.norm();
    if len == 0.0 {
        return None;
    }
    let u = sv / len;
    let tol = len * BETWEEN_SLACK;
    let between = |d: f64| d > -tol && d < len + tol;

    let mut exact: Option<Candidate> = None;
    let mut close: Option<Candidate> = None;
    let mut behind = false;

    for (i, a, b) in line.spans() {
        let d = b - a;
        if d.x == 0.0 && d.y == 0.0 {
            continue;
        }
        let denom = cross(d, u);
        let s = if denom.abs() <= PARALLEL_EPS * d.norm() {
            // Parallel: only a collinear span can meet the sight line.
            if cross(u, a - from).abs() > SPAN_EPS {
                continue;
            }
            (from - a).dot(&d) / d.norm_squared()
        } else {
            let s = cross(from - a, u) / denom;
            if !(-SIGHT_SLACK..=1.0 + SIGHT_SLACK).contains(&s) {
                continue;
            }
            s
        };
        let on_span = (0.0..=1.0).contains(&s);
        let q = a + d * s.clamp(0.0, 1.0);
        let dist = (q - from).dot(&u);
        if !back && dist < 0.0 {
            behind |= on_span;
            continue;
        }
        let cand = Candidate {
            point: q,
            distance: dist,
            span: i,
        };
        if on_span {
            if exact.is_none_or(|e| dist.abs() < e.distance.abs()) {
                exact = Some(cand);
            }
        } else if close.is_none_or(|c| dist.abs() < c.distance.abs()) {
            close = Some(cand);
        }
    }

    if let Some(c) = exact.or(if behind { None } else { close }) {
        return Some(Sight {
            hit: true,
            point: c.point,
            distance: c.distance,
            approach: 0.0,
            span: c.span,
            between: between(c.distance),
        });
    }

    // No intersection: report the vertex nearest to the sight line.
    let mut best: Option<(f64, f64, usize, Point)> = None;
    for (i, &q) in line.points().iter().enumerate() {
        let w = q - from;
        let d = w.dot(&u);
        let a = cross(u, w).abs();
        if best.is_none_or(|(ba, bd, _, _)| a < ba || (a == ba && d.abs() < bd.abs())) {
            best = Some((a, d, i, q));
        }
    }
    best.map(|(a, d, i, q)| Sight {
        hit: false,
        point: q,
        distance: d,
        approach: a,
        span: i.min(count - 1),
        between: between(d),
    })
}

/// Proper intersection of segments `a0→a1` and `b0→b1`.
///
/// Returns the point and both segment parameters (each in `[0,1]`), or `None`
/// for parallel or non-meeting segments.
pub fn segment_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<(Point, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = cross(da, db);
    if denom.abs() <= PARALLEL_EPS * da.norm() * db.norm() || denom == 0.0 {
        return None;
    }
    let w = b0 - a0;
    let ta = cross(w, db) / denom;
    let tb = cross(w, da) / denom;
    if !(0.0..=1.0).contains(&ta) || !(0.0..=1.0).contains(&tb) {
        return None;
    }
    Some((a0 + da * ta, ta, tb))
}
