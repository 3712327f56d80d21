//! Projection of a test point onto a polyline, and side/containment tests.
//!
//! - `closest_point_on_polyline`: perpendicular foot on the nearest span.
//! - `classify`: the same projection plus inside (closed lines) and right-of
//!   relative to the nearest span.
//!
//! Conventions
//! - "Right" is taken with respect to the direction of travel along the line.
//!   For a clockwise ring the interior is on the right; for a counter-clockwise
//!   ring it is on the left.
//! - Containment uses the accumulated angle subtended by the spans (winding
//!   test); side uses the nearest span only. The two can disagree on
//!   self-intersecting or multiply-wound rings; such cases are logged at
//!   debug level and left as computed.

use std::f64::consts::PI;

use super::types::{cross, Point, Polyline};
use crate::cfg::SPAN_EPS;

/// Nearest point on a polyline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Perpendicular distance, always `>= 0`.
    pub distance: f64,
    pub point: Point,
    /// Span containing `point`.
    pub span: usize,
}

/// Projection plus side and containment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub projection: Projection,
    /// Enclosed by the line (closed lines only; `false` when open).
    pub inside: bool,
    /// On the right of the nearest span's direction.
    pub right: bool,
    /// Orientation of the line (closed lines only).
    pub clockwise: bool,
}

impl Classification {
    /// Zero distance: the point lies on the line and its side is undefined.
    #[inline]
    pub fn on_line(&self) -> bool {
        self.projection.distance == 0.0
    }
}

#[derive(Clone, Copy, Debug)]
struct Foot {
    point: Point,
    span: usize,
    t: f64,
    d2: f64,
}

fn project(line: &Polyline, p: Point) -> Option<Foot> {
    if line.span_count() == 0 {
        return None;
    }
    let mut best: Option<Foot> = None;
    for (i, a, b) in line.spans() {
        let d = b - a;
        if d.x.abs() < SPAN_EPS && d.y.abs() < SPAN_EPS {
            continue;
        }
        let t = ((p - a).dot(&d) / d.norm_squared()).clamp(0.0, 1.0);
        let q = a + d * t;
        let d2 = (p - q).norm_squared();
        if best.is_none_or(|f| d2 < f.d2) {
            best = Some(Foot {
                point: q,
                span: i,
                t,
                d2,
            });
        }
    }
    // Every span is degenerate: the whole line sits on its first point.
    best.or_else(|| {
        let first = line.points()[0];
        Some(Foot {
            point: first,
            span: 0,
            t: 0.0,
            d2: (p - first).norm_squared(),
        })
    })
}

/// Closest point on `line` to `p`, by perpendicular projection onto each span
/// (clamped to the span ends). Ties keep the earliest span.
///
/// Returns `None` for lines with fewer than two points.
pub fn closest_point_on_polyline(line: &Polyline, p: Point) -> Option<Projection> {
    project(line, p).map(|f| Projection {
        distance: f.d2.sqrt(),
        point: f.point,
        span: f.span,
    })
}

/// Side and containment of `p` relative to `line`.
///
/// Returns `None` for lines with fewer than two points. A point lying exactly
/// on the line is reported with `inside = false` and `right = false`; callers
/// detect it through [`Classification::on_line`].
pub fn classify(line: &Polyline, p: Point) -> Option<Classification> {
    let foot = project(line, p)?;
    let projection = Projection {
        distance: foot.d2.sqrt(),
        point: foot.point,
        span: foot.span,
    };
    let signed_area = line.signed_area();
    let clockwise = signed_area < 0.0;
    if foot.d2 == 0.0 {
        return Some(Classification {
            projection,
            inside: false,
            right: false,
            clockwise,
        });
    }
    let right = right_of_foot(line, &foot, p);
    let inside = line.is_closed() && winding_angle(line, p).abs() > PI;
    if line.is_closed() && signed_area != 0.0 && inside != (right == clockwise) {
        tracing::debug!(
            x = p.x,
            y = p.y,
            inside,
            right,
            clockwise,
            span = foot.span,
            "containment and nearest-span side disagree"
        );
    }
    Some(Classification {
        projection,
        inside,
        right,
        clockwise,
    })
}

/// Side of `p` relative to span `foot.span`, corrected at shared vertices.
fn right_of_foot(line: &Polyline, foot: &Foot, p: Point) -> bool {
    let Some(info) = line.span_info(foot.span) else {
        return false;
    };
    let d = info.delta;
    if foot.t > 0.0 && foot.t < 1.0 {
        return cross(d, p - info.start) < 0.0;
    }
    let count = line.span_count();
    let closed = line.is_closed();
    let at_start = foot.t <= 0.0;
    let neighbour = if at_start {
        if foot.span > 0 {
            Some(foot.span - 1)
        } else if closed {
            Some(count - 1)
        } else {
            None
        }
    } else if foot.span + 1 < count {
        Some(foot.span + 1)
    } else if closed {
        Some(0)
    } else {
        None
    };
    let Some(other) = neighbour.and_then(|j| line.span_info(j)) else {
        return cross(d, p - info.start) < 0.0;
    };
    if other.length <= SPAN_EPS {
        return cross(d, p - info.start) < 0.0;
    }
    if at_start {
        wedge_right(other.delta, d, p - info.start)
    } else {
        wedge_right(d, other.delta, p - info.end)
    }
}

/// Side of `w` (relative to a vertex) for a corner entered along `d_in` and
/// left along `d_out`. The convex side of the corner is a wedge bounded by
/// both spans; everything else belongs to the other side.
#[inline]
fn wedge_right(d_in: Point, d_out: Point, w: Point) -> bool {
    let c_in = cross(d_in, w);
    let c_out = cross(d_out, w);
    let turn = cross(d_in, d_out);
    if turn > 0.0 {
        !(c_in > 0.0 && c_out > 0.0)
    } else if turn < 0.0 {
        c_in < 0.0 && c_out < 0.0
    } else {
        c_in < 0.0
    }
}

/// Signed angle swept by the line as seen from `p` (±2π once around).
fn winding_angle(line: &Polyline, p: Point) -> f64 {
    line.spans()
        .map(|(_, a, b)| {
            let u = a - p;
            let v = b - p;
            cross(u, v).atan2(u.dot(&v))
        })
        .sum()
}
