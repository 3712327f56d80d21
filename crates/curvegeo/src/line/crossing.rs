//! Crossings between two polylines.
//!
//! Purpose
//! - `find_single_crossing`: bisection on vertex indices for a pair known to
//!   cross at most once. Logarithmic in the number of vertices.
//! - `next_crossing` / `all_crossings`: sequential scan that finds every
//!   crossing, one call per crossing.
//! - `self_crossing`: first place where a line crosses itself.
//! - `approach`: first hit of a test line on a line, or where they come
//!   closest.
//!
//! Method
//! - Each vertex of the scanned line is classified against the other line;
//!   a change of side brackets a crossing, which line-of-sight then resolves
//!   exactly. Vertices lying exactly on the other line have no side and are
//!   carried forward until a sided vertex appears.
//! - Around the free end of an open line sides flip without any crossing, so
//!   a hop is only accepted when the sight hit lies on the hop itself.
//!
//! Limitations
//! - Two crossings inside one hop leave both ends on the same side and are
//!   not reported by the scanners.

use super::metrics::{classify, closest_point_on_polyline};
use super::sight::{line_sight, segment_intersection, Sight};
use super::types::{Point, Polyline};
use crate::cfg::HOP_EPS;

/// A crossing found by a scan or a bisection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossing {
    pub point: Point,
    /// Span of the scanned line containing the crossing.
    pub span_a: usize,
    /// Span of the other line containing the crossing.
    pub span_b: usize,
    /// Side of the other line the scanned line is on after the crossing.
    pub right_after: bool,
}

impl Crossing {
    /// Vertex to pass as `start` to continue the scan past this crossing.
    #[inline]
    pub fn resume_from(&self) -> usize {
        self.span_a + 1
    }
}

/// Bracketing span found, but line-of-sight did not land inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearMiss {
    /// Point of the other line closest to the bracketing span.
    pub point: Point,
    /// Gap between the bracketing span and the other line, `> 0`.
    pub approach: f64,
    pub span_a: usize,
    pub span_b: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bisection {
    Crossing(Crossing),
    NearMiss(NearMiss),
    NotFound,
}

impl Bisection {
    #[inline]
    pub fn crossing(self) -> Option<Crossing> {
        match self {
            Bisection::Crossing(c) => Some(c),
            _ => None,
        }
    }
}

/// Crossing found by [`scan_points`], expressed as the hop between two
/// consecutive walked points.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScanHit<K> {
    pub point: Point,
    pub from: K,
    pub to: K,
    pub span_b: usize,
    pub right_after: bool,
}

/// Side of `p` against `line_b`: `Some(Some(right))`, `Some(None)` when `p`
/// lies on `line_b`, `None` when `line_b` has no spans.
#[inline]
pub(crate) fn side_of(line_b: &Polyline, p: Point) -> Option<Option<bool>> {
    let c = classify(line_b, p)?;
    Some(if c.on_line() { None } else { Some(c.right) })
}

/// Distance from `p` to the segment `a → b`.
#[inline]
fn segment_gap(p: Point, a: Point, b: Point) -> f64 {
    let d = b - a;
    let len2 = d.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&d) / len2).clamp(0.0, 1.0);
    (a + d * t - p).norm()
}

/// Line-of-sight hit of `line_b` that lies on the hop `p → q` itself.
///
/// Fallbacks clamped onto a free end of an open `line_b` land off the hop and
/// are rejected here.
fn hop_hit(line_b: &Polyline, p: Point, q: Point) -> Option<Sight> {
    let sight = line_sight(line_b, p, q, false)?;
    let tol = HOP_EPS * (1.0 + p.amax().max(q.amax()));
    (sight.hit && segment_gap(sight.point, p, q) <= tol).then_some(sight)
}

/// Smallest gap between the hop `p → q` and `line_b`, with the point of
/// `line_b` where it is reached and that point's span.
fn hop_gap(line_b: &Polyline, p: Point, q: Point) -> Option<(f64, Point, usize)> {
    let count = line_b.span_count();
    if count == 0 {
        return None;
    }
    let ends = [p, q]
        .into_iter()
        .filter_map(|e| closest_point_on_polyline(line_b, e))
        .map(|proj| (proj.distance, proj.point, proj.span));
    let vertices = line_b
        .points()
        .iter()
        .enumerate()
        .map(|(i, &v)| (segment_gap(v, p, q), v, i.min(count - 1)));
    ends.chain(vertices)
        .fold(None, |best: Option<(f64, Point, usize)>, c| {
            if best.is_none_or(|b| c.0 < b.0) {
                Some(c)
            } else {
                best
            }
        })
}

/// Does the hop `p → q` really cross `line_b`? Returns the line-of-sight hit.
pub(crate) fn resolve_hop(line_b: &Polyline, p: Point, q: Point) -> Option<(Point, usize)> {
    if p == q {
        return None;
    }
    hop_hit(line_b, p, q).map(|sight| (sight.point, sight.span))
}

/// Walk a chain of keyed points, looking for the first hop that crosses
/// `line_b`. Keys identify the walked vertices to the caller.
pub(crate) fn scan_points<K, I>(walk: I, line_b: &Polyline) -> Option<ScanHit<K>>
where
    K: Copy + std::fmt::Debug,
    I: IntoIterator<Item = (K, Point)>,
{
    let mut reference: Option<(K, Point, bool)> = None;
    let mut pending: Vec<(K, Point)> = Vec::new();
    for (key, p) in walk {
        let Some(side) = side_of(line_b, p)? else {
            if reference.is_some() {
                pending.push((key, p));
            }
            continue;
        };
        let Some((r, rp, ref_side)) = reference else {
            reference = Some((key, p, side));
            continue;
        };
        if side == ref_side {
            reference = Some((key, p, side));
            pending.clear();
            continue;
        }
        tracing::trace!(from = ?r, to = ?key, "side change");
        let mut chain = Vec::with_capacity(pending.len() + 2);
        chain.push((r, rp));
        chain.append(&mut pending);
        chain.push((key, p));
        for hop in chain.windows(2) {
            let ((u, pu), (v, pv)) = (hop[0], hop[1]);
            if let Some((point, span_b)) = resolve_hop(line_b, pu, pv) {
                return Some(ScanHit {
                    point,
                    from: u,
                    to: v,
                    span_b,
                    right_after: side,
                });
            }
        }
        reference = Some((key, p, side));
    }
    None
}

/// Next crossing of `line_a` over `line_b`, scanning `line_a` forward from
/// vertex `start` (through the closing span when `line_a` is closed).
///
/// Pass [`Crossing::resume_from`] as the next `start` to enumerate crossings.
/// Returns `None` when `start` is past the last vertex, `line_b` has no
/// spans, or no further crossing exists.
pub fn next_crossing(line_a: &Polyline, line_b: &Polyline, start: usize) -> Option<Crossing> {
    let n = line_a.len();
    if start >= n || line_b.span_count() == 0 {
        return None;
    }
    let walk = (start..n)
        .chain(line_a.is_closed().then_some(0))
        .filter_map(|i| line_a.point(i).map(|p| (i, p)));
    let hit = scan_points(walk, line_b)?;
    Some(Crossing {
        point: hit.point,
        span_a: line_a.span_of_hop(hit.from, hit.to)?,
        span_b: hit.span_b,
        right_after: hit.right_after,
    })
}

/// Every crossing of `line_a` over `line_b`, in `line_a` order.
pub fn all_crossings(line_a: &Polyline, line_b: &Polyline) -> Vec<Crossing> {
    let mut out = Vec::new();
    let mut start = 0;
    while let Some(c) = next_crossing(line_a, line_b, start) {
        start = c.resume_from();
        out.push(c);
    }
    out
}

/// Single crossing of `line_a` over `line_b` by bisection on vertex indices.
///
/// Precondition: `line_a` crosses `line_b` at most once. With several
/// crossings the search still terminates and reports one of them. Use
/// [`next_crossing`] when the number of crossings is unknown.
///
/// Returns `NotFound` when the ends of `line_a` are on the same side of
/// `line_b` (or either end lies on it).
pub fn find_single_crossing(line_a: &Polyline, line_b: &Polyline) -> Bisection {
    let n = line_a.len();
    if n < 2 {
        return Bisection::NotFound;
    }
    bisect_crossing(line_a, line_b, 0, n - 1)
}

/// Bisection between vertices `lo < hi` of `line_a`.
pub fn bisect_crossing(line_a: &Polyline, line_b: &Polyline, lo: usize, hi: usize) -> Bisection {
    if lo >= hi || hi >= line_a.len() {
        return Bisection::NotFound;
    }
    let (Some(p_lo), Some(p_hi)) = (line_a.point(lo), line_a.point(hi)) else {
        return Bisection::NotFound;
    };
    let (Some(Some(side_lo)), Some(Some(side_hi))) = (side_of(line_b, p_lo), side_of(line_b, p_hi))
    else {
        return Bisection::NotFound;
    };
    if side_lo == side_hi {
        return Bisection::NotFound;
    }
    let (mut lo, mut hi) = (lo, hi);
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        let Some(p) = line_a.point(mid) else {
            return Bisection::NotFound;
        };
        match side_of(line_b, p) {
            Some(Some(side)) if side != side_lo => hi = mid,
            // On-line midpoints are folded into the lower half.
            _ => lo = mid,
        }
    }
    let (Some(p0), Some(p1)) = (line_a.point(lo), line_a.point(hi)) else {
        return Bisection::NotFound;
    };
    if p0 == p1 {
        return Bisection::NotFound;
    }
    if let Some(sight) = hop_hit(line_b, p0, p1) {
        return Bisection::Crossing(Crossing {
            point: sight.point,
            span_a: lo,
            span_b: sight.span,
            right_after: side_hi,
        });
    }
    match hop_gap(line_b, p0, p1) {
        Some((approach, point, span_b)) => Bisection::NearMiss(NearMiss {
            point,
            approach,
            span_a: lo,
            span_b,
        }),
        None => Bisection::NotFound,
    }
}

/// Point where a line crosses itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelfCrossing {
    pub point: Point,
    /// Earlier of the two spans.
    pub first_span: usize,
    pub second_span: usize,
}

/// First self-crossing met when walking `line` from its start.
///
/// Neighbouring spans (which share a vertex) are never reported.
pub fn self_crossing(line: &Polyline) -> Option<SelfCrossing> {
    let count = line.span_count();
    let closed = line.is_closed();
    for j in 2..count {
        let (c0, c1) = line.span(j)?;
        for i in 0..j - 1 {
            if closed && i == 0 && j == count - 1 {
                continue;
            }
            let (a0, a1) = line.span(i)?;
            if let Some((point, _, _)) = segment_intersection(a0, a1, c0, c1) {
                tracing::debug!(first = i, second = j, "self crossing");
                return Some(SelfCrossing {
                    point,
                    first_span: i,
                    second_span: j,
                });
            }
        }
    }
    None
}

/// Where a test line meets (or comes closest to) a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Approach {
    /// Point on `line`.
    pub point: Point,
    /// Zero for a hit, otherwise the gap between the lines.
    pub gap: f64,
    /// Span of `line` containing `point`.
    pub span: usize,
    /// Span of the test line that hits, or whose start vertex comes closest.
    pub test_span: usize,
    pub hit: bool,
}

/// First intersection of `test_line` with `line`, walking the test line from
/// its start; without one, the closest approach of a test-line vertex.
pub fn approach(line: &Polyline, test_line: &Polyline) -> Option<Approach> {
    let count = test_line.span_count();
    if count == 0 || line.span_count() == 0 {
        return None;
    }
    for (k, t0, t1) in test_line.spans() {
        if let Some((point, span)) = resolve_hop(line, t0, t1) {
            return Some(Approach {
                point,
                gap: 0.0,
                span,
                test_span: k,
                hit: true,
            });
        }
    }
    let mut best: Option<Approach> = None;
    for (k, &v) in test_line.points().iter().enumerate() {
        let Some(proj) = closest_point_on_polyline(line, v) else {
            continue;
        };
        if best.is_none_or(|b| proj.distance < b.gap) {
            best = Some(Approach {
                point: proj.point,
                gap: proj.distance,
                span: proj.span,
                test_span: k.min(count - 1),
                hit: false,
            });
        }
    }
    best
}
