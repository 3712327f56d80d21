use super::types::{Fragment, FragmentCursor};
use crate::line::{scan_points, Point, Polyline};

/// Crossing of a fragment list over a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FragmentCrossing {
    pub point: Point,
    /// Fragment containing the crossing. For a crossing in the gap between two
    /// fragments (or the wraparound gap), the fragment before the gap.
    pub fragment: usize,
    /// Span of that fragment's polyline. For gap crossings, the fragment's
    /// last traversed span, or its only vertex for a single-vertex fragment.
    pub span: usize,
    pub span_b: usize,
    /// Side of `line_b` the walk is on after the crossing.
    pub right_after: bool,
    /// Cursor to pass back in to continue past this crossing.
    pub resume: FragmentCursor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Key {
    fragment: usize,
    vertex: usize,
}

/// Next crossing of the chain `fragments` over `line_b`, starting at `start`.
///
/// The chain is walked fragment by fragment in traversal order; the gap from
/// one fragment's last vertex to the next fragment's first vertex is treated
/// as a hop of its own. With `closed`, the gap from the last fragment back to
/// the first is tested after everything else, unless its ends coincide.
///
/// Returns `None` for an empty list, a cursor past the end or off its
/// fragment, a `line_b` without spans, or when no crossing remains.
pub fn next_fragment_list_crossing(
    fragments: &[Fragment<'_>],
    line_b: &Polyline,
    start: FragmentCursor,
    closed: bool,
) -> Option<FragmentCrossing> {
    let len = fragments.len();
    if start.fragment >= len || line_b.span_count() == 0 {
        return None;
    }
    let first = &fragments[start.fragment];
    let skip = match start.vertex {
        None => 0,
        Some(v) if first.contains_vertex(v) => first.vertices().position(|u| u == v)?,
        Some(_) => return None,
    };

    let head = first.walk().skip(skip).map(move |(vertex, p)| {
        (
            Key {
                fragment: start.fragment,
                vertex,
            },
            p,
        )
    });
    let tail = fragments
        .iter()
        .enumerate()
        .skip(start.fragment + 1)
        .flat_map(|(i, f)| f.walk().map(move |(vertex, p)| (Key { fragment: i, vertex }, p)));
    let wrap = if closed {
        wraparound(fragments)
    } else {
        None
    };

    let hit = scan_points(head.chain(tail).chain(wrap), line_b)?;
    let from_frag = &fragments[hit.from.fragment];
    if hit.from.fragment == hit.to.fragment {
        let span = from_frag.line().span_of_hop(hit.from.vertex, hit.to.vertex)?;
        return Some(FragmentCrossing {
            point: hit.point,
            fragment: hit.from.fragment,
            span,
            span_b: hit.span_b,
            right_after: hit.right_after,
            resume: FragmentCursor {
                fragment: hit.to.fragment,
                vertex: Some(hit.to.vertex),
            },
        });
    }
    tracing::trace!(
        before = hit.from.fragment,
        after = hit.to.fragment,
        "crossing in fragment gap"
    );
    Some(FragmentCrossing {
        point: hit.point,
        fragment: hit.from.fragment,
        span: from_frag.last_span().unwrap_or(hit.from.vertex),
        span_b: hit.span_b,
        right_after: hit.right_after,
        resume: FragmentCursor::at_fragment(hit.to.fragment),
    })
}

/// First vertex of the first fragment, keyed one past the last fragment.
/// `None` when it coincides with the last fragment's last vertex.
fn wraparound(fragments: &[Fragment<'_>]) -> Option<(Key, Point)> {
    let first = fragments.first()?;
    let last = fragments.last()?;
    let p = first.first_point()?;
    if last.last_point()? == p {
        return None;
    }
    Some((
        Key {
            fragment: fragments.len(),
            vertex: first.first_vertex(),
        },
        p,
    ))
}
