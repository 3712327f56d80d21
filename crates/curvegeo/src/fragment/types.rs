use crate::line::{Point, Polyline};

/// Traversal direction of a fragment over its polyline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Contiguous vertex range `[start, end]` of a borrowed polyline.
///
/// Invariants:
/// - `start` and `end` are vertex indices of `line`, given in forward index
///   order whatever the direction.
/// - `end < start` only on a closed line, meaning the range wraps past the
///   last point.
/// - `Forward` walks `start → end`; `Backward` walks `end → start`.
#[derive(Clone, Copy, Debug)]
pub struct Fragment<'a> {
    line: &'a Polyline,
    start: usize,
    end: usize,
    direction: Direction,
}

/// Position in a fragment list: fragment index plus an optional vertex of that
/// fragment (`None` = its first vertex in traversal order).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FragmentCursor {
    pub fragment: usize,
    pub vertex: Option<usize>,
}

impl FragmentCursor {
    #[inline]
    pub fn at_fragment(fragment: usize) -> Self {
        Self {
            fragment,
            vertex: None,
        }
    }
}

impl<'a> Fragment<'a> {
    /// `None` when an index is out of range, or the range wraps on an open line.
    pub fn new(line: &'a Polyline, start: usize, end: usize, direction: Direction) -> Option<Self> {
        let n = line.len();
        if start >= n || end >= n || (end < start && !line.is_closed()) {
            return None;
        }
        Some(Self {
            line,
            start,
            end,
            direction,
        })
    }

    /// The whole polyline, first to last stored point.
    pub fn whole(line: &'a Polyline, direction: Direction) -> Option<Self> {
        Self::new(line, 0, line.len().checked_sub(1)?, direction)
    }

    #[inline]
    pub fn line(&self) -> &'a Polyline {
        self.line
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn wraps(&self) -> bool {
        self.end < self.start
    }

    pub fn vertex_count(&self) -> usize {
        if self.wraps() {
            self.line.len() - self.start + self.end + 1
        } else {
            self.end - self.start + 1
        }
    }

    /// Vertex indices in traversal order.
    pub fn vertices(&self) -> impl Iterator<Item = usize> + 'a {
        let n = self.line.len();
        let (start, end, dir) = (self.start, self.end, self.direction);
        (0..self.vertex_count()).map(move |k| match dir {
            Direction::Forward => (start + k) % n,
            Direction::Backward => (end + n - k) % n,
        })
    }

    /// Vertex indices paired with their points, in traversal order.
    pub(crate) fn walk(&self) -> impl Iterator<Item = (usize, Point)> + 'a {
        let line = self.line;
        self.vertices()
            .filter_map(move |i| line.point(i).map(|p| (i, p)))
    }

    #[inline]
    pub fn first_vertex(&self) -> usize {
        match self.direction {
            Direction::Forward => self.start,
            Direction::Backward => self.end,
        }
    }

    #[inline]
    pub fn last_vertex(&self) -> usize {
        match self.direction {
            Direction::Forward => self.end,
            Direction::Backward => self.start,
        }
    }

    pub fn first_point(&self) -> Option<Point> {
        self.line.point(self.first_vertex())
    }

    pub fn last_point(&self) -> Option<Point> {
        self.line.point(self.last_vertex())
    }

    /// Span crossed by the final hop of the walk; `None` for single-vertex
    /// fragments.
    pub fn last_span(&self) -> Option<usize> {
        if self.vertex_count() < 2 {
            return None;
        }
        let n = self.line.len();
        let last = self.last_vertex();
        let before = match self.direction {
            Direction::Forward => (last + n - 1) % n,
            Direction::Backward => (last + 1) % n,
        };
        self.line.span_of_hop(before, last)
    }

    pub fn contains_vertex(&self, v: usize) -> bool {
        if v >= self.line.len() {
            return false;
        }
        if self.wraps() {
            v >= self.start || v <= self.end
        } else {
            (self.start..=self.end).contains(&v)
        }
    }

    pub fn length(&self) -> f64 {
        let pts: Vec<Point> = self.walk().map(|(_, p)| p).collect();
        pts.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// Open polyline of the walked points, in traversal order.
    pub fn to_polyline(&self) -> Polyline {
        Polyline::open(self.walk().map(|(_, p)| p).collect())
    }

    /// Does `other` pick up where this fragment stops (its first point equals
    /// our last point)?
    pub fn is_adjacent(&self, other: &Fragment<'_>) -> bool {
        match (self.last_point(), other.first_point()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Merge with a following fragment of the same polyline and direction that
    /// starts at (or right after) our last vertex.
    ///
    /// `None` when the fragments are unrelated or the merge would cover more
    /// than the whole line.
    pub fn join(&self, other: &Fragment<'a>) -> Option<Fragment<'a>> {
        if !std::ptr::eq(self.line, other.line) || self.direction != other.direction {
            return None;
        }
        let n = self.line.len();
        let step = |i: usize| -> Option<usize> {
            match self.direction {
                Direction::Forward if i + 1 < n => Some(i + 1),
                Direction::Backward if i > 0 => Some(i - 1),
                _ if self.line.is_closed() => Some(match self.direction {
                    Direction::Forward => 0,
                    Direction::Backward => n - 1,
                }),
                _ => None,
            }
        };
        let last = self.last_vertex();
        let first = other.first_vertex();
        let shared = if first == last {
            1
        } else if step(last) == Some(first) {
            0
        } else {
            return None;
        };
        if self.vertex_count() + other.vertex_count() - shared > n {
            return None;
        }
        match self.direction {
            Direction::Forward => Fragment::new(self.line, self.start, other.end, self.direction),
            Direction::Backward => Fragment::new(self.line, other.start, self.end, self.direction),
        }
    }

    /// Position of span `span` along the walk, in hops from the first vertex.
    /// On closed lines every span has a non-negative offset.
    fn span_offset(&self, span: usize) -> isize {
        let n = self.line.len() as isize;
        let s = span as isize;
        let (start, end) = (self.start as isize, self.end as isize);
        match (self.direction, self.line.is_closed()) {
            (Direction::Forward, false) => s - start,
            (Direction::Backward, false) => end - 1 - s,
            (Direction::Forward, true) => (s - start).rem_euclid(n),
            (Direction::Backward, true) => (end - 1 - s).rem_euclid(n),
        }
    }

    /// Does `span` come before the fragment's first hop in traversal order?
    /// Always `false` on closed lines.
    pub fn before_start(&self, span: usize) -> bool {
        self.span_offset(span) < 0
    }

    /// Does `span` come after the fragment's last hop in traversal order?
    pub fn after_end(&self, span: usize) -> bool {
        self.span_offset(span) >= self.vertex_count() as isize - 1
    }
}
