//! Nearest and enclosing queries over a collection of curves.
//!
//! - `CurveSet`: curves in insertion order. Query results borrow the curve and
//!   report its index, so ties and ranking are reproducible.
//! - Enclosing queries consider closed curves with non-zero area only; among
//!   those containing the point the smallest area wins.

use std::cmp::Ordering;

use crate::curve::Curve;
use crate::line::{Point, Projection};

#[derive(Clone, Debug, Default)]
pub struct CurveSet {
    curves: Vec<Curve>,
}

/// Nearest curve and the projection onto it.
#[derive(Clone, Copy, Debug)]
pub struct ClosestCurve<'a> {
    pub index: usize,
    pub curve: &'a Curve,
    pub projection: Projection,
}

/// A closed curve containing the query point.
#[derive(Clone, Copy, Debug)]
pub struct EnclosingCurve<'a> {
    pub index: usize,
    pub curve: &'a Curve,
    /// Enclosed area.
    pub size: f64,
    pub clockwise: bool,
}

/// Reordering applied by [`CurveSet::reorder`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PickMode {
    /// Keep insertion order.
    #[default]
    First,
    /// Most recently added first.
    Last,
    /// Ascending enclosed area.
    Smallest,
    /// Descending enclosed area.
    Largest,
}

impl FromIterator<Curve> for CurveSet {
    fn from_iter<I: IntoIterator<Item = Curve>>(iter: I) -> Self {
        Self {
            curves: iter.into_iter().collect(),
        }
    }
}

impl CurveSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, curve: Curve) -> usize {
        self.curves.push(curve);
        self.curves.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<Curve> {
        (index < self.curves.len()).then(|| self.curves.remove(index))
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Curve> {
        self.curves.get(index)
    }

    #[inline]
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Curve with the smallest distance to `p`; ties keep insertion order.
    /// Curves with fewer than two points are ignored.
    pub fn closest_curve(&self, p: Point) -> Option<ClosestCurve<'_>> {
        let mut best: Option<ClosestCurve<'_>> = None;
        for (index, curve) in self.curves.iter().enumerate() {
            let Some(projection) = curve.closest_point(p) else {
                continue;
            };
            if best.is_none_or(|b| projection.distance < b.projection.distance) {
                best = Some(ClosestCurve {
                    index,
                    curve,
                    projection,
                });
            }
        }
        best
    }

    fn enclosing(&self, p: Point) -> impl Iterator<Item = EnclosingCurve<'_>> + '_ {
        self.curves
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_closed())
            .filter_map(move |(index, curve)| {
                let props = curve.line.properties();
                if props.area <= 0.0 {
                    return None;
                }
                let c = curve.classify(p)?;
                c.inside.then_some(EnclosingCurve {
                    index,
                    curve,
                    size: props.area,
                    clockwise: props.clockwise,
                })
            })
    }

    /// Smallest closed curve containing `p`; ties keep insertion order.
    pub fn enclosing_curve(&self, p: Point) -> Option<EnclosingCurve<'_>> {
        let mut best: Option<EnclosingCurve<'_>> = None;
        for e in self.enclosing(p) {
            if best.is_none_or(|b| e.size < b.size) {
                best = Some(e);
            }
        }
        best
    }

    /// Every closed curve containing `p`, innermost (smallest area) first.
    pub fn rank_enclosing_curves(&self, p: Point) -> Vec<EnclosingCurve<'_>> {
        let mut out: Vec<EnclosingCurve<'_>> = self.enclosing(p).collect();
        out.sort_by(|a, b| a.size.partial_cmp(&b.size).unwrap_or(Ordering::Equal));
        out
    }

    /// Reorder the stored curves. Sorting is stable; open curves count as
    /// zero area.
    pub fn reorder(&mut self, mode: PickMode) {
        let area = |c: &Curve| c.line.properties().area;
        match mode {
            PickMode::First => {}
            PickMode::Last => self.curves.reverse(),
            PickMode::Smallest => self
                .curves
                .sort_by(|a, b| area(a).partial_cmp(&area(b)).unwrap_or(Ordering::Equal)),
            PickMode::Largest => self
                .curves
                .sort_by(|a, b| area(b).partial_cmp(&area(a)).unwrap_or(Ordering::Equal)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Hand;
    use crate::line::Polyline;
    use nalgebra::vector;

    fn square(half: f64, closed: bool) -> Curve {
        Curve::new(
            Polyline::from_xy(
                &[(-half, -half), (half, -half), (half, half), (-half, half)],
                closed,
            ),
            Hand::Right,
        )
    }

    #[test]
    fn nested_squares_pick_innermost() {
        let set: CurveSet = [square(3.0, true), square(1.0, true), square(2.0, true)]
            .into_iter()
            .collect();
        let p = vector![0.1, 0.2];
        let inner = set.enclosing_curve(p).unwrap();
        assert_eq!(inner.index, 1);
        assert!((inner.size - 4.0).abs() < 1e-12);
        assert!(!inner.clockwise);
        let ranked: Vec<usize> = set.rank_enclosing_curves(p).iter().map(|e| e.index).collect();
        assert_eq!(ranked, vec![1, 2, 0]);

        // Between the rings only the outer two contain the point.
        let ranked: Vec<usize> = set
            .rank_enclosing_curves(vector![1.5, 0.0])
            .iter()
            .map(|e| e.index)
            .collect();
        assert_eq!(ranked, vec![2, 0]);
        assert!(set.enclosing_curve(vector![10.0, 0.0]).is_none());
    }

    #[test]
    fn open_curves_never_enclose() {
        let set: CurveSet = [square(1.0, false)].into_iter().collect();
        assert!(set.enclosing_curve(vector![0.0, 0.0]).is_none());
        assert!(set.rank_enclosing_curves(vector![0.0, 0.0]).is_empty());
    }

    #[test]
    fn closest_curve_ties_keep_insertion_order() {
        let a = Curve::new(Polyline::from_xy(&[(0.0, 1.0), (4.0, 1.0)], false), Hand::Left);
        let b = Curve::new(Polyline::from_xy(&[(0.0, -1.0), (4.0, -1.0)], false), Hand::Left);
        let far = Curve::new(Polyline::from_xy(&[(0.0, 9.0), (4.0, 9.0)], false), Hand::Left);
        let set: CurveSet = [far, a, b].into_iter().collect();
        let c = set.closest_curve(vector![2.0, 0.0]).unwrap();
        assert_eq!(c.index, 1);
        assert!((c.projection.distance - 1.0).abs() < 1e-12);
        assert!(CurveSet::new().closest_curve(vector![0.0, 0.0]).is_none());
    }

    #[test]
    fn degenerate_curves_are_skipped() {
        let mut set = CurveSet::new();
        set.push(Curve::default());
        set.push(Curve::new(Polyline::from_xy(&[(5.0, 5.0)], false), Hand::Right));
        assert!(set.closest_curve(vector![0.0, 0.0]).is_none());
        let idx = set.push(square(1.0, true));
        assert_eq!(set.closest_curve(vector![0.0, 3.0]).map(|c| c.index), Some(idx));
        assert!(set.remove(7).is_none());
        assert!(set.remove(0).is_some());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn reorder_modes() {
        let mut set: CurveSet = [square(2.0, true), square(1.0, true), square(3.0, true)]
            .into_iter()
            .collect();
        let halves = |s: &CurveSet| -> Vec<f64> {
            s.curves().iter().map(|c| c.line.points()[2].x).collect()
        };
        set.reorder(PickMode::First);
        assert_eq!(halves(&set), vec![2.0, 1.0, 3.0]);
        set.reorder(PickMode::Smallest);
        assert_eq!(halves(&set), vec![1.0, 2.0, 3.0]);
        set.reorder(PickMode::Largest);
        assert_eq!(halves(&set), vec![3.0, 2.0, 1.0]);
        set.reorder(PickMode::Last);
        assert_eq!(halves(&set), vec![1.0, 2.0, 3.0]);
    }
}
