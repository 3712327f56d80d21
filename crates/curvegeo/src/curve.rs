//! Curves: a polyline that knows which side of it counts as "its" side.
//!
//! - `Hand`: caller-supplied handedness (`Left`, `Right`, `Ambiguous`).
//! - `Curve`: polyline plus hand. The hand is never inferred from geometry.
//!
//! Reversing a curve reverses its points and flips its hand, so the same
//! physical side stays selected.

use crate::line::{
    classify, closest_point_on_polyline, line_sight, next_crossing, BoundingBox, Classification,
    Crossing, Point, Polyline, Projection, Sight,
};
use crate::transform::Affine2;

/// Which side of a curve (relative to its direction of travel) is selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    #[default]
    Right,
    Ambiguous,
}

impl Hand {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
            Hand::Ambiguous => Hand::Ambiguous,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curve {
    pub line: Polyline,
    pub hand: Hand,
}

impl Curve {
    #[inline]
    pub fn new(line: Polyline, hand: Hand) -> Self {
        Self { line, hand }
    }

    /// Reverse point order and flip the hand.
    pub fn reverse(&mut self) {
        self.line.reverse();
        self.hand = self.hand.flipped();
    }

    /// Flip the hand only (select the other side).
    #[inline]
    pub fn flip(&mut self) {
        self.hand = self.hand.flipped();
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.line.is_closed()
    }

    #[inline]
    pub fn closest_point(&self, p: Point) -> Option<Projection> {
        closest_point_on_polyline(&self.line, p)
    }

    #[inline]
    pub fn classify(&self, p: Point) -> Option<Classification> {
        classify(&self.line, p)
    }

    /// Line of sight from `from` through `toward` against this curve.
    #[inline]
    pub fn sight(&self, from: Point, toward: Point, back: bool) -> Option<Sight> {
        line_sight(&self.line, from, toward, back)
    }

    /// Next place where this curve crosses `other`, scanning from vertex
    /// `start` of this curve.
    #[inline]
    pub fn next_crossing(&self, other: &Curve, start: usize) -> Option<Crossing> {
        next_crossing(&self.line, &other.line, start)
    }

    #[inline]
    pub fn passes_through(&self, bbox: &BoundingBox) -> bool {
        self.line.passes_through(bbox)
    }

    /// Is `p` on the selected side of the curve?
    ///
    /// `None` when the hand is ambiguous, the point lies on the curve, or the
    /// curve has no spans.
    pub fn on_sense_side(&self, p: Point) -> Option<bool> {
        let c = self.classify(p)?;
        if c.on_line() {
            return None;
        }
        match self.hand {
            Hand::Right => Some(c.right),
            Hand::Left => Some(!c.right),
            Hand::Ambiguous => None,
        }
    }

    /// Apply an affine map. Orientation-reversing maps flip the hand so the
    /// selected side follows the geometry.
    pub fn transform(&mut self, f: &Affine2) {
        self.line.transform(f);
        if !f.is_orientation_preserving() {
            self.hand = self.hand.flipped();
        }
    }
}
