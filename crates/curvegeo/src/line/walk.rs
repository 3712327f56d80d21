//! Fractional line indices and walking by distance.
//!
//! A fractional index `i + f` (with `0 <= f < 1`) names the point a fraction
//! `f` along span `i`. Closed lines wrap indices modulo the point count; open
//! lines clamp to `[0, n-1]`.

use super::types::{Point, Polyline};
use crate::cfg::WALK_REL_EPS;

impl Polyline {
    /// Fractional index of the point `dist` along span `span`.
    ///
    /// `dist` is clamped to the span; a zero-length span yields `span`.
    pub fn index_at(&self, span: usize, dist: f64) -> Option<f64> {
        let info = self.span_info(span)?;
        if info.length == 0.0 || !dist.is_finite() {
            return Some(span as f64);
        }
        Some(span as f64 + (dist / info.length).clamp(0.0, 1.0))
    }

    /// Split a fractional index into `(span, fraction)`.
    fn split_index(&self, index: f64) -> Option<(usize, f64)> {
        let count = self.span_count();
        if count == 0 || !index.is_finite() {
            return None;
        }
        let index = if self.is_closed() {
            index.rem_euclid(count as f64)
        } else {
            let top = count as f64;
            if !(0.0..=top).contains(&index) {
                tracing::warn!(index, max = top, "index out of range, clamped");
            }
            index.clamp(0.0, top)
        };
        let span = (index.floor() as usize).min(count - 1);
        Some((span, index - span as f64))
    }

    /// Point at a fractional index.
    pub fn position(&self, index: f64) -> Option<Point> {
        let (span, frac) = self.split_index(index)?;
        let info = self.span_info(span)?;
        Some(info.start + info.delta * frac)
    }

    /// Distance from the first point to `index`, along the line.
    fn distance_to(&self, index: f64) -> Option<f64> {
        let (span, frac) = self.split_index(index)?;
        let before: f64 = self
            .spans()
            .take(span)
            .map(|(_, a, b)| (b - a).norm())
            .sum();
        let info = self.span_info(span)?;
        Some(before + info.length * frac)
    }

    /// Length along the line from `i1` forward to `i2`.
    ///
    /// On a closed line an `i2` behind `i1` wraps through the closing span.
    /// On an open line the result is the unsigned length between the two.
    pub fn length_between(&self, i1: f64, i2: f64) -> Option<f64> {
        let d1 = self.distance_to(i1)?;
        let d2 = self.distance_to(i2)?;
        if self.is_closed() {
            let d = d2 - d1;
            Some(if d < 0.0 { d + self.length() } else { d })
        } else {
            Some((d2 - d1).abs())
        }
    }

    /// Fractional index reached by walking `dist` along the line from
    /// `index` (backwards for negative `dist`).
    ///
    /// Closed lines wrap; open lines stop at their ends with a warning.
    pub fn walk(&self, index: f64, dist: f64) -> Option<f64> {
        if !dist.is_finite() {
            return None;
        }
        let start = self.distance_to(index)?;
        let total = self.length();
        let count = self.span_count();
        if total == 0.0 {
            return Some(self.split_index(index).map_or(0.0, |(s, f)| s as f64 + f));
        }
        let mut target = start + dist;
        if self.is_closed() {
            target = target.rem_euclid(total);
        } else if target < 0.0 {
            if target < -total * WALK_REL_EPS {
                tracing::warn!(index, dist, "walk ran past the start of the line");
            }
            return Some(0.0);
        } else if target > total {
            if target > total * (1.0 + WALK_REL_EPS) {
                tracing::warn!(index, dist, "walk ran past the end of the line");
            }
            return Some(count as f64);
        }
        let mut acc = 0.0;
        for (i, a, b) in self.spans() {
            let len = (b - a).norm();
            if acc + len >= target {
                let frac = if len > 0.0 { (target - acc) / len } else { 0.0 };
                return Some(i as f64 + frac.clamp(0.0, 1.0));
            }
            acc += len;
        }
        Some(if self.is_closed() { 0.0 } else { count as f64 })
    }
}
