//! Tolerance defaults for polyline queries (internal).
//!
//! Policy
//! - Defaults are fixed constants to avoid "tolerance juggling" at call sites.
//!   Coordinates are planar map units at interactive-editing scale.

/// Spans shorter than this in both x and y are skipped by projection.
pub(crate) const SPAN_EPS: f64 = 1e-12;
/// Relative slack on the span parameter `s` accepted by line-of-sight solves.
/// Intersections with `s` in `[-SIGHT_SLACK, 1+SIGHT_SLACK]` are clamped onto
/// the span and only used as fallbacks.
pub(crate) const SIGHT_SLACK: f64 = 0.01;
/// Relative slack on the sight distance when deciding "between the test points".
pub(crate) const BETWEEN_SLACK: f64 = 0.01;
/// Absolute slack when comparing a sight distance against a hop length.
pub(crate) const HOP_EPS: f64 = 1e-9;
/// Determinant threshold below which two directions are treated as parallel.
pub(crate) const PARALLEL_EPS: f64 = 1e-15;
/// Relative tolerance for "walked the full distance" checks in `walk`.
pub(crate) const WALK_REL_EPS: f64 = 1e-5;
