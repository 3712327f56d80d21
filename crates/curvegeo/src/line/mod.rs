//! Polylines and the queries made against a single line or a pair of lines.
//!
//! Purpose
//! - Store ordered points (open or closed) and answer span lookups, lengths,
//!   areas and walks along the line.
//! - Project test points onto a line and classify them (inside, right-of).
//! - Find crossings between two lines, by bisection when a single crossing is
//!   known, or by a sequential scan otherwise.
//!
//! Numerics
//! - Tolerances live in `crate::cfg`. Degenerate input (fewer than two
//!   points, zero-length spans, coincident sight points) yields `None` or
//!   `NotFound`, never a panic.
//!
//! Code cross-refs: `crate::curve::Curve`, `crate::fragment`

mod crossing;
mod metrics;
mod query;
pub mod rand;
mod sight;
mod types;
mod walk;

pub use crossing::{
    all_crossings, approach, bisect_crossing, find_single_crossing, next_crossing, self_crossing,
    Approach, Bisection, Crossing, NearMiss, SelfCrossing,
};
pub(crate) use crossing::scan_points;
pub use metrics::{classify, closest_point_on_polyline, Classification, Projection};
pub use query::BoundingBox;
pub use sight::{line_sight, segment_intersection, Sight};
pub use types::{LineProps, Point, Polyline, SpanInfo};
