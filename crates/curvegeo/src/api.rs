//! Curated flat API for callers (UNSTABLE).
//!
//! Important
//! - This is a convenience surface for the CLI, benches and property tests.
//!   Breaking changes are allowed; prefer these re-exports over deep paths.

// Lines and per-line queries
pub use crate::line::{
    approach, classify, closest_point_on_polyline, line_sight, segment_intersection,
    self_crossing, Approach, BoundingBox, Classification, LineProps, Point, Polyline, Projection,
    SelfCrossing, Sight, SpanInfo,
};
// Line-pair crossings
pub use crate::line::{
    all_crossings, bisect_crossing, find_single_crossing, next_crossing, Bisection, Crossing,
    NearMiss,
};
// Random lines
pub use crate::line::rand::{
    draw_ring_radial, draw_walk, RadialCfg, ReplayToken as LineReplay, VertexCount, WalkCfg,
};
// Curves, fragments and curve sets
pub use crate::curve::{Curve, Hand};
pub use crate::curve_set::{ClosestCurve, CurveSet, EnclosingCurve, PickMode};
pub use crate::fragment::{
    next_fragment_list_crossing, Direction, Fragment, FragmentCrossing, FragmentCursor,
};
pub use crate::transform::Affine2;
