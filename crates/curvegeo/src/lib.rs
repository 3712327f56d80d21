//! Planar polyline and curve geometry: distances, containment, sidedness and
//! crossing points, plus nearest/enclosing queries over curve collections.
//!
//! Layout
//! - `line`: polyline storage, projection/classification, line of sight,
//!   crossing searches, walking by distance.
//! - `curve`: polyline plus caller-supplied handedness.
//! - `fragment`: borrowed directed pieces of polylines and fragment-chain
//!   crossings.
//! - `curve_set`: nearest and enclosing curve queries.
//! - `transform`: affine moves applied to lines and curves.
//!
//! API Policy
//! - Every query is a pure function of borrowed inputs. No statics, no
//!   caches; all public types are `Send + Sync`.
//! - "Not found" is `None` (or an explicit enum variant), never a sentinel
//!   value or a fabricated point.
//! - Diagnostics go through `tracing`; the crate never installs a subscriber.

mod cfg;

pub mod api;
pub mod curve;
pub mod curve_set;
pub mod fragment;
pub mod line;
pub mod transform;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use curve::{Curve, Hand};
pub use curve_set::{CurveSet, PickMode};
pub use fragment::{Direction, Fragment, FragmentCursor};
pub use line::{Point, Polyline};
pub use transform::Affine2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::curve::{Curve, Hand};
    pub use crate::curve_set::{ClosestCurve, CurveSet, EnclosingCurve, PickMode};
    pub use crate::fragment::{
        next_fragment_list_crossing, Direction, Fragment, FragmentCrossing, FragmentCursor,
    };
    pub use crate::line::{
        all_crossings, classify, closest_point_on_polyline, find_single_crossing, line_sight,
        next_crossing, Bisection, BoundingBox, Classification, Crossing, Point, Polyline, Projection, Sight,
    };
    pub use crate::transform::Affine2;
}
