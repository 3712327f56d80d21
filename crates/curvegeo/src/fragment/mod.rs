//! Fragments: directed vertex ranges of a borrowed polyline, and crossings of
//! a chain of fragments over a line.
//!
//! Purpose
//! - Describe pieces of existing lines without copying points. A fragment
//!   borrows its polyline, so it can never outlive it.
//! - Find crossings of a fragment chain (for example a boundary assembled
//!   from pieces of several lines) over another line, one call per crossing.
//!
//! Code cross-refs: `crate::line::next_crossing` (same scanning rules)

mod crossing;
mod types;

pub use crossing::{next_fragment_list_crossing, FragmentCrossing};
pub use types::{Direction, Fragment, FragmentCursor};
