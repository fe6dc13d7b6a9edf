//! Greedy minimum spanning trees over 2D points.
//!
//! `minspan` computes a minimum spanning tree with the naive fragment-merge method and
//! offers it through two interchangeable backends so their running times can be compared:
//!
//! - a managed backend working directly on `&[Point]`;
//! - a native backend that marshals the points into a flat `c_int` buffer, calls a C-ABI
//!   routine, and takes ownership of the buffer it returns until it hands it back.
//!
//! Both return the same edges in the same order for every input.
//!
//! The primary public API is under [`span`]. [`tour`] turns a tree into a visiting order,
//! and [`ffi`] (feature `native`, on by default) holds the exported C-ABI routine.

pub mod error;
#[cfg(feature = "native")]
pub mod ffi;
pub mod span;
pub mod tour;
pub mod types;

pub use error::{Error, Result};
pub use span::{compute_mst, Backend, FragmentMerge, MinSpan, NativeMst, SpanningTree};
pub use tour::build_tour_from_edges;
pub use types::{squared_distance, Edge, Point};
