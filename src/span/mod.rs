//! Minimum spanning trees over 2D points.
//!
//! Two backends compute the same tree:
//!
//! - [`FragmentMerge`] runs over `&[Point]` directly.
//! - [`NativeMst`] marshals the points into a flat `c_int` buffer, calls the C-ABI routine
//!   in [`crate::ffi`], and decodes and releases the buffer it gets back.
//!
//! ## Algorithm
//!
//! Both use the greedy fragment-merge method: start with one fragment per point, and
//! `n - 1` times join the closest pair of points that lie in different fragments. Edge
//! weight is the squared Euclidean distance, kept in exact integers so both backends order
//! ties the same way.
//!
//! **Objective**: minimise the total squared edge length over all spanning trees.
//!
//! ```text
//! W(T) = Σ_{(i,j) ∈ T} (x_i - x_j)² + (y_i - y_j)²
//! ```
//!
//! Because squaring is monotone, this is also the tree that minimises true Euclidean
//! length.
//!
//! ## Equivalence
//!
//! For every input the two backends return the same edges in the same order. That is
//! what makes their timings comparable, and it is checked by the property tests rather
//! than by sharing code.
//!
//! ## Usage
//!
//! ```rust
//! use minspan::span::{compute_mst, Backend, MinSpan};
//! use minspan::{Edge, Point};
//!
//! let points = vec![Point::new(0, 0), Point::new(3, 0), Point::new(0, 4)];
//!
//! let managed = compute_mst(&points, false).unwrap();
//! assert_eq!(managed, vec![Edge::new(0, 1), Edge::new(0, 2)]);
//!
//! # #[cfg(feature = "native")]
//! # {
//! let native = MinSpan::new(Backend::Native).unwrap();
//! assert_eq!(native.compute(&points).unwrap(), managed);
//! # }
//! ```

mod fragment;
mod native;
mod traits;
mod util;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::Result;
use crate::types::{Edge, Point};

pub use fragment::{FragmentMerge, Fragments};
pub use native::{encode_points, FreeDataFn, MinSpanFn, NativeMst, NativeRoutine, LIBRARY_ENV};
pub use traits::SpanningTree;
pub use util::{is_spanning_tree, total_weight};

/// Which execution path computes the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// In-process Rust over `&[Point]`.
    #[default]
    Managed,
    /// Across the C-ABI boundary.
    Native,
}

impl Backend {
    /// Lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Managed => "managed",
            Backend::Native => "native",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised backend name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBackendError(String);

impl fmt::Display for ParseBackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown backend {:?} (expected \"managed\" or \"native\")",
            self.0
        )
    }
}

impl std::error::Error for ParseBackendError {}

impl FromStr for Backend {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "managed" | "python" => Ok(Backend::Managed),
            "native" | "c" => Ok(Backend::Native),
            _ => Err(ParseBackendError(s.to_string())),
        }
    }
}

/// Dispatcher over the two backends.
///
/// The native routine is resolved when the dispatcher is built, so an unavailable routine
/// is reported up front instead of on the first computation.
#[derive(Debug, Clone)]
pub struct MinSpan {
    inner: Inner,
}

#[derive(Debug, Clone)]
enum Inner {
    Managed(FragmentMerge),
    Native(NativeMst),
}

impl MinSpan {
    /// Build a dispatcher for `backend`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::NativeUnavailable`] if `backend` is [`Backend::Native`] and the
    /// routine cannot be resolved.
    pub fn new(backend: Backend) -> Result<Self> {
        let inner = match backend {
            Backend::Managed => Inner::Managed(FragmentMerge::new()),
            Backend::Native => Inner::Native(NativeMst::new()?),
        };
        Ok(Self { inner })
    }

    /// The managed backend (always available).
    pub fn managed() -> Self {
        Self {
            inner: Inner::Managed(FragmentMerge::new()),
        }
    }

    /// The native backend, resolved as described in [`NativeRoutine::resolve`].
    ///
    /// # Errors
    ///
    /// See [`MinSpan::new`].
    pub fn native() -> Result<Self> {
        Self::new(Backend::Native)
    }

    /// The native backend bound to the routine in the shared library at `path`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::NativeUnavailable`] if the library cannot be loaded.
    pub fn load_native(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_routine(NativeRoutine::load(path)?))
    }

    /// The native backend bound to an externally resolved routine.
    pub fn with_routine(routine: NativeRoutine) -> Self {
        Self {
            inner: Inner::Native(NativeMst::with_routine(routine)),
        }
    }

    /// Switch to another backend.
    ///
    /// # Errors
    ///
    /// See [`MinSpan::new`].
    pub fn with_backend(self, backend: Backend) -> Result<Self> {
        if self.backend() == backend {
            return Ok(self);
        }
        Self::new(backend)
    }

    /// Compute the spanning tree edges.
    pub fn compute(&self, points: &[Point]) -> Result<Vec<Edge>> {
        self.min_span(points)
    }
}

impl SpanningTree for MinSpan {
    fn min_span(&self, points: &[Point]) -> Result<Vec<Edge>> {
        match &self.inner {
            Inner::Managed(engine) => engine.min_span(points),
            Inner::Native(adapter) => adapter.min_span(points),
        }
    }

    fn backend(&self) -> Backend {
        match &self.inner {
            Inner::Managed(engine) => engine.backend(),
            Inner::Native(adapter) => adapter.backend(),
        }
    }
}

/// Compute the spanning tree of `points` on the managed or native path.
///
/// # Errors
///
/// [`crate::Error::NativeUnavailable`] if `use_native` is set and the routine cannot be
/// resolved; the managed path is never substituted.
pub fn compute_mst(points: &[Point], use_native: bool) -> Result<Vec<Edge>> {
    let backend = if use_native {
        Backend::Native
    } else {
        Backend::Managed
    };
    MinSpan::new(backend)?.compute(points)
}

/// Compute the spanning tree and measure how long the computation took.
pub fn time_backend(span: &MinSpan, points: &[Point]) -> Result<(Vec<Edge>, Duration)> {
    let start = Instant::now();
    let edges = span.compute(points)?;
    let elapsed = start.elapsed();
    debug!(
        backend = %span.backend(),
        points = points.len(),
        elapsed = ?elapsed,
        "timed spanning tree"
    );
    Ok((edges, elapsed))
}
