use thiserror::Error;

/// Errors returned by spanning-tree computations in this crate.
///
/// Broken invariants at the native boundary (a null result buffer, indices outside the
/// point range) are not represented here: they panic instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The native routine could not be loaded or resolved.
    #[error("native routine unavailable: {reason}")]
    NativeUnavailable {
        /// Why resolution failed.
        reason: String,
    },

    /// The point count does not fit the native ABI's integer type.
    #[error("too many points for the native boundary: {n} (max {max})")]
    TooManyPoints {
        /// Number of points supplied.
        n: usize,
        /// Largest count the boundary can carry.
        max: usize,
    },

    /// An edge refers to a point index outside the point set.
    #[error("edge endpoint {index} out of range for {n_points} points")]
    InvalidEdge {
        /// Offending endpoint.
        index: usize,
        /// Number of points in the set.
        n_points: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
