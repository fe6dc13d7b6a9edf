use super::Backend;
use crate::error::Result;
use crate::types::{Edge, Point};

/// Common interface for the minimum spanning tree backends.
pub trait SpanningTree {
    /// Compute the spanning tree edges in the order the greedy scan chose them.
    ///
    /// Returns exactly `max(n - 1, 0)` edges for `n` points.
    fn min_span(&self, points: &[Point]) -> Result<Vec<Edge>>;

    /// Which execution path this implementation uses.
    fn backend(&self) -> Backend;
}
