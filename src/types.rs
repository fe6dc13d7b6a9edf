//! Points, edges, and the edge weight shared by every backend.

/// A point with integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A tree edge between two point indices.
///
/// Edges produced by the spanning-tree backends always have `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// First endpoint.
    pub i: usize,
    /// Second endpoint.
    pub j: usize,
}

impl Edge {
    /// Create an edge.
    pub const fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    /// The endpoints as a tuple.
    pub const fn as_pair(self) -> (usize, usize) {
        (self.i, self.j)
    }

    /// The endpoint opposite `k`, if `k` is an endpoint.
    pub fn other(self, k: usize) -> Option<usize> {
        if k == self.i {
            Some(self.j)
        } else if k == self.j {
            Some(self.i)
        } else {
            None
        }
    }
}

impl From<(usize, usize)> for Edge {
    fn from((i, j): (usize, usize)) -> Self {
        Self { i, j }
    }
}

/// Squared Euclidean distance between two points.
///
/// Exact for every pair of `i32` coordinates: each axis delta is taken as `u32`, squared in
/// `u64`, and the two squares are summed in `u128`.
#[inline]
pub fn squared_distance(a: Point, b: Point) -> u128 {
    let dx = u64::from(a.x.abs_diff(b.x));
    let dy = u64::from(a.y.abs_diff(b.y));
    u128::from(dx * dx) + u128::from(dy * dy)
}
