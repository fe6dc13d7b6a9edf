use crate::types::{squared_distance, Edge, Point};

#[derive(Clone, Debug)]
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub(crate) fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            let root = self.find(self.parent[x]);
            self.parent[x] = root;
        }
        self.parent[x]
    }

    /// Join the sets of `a` and `b`. Returns `false` if they were already joined.
    pub(crate) fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }

        // Union by size.
        let (mut big, mut small) = (ra, rb);
        if self.size[big] < self.size[small] {
            std::mem::swap(&mut big, &mut small);
        }

        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }
}

/// Whether `edges` form a spanning tree over `n` points.
///
/// That is: exactly `max(n - 1, 0)` edges, every endpoint in range, no self-edge and no
/// cycle. With `n - 1` acyclic edges the graph is necessarily connected.
pub fn is_spanning_tree(n: usize, edges: &[Edge]) -> bool {
    if edges.len() != n.saturating_sub(1) {
        return false;
    }
    let mut uf = UnionFind::new(n);
    edges
        .iter()
        .all(|e| e.i < n && e.j < n && e.i != e.j && uf.union(e.i, e.j))
}

/// Sum of squared edge lengths.
///
/// # Panics
///
/// If an edge refers to a point outside `points`.
pub fn total_weight(points: &[Point], edges: &[Edge]) -> u128 {
    edges
        .iter()
        .map(|e| squared_distance(points[e.i], points[e.j]))
        .sum()
}
