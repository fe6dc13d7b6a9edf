//! Greedy fragment-merge minimum spanning tree.
//!
//! # The Algorithm
//!
//! Every point starts out as its own fragment. Each round scans every pair of points in
//! different fragments, picks the closest pair, emits it as a tree edge, and merges the two
//! fragments. After `n - 1` rounds one fragment remains and the emitted edges form a
//! minimum spanning tree.
//!
//! ## Determinism
//!
//! - Pairs are scanned row-major: `i` ascending, then `j` from `i + 1` ascending.
//! - Only a strictly smaller distance replaces the current best, so ties go to the
//!   earliest pair in scan order.
//! - A merge rewrites `j`'s fragment label to `i`'s.
//!
//! The native routine in [`crate::ffi`] follows the same three rules, which is what makes
//! the two backends return identical edge sequences.
//!
//! ## Complexity
//!
//! - **Time**: O(n^3) (`n - 1` rounds of an O(n^2) pair scan).
//! - **Space**: O(n) for the labels.
//!
//! This is deliberately the naive method. It is the baseline the native path is timed
//! against, so there is no priority queue and no incremental fragment index.

use tracing::{debug, trace};

use super::traits::SpanningTree;
use super::Backend;
use crate::error::Result;
use crate::types::{squared_distance, Edge, Point};

/// Fragment labels for one spanning-tree computation.
///
/// Two points are in the same fragment iff their labels are equal. There is no path
/// compression: a merge rewrites every matching label in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragments {
    labels: Vec<usize>,
}

impl Fragments {
    /// Every point in its own fragment (`label[i] = i`).
    pub fn new(n: usize) -> Self {
        Self {
            labels: (0..n).collect(),
        }
    }

    /// Whether `i` and `j` are currently connected.
    #[inline]
    pub fn same(&self, i: usize, j: usize) -> bool {
        self.labels[i] == self.labels[j]
    }

    /// Absorb `j`'s fragment into `i`'s.
    ///
    /// Every point labelled like `j` takes `i`'s label; `i`'s label survives.
    pub fn merge(&mut self, i: usize, j: usize) {
        let keep = self.labels[i];
        let absorbed = self.labels[j];
        if keep == absorbed {
            return;
        }
        for label in &mut self.labels {
            if *label == absorbed {
                *label = keep;
            }
        }
    }

    /// Current label of point `k`.
    pub fn label(&self, k: usize) -> usize {
        self.labels[k]
    }

    /// All labels, indexed by point.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of distinct fragments.
    pub fn count(&self) -> usize {
        // Each fragment keeps the label of one of its own members.
        self.labels
            .iter()
            .enumerate()
            .filter(|&(k, &label)| k == label)
            .count()
    }

    /// Consume into the raw label vector.
    pub fn into_labels(self) -> Vec<usize> {
        self.labels
    }
}

/// Managed backend: the fragment-merge scan over native Rust data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentMerge;

impl FragmentMerge {
    /// Create the managed engine.
    pub fn new() -> Self {
        Self
    }

    /// Run the algorithm and also return the final fragment labels.
    ///
    /// With `n >= 1` every final label is equal; which value survives depends on the merge
    /// direction.
    pub fn min_span_with_labels(&self, points: &[Point]) -> (Vec<Edge>, Vec<usize>) {
        let n = points.len();
        let mut fragments = Fragments::new(n);
        if n < 2 {
            return (Vec::new(), fragments.into_labels());
        }

        debug!(points = n, "fragment-merge start");
        let mut edges = Vec::with_capacity(n - 1);
        for round in 0..n - 1 {
            let edge = closest_pair(points, &fragments).unwrap_or_else(|| {
                panic!("no inter-fragment pair in round {round} with {n} points")
            });
            trace!(round, i = edge.i, j = edge.j, "merge");
            fragments.merge(edge.i, edge.j);
            edges.push(edge);
        }
        debug!(edges = edges.len(), "fragment-merge done");

        (edges, fragments.into_labels())
    }
}

impl SpanningTree for FragmentMerge {
    fn min_span(&self, points: &[Point]) -> Result<Vec<Edge>> {
        Ok(self.min_span_with_labels(points).0)
    }

    fn backend(&self) -> Backend {
        Backend::Managed
    }
}

/// First strictly-closest pair in different fragments, scanning row-major.
fn closest_pair(points: &[Point], fragments: &Fragments) -> Option<Edge> {
    let mut best: Option<(u128, Edge)> = None;
    for (i, &a) in points.iter().enumerate() {
        for (j, &b) in points.iter().enumerate().skip(i + 1) {
            if fragments.same(i, j) {
                continue;
            }
            let d = squared_distance(a, b);
            if best.map_or(true, |(min, _)| d < min) {
                best = Some((d, Edge::new(i, j)));
            }
        }
    }
    best.map(|(_, edge)| edge)
}
