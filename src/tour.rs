//! Tours derived from a spanning tree.
//!
//! A depth-first pre-order walk of a minimum spanning tree visits every point once; closing
//! the walk back to its start gives the classic tree-doubling travelling-salesman tour.

use crate::error::{Error, Result};
use crate::types::{Edge, Point};

/// Order `points` by a depth-first walk over `edges`, starting at point 0.
///
/// Neighbours are visited in the order their edges appear in `edges`, so the greedy
/// emission order carries through to the tour. If `edges` leave some points unconnected,
/// each remaining component is walked from its lowest index; every point appears exactly
/// once either way. The returned tour is open: the closing leg back to the first point is
/// implied.
///
/// # Errors
///
/// [`Error::InvalidEdge`] if an edge endpoint is outside `points`.
pub fn build_tour_from_edges(points: &[Point], edges: &[Edge]) -> Result<Vec<Point>> {
    Ok(tour_order(points.len(), edges)?
        .into_iter()
        .map(|k| points[k])
        .collect())
}

/// Point indices in tour order. See [`build_tour_from_edges`].
///
/// # Errors
///
/// [`Error::InvalidEdge`] if an edge endpoint is `>= n`.
pub fn tour_order(n: usize, edges: &[Edge]) -> Result<Vec<usize>> {
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for e in edges {
        for index in [e.i, e.j] {
            if index >= n {
                return Err(Error::InvalidEdge { index, n_points: n });
            }
        }
        adjacency[e.i].push(e.j);
        adjacency[e.j].push(e.i);
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut stack = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        stack.push(root);
        while let Some(k) = stack.pop() {
            if visited[k] {
                continue;
            }
            visited[k] = true;
            order.push(k);
            // Reversed so the first-listed neighbour is popped first.
            for &next in adjacency[k].iter().rev() {
                if !visited[next] {
                    stack.push(next);
                }
            }
        }
    }

    Ok(order)
}

/// Closed tour length (Euclidean), including the leg from the last point back to the first.
pub fn tour_length(tour: &[Point]) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }
    let leg = |a: Point, b: Point| {
        let dx = f64::from(a.x) - f64::from(b.x);
        let dy = f64::from(a.y) - f64::from(b.y);
        dx.hypot(dy)
    };
    let open: f64 = tour.windows(2).map(|w| leg(w[0], w[1])).sum();
    open + leg(tour[tour.len() - 1], tour[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(raw: &[(usize, usize)]) -> Vec<Edge> {
        raw.iter().copied().map(Edge::from).collect()
    }

    #[test]
    fn walks_depth_first_in_edge_order() {
        //     0
        //    / \
        //   1   3
        //   |
        //   2
        let order = tour_order(4, &edges(&[(0, 1), (0, 3), (1, 2)])).unwrap();
        assert_eq!(order, vec![0, 1, 2, 3]);

        let order = tour_order(4, &edges(&[(0, 3), (0, 1), (1, 2)])).unwrap();
        assert_eq!(order, vec![0, 3, 1, 2]);
    }

    #[test]
    fn maps_indices_to_points() {
        let points = vec![Point::new(0, 0), Point::new(3, 0), Point::new(0, 4)];
        let tour = build_tour_from_edges(&points, &edges(&[(0, 1), (0, 2)])).unwrap();
        assert_eq!(tour, points);
        assert!((tour_length(&tour) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn empty_and_single() {
        assert!(build_tour_from_edges(&[], &[]).unwrap().is_empty());
        let one = [Point::new(5, 5)];
        assert_eq!(build_tour_from_edges(&one, &[]).unwrap(), one.to_vec());
        assert_eq!(tour_length(&one), 0.0);
    }

    #[test]
    fn disconnected_components_are_all_visited() {
        let order = tour_order(5, &edges(&[(3, 4), (0, 2)])).unwrap();
        assert_eq!(order, vec![0, 2, 1, 3, 4]);
    }

    #[test]
    fn out_of_range_edge_is_rejected() {
        let err = tour_order(2, &edges(&[(0, 2)])).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidEdge {
                index: 2,
                n_points: 2
            }
        );
    }
}
