use minspan::span::{is_spanning_tree, total_weight, FragmentMerge, SpanningTree};
use minspan::{compute_mst, Edge, Point};
use proptest::prelude::*;

fn points_strategy(max: usize) -> impl Strategy<Value = Vec<Point>> {
    // A narrow range makes coincident points and distance ties common.
    prop::collection::vec((-8i32..8, -8i32..8).prop_map(Point::from), 0..max)
}

/// Minimum total weight over every spanning tree, by exhaustive edge-subset search.
fn brute_force_min_weight(points: &[Point]) -> u128 {
    let n = points.len();
    let all: Vec<Edge> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| Edge::new(i, j)))
        .collect();
    let k = n.saturating_sub(1);

    let mut best = u128::MAX;
    let mut chosen = Vec::with_capacity(k);
    search(points, &all, 0, k, &mut chosen, &mut best);
    best
}

fn search(
    points: &[Point],
    all: &[Edge],
    from: usize,
    k: usize,
    chosen: &mut Vec<Edge>,
    best: &mut u128,
) {
    if chosen.len() == k {
        if is_spanning_tree(points.len(), chosen) {
            *best = (*best).min(total_weight(points, chosen));
        }
        return;
    }
    for idx in from..all.len() {
        chosen.push(all[idx]);
        search(points, all, idx + 1, k, chosen, best);
        chosen.pop();
    }
}

proptest! {
    #[test]
    fn prop_managed_is_spanning_tree(points in points_strategy(24)) {
        let edges = compute_mst(&points, false).unwrap();
        prop_assert_eq!(edges.len(), points.len().saturating_sub(1));
        prop_assert!(is_spanning_tree(points.len(), &edges));
        for e in &edges {
            prop_assert!(e.i < e.j);
        }
    }

    #[test]
    fn prop_managed_is_minimal(points in points_strategy(7)) {
        let edges = compute_mst(&points, false).unwrap();
        prop_assert_eq!(total_weight(&points, &edges), brute_force_min_weight(&points));
    }

    #[test]
    fn prop_idempotent(points in points_strategy(16)) {
        let engine = FragmentMerge::new();
        let first = engine.min_span(&points).unwrap();
        let second = engine.min_span(&points).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(compute_mst(&points, false).unwrap(), first);
    }

    #[test]
    fn prop_fragments_collapse_to_one(points in points_strategy(16)) {
        let (_, labels) = FragmentMerge::new().min_span_with_labels(&points);
        prop_assert_eq!(labels.len(), points.len());
        if let Some(&first) = labels.first() {
            prop_assert!(labels.iter().all(|&l| l == first));
        }
    }
}

#[cfg(feature = "native")]
proptest! {
    #[test]
    fn prop_native_idempotent(points in points_strategy(16)) {
        let first = compute_mst(&points, true).unwrap();
        let second = compute_mst(&points, true).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_native_matches_managed(points in points_strategy(24)) {
        let managed = compute_mst(&points, false).unwrap();
        let native = compute_mst(&points, true).unwrap();
        prop_assert_eq!(managed, native);
    }

    #[test]
    fn prop_native_matches_managed_wide_range(
        points in prop::collection::vec(any::<(i32, i32)>().prop_map(Point::from), 0..12)
    ) {
        let managed = compute_mst(&points, false).unwrap();
        let native = compute_mst(&points, true).unwrap();
        prop_assert_eq!(managed, native);
    }
}

#[test]
fn fewer_than_two_points_have_no_edges() {
    let single = [Point::new(5, 5)];
    assert!(compute_mst(&[], false).unwrap().is_empty());
    assert!(compute_mst(&single, false).unwrap().is_empty());
    #[cfg(feature = "native")]
    {
        assert!(compute_mst(&[], true).unwrap().is_empty());
        assert!(compute_mst(&single, true).unwrap().is_empty());
    }
}

#[test]
fn concrete_scenarios_on_every_backend() {
    let right = [Point::new(0, 0), Point::new(3, 0), Point::new(0, 4)];
    let tie = [Point::new(0, 0), Point::new(1, 0), Point::new(0, 1)];
    let expected = vec![Edge::new(0, 1), Edge::new(0, 2)];

    let mut backends = vec![false];
    if cfg!(feature = "native") {
        backends.push(true);
    }
    for use_native in backends {
        assert_eq!(compute_mst(&right, use_native).unwrap(), expected);
        assert_eq!(compute_mst(&tie, use_native).unwrap(), expected);
    }
}

#[test]
fn larger_random_like_set_is_a_tree() {
    let points: Vec<Point> = (0..60)
        .map(|k: i32| Point::new((k * 37) % 101, (k * 53) % 89))
        .collect();
    let edges = compute_mst(&points, false).unwrap();
    assert!(is_spanning_tree(points.len(), &edges));
    #[cfg(feature = "native")]
    assert_eq!(compute_mst(&points, true).unwrap(), edges);
}
