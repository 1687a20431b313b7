//! Property-based tests for the search engine and distance metric.
//!
//! # Invariants tested
//!
//! - **Optimality:** Dijkstra's distance equals the cheapest simple path
//!   found by exhaustive enumeration.
//! - **Agreement:** with a consistent great-circle heuristic, A* returns the
//!   same distance as Dijkstra and never finalizes more nodes.
//! - **Metric:** great-circle distance is symmetric, non-negative, and zero
//!   for identical points.

use proptest::prelude::*;
use roadpath_lib::{
    a_star, dijkstra, great_circle_distance, Coordinates, EdgeAttributes, RoadGraph, UNREACHABLE,
};

type EdgeList = Vec<(usize, usize, u32)>;

/// Random multigraphs with 2..=7 nodes and integral weights.
fn weighted_graph() -> impl Strategy<Value = (usize, EdgeList)> {
    (2_usize..=7).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n, 0_u32..50), 0..n * 3),
        )
    })
}

/// Random positioned graphs; each edge costs at least its great-circle span.
fn positioned_graph() -> impl Strategy<Value = (Vec<(f64, f64)>, Vec<(usize, usize, f64)>)> {
    (2_usize..=7).prop_flat_map(|n| {
        (
            prop::collection::vec((0.0_f64..0.05, 0.0_f64..0.05), n),
            prop::collection::vec((0..n, 0..n, 1.0_f64..3.0), 0..n * 3),
        )
    })
}

fn build(n: usize, edges: &EdgeList) -> RoadGraph {
    let mut builder = RoadGraph::builder();
    for id in 0..n {
        builder.add_node(id as i64, None).expect("unique node id");
    }
    for &(from, to, weight) in edges {
        builder
            .add_edge(from as i64, to as i64, EdgeAttributes::length(f64::from(weight)))
            .expect("edge endpoints exist");
    }
    builder.build()
}

/// Cheapest simple path by depth-first enumeration.
fn brute_force_distance(n: usize, edges: &EdgeList, source: usize, target: usize) -> f64 {
    let mut cheapest = vec![vec![UNREACHABLE; n]; n];
    for &(from, to, weight) in edges {
        let weight = f64::from(weight);
        if weight < cheapest[from][to] {
            cheapest[from][to] = weight;
        }
    }

    fn walk(
        cheapest: &[Vec<f64>],
        node: usize,
        target: usize,
        cost: f64,
        on_path: &mut [bool],
        best: &mut f64,
    ) {
        if node == target {
            *best = best.min(cost);
            return;
        }
        for next in 0..cheapest.len() {
            if on_path[next] || cheapest[node][next].is_infinite() {
                continue;
            }
            on_path[next] = true;
            walk(cheapest, next, target, cost + cheapest[node][next], on_path, best);
            on_path[next] = false;
        }
    }

    let mut on_path = vec![false; n];
    on_path[source] = true;
    let mut best = UNREACHABLE;
    walk(&cheapest, source, target, 0.0, &mut on_path, &mut best);
    best
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: Dijkstra returns the true minimum path cost.
    #[test]
    fn dijkstra_matches_exhaustive_search((n, edges) in weighted_graph()) {
        let graph = build(n, &edges);
        let target = n - 1;
        let expected = brute_force_distance(n, &edges, 0, target);
        let outcome = dijkstra(&graph, 0, target as i64, "length").expect("known endpoints");

        prop_assert_eq!(outcome.total_distance, expected);
        prop_assert_eq!(outcome.is_found(), expected.is_finite());
        prop_assert!(outcome.stats.nodes_visited <= n);
        if outcome.is_found() {
            prop_assert_eq!(outcome.path.first().copied(), Some(0));
            prop_assert_eq!(outcome.path.last().copied(), Some(target as i64));
            prop_assert_eq!(outcome.stats.path_length, outcome.path.len());
        }
    }

    /// Property: A* with an admissible great-circle heuristic agrees with
    /// Dijkstra and finalizes no more nodes.
    #[test]
    fn a_star_agrees_with_dijkstra((positions, edges) in positioned_graph()) {
        let n = positions.len();
        let mut builder = RoadGraph::builder();
        for (id, &(lat, lon)) in positions.iter().enumerate() {
            builder.add_node(id as i64, Some(Coordinates::new(lat, lon))).expect("unique node id");
        }
        for &(from, to, stretch) in &edges {
            let (lat1, lon1) = positions[from];
            let (lat2, lon2) = positions[to];
            let length = great_circle_distance(lat1, lon1, lat2, lon2) * stretch;
            builder
                .add_edge(from as i64, to as i64, EdgeAttributes::length(length))
                .expect("edge endpoints exist");
        }
        let graph = builder.build();
        let target = (n - 1) as i64;

        let uninformed = dijkstra(&graph, 0, target, "length").expect("known endpoints");
        let guided = a_star(&graph, 0, target, "length").expect("known endpoints");

        prop_assert_eq!(uninformed.is_found(), guided.is_found());
        if uninformed.is_found() {
            let scale = uninformed.total_distance.max(1.0);
            prop_assert!(
                (uninformed.total_distance - guided.total_distance).abs() / scale < 1e-6,
                "dijkstra {} vs a* {}",
                uninformed.total_distance,
                guided.total_distance
            );
            prop_assert!(guided.stats.nodes_visited <= uninformed.stats.nodes_visited);
        }
    }

    /// Property: the metric is symmetric, non-negative and zero on the diagonal.
    #[test]
    fn great_circle_distance_is_a_metric(
        lat1 in -90.0_f64..=90.0,
        lon1 in -180.0_f64..=180.0,
        lat2 in -90.0_f64..=90.0,
        lon2 in -180.0_f64..=180.0,
    ) {
        let forward = great_circle_distance(lat1, lon1, lat2, lon2);
        let backward = great_circle_distance(lat2, lon2, lat1, lon1);

        prop_assert!(forward >= 0.0);
        prop_assert!((forward - backward).abs() <= 1e-9 * forward.max(1.0));
        prop_assert_eq!(great_circle_distance(lat1, lon1, lat1, lon1), 0.0);
        prop_assert!(forward <= std::f64::consts::PI * roadpath_lib::EARTH_RADIUS_METERS + 1e-6);
    }
}
