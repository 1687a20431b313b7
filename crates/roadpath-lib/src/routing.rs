//! Route planning on top of the search engine.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - the two search strategies (Dijkstra, A*)
//! - [`Endpoint`] - a route endpoint given as a node or as coordinates
//! - [`RouteRequest`] / [`RoutePlan`] - request and response values
//! - [`plan_route`] - resolve endpoints and run one strategy
//! - [`compare_algorithms`] - run both strategies on identical input
//!
//! Requests and plans are plain values; nothing is retained between calls.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::graph::{RoadNetwork, DEFAULT_WEIGHT_KEY};
use crate::path::{a_star, dijkstra, SearchOutcome, SearchStats};
use crate::spatial::nearest_node_with_distance;

/// Largest distance difference, in weight units, for two plans to count as
/// the same route length.
pub const DISTANCE_TOLERANCE: f64 = 0.01;

/// Supported search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Uninformed search ordered by accumulated cost.
    Dijkstra,
    /// Search guided by great-circle distance to the goal.
    #[default]
    #[serde(rename = "a-star")]
    AStar,
}

impl RouteAlgorithm {
    /// Strategy that stays optimal for `weight_key`.
    ///
    /// The great-circle estimate is in meters, so A* is only kept for the
    /// default `length` weight; any other attribute falls back to Dijkstra.
    pub fn for_weight(self, weight_key: &str) -> Self {
        match self {
            RouteAlgorithm::AStar if weight_key != DEFAULT_WEIGHT_KEY => RouteAlgorithm::Dijkstra,
            other => other,
        }
    }

    /// Run this strategy between two resolved nodes.
    pub fn search<G: RoadNetwork>(
        self,
        graph: &G,
        source: G::Node,
        target: G::Node,
        weight_key: &str,
    ) -> Result<SearchOutcome<G::Node>> {
        match self {
            RouteAlgorithm::Dijkstra => dijkstra(graph, source, target, weight_key),
            RouteAlgorithm::AStar => a_star(graph, source, target, weight_key),
        }
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "a_star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            other => Err(format!("unknown algorithm '{other}'")),
        }
    }
}

/// One end of a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint<N> {
    /// A node identifier that must exist in the graph.
    Node(N),
    /// A position snapped to the nearest node with coordinates.
    Coordinates(Coordinates),
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest<N> {
    pub start: Endpoint<N>,
    pub goal: Endpoint<N>,
    /// Edge attribute minimised by the search.
    pub weight_key: String,
}

impl<N> RouteRequest<N> {
    /// Request between two endpoints using the default `length` weight.
    pub fn new(start: Endpoint<N>, goal: Endpoint<N>) -> Self {
        Self {
            start,
            goal,
            weight_key: DEFAULT_WEIGHT_KEY.to_string(),
        }
    }

    /// Convenience constructor for node-to-node routes.
    pub fn between_nodes(start: N, goal: N) -> Self {
        Self::new(Endpoint::Node(start), Endpoint::Node(goal))
    }

    /// Minimise a different edge attribute.
    pub fn with_weight_key(mut self, weight_key: impl Into<String>) -> Self {
        self.weight_key = weight_key.into();
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan<N> {
    pub algorithm: RouteAlgorithm,
    pub start: N,
    pub goal: N,
    /// Nodes from start to goal; empty when the goal is unreachable.
    pub path: Vec<N>,
    pub total_distance: f64,
    pub stats: SearchStats,
}

impl<N> RoutePlan<N> {
    /// Whether the goal was reached.
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Both strategies run against the same graph and endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmComparison<N> {
    pub dijkstra: RoutePlan<N>,
    pub a_star: RoutePlan<N>,
    /// Absolute difference between the two distances, when both found a path.
    pub distance_difference: Option<f64>,
    /// Whether both agree on reachability and, if reachable, on distance
    /// within [`DISTANCE_TOLERANCE`].
    pub same_distance: bool,
    /// Share of Dijkstra's explored nodes that A* avoided, in percent.
    /// Negative when A* explored more. `None` when Dijkstra explored nothing.
    pub efficiency_gain_percent: Option<f64>,
}

/// Resolve an endpoint to a node of `graph`.
///
/// # Errors
///
/// [`Error::UnknownNode`] for a node that is not in the graph and
/// [`Error::NoNearbyNode`] when no node carries coordinates.
pub fn resolve_endpoint<G: RoadNetwork>(graph: &G, endpoint: &Endpoint<G::Node>) -> Result<G::Node> {
    match *endpoint {
        Endpoint::Node(node) if graph.contains(node) => Ok(node),
        Endpoint::Node(node) => Err(Error::unknown_node(node)),
        Endpoint::Coordinates(Coordinates { lat, lon }) => {
            let (node, offset) = nearest_node_with_distance(graph, lat, lon)
                .ok_or(Error::NoNearbyNode { lat, lon })?;
            debug!(lat, lon, node = ?node, offset_m = offset, "snapped coordinates to node");
            Ok(node)
        }
    }
}

/// Compute a route with the requested strategy.
///
/// A* requested for a weight other than `length` runs as Dijkstra instead
/// (see [`RouteAlgorithm::for_weight`]); the plan reports the strategy that
/// actually ran.
pub fn plan_route<G: RoadNetwork>(
    graph: &G,
    request: &RouteRequest<G::Node>,
    algorithm: RouteAlgorithm,
) -> Result<RoutePlan<G::Node>> {
    let start = resolve_endpoint(graph, &request.start)?;
    let goal = resolve_endpoint(graph, &request.goal)?;

    let effective = algorithm.for_weight(&request.weight_key);
    if effective != algorithm {
        warn!(
            requested = %algorithm,
            weight_key = %request.weight_key,
            "great-circle heuristic only applies to length weights; using dijkstra"
        );
    }
    run_plan(graph, start, goal, &request.weight_key, effective)
}

/// Run Dijkstra and A* on the same request and summarise the difference.
///
/// Both strategies always run, whatever the weight key, so the comparison
/// can expose A* returning a longer route for non-length weights.
pub fn compare_algorithms<G: RoadNetwork>(
    graph: &G,
    request: &RouteRequest<G::Node>,
) -> Result<AlgorithmComparison<G::Node>> {
    let start = resolve_endpoint(graph, &request.start)?;
    let goal = resolve_endpoint(graph, &request.goal)?;

    let dijkstra = run_plan(graph, start, goal, &request.weight_key, RouteAlgorithm::Dijkstra)?;
    let a_star = run_plan(graph, start, goal, &request.weight_key, RouteAlgorithm::AStar)?;

    let distance_difference = (dijkstra.is_found() && a_star.is_found())
        .then(|| (dijkstra.total_distance - a_star.total_distance).abs());
    let same_distance = match distance_difference {
        Some(difference) => difference < DISTANCE_TOLERANCE,
        None => dijkstra.is_found() == a_star.is_found(),
    };

    let baseline = dijkstra.stats.nodes_explored;
    let efficiency_gain_percent = (baseline > 0).then(|| {
        (baseline as f64 - a_star.stats.nodes_explored as f64) / baseline as f64 * 100.0
    });

    debug!(
        same_distance,
        dijkstra_explored = dijkstra.stats.nodes_explored,
        a_star_explored = a_star.stats.nodes_explored,
        "compared search strategies"
    );

    Ok(AlgorithmComparison {
        dijkstra,
        a_star,
        distance_difference,
        same_distance,
        efficiency_gain_percent,
    })
}

fn run_plan<G: RoadNetwork>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    weight_key: &str,
    algorithm: RouteAlgorithm,
) -> Result<RoutePlan<G::Node>> {
    let outcome = algorithm.search(graph, start, goal, weight_key)?;
    Ok(RoutePlan {
        algorithm,
        start,
        goal,
        path: outcome.path,
        total_distance: outcome.total_distance,
        stats: outcome.stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_round_trips_through_strings() {
        for algorithm in [RouteAlgorithm::Dijkstra, RouteAlgorithm::AStar] {
            assert_eq!(algorithm.to_string().parse::<RouteAlgorithm>(), Ok(algorithm));
        }
        assert_eq!("A*".parse::<RouteAlgorithm>(), Ok(RouteAlgorithm::AStar));
        assert!("bfs".parse::<RouteAlgorithm>().is_err());
    }

    #[test]
    fn hop_count_of_empty_plan_is_zero() {
        let plan: RoutePlan<i64> = RoutePlan {
            algorithm: RouteAlgorithm::Dijkstra,
            start: 1,
            goal: 2,
            path: Vec::new(),
            total_distance: crate::path::UNREACHABLE,
            stats: SearchStats::default(),
        };
        assert!(!plan.is_found());
        assert_eq!(plan.hop_count(), 0);
    }

    #[test]
    fn a_star_only_kept_for_length_weights() {
        assert_eq!(RouteAlgorithm::AStar.for_weight("length"), RouteAlgorithm::AStar);
        assert_eq!(
            RouteAlgorithm::AStar.for_weight("travel_time"),
            RouteAlgorithm::Dijkstra
        );
        assert_eq!(
            RouteAlgorithm::Dijkstra.for_weight("length"),
            RouteAlgorithm::Dijkstra
        );
    }

    #[test]
    fn request_defaults_to_length_weight() {
        let request = RouteRequest::between_nodes(1_i64, 2);
        assert_eq!(request.weight_key, "length");
        assert_eq!(request.with_weight_key("travel_time").weight_key, "travel_time");
    }
}
