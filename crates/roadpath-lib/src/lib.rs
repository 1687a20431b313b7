//! roadpath library entry points.
//!
//! This crate exposes the great-circle distance metric, the shortest-path
//! search engine (Dijkstra and A* share one search loop), nearest-node
//! lookup, and a concrete road graph that can be loaded from JSON.
//! Higher-level consumers (the CLI, map front ends) should only depend on
//! the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod graph;
pub mod loader;
pub mod path;
pub mod routing;
pub mod spatial;

pub use error::{Error, Result};
pub use geo::{great_circle_distance, Coordinates, EARTH_RADIUS_METERS};
pub use graph::{
    EdgeAttributes, NodeId, RoadGraph, RoadGraphBuilder, RoadNetwork, RoadNode, DEFAULT_WEIGHT_KEY,
};
pub use loader::load_road_graph;
pub use path::{
    a_star, dijkstra, search, GreatCircleHeuristic, Heuristic, SearchOutcome, SearchStats,
    ZeroHeuristic, UNREACHABLE,
};
pub use routing::{
    compare_algorithms, plan_route, resolve_endpoint, AlgorithmComparison, Endpoint,
    RouteAlgorithm, RoutePlan, RouteRequest, DISTANCE_TOLERANCE,
};
pub use spatial::{nearest_node, nearest_node_with_distance};
