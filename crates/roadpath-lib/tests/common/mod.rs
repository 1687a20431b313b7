//! Common test utilities and fixture helpers.
//!
//! Graphs here are small enough to reason about by hand. Positions are laid
//! out along the equator so that great-circle distances equal the
//! east-west offsets used to build them.

#![allow(dead_code)]

use std::path::PathBuf;

use roadpath_lib::{Coordinates, EdgeAttributes, RoadGraph, EARTH_RADIUS_METERS};

/// Path to fixtures directory shared by the workspace.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// A point on the equator `meters` east of (0, 0).
pub fn east_of_origin(meters: f64) -> Coordinates {
    let degrees = (meters / EARTH_RADIUS_METERS).to_degrees();
    Coordinates::new(0.0, degrees)
}

/// Build a graph from `(id, position)` nodes and `(from, to, length)` edges.
pub fn build_graph(nodes: &[(i64, Option<Coordinates>)], edges: &[(i64, i64, f64)]) -> RoadGraph {
    let mut builder = RoadGraph::builder();
    for &(id, coordinates) in nodes {
        builder.add_node(id, coordinates).expect("unique node id");
    }
    for &(from, to, length) in edges {
        builder
            .add_edge(from, to, EdgeAttributes::length(length))
            .expect("edge endpoints exist");
    }
    builder.build()
}

pub const A: i64 = 1;
pub const B: i64 = 2;
pub const C: i64 = 3;
pub const D: i64 = 4;
pub const E: i64 = 5;

/// Five-node road network whose shortest A to E route is A, C, B, D, E (11).
///
/// Nodes sit on a line at 90% of their true remaining cost to E, so the
/// great-circle heuristic never overestimates.
pub fn five_node_network() -> RoadGraph {
    let at = |meters: f64| Some(east_of_origin(meters * 0.9));
    build_graph(
        &[(A, at(0.0)), (B, at(3.0)), (C, at(2.0)), (D, at(8.0)), (E, at(11.0))],
        &[
            (A, B, 4.0),
            (A, C, 2.0),
            (C, B, 1.0),
            (B, D, 5.0),
            (C, D, 8.0),
            (D, E, 3.0),
        ],
    )
}

/// Same topology as [`five_node_network`] with no coordinates at all.
pub fn five_node_network_without_positions() -> RoadGraph {
    build_graph(
        &[(A, None), (B, None), (C, None), (D, None), (E, None)],
        &[
            (A, B, 4.0),
            (A, C, 2.0),
            (C, B, 1.0),
            (B, D, 5.0),
            (C, D, 8.0),
            (D, E, 3.0),
        ],
    )
}
