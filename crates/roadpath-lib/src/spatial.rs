//! Nearest-node lookup for snapping arbitrary coordinates onto the graph.
//!
//! The lookup is a linear scan over every node, which keeps it free of any
//! prebuilt index and makes tie handling follow the graph's own node order.

use crate::geo::{great_circle_distance, Coordinates};
use crate::graph::RoadNetwork;

/// Node closest to `(lat, lon)` by great-circle distance.
///
/// Nodes without coordinates are skipped. When several nodes are equally
/// close the first one in [`RoadNetwork::node_ids`] order wins. Returns
/// `None` for an empty graph or one where no node has coordinates.
pub fn nearest_node<G: RoadNetwork>(graph: &G, lat: f64, lon: f64) -> Option<G::Node> {
    nearest_node_with_distance(graph, lat, lon).map(|(node, _)| node)
}

/// Like [`nearest_node`], also returning the distance in meters.
pub fn nearest_node_with_distance<G: RoadNetwork>(
    graph: &G,
    lat: f64,
    lon: f64,
) -> Option<(G::Node, f64)> {
    let mut best: Option<(G::Node, f64)> = None;
    for node in graph.node_ids() {
        let Some(Coordinates {
            lat: node_lat,
            lon: node_lon,
        }) = graph.coordinates(node)
        else {
            continue;
        };

        let distance = great_circle_distance(lat, lon, node_lat, node_lon);
        let closer = match best {
            Some((_, closest)) => distance < closest,
            None => !distance.is_nan(),
        };
        if closer {
            best = Some((node, distance));
        }
    }
    best
}
