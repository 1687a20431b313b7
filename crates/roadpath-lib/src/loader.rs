//! JSON road network files.
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": 1, "lat": 51.5007, "lon": -0.1246 },
//!     { "id": 2 }
//!   ],
//!   "edges": [
//!     { "from": 1, "to": 2, "length": 120.5, "travel_time": 14.0 },
//!     { "from": 2, "to": 1, "length": 120.5, "oneway": false }
//!   ]
//! }
//! ```
//!
//! Every numeric field of an edge other than `from`/`to` becomes a named
//! weight. Edges marked `"oneway": false` also add the reverse direction.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::graph::{EdgeAttributes, NodeId, RoadGraph};

#[derive(Debug, Deserialize)]
struct GraphDocument {
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize)]
struct NodeRecord {
    id: NodeId,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: NodeId,
    to: NodeId,
    #[serde(default = "default_oneway")]
    oneway: bool,
    #[serde(flatten)]
    attributes: BTreeMap<String, Value>,
}

fn default_oneway() -> bool {
    true
}

/// Load a road network from a JSON file.
pub fn load_road_graph(path: &Path) -> Result<RoadGraph> {
    let contents = fs::read_to_string(path).map_err(|source| Error::GraphFile {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = RoadGraph::from_json_str(&contents)?;
    debug!(
        path = %path.display(),
        nodes = graph.nodes().len(),
        edges = graph.edge_count(),
        "loaded road graph"
    );
    Ok(graph)
}

impl RoadGraph {
    /// Parse a road network from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: GraphDocument = serde_json::from_str(json)?;
        let mut builder = RoadGraph::builder();

        for node in document.nodes {
            let coordinates = match (node.lat, node.lon) {
                (Some(lat), Some(lon)) => Some(Coordinates::checked(lat, lon)?),
                (None, None) => None,
                _ => {
                    return Err(Error::InvalidGraph {
                        message: format!("node {} has only one of lat/lon", node.id),
                    })
                }
            };
            builder.add_node(node.id, coordinates)?;
        }

        for edge in document.edges {
            let attributes = edge_attributes(&edge);
            if attributes.is_empty() {
                warn!(
                    from = edge.from,
                    to = edge.to,
                    "edge carries no numeric weights; it will never be traversed"
                );
            }
            if !edge.oneway {
                builder.add_edge(edge.to, edge.from, attributes.clone())?;
            }
            builder.add_edge(edge.from, edge.to, attributes)?;
        }

        Ok(builder.build())
    }
}

fn edge_attributes(edge: &EdgeRecord) -> EdgeAttributes {
    edge.attributes
        .iter()
        .filter_map(|(key, value)| value.as_f64().map(|number| (key, number)))
        .fold(EdgeAttributes::default(), |attributes, (key, number)| {
            attributes.with_weight(key.as_str(), number)
        })
}
