use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::geo::Coordinates;

/// Numeric identifier for a road network node (OSM-style).
pub type NodeId = i64;

/// Weight attribute used when callers do not name one.
pub const DEFAULT_WEIGHT_KEY: &str = "length";

/// Read-only capabilities the search engine needs from a road network.
///
/// Any representation (adjacency list, compressed sparse row, a view over a
/// database) can be searched by implementing these operations. Node
/// enumeration must be stable so that nearest-node ties resolve the same way
/// on every call.
pub trait RoadNetwork {
    /// Opaque node identifier. The ordering breaks priority ties.
    type Node: Copy + Eq + Hash + Ord + Debug + Display;

    /// Enumerate every node identifier in a deterministic order.
    fn node_ids(&self) -> impl Iterator<Item = Self::Node> + '_;

    /// Number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Whether `node` belongs to the graph.
    fn contains(&self, node: Self::Node) -> bool;

    /// Position of `node`, if it carries one.
    fn coordinates(&self, node: Self::Node) -> Option<Coordinates>;

    /// Outgoing neighbours of `node`, each listed once regardless of how many
    /// parallel edges lead to it.
    fn neighbours(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// The `weight_key` value of every parallel edge from `from` to `to`.
    ///
    /// Records lacking the attribute yield `None`.
    fn edge_weights<'a>(
        &'a self,
        from: Self::Node,
        to: Self::Node,
        weight_key: &'a str,
    ) -> impl Iterator<Item = Option<f64>> + 'a;
}

/// Named numeric attributes carried by a single edge record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeAttributes {
    weights: BTreeMap<String, f64>,
}

impl EdgeAttributes {
    /// Edge record with a single `length` weight.
    pub fn length(meters: f64) -> Self {
        Self::default().with_weight(DEFAULT_WEIGHT_KEY, meters)
    }

    /// Add or replace a named weight.
    pub fn with_weight(mut self, key: impl Into<String>, value: f64) -> Self {
        self.weights.insert(key.into(), value);
        self
    }

    /// Value of the named weight, if present.
    pub fn weight(&self, key: &str) -> Option<f64> {
        self.weights.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Node of a [`RoadGraph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadNode {
    pub id: NodeId,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone)]
struct Neighbour {
    target: NodeId,
    edges: Vec<EdgeAttributes>,
}

/// Directed road multigraph backed by adjacency lists.
///
/// Nodes keep their insertion order; neighbours keep the order in which
/// their first edge was added and hold every parallel edge record.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    nodes: Vec<RoadNode>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<Neighbour>>,
    edge_count: usize,
}

impl RoadGraph {
    /// Start building a graph.
    pub fn builder() -> RoadGraphBuilder {
        RoadGraphBuilder::default()
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[RoadNode] {
        &self.nodes
    }

    /// Look up a node by identifier.
    pub fn node(&self, id: NodeId) -> Option<&RoadNode> {
        self.index.get(&id).map(|&slot| &self.nodes[slot])
    }

    /// Number of edge records, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Identifiers of nodes that carry no coordinates.
    pub fn nodes_without_coordinates(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|node| node.coordinates.is_none())
            .map(|node| node.id)
            .collect()
    }

    /// Coordinates along `path`, skipping nodes without a position.
    pub fn path_coordinates(&self, path: &[NodeId]) -> Vec<Coordinates> {
        path.iter()
            .filter_map(|&id| self.node(id).and_then(|node| node.coordinates))
            .collect()
    }

    fn neighbour_entry(&self, from: NodeId, to: NodeId) -> Option<&Neighbour> {
        let slot = *self.index.get(&from)?;
        self.adjacency[slot]
            .iter()
            .find(|neighbour| neighbour.target == to)
    }
}

impl RoadNetwork for RoadGraph {
    type Node = NodeId;

    fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|node| node.id)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn contains(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    fn coordinates(&self, node: NodeId) -> Option<Coordinates> {
        self.node(node).and_then(|node| node.coordinates)
    }

    fn neighbours(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.index
            .get(&node)
            .map(|&slot| self.adjacency[slot].as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|neighbour| neighbour.target)
    }

    fn edge_weights<'a>(
        &'a self,
        from: NodeId,
        to: NodeId,
        weight_key: &'a str,
    ) -> impl Iterator<Item = Option<f64>> + 'a {
        self.neighbour_entry(from, to)
            .into_iter()
            .flat_map(move |neighbour| neighbour.edges.iter().map(move |e| e.weight(weight_key)))
    }
}

/// Incremental builder for [`RoadGraph`].
#[derive(Debug, Default)]
pub struct RoadGraphBuilder {
    graph: RoadGraph,
}

impl RoadGraphBuilder {
    /// Add a node. Identifiers must be unique.
    pub fn add_node(&mut self, id: NodeId, coordinates: Option<Coordinates>) -> Result<()> {
        if self.graph.index.contains_key(&id) {
            return Err(Error::DuplicateNode {
                node: id.to_string(),
            });
        }
        let slot = self.graph.nodes.len();
        self.graph.nodes.push(RoadNode { id, coordinates });
        self.graph.index.insert(id, slot);
        self.graph.adjacency.push(Vec::new());
        Ok(())
    }

    /// Add a directed edge record. Both endpoints must already exist;
    /// repeated calls for the same pair create parallel edges.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, attributes: EdgeAttributes) -> Result<()> {
        let Some(&slot) = self.graph.index.get(&from) else {
            return Err(Error::InvalidGraph {
                message: format!("edge {from} -> {to} starts at unknown node {from}"),
            });
        };
        if !self.graph.index.contains_key(&to) {
            return Err(Error::InvalidGraph {
                message: format!("edge {from} -> {to} ends at unknown node {to}"),
            });
        }

        let neighbours = &mut self.graph.adjacency[slot];
        match neighbours.iter_mut().find(|neighbour| neighbour.target == to) {
            Some(existing) => existing.edges.push(attributes),
            None => neighbours.push(Neighbour {
                target: to,
                edges: vec![attributes],
            }),
        }
        self.graph.edge_count += 1;
        Ok(())
    }

    /// Finish building.
    pub fn build(self) -> RoadGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_graph() -> RoadGraph {
        let mut builder = RoadGraph::builder();
        builder.add_node(1, Some(Coordinates::new(0.0, 0.0))).unwrap();
        builder.add_node(2, None).unwrap();
        builder.add_edge(1, 2, EdgeAttributes::length(10.0)).unwrap();
        builder.add_edge(1, 2, EdgeAttributes::length(3.0)).unwrap();
        builder
            .add_edge(1, 2, EdgeAttributes::default().with_weight("travel_time", 1.0))
            .unwrap();
        builder.build()
    }

    #[test]
    fn parallel_edges_share_one_neighbour() {
        let graph = two_node_graph();
        assert_eq!(graph.neighbours(1).collect::<Vec<_>>(), vec![2]);
        assert_eq!(graph.edge_count(), 3);
        let weights: Vec<_> = graph.edge_weights(1, 2, "length").collect();
        assert_eq!(weights, vec![Some(10.0), Some(3.0), None]);
    }

    #[test]
    fn edges_are_directed() {
        let graph = two_node_graph();
        assert_eq!(graph.neighbours(2).count(), 0);
        assert_eq!(graph.edge_weights(2, 1, "length").count(), 0);
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut builder = RoadGraph::builder();
        builder.add_node(7, None).unwrap();
        let err = builder.add_node(7, None).unwrap_err();
        assert!(matches!(err, Error::DuplicateNode { .. }));
    }

    #[test]
    fn edge_to_unknown_node_is_rejected() {
        let mut builder = RoadGraph::builder();
        builder.add_node(1, None).unwrap();
        let err = builder
            .add_edge(1, 99, EdgeAttributes::length(1.0))
            .unwrap_err();
        assert!(format!("{err}").contains("unknown node 99"));
    }

    #[test]
    fn unknown_node_has_no_neighbours_or_coordinates() {
        let graph = two_node_graph();
        assert!(!graph.contains(42));
        assert_eq!(graph.neighbours(42).count(), 0);
        assert_eq!(graph.coordinates(42), None);
        assert_eq!(graph.nodes_without_coordinates(), vec![2]);
    }
}
