use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the roadpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a search endpoint is not a node of the graph.
    #[error("unknown node: {node}")]
    UnknownNode { node: String },

    /// Raised when a latitude/longitude pair is non-finite or out of range.
    #[error("invalid coordinates: lat {lat}, lon {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    /// Raised when two nodes share an identifier while building a graph.
    #[error("duplicate node identifier: {node}")]
    DuplicateNode { node: String },

    /// Raised when the graph description is structurally invalid.
    #[error("invalid graph: {message}")]
    InvalidGraph { message: String },

    /// Raised when a coordinate endpoint could not be snapped to any node.
    #[error("no node with coordinates near {lat}, {lon}")]
    NoNearbyNode { lat: f64, lon: f64 },

    /// Raised when no route could be found between two nodes.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a graph file could not be read.
    #[error("failed to read graph file {path}: {source}")]
    GraphFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unknown_node(node: impl std::fmt::Display) -> Self {
        Error::UnknownNode {
            node: node.to_string(),
        }
    }
}
