// Module exports for CLI subcommands.
//
// Each module handles one subcommand; main.rs parses arguments and
// dispatches here.

pub mod distance;
pub mod info;
pub mod nearest;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use roadpath_lib::{load_road_graph, RoadGraph};
use tracing::info;

/// Load a road graph file, attaching the path to any failure.
pub(crate) fn load_graph(path: &Path) -> Result<RoadGraph> {
    let graph = load_road_graph(path)
        .with_context(|| format!("failed to load road graph from {}", path.display()))?;
    info!(
        path = %path.display(),
        nodes = graph.nodes().len(),
        edges = graph.edge_count(),
        "loaded road graph"
    );
    Ok(graph)
}
