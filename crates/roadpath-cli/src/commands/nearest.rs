//! Nearest-node lookup for a coordinate.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use roadpath_cli::output::{render_json, render_nearest_text, NearestOutput, OutputFormat, Style};
use roadpath_lib::{nearest_node_with_distance, Coordinates, Error as LookupError, RoadNetwork};

use super::load_graph;

/// Arguments for the nearest command.
#[derive(Debug, Clone, Args)]
pub struct NearestCommandArgs {
    /// Road graph JSON file.
    #[arg(long)]
    pub graph: PathBuf,
    /// Query latitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    /// Query longitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
}

pub fn handle_nearest_command(args: &NearestCommandArgs, format: OutputFormat) -> Result<()> {
    let query = Coordinates::checked(args.lat, args.lon)?;
    let graph = load_graph(&args.graph)?;

    let (node, distance_m) = nearest_node_with_distance(&graph, query.lat, query.lon).ok_or(
        LookupError::NoNearbyNode {
            lat: query.lat,
            lon: query.lon,
        },
    )?;
    let output = NearestOutput {
        query,
        node,
        coordinates: graph.coordinates(node),
        distance_m,
    };

    match format {
        OutputFormat::Json => println!("{}", render_json(&output)?),
        OutputFormat::Text => print!("{}", render_nearest_text(&output, &Style::detect())),
    }
    Ok(())
}

