//! Route command handler for shortest paths between two endpoints.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use roadpath_cli::input::{parse_algorithm, parse_endpoint, AlgorithmChoice};
use roadpath_cli::output::{
    render_comparison_text, render_json, render_route_text, ComparisonOutput, OutputFormat,
    RouteOutput, Style,
};
use roadpath_lib::{
    compare_algorithms, plan_route, Endpoint, Error as RouteError, NodeId, RouteRequest,
    DEFAULT_WEIGHT_KEY,
};

use super::load_graph;

/// Arguments for the route command.
#[derive(Debug, Clone, Args)]
pub struct RouteCommandArgs {
    /// Road graph JSON file.
    #[arg(long)]
    pub graph: PathBuf,
    /// Start node id, or LAT,LON to snap to the nearest node.
    #[arg(long = "from", value_parser = parse_endpoint, allow_hyphen_values = true)]
    pub from: Endpoint<NodeId>,
    /// Goal node id, or LAT,LON to snap to the nearest node.
    #[arg(long = "to", value_parser = parse_endpoint, allow_hyphen_values = true)]
    pub to: Endpoint<NodeId>,
    /// Search strategy. A* only applies to the `length` weight; other
    /// weights run Dijkstra.
    #[arg(
        long,
        value_parser = parse_algorithm,
        default_value = "a-star",
        value_name = "dijkstra|a-star|both"
    )]
    pub algorithm: AlgorithmChoice,
    /// Edge attribute to minimise.
    #[arg(long, default_value = DEFAULT_WEIGHT_KEY)]
    pub weight: String,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest<NodeId> {
        RouteRequest::new(self.from, self.to).with_weight_key(self.weight.clone())
    }
}

/// Handle the route subcommand.
///
/// Fails with "no route found" when the goal is unreachable, so scripts can
/// rely on the exit status.
pub fn handle_route_command(args: &RouteCommandArgs, format: OutputFormat) -> Result<()> {
    let graph = load_graph(&args.graph)?;
    let request = args.to_request();

    let algorithm = match args.algorithm {
        AlgorithmChoice::Single(algorithm) => algorithm,
        AlgorithmChoice::Both => {
            let comparison = compare_algorithms(&graph, &request)?;
            if !comparison.dijkstra.is_found() && !comparison.a_star.is_found() {
                return Err(not_found(comparison.dijkstra.start, comparison.dijkstra.goal));
            }
            match format {
                OutputFormat::Json => println!(
                    "{}",
                    render_json(&ComparisonOutput {
                        comparison: &comparison,
                        weight_key: &args.weight,
                    })?
                ),
                OutputFormat::Text => print!(
                    "{}",
                    render_comparison_text(&comparison, &args.weight, &Style::detect())
                ),
            }
            return Ok(());
        }
    };

    let plan = plan_route(&graph, &request, algorithm)?;
    if !plan.is_found() {
        return Err(not_found(plan.start, plan.goal));
    }
    match format {
        OutputFormat::Json => println!(
            "{}",
            render_json(&RouteOutput::new(&plan, &graph, &args.weight))?
        ),
        OutputFormat::Text => print!(
            "{}",
            render_route_text(&plan, &graph, &args.weight, &Style::detect())
        ),
    }
    Ok(())
}

fn not_found(start: NodeId, goal: NodeId) -> anyhow::Error {
    RouteError::RouteNotFound {
        start: start.to_string(),
        goal: goal.to_string(),
    }
    .into()
}

