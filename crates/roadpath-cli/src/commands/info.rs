//! Summary of a road graph file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::warn;

use roadpath_cli::output::{render_info_text, render_json, GraphInfo, OutputFormat, Style};

use super::load_graph;

/// Arguments for the info command.
#[derive(Debug, Clone, Args)]
pub struct InfoCommandArgs {
    /// Road graph JSON file.
    #[arg(long)]
    pub graph: PathBuf,
}

pub fn handle_info_command(args: &InfoCommandArgs, format: OutputFormat) -> Result<()> {
    let graph = load_graph(&args.graph)?;
    let info = GraphInfo::from_graph(&graph);
    if info.bounds.is_none() && info.nodes > 0 {
        warn!("no node carries coordinates; A* will behave like Dijkstra");
    }

    match format {
        OutputFormat::Json => println!("{}", render_json(&info)?),
        OutputFormat::Text => print!("{}", render_info_text(&info, &Style::detect())),
    }
    Ok(())
}
