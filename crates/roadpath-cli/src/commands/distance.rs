//! Great-circle distance between two coordinates; needs no graph.

use anyhow::Result;
use clap::Args;

use roadpath_cli::input::parse_coordinates;
use roadpath_cli::output::{render_distance_text, render_json, DistanceOutput, OutputFormat, Style};
use roadpath_lib::{great_circle_distance, Coordinates};

/// Arguments for the distance command.
#[derive(Debug, Clone, Args)]
pub struct DistanceCommandArgs {
    /// First point as LAT,LON.
    #[arg(long = "from", value_parser = parse_coordinates, allow_hyphen_values = true)]
    pub from: Coordinates,
    /// Second point as LAT,LON.
    #[arg(long = "to", value_parser = parse_coordinates, allow_hyphen_values = true)]
    pub to: Coordinates,
}

pub fn handle_distance_command(args: &DistanceCommandArgs, format: OutputFormat) -> Result<()> {
    let output = DistanceOutput {
        from: args.from,
        to: args.to,
        distance_m: great_circle_distance(args.from.lat, args.from.lon, args.to.lat, args.to.lon),
    };

    match format {
        OutputFormat::Json => println!("{}", render_json(&output)?),
        OutputFormat::Text => print!("{}", render_distance_text(&output, &Style::detect())),
    }
    Ok(())
}
