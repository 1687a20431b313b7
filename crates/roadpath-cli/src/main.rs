mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadpath_cli::output::OutputFormat;

use commands::distance::{handle_distance_command, DistanceCommandArgs};
use commands::info::{handle_info_command, InfoCommandArgs};
use commands::nearest::{handle_nearest_command, NearestCommandArgs};
use commands::route::{handle_route_command, RouteCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest paths over geospatial road graphs")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two nodes or coordinates.
    Route(RouteCommandArgs),
    /// Find the node closest to a coordinate.
    Nearest(NearestCommandArgs),
    /// Great-circle distance between two coordinates.
    Distance(DistanceCommandArgs),
    /// Summarise a road graph file.
    Info(InfoCommandArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Command::Route(args) => handle_route_command(args, cli.format),
        Command::Nearest(args) => handle_nearest_command(args, cli.format),
        Command::Distance(args) => handle_distance_command(args, cli.format),
        Command::Info(args) => handle_info_command(args, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
