//! Output formatting for CLI results.
//!
//! Every command renders either human-readable text or a JSON document.
//! Text renderers return `String`s so they can be tested without a
//! terminal; [`Style`] carries the terminal-dependent pieces.

use std::fmt::Write as _;
use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;

use roadpath_lib::{
    AlgorithmComparison, Coordinates, NodeId, RoadGraph, RoutePlan, DEFAULT_WEIGHT_KEY,
};

use crate::terminal::{format_meters, format_with_separators, path_arrow, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Terminal-dependent rendering choices.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub palette: ColorPalette,
    pub arrow: &'static str,
}

impl Style {
    /// Detect colors and Unicode support from the environment.
    pub fn detect() -> Self {
        Self {
            palette: ColorPalette::detect(),
            arrow: path_arrow(),
        }
    }

    /// No colors, ASCII arrows.
    pub fn plain() -> Self {
        Self {
            palette: ColorPalette::plain(),
            arrow: "->",
        }
    }
}

/// JSON document for a single planned route.
#[derive(Debug, Serialize)]
pub struct RouteOutput<'a> {
    #[serde(flatten)]
    pub plan: &'a RoutePlan<NodeId>,
    pub weight_key: &'a str,
    /// Positions along the path; nodes without coordinates are omitted.
    pub coordinates: Vec<Coordinates>,
}

impl<'a> RouteOutput<'a> {
    pub fn new(plan: &'a RoutePlan<NodeId>, graph: &RoadGraph, weight_key: &'a str) -> Self {
        Self {
            plan,
            weight_key,
            coordinates: graph.path_coordinates(&plan.path),
        }
    }
}

/// JSON document for a Dijkstra / A* comparison.
#[derive(Debug, Serialize)]
pub struct ComparisonOutput<'a> {
    #[serde(flatten)]
    pub comparison: &'a AlgorithmComparison<NodeId>,
    pub weight_key: &'a str,
}

/// Result of the `nearest` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestOutput {
    pub query: Coordinates,
    pub node: NodeId,
    pub coordinates: Option<Coordinates>,
    pub distance_m: f64,
}

/// Result of the `distance` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceOutput {
    pub from: Coordinates,
    pub to: Coordinates,
    pub distance_m: f64,
}

/// Latitude/longitude extent of the positioned nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Result of the `info` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphInfo {
    pub nodes: usize,
    pub edges: usize,
    pub nodes_without_coordinates: Vec<NodeId>,
    pub bounds: Option<Bounds>,
}

impl GraphInfo {
    pub fn from_graph(graph: &RoadGraph) -> Self {
        let bounds = graph
            .nodes()
            .iter()
            .filter_map(|node| node.coordinates)
            .fold(None, |bounds: Option<Bounds>, c| {
                Some(match bounds {
                    None => Bounds {
                        min_lat: c.lat,
                        max_lat: c.lat,
                        min_lon: c.lon,
                        max_lon: c.lon,
                    },
                    Some(b) => Bounds {
                        min_lat: b.min_lat.min(c.lat),
                        max_lat: b.max_lat.max(c.lat),
                        min_lon: b.min_lon.min(c.lon),
                        max_lon: b.max_lon.max(c.lon),
                    },
                })
            });

        Self {
            nodes: graph.nodes().len(),
            edges: graph.edge_count(),
            nodes_without_coordinates: graph.nodes_without_coordinates(),
            bounds,
        }
    }
}

/// Serialize any output document as pretty JSON.
pub fn render_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Human-readable view of a single route.
pub fn render_route_text(
    plan: &RoutePlan<NodeId>,
    graph: &RoadGraph,
    weight_key: &str,
    style: &Style,
) -> String {
    let p = &style.palette;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}Route from {} to {} ({} hops; algorithm: {}):{}",
        p.white_bold,
        plan.start,
        plan.goal,
        plan.hop_count(),
        plan.algorithm,
        p.reset
    );
    for &id in &plan.path {
        match graph.node(id).and_then(|node| node.coordinates) {
            Some(c) => {
                let _ = writeln!(
                    out,
                    "  - {} {}({:.6}, {:.6}){}",
                    id, p.gray, c.lat, c.lon, p.reset
                );
            }
            None => {
                let _ = writeln!(out, "  - {} {}(no coordinates){}", id, p.gray, p.reset);
            }
        }
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "Total {}: {}{}{}",
        weight_key,
        p.cyan,
        format_cost(weight_key, plan.total_distance),
        p.reset
    );
    write_stats(&mut out, &plan.stats, style);
    out
}

/// Human-readable side-by-side view of both strategies.
pub fn render_comparison_text(
    comparison: &AlgorithmComparison<NodeId>,
    weight_key: &str,
    style: &Style,
) -> String {
    let p = &style.palette;
    let mut out = String::new();
    let dijkstra = &comparison.dijkstra;
    let a_star = &comparison.a_star;

    let _ = writeln!(
        out,
        "{}Comparing {} and {} from {} to {}:{}",
        p.white_bold, dijkstra.algorithm, a_star.algorithm, dijkstra.start, dijkstra.goal, p.reset
    );
    for plan in [dijkstra, a_star] {
        let _ = writeln!(
            out,
            "  {:<9} total {}  explored {}  visited {}  time {}",
            plan.algorithm.to_string(),
            format_cost(weight_key, plan.total_distance),
            format_with_separators(plan.stats.nodes_explored as u64),
            format_with_separators(plan.stats.nodes_visited as u64),
            format_duration(plan.stats.execution_time),
        );
        let _ = writeln!(
            out,
            "  {:<9} path  {}",
            "",
            format_path(&plan.path, style.arrow)
        );
    }
    out.push('\n');

    let (color, verdict) = if comparison.same_distance {
        (p.green, "yes")
    } else {
        (p.red, "no")
    };
    let _ = writeln!(out, "Same distance: {color}{verdict}{}", p.reset);
    if let Some(difference) = comparison.distance_difference {
        let _ = writeln!(out, "Distance difference: {difference:.4}");
    }
    match comparison.efficiency_gain_percent {
        Some(gain) if gain >= 0.0 => {
            let _ = writeln!(out, "A* explored {gain:.1}% fewer nodes than Dijkstra");
        }
        Some(gain) => {
            let _ = writeln!(out, "A* explored {:.1}% more nodes than Dijkstra", -gain);
        }
        None => {}
    }
    out
}

pub fn render_nearest_text(nearest: &NearestOutput, style: &Style) -> String {
    let p = &style.palette;
    format!(
        "Nearest node to ({:.6}, {:.6}): {}{}{} ({}{}{} away)\n",
        nearest.query.lat,
        nearest.query.lon,
        p.white_bold,
        nearest.node,
        p.reset,
        p.cyan,
        format_meters(nearest.distance_m),
        p.reset
    )
}

pub fn render_distance_text(distance: &DistanceOutput, style: &Style) -> String {
    let p = &style.palette;
    format!(
        "Great-circle distance: {}{}{} ({} m)\n",
        p.cyan,
        format_meters(distance.distance_m),
        p.reset,
        format_with_separators(distance.distance_m.round() as u64)
    )
}

pub fn render_info_text(info: &GraphInfo, style: &Style) -> String {
    /// Longest list of uncoordinated node ids printed in full.
    const MAX_LISTED: usize = 10;

    let p = &style.palette;
    let mut out = String::new();
    let _ = writeln!(out, "{}Graph summary:{}", p.white_bold, p.reset);
    let _ = writeln!(out, "  Nodes: {}", format_with_separators(info.nodes as u64));
    let _ = writeln!(out, "  Edges: {}", format_with_separators(info.edges as u64));

    let missing = &info.nodes_without_coordinates;
    if missing.is_empty() {
        let _ = writeln!(out, "  Nodes without coordinates: 0");
    } else {
        let mut listed: Vec<String> = missing
            .iter()
            .take(MAX_LISTED)
            .map(ToString::to_string)
            .collect();
        if missing.len() > MAX_LISTED {
            listed.push("...".to_string());
        }
        let _ = writeln!(
            out,
            "  Nodes without coordinates: {} ({})",
            missing.len(),
            listed.join(", ")
        );
    }

    if let Some(b) = info.bounds {
        let _ = writeln!(
            out,
            "  Bounds: lat {:.6}..{:.6}, lon {:.6}..{:.6}",
            b.min_lat, b.max_lat, b.min_lon, b.max_lon
        );
    }
    out
}

fn write_stats(out: &mut String, stats: &roadpath_lib::SearchStats, style: &Style) {
    let p = &style.palette;
    let rows = [
        (
            "Nodes explored",
            format_with_separators(stats.nodes_explored as u64),
        ),
        (
            "Nodes visited",
            format_with_separators(stats.nodes_visited as u64),
        ),
        ("Path length", format!("{} nodes", stats.path_length)),
        ("Search time", format_duration(stats.execution_time)),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{}{label}:{} {value}", p.gray, p.reset);
    }
}

/// Meters for the default weight, a bare number for any other attribute.
fn format_cost(weight_key: &str, value: f64) -> String {
    if weight_key == DEFAULT_WEIGHT_KEY {
        format_meters(value)
    } else if value.is_finite() {
        format!("{value:.2}")
    } else {
        "unreachable".to_string()
    }
}

fn format_duration(duration: Duration) -> String {
    format!("{:.3} ms", duration.as_secs_f64() * 1_000.0)
}

fn format_path(path: &[NodeId], arrow: &str) -> String {
    if path.is_empty() {
        return "(none)".to_string();
    }
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(&format!(" {arrow} "))
}
