use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use roadpath_lib::{
    a_star, dijkstra, load_road_graph, nearest_node, Coordinates, EdgeAttributes, RoadGraph,
};
use std::hint::black_box;
use std::path::PathBuf;

/// Side length of the synthetic street grid.
const GRID: i64 = 60;
/// Roughly 100 m between neighbouring intersections.
const SPACING_DEGREES: f64 = 0.0009;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/sample_network.json")
}

fn grid_graph() -> RoadGraph {
    let id = |row: i64, col: i64| row * GRID + col;
    let position = |row: i64, col: i64| {
        Coordinates::new(
            51.5 + row as f64 * SPACING_DEGREES,
            -0.13 + col as f64 * SPACING_DEGREES,
        )
    };

    let mut builder = RoadGraph::builder();
    for row in 0..GRID {
        for col in 0..GRID {
            builder
                .add_node(id(row, col), Some(position(row, col)))
                .expect("unique grid id");
        }
    }
    for row in 0..GRID {
        for col in 0..GRID {
            let here = position(row, col);
            for (next_row, next_col) in [(row + 1, col), (row, col + 1)] {
                if next_row >= GRID || next_col >= GRID {
                    continue;
                }
                // Streets are a little longer than the crow flies.
                let length = here.distance_to(&position(next_row, next_col)) * 1.2;
                let edge = EdgeAttributes::length(length);
                builder
                    .add_edge(id(row, col), id(next_row, next_col), edge.clone())
                    .expect("grid edge");
                builder
                    .add_edge(id(next_row, next_col), id(row, col), edge)
                    .expect("grid edge");
            }
        }
    }
    builder.build()
}

static GRID_GRAPH: Lazy<RoadGraph> = Lazy::new(grid_graph);
static SAMPLE_GRAPH: Lazy<RoadGraph> =
    Lazy::new(|| load_road_graph(&fixture_path()).expect("fixture loads"));

fn benchmark_pathfinding(c: &mut Criterion) {
    let grid = &*GRID_GRAPH;
    let corner = 0;
    let opposite = GRID * GRID - 1;

    c.bench_function("dijkstra_grid_corner_to_corner", |b| {
        b.iter(|| {
            let outcome = dijkstra(grid, corner, opposite, "length").expect("route exists");
            black_box(outcome.stats.nodes_visited)
        });
    });

    c.bench_function("astar_grid_corner_to_corner", |b| {
        b.iter(|| {
            let outcome = a_star(grid, corner, opposite, "length").expect("route exists");
            black_box(outcome.stats.nodes_visited)
        });
    });

    c.bench_function("nearest_node_grid", |b| {
        b.iter(|| black_box(nearest_node(grid, 51.52, -0.11)));
    });

    let sample = &*SAMPLE_GRAPH;
    c.bench_function("astar_sample_network", |b| {
        b.iter(|| {
            let outcome = a_star(sample, 101, 109, "length").expect("route exists");
            black_box(outcome.total_distance)
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
