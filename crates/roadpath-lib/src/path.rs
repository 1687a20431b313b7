use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::graph::RoadNetwork;

/// Distance reported when the target cannot be reached.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Estimate of the remaining cost from a node to the search target.
///
/// Estimates must be non-negative and must never exceed the true remaining
/// cost, otherwise guided search may return a longer path than necessary.
pub trait Heuristic<N> {
    fn estimate(&self, node: N) -> f64;
}

impl<N, F> Heuristic<N> for F
where
    F: Fn(N) -> f64,
{
    fn estimate(&self, node: N) -> f64 {
        self(node)
    }
}

/// No lookahead; turns [`search`] into Dijkstra's algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<N> Heuristic<N> for ZeroHeuristic {
    fn estimate(&self, _node: N) -> f64 {
        0.0
    }
}

/// Straight-line (great-circle) distance to the target; turns [`search`]
/// into A*.
///
/// Nodes without coordinates, or any node when the target has none, are
/// estimated at zero so they stay reachable.
#[derive(Debug, Clone, Copy)]
pub struct GreatCircleHeuristic<'g, G> {
    graph: &'g G,
    goal: Option<Coordinates>,
}

impl<'g, G: RoadNetwork> GreatCircleHeuristic<'g, G> {
    pub fn towards(graph: &'g G, target: G::Node) -> Self {
        Self {
            graph,
            goal: graph.coordinates(target),
        }
    }
}

impl<G: RoadNetwork> Heuristic<G::Node> for GreatCircleHeuristic<'_, G> {
    fn estimate(&self, node: G::Node) -> f64 {
        match (self.goal, self.graph.coordinates(node)) {
            (Some(goal), Some(here)) => here.distance_to(&goal),
            _ => 0.0,
        }
    }
}

/// Counters collected during a single search.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SearchStats {
    /// Relaxations that improved a distance and pushed a queue entry.
    pub nodes_explored: usize,
    /// Nodes popped from the queue and finalized.
    pub nodes_visited: usize,
    /// Number of nodes in the resulting path (zero when none was found).
    pub path_length: usize,
    pub total_distance: f64,
    /// Wall-clock time spent in the search loop.
    #[serde(rename = "execution_time_ms", serialize_with = "serialize_millis")]
    pub execution_time: Duration,
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64() * 1_000.0)
}

/// Result of a search: the path, its cost, and the counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome<N> {
    /// Nodes from source to target inclusive; empty when unreachable.
    pub path: Vec<N>,
    /// Path cost, or [`UNREACHABLE`].
    pub total_distance: f64,
    pub stats: SearchStats,
}

impl<N> SearchOutcome<N> {
    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    fn new(path: Vec<N>, total_distance: f64, mut stats: SearchStats, started: Instant) -> Self {
        stats.path_length = path.len();
        stats.total_distance = total_distance;
        stats.execution_time = started.elapsed();
        Self {
            path,
            total_distance,
            stats,
        }
    }
}

/// Uninformed shortest-path search.
pub fn dijkstra<G: RoadNetwork>(
    graph: &G,
    source: G::Node,
    target: G::Node,
    weight_key: &str,
) -> Result<SearchOutcome<G::Node>> {
    search(graph, source, target, weight_key, &ZeroHeuristic)
}

/// Shortest-path search guided by great-circle distance to the target.
///
/// The estimate is in meters, so the result is only guaranteed optimal when
/// `weight_key` holds lengths in meters (at least the straight-line span of
/// each edge). For other attributes use [`dijkstra`].
pub fn a_star<G: RoadNetwork>(
    graph: &G,
    source: G::Node,
    target: G::Node,
    weight_key: &str,
) -> Result<SearchOutcome<G::Node>> {
    let heuristic = GreatCircleHeuristic::towards(graph, target);
    search(graph, source, target, weight_key, &heuristic)
}

/// Priority-first shortest-path search from `source` to `target`.
///
/// The queue is ordered by `distance + heuristic(node)`, ties broken by the
/// smaller node identifier. Parallel edges resolve to their cheapest usable
/// `weight_key` value. An unreachable target is not an error: the outcome
/// has an empty path, [`UNREACHABLE`] distance and the counters collected
/// before the queue ran dry.
///
/// # Errors
///
/// Returns [`Error::UnknownNode`] if either endpoint is not in `graph`.
pub fn search<G, H>(
    graph: &G,
    source: G::Node,
    target: G::Node,
    weight_key: &str,
    heuristic: &H,
) -> Result<SearchOutcome<G::Node>>
where
    G: RoadNetwork,
    H: Heuristic<G::Node> + ?Sized,
{
    for endpoint in [source, target] {
        if !graph.contains(endpoint) {
            return Err(Error::unknown_node(endpoint));
        }
    }

    let started = Instant::now();
    let mut stats = SearchStats::default();

    if source == target {
        stats.nodes_visited = 1;
        return Ok(SearchOutcome::new(vec![source], 0.0, stats, started));
    }

    let capacity = graph.node_count();
    let mut distances: HashMap<G::Node, f64> = HashMap::with_capacity(capacity);
    let mut parents: HashMap<G::Node, G::Node> = HashMap::with_capacity(capacity);
    let mut visited: HashSet<G::Node> = HashSet::with_capacity(capacity);
    let mut queue = BinaryHeap::new();

    distances.insert(source, 0.0);
    queue.push(QueueEntry::new(source, heuristic.estimate(source)));

    while let Some(entry) = queue.pop() {
        let current = entry.node;
        if !visited.insert(current) {
            continue;
        }
        stats.nodes_visited += 1;

        let current_distance = distances.get(&current).copied().unwrap_or(UNREACHABLE);

        if current == target {
            let path = reconstruct_path(&parents, source, target);
            debug!(
                nodes_visited = stats.nodes_visited,
                nodes_explored = stats.nodes_explored,
                distance = current_distance,
                "search reached target"
            );
            return Ok(SearchOutcome::new(path, current_distance, stats, started));
        }

        for next in graph.neighbours(current) {
            if visited.contains(&next) {
                continue;
            }

            let Some(weight) = effective_weight(graph, current, next, weight_key) else {
                trace!(from = ?current, to = ?next, weight_key, "no usable edge weight");
                continue;
            };

            let tentative = current_distance + weight;
            if tentative < distances.get(&next).copied().unwrap_or(UNREACHABLE) {
                distances.insert(next, tentative);
                parents.insert(next, current);
                queue.push(QueueEntry::new(next, tentative + heuristic.estimate(next)));
                stats.nodes_explored += 1;
            }
        }
    }

    debug!(
        nodes_visited = stats.nodes_visited,
        nodes_explored = stats.nodes_explored,
        "search exhausted queue without reaching target"
    );
    Ok(SearchOutcome::new(Vec::new(), UNREACHABLE, stats, started))
}

/// Cheapest usable weight among the parallel edges `from -> to`.
///
/// Missing, NaN and infinite values are unusable; `None` when no record has
/// a usable value.
fn effective_weight<G: RoadNetwork>(
    graph: &G,
    from: G::Node,
    to: G::Node,
    weight_key: &str,
) -> Option<f64> {
    graph
        .edge_weights(from, to, weight_key)
        .flatten()
        .filter(|weight| weight.is_finite())
        .min_by(f64::total_cmp)
}

fn reconstruct_path<N: Copy + Eq + std::hash::Hash>(
    parents: &HashMap<N, N>,
    start: N,
    goal: N,
) -> Vec<N> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<N> {
    node: N,
    key: FloatOrd,
}

impl<N> QueueEntry<N> {
    fn new(node: N, key: f64) -> Self {
        Self {
            node,
            key: FloatOrd(key),
        }
    }
}

impl<N: Ord> Ord for QueueEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by key, then node.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl<N: Ord> PartialOrd for QueueEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
