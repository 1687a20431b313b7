//! Parsers for command-line algorithm, endpoint and coordinate arguments.
//!
//! These are plugged into clap as `value_parser`s, so errors are plain
//! strings that clap prints next to the offending flag.

use roadpath_lib::{Coordinates, Endpoint, NodeId, RouteAlgorithm};

/// Strategy selection for the route command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmChoice {
    /// Run one strategy.
    Single(RouteAlgorithm),
    /// Run both and compare them.
    Both,
}

/// Parse `both` or any name [`RouteAlgorithm`] accepts.
pub fn parse_algorithm(value: &str) -> Result<AlgorithmChoice, String> {
    if value.trim().eq_ignore_ascii_case("both") {
        return Ok(AlgorithmChoice::Both);
    }
    value.trim().parse().map(AlgorithmChoice::Single)
}

/// Parse a `LAT,LON` pair in degrees.
pub fn parse_coordinates(value: &str) -> Result<Coordinates, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON but got '{value}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;
    Coordinates::checked(lat, lon).map_err(|err| err.to_string())
}

/// Parse a route endpoint: a node id, or a `LAT,LON` pair to snap to the
/// nearest node.
pub fn parse_endpoint(value: &str) -> Result<Endpoint<NodeId>, String> {
    if value.contains(',') {
        return parse_coordinates(value).map(Endpoint::Coordinates);
    }
    value
        .trim()
        .parse::<NodeId>()
        .map(Endpoint::Node)
        .map_err(|_| format!("expected a node id or LAT,LON but got '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ids_parse_as_nodes() {
        assert_eq!(parse_endpoint("101"), Ok(Endpoint::Node(101)));
        assert_eq!(parse_endpoint("-7"), Ok(Endpoint::Node(-7)));
    }

    #[test]
    fn pairs_parse_as_coordinates() {
        assert_eq!(
            parse_endpoint("51.5, -0.13"),
            Ok(Endpoint::Coordinates(Coordinates::new(51.5, -0.13)))
        );
    }

    #[test]
    fn algorithm_names_follow_library_parsing() {
        assert_eq!(
            parse_algorithm("dijkstra"),
            Ok(AlgorithmChoice::Single(RouteAlgorithm::Dijkstra))
        );
        assert_eq!(
            parse_algorithm("A*"),
            Ok(AlgorithmChoice::Single(RouteAlgorithm::AStar))
        );
        assert_eq!(parse_algorithm("Both"), Ok(AlgorithmChoice::Both));
        assert!(parse_algorithm("bfs").unwrap_err().contains("unknown algorithm"));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(parse_endpoint("north").is_err());
        assert!(parse_coordinates("51.5").is_err());
        assert!(parse_coordinates("abc,1").unwrap_err().contains("latitude"));
        assert!(parse_coordinates("95,0").unwrap_err().contains("invalid coordinates"));
    }
}
