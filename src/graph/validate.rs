use crate::graph::types::{GraphDefinition, ValidationResult};
use crate::protocol::constants::INF_DISTANCE;

/// Minimum graph sizes the service accepts.
pub const MIN_VERTICES: u16 = 6;
pub const MIN_EDGES: u16 = 6;

/// Structural validation, short-circuiting on the first failure:
/// vertex count, edge count, weight list length, weight range, then one
/// incidence column per edge with exactly two endpoints.
///
/// This is the server-authoritative check. It runs before a graph is stored
/// and again defensively before every path computation. Note the client-side
/// pre-upload check is deliberately looser (counts only), so a graph that
/// passes there can still be rejected here.
pub fn validate_graph(graph: &GraphDefinition) -> ValidationResult {
    if graph.vertex_count < MIN_VERTICES {
        return ValidationResult::fail(format!(
            "invalid vertex count {}: the graph must have between {} and {} vertices",
            graph.vertex_count,
            MIN_VERTICES,
            u16::MAX
        ));
    }
    if graph.edge_count < MIN_EDGES {
        return ValidationResult::fail(format!(
            "invalid edge count {}: the graph must have between {} and {} edges",
            graph.edge_count,
            MIN_EDGES,
            u16::MAX
        ));
    }
    if graph.weights.len() != graph.edge_count as usize {
        return ValidationResult::fail(format!(
            "weight list has {} entries but the graph declares {} edges",
            graph.weights.len(),
            graph.edge_count
        ));
    }
    for (e, weight) in graph.weights.iter().enumerate() {
        if *weight > INF_DISTANCE {
            return ValidationResult::fail(format!(
                "weight of edge {e} exceeds the allowed maximum"
            ));
        }
    }
    if graph.incidence.len() != graph.vertex_count as usize {
        return ValidationResult::fail("incidence matrix row count does not match vertex count");
    }

    for e in 0..graph.edge_count as usize {
        let mut ones = 0u32;
        for row in &graph.incidence {
            match row.get(e) {
                Some(0) => {}
                Some(1) => ones += 1,
                _ => {
                    return ValidationResult::fail(
                        "incidence matrix cells must be 0 or 1",
                    );
                }
            }
        }
        if ones != 2 {
            return ValidationResult::fail(format!(
                "edge {e} must be incident to exactly two vertices, found {ones}"
            ));
        }
    }

    ValidationResult::ok()
}
