//! Small graph constructors shared by the unit tests.

use crate::graph::types::GraphDefinition;

/// Ring of `n` vertices: edges (0-1, 1-2, ..., n-1 - 0), all weights 1.
pub fn ring(n: u16) -> GraphDefinition {
    let n = n as usize;
    let mut incidence = vec![vec![0u8; n]; n];
    for e in 0..n {
        incidence[e][e] = 1;
        incidence[(e + 1) % n][e] = 1;
    }
    GraphDefinition {
        vertex_count: n as u16,
        edge_count: n as u16,
        incidence,
        weights: vec![1; n],
    }
}

/// Two disjoint rings of `n` vertices each, no cross edges.
///
/// Vertices 0..n form the first component, n..2n the second.
pub fn disjoint_components(n: u16) -> GraphDefinition {
    let n = n as usize;
    let total = 2 * n;
    let mut incidence = vec![vec![0u8; total]; total];
    for e in 0..n {
        incidence[e][e] = 1;
        incidence[(e + 1) % n][e] = 1;
    }
    for e in 0..n {
        incidence[n + e][n + e] = 1;
        incidence[n + (e + 1) % n][n + e] = 1;
    }
    GraphDefinition {
        vertex_count: total as u16,
        edge_count: total as u16,
        incidence,
        weights: vec![1; total],
    }
}
