//! Shortest paths via Bellman-Ford.
//!
//! The algorithm relaxes edges in input-column order and updates only on
//! strict improvement, which makes the reconstructed path deterministic for
//! a fixed edge ordering. Other algorithms may tie-break differently, so
//! tests compare distances and treat exact path equality as
//! implementation-defined.

use crate::graph::edge_list::collect_edges;
use crate::graph::types::{GraphDefinition, PathComputation};
use crate::graph::validate::validate_graph;
use crate::protocol::constants::INF_DISTANCE;

/// Distance/parent slot for one vertex. Vertices are plain indices, so the
/// whole search state is two flat arenas indexed by vertex.
#[derive(Clone, Copy)]
struct VertexSlot {
    dist: u32,
    parent: Option<u16>,
}

/// Compute the shortest path between `source` and `target`.
///
/// Runs validation first (defensively, even for graphs that were validated
/// at upload), then at most V-1 relaxation rounds over the edge list, both
/// directions per edge since the graph is undirected, stopping early when a
/// full round changes nothing.
pub fn shortest_path(graph: &GraphDefinition, source: u16, target: u16) -> PathComputation {
    let mut result = PathComputation::default();

    if graph.vertex_count == 0 {
        result.error = "graph not initialized".to_owned();
        return result;
    }
    if source >= graph.vertex_count || target >= graph.vertex_count {
        result.error = "vertices out of bounds".to_owned();
        return result;
    }

    let validation = validate_graph(graph);
    if !validation.ok {
        result.error = validation.message;
        return result;
    }

    let edges = match collect_edges(graph) {
        Ok(edges) => edges,
        Err(message) => {
            result.error = message;
            return result;
        }
    };

    let n = graph.vertex_count as usize;
    let mut slots = vec![
        VertexSlot {
            dist: INF_DISTANCE,
            parent: None,
        };
        n
    ];
    slots[source as usize].dist = 0;

    for _round in 1..n {
        let mut updated = false;
        for edge in &edges {
            let (u, v, w) = (edge.u as usize, edge.v as usize, edge.weight);

            if slots[u].dist != INF_DISTANCE && slots[u].dist + w < slots[v].dist {
                slots[v].dist = slots[u].dist + w;
                slots[v].parent = Some(edge.u);
                updated = true;
            }
            // Reverse direction of the same edge; never reparent the source.
            if slots[v].dist != INF_DISTANCE && slots[v].dist + w < slots[u].dist {
                slots[u].dist = slots[v].dist + w;
                if edge.u != source {
                    slots[u].parent = Some(edge.v);
                }
                updated = true;
            }
        }
        if !updated {
            break;
        }
    }

    if slots[target as usize].dist == INF_DISTANCE {
        result.reachable = false;
        result.distance = INF_DISTANCE;
        result.error = "no path between vertices".to_owned();
        return result;
    }

    let mut path = Vec::new();
    let mut cursor = Some(target);
    while let Some(v) = cursor {
        path.push(v);
        if v == source {
            break;
        }
        cursor = slots[v as usize].parent;
    }
    path.reverse();

    if path.first().copied() != Some(source) {
        result.error = "failed to reconstruct path".to_owned();
        return result;
    }

    result.reachable = true;
    result.distance = slots[target as usize].dist;
    result.path = path;
    result
}
