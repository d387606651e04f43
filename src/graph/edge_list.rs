use crate::graph::types::GraphDefinition;
use crate::protocol::constants::INF_DISTANCE;

/// An undirected edge extracted from one incidence column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub u: u16,
    pub v: u16,
    pub weight: u32,
}

/// Build the edge list the relaxation loop iterates over, one entry per
/// incidence column, in column order.
///
/// A column with a single endpoint becomes a self-loop (u == v). The server
/// validator rejects such columns before this runs, but a looser external
/// caller may feed one through, so it is tolerated here rather than assumed
/// away. Columns with zero or more than two endpoints are structural errors.
pub fn collect_edges(graph: &GraphDefinition) -> Result<Vec<Edge>, String> {
    let mut edges = Vec::with_capacity(graph.edge_count as usize);

    for e in 0..graph.edge_count as usize {
        let mut endpoints: [u16; 2] = [0; 2];
        let mut found = 0usize;
        for (v, row) in graph.incidence.iter().enumerate() {
            if row.get(e).copied() == Some(1) {
                if found == 2 {
                    return Err(format!("edge {e} connects more than two vertices"));
                }
                endpoints[found] = v as u16;
                found += 1;
            }
        }

        let weight = *graph
            .weights
            .get(e)
            .ok_or_else(|| format!("edge {e} has no weight"))?;
        if weight > INF_DISTANCE {
            return Err(format!("weight of edge {e} exceeds the allowed maximum"));
        }

        match found {
            0 => return Err(format!("edge {e} has no incident vertices")),
            1 => edges.push(Edge {
                u: endpoints[0],
                v: endpoints[0],
                weight,
            }),
            _ => edges.push(Edge {
                u: endpoints[0],
                v: endpoints[1],
                weight,
            }),
        }
    }
    Ok(edges)
}
