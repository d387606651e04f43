//! Wall-clock sizing run for the shortest path engine.
//!
//! Grows a connected graph (ring backbone plus random chords) until one
//! source-to-farthest-vertex computation takes more than a second, then
//! reports the largest size that stayed under the limit.

use std::time::Instant;

use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use pathlink::graph::{self, GraphDefinition};

fn generate_graph(n: u16, rng: &mut StdRng) -> GraphDefinition {
    // Ring backbone keeps every vertex reachable; chords add density.
    let chords = n as usize;
    let edge_count = n as usize + chords;
    let mut incidence = vec![vec![0u8; edge_count]; n as usize];
    let mut weights = Vec::with_capacity(edge_count);

    for e in 0..n as usize {
        incidence[e][e] = 1;
        incidence[(e + 1) % n as usize][e] = 1;
        weights.push(rng.gen_range(1..100));
    }
    for e in n as usize..edge_count {
        let u = rng.gen_range(0..n);
        let mut v = rng.gen_range(0..n);
        if v == u {
            v = (v + 1) % n;
        }
        incidence[u as usize][e] = 1;
        incidence[v as usize][e] = 1;
        weights.push(rng.gen_range(1..100));
    }

    GraphDefinition {
        vertex_count: n,
        edge_count: edge_count as u16,
        incidence,
        weights,
    }
}

fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut largest: Option<(u16, u16)> = None;

    let mut n: u16 = 6;
    while n <= 4000 {
        let graph = generate_graph(n, &mut rng);

        let start = Instant::now();
        let result = graph::shortest_path(&graph, 0, n / 2);
        let elapsed = start.elapsed();

        let seconds = elapsed.as_secs_f64();
        println!(
            "n={} edges={} reachable={} time={:.3}s",
            n, graph.edge_count, result.reachable, seconds
        );
        if seconds >= 1.0 {
            println!("(limit exceeded)");
            break;
        }
        largest = Some((n, graph.edge_count));

        n = n.saturating_mul(2).min(n + 500).max(n + 6);
    }

    match largest {
        Some((vertices, edges)) => {
            println!("\nLargest graph under one second: {vertices} vertices, {edges} edges");
        }
        None => println!("\nNo size finished under one second"),
    }
}
