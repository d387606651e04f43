//! Text representation of a graph as read from a file or the console.
//!
//! Layout: a line with `<vertices> <edges>`, then one line per vertex with
//! `edges` incidence cells (0 or 1), then one line with `edges` weights.

use std::io::BufRead;

use crate::graph::types::GraphDefinition;
use crate::graph::validate::{MIN_EDGES, MIN_VERTICES};

const MAX_VERTICES: u32 = u16::MAX as u32;
const MAX_EDGES: u32 = u16::MAX as u32;

/// Parses a graph definition from a buffered reader.
///
/// Counts are validated against the supported range before any matrix data is
/// read, each incidence row must hold exactly `edges` cells and every cell must
/// be 0 or 1. Any non-blank content after the weights line is an error.
pub fn read_graph<R: BufRead>(reader: R) -> Result<GraphDefinition, String> {
    let mut lines = reader.lines();

    let header = next_line(&mut lines)?.ok_or_else(|| "missing graph size line".to_string())?;
    let mut sizes = header.split_whitespace();
    let vertices = parse_count(sizes.next(), "vertex count")?;
    let edges = parse_count(sizes.next(), "edge count")?;
    if sizes.next().is_some() {
        return Err("unexpected extra data on the graph size line".to_string());
    }
    if vertices < u32::from(MIN_VERTICES) || vertices > MAX_VERTICES {
        return Err(format!(
            "invalid vertex count {vertices}: must be between {MIN_VERTICES} and {MAX_VERTICES}"
        ));
    }
    if edges < u32::from(MIN_EDGES) || edges > MAX_EDGES {
        return Err(format!(
            "invalid edge count {edges}: must be between {MIN_EDGES} and {MAX_EDGES}"
        ));
    }

    let mut incidence = Vec::with_capacity(vertices as usize);
    for row in 0..vertices {
        let line = next_line(&mut lines)?
            .ok_or_else(|| format!("incidence matrix ends early at row {}", row + 1))?;
        incidence.push(parse_row(&line, row, edges)?);
    }

    let weights_line =
        next_line(&mut lines)?.ok_or_else(|| "missing edge weight line".to_string())?;
    let mut weights = Vec::with_capacity(edges as usize);
    for token in weights_line.split_whitespace() {
        let weight: u32 = token
            .parse()
            .map_err(|_| format!("invalid edge weight '{token}'"))?;
        weights.push(weight);
    }
    if weights.len() != edges as usize {
        return Err(format!(
            "wrong number of weights: expected {edges}, found {}",
            weights.len()
        ));
    }

    for line in lines {
        let line = line.map_err(|e| format!("read error: {e}"))?;
        if !line.trim().is_empty() {
            return Err("unexpected data after the weight list".to_string());
        }
    }

    Ok(GraphDefinition {
        vertex_count: vertices as u16,
        edge_count: edges as u16,
        incidence,
        weights,
    })
}

fn next_line<R: BufRead>(
    lines: &mut std::io::Lines<R>,
) -> Result<Option<String>, String> {
    for line in lines {
        let line = line.map_err(|e| format!("read error: {e}"))?;
        if !line.trim().is_empty() {
            return Ok(Some(line));
        }
    }
    Ok(None)
}

fn parse_count(token: Option<&str>, what: &str) -> Result<u32, String> {
    let token = token.ok_or_else(|| format!("missing {what} on the graph size line"))?;
    token.parse().map_err(|_| format!("invalid {what} '{token}'"))
}

fn parse_row(line: &str, row: u32, edges: u32) -> Result<Vec<u8>, String> {
    let mut cells = Vec::with_capacity(edges as usize);
    for token in line.split_whitespace() {
        match token {
            "0" => cells.push(0),
            "1" => cells.push(1),
            other => {
                return Err(format!(
                    "invalid incidence cell in row {}: expected 0 or 1, found '{other}'",
                    row + 1
                ));
            }
        }
    }
    if cells.len() != edges as usize {
        return Err(format!(
            "row {} of the incidence matrix has {} cells, expected {edges}",
            row + 1,
            cells.len()
        ));
    }
    Ok(cells)
}
