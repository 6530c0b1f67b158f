//! Structural checks over a built map and its materialized graph.
//!
//! Tests and the fuzz harness run these after every generation; a violation
//! names the blocks or indices involved so a failing seed can be inspected.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use crate::block::BlockId;
use crate::graph::{BOSS_INDEX, GraphEdge, MapGraph};
use crate::grid_map::GridMap;
use crate::walk::has_edge;

#[derive(Clone, Debug, PartialEq)]
pub enum InvariantViolation {
    OutOfBounds { block: BlockId },
    DanglingBlock { block: BlockId },
    NonAdjacentStep { from: BlockId, to: BlockId },
    Crossing { left: BlockId, right: BlockId, row: u32 },
    MissingBoss,
    DanglingIndex { edge: GraphEdge, vertex_count: usize },
    VertexCountMismatch { expected: usize, actual: usize },
    MissingBossConnector { vertex: usize, expected: usize, actual: usize },
    EdgeCountMismatch { edge: GraphEdge, expected: usize, actual: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { block } => write!(f, "block {block:?} lies outside the walk area"),
            Self::DanglingBlock { block } => {
                write!(f, "edge endpoint {block:?} is missing from the node set")
            }
            Self::NonAdjacentStep { from, to } => {
                write!(f, "edge {from:?} -> {to:?} is not a single downward step")
            }
            Self::Crossing { left, right, row } => write!(
                f,
                "paths from {left:?} and {right:?} cross on their way into row {row}"
            ),
            Self::MissingBoss => write!(f, "graph has no boss vertex"),
            Self::DanglingIndex { edge, vertex_count } => write!(
                f,
                "edge {} -> {} references a vertex outside 0..{vertex_count}",
                edge.from, edge.to
            ),
            Self::VertexCountMismatch { expected, actual } => {
                write!(f, "expected {expected} vertices, graph has {actual}")
            }
            Self::MissingBossConnector { vertex, expected, actual } => write!(
                f,
                "vertex {vertex} ends {expected} walk steps but has {actual} edges to the boss"
            ),
            Self::EdgeCountMismatch { edge, expected, actual } => write!(
                f,
                "edge {} -> {} appears {actual} times, expected {expected}",
                edge.from, edge.to
            ),
        }
    }
}

impl Error for InvariantViolation {}

/// Checks bounds, closure, step shape and the no-crossing rule of the walked sets.
pub fn audit_map(map: &GridMap) -> Result<(), InvariantViolation> {
    for &block in map.nodes() {
        if block.col >= map.cols() || block.row > map.rows() - 2 {
            return Err(InvariantViolation::OutOfBounds { block });
        }
    }

    for (&from, destinations) in map.edges() {
        if !map.nodes().contains(&from) {
            return Err(InvariantViolation::DanglingBlock { block: from });
        }
        for &to in destinations {
            if !map.nodes().contains(&to) {
                return Err(InvariantViolation::DanglingBlock { block: to });
            }
            if to.row != from.row + 1 || from.col.abs_diff(to.col) > 1 {
                return Err(InvariantViolation::NonAdjacentStep { from, to });
            }
        }
    }

    for (&left, destinations) in map.edges() {
        let right = BlockId::new(left.row, left.col + 1);
        let down_right = BlockId::new(left.row + 1, left.col + 1);
        let down_left = BlockId::new(left.row + 1, left.col);
        if destinations.contains(&down_right) && has_edge(map.edges(), right, down_left) {
            return Err(InvariantViolation::Crossing { left, right, row: left.row + 1 });
        }
    }

    Ok(())
}

/// Checks that `graph` is a complete, index-safe materialization of `map`.
pub fn audit_graph(map: &GridMap, graph: &MapGraph) -> Result<(), InvariantViolation> {
    if graph.vertices.is_empty() {
        return Err(InvariantViolation::MissingBoss);
    }
    let expected = map.nodes().len() + 1;
    if graph.vertices.len() != expected {
        return Err(InvariantViolation::VertexCountMismatch {
            expected,
            actual: graph.vertices.len(),
        });
    }

    let vertex_count = graph.vertices.len();
    for &edge in &graph.edges {
        if edge.from >= vertex_count || edge.to >= vertex_count {
            return Err(InvariantViolation::DanglingIndex { edge, vertex_count });
        }
    }

    // Vertex order mirrors the node set, offset by the boss slot.
    let index_of: HashMap<BlockId, usize> =
        map.nodes().iter().enumerate().map(|(offset, &block)| (block, offset + 1)).collect();
    let boss_row = map.rows() - 2;
    let mut expected_edges = Vec::with_capacity(graph.edges.len());
    for (&source, destinations) in map.edges() {
        let from = vertex_index(&index_of, source)?;
        for &destination in destinations {
            let to = vertex_index(&index_of, destination)?;
            expected_edges.push(GraphEdge { from, to });
            if destination.row == boss_row {
                expected_edges.push(GraphEdge { from: to, to: BOSS_INDEX });
            }
        }
    }

    // Duplicate walk steps carry duplicate edges, so compare counts rather than sets.
    let expected_counts = edge_counts(&expected_edges);
    let actual_counts = edge_counts(&graph.edges);
    for &edge in expected_edges.iter().chain(&graph.edges) {
        let expected = expected_counts.get(&edge).copied().unwrap_or(0);
        let actual = actual_counts.get(&edge).copied().unwrap_or(0);
        if actual < expected && edge.to == BOSS_INDEX {
            return Err(InvariantViolation::MissingBossConnector {
                vertex: edge.from,
                expected,
                actual,
            });
        }
        if actual != expected {
            return Err(InvariantViolation::EdgeCountMismatch { edge, expected, actual });
        }
    }

    Ok(())
}

fn vertex_index(
    index_of: &HashMap<BlockId, usize>,
    block: BlockId,
) -> Result<usize, InvariantViolation> {
    index_of.get(&block).copied().ok_or(InvariantViolation::DanglingBlock { block })
}

fn edge_counts(edges: &[GraphEdge]) -> HashMap<GraphEdge, usize> {
    let mut counts = HashMap::with_capacity(edges.len());
    for &edge in edges {
        *counts.entry(edge).or_insert(0) += 1;
    }
    counts
}
