//! Turns the walked node and edge sets into jittered vertex positions and index edges.

use std::collections::HashMap;

use log::debug;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::block::{BlockId, EdgeMap, NodeSet};
use crate::seed::random_f64;

/// Vertex index of the boss node in every [`MapGraph`].
pub const BOSS_INDEX: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapGraph {
    pub vertices: Vec<Point2>,
    pub edges: Vec<GraphEdge>,
}

impl MapGraph {
    /// Boss position, or `None` for a hand-built graph with no vertices.
    pub fn boss(&self) -> Option<Point2> {
        self.vertices.get(BOSS_INDEX).copied()
    }

    /// Lengths and indices are widened to `u64` so the encoding never truncates.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(16 + 16 * (self.vertices.len() + self.edges.len()));
        bytes.extend((self.vertices.len() as u64).to_le_bytes());
        for vertex in &self.vertices {
            bytes.extend(vertex.x.to_bits().to_le_bytes());
            bytes.extend(vertex.y.to_bits().to_le_bytes());
        }
        bytes.extend((self.edges.len() as u64).to_le_bytes());
        for edge in &self.edges {
            bytes.extend((edge.from as u64).to_le_bytes());
            bytes.extend((edge.to as u64).to_le_bytes());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

pub(crate) struct GraphLayout<'a> {
    pub(crate) rows: u32,
    pub(crate) cols: u32,
    pub(crate) block_width: f64,
    pub(crate) block_height: f64,
    pub(crate) nodes: &'a NodeSet,
    pub(crate) edges: &'a EdgeMap,
}

impl GraphLayout<'_> {
    pub(crate) fn boss_position(&self) -> Point2 {
        Point2 {
            x: self.block_width * f64::from(self.cols) * 0.5,
            y: self.block_height * (f64::from(self.rows) - 0.5),
        }
    }

    fn jittered_position(&self, block: BlockId, rng: &mut ChaCha8Rng) -> Point2 {
        let x_offset = random_f64(rng, 0.25 * self.block_width, 0.75 * self.block_width);
        let y_offset = random_f64(rng, 0.25 * self.block_height, 0.75 * self.block_height);
        Point2 {
            x: f64::from(block.col) * self.block_width + x_offset,
            y: f64::from(block.row) * self.block_height + y_offset,
        }
    }
}

pub(crate) fn materialize(layout: &GraphLayout<'_>, rng: &mut ChaCha8Rng) -> MapGraph {
    let mut vertices = Vec::with_capacity(layout.nodes.len() + 1);
    let mut edges = Vec::new();
    vertices.push(layout.boss_position());

    let mut index_of = HashMap::with_capacity(layout.nodes.len());
    for &block in layout.nodes {
        index_of.insert(block, vertices.len());
        vertices.push(layout.jittered_position(block, rng));
    }

    let boss_row = layout.rows - 2;
    for (source, destinations) in layout.edges {
        let Some(&from) = index_of.get(source) else {
            continue;
        };
        for destination in destinations {
            let Some(&to) = index_of.get(destination) else {
                continue;
            };
            edges.push(GraphEdge { from, to });
            if destination.row == boss_row {
                edges.push(GraphEdge { from: to, to: BOSS_INDEX });
            }
        }
    }

    debug!("materialized {} vertices and {} edges", vertices.len(), edges.len());
    MapGraph { vertices, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seeded_rng;

    fn layout_fixture<'a>(nodes: &'a NodeSet, edges: &'a EdgeMap) -> GraphLayout<'a> {
        GraphLayout { rows: 4, cols: 3, block_width: 10.0, block_height: 20.0, nodes, edges }
    }

    fn chain(blocks: &[(u32, u32)]) -> (NodeSet, EdgeMap) {
        let mut nodes = NodeSet::new();
        let mut edges = EdgeMap::new();
        for pair in blocks.windows(2) {
            let from = BlockId::new(pair[0].0, pair[0].1);
            let to = BlockId::new(pair[1].0, pair[1].1);
            nodes.insert(from);
            nodes.insert(to);
            edges.entry(from).or_default().push(to);
        }
        (nodes, edges)
    }

    #[test]
    fn boss_sits_at_bottom_centre() {
        let (nodes, edges) = chain(&[]);
        let graph = materialize(&layout_fixture(&nodes, &edges), &mut seeded_rng(1));
        assert_eq!(graph.vertices, vec![Point2 { x: 15.0, y: 70.0 }]);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn vertices_follow_node_order_after_the_boss() {
        let (nodes, edges) = chain(&[(0, 1), (1, 0), (2, 0)]);
        let graph = materialize(&layout_fixture(&nodes, &edges), &mut seeded_rng(3));
        assert_eq!(graph.vertices.len(), 4);

        for (offset, block) in nodes.iter().enumerate() {
            let vertex = graph.vertices[offset + 1];
            let cell_x = f64::from(block.col) * 10.0;
            let cell_y = f64::from(block.row) * 20.0;
            assert!((cell_x + 2.5..cell_x + 7.5).contains(&vertex.x), "{vertex:?} for {block:?}");
            assert!((cell_y + 5.0..cell_y + 15.0).contains(&vertex.y), "{vertex:?} for {block:?}");
        }
    }

    #[test]
    fn edges_into_the_last_walked_row_also_join_the_boss() {
        // Node order: (0,1)=1, (1,0)=2, (2,0)=3.
        let (nodes, edges) = chain(&[(0, 1), (1, 0), (2, 0)]);
        let graph = materialize(&layout_fixture(&nodes, &edges), &mut seeded_rng(3));
        assert_eq!(
            graph.edges,
            vec![
                GraphEdge { from: 1, to: 2 },
                GraphEdge { from: 2, to: 3 },
                GraphEdge { from: 3, to: BOSS_INDEX },
            ]
        );
    }

    #[test]
    fn duplicate_walk_edges_produce_duplicate_boss_connectors() {
        let (nodes, mut edges) = chain(&[(1, 1), (2, 1)]);
        edges.entry(BlockId::new(1, 1)).or_default().push(BlockId::new(2, 1));
        let graph = materialize(&layout_fixture(&nodes, &edges), &mut seeded_rng(9));
        let boss_edges = graph.edges.iter().filter(|edge| edge.to == BOSS_INDEX).count();
        assert_eq!(boss_edges, 2);
    }

    #[test]
    fn same_jitter_seed_gives_identical_bytes() {
        let (nodes, edges) = chain(&[(0, 0), (1, 1), (2, 2)]);
        let layout = layout_fixture(&nodes, &edges);
        let first = materialize(&layout, &mut seeded_rng(77));
        let second = materialize(&layout, &mut seeded_rng(77));
        assert_eq!(first.canonical_bytes(), second.canonical_bytes());
        assert_eq!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn different_jitter_seeds_move_vertices_but_keep_edges() {
        let (nodes, edges) = chain(&[(0, 0), (1, 1), (2, 2)]);
        let layout = layout_fixture(&nodes, &edges);
        let first = materialize(&layout, &mut seeded_rng(1));
        let second = materialize(&layout, &mut seeded_rng(2));
        assert_eq!(first.edges, second.edges);
        assert_eq!(first.boss(), second.boss());
        assert_ne!(first.vertices, second.vertices);
    }

    #[test]
    fn empty_graph_has_no_boss() {
        let graph = MapGraph { vertices: Vec::new(), edges: Vec::new() };
        assert_eq!(graph.boss(), None);
        assert_eq!(graph.canonical_bytes(), vec![0; 16]);
    }

    #[test]
    fn canonical_bytes_encode_indices_as_full_width_words() {
        let graph = MapGraph {
            vertices: vec![Point2 { x: 1.5, y: -2.0 }, Point2 { x: 0.0, y: 4.0 }],
            edges: vec![GraphEdge { from: 1, to: BOSS_INDEX }],
        };
        let bytes = graph.canonical_bytes();
        assert_eq!(bytes.len(), 8 + 2 * 16 + 8 + 16);
        assert_eq!(bytes[..8], 2_u64.to_le_bytes());
        assert_eq!(bytes[40..48], 1_u64.to_le_bytes());
        assert_eq!(bytes[48..56], 1_u64.to_le_bytes());
        assert_eq!(bytes[56..64], 0_u64.to_le_bytes());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn indices_above_u32_range_are_not_truncated() {
        let wide = GraphEdge { from: 1 << 32, to: BOSS_INDEX };
        let narrow = GraphEdge { from: 0, to: BOSS_INDEX };
        let graph = |edge| MapGraph { vertices: Vec::new(), edges: vec![edge] };
        assert_ne!(graph(wide).canonical_bytes(), graph(narrow).canonical_bytes());
    }
}
