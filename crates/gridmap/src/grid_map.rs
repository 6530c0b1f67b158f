//! The built map: grid geometry plus the node and edge sets carved at construction.

use log::debug;

use crate::block::{EdgeMap, NodeSet};
use crate::config::GridMapConfig;
use crate::error::ConfigurationError;
use crate::graph::{GraphLayout, MapGraph, Point2, materialize};
use crate::seed::{DEFAULT_SEED, runtime_seed, seeded_rng};
use crate::walk::{WalkContext, create_paths};

#[derive(Clone, Debug, PartialEq)]
pub struct GridMap {
    rows: u32,
    cols: u32,
    block_width: f64,
    block_height: f64,
    seed: u32,
    num_paths: u32,
    nodes: NodeSet,
    edges: EdgeMap,
}

impl GridMap {
    /// Validates `config` and carves all of its paths.
    pub fn from_config(config: &GridMapConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        debug!(
            "building {}x{} grid map with {} paths from seed {seed}",
            config.rows, config.cols, config.num_paths
        );

        let mut rng = seeded_rng(u64::from(seed));
        let mut nodes = NodeSet::new();
        let mut edges = EdgeMap::new();
        create_paths(
            &mut WalkContext {
                rows: config.rows,
                cols: config.cols,
                rng: &mut rng,
                nodes: &mut nodes,
                edges: &mut edges,
            },
            config.num_paths,
        );

        Ok(Self {
            rows: config.rows,
            cols: config.cols,
            block_width: config.block_width(),
            block_height: config.block_height(),
            seed,
            num_paths: config.num_paths,
            nodes,
            edges,
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn block_width(&self) -> f64 {
        self.block_width
    }

    pub fn block_height(&self) -> f64 {
        self.block_height
    }

    /// The walk seed actually used, including the default when none was configured.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn num_paths(&self) -> u32 {
        self.num_paths
    }

    pub fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    pub fn edges(&self) -> &EdgeMap {
        &self.edges
    }

    pub fn boss_position(&self) -> Point2 {
        self.layout().boss_position()
    }

    /// Materializes the map with fresh jitter on every call.
    pub fn generate_graph(&self) -> MapGraph {
        self.generate_graph_with_seed(runtime_seed())
    }

    /// Materializes the map with jitter drawn from `jitter_seed`.
    pub fn generate_graph_with_seed(&self, jitter_seed: u64) -> MapGraph {
        materialize(&self.layout(), &mut seeded_rng(jitter_seed))
    }

    fn layout(&self) -> GraphLayout<'_> {
        GraphLayout {
            rows: self.rows,
            cols: self.cols,
            block_width: self.block_width,
            block_height: self.block_height,
            nodes: &self.nodes,
            edges: &self.edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockId;

    #[test]
    fn unseeded_config_uses_the_default_seed() {
        let unseeded = GridMap::from_config(&GridMapConfig::new(8, 6)).expect("valid config");
        let seeded = GridMap::from_config(&GridMapConfig::new(8, 6).with_seed(DEFAULT_SEED))
            .expect("valid config");
        assert_eq!(unseeded.seed(), DEFAULT_SEED);
        assert_eq!(unseeded, seeded);
    }

    #[test]
    fn invalid_config_is_rejected_before_walking() {
        let err = GridMap::from_config(&GridMapConfig::new(1, 6)).expect_err("one row");
        assert_eq!(err, ConfigurationError::TooFewRows { rows: 1 });
    }

    #[test]
    fn block_size_comes_from_the_config() {
        let config = GridMapConfig::new(5, 4).with_extent(400.0, 500.0).with_scale(1.5, 0.5);
        let map = GridMap::from_config(&config).expect("valid config");
        assert_eq!(map.block_width(), 150.0);
        assert_eq!(map.block_height(), 50.0);
        assert_eq!(map.boss_position(), Point2 { x: 300.0, y: 225.0 });
    }

    #[test]
    fn single_column_map_is_one_vertical_line() {
        let map = GridMap::from_config(&GridMapConfig::new(6, 1).with_paths(4).with_seed(11))
            .expect("valid config");
        let expected: NodeSet = (0..5).map(|row| BlockId::new(row, 0)).collect();
        assert_eq!(map.nodes(), &expected);
    }

    #[test]
    fn repeated_materialization_keeps_topology() {
        let map = GridMap::from_config(&GridMapConfig::new(7, 5).with_paths(3).with_seed(8))
            .expect("valid config");
        let first = map.generate_graph();
        let second = map.generate_graph();
        assert_eq!(first.edges, second.edges);
        assert_eq!(first.vertices.len(), second.vertices.len());
        assert_eq!(first.boss(), Some(map.boss_position()));
    }
}
