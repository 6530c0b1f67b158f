//! Procedural layered path maps: seeded random walks over a grid that converge on a boss node.

pub mod audit;
pub mod block;
pub mod config;
pub mod error;
pub mod graph;

mod grid_map;
mod seed;
mod walk;

pub use block::{BlockId, EdgeMap, NodeSet};
pub use config::{ConfigLoadError, GridMapConfig};
pub use error::ConfigurationError;
pub use graph::{BOSS_INDEX, GraphEdge, MapGraph, Point2};
pub use grid_map::GridMap;
pub use seed::{DEFAULT_SEED, runtime_seed};

/// Builds a map from `config` and materializes it with the given jitter seed.
pub fn generate_map(
    config: &GridMapConfig,
    jitter_seed: u64,
) -> Result<MapGraph, ConfigurationError> {
    Ok(GridMap::from_config(config)?.generate_graph_with_seed(jitter_seed))
}
