//! Random-walk path carving from the top row down to the boss-adjacent row.

use log::trace;
use rand_chacha::ChaCha8Rng;

use crate::block::{BlockId, EdgeMap, NodeSet};
use crate::seed::{random_i32, random_u32};

pub(crate) struct WalkContext<'a> {
    pub(crate) rows: u32,
    pub(crate) cols: u32,
    pub(crate) rng: &'a mut ChaCha8Rng,
    pub(crate) nodes: &'a mut NodeSet,
    pub(crate) edges: &'a mut EdgeMap,
}

/// Runs `num_paths` independent walks, accumulating into the context's node and edge sets.
pub(crate) fn create_paths(context: &mut WalkContext<'_>, num_paths: u32) {
    for path_index in 0..num_paths {
        let start_col = carve_path(context);
        trace!("carved path {path_index} from column {start_col}");
    }
}

fn carve_path(context: &mut WalkContext<'_>) -> u32 {
    let start_col = random_u32(context.rng, 0, context.cols - 1);
    let mut current_col = start_col;
    let mut prev_block = BlockId::new(0, current_col);
    context.nodes.insert(prev_block);

    // The last row is left to the boss connectors.
    for row in 1..context.rows - 1 {
        let (left_bound, right_bound) = step_bounds(context.edges, context.cols, row, current_col);
        let delta = random_i32(context.rng, left_bound, right_bound);
        current_col = current_col.saturating_add_signed(delta);

        let block = BlockId::new(row, current_col);
        context.nodes.insert(block);
        context.edges.entry(prev_block).or_default().push(block);
        prev_block = block;
    }

    start_col
}

/// Column delta range allowed when stepping from `(row - 1, col)` into `row`.
///
/// A diagonal step is refused when it would leave the grid or cross an edge
/// that already runs from the opposite diagonal neighbour into `(row, col)`.
pub(crate) fn step_bounds(edges: &EdgeMap, cols: u32, row: u32, col: u32) -> (i32, i32) {
    let below = BlockId::new(row, col);
    let mut left_bound = -1;
    let mut right_bound = 1;

    if col == 0 || has_edge(edges, BlockId::new(row - 1, col - 1), below) {
        left_bound = 0;
    }
    if col == cols - 1 || has_edge(edges, BlockId::new(row - 1, col + 1), below) {
        right_bound = 0;
    }

    (left_bound, right_bound)
}

pub(crate) fn has_edge(edges: &EdgeMap, from: BlockId, to: BlockId) -> bool {
    edges.get(&from).is_some_and(|destinations| destinations.contains(&to))
}
