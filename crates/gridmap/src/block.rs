//! Grid cell identifiers and their packed 64-bit form.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// A single cell of the layered grid.
///
/// Field order matters: the derived ordering is row-major, which is the same
/// order as the packed `u64` representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BlockId {
    pub row: u32,
    pub col: u32,
}

/// Every cell visited by at least one walk.
pub type NodeSet = BTreeSet<BlockId>;

/// Directed adjacency multimap from a cell to the cells walked into next.
/// Duplicate destinations are kept.
pub type EdgeMap = BTreeMap<BlockId, Vec<BlockId>>;

impl BlockId {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Row in the high 32 bits, column in the low 32 bits.
    pub const fn packed(self) -> u64 {
        (self.row as u64) << 32 | self.col as u64
    }

    pub const fn from_packed(packed: u64) -> Self {
        Self { row: (packed >> 32) as u32, col: packed as u32 }
    }
}

impl From<BlockId> for u64 {
    fn from(block: BlockId) -> Self {
        block.packed()
    }
}

impl From<u64> for BlockId {
    fn from(packed: u64) -> Self {
        Self::from_packed(packed)
    }
}
