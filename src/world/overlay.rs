//! Block-change overlay
//!
//! Sparse map of edited cells that takes precedence over generated chunk
//! data. Entries survive chunk eviction, so a chunk regenerated from the
//! seed shows the same edits when it comes back.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::world::{BlockId, ChunkPos, VoxelPos};

/// One edited cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEdit {
    pub pos: VoxelPos,
    pub block: BlockId,
}

#[derive(Debug, Default, Clone)]
pub struct BlockOverlay {
    edits: FxHashMap<VoxelPos, BlockId>,
}

impl BlockOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, pos: VoxelPos) -> Option<BlockId> {
        self.edits.get(&pos).copied()
    }

    /// Record an edit, returning the previous override if any
    pub fn set(&mut self, pos: VoxelPos, block: BlockId) -> Option<BlockId> {
        self.edits.insert(pos, block)
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VoxelPos, BlockId)> + '_ {
        self.edits.iter().map(|(pos, block)| (*pos, *block))
    }

    /// Number of edits falling inside a chunk column
    pub fn edits_in_chunk(&self, chunk: ChunkPos, chunk_size: u32) -> usize {
        self.edits
            .keys()
            .filter(|pos| pos.to_chunk_pos(chunk_size) == chunk)
            .count()
    }

    /// All edits in a stable order
    pub fn export(&self) -> Vec<BlockEdit> {
        let mut edits: Vec<BlockEdit> = self
            .iter()
            .map(|(pos, block)| BlockEdit { pos, block })
            .collect();
        edits.sort_by_key(|edit| edit.pos);
        edits
    }

    /// Apply previously exported edits; later entries win
    pub fn import(&mut self, edits: impl IntoIterator<Item = BlockEdit>) {
        for edit in edits {
            self.edits.insert(edit.pos, edit.block);
        }
    }
}
