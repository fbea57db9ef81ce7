use crate::renderer::ChunkMesh;
use crate::world::{BlockId, ChunkPos};

/// A full-height column of blocks plus its built geometry
#[derive(Debug, Clone)]
pub struct Chunk {
    position: ChunkPos,
    size: u32,
    height: u32,
    blocks: Vec<BlockId>,
    mesh: Option<ChunkMesh>,
    mesh_revision: u64,
}

impl Chunk {
    pub fn new(position: ChunkPos, size: u32, height: u32) -> Self {
        let total_blocks = (size * size * height) as usize;
        Self {
            position,
            size,
            height,
            blocks: vec![BlockId::Air; total_blocks],
            mesh: None,
            mesh_revision: 0,
        }
    }

    /// Get the chunk position
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get block at local position; out of range reads as air
    pub fn get_block(&self, x: u32, y: u32, z: u32) -> BlockId {
        if x >= self.size || y >= self.height || z >= self.size {
            return BlockId::Air;
        }
        self.blocks
            .get(self.index(x, y, z))
            .copied()
            .unwrap_or(BlockId::Air)
    }

    /// Set block at local position. Only generators write base data.
    pub fn set_block(&mut self, x: u32, y: u32, z: u32, block: BlockId) {
        if x >= self.size || y >= self.height || z >= self.size {
            return;
        }
        let index = self.index(x, y, z);
        if let Some(slot) = self.blocks.get_mut(index) {
            *slot = block;
        }
    }

    /// Fill every cell with one block
    pub fn fill(&mut self, block: BlockId) {
        self.blocks.fill(block);
    }

    /// Get all blocks for iteration
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// `x + z * size + y * size * size`
    #[inline]
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        debug_assert!(
            x < self.size && y < self.height && z < self.size,
            "index called with out-of-bounds coordinates: ({}, {}, {})",
            x, y, z
        );
        (x + z * self.size + y * self.size * self.size) as usize
    }

    /// World x/z of the local origin
    pub fn world_origin(&self) -> (i32, i32) {
        self.position.origin(self.size)
    }

    pub fn non_air_count(&self) -> usize {
        self.blocks.iter().filter(|b| **b != BlockId::Air).count()
    }

    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }

    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    /// Number of times geometry has been built for this chunk
    pub fn mesh_revision(&self) -> u64 {
        self.mesh_revision
    }

    /// Install freshly built geometry, returning the old one.
    /// Empty geometry is stored as no mesh.
    pub(crate) fn replace_mesh(&mut self, mesh: ChunkMesh) -> Option<ChunkMesh> {
        self.mesh_revision += 1;
        let new_mesh = if mesh.is_empty() { None } else { Some(mesh) };
        std::mem::replace(&mut self.mesh, new_mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_layout() {
        let chunk = Chunk::new(ChunkPos::new(0, 0), 16, 64);
        assert_eq!(chunk.index(0, 0, 0), 0);
        assert_eq!(chunk.index(1, 0, 0), 1);
        assert_eq!(chunk.index(0, 0, 1), 16);
        assert_eq!(chunk.index(0, 1, 0), 256);
        assert_eq!(chunk.index(15, 63, 15), 16 * 16 * 64 - 1);
        assert_eq!(chunk.blocks().len(), 16 * 16 * 64);
    }

    #[test]
    fn test_get_set_and_bounds() {
        let mut chunk = Chunk::new(ChunkPos::new(2, -3), 8, 32);
        chunk.set_block(3, 10, 4, BlockId::Stone);
        assert_eq!(chunk.get_block(3, 10, 4), BlockId::Stone);
        assert_eq!(chunk.get_block(3, 11, 4), BlockId::Air);

        // Out of range writes are ignored and reads are air
        chunk.set_block(8, 0, 0, BlockId::Stone);
        chunk.set_block(0, 32, 0, BlockId::Stone);
        assert_eq!(chunk.get_block(8, 0, 0), BlockId::Air);
        assert_eq!(chunk.get_block(0, 32, 0), BlockId::Air);
        assert_eq!(chunk.non_air_count(), 1);
        assert_eq!(chunk.world_origin(), (16, -24));
    }

    #[test]
    fn test_empty_mesh_is_stored_as_none() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0), 4, 16);
        assert!(chunk.replace_mesh(ChunkMesh::new(ChunkPos::new(0, 0), 4)).is_none());
        assert!(!chunk.has_mesh());
        assert_eq!(chunk.mesh_revision(), 1);
    }
}
