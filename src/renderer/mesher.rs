use rand::Rng;

use crate::renderer::mesh::ChunkMesh;
use crate::renderer::vertex::Face;
use crate::world::{BlockId, BlockPalette, Chunk, VoxelPos};

/// Read access to resolved world blocks for face culling.
///
/// Implementations apply edits before chunk data. Cells in chunks that
/// are not loaded read as air.
pub trait BlockAccess {
    fn block_at(&self, pos: VoxelPos) -> BlockId;
}

/// A lone chunk: everything outside it reads as air
impl BlockAccess for Chunk {
    fn block_at(&self, pos: VoxelPos) -> BlockId {
        if pos.to_chunk_pos(self.size()) != self.position() || pos.y < 0 {
            return BlockId::Air;
        }
        let (lx, lz) = pos.to_local_xz(self.size());
        self.get_block(lx, pos.y as u32, lz)
    }
}

/// Face-culled mesh builder
pub struct ChunkMesher;

impl ChunkMesher {
    /// Build geometry for every visible face of a chunk.
    ///
    /// A face is visible when the neighboring cell is air or transparent.
    /// Cells above or below the world column count as occluding, so the
    /// world floor and ceiling are never drawn. `rng` only tints colors.
    pub fn build<A, R>(chunk: &Chunk, access: &A, palette: &BlockPalette, rng: &mut R) -> ChunkMesh
    where
        A: BlockAccess + ?Sized,
        R: Rng,
    {
        let size = chunk.size();
        let height = chunk.height() as i32;
        let (origin_x, origin_z) = chunk.world_origin();
        let mut mesh = ChunkMesh::new(chunk.position(), size);

        for y in 0..chunk.height() {
            for z in 0..size {
                for x in 0..size {
                    let world = VoxelPos::new(origin_x + x as i32, y as i32, origin_z + z as i32);
                    let block = access.block_at(world);
                    if block == BlockId::Air {
                        continue;
                    }
                    let base = palette.get(block).color;

                    for face in Face::ALL {
                        let (dx, dy, dz) = face.offset();
                        let neighbor_y = world.y + dy;
                        if neighbor_y < 0 || neighbor_y >= height {
                            continue;
                        }
                        let neighbor = access.block_at(world.offset(dx, dy, dz));
                        if !palette.is_see_through(neighbor) {
                            continue;
                        }
                        mesh.add_face(face, x, y, z, || {
                            let variation: f32 = rng.gen_range(0.9..1.1);
                            [base[0] * variation, base[1] * variation, base[2] * variation]
                        });
                    }
                }
            }
        }

        mesh
    }
}
