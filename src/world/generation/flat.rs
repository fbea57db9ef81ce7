use crate::biome::Biome;
use crate::config::WorldConfig;
use crate::world::generation::ChunkGenerator;
use crate::world::{BlockId, Chunk, ChunkPos};

/// Flat world: `fill` up to `surface_y - 1`, `surface` at `surface_y`, air above.
///
/// Useful for tools and tests that need predictable terrain.
#[derive(Debug, Clone, Copy)]
pub struct FlatGenerator {
    pub surface_y: i32,
    pub surface: BlockId,
    pub fill: BlockId,
}

impl FlatGenerator {
    pub fn new(surface_y: i32) -> Self {
        Self {
            surface_y,
            surface: BlockId::Snow,
            fill: BlockId::Stone,
        }
    }

    /// Every cell of every chunk is `block`
    pub fn solid(block: BlockId, config: &WorldConfig) -> Self {
        Self {
            surface_y: config.chunk_height as i32 - 1,
            surface: block,
            fill: block,
        }
    }
}

impl ChunkGenerator for FlatGenerator {
    fn generate_chunk(&self, pos: ChunkPos, config: &WorldConfig) -> Chunk {
        let mut chunk = Chunk::new(pos, config.chunk_size, config.chunk_height);
        let top = self.surface_y.min(config.chunk_height as i32 - 1);
        for y in 0..=top {
            let block = if y == self.surface_y { self.surface } else { self.fill };
            for z in 0..config.chunk_size {
                for x in 0..config.chunk_size {
                    chunk.set_block(x, y as u32, z, block);
                }
            }
        }
        chunk
    }

    fn surface_height(&self, _world_x: f64, _world_z: f64) -> f64 {
        self.surface_y as f64
    }

    fn biome_at(&self, _world_x: f64, _world_z: f64) -> Biome {
        Biome::SnowFlat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_layers() {
        let config = WorldConfig::default();
        let chunk = FlatGenerator::new(4).generate_chunk(ChunkPos::new(3, -2), &config);
        assert_eq!(chunk.get_block(0, 0, 0), BlockId::Stone);
        assert_eq!(chunk.get_block(7, 3, 7), BlockId::Stone);
        assert_eq!(chunk.get_block(7, 4, 7), BlockId::Snow);
        assert_eq!(chunk.get_block(7, 5, 7), BlockId::Air);
        assert_eq!(chunk.non_air_count(), 16 * 16 * 5);
    }

    #[test]
    fn test_solid_fills_everything() {
        let config = WorldConfig::default();
        let chunk = FlatGenerator::solid(BlockId::Stone, &config).generate_chunk(ChunkPos::new(0, 0), &config);
        assert_eq!(chunk.non_air_count(), chunk.blocks().len());
    }
}
