use crate::biome::{Biome, ColumnSample, HeightField};
use crate::config::WorldConfig;
use crate::constants::terrain::{CAVE_FREQUENCY, SUBSURFACE_DEPTH};
use crate::world::generation::{decorate_chunk, ChunkGenerator};
use crate::world::{BlockId, Chunk, ChunkPos};

/// Noise terrain with caves, frozen lakes, pine trees and ground cover
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    field: HeightField,
}

impl TerrainGenerator {
    pub fn new(config: &WorldConfig) -> Self {
        let field = HeightField::new(config);
        log::info!(
            "[TerrainGenerator] Seed {} with {} world features",
            config.seed,
            field.features().total()
        );
        Self { field }
    }

    pub fn with_field(field: HeightField) -> Self {
        Self { field }
    }

    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    /// Base block for one cell of a column, before decoration
    pub fn base_block(&self, config: &WorldConfig, world_x: i32, y: i32, world_z: i32, column: &ColumnSample) -> BlockId {
        let surface = column.surface_y;

        if y == 0 {
            return BlockId::Stone;
        }

        if y > surface {
            return if y <= config.water_level {
                BlockId::FrozenWater
            } else {
                BlockId::Air
            };
        }

        if y == surface {
            return if surface > config.snow_level {
                BlockId::Snow
            } else if surface <= config.water_level + 1 {
                BlockId::Ice
            } else {
                column.biome.surface_block()
            };
        }

        if y > surface - SUBSURFACE_DEPTH {
            return BlockId::FrozenDirt;
        }

        let cave = self.field.noise().approx_noise3d(
            world_x as f64 * CAVE_FREQUENCY,
            y as f64 * CAVE_FREQUENCY,
            world_z as f64 * CAVE_FREQUENCY,
        );
        if cave > config.cave_threshold {
            BlockId::Air
        } else {
            BlockId::Stone
        }
    }
}

impl ChunkGenerator for TerrainGenerator {
    fn generate_chunk(&self, pos: ChunkPos, config: &WorldConfig) -> Chunk {
        let size = config.chunk_size;
        let mut chunk = Chunk::new(pos, size, config.chunk_height);
        let (origin_x, origin_z) = pos.origin(size);

        // Column samples in `x + z * size` order
        let mut columns = Vec::with_capacity((size * size) as usize);
        for lz in 0..size {
            for lx in 0..size {
                let world_x = origin_x + lx as i32;
                let world_z = origin_z + lz as i32;
                columns.push(self.field.sample_column(world_x as f64, world_z as f64));
            }
        }

        for lz in 0..size {
            for lx in 0..size {
                let column = &columns[(lx + lz * size) as usize];
                let world_x = origin_x + lx as i32;
                let world_z = origin_z + lz as i32;
                for y in 0..config.chunk_height {
                    let block = self.base_block(config, world_x, y as i32, world_z, column);
                    if block != BlockId::Air {
                        chunk.set_block(lx, y, lz, block);
                    }
                }
            }
        }

        decorate_chunk(&mut chunk, &columns, self.field.noise(), config);

        log::debug!("[TerrainGenerator] Generated chunk ({}, {})", pos.x, pos.z);
        chunk
    }

    fn surface_height(&self, world_x: f64, world_z: f64) -> f64 {
        self.field.height_at(world_x, world_z)
    }

    fn biome_at(&self, world_x: f64, world_z: f64) -> Biome {
        self.field.biome_at(world_x, world_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::WorldFeatures;

    fn column(surface_y: i32, biome: Biome) -> ColumnSample {
        ColumnSample { height: surface_y as f64 + 0.5, surface_y, biome }
    }

    #[test]
    fn test_vertical_policy() {
        let config = WorldConfig::default();
        let generator = TerrainGenerator::new(&config);

        // Forest column above the snow line
        let high = column(40, Biome::Forest);
        assert_eq!(generator.base_block(&config, 0, 0, 0, &high), BlockId::Stone);
        assert_eq!(generator.base_block(&config, 0, 41, 0, &high), BlockId::Air);
        assert_eq!(generator.base_block(&config, 0, 40, 0, &high), BlockId::Snow);
        assert_eq!(generator.base_block(&config, 0, 37, 0, &high), BlockId::FrozenDirt);

        // Rocky column below the snow line keeps its biome surface
        let rocky = column(30, Biome::Rocky);
        assert_eq!(generator.base_block(&config, 0, 30, 0, &rocky), BlockId::MossStone);

        // Shoreline freezes
        let shore = column(21, Biome::Forest);
        assert_eq!(generator.base_block(&config, 0, 21, 0, &shore), BlockId::Ice);

        // Lake bed is covered by frozen water up to the water line
        let lake = column(16, Biome::Ice);
        assert_eq!(generator.base_block(&config, 0, 16, 0, &lake), BlockId::Ice);
        assert_eq!(generator.base_block(&config, 0, 20, 0, &lake), BlockId::FrozenWater);
        assert_eq!(generator.base_block(&config, 0, 21, 0, &lake), BlockId::Air);
    }

    #[test]
    fn test_caves_follow_threshold() {
        let mut config = WorldConfig::default();
        let generator = TerrainGenerator::new(&config);
        let deep = column(40, Biome::Forest);

        // Samples are clamped to [-1, 1], so no caves at this threshold
        config.cave_threshold = 1.5;
        for x in 0..40 {
            assert_eq!(generator.base_block(&config, x, 10, x * 3, &deep), BlockId::Stone);
        }

        // Noise never drops below -1.0, so everything is carved here
        config.cave_threshold = -1.5;
        assert_eq!(generator.base_block(&config, 3, 10, 7, &deep), BlockId::Air);
        assert_eq!(generator.base_block(&config, 3, 0, 7, &deep), BlockId::Stone);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = WorldConfig::default();
        let a = TerrainGenerator::new(&config);
        let b = TerrainGenerator::new(&config);
        for pos in [ChunkPos::new(0, 0), ChunkPos::new(-3, 5)] {
            assert_eq!(a.generate_chunk(pos, &config).blocks(), b.generate_chunk(pos, &config).blocks());
        }
    }

    #[test]
    fn test_chunk_matches_height_field() {
        let mut config = WorldConfig::default();
        config.tree_density = 0.0;
        config.lichen_density = 0.0;
        config.berry_density = 0.0;
        let field = HeightField::with_features(&config, WorldFeatures::empty());
        let generator = TerrainGenerator::with_field(field);
        let chunk = generator.generate_chunk(ChunkPos::new(1, 1), &config);

        for (lx, lz) in [(0u32, 0u32), (5, 9), (15, 15)] {
            let surface = generator.height_field().surface_height(16.0 + lx as f64, 16.0 + lz as f64);
            let top = chunk.get_block(lx, surface as u32, lz);
            assert_ne!(top, BlockId::Air);
            let above = chunk.get_block(lx, surface as u32 + 1, lz);
            assert!(matches!(above, BlockId::Air | BlockId::FrozenWater));
        }
    }
}
