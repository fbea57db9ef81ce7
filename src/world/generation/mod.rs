//! Chunk generation
//!
//! A generator turns a chunk coordinate into a fully decorated block column
//! array. Generation is a pure function of the world seed and configuration,
//! so an evicted chunk regenerates bit-identically.

mod decoration;
mod flat;
mod terrain;

pub use decoration::{decorate_chunk, should_place_tree};
pub use flat::FlatGenerator;
pub use terrain::TerrainGenerator;

use crate::biome::Biome;
use crate::config::WorldConfig;
use crate::constants::interaction::SPAWN_CLEARANCE;
use crate::world::{Chunk, ChunkPos};

/// Source of base chunk data
pub trait ChunkGenerator {
    /// Generate a complete chunk. Generation cannot fail.
    fn generate_chunk(&self, pos: ChunkPos, config: &WorldConfig) -> Chunk;

    /// Continuous terrain height at a world column
    fn surface_height(&self, world_x: f64, world_z: f64) -> f64;

    fn biome_at(&self, world_x: f64, world_z: f64) -> Biome;

    /// Height a player can safely be placed at above a column
    fn spawn_height(&self, world_x: f64, world_z: f64) -> f64 {
        self.surface_height(world_x, world_z).floor() + SPAWN_CLEARANCE
    }
}
