//! Poro terrain core
//!
//! Deterministic snowy terrain for a voxel exploration game: seeded noise,
//! a height and biome field, chunked block storage with an edit overlay,
//! streaming around a moving viewpoint and face-culled chunk geometry.

pub mod biome;
pub mod config;
pub mod constants;
pub mod error;
pub mod noise;
pub mod renderer;
pub mod world;

pub use biome::{Biome, HeightField, WorldFeatures};
pub use config::WorldConfig;
pub use error::{TerrainError, TerrainResult};
pub use noise::SimplexNoise;
pub use renderer::{ChunkMesh, ChunkMesher, Vertex};
pub use world::{
    BatchReport, BlockEdit, BlockId, BlockPalette, Chunk, ChunkGenerator, ChunkPos, ChunkStatus, RaycastHit,
    SceneEvent, UpdateStats, VoxelPos, World,
};
