//! World data and lifecycle
//!
//! - **Data**: block types, positions, chunk columns and the edit overlay
//! - **Generation**: seeded terrain and decoration per chunk
//! - **Management**: loading, eviction and geometry rebuilds around a viewpoint
//! - **Interface**: the `World` facade consumed by the game

pub mod block;
pub mod chunk;
pub mod chunk_manager;
pub mod generation;
pub mod overlay;
pub mod position;
pub mod ray;
#[allow(clippy::module_inception)]
pub mod world;

pub use block::{BlockId, BlockPalette, BlockProperties};
pub use chunk::Chunk;
pub use chunk_manager::{
    BatchReport, ChunkLoadRequest, ChunkLoadingStats, ChunkManager, ChunkStatus, LoadBatches, SceneEvent,
    UpdateStats,
};
pub use generation::{ChunkGenerator, FlatGenerator, TerrainGenerator};
pub use overlay::{BlockEdit, BlockOverlay};
pub use position::{ChunkPos, VoxelPos};
pub use ray::{cast_ray, Ray, RaycastHit};
pub use world::World;
