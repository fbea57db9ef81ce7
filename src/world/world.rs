use cgmath::{Point3, Vector3};

use crate::biome::Biome;
use crate::config::WorldConfig;
use crate::error::TerrainResult;
use crate::renderer::ChunkMesh;
use crate::world::generation::{ChunkGenerator, TerrainGenerator};
use crate::world::ray::{cast_ray, Ray, RaycastHit};
use crate::world::{
    BlockEdit, BlockId, BlockPalette, ChunkLoadingStats, ChunkManager, ChunkPos, ChunkStatus, LoadBatches,
    SceneEvent, UpdateStats, VoxelPos,
};

/// One terrain world: configuration, generator, resident chunks and edits
#[derive(Debug)]
pub struct World {
    chunk_manager: ChunkManager,
}

impl World {
    /// World with the default noise terrain generator
    pub fn new(config: WorldConfig) -> TerrainResult<Self> {
        let generator = TerrainGenerator::new(&config);
        Self::with_generator(config, Box::new(generator))
    }

    /// World backed by a custom generator
    pub fn with_generator(config: WorldConfig, generator: Box<dyn ChunkGenerator>) -> TerrainResult<Self> {
        config.validate()?;
        let palette = BlockPalette::with_overrides(&config.palette)?;
        log::info!(
            "[World] Created world: seed {}, chunks {}x{}x{}, load radius {}",
            config.seed,
            config.chunk_size,
            config.chunk_height,
            config.chunk_size,
            config.load_radius
        );
        Ok(Self {
            chunk_manager: ChunkManager::new(config, generator, palette),
        })
    }

    pub fn config(&self) -> &WorldConfig {
        self.chunk_manager.config()
    }

    pub fn palette(&self) -> &BlockPalette {
        self.chunk_manager.palette()
    }

    pub fn chunk_manager(&self) -> &ChunkManager {
        &self.chunk_manager
    }

    pub fn get_block_at(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.chunk_manager.get_block(VoxelPos::new(x, y, z))
    }

    /// Edit a block and rebuild the affected chunk geometry
    pub fn set_block_at(&mut self, x: i32, y: i32, z: i32, block: BlockId) -> TerrainResult<()> {
        self.chunk_manager.set_block(VoxelPos::new(x, y, z), block)?;
        Ok(())
    }

    /// Continuous terrain height; independent of what is loaded
    pub fn get_terrain_height(&self, x: f64, z: f64) -> f64 {
        self.chunk_manager.generator().surface_height(x, z)
    }

    pub fn biome_at(&self, x: f64, z: f64) -> Biome {
        self.chunk_manager.generator().biome_at(x, z)
    }

    pub fn is_solid_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.palette().is_solid(self.get_block_at(x, y, z))
    }

    /// Evict far chunks and load everything around the viewpoint
    pub fn update(&mut self, view_x: f64, view_z: f64) -> UpdateStats {
        self.chunk_manager.update(view_x, view_z)
    }

    /// Evict far chunks, then load around the viewpoint one batch per `next()`
    pub fn load_batches(&mut self, view_x: f64, view_z: f64) -> LoadBatches<'_> {
        self.chunk_manager.evict_far_chunks(view_x, view_z);
        let batch_size = self.chunk_manager.config().batch_size;
        self.chunk_manager.load_batches(view_x, view_z, batch_size)
    }

    pub fn take_scene_events(&mut self) -> Vec<SceneEvent> {
        self.chunk_manager.take_scene_events()
    }

    pub fn chunk_mesh(&self, pos: ChunkPos) -> Option<&ChunkMesh> {
        self.chunk_manager.chunk_mesh(pos)
    }

    pub fn chunk_status(&self, pos: ChunkPos) -> ChunkStatus {
        self.chunk_manager.chunk_status(pos)
    }

    pub fn raycast(&self, origin: Point3<f32>, direction: Vector3<f32>, max_distance: f32) -> Option<RaycastHit> {
        let ray = Ray::new(origin, direction);
        cast_ray(&ray, max_distance, self.palette(), |pos| self.chunk_manager.get_block(pos))
    }

    /// Replace the targeted block with air. Returns the broken cell.
    pub fn break_block(&mut self, origin: Point3<f32>, direction: Vector3<f32>, max_distance: f32) -> TerrainResult<Option<VoxelPos>> {
        let Some(hit) = self.raycast(origin, direction, max_distance) else {
            return Ok(None);
        };
        self.chunk_manager.set_block(hit.position, BlockId::Air)?;
        Ok(Some(hit.position))
    }

    /// Put a block in the empty cell in front of the targeted block.
    ///
    /// Refuses to fill either cell of the two-block player column standing
    /// at `player_feet`.
    pub fn place_block(
        &mut self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
        block: BlockId,
        player_feet: Point3<f32>,
    ) -> TerrainResult<Option<VoxelPos>> {
        let Some(target) = self
            .raycast(origin, direction, max_distance)
            .and_then(|hit| hit.previous)
        else {
            return Ok(None);
        };

        let feet = VoxelPos::from_world_point(player_feet);
        if target.x == feet.x && target.z == feet.z && (target.y == feet.y || target.y == feet.y + 1) {
            log::debug!("[World] Refused to place {} inside the player", block.name());
            return Ok(None);
        }

        self.chunk_manager.set_block(target, block)?;
        Ok(Some(target))
    }

    /// Feet position for a player spawning above a column
    pub fn spawn_point(&self, x: f32, z: f32) -> Point3<f32> {
        let y = self.chunk_manager.generator().spawn_height(x as f64, z as f64);
        Point3::new(x, y as f32, z)
    }

    pub fn export_edits(&self) -> Vec<BlockEdit> {
        self.chunk_manager.export_edits()
    }

    pub fn import_edits(&mut self, edits: Vec<BlockEdit>) -> TerrainResult<usize> {
        self.chunk_manager.import_edits(edits)
    }

    /// Edits as a JSON array, in the same order as `export_edits`
    pub fn export_edits_json(&self) -> TerrainResult<String> {
        Ok(serde_json::to_string(&self.export_edits())?)
    }

    /// Apply edits from a JSON array produced by `export_edits_json`
    pub fn import_edits_json(&mut self, json: &str) -> TerrainResult<usize> {
        let edits: Vec<BlockEdit> = serde_json::from_str(json)?;
        self.import_edits(edits)
    }

    pub fn stats(&self) -> ChunkLoadingStats {
        self.chunk_manager.stats()
    }
}
