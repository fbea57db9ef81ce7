//! Chunk lifecycle management
//!
//! Keeps the square of chunks around the viewpoint resident, generates
//! missing chunks in batches, evicts far chunks with a hysteresis margin and
//! rebuilds geometry when edits land on a chunk or its borders.

use std::collections::{BTreeSet, VecDeque};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::WorldConfig;
use crate::error::{TerrainError, TerrainResult};
use crate::renderer::{BlockAccess, ChunkMesh, ChunkMesher};
use crate::world::generation::ChunkGenerator;
use crate::world::{BlockEdit, BlockId, BlockOverlay, BlockPalette, Chunk, ChunkPos, VoxelPos};

/// Chunk loading request with priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLoadRequest {
    pub position: ChunkPos,
    /// Lower value = higher priority (distance squared)
    pub priority: i32,
}

/// Notification for the renderer about chunk geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneEvent {
    /// The chunk has new geometry to show
    Attach(ChunkPos),
    /// The chunk's previous geometry must be released
    Detach(ChunkPos),
}

/// Lifecycle state of a chunk coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStatus {
    Absent,
    Queued,
    Resident { has_mesh: bool },
}

/// Work done by one generation batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub generated: usize,
    /// Already-resident neighbors rebuilt to close seams
    pub remeshed: usize,
    /// Requests still waiting in the queue
    pub remaining: usize,
}

/// Work done by one `update`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    pub generated: usize,
    pub evicted: usize,
    pub remeshed: usize,
}

impl UpdateStats {
    pub fn is_idle(&self) -> bool {
        self.generated == 0 && self.evicted == 0 && self.remeshed == 0
    }
}

/// Statistics about chunk loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkLoadingStats {
    pub resident_chunks: usize,
    pub meshed_chunks: usize,
    pub queued_chunks: usize,
    pub edits: usize,
    pub vertices: usize,
}

/// Resolved view of the world: edits first, then resident chunk data
struct ResolvedBlocks<'a> {
    chunks: &'a FxHashMap<ChunkPos, Chunk>,
    overlay: &'a BlockOverlay,
    chunk_size: u32,
    chunk_height: u32,
}

impl BlockAccess for ResolvedBlocks<'_> {
    fn block_at(&self, pos: VoxelPos) -> BlockId {
        if let Some(block) = self.overlay.get(pos) {
            return block;
        }
        if pos.y < 0 || pos.y >= self.chunk_height as i32 {
            return BlockId::Air;
        }
        match self.chunks.get(&pos.to_chunk_pos(self.chunk_size)) {
            Some(chunk) => {
                let (lx, lz) = pos.to_local_xz(self.chunk_size);
                chunk.get_block(lx, pos.y as u32, lz)
            }
            None => BlockId::Air,
        }
    }
}

/// Owns the resident chunks and the edit overlay
pub struct ChunkManager {
    config: WorldConfig,
    generator: Box<dyn ChunkGenerator>,
    palette: BlockPalette,
    chunks: FxHashMap<ChunkPos, Chunk>,
    overlay: BlockOverlay,
    load_queue: VecDeque<ChunkLoadRequest>,
    queued: FxHashSet<ChunkPos>,
    /// Chunk containing the last requested viewpoint
    center: Option<ChunkPos>,
    scene_events: Vec<SceneEvent>,
}

impl std::fmt::Debug for ChunkManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkManager")
            .field("generator", &"<ChunkGenerator>")
            .field("resident_chunks", &self.chunks.len())
            .field("queued_chunks", &self.load_queue.len())
            .field("edits", &self.overlay.len())
            .field("center", &self.center)
            .finish()
    }
}

impl ChunkManager {
    pub fn new(config: WorldConfig, generator: Box<dyn ChunkGenerator>, palette: BlockPalette) -> Self {
        Self {
            config,
            generator,
            palette,
            chunks: FxHashMap::default(),
            overlay: BlockOverlay::new(),
            load_queue: VecDeque::new(),
            queued: FxHashSet::default(),
            center: None,
            scene_events: Vec::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn palette(&self) -> &BlockPalette {
        &self.palette
    }

    pub fn generator(&self) -> &dyn ChunkGenerator {
        self.generator.as_ref()
    }

    pub fn overlay(&self) -> &BlockOverlay {
        &self.overlay
    }

    fn view_chunk(&self, view_x: f64, view_z: f64) -> ChunkPos {
        ChunkPos::from_world(view_x, view_z, self.config.chunk_size)
    }

    fn in_load_square(&self, pos: ChunkPos) -> bool {
        match self.center {
            Some(center) => pos.chebyshev_distance(center) <= self.config.load_radius,
            None => true,
        }
    }

    /// Queue every missing chunk in the load square around a viewpoint,
    /// nearest first. Returns the number of newly queued chunks.
    pub fn request_chunks(&mut self, view_x: f64, view_z: f64) -> usize {
        let center = self.view_chunk(view_x, view_z);
        self.center = Some(center);
        let radius = self.config.load_radius as i32;

        // Requests that left the square are dropped
        let mut requests: Vec<ChunkLoadRequest> = self
            .load_queue
            .drain(..)
            .filter(|request| request.position.chebyshev_distance(center) <= radius as u32)
            .collect();
        self.queued = requests.iter().map(|request| request.position).collect();

        let mut added = 0;
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                let pos = center.offset(dx, dz);
                if self.chunks.contains_key(&pos) || self.queued.contains(&pos) {
                    continue;
                }
                self.queued.insert(pos);
                requests.push(ChunkLoadRequest { position: pos, priority: 0 });
                added += 1;
            }
        }

        for request in &mut requests {
            request.priority = request.position.distance_squared_to(center);
        }
        requests.sort_by_key(|request| (request.priority, request.position));
        self.load_queue = requests.into();

        if added > 0 {
            log::debug!(
                "[ChunkManager] Queued {} chunks around ({}, {}), {} pending",
                added,
                center.x,
                center.z,
                self.load_queue.len()
            );
        }
        added
    }

    /// Generate up to `max` queued chunks, then build their geometry and
    /// rebuild resident neighbors whose borders they touch.
    pub fn process_batch(&mut self, max: usize) -> BatchReport {
        let mut published = Vec::new();

        while published.len() < max {
            let Some(request) = self.load_queue.pop_front() else {
                break;
            };
            let pos = request.position;
            self.queued.remove(&pos);
            if self.chunks.contains_key(&pos) || !self.in_load_square(pos) {
                continue;
            }

            let chunk = self.generator.generate_chunk(pos, &self.config);
            self.chunks.insert(pos, chunk);
            published.push(pos);
        }

        // Every chunk of the batch is published before any is meshed
        for pos in &published {
            self.rebuild_mesh(*pos);
        }

        let new_chunks: FxHashSet<ChunkPos> = published.iter().copied().collect();
        let neighbors: BTreeSet<ChunkPos> = published
            .iter()
            .flat_map(|pos| pos.edge_neighbors())
            .filter(|pos| !new_chunks.contains(pos) && self.chunks.contains_key(pos))
            .collect();
        for pos in &neighbors {
            self.rebuild_mesh(*pos);
        }

        let report = BatchReport {
            generated: published.len(),
            remeshed: neighbors.len(),
            remaining: self.load_queue.len(),
        };
        if report.generated > 0 {
            log::debug!(
                "[ChunkManager] Batch generated {} chunks, remeshed {}, {} remaining",
                report.generated,
                report.remeshed,
                report.remaining
            );
        }
        report
    }

    /// Request the load square and generate everything in it
    pub fn ensure_loaded(&mut self, view_x: f64, view_z: f64) -> BatchReport {
        self.request_chunks(view_x, view_z);
        let batch_size = self.config.batch_size.max(1);

        let mut total = BatchReport::default();
        while !self.load_queue.is_empty() {
            let report = self.process_batch(batch_size);
            total.generated += report.generated;
            total.remeshed += report.remeshed;
        }

        if total.generated > 0 {
            log::info!(
                "[ChunkManager] Loaded {} chunks ({} resident)",
                total.generated,
                self.chunks.len()
            );
        }
        total
    }

    /// Request the load square and hand back an iterator that generates
    /// one batch per `next()`. Dropping it leaves the rest queued.
    pub fn load_batches(&mut self, view_x: f64, view_z: f64, batch_size: usize) -> LoadBatches<'_> {
        self.request_chunks(view_x, view_z);
        LoadBatches {
            manager: self,
            batch_size: batch_size.max(1),
        }
    }

    /// Drop chunks beyond the load radius plus the hysteresis margin.
    /// Edits are kept. Returns the number of evicted chunks.
    pub fn evict_far_chunks(&mut self, view_x: f64, view_z: f64) -> usize {
        let center = self.view_chunk(view_x, view_z);
        let limit = self.config.load_radius + self.config.hysteresis_margin;

        let far: Vec<ChunkPos> = self
            .chunks
            .keys()
            .filter(|pos| pos.chebyshev_distance(center) > limit)
            .copied()
            .collect();

        for pos in &far {
            if let Some(chunk) = self.chunks.remove(pos) {
                if chunk.has_mesh() {
                    self.scene_events.push(SceneEvent::Detach(*pos));
                }
                log::debug!("[ChunkManager] Evicted chunk ({}, {})", pos.x, pos.z);
            }
        }

        let radius = self.config.load_radius;
        let queued = &mut self.queued;
        self.load_queue.retain(|request| {
            let keep = request.position.chebyshev_distance(center) <= radius;
            if !keep {
                queued.remove(&request.position);
            }
            keep
        });

        if !far.is_empty() {
            log::info!(
                "[ChunkManager] Evicted {} chunks ({} resident)",
                far.len(),
                self.chunks.len()
            );
        }
        far.len()
    }

    /// Evict far chunks, then load the full square around the viewpoint
    pub fn update(&mut self, view_x: f64, view_z: f64) -> UpdateStats {
        let evicted = self.evict_far_chunks(view_x, view_z);
        let report = self.ensure_loaded(view_x, view_z);
        UpdateStats {
            generated: report.generated,
            evicted,
            remeshed: report.remeshed,
        }
    }

    fn resolved(&self) -> ResolvedBlocks<'_> {
        ResolvedBlocks {
            chunks: &self.chunks,
            overlay: &self.overlay,
            chunk_size: self.config.chunk_size,
            chunk_height: self.config.chunk_height,
        }
    }

    /// Block at a world position: edits first, then chunk data.
    /// Absent chunks and rows outside the column read as air.
    pub fn get_block(&self, pos: VoxelPos) -> BlockId {
        self.resolved().block_at(pos)
    }

    /// Record an edit and rebuild the owning chunk plus any neighbor whose
    /// shared border the cell lies on. Returns the number of rebuilt chunks.
    pub fn set_block(&mut self, pos: VoxelPos, block: BlockId) -> TerrainResult<usize> {
        let height = self.config.chunk_height;
        if pos.y < 0 || pos.y >= height as i32 {
            log::warn!(
                "[ChunkManager] Rejected edit at ({}, {}, {}): outside world column",
                pos.x,
                pos.y,
                pos.z
            );
            return Err(TerrainError::VerticalOutOfRange { y: pos.y, height });
        }

        self.overlay.set(pos, block);

        let mut rebuilt = 0;
        for chunk_pos in self.chunks_touching(pos) {
            if self.rebuild_mesh(chunk_pos) {
                rebuilt += 1;
            }
        }
        log::debug!(
            "[ChunkManager] Set ({}, {}, {}) to {}, rebuilt {} chunks",
            pos.x,
            pos.y,
            pos.z,
            block.name(),
            rebuilt
        );
        Ok(rebuilt)
    }

    /// The owning chunk followed by the X/Z neighbors sharing the cell's border
    fn chunks_touching(&self, pos: VoxelPos) -> Vec<ChunkPos> {
        let size = self.config.chunk_size;
        let owner = pos.to_chunk_pos(size);
        let (lx, lz) = pos.to_local_xz(size);

        let mut touching = vec![owner];
        if lx == 0 {
            touching.push(owner.offset(-1, 0));
        }
        if lx == size - 1 {
            touching.push(owner.offset(1, 0));
        }
        if lz == 0 {
            touching.push(owner.offset(0, -1));
        }
        if lz == size - 1 {
            touching.push(owner.offset(0, 1));
        }
        touching
    }

    /// Rebuild geometry of a resident chunk. Returns false when absent.
    pub fn rebuild_mesh(&mut self, pos: ChunkPos) -> bool {
        let mesh = match self.chunks.get(&pos) {
            Some(chunk) => ChunkMesher::build(chunk, &self.resolved(), &self.palette, &mut rand::thread_rng()),
            None => return false,
        };

        let Some(chunk) = self.chunks.get_mut(&pos) else {
            return false;
        };
        if chunk.replace_mesh(mesh).is_some() {
            self.scene_events.push(SceneEvent::Detach(pos));
        }
        if chunk.has_mesh() {
            self.scene_events.push(SceneEvent::Attach(pos));
        }
        true
    }

    /// Apply exported edits and rebuild affected resident chunks
    pub fn import_edits(&mut self, edits: Vec<BlockEdit>) -> TerrainResult<usize> {
        let height = self.config.chunk_height;
        if let Some(edit) = edits.iter().find(|edit| edit.pos.y < 0 || edit.pos.y >= height as i32) {
            return Err(TerrainError::VerticalOutOfRange { y: edit.pos.y, height });
        }

        let affected: BTreeSet<ChunkPos> = edits
            .iter()
            .flat_map(|edit| self.chunks_touching(edit.pos))
            .collect();
        let count = edits.len();
        self.overlay.import(edits);

        for pos in affected {
            self.rebuild_mesh(pos);
        }
        log::info!("[ChunkManager] Imported {} edits", count);
        Ok(count)
    }

    pub fn export_edits(&self) -> Vec<BlockEdit> {
        self.overlay.export()
    }

    pub fn chunk_status(&self, pos: ChunkPos) -> ChunkStatus {
        if let Some(chunk) = self.chunks.get(&pos) {
            ChunkStatus::Resident { has_mesh: chunk.has_mesh() }
        } else if self.queued.contains(&pos) {
            ChunkStatus::Queued
        } else {
            ChunkStatus::Absent
        }
    }

    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    pub fn chunk_mesh(&self, pos: ChunkPos) -> Option<&ChunkMesh> {
        self.chunks.get(&pos).and_then(|chunk| chunk.mesh())
    }

    pub fn resident_chunks(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.chunks.keys().copied()
    }

    pub fn resident_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn queued_count(&self) -> usize {
        self.load_queue.len()
    }

    /// Drain pending renderer notifications in emission order
    pub fn take_scene_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.scene_events)
    }

    pub fn stats(&self) -> ChunkLoadingStats {
        let meshes = self.chunks.values().filter_map(|chunk| chunk.mesh());
        let (meshed_chunks, vertices) = meshes.fold((0, 0), |(count, vertices), mesh| {
            (count + 1, vertices + mesh.vertex_count())
        });
        ChunkLoadingStats {
            resident_chunks: self.chunks.len(),
            meshed_chunks,
            queued_chunks: self.load_queue.len(),
            edits: self.overlay.len(),
            vertices,
        }
    }
}

/// Cooperative loading: each `next()` generates one batch
pub struct LoadBatches<'a> {
    manager: &'a mut ChunkManager,
    batch_size: usize,
}

impl LoadBatches<'_> {
    pub fn remaining(&self) -> usize {
        self.manager.queued_count()
    }
}

impl Iterator for LoadBatches<'_> {
    type Item = BatchReport;

    fn next(&mut self) -> Option<BatchReport> {
        if self.manager.load_queue.is_empty() {
            return None;
        }
        Some(self.manager.process_batch(self.batch_size))
    }
}
