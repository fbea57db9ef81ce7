use cgmath::Point3;
use serde::{Deserialize, Serialize};

/// Position of a chunk column in the world (chunk coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing a continuous world position
    pub fn from_world(world_x: f64, world_z: f64, chunk_size: u32) -> Self {
        let size = chunk_size as f64;
        Self::new((world_x / size).floor() as i32, (world_z / size).floor() as i32)
    }

    /// World coordinates of the chunk's minimum corner
    pub fn origin(&self, chunk_size: u32) -> (i32, i32) {
        (self.x * chunk_size as i32, self.z * chunk_size as i32)
    }

    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// max(|dx|, |dz|)
    pub fn chebyshev_distance(&self, other: ChunkPos) -> u32 {
        (self.x - other.x).unsigned_abs().max((self.z - other.z).unsigned_abs())
    }

    pub fn distance_squared_to(&self, other: ChunkPos) -> i32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }

    /// The four chunks sharing an edge with this one
    pub fn edge_neighbors(&self) -> [ChunkPos; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }
}

/// Position of a block in the world (world coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Get the chunk column this block belongs to
    pub fn to_chunk_pos(&self, chunk_size: u32) -> ChunkPos {
        let size = chunk_size as i32;
        ChunkPos::new(self.x.div_euclid(size), self.z.div_euclid(size))
    }

    /// Horizontal position within the owning chunk
    pub fn to_local_xz(&self, chunk_size: u32) -> (u32, u32) {
        let size = chunk_size as i32;
        (self.x.rem_euclid(size) as u32, self.z.rem_euclid(size) as u32)
    }

    /// Block containing a continuous world point
    pub fn from_world_point(point: Point3<f32>) -> Self {
        Self::new(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        )
    }

    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}
