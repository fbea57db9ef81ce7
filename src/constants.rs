// Poro Terrain Constants - SINGLE SOURCE OF TRUTH
//
// Default values for every tunable of the terrain core. `WorldConfig`
// starts from these and a TOML file may override any of them.

/// World layout constants
pub mod core {
    /// Horizontal chunk footprint (cells per side)
    pub const CHUNK_SIZE: u32 = 16;
    /// Vertical extent of every chunk column
    pub const CHUNK_HEIGHT: u32 = 64;
    /// Chebyshev radius (in chunks) kept loaded around the viewpoint
    pub const LOAD_RADIUS: u32 = 4;
    /// Extra chunks beyond the load radius before eviction
    pub const HYSTERESIS_MARGIN: u32 = 1;
    /// Chunks generated per startup batch before yielding
    pub const BATCH_SIZE: usize = 4;
    pub const DEFAULT_SEED: u32 = 12345;
    /// Largest accepted chunk footprint; keeps the block count within u32
    pub const MAX_CHUNK_SIZE: u32 = 256;
    pub const MAX_CHUNK_HEIGHT: u32 = 1024;
}

/// Terrain shaping constants (all in blocks)
pub mod terrain {
    pub const WATER_LEVEL: i32 = 20;
    pub const SNOW_LEVEL: i32 = 35;
    /// Terrain sits around half of the 48-block playable height
    pub const BASE_HEIGHT: f64 = 24.0;
    /// Headroom kept above the highest terrain so trees fit in the column
    pub const TREE_HEADROOM: u32 = 12;

    pub const LARGE_FREQUENCY: f64 = 0.02;
    pub const LARGE_AMPLITUDE: f64 = 15.0;
    pub const MEDIUM_FREQUENCY: f64 = 0.05;
    pub const MEDIUM_AMPLITUDE: f64 = 8.0;
    pub const SMALL_FREQUENCY: f64 = 0.1;
    pub const SMALL_AMPLITUDE: f64 = 4.0;

    /// Depth of the frozen dirt band under the surface block
    pub const SUBSURFACE_DEPTH: i32 = 4;
    pub const CAVE_FREQUENCY: f64 = 0.1;
    pub const CAVE_THRESHOLD: f64 = 0.6;

    pub const MOUNTAIN_LEVEL: f64 = 44.0;
    pub const ROCKY_LEVEL: f64 = 36.0;
    pub const SNOW_FLAT_LEVEL: f64 = 22.0;
    /// Lakes count as ice biome within this fraction of their radius
    pub const LAKE_ICE_FRACTION: f64 = 0.9;
}

/// Procedural feature descriptor constants
pub mod features {
    pub const MOUNTAIN_COUNT: u32 = 25;
    pub const HILL_COUNT: u32 = 40;
    pub const LAKE_COUNT: u32 = 8;
    /// Side length of the square region features are scattered over
    pub const FEATURE_EXTENT: f64 = 1200.0;

    pub const MOUNTAIN_RADIUS: (f64, f64) = (40.0, 100.0);
    pub const MOUNTAIN_HEIGHT: (f64, f64) = (10.0, 24.0);
    pub const HILL_RADIUS: (f64, f64) = (15.0, 40.0);
    pub const HILL_HEIGHT: (f64, f64) = (3.0, 8.0);
    pub const LAKE_RADIUS: (f64, f64) = (14.0, 36.0);
}

/// Decoration constants
pub mod decoration {
    pub const TREE_DENSITY: f64 = 0.3;
    pub const LICHEN_DENSITY: f64 = 0.02;
    pub const BERRY_DENSITY: f64 = 0.01;

    /// Widest canopy layer of a pine tree
    pub const CANOPY_MAX_RADIUS: i32 = 3;
    /// Trees are only rooted this many cells or more away from a chunk border
    pub const TREE_EDGE_MARGIN: i32 = CANOPY_MAX_RADIUS;
    pub const TRUNK_MIN_HEIGHT: i32 = 6;
    pub const TRUNK_HEIGHT_VARIANCE: u32 = 4;
    pub const SNOW_CAP_CHANCE: u32 = 30; // percent
}

/// Interaction constants
pub mod interaction {
    pub const RAY_STEP: f32 = 0.1;
    pub const REACH_DISTANCE: f32 = 6.0;
    /// Blocks above the surface a player spawns at
    pub const SPAWN_CLEARANCE: f64 = 3.0;
}
