//! Decoration pass: pine trees and ground cover
//!
//! Runs on a freshly generated chunk before it is published. Every random
//! choice is a hash of the seed and world column, so regenerating a chunk
//! reproduces the same trees.

use crate::biome::ColumnSample;
use crate::config::WorldConfig;
use crate::constants::decoration::{
    CANOPY_MAX_RADIUS, SNOW_CAP_CHANCE, TREE_EDGE_MARGIN, TRUNK_HEIGHT_VARIANCE, TRUNK_MIN_HEIGHT,
};
use crate::noise::{column_hash, column_roll, SimplexNoise};
use crate::world::{BlockId, Chunk};

const SALT_TRUNK: u32 = 1;
const SALT_SNOW_CAP: u32 = 2;
const SALT_GROUND_COVER: u32 = 3;

/// Decorate a chunk. `columns` holds one sample per column in `x + z * size` order.
pub fn decorate_chunk(chunk: &mut Chunk, columns: &[ColumnSample], noise: &SimplexNoise, config: &WorldConfig) {
    let size = chunk.size();
    let (origin_x, origin_z) = chunk.world_origin();
    let mut trees = 0;

    // Canopies never cross the chunk border
    let margin = TREE_EDGE_MARGIN as u32;
    if size > 2 * margin {
        for lz in margin..size - margin {
            for lx in margin..size - margin {
                let column = &columns[(lx + lz * size) as usize];
                let world_x = origin_x + lx as i32;
                let world_z = origin_z + lz as i32;
                if should_place_tree(noise, config, world_x, world_z, column) {
                    grow_pine(chunk, config.seed, lx, lz, column.surface_y);
                    trees += 1;
                }
            }
        }
    }

    for lz in 0..size {
        for lx in 0..size {
            let column = &columns[(lx + lz * size) as usize];
            place_ground_cover(chunk, config, lx, lz, origin_x + lx as i32, origin_z + lz as i32, column);
        }
    }

    if trees > 0 {
        log::trace!(
            "[Decoration] {} trees in chunk ({}, {})",
            trees,
            chunk.position().x,
            chunk.position().z
        );
    }
}

/// Whether a pine tree is rooted on this column
pub fn should_place_tree(
    noise: &SimplexNoise,
    config: &WorldConfig,
    world_x: i32,
    world_z: i32,
    column: &ColumnSample,
) -> bool {
    if config.tree_density <= 0.0 {
        return false;
    }
    let surface = column.surface_y;
    if surface <= config.water_level + 2 || surface > config.snow_level + 5 {
        return false;
    }
    if !column.biome.supports_vegetation() {
        return false;
    }

    let tree_noise = noise.noise2d(world_x as f64 * 0.3, world_z as f64 * 0.3);
    let density_noise = noise.noise2d(world_x as f64 * 0.05, world_z as f64 * 0.05);
    let threshold = (1.0 - config.tree_density) - density_noise * 0.2;
    tree_noise > threshold
}

fn grow_pine(chunk: &mut Chunk, seed: u32, lx: u32, lz: u32, surface: i32) {
    let height = chunk.height() as i32;
    let (origin_x, origin_z) = chunk.world_origin();
    let world_x = origin_x + lx as i32;
    let world_z = origin_z + lz as i32;
    let trunk = TRUNK_MIN_HEIGHT + (column_hash(seed, world_x, world_z, SALT_TRUNK) % TRUNK_HEIGHT_VARIANCE) as i32;

    for y in (surface + 1)..(surface + 1 + trunk).min(height) {
        chunk.set_block(lx, y as u32, lz, BlockId::PineWood);
    }

    // Conical canopy, widest at the bottom
    let leaf_start = surface + 2;
    let leaf_end = surface + trunk + 2;
    for y in leaf_start..leaf_end.min(height) {
        let progress = (y - leaf_start) as f64 / (leaf_end - leaf_start) as f64;
        let radius = (CANOPY_MAX_RADIUS as f64 * (1.0 - progress * 0.8)).floor() as i32;

        for dz in -radius..=radius {
            for dx in -radius..=radius {
                if (dx == 0 && dz == 0) || dx.abs() + dz.abs() > radius + 1 {
                    continue;
                }
                let x = lx as i32 + dx;
                let z = lz as i32 + dz;
                if x < 0 || z < 0 || x >= chunk.size() as i32 || z >= chunk.size() as i32 {
                    continue;
                }
                let (x, z) = (x as u32, z as u32);
                if chunk.get_block(x, y as u32, z) != BlockId::Air {
                    continue;
                }
                let capped = y == leaf_end - 1
                    && column_hash(seed, world_x + dx, world_z + dz, SALT_SNOW_CAP.wrapping_add(y as u32)) % 100
                        < SNOW_CAP_CHANCE;
                let block = if capped { BlockId::Snow } else { BlockId::PineLeaves };
                chunk.set_block(x, y as u32, z, block);
            }
        }
    }

    let tip = leaf_end.min(height - 1);
    chunk.set_block(lx, tip as u32, lz, BlockId::PineLeaves);
}

fn place_ground_cover(
    chunk: &mut Chunk,
    config: &WorldConfig,
    lx: u32,
    lz: u32,
    world_x: i32,
    world_z: i32,
    column: &ColumnSample,
) {
    if !column.biome.supports_vegetation() {
        return;
    }
    let surface = column.surface_y;
    if surface < 1 || surface + 1 >= chunk.height() as i32 {
        return;
    }
    let above = (surface + 1) as u32;
    if chunk.get_block(lx, above, lz) != BlockId::Air {
        return;
    }

    let ground = chunk.get_block(lx, surface as u32, lz);
    let roll = column_roll(config.seed, world_x, world_z, SALT_GROUND_COVER);
    if roll < config.lichen_density {
        if ground == BlockId::Snow {
            chunk.set_block(lx, above, lz, BlockId::ReindeerLichen);
        }
    } else if roll < config.lichen_density + config.berry_density
        && matches!(ground, BlockId::Snow | BlockId::MossStone)
    {
        chunk.set_block(lx, above, lz, BlockId::BerryBush);
    }
}
