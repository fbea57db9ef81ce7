//! Terrain preview tool
//!
//! Streams the world around a viewpoint in batches and prints an ASCII
//! biome map with load statistics.
//!
//! Usage: poro-terrain [CONFIG.toml] [X Z]

use anyhow::{Context, Result};
use poro_terrain::{ChunkPos, World, WorldConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config, coords) = match args.first() {
        Some(first) if first.ends_with(".toml") => {
            let config = WorldConfig::load(first).with_context(|| format!("loading {}", first))?;
            (config, &args[1..])
        }
        _ => (WorldConfig::default(), &args[..]),
    };

    let (view_x, view_z) = match coords {
        [x, z, ..] => (
            x.parse::<f64>().with_context(|| format!("invalid x coordinate {:?}", x))?,
            z.parse::<f64>().with_context(|| format!("invalid z coordinate {:?}", z))?,
        ),
        _ => (0.0, 0.0),
    };

    let mut world = World::new(config).context("creating world")?;

    for (batch, report) in world.load_batches(view_x, view_z).enumerate() {
        log::info!(
            "[poro-terrain] Batch {}: generated {}, remeshed {}, {} remaining",
            batch + 1,
            report.generated,
            report.remeshed,
            report.remaining
        );
    }

    print_biome_map(&world, view_x, view_z);

    let stats = world.stats();
    let spawn = world.spawn_point(view_x as f32, view_z as f32);
    println!();
    println!("resident chunks: {}", stats.resident_chunks);
    println!("meshed chunks:   {}", stats.meshed_chunks);
    println!("vertices:        {}", stats.vertices);
    println!("spawn point:     ({:.1}, {:.1}, {:.1})", spawn.x, spawn.y, spawn.z);
    println!(
        "biome at view:   {} (height {:.1})",
        world.biome_at(view_x, view_z),
        world.get_terrain_height(view_x, view_z)
    );

    Ok(())
}

/// One character per chunk-sized cell across the load square
fn print_biome_map(world: &World, view_x: f64, view_z: f64) {
    let config = world.config();
    let size = config.chunk_size as f64;
    let radius = config.load_radius as i32;
    let center = ChunkPos::from_world(view_x, view_z, config.chunk_size);

    // Two samples per chunk horizontally so the map is roughly square
    for dz in -radius..=radius {
        let mut line = String::new();
        for dx in -radius..=radius {
            let (origin_x, origin_z) = center.offset(dx, dz).origin(config.chunk_size);
            for half in 0..2 {
                let x = origin_x as f64 + size * (0.25 + 0.5 * half as f64);
                let z = origin_z as f64 + size * 0.5;
                line.push(world.biome_at(x, z).map_char());
            }
        }
        println!("{}", line);
    }
}
