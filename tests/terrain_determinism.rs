// Poro Terrain Determinism Integration Tests
//
// The whole world is a pure function of the seed and configuration: heights,
// biomes and regenerated chunks must come out identical every time.

use poro_terrain::{
    world::generation::TerrainGenerator, Biome, BlockId, ChunkGenerator, ChunkPos, HeightField, World, WorldConfig,
};

fn small_world(seed: u32) -> World {
    let config = WorldConfig {
        seed,
        load_radius: 1,
        ..WorldConfig::default()
    };
    World::new(config).unwrap()
}

#[test]
fn test_fresh_generators_agree_on_origin_height() {
    let config = WorldConfig::default();
    assert_eq!(config.seed, 12345);
    assert_eq!(config.chunk_size, 16);

    let a = HeightField::new(&config);
    let b = HeightField::new(&config);
    assert_eq!(a.height_at(0.0, 0.0).to_bits(), b.height_at(0.0, 0.0).to_bits());

    let world_a = small_world(12345);
    let world_b = small_world(12345);
    assert_eq!(world_a.get_terrain_height(0.0, 0.0), world_b.get_terrain_height(0.0, 0.0));
}

#[test]
fn test_heights_and_biomes_repeat_exactly() {
    let config = WorldConfig::default();
    let field = HeightField::new(&config);

    let samples: Vec<(f64, Biome)> = (0..200)
        .map(|i| {
            let (x, z) = (i as f64 * 6.7 - 650.0, i as f64 * -4.1 + 300.0);
            (field.height_at(x, z), field.biome_at(x, z))
        })
        .collect();

    let again = HeightField::new(&config);
    for (i, (height, biome)) in samples.iter().enumerate() {
        let (x, z) = (i as f64 * 6.7 - 650.0, i as f64 * -4.1 + 300.0);
        assert_eq!(again.height_at(x, z).to_bits(), height.to_bits());
        assert_eq!(again.biome_at(x, z), *biome);
    }
}

#[test]
fn test_different_seeds_differ() {
    let a = HeightField::new(&WorldConfig { seed: 1, ..WorldConfig::default() });
    let b = HeightField::new(&WorldConfig { seed: 2, ..WorldConfig::default() });
    let differs = (0..100).any(|i| {
        let x = i as f64 * 3.3;
        a.height_at(x, -x) != b.height_at(x, -x)
    });
    assert!(differs);
}

#[test]
fn test_evicted_chunk_regenerates_identically() {
    let mut world = small_world(12345);
    let pos = ChunkPos::new(0, 0);
    world.update(8.0, 8.0);

    let original = world.chunk_manager().chunk(pos).unwrap().blocks().to_vec();

    world.update(10_000.0, 10_000.0);
    assert!(world.chunk_manager().chunk(pos).is_none());

    world.update(8.0, 8.0);
    let reloaded = world.chunk_manager().chunk(pos).unwrap().blocks();
    assert_eq!(reloaded, &original[..]);
}

#[test]
fn test_generated_columns_follow_vertical_policy() {
    let config = WorldConfig::default();
    let generator = TerrainGenerator::new(&config);

    for pos in [ChunkPos::new(0, 0), ChunkPos::new(-2, 3), ChunkPos::new(5, -5)] {
        let chunk = generator.generate_chunk(pos, &config);
        let (origin_x, origin_z) = pos.origin(config.chunk_size);
        for lz in (0..16).step_by(5) {
            for lx in (0..16).step_by(5) {
                assert_eq!(chunk.get_block(lx, 0, lz), BlockId::Stone, "world floor");

                let surface = generator
                    .height_field()
                    .surface_height((origin_x + lx as i32) as f64, (origin_z + lz as i32) as f64);
                assert!(surface >= 0 && surface < config.chunk_height as i32);
                if surface > 0 {
                    let top = chunk.get_block(lx, surface as u32, lz);
                    assert!(
                        matches!(top, BlockId::Snow | BlockId::Ice | BlockId::MossStone),
                        "unexpected surface block {:?}",
                        top
                    );
                }
            }
        }
    }
}
