// Poro Terrain Chunk Generation Benchmarks
//
// Measures the per-chunk cost of the noise terrain generator, the mesher
// and a full startup load around the origin.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use poro_terrain::{
    world::generation::TerrainGenerator, BlockPalette, ChunkGenerator, ChunkMesher, ChunkPos, HeightField, World,
    WorldConfig,
};

fn bench_height_field(c: &mut Criterion) {
    let field = HeightField::new(&WorldConfig::default());
    c.bench_function("height_at_16x16_columns", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for z in 0..16 {
                for x in 0..16 {
                    total += field.height_at(black_box(x as f64), black_box(z as f64));
                }
            }
            total
        })
    });
}

fn bench_generate_chunk(c: &mut Criterion) {
    let config = WorldConfig::default();
    let generator = TerrainGenerator::new(&config);
    c.bench_function("generate_chunk", |b| {
        b.iter(|| generator.generate_chunk(black_box(ChunkPos::new(3, -2)), &config))
    });
}

fn bench_mesh_chunk(c: &mut Criterion) {
    let config = WorldConfig::default();
    let generator = TerrainGenerator::new(&config);
    let chunk = generator.generate_chunk(ChunkPos::new(0, 0), &config);
    let palette = BlockPalette::default();
    let mut rng = StdRng::seed_from_u64(7);
    c.bench_function("mesh_standalone_chunk", |b| {
        b.iter(|| ChunkMesher::build(black_box(&chunk), &chunk, &palette, &mut rng))
    });
}

fn bench_initial_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("initial_load");
    group.sample_size(10);
    for radius in [1u32, 2, 3] {
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &radius| {
            b.iter(|| {
                let config = WorldConfig {
                    load_radius: radius,
                    ..WorldConfig::default()
                };
                let mut world = World::new(config).unwrap();
                world.update(0.0, 0.0)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_height_field,
    bench_generate_chunk,
    bench_mesh_chunk,
    bench_initial_load
);
criterion_main!(benches);
