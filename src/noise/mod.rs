//! Deterministic noise generation
//!
//! Seeded gradient noise used by the height field, the cave carver and the
//! decoration pass. Everything here is a pure function of the seed.

mod simplex;

pub use simplex::SimplexNoise;

/// Hash a world column into a well-mixed 32-bit value.
///
/// Used wherever generation needs a "random" roll that must come out the
/// same every time the column is regenerated.
pub fn column_hash(seed: u32, x: i32, z: i32, salt: u32) -> u32 {
    let mut h = (x as u32).wrapping_mul(73_856_093)
        ^ (z as u32).wrapping_mul(19_349_663)
        ^ seed.wrapping_mul(83_492_791)
        ^ salt.wrapping_mul(2_654_435_761);
    // Finalizer from murmur3
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Map a column hash to a uniform value in [0, 1).
pub fn column_roll(seed: u32, x: i32, z: i32, salt: u32) -> f64 {
    column_hash(seed, x, z, salt) as f64 / (u32::MAX as f64 + 1.0)
}
