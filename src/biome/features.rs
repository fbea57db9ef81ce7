//! Large-scale world features
//!
//! Mountains, hills and lakes are scattered once per world from a seeded
//! RNG and then read by the height field for every column.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::FeatureParams;

/// A circular feature centered on a world position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    pub center_x: f64,
    pub center_z: f64,
    pub radius: f64,
    /// Peak height for mountains and hills; unused for lakes
    pub magnitude: f64,
}

impl FeatureDescriptor {
    /// `1 - dist / radius` when the point is inside the feature
    #[inline]
    pub fn falloff(&self, x: f64, z: f64) -> Option<f64> {
        let dx = x - self.center_x;
        let dz = z - self.center_z;
        let dist = (dx * dx + dz * dz).sqrt();
        if dist < self.radius {
            Some(1.0 - dist / self.radius)
        } else {
            None
        }
    }

    /// Whether the point lies within `fraction` of the radius
    #[inline]
    pub fn contains(&self, x: f64, z: f64, fraction: f64) -> bool {
        let dx = x - self.center_x;
        let dz = z - self.center_z;
        let limit = self.radius * fraction;
        dx * dx + dz * dz < limit * limit
    }
}

/// Immutable feature lists of one world
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldFeatures {
    pub mountains: Vec<FeatureDescriptor>,
    pub hills: Vec<FeatureDescriptor>,
    pub lakes: Vec<FeatureDescriptor>,
}

impl WorldFeatures {
    /// Scatter features for a seed
    pub fn generate(seed: u32, params: &FeatureParams) -> Self {
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let half = params.extent / 2.0;
        let jitter = params.extent * 0.15;

        // Mountains ring the spawn area so the start is walkable
        let mut mountains = Vec::with_capacity(params.mountain_count as usize);
        for i in 0..params.mountain_count {
            let angle = i as f64 / params.mountain_count as f64 * TAU;
            let distance = half * (0.4 + rng.gen::<f64>() * 0.5);
            mountains.push(FeatureDescriptor {
                center_x: angle.cos() * distance + (rng.gen::<f64>() - 0.5) * jitter,
                center_z: angle.sin() * distance + (rng.gen::<f64>() - 0.5) * jitter,
                radius: sample_range(&mut rng, params.mountain_radius),
                magnitude: sample_range(&mut rng, params.mountain_height),
            });
        }

        let mut hills = Vec::with_capacity(params.hill_count as usize);
        for _ in 0..params.hill_count {
            hills.push(FeatureDescriptor {
                center_x: (rng.gen::<f64>() - 0.5) * params.extent * 0.8,
                center_z: (rng.gen::<f64>() - 0.5) * params.extent * 0.8,
                radius: sample_range(&mut rng, params.hill_radius),
                magnitude: sample_range(&mut rng, params.hill_height),
            });
        }

        let mut lakes = Vec::with_capacity(params.lake_count as usize);
        for _ in 0..params.lake_count {
            lakes.push(FeatureDescriptor {
                center_x: (rng.gen::<f64>() - 0.5) * params.extent * 0.6,
                center_z: (rng.gen::<f64>() - 0.5) * params.extent * 0.6,
                radius: sample_range(&mut rng, params.lake_radius),
                magnitude: 0.0,
            });
        }

        log::debug!(
            "[WorldFeatures] Seed {}: {} mountains, {} hills, {} lakes",
            seed,
            mountains.len(),
            hills.len(),
            lakes.len()
        );

        Self { mountains, hills, lakes }
    }

    /// No features at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.mountains.len() + self.hills.len() + self.lakes.len()
    }
}

fn sample_range(rng: &mut StdRng, (min, max): (f64, f64)) -> f64 {
    min + rng.gen::<f64>() * (max - min)
}
