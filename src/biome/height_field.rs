use std::f64::consts::FRAC_PI_2;

use crate::biome::{Biome, WorldFeatures};
use crate::config::{TerrainParams, WorldConfig};
use crate::constants::terrain::LAKE_ICE_FRACTION;
use crate::noise::SimplexNoise;

/// Height and biome of one world column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSample {
    /// Continuous terrain height
    pub height: f64,
    /// Topmost solid block, `floor(height)`
    pub surface_y: i32,
    pub biome: Biome,
}

/// Continuous terrain height and biome classification over the world plane.
///
/// Pure function of the seed, the terrain parameters and the feature lists.
#[derive(Debug, Clone)]
pub struct HeightField {
    noise: SimplexNoise,
    features: WorldFeatures,
    params: TerrainParams,
    water_level: i32,
    max_height: f64,
}

impl HeightField {
    /// Height field with features scattered from the config seed
    pub fn new(config: &WorldConfig) -> Self {
        let features = WorldFeatures::generate(config.seed, &config.features);
        Self::with_features(config, features)
    }

    /// Height field over an explicit feature set
    pub fn with_features(config: &WorldConfig, features: WorldFeatures) -> Self {
        Self {
            noise: SimplexNoise::new(config.seed),
            features,
            params: config.terrain,
            water_level: config.water_level,
            // f64::max drops NaN, so the clamp bounds are always ordered
            max_height: config.max_terrain_height().max(0.0),
        }
    }

    pub fn noise(&self) -> &SimplexNoise {
        &self.noise
    }

    pub fn features(&self) -> &WorldFeatures {
        &self.features
    }

    /// Terrain height at a world column, clamped to `[0, max_height]`
    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        let p = &self.params;
        let mut height = p.base_height;

        height += self.noise.octave(x * p.large_frequency, z * p.large_frequency, 4, 0.5, 2.0)
            * p.large_amplitude;
        height += self.noise.octave(x * p.medium_frequency, z * p.medium_frequency, 2, 0.5, 2.0)
            * p.medium_amplitude;
        height += self.noise.noise2d(x * p.small_frequency, z * p.small_frequency) * p.small_amplitude;

        for mountain in &self.features.mountains {
            if let Some(factor) = mountain.falloff(x, z) {
                height += mountain.magnitude * factor * factor;
            }
        }

        for hill in &self.features.hills {
            if let Some(factor) = hill.falloff(x, z) {
                height += hill.magnitude * (factor * FRAC_PI_2).cos();
            }
        }

        // Lake beds deepen toward the center
        for lake in &self.features.lakes {
            if let Some(factor) = lake.falloff(x, z) {
                let floor = self.water_level as f64 - 2.0 - 2.0 * factor;
                height = height.min(floor);
            }
        }

        height.clamp(0.0, self.max_height)
    }

    /// Biome at a world column
    pub fn biome_at(&self, x: f64, z: f64) -> Biome {
        if self.in_lake(x, z) {
            return Biome::Ice;
        }
        self.classify(self.height_at(x, z))
    }

    /// Height, surface block row and biome with a single height evaluation
    pub fn sample_column(&self, x: f64, z: f64) -> ColumnSample {
        let height = self.height_at(x, z);
        let biome = if self.in_lake(x, z) {
            Biome::Ice
        } else {
            self.classify(height)
        };
        ColumnSample {
            height,
            surface_y: height.floor() as i32,
            biome,
        }
    }

    /// Topmost solid row of a column
    pub fn surface_height(&self, x: f64, z: f64) -> i32 {
        self.height_at(x, z).floor() as i32
    }

    fn in_lake(&self, x: f64, z: f64) -> bool {
        self.features
            .lakes
            .iter()
            .any(|lake| lake.contains(x, z, LAKE_ICE_FRACTION))
    }

    fn classify(&self, height: f64) -> Biome {
        let p = &self.params;
        if height > p.mountain_level {
            Biome::Mountain
        } else if height > p.rocky_level {
            Biome::Rocky
        } else if height < p.snow_flat_level {
            Biome::SnowFlat
        } else {
            Biome::Forest
        }
    }
}
