//! World configuration
//!
//! Everything the terrain core needs is provided once at world creation and
//! stays immutable for the session. Values default to `constants.rs` and
//! can be overridden from a TOML file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{self, decoration, features, terrain};
use crate::error::{invalid_config, TerrainError, TerrainResult};

/// Top-level world configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: u32,
    pub chunk_size: u32,
    pub chunk_height: u32,
    pub load_radius: u32,
    pub hysteresis_margin: u32,
    /// Chunks generated per batch when streaming in time slices
    pub batch_size: usize,
    pub water_level: i32,
    pub snow_level: i32,
    pub tree_density: f64,
    pub lichen_density: f64,
    pub berry_density: f64,
    pub cave_threshold: f64,
    pub terrain: TerrainParams,
    pub features: FeatureParams,
    /// Color/transparency overrides keyed by block name ("stone", "ice", ...)
    pub palette: BTreeMap<String, PaletteOverride>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: constants::core::DEFAULT_SEED,
            chunk_size: constants::core::CHUNK_SIZE,
            chunk_height: constants::core::CHUNK_HEIGHT,
            load_radius: constants::core::LOAD_RADIUS,
            hysteresis_margin: constants::core::HYSTERESIS_MARGIN,
            batch_size: constants::core::BATCH_SIZE,
            water_level: terrain::WATER_LEVEL,
            snow_level: terrain::SNOW_LEVEL,
            tree_density: decoration::TREE_DENSITY,
            lichen_density: decoration::LICHEN_DENSITY,
            berry_density: decoration::BERRY_DENSITY,
            cave_threshold: terrain::CAVE_THRESHOLD,
            terrain: TerrainParams::default(),
            features: FeatureParams::default(),
            palette: BTreeMap::new(),
        }
    }
}

/// Height field shaping parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    pub base_height: f64,
    pub large_frequency: f64,
    pub large_amplitude: f64,
    pub medium_frequency: f64,
    pub medium_amplitude: f64,
    pub small_frequency: f64,
    pub small_amplitude: f64,
    pub mountain_level: f64,
    pub rocky_level: f64,
    pub snow_flat_level: f64,
    /// Upper clamp for the height field; `None` derives it from the chunk height
    pub max_height: Option<f64>,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            base_height: terrain::BASE_HEIGHT,
            large_frequency: terrain::LARGE_FREQUENCY,
            large_amplitude: terrain::LARGE_AMPLITUDE,
            medium_frequency: terrain::MEDIUM_FREQUENCY,
            medium_amplitude: terrain::MEDIUM_AMPLITUDE,
            small_frequency: terrain::SMALL_FREQUENCY,
            small_amplitude: terrain::SMALL_AMPLITUDE,
            mountain_level: terrain::MOUNTAIN_LEVEL,
            rocky_level: terrain::ROCKY_LEVEL,
            snow_flat_level: terrain::SNOW_FLAT_LEVEL,
            max_height: None,
        }
    }
}

/// Counts and size ranges of the scattered world features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureParams {
    pub mountain_count: u32,
    pub hill_count: u32,
    pub lake_count: u32,
    pub extent: f64,
    pub mountain_radius: (f64, f64),
    pub mountain_height: (f64, f64),
    pub hill_radius: (f64, f64),
    pub hill_height: (f64, f64),
    pub lake_radius: (f64, f64),
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            mountain_count: features::MOUNTAIN_COUNT,
            hill_count: features::HILL_COUNT,
            lake_count: features::LAKE_COUNT,
            extent: features::FEATURE_EXTENT,
            mountain_radius: features::MOUNTAIN_RADIUS,
            mountain_height: features::MOUNTAIN_HEIGHT,
            hill_radius: features::HILL_RADIUS,
            hill_height: features::HILL_HEIGHT,
            lake_radius: features::LAKE_RADIUS,
        }
    }
}

impl FeatureParams {
    /// No mountains, hills or lakes: pure noise terrain
    pub fn none() -> Self {
        Self {
            mountain_count: 0,
            hill_count: 0,
            lake_count: 0,
            ..Self::default()
        }
    }
}

/// Per-block palette override
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaletteOverride {
    pub color: Option<[f32; 3]>,
    pub transparent: Option<bool>,
}

impl WorldConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> TerrainResult<Self> {
        let config: WorldConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> TerrainResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| TerrainError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("[WorldConfig] Loading world config from {:?}", path);
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> TerrainResult<()> {
        if self.chunk_size == 0 {
            return Err(invalid_config("chunk_size", "must be greater than zero"));
        }
        if self.chunk_size > constants::core::MAX_CHUNK_SIZE {
            return Err(invalid_config(
                "chunk_size",
                format!("must not exceed {}", constants::core::MAX_CHUNK_SIZE),
            ));
        }
        if self.chunk_height < 16 {
            return Err(invalid_config("chunk_height", "must be at least 16"));
        }
        if self.chunk_height > constants::core::MAX_CHUNK_HEIGHT {
            return Err(invalid_config(
                "chunk_height",
                format!("must not exceed {}", constants::core::MAX_CHUNK_HEIGHT),
            ));
        }
        if self.batch_size == 0 {
            return Err(invalid_config("batch_size", "must be greater than zero"));
        }
        let height = self.chunk_height as i32;
        if self.water_level < 1 || self.water_level >= height {
            return Err(invalid_config(
                "water_level",
                format!("must be within 1..{}", height),
            ));
        }
        if self.snow_level <= self.water_level || self.snow_level >= height {
            return Err(invalid_config(
                "snow_level",
                format!("must be within {}..{}", self.water_level + 1, height),
            ));
        }
        for (field, value) in [
            ("tree_density", self.tree_density),
            ("lichen_density", self.lichen_density),
            ("berry_density", self.berry_density),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid_config(field, "must be within 0.0..=1.0"));
            }
        }
        if self.lichen_density + self.berry_density > 1.0 {
            return Err(invalid_config(
                "berry_density",
                "lichen_density + berry_density must not exceed 1.0",
            ));
        }
        if let Some(max) = self.terrain.max_height {
            if !max.is_finite() || max < 1.0 {
                return Err(invalid_config("terrain.max_height", "must be a finite value of at least 1.0"));
            }
        }
        if self.features.extent <= 0.0 {
            return Err(invalid_config("features.extent", "must be positive"));
        }
        for (field, (min, max)) in [
            ("features.mountain_radius", self.features.mountain_radius),
            ("features.hill_radius", self.features.hill_radius),
            ("features.lake_radius", self.features.lake_radius),
        ] {
            if min <= 0.0 || max < min {
                return Err(invalid_config(field, "must be a positive (min, max) range"));
            }
        }
        for name in self.palette.keys() {
            if crate::world::BlockId::from_name(name).is_none() {
                return Err(TerrainError::UnknownBlock { name: name.clone() });
            }
        }
        Ok(())
    }

    /// Highest y the height field may produce
    pub fn max_terrain_height(&self) -> f64 {
        let headroom_limit = self
            .chunk_height
            .saturating_sub(terrain::TREE_HEADROOM)
            .max(1) as f64;
        match self.terrain.max_height {
            Some(max) => max.min(self.chunk_height as f64 - 1.0),
            None => headroom_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 16);
        assert_eq!(config.chunk_height, 64);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.max_terrain_height(), 52.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = WorldConfig::from_toml_str(
            r#"
            seed = 42
            load_radius = 2

            [terrain]
            base_height = 30.0

            [palette.stone]
            color = [0.1, 0.2, 0.3]
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.load_radius, 2);
        assert_eq!(config.chunk_size, 16);
        assert_eq!(config.terrain.base_height, 30.0);
        assert_eq!(config.terrain.large_amplitude, 15.0);
        assert_eq!(config.palette["stone"].color, Some([0.1, 0.2, 0.3]));
        assert_eq!(config.palette["stone"].transparent, None);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = WorldConfig::default();
        config.chunk_size = 0;
        assert!(matches!(config.validate(), Err(TerrainError::InvalidConfig { .. })));

        let mut config = WorldConfig::default();
        config.snow_level = config.water_level;
        assert!(config.validate().is_err());

        let mut config = WorldConfig::default();
        config.tree_density = 1.5;
        assert!(config.validate().is_err());

        let mut config = WorldConfig::default();
        config.palette.insert(
            "unobtanium".to_string(),
            PaletteOverride { color: None, transparent: Some(true) },
        );
        assert!(matches!(config.validate(), Err(TerrainError::UnknownBlock { .. })));
    }

    #[test]
    fn test_validation_rejects_unusable_max_height() {
        let result = WorldConfig::from_toml_str("[terrain]\nmax_height = -5.0");
        assert!(matches!(result, Err(TerrainError::InvalidConfig { .. })));

        let mut config = WorldConfig::default();
        config.terrain.max_height = Some(f64::NAN);
        assert!(config.validate().is_err());

        config.terrain.max_height = Some(0.5);
        assert!(config.validate().is_err());

        config.terrain.max_height = Some(40.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.max_terrain_height(), 40.0);
    }

    #[test]
    fn test_validation_caps_chunk_dimensions() {
        let mut config = WorldConfig::default();
        config.chunk_size = 70_000;
        assert!(matches!(config.validate(), Err(TerrainError::InvalidConfig { .. })));

        let mut config = WorldConfig::default();
        config.chunk_height = 1 << 20;
        assert!(config.validate().is_err());

        // The largest accepted chunk still fits the block count in u32
        let mut config = WorldConfig::default();
        config.chunk_size = constants::core::MAX_CHUNK_SIZE;
        config.chunk_height = constants::core::MAX_CHUNK_HEIGHT;
        assert!(config.validate().is_ok());
        let blocks = config.chunk_size as u64 * config.chunk_size as u64 * config.chunk_height as u64;
        assert!(blocks <= u32::MAX as u64);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = WorldConfig::from_toml_str("seed = \"not a number\"");
        assert!(matches!(result, Err(TerrainError::ConfigParse(_))));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 7\nchunk_size = 8").unwrap();

        let config = WorldConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.chunk_size, 8);

        let missing = WorldConfig::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(TerrainError::ConfigIo { .. })));
    }
}
