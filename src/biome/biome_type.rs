use std::fmt;

use serde::{Deserialize, Serialize};

use crate::world::BlockId;

/// Discrete terrain classification of a world column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    /// Frozen lake surface
    Ice,
    Mountain,
    Rocky,
    /// Low snowfields near the water line
    SnowFlat,
    Forest,
}

impl Biome {
    pub const ALL: [Biome; 5] = [
        Biome::Ice,
        Biome::Mountain,
        Biome::Rocky,
        Biome::SnowFlat,
        Biome::Forest,
    ];

    /// Surface block used when the height rules do not pick one
    pub fn surface_block(&self) -> BlockId {
        match self {
            Biome::Rocky => BlockId::MossStone,
            _ => BlockId::Snow,
        }
    }

    /// Whether trees and ground cover may grow here
    pub fn supports_vegetation(&self) -> bool {
        !matches!(self, Biome::Ice | Biome::Mountain)
    }

    /// Single character used by the ASCII preview
    pub fn map_char(&self) -> char {
        match self {
            Biome::Ice => '~',
            Biome::Mountain => '^',
            Biome::Rocky => 'n',
            Biome::SnowFlat => '.',
            Biome::Forest => 'T',
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Biome::Ice => "Ice",
            Biome::Mountain => "Mountain",
            Biome::Rocky => "Rocky",
            Biome::SnowFlat => "Snow Flat",
            Biome::Forest => "Forest",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_blocks() {
        assert_eq!(Biome::Rocky.surface_block(), BlockId::MossStone);
        assert_eq!(Biome::Forest.surface_block(), BlockId::Snow);
        assert_eq!(Biome::Ice.surface_block(), BlockId::Snow);
    }

    #[test]
    fn test_vegetation_rules() {
        assert!(!Biome::Ice.supports_vegetation());
        assert!(!Biome::Mountain.supports_vegetation());
        assert!(Biome::Forest.supports_vegetation());
        assert!(Biome::SnowFlat.supports_vegetation());
    }

    #[test]
    fn test_map_chars_are_distinct() {
        let mut chars: Vec<char> = Biome::ALL.iter().map(|b| b.map_char()).collect();
        chars.sort();
        chars.dedup();
        assert_eq!(chars.len(), Biome::ALL.len());
    }
}
