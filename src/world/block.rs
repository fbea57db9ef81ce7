use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PaletteOverride;
use crate::error::{TerrainError, TerrainResult};

/// Block type code stored in chunk arrays and the edit overlay
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BlockId {
    #[default]
    Air = 0,
    Snow = 1,
    FrozenDirt = 2,
    Stone = 3,
    PineWood = 4,
    PineLeaves = 5,
    Ice = 6,
    FrozenWater = 7,
    BerryBush = 8,
    MossStone = 9,
    ReindeerLichen = 10,
}

impl BlockId {
    pub const COUNT: usize = 11;

    pub const ALL: [BlockId; Self::COUNT] = [
        BlockId::Air,
        BlockId::Snow,
        BlockId::FrozenDirt,
        BlockId::Stone,
        BlockId::PineWood,
        BlockId::PineLeaves,
        BlockId::Ice,
        BlockId::FrozenWater,
        BlockId::BerryBush,
        BlockId::MossStone,
        BlockId::ReindeerLichen,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Config/serialization name of this block
    pub fn name(self) -> &'static str {
        match self {
            BlockId::Air => "air",
            BlockId::Snow => "snow",
            BlockId::FrozenDirt => "frozen_dirt",
            BlockId::Stone => "stone",
            BlockId::PineWood => "pine_wood",
            BlockId::PineLeaves => "pine_leaves",
            BlockId::Ice => "ice",
            BlockId::FrozenWater => "frozen_water",
            BlockId::BerryBush => "berry_bush",
            BlockId::MossStone => "moss_stone",
            BlockId::ReindeerLichen => "reindeer_lichen",
        }
    }

    pub fn from_name(name: &str) -> Option<BlockId> {
        Self::ALL.iter().copied().find(|block| block.name() == name)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", BlockPalette::default().get(*self).name)
    }
}

/// Rendering and physical properties of a block type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockProperties {
    pub name: &'static str,
    pub color: [f32; 3],
    /// Faces next to a transparent block stay visible
    pub transparent: bool,
    /// Blocks movement and stops rays
    pub solid: bool,
}

const fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

const fn props(name: &'static str, color: [f32; 3], transparent: bool, solid: bool) -> BlockProperties {
    BlockProperties { name, color, transparent, solid }
}

/// Fixed-size block property table indexed by `BlockId`
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPalette {
    entries: [BlockProperties; BlockId::COUNT],
}

impl Default for BlockPalette {
    fn default() -> Self {
        Self {
            entries: [
                props("Air", [0.0, 0.0, 0.0], true, false),
                props("Snow", rgb(0xF0F5FF), false, true),
                props("Frozen Dirt", rgb(0x4A3728), false, true),
                props("Stone", rgb(0x6B7280), false, true),
                props("Pine Wood", rgb(0x5D4037), false, true),
                props("Pine Leaves", rgb(0x1B4332), false, true),
                props("Ice", rgb(0xA5D8FF), true, true),
                props("Frozen Water", rgb(0x74C0FC), true, false),
                props("Berry Bush", rgb(0xDC2626), false, true),
                props("Moss Stone", rgb(0x4A5D4A), false, true),
                props("Reindeer Lichen", [0.8, 0.85, 0.75], true, false),
            ],
        }
    }
}

impl BlockPalette {
    /// Default palette with config overrides applied
    pub fn with_overrides(overrides: &BTreeMap<String, PaletteOverride>) -> TerrainResult<Self> {
        let mut palette = Self::default();
        for (name, entry) in overrides {
            let block = BlockId::from_name(name)
                .ok_or_else(|| TerrainError::UnknownBlock { name: name.clone() })?;
            let slot = &mut palette.entries[block.index()];
            if let Some(color) = entry.color {
                slot.color = color;
            }
            if let Some(transparent) = entry.transparent {
                slot.transparent = transparent;
            }
        }
        // Air always stays see-through
        palette.entries[BlockId::Air.index()].transparent = true;
        Ok(palette)
    }

    #[inline]
    pub fn get(&self, block: BlockId) -> &BlockProperties {
        &self.entries[block.index()]
    }

    /// True when faces facing this block must be drawn
    #[inline]
    pub fn is_see_through(&self, block: BlockId) -> bool {
        block == BlockId::Air || self.entries[block.index()].transparent
    }

    #[inline]
    pub fn is_solid(&self, block: BlockId) -> bool {
        self.entries[block.index()].solid
    }
}
