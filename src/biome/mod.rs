//! Height and biome field
//!
//! Turns noise bands and scattered world features into a continuous terrain
//! height and a discrete biome for every world column.

pub mod biome_type;
pub mod features;
pub mod height_field;

pub use biome_type::Biome;
pub use features::{FeatureDescriptor, WorldFeatures};
pub use height_field::{ColumnSample, HeightField};
