//! Terrain core error handling
//!
//! The terrain core is pure computation, so errors only surface from
//! configuration loading and from contract violations on edits.

use std::path::PathBuf;

/// Errors raised by the terrain core
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Failed to read config {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Unknown block type: {name}")]
    UnknownBlock { name: String },

    #[error("Failed to encode or decode block edits: {0}")]
    EditFormat(#[from] serde_json::Error),

    #[error("Block y={y} is outside the world column 0..{height}")]
    VerticalOutOfRange { y: i32, height: u32 },
}

/// Result type for terrain operations
pub type TerrainResult<T> = Result<T, TerrainError>;

/// Create an invalid configuration error
pub fn invalid_config(field: impl Into<String>, reason: impl std::fmt::Display) -> TerrainError {
    TerrainError::InvalidConfig {
        field: field.into(),
        reason: reason.to_string(),
    }
}
