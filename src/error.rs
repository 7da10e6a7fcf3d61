//! # Error Module
//!
//! Errors raised at the crate's API boundary.
//!
//! Voxel queries and edits never fail: out-of-range lookups degrade to an Air
//! sentinel and out-of-range edits are no-ops. The variants here cover values a
//! caller hands in that indicate a caller or configuration bug, such as an
//! invalid direction id or an unknown generation mode name.

/// Errors produced by configuration loading and by parsing enumerated values.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// A raw block side id outside `0..6`.
    #[error("invalid block side id: {0}")]
    InvalidDirection(u8),

    /// A raw block type id that does not name a `BlockType`.
    #[error("unknown block type id: {0}")]
    UnknownBlockType(u8),

    /// A generation mode name that is not registered.
    #[error("unknown generation mode: {0:?}")]
    UnknownGenerationMode(String),

    /// A biome name that is not registered.
    #[error("unknown biome: {0:?}")]
    UnknownBiome(String),

    /// A configuration value outside its accepted range.
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for `TerrainConfig`.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TerrainError>;
