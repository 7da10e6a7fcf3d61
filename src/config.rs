//! # Configuration Module
//!
//! Plain configuration values the host hands to the terrain pipeline.
//!
//! Every field has a default, so a JSON file only needs the fields it wants to
//! override:
//!
//! ```json
//! { "chunk_size": 64, "seed": 1337, "generation_mode": "terrain" }
//! ```
//!
//! Loaded configurations are validated before use; values that can only come
//! from a caller mistake are rejected instead of clamped.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TerrainError},
    generation::GenerationMode,
};

/// Largest accepted chunk edge length.
pub const MAX_CHUNK_SIZE: usize = 256;

/// Tunables for generation, meshing and editing.
///
/// Odds are expressed as "one in N": a value of 50 means a 2% chance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Edge length N of every chunk.
    pub chunk_size: usize,
    /// Per-world seed for noise and feature placement.
    pub seed: u64,
    /// Base frequency of the terrain noise.
    pub frequency: f64,
    /// Fractal octaves of the terrain noise.
    pub octaves: usize,
    /// World Z below which air is flooded with water.
    pub water_level: i32,
    /// Caves only open this many blocks below the surface.
    pub cave_depth: i32,
    /// 3D noise at or above this value carves a cave.
    pub cave_threshold: f64,
    /// One in N surface blocks above the water level grows a tree.
    pub tree_chance: u32,
    /// Trunk height of an ordinary tree.
    pub tree_height: i32,
    /// Manhattan radius of a tree canopy.
    pub canopy_radius: i32,
    /// Trunk height of a swamp tree.
    pub swamp_tree_height: i32,
    /// Trunk height of a taiga tree.
    pub taiga_tree_height: i32,
    /// One in N surface blocks rerolls a tree during the biome pass.
    pub biome_tree_chance: u32,
    /// One in N plains grass blocks receives a flora decoration.
    pub flora_chance: u32,
    /// Water levels counted up from a column's water floor that stay shallow.
    pub shallow_water_depth: i32,
    /// Shore blocks within this many levels below the water line become sand.
    pub sand_band: i32,
    /// World units per block edge in mesh output.
    pub block_scale: f32,
    /// World Z of the chunk whose floor layer is bedrock. A [`crate::World`]
    /// overrides it with its bottom layer.
    pub bedrock_level: i32,
    /// Frequency of the biome classification noise.
    pub biome_frequency: f64,
    /// Distance in blocks over which humidity falls from 1 to 0.
    pub humidity_range: f32,
    /// Whether edits flood newly opened air next to water.
    pub flood_on_edit: bool,
    /// How chunk grids are filled.
    pub generation_mode: GenerationMode,
    /// Radius in chunks of the demo world.
    pub draw_distance: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            chunk_size: 32,
            seed: 0,
            frequency: 0.03,
            octaves: 6,
            water_level: 15,
            cave_depth: 7,
            cave_threshold: 0.0,
            tree_chance: 50,
            tree_height: 5,
            canopy_radius: 2,
            swamp_tree_height: 7,
            taiga_tree_height: 8,
            biome_tree_chance: 40,
            flora_chance: 20,
            shallow_water_depth: 5,
            sand_band: 5,
            block_scale: 100.0,
            bedrock_level: 0,
            biome_frequency: 0.3,
            humidity_range: 10.0,
            flood_on_edit: true,
            generation_mode: GenerationMode::Terrain,
            draw_distance: 1,
        }
    }
}

impl TerrainConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TerrainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!("Loaded terrain configuration from {}", path.display());
        Ok(config)
    }

    /// Checks every field against its accepted range.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(invalid(
                "chunk_size",
                format!("must be in 1..={}, got {}", MAX_CHUNK_SIZE, self.chunk_size),
            ));
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(invalid("frequency", format!("must be positive, got {}", self.frequency)));
        }
        if !(self.biome_frequency.is_finite() && self.biome_frequency > 0.0) {
            return Err(invalid(
                "biome_frequency",
                format!("must be positive, got {}", self.biome_frequency),
            ));
        }
        if self.octaves == 0 {
            return Err(invalid("octaves", "must be at least 1".to_string()));
        }
        if !(self.block_scale.is_finite() && self.block_scale > 0.0) {
            return Err(invalid("block_scale", format!("must be positive, got {}", self.block_scale)));
        }
        if !(self.humidity_range.is_finite() && self.humidity_range > 0.0) {
            return Err(invalid(
                "humidity_range",
                format!("must be positive, got {}", self.humidity_range),
            ));
        }
        for (field, odds) in [
            ("tree_chance", self.tree_chance),
            ("biome_tree_chance", self.biome_tree_chance),
            ("flora_chance", self.flora_chance),
        ] {
            if odds == 0 {
                return Err(invalid(field, "odds are one in N and N must be at least 1".to_string()));
            }
        }
        for (field, height) in [
            ("tree_height", self.tree_height),
            ("swamp_tree_height", self.swamp_tree_height),
            ("taiga_tree_height", self.taiga_tree_height),
        ] {
            if height < 1 {
                return Err(invalid(field, format!("must be at least 1, got {}", height)));
            }
        }
        if self.canopy_radius < 0 || self.shallow_water_depth < 0 || self.sand_band < 0 {
            return Err(invalid(
                "canopy_radius/shallow_water_depth/sand_band",
                "must not be negative".to_string(),
            ));
        }
        if self.draw_distance < 0 {
            return Err(invalid("draw_distance", "must not be negative".to_string()));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> TerrainError {
    TerrainError::InvalidConfig { field, reason }
}
