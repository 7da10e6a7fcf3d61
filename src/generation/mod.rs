//! # Generation Module
//!
//! Everything that fills a chunk's [`VoxelGrid`] before it is meshed:
//!
//! * `noise_source` - Seeded fractal Perlin noise
//! * `terrain` - The column, tree and water passes
//! * `biome` - Climate classification and the post-generation biome pass
//! * `features` - Tree and flora queues and their placement
//! * `random` - Position-derived rolls used for feature placement
//! * `mode` - Selectable fill strategies

use cgmath::Point3;

use crate::{config::TerrainConfig, voxels::chunk::VoxelGrid};

pub mod biome;
pub mod features;
pub mod mode;
pub mod noise_source;
pub mod random;
pub mod terrain;

pub use biome::{BiomeClassifier, BiomeStats};
pub use features::{DecorationRecord, FeatureQueue, TreeSite};
pub use mode::GenerationMode;
pub use noise_source::NoiseSource;
pub use terrain::TerrainGenerator;

/// Generates one chunk with default settings apart from seed and frequency.
///
/// # Arguments
/// * `world_offset` - World block coordinates of the chunk's local origin
/// * `seed` - Per-world seed
/// * `frequency` - Terrain noise frequency
pub fn generate_chunk(world_offset: Point3<i32>, seed: u64, frequency: f64) -> VoxelGrid {
    let config = TerrainConfig {
        seed,
        frequency,
        ..TerrainConfig::default()
    };
    TerrainGenerator::new(config).generate_chunk(world_offset)
}
