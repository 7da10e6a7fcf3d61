#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! Procedural voxel terrain generation and greedy meshing.
//!
//! The crate fills cubic chunks of typed blocks from layered noise, retypes
//! them per biome, and turns the solid and liquid volumes into two separate
//! sets of merged quads a renderer can upload as is.
//!
//! ## Key Modules
//!
//! * `generation` - Noise, the terrain passes, the biome pass and feature placement
//! * `meshing` - Greedy and per-face meshers and their output buffers
//! * `editing` - Single-voxel edits with selective remeshing
//! * `voxels` - Blocks, grids, chunks and the world that owns them
//! * `task_management` - The worker pool chunks are generated on
//! * `config` - JSON-loadable tunables
//!
//! ## Pipeline
//!
//! ```text
//! NoiseSource -> TerrainGenerator -> VoxelGrid -> GreedyMesher -> ChunkMeshData
//!                                        ^
//!                                   VoxelEditor
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::Point3;
//! use voxel_terrain::{build_mesh, generate_chunk};
//!
//! let grid = generate_chunk(Point3::new(0, 0, 0), 1337, 0.03);
//! let land = build_mesh(&grid, true);
//! let water = build_mesh(&grid, false);
//! println!("{} land quads, {} water quads", land.quad_count(), water.quad_count());
//! ```

use std::path::Path;

use log::info;
use web_time::Instant;

pub mod config;
pub mod editing;
pub mod error;
pub mod generation;
pub mod meshing;
pub mod task_management;
pub mod voxels;

pub use config::TerrainConfig;
pub use editing::{EditOutcome, VoxelEditor};
pub use error::{Result, TerrainError};
pub use generation::{generate_chunk, GenerationMode, NoiseSource, TerrainGenerator};
pub use meshing::{build_mesh, ChunkMeshData, GreedyMesher};
pub use voxels::{
    block::{Biome, Block, BlockSide, BlockType},
    chunk::{Chunk, VoxelGrid},
    world::{World, WorldStats},
};

/// Initializes the `env_logger` backend, filtered by `RUST_LOG`.
///
/// Only binaries should call this; the library itself only logs through the
/// `log` facade.
pub fn init_logger() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");
}

/// Generates a world from an optional JSON configuration and logs its statistics.
///
/// # Arguments
/// * `config_path` - Configuration file; defaults are used when `None`
///
/// # Returns
/// The generated world's totals.
pub fn run(config_path: Option<&Path>) -> Result<WorldStats> {
    let config = match config_path {
        Some(path) => TerrainConfig::from_json_file(path)?,
        None => TerrainConfig::default(),
    };
    let draw_distance = config.draw_distance;

    let start = Instant::now();
    let mut world = World::new(config)?;
    world.generate(draw_distance);

    let mut positions: Vec<_> = world.chunks().keys().copied().collect();
    positions.sort_by_key(|position| (position.z, position.y, position.x));
    for position in positions {
        if let Some(chunk) = world.get_chunk_at(position) {
            info!(
                "Chunk {:?}: {} land quads, {} liquid quads, {} decorations",
                position,
                chunk.land_mesh().quad_count(),
                chunk.liquid_mesh().quad_count(),
                chunk.decorations().len()
            );
        }
    }

    let stats = world.stats();
    info!(
        "World ready in {:?}: {} chunks, {} land quads, {} liquid quads, {} decorations",
        start.elapsed(),
        stats.chunks,
        stats.land_quads,
        stats.liquid_quads,
        stats.decorations
    );
    Ok(stats)
}
