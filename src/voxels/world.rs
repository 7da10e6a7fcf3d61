//! # World Module
//!
//! This module provides the `World` struct, which owns every loaded chunk and
//! routes block lookups and edits given in world block coordinates to the
//! chunk that holds them.
//!
//! ## Architecture
//!
//! The world uses sparse storage: a hash map from chunk coordinates to chunks.
//! Chunks are generated on the worker pool (see [`World::generate`]) or one at
//! a time on the calling thread (see [`World::add_chunk_at`]). Either way each
//! chunk is built from the same shared [`TerrainGenerator`], so the result
//! does not depend on which thread built it or in what order.
//!
//! The world's floor is the chunk layer `-draw_distance`: its bottom block
//! layer is bedrock and no chunk below it is ever generated.

use std::collections::HashMap;
use std::sync::Arc;

use cgmath::Point3;
use log::{debug, info};
use web_time::Instant;

use crate::{
    config::TerrainConfig,
    editing::{EditOutcome, VoxelEditor},
    error::Result,
    generation::TerrainGenerator,
    meshing::{GreedyMesher, MeshPass},
    task_management::TaskManager,
    voxels::{
        block::{Block, BlockType},
        chunk::Chunk,
        tasks::ChunkGenerationTask,
    },
};

/// Totals across every loaded chunk.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Loaded chunks
    pub chunks: usize,
    /// Quads in all land meshes
    pub land_quads: usize,
    /// Quads in all liquid meshes
    pub liquid_quads: usize,
    /// Flora decorations placed
    pub decorations: usize,
}

/// A voxel world composed of chunks.
pub struct World {
    config: TerrainConfig,
    generator: Arc<TerrainGenerator>,
    mesher: GreedyMesher,
    editor: VoxelEditor,
    /// Chunk Z of the bedrock layer.
    bottom_layer: i32,
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<Point3<i32>, Chunk>,
}

impl World {
    /// Creates an empty world.
    ///
    /// The configured `bedrock_level` is replaced by the world Z of the bottom
    /// chunk layer, `-draw_distance * chunk_size`.
    ///
    /// # Errors
    /// Returns [`crate::error::TerrainError::InvalidConfig`] when the
    /// configuration fails validation.
    pub fn new(mut config: TerrainConfig) -> Result<Self> {
        config.validate()?;
        let bottom_layer = -config.draw_distance;
        config.bedrock_level = bottom_layer * config.chunk_size as i32;
        debug!("World floor at chunk layer {} (z = {})", bottom_layer, config.bedrock_level);
        Ok(World {
            generator: Arc::new(TerrainGenerator::new(config.clone())),
            mesher: GreedyMesher::new(config.block_scale),
            editor: VoxelEditor::from_config(&config),
            bottom_layer,
            chunks: HashMap::new(),
            config,
        })
    }

    /// The configuration in effect, with `bedrock_level` set to the world floor.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// The generator shared by every chunk.
    pub fn generator(&self) -> &Arc<TerrainGenerator> {
        &self.generator
    }

    /// Every loaded chunk, keyed by chunk coordinates.
    pub fn chunks(&self) -> &HashMap<Point3<i32>, Chunk> {
        &self.chunks
    }

    /// Chunk Z of the bottom layer, the one floored with bedrock.
    pub fn bottom_layer(&self) -> i32 {
        self.bottom_layer
    }

    /// Generates every missing chunk within `draw_distance` chunks of the origin
    /// on a worker pool sized to the machine.
    ///
    /// Layers below [`World::bottom_layer`] are skipped.
    ///
    /// # Returns
    /// The number of chunks generated.
    pub fn generate(&mut self, draw_distance: i32) -> usize {
        let mut task_manager = TaskManager::with_available_parallelism();
        self.generate_with(&mut task_manager, draw_distance)
    }

    /// Like [`World::generate`], using an existing task manager.
    pub fn generate_with(&mut self, task_manager: &mut TaskManager, draw_distance: i32) -> usize {
        let start = Instant::now();
        let before = self.chunks.len();
        let distance = draw_distance.max(0);

        for x in -distance..=distance {
            for y in -distance..=distance {
                for z in (-distance).max(self.bottom_layer)..=distance {
                    let position = Point3::new(x, y, z);
                    if self.chunks.contains_key(&position) {
                        continue;
                    }
                    task_manager.publish_task(Box::new(ChunkGenerationTask::new(
                        self.generator.clone(),
                        self.mesher,
                        position,
                    )));
                }
            }
        }
        task_manager.wait_for_all(self);

        let generated = self.chunks.len() - before;
        info!(
            "Generated {} chunks on {} workers in {:?}",
            generated,
            task_manager.num_workers(),
            start.elapsed()
        );
        generated
    }

    /// Generates the chunk at `position` on the calling thread, if it is not loaded yet.
    ///
    /// # Returns
    /// The chunk, or `None` when `position` lies below the bottom layer.
    pub fn add_chunk_at(&mut self, position: Point3<i32>) -> Option<&Chunk> {
        if position.z < self.bottom_layer {
            debug!("Not generating chunk {:?} below the world floor", position);
            return None;
        }
        let generator = &self.generator;
        let mesher = &self.mesher;
        Some(
            self.chunks
                .entry(position)
                .or_insert_with(|| Chunk::generate(position, generator, mesher)),
        )
    }

    /// Inserts a finished chunk, replacing any chunk at the same position.
    pub fn insert_chunk(&mut self, chunk: Chunk) {
        debug!("Inserting chunk {:?}", chunk.position);
        self.chunks.insert(chunk.position, chunk);
    }

    /// Retrieves the chunk at the specified chunk coordinates.
    pub fn get_chunk_at(&self, position: Point3<i32>) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Splits world block coordinates into chunk coordinates and local coordinates.
    pub fn chunk_position(&self, world: Point3<i32>) -> (Point3<i32>, Point3<i32>) {
        let size = self.config.chunk_size as i32;
        (
            Point3::new(
                world.x.div_euclid(size),
                world.y.div_euclid(size),
                world.z.div_euclid(size),
            ),
            Point3::new(
                world.x.rem_euclid(size),
                world.y.rem_euclid(size),
                world.z.rem_euclid(size),
            ),
        )
    }

    /// The block at world coordinates, Air when its chunk is not loaded.
    pub fn get_block(&self, world: Point3<i32>) -> Block {
        let (chunk, local) = self.chunk_position(world);
        self.get_chunk_at(chunk)
            .map(|chunk| chunk.get_block(local))
            .unwrap_or(Block::AIR)
    }

    /// Edits the block at world coordinates and remeshes its chunk.
    ///
    /// Edits only touch the owning chunk; a chunk that is not loaded reports
    /// [`EditOutcome::OutOfBounds`].
    pub fn modify_voxel(&mut self, world: Point3<i32>, new_type: BlockType) -> EditOutcome {
        let (position, local) = self.chunk_position(world);
        let editor = self.editor;
        match self.chunks.get_mut(&position) {
            Some(chunk) => chunk.modify_voxel(&editor, local, new_type),
            None => EditOutcome::OutOfBounds,
        }
    }

    /// Totals across every loaded chunk.
    pub fn stats(&self) -> WorldStats {
        self.chunks.values().fold(
            WorldStats::default(),
            |mut stats, chunk| {
                stats.chunks += 1;
                stats.land_quads += chunk.quad_count(MeshPass::Land);
                stats.liquid_quads += chunk.quad_count(MeshPass::Liquid);
                stats.decorations += chunk.decorations().len();
                stats
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationMode;

    fn config(mode: GenerationMode) -> TerrainConfig {
        TerrainConfig {
            chunk_size: 8,
            generation_mode: mode,
            ..TerrainConfig::default()
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = World::new(TerrainConfig {
            chunk_size: 0,
            ..TerrainConfig::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn world_coordinates_split_with_floor_division() {
        let world = World::new(config(GenerationMode::Empty)).unwrap();
        assert_eq!(
            world.chunk_position(Point3::new(-1, 8, 15)),
            (Point3::new(-1, 1, 1), Point3::new(7, 0, 7))
        );
    }

    #[test]
    fn parallel_generation_fills_the_cube() {
        let mut world = World::new(config(GenerationMode::Solid)).unwrap();
        let mut task_manager = TaskManager::new(2);
        assert_eq!(world.generate_with(&mut task_manager, 1), 27);
        assert_eq!(world.generate_with(&mut task_manager, 1), 0);
        assert_eq!(task_manager.pending_tasks(), 0);

        let stats = world.stats();
        assert_eq!(stats.chunks, 27);
        assert_eq!(stats.land_quads, 27 * 6);
        assert_eq!(stats.liquid_quads, 0);
    }

    #[test]
    fn edits_route_to_the_owning_chunk() {
        let mut world = World::new(config(GenerationMode::Solid)).unwrap();
        world.add_chunk_at(Point3::new(-1, 0, 0));

        let target = Point3::new(-1, 3, 3);
        let outcome = world.modify_voxel(target, BlockType::Air);
        assert!(outcome.is_modified());
        assert_eq!(world.get_block(target).block_type, BlockType::Air);
        assert_eq!(
            world.get_chunk_at(Point3::new(-1, 0, 0)).map(|chunk| chunk.get_block(Point3::new(7, 3, 3)).block_type),
            Some(BlockType::Air)
        );
        assert_eq!(
            world.modify_voxel(Point3::new(100, 0, 0), BlockType::Stone),
            EditOutcome::OutOfBounds
        );
        assert_eq!(world.get_block(Point3::new(100, 0, 0)), Block::AIR);
    }

    #[test]
    fn nothing_generates_below_the_floor() {
        let mut world = World::new(TerrainConfig {
            draw_distance: 2,
            ..config(GenerationMode::Solid)
        })
        .unwrap();
        assert_eq!(world.bottom_layer(), -2);
        assert_eq!(world.config().bedrock_level, -16);
        assert!(world.add_chunk_at(Point3::new(0, 0, -3)).is_none());
        assert!(world.add_chunk_at(Point3::new(0, 0, -2)).is_some());

        // Asking for more than the configured distance still stops at the floor.
        let mut task_manager = TaskManager::new(2);
        world.generate_with(&mut task_manager, 3);
        assert!(world.chunks().keys().all(|position| position.z >= -2));
        assert_eq!(world.chunks().len(), 7 * 7 * 6);
    }
}
