//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask`, which generates, decorates
//! and meshes one chunk on a worker thread. The finished chunk travels back in
//! a `ChunkGenerationTaskResult` and is inserted into the world by the thread
//! that owns it.

use std::sync::Arc;

use cgmath::Point3;
use log::trace;

use crate::{
    generation::TerrainGenerator,
    meshing::GreedyMesher,
    task_management::task::{Task, TaskResult},
    voxels::{chunk::Chunk, world::World},
};

/// A task that builds one chunk.
pub struct ChunkGenerationTask {
    /// Shared, read-only generator
    generator: Arc<TerrainGenerator>,
    mesher: GreedyMesher,
    /// The position of the chunk to generate (in chunk coordinates)
    position: Point3<i32>,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task.
    ///
    /// # Arguments
    /// * `generator` - The generator every chunk of the world shares
    /// * `mesher` - Mesher for the chunk's initial meshes
    /// * `position` - The chunk coordinates where the chunk should be generated
    pub fn new(generator: Arc<TerrainGenerator>, mesher: GreedyMesher, position: Point3<i32>) -> Self {
        ChunkGenerationTask {
            generator,
            mesher,
            position,
        }
    }
}

impl Task for ChunkGenerationTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        trace!("Generating chunk {:?}", self.position);
        Box::new(ChunkGenerationTaskResult {
            chunk: Chunk::generate(self.position, &self.generator, &self.mesher),
        })
    }
}

/// The result of a chunk generation task.
pub struct ChunkGenerationTaskResult {
    chunk: Chunk,
}

impl TaskResult for ChunkGenerationTaskResult {
    /// Inserts the finished chunk into the world. No follow-up work is needed
    /// because the chunk arrives already meshed.
    fn handle_result(self: Box<Self>, world: &mut World) -> Vec<Box<dyn Task + Send>> {
        world.insert_chunk(self.chunk);
        Vec::new()
    }
}
