//! # Voxel Task System
//!
//! Tasks that generate world content off the owning thread.

pub mod chunk_generation_task;

pub use chunk_generation_task::{ChunkGenerationTask, ChunkGenerationTaskResult};
