//! # Voxel Module
//!
//! This module contains the voxel data model of the terrain engine.
//!
//! ## Architecture
//!
//! * **Block**: Block types, faces, biomes and the per-voxel record
//! * **Chunk**: The `VoxelGrid` and the `Chunk` that pairs it with its meshes
//! * **World**: A sparse map of chunks addressed in world block coordinates
//! * **Tasks**: Chunk generation on the worker pool
//!
//! ## Data Flow
//!
//! 1. The world publishes one generation task per missing chunk
//! 2. Workers generate, decorate and mesh chunks independently
//! 3. Finished chunks are inserted by the thread that owns the world
//! 4. Edits go through the world to the owning chunk, which remeshes in place

pub mod block;
pub mod chunk;
pub mod tasks;
pub mod world;
