//! # Meshing Module
//!
//! Turns voxel grids into geometry a renderer can draw.
//!
//! * `mesh` - Greedy and per-face meshers and the mesh buffers they fill
//! * `vertex` - The interleaved upload format

pub mod mesh;
pub mod vertex;

pub use mesh::{ChunkMeshData, ChunkMeshes, GreedyMesher, MeshPass, MeshSelection};
pub use vertex::MeshVertex;

use crate::voxels::chunk::VoxelGrid;

/// Greedy-meshes a grid at the default block scale.
///
/// # Arguments
/// * `grid` - The populated voxel grid
/// * `is_land_pass` - `true` for opaque geometry, `false` for water
pub fn build_mesh(grid: &VoxelGrid, is_land_pass: bool) -> ChunkMeshData {
    GreedyMesher::default().build_mesh(grid, MeshPass::from(is_land_pass))
}
