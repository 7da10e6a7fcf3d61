//! Mesh generation for voxel chunks.
//!
//! This module converts populated voxel grids into triangle meshes. It implements
//! greedy meshing to reduce the number of vertices and faces by combining coplanar
//! faces with the same block type, and keeps a per-face mesher as a reference.
//!
//! # Architecture
//! - [`ChunkMeshData`]: Parallel vertex, index, normal, UV and color buffers
//! - [`Mask`]: The per-cell face tag built for each sweep plane
//! - [`GreedyMesher`]: Merges mask cells into maximal rectangles
//! - [`culled_mesh`]: One quad per visible face
//!
//! Land and liquid geometry are built in separate passes into separate meshes,
//! so a renderer can draw water with its own material.
//!
//! # Usage
//! ```no_run
//! use cgmath::Point3;
//! use voxel_terrain::meshing::mesh::{GreedyMesher, MeshPass};
//! use voxel_terrain::voxels::chunk::VoxelGrid;
//!
//! let grid = VoxelGrid::new(32, Point3::new(0, 0, 0));
//! let land = GreedyMesher::default().build_mesh(&grid, MeshPass::Land);
//! ```

mod culled;
mod face;
mod greedy;
mod mesh;

pub use culled::culled_mesh;
pub use face::Mask;
pub use greedy::GreedyMesher;
pub use mesh::*;

use crate::voxels::block::Category;

/// World units per block edge when nothing else is configured.
pub const DEFAULT_BLOCK_SCALE: f32 = 100.0;

/// Which visibility class a mesh build emits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MeshPass {
    /// Faces of opaque blocks
    Land,
    /// Faces of liquid blocks
    Liquid,
}

impl MeshPass {
    /// Both passes, land first.
    pub fn all() -> [MeshPass; 2] {
        [MeshPass::Land, MeshPass::Liquid]
    }

    /// The block category whose faces this pass keeps.
    pub fn category(self) -> Category {
        match self {
            MeshPass::Land => Category::Opaque,
            MeshPass::Liquid => Category::Liquid,
        }
    }
}

impl From<bool> for MeshPass {
    /// `true` selects the land pass.
    fn from(is_land_pass: bool) -> Self {
        if is_land_pass {
            MeshPass::Land
        } else {
            MeshPass::Liquid
        }
    }
}

/// A subset of a chunk's two meshes, used to rebuild only what an edit touched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshSelection {
    /// Whether the land mesh is selected
    pub land: bool,
    /// Whether the liquid mesh is selected
    pub liquid: bool,
}

impl MeshSelection {
    /// Neither mesh.
    pub const NONE: MeshSelection = MeshSelection {
        land: false,
        liquid: false,
    };

    /// Both meshes.
    pub const ALL: MeshSelection = MeshSelection {
        land: true,
        liquid: true,
    };

    /// Whether the mesh built by `pass` is selected.
    pub fn contains(self, pass: MeshPass) -> bool {
        match pass {
            MeshPass::Land => self.land,
            MeshPass::Liquid => self.liquid,
        }
    }

    /// Whether no mesh is selected.
    pub fn is_empty(self) -> bool {
        !(self.land || self.liquid)
    }

    /// The selected passes, land first.
    pub fn passes(self) -> impl Iterator<Item = MeshPass> {
        MeshPass::all().into_iter().filter(move |pass| self.contains(*pass))
    }
}
