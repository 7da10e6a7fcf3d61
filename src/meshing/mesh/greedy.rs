//! Greedy meshing implementation for voxel chunks.
//!
//! This module implements the greedy meshing algorithm which combines adjacent coplanar
//! faces with the same block type and facing into larger quads, significantly reducing
//! the number of vertices a renderer has to process.
//!
//! For each of the three axes a plane sweeps from `-1` to `N - 1`. At every
//! plane position a 2D mask records, for each cell, the face (if any) between
//! the voxel on the plane and its neighbor one step further along the axis.
//! The mask is then scanned row-major and each unconsumed face grows into the
//! largest rectangle of identical cells, first along the row and then row by
//! row, before being emitted as one quad.

use log::debug;
use web_time::Instant;

use crate::voxels::chunk::VoxelGrid;

use super::{
    face::Mask,
    mesh::{ChunkMeshData, ChunkMeshes},
    MeshPass, MeshSelection,
};

/// Builds minimal-quad meshes from voxel grids.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GreedyMesher {
    block_scale: f32,
}

impl Default for GreedyMesher {
    fn default() -> Self {
        GreedyMesher::new(super::DEFAULT_BLOCK_SCALE)
    }
}

impl GreedyMesher {
    /// Creates a mesher emitting `block_scale` world units per block edge.
    pub fn new(block_scale: f32) -> Self {
        GreedyMesher { block_scale }
    }

    /// World units per block edge.
    pub fn block_scale(&self) -> f32 {
        self.block_scale
    }

    /// Meshes one visibility class of a grid.
    ///
    /// # Arguments
    /// * `grid` - The populated voxel grid; reads outside it are air
    /// * `pass` - Which class of faces to emit
    ///
    /// # Returns
    /// A fresh mesh holding only faces owned by blocks of the pass's category.
    pub fn build_mesh(&self, grid: &VoxelGrid, pass: MeshPass) -> ChunkMeshData {
        let mut mesh = ChunkMeshData::new();
        self.build_into(grid, pass, &mut mesh);
        mesh
    }

    /// Builds both meshes of a grid.
    pub fn build_all(&self, grid: &VoxelGrid) -> ChunkMeshes {
        let mut meshes = ChunkMeshes::default();
        self.rebuild(grid, &mut meshes, MeshSelection::ALL);
        meshes
    }

    /// Clears and rebuilds the selected meshes from scratch.
    ///
    /// Greedy merging is not local, so a selected mesh is never patched.
    pub fn rebuild(&self, grid: &VoxelGrid, meshes: &mut ChunkMeshes, selection: MeshSelection) {
        for pass in selection.passes() {
            self.build_into(grid, pass, meshes.get_mut(pass));
        }
    }

    /// Clears `mesh` and rebuilds it from scratch.
    pub fn build_into(&self, grid: &VoxelGrid, pass: MeshPass, mesh: &mut ChunkMeshData) {
        let start = Instant::now();
        mesh.clear();

        let size = grid.size() as i32;
        let n = grid.size();
        let mut mask = vec![Mask::EMPTY; n * n];

        for axis in 0..3 {
            let axis1 = (axis + 1) % 3;
            let axis2 = (axis + 2) % 3;
            let mut step = [0; 3];
            step[axis] = 1;

            let mut itr = [0i32; 3];
            itr[axis] = -1;

            while itr[axis] < size {
                let mut index = 0;
                itr[axis2] = 0;
                while itr[axis2] < size {
                    itr[axis1] = 0;
                    while itr[axis1] < size {
                        let current = grid.get_block(itr[0], itr[1], itr[2]);
                        let next =
                            grid.get_block(itr[0] + step[0], itr[1] + step[1], itr[2] + step[2]);
                        mask[index] = Mask::between(&current, &next, pass);
                        index += 1;
                        itr[axis1] += 1;
                    }
                    itr[axis2] += 1;
                }

                // Faces sit on the boundary plane between the two compared layers.
                itr[axis] += 1;

                let mut index = 0;
                for j in 0..n {
                    let mut i = 0;
                    while i < n {
                        let cell = mask[index];
                        if !cell.is_face() {
                            i += 1;
                            index += 1;
                            continue;
                        }

                        let mut width = 1;
                        while i + width < n && mask[index + width] == cell {
                            width += 1;
                        }

                        let mut height = 1;
                        'rows: while j + height < n {
                            for k in 0..width {
                                if mask[index + k + height * n] != cell {
                                    break 'rows;
                                }
                            }
                            height += 1;
                        }

                        itr[axis1] = i as i32;
                        itr[axis2] = j as i32;
                        mesh.push_quad(
                            cell,
                            axis,
                            itr,
                            width as i32,
                            height as i32,
                            self.block_scale,
                        );

                        for l in 0..height {
                            for k in 0..width {
                                mask[index + k + l * n] = Mask::EMPTY;
                            }
                        }

                        i += width;
                        index += width;
                    }
                }
            }
        }

        debug!(
            "Built {:?} mesh for chunk at {:?}: {} quads, {} vertices in {:?}",
            pass,
            grid.origin(),
            mesh.quad_count(),
            mesh.vertices.len(),
            start.elapsed()
        );
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::voxels::block::BlockType;

    #[test]
    fn single_block_has_six_quads() {
        let mut grid = VoxelGrid::new(4, Point3::new(0, 0, 0));
        grid.set_block_type(Point3::new(1, 2, 3), BlockType::Log);
        let mesh = GreedyMesher::new(1.0).build_mesh(&grid, MeshPass::Land);
        assert_eq!(mesh.quad_count(), 6);
        assert_eq!(mesh.face_area(1.0), 6.0);
        assert!(GreedyMesher::new(1.0).build_mesh(&grid, MeshPass::Liquid).is_empty());
    }

    #[test]
    fn mixed_types_split_quads() {
        let mut grid = VoxelGrid::new(4, Point3::new(0, 0, 0));
        for x in 0..4 {
            for y in 0..4 {
                let block_type = if x < 2 { BlockType::Stone } else { BlockType::Dirt };
                grid.set_block_type(Point3::new(x, y, 0), block_type);
            }
        }
        let mesh = GreedyMesher::new(1.0).build_mesh(&grid, MeshPass::Land);
        // Top and bottom split in two; each side is a single type except the
        // two sides running across the seam.
        assert_eq!(mesh.quad_count(), 2 + 2 + 2 + 4);
        assert_eq!(mesh.face_area(1.0), 16.0 * 2.0 + 4.0 * 4.0);
    }

    #[test]
    fn rebuild_replaces_previous_geometry() {
        let mut grid = VoxelGrid::new(2, Point3::new(0, 0, 0));
        grid.set_block_type(Point3::new(0, 0, 0), BlockType::Stone);
        let mesher = GreedyMesher::default();
        let mut mesh = mesher.build_mesh(&grid, MeshPass::Land);
        mesher.build_into(&grid, MeshPass::Land, &mut mesh);
        assert_eq!(mesh.quad_count(), 6);
    }
}
