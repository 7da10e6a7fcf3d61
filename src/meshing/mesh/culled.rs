//! Per-face mesher.
//!
//! Emits one unit quad for every visible block face without merging. It shares
//! the face rule and the quad layout with [`GreedyMesher`](super::GreedyMesher),
//! which makes it the reference the greedy output is measured against: both
//! cover exactly the same face area, and greedy never needs more quads.

use crate::voxels::{block::BlockSide, chunk::VoxelGrid};

use super::{face::Mask, mesh::ChunkMeshData, MeshPass};

/// Builds a mesh with one quad per visible face.
pub fn culled_mesh(grid: &VoxelGrid, pass: MeshPass, block_scale: f32) -> ChunkMeshData {
    let mut mesh = ChunkMeshData::new();

    for (position, block) in grid.iter() {
        if block.category() != pass.category() {
            continue;
        }
        for side in BlockSide::all() {
            let neighbor = grid.get(position + side.offset());
            let mask = match side.offset()[side.axis()] {
                1 => Mask::between(block, &neighbor, pass),
                _ => Mask::between(&neighbor, block, pass),
            };
            if !mask.is_face() {
                continue;
            }

            // The quad lies on the far plane for positive faces.
            let axis = side.axis();
            let mut origin: [i32; 3] = position.into();
            if mask.normal > 0 {
                origin[axis] += 1;
            }
            mesh.push_quad(mask, axis, origin, 1, 1, block_scale);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::voxels::block::BlockType;

    #[test]
    fn two_blocks_share_no_face() {
        let mut grid = VoxelGrid::new(3, Point3::new(0, 0, 0));
        grid.set_block_type(Point3::new(0, 0, 0), BlockType::Stone);
        grid.set_block_type(Point3::new(1, 0, 0), BlockType::Stone);
        let mesh = culled_mesh(&grid, MeshPass::Land, 1.0);
        assert_eq!(mesh.quad_count(), 10);
    }

    #[test]
    fn water_under_land_is_hidden() {
        let mut grid = VoxelGrid::new(3, Point3::new(0, 0, 0));
        grid.set_block_type(Point3::new(1, 1, 0), BlockType::ShallowWater);
        grid.set_block_type(Point3::new(1, 1, 1), BlockType::Sand);
        let water = culled_mesh(&grid, MeshPass::Liquid, 1.0);
        let land = culled_mesh(&grid, MeshPass::Land, 1.0);
        assert_eq!(water.quad_count(), 5);
        assert_eq!(land.quad_count(), 6);
    }
}
