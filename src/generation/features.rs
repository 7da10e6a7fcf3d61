//! # Feature Placement Module
//!
//! Trees and flora queued during generation and the biome pass.
//!
//! Positions are collected into a [`FeatureQueue`] while the grid is being
//! filled and are consumed exactly once by [`place_features`] after the pass
//! that produced them has finished.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use crate::voxels::{
    block::{BlockSide, BlockType},
    chunk::VoxelGrid,
};

/// A queued tree: the ground block it grows from and its trunk height.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TreeSite {
    /// Local position of the ground block under the trunk
    pub ground: Point3<i32>,
    /// Number of log blocks in the trunk
    pub trunk_height: i32,
}

/// A flora decoration for the host to dress with a billboard mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationRecord {
    /// Local position of the decoration block
    pub position: [i32; 3],
    /// Decoration block type
    pub block_type: BlockType,
    /// Atlas tile for the decoration
    pub texture_index: u8,
}

/// Transient queues of features waiting to be written into a grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureQueue {
    /// Trees to grow
    pub trees: Vec<TreeSite>,
    /// Flora to place
    pub decorations: Vec<DecorationRecord>,
}

impl FeatureQueue {
    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty() && self.decorations.is_empty()
    }
}

/// Writes a tree into the grid.
///
/// The trunk rises from the block above `site.ground` and is clipped at the
/// top of the grid. The canopy is a stack of diamonds (Manhattan radius
/// `canopy_radius`) from the trunk's top log up to `canopy_radius` levels above
/// it, clipped to grid bounds. Leaves overwrite whatever is there, except the
/// tree's own trunk. Overwritten blocks keep their biome and humidity.
pub fn place_tree(grid: &mut VoxelGrid, site: TreeSite, canopy_radius: i32) {
    let base = site.ground + BlockSide::Up.offset();
    let height = site.trunk_height;

    for level in 0..height {
        grid.set_block_type(Point3::new(base.x, base.y, base.z + level), BlockType::Log);
    }

    for dz in (height - 1)..=(height + canopy_radius) {
        for dx in -canopy_radius..=canopy_radius {
            for dy in -canopy_radius..=canopy_radius {
                if dx.abs() + dy.abs() > canopy_radius {
                    continue;
                }
                if dx == 0 && dy == 0 && dz < height {
                    continue;
                }
                grid.set_block_type(
                    Point3::new(base.x + dx, base.y + dy, base.z + dz),
                    BlockType::Leaves,
                );
            }
        }
    }
}

/// Consumes a queue, growing every tree and placing every decoration.
///
/// Decorations land only on air, so a canopy placed in the same call wins.
///
/// # Returns
/// The decorations that were actually placed.
pub fn place_features(
    grid: &mut VoxelGrid,
    queue: &mut FeatureQueue,
    canopy_radius: i32,
) -> Vec<DecorationRecord> {
    for site in queue.trees.drain(..) {
        place_tree(grid, site, canopy_radius);
    }

    let mut placed = Vec::new();
    for record in queue.decorations.drain(..) {
        let position = Point3::from(record.position);
        let Some(slot) = grid.get_mut(position) else {
            continue;
        };
        if slot.block_type != BlockType::Air {
            continue;
        }
        *slot = slot.with_type(record.block_type);
        placed.push(record);
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: usize) -> VoxelGrid {
        VoxelGrid::new(size, Point3::new(0, 0, 0))
    }

    #[test]
    fn tree_has_trunk_and_diamond_canopy() {
        let mut grid = grid(16);
        grid.set_block_type(Point3::new(8, 8, 2), BlockType::Dirt);
        place_tree(&mut grid, TreeSite { ground: Point3::new(8, 8, 2), trunk_height: 5 }, 2);

        assert_eq!(grid.block_type(Point3::new(8, 8, 2)), BlockType::Dirt);
        for z in 3..8 {
            assert_eq!(grid.block_type(Point3::new(8, 8, z)), BlockType::Log, "z = {}", z);
        }
        // Diamond of radius 2 has 13 cells; the lowest canopy level surrounds the top log.
        assert_eq!(grid.count(BlockType::Log), 5);
        assert_eq!(grid.count(BlockType::Leaves), 12 + 13 * 3);
        assert_eq!(grid.block_type(Point3::new(10, 8, 8)), BlockType::Leaves);
        assert_eq!(grid.block_type(Point3::new(10, 9, 8)), BlockType::Air);
        assert!(grid.get_block(8, 8, 10).is_solid);
    }

    #[test]
    fn tree_is_clipped_to_grid() {
        let mut tall = grid(6);
        place_tree(&mut tall, TreeSite { ground: Point3::new(0, 0, 3), trunk_height: 5 }, 2);
        assert_eq!(tall.count(BlockType::Log), 2);
        assert_eq!(tall.count(BlockType::Leaves), 0);

        // Corner tree: only the quarter diamond with x, y >= 0 fits, and only z = 4 and 5.
        let mut corner = grid(6);
        place_tree(&mut corner, TreeSite { ground: Point3::new(0, 0, 0), trunk_height: 4 }, 2);
        assert_eq!(corner.count(BlockType::Log), 4);
        assert_eq!(corner.count(BlockType::Leaves), 5 + 6);
        assert_eq!(corner.blocks().len(), 216);
    }

    #[test]
    fn decorations_only_replace_air() {
        let mut grid = grid(4);
        grid.set_block_type(Point3::new(1, 1, 1), BlockType::Stone);
        let mut queue = FeatureQueue::default();
        for position in [[1, 1, 1], [1, 1, 2], [9, 9, 9]] {
            queue.decorations.push(DecorationRecord {
                position,
                block_type: BlockType::ShortGrass,
                texture_index: 15,
            });
        }
        let placed = place_features(&mut grid, &mut queue, 2);
        assert!(queue.is_empty());
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].position, [1, 1, 2]);
        assert_eq!(grid.block_type(Point3::new(1, 1, 1)), BlockType::Stone);
        let flora = grid.get_block(1, 1, 2);
        assert_eq!(flora.block_type, BlockType::ShortGrass);
        assert!(!flora.is_solid);
    }
}
