//! # Voxel Grid Module
//!
//! Dense storage of one chunk's blocks.
//!
//! The grid is a flat `Vec<Block>` of `N³` entries laid out x-fastest, then y,
//! then z (Z is up):
//!
//! ```text
//! index = z * N * N + y * N + x
//! ```
//!
//! Every lookup is bounds-checked. Reads outside `[0, N)³` return
//! [`Block::AIR`], which is what lets the mesher treat chunk borders as facing
//! air without knowing about neighboring chunks.

use cgmath::{Point3, Vector3};

use crate::voxels::block::{Block, BlockType};

/// The blocks of one chunk plus the world-space position of its `(0, 0, 0)` corner.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    size: usize,
    origin: Point3<i32>,
    blocks: Vec<Block>,
}

impl VoxelGrid {
    /// Creates an all-air grid of edge length `size`.
    ///
    /// # Arguments
    /// * `size` - Edge length N of the cubic grid
    /// * `origin` - World block coordinates of the grid's local origin
    pub fn new(size: usize, origin: Point3<i32>) -> Self {
        VoxelGrid {
            size,
            origin,
            blocks: vec![Block::AIR; size * size * size],
        }
    }

    /// Edge length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// World block coordinates of local `(0, 0, 0)`.
    pub fn origin(&self) -> Point3<i32> {
        self.origin
    }

    /// Flat slice of every block in index order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Flattens in-range local coordinates into an index.
    ///
    /// # Returns
    /// `None` if any coordinate lies outside `[0, N)`.
    pub fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if self.in_bounds(x, y, z) {
            let n = self.size;
            Some(z as usize * n * n + y as usize * n + x as usize)
        } else {
            None
        }
    }

    /// Whether the local coordinates lie inside the grid.
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        let n = self.size as i64;
        (0..n).contains(&(x as i64)) && (0..n).contains(&(y as i64)) && (0..n).contains(&(z as i64))
    }

    /// Gets the block at the local coordinates, or [`Block::AIR`] when out of range.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Block {
        self.index(x, y, z)
            .map(|index| self.blocks[index])
            .unwrap_or(Block::AIR)
    }

    /// Point-based variant of [`VoxelGrid::get_block`].
    pub fn get(&self, position: Point3<i32>) -> Block {
        self.get_block(position.x, position.y, position.z)
    }

    /// The type of the block at `position`, Air when out of range.
    pub fn block_type(&self, position: Point3<i32>) -> BlockType {
        self.get(position).block_type
    }

    /// Mutable access to an in-range block.
    pub fn get_mut(&mut self, position: Point3<i32>) -> Option<&mut Block> {
        let index = self.index(position.x, position.y, position.z)?;
        Some(&mut self.blocks[index])
    }

    /// Overwrites the block at `position`.
    ///
    /// # Returns
    /// `false` (and does nothing) when `position` is out of range.
    pub fn set_block(&mut self, position: Point3<i32>, block: Block) -> bool {
        match self.get_mut(position) {
            Some(slot) => {
                *slot = block;
                true
            }
            None => false,
        }
    }

    /// Retypes the block at `position`, keeping its biome and humidity.
    ///
    /// # Returns
    /// `false` (and does nothing) when `position` is out of range.
    pub fn set_block_type(&mut self, position: Point3<i32>, block_type: BlockType) -> bool {
        match self.get_mut(position) {
            Some(slot) => {
                *slot = slot.with_type(block_type);
                true
            }
            None => false,
        }
    }

    /// Converts local coordinates to world block coordinates.
    pub fn to_world(&self, local: Point3<i32>) -> Point3<i32> {
        self.origin + Vector3::new(local.x, local.y, local.z)
    }

    /// Iterates over every block with its local position, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Point3<i32>, &Block)> + '_ {
        let n = self.size;
        self.blocks.iter().enumerate().map(move |(index, block)| {
            let x = index % n;
            let y = (index / n) % n;
            let z = index / (n * n);
            (Point3::new(x as i32, y as i32, z as i32), block)
        })
    }

    /// Number of blocks of the given type.
    pub fn count(&self, block_type: BlockType) -> usize {
        self.blocks
            .iter()
            .filter(|block| block.block_type == block_type)
            .count()
    }
}
