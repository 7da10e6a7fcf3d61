//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, biome ids, the
//! per-voxel `Block` record and the texture atlas lookup used by the mesher.

use serde::{Deserialize, Serialize};

pub mod biome;
pub mod block_side;
pub mod block_type;

pub use biome::Biome;
pub use block_side::BlockSide;
pub use block_type::{BlockType, Category};

/// The underlying integer type used to represent block types at API boundaries.
pub type BlockTypeSize = u8;

/// Texture index reported for block types that have no atlas tile.
pub const NO_TEXTURE: u8 = 255;

/// Humidity a block has before the biome pass assigns one.
pub const DEFAULT_HUMIDITY: f32 = 0.5;

/// Represents a single voxel block in a chunk.
///
/// Solidity and hardness are seeded from the block type when the block is
/// created or retyped, but are stored per block so generation passes can
/// override them (decorations, for instance, are never solid).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// The type of this block.
    pub block_type: BlockType,
    /// Whether the block occludes its neighbors.
    pub is_solid: bool,
    /// Mining resistance.
    pub hardness: f32,
    /// Biome assigned by the biome pass.
    pub biome: Biome,
    /// Humidity in `[0, 1]` assigned by the biome pass.
    pub humidity: f32,
}

impl Block {
    /// The block returned for every out-of-range lookup.
    pub const AIR: Block = Block {
        block_type: BlockType::Air,
        is_solid: false,
        hardness: 0.0,
        biome: Biome::Null,
        humidity: DEFAULT_HUMIDITY,
    };

    /// Creates a new block of the specified type with type-default properties.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type,
            is_solid: block_type.is_solid_by_default(),
            hardness: block_type.hardness(),
            ..Block::AIR
        }
    }

    /// Returns this block retyped, keeping its biome and humidity.
    ///
    /// Solidity and hardness are reset to the new type's defaults so a retype
    /// can never leave a liquid or air block marked solid.
    pub fn with_type(self, block_type: BlockType) -> Self {
        Block {
            block_type,
            is_solid: block_type.is_solid_by_default(),
            hardness: block_type.hardness(),
            ..self
        }
    }

    /// Visibility category used by the mesher.
    ///
    /// Liquids are classified by type. Everything else is opaque only when it
    /// is solid and not air, so non-solid decorations never produce faces.
    pub fn category(&self) -> Category {
        if self.block_type.is_liquid() {
            Category::Liquid
        } else if self.is_solid && !self.block_type.is_air() {
            Category::Opaque
        } else {
            Category::Empty
        }
    }

    /// Gets the atlas texture index for one face of a block type.
    ///
    /// Grass and swamp blocks show a distinct tile on their upward face.
    pub fn texture_index(block_type: BlockType, side: BlockSide) -> u8 {
        match block_type {
            BlockType::Grass => {
                if side == BlockSide::Up {
                    0
                } else {
                    1
                }
            }
            BlockType::Dirt => 2,
            BlockType::Stone => 3,
            BlockType::Bedrock => 4,
            BlockType::Log => 5,
            BlockType::Leaves => 6,
            BlockType::Sand => 7,
            BlockType::Gravel => 8,
            BlockType::ShallowWater => 9,
            BlockType::DeepWater => 10,
            BlockType::Ice => 11,
            BlockType::Swamp => {
                if side == BlockSide::Up {
                    12
                } else {
                    2
                }
            }
            BlockType::Tundra => 13,
            BlockType::DryDirt => 14,
            BlockType::ShortGrass => 15,
            BlockType::Null | BlockType::Air => NO_TEXTURE,
        }
    }

    /// Texture index lookup keyed by a raw block id.
    ///
    /// # Returns
    /// [`NO_TEXTURE`] when the id does not name a block type.
    pub fn texture_index_from_raw(btype_int: BlockTypeSize, side: BlockSide) -> u8 {
        BlockType::from_raw(btype_int)
            .map(|block_type| Block::texture_index(block_type, side))
            .unwrap_or(NO_TEXTURE)
    }

    /// Hardness lookup keyed by a raw block id, `0.0` for unknown ids.
    pub fn hardness_from_raw(btype_int: BlockTypeSize) -> f32 {
        BlockType::from_raw(btype_int)
            .map(BlockType::hardness)
            .unwrap_or(0.0)
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::AIR
    }
}
