//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world and
//! the per-type properties the generator and mesher rely on: default
//! solidity, mining hardness and visibility category.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The `FromPrimitive` derive allows conversion from the compact
/// [`BlockTypeSize`] id, see [`BlockType::from_raw`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    /// Mask placeholder meaning "no face". Never produces geometry.
    Null = 0,
    /// Empty space.
    Air,
    /// Indestructible chunk floor.
    Bedrock,
    /// Deep terrain.
    Stone,
    /// Sub-surface soil.
    Dirt,
    /// Soil baked dry by a desert climate.
    DryDirt,
    /// Surface soil, with a distinct top texture.
    Grass,
    /// Beach and desert surface.
    Sand,
    /// Wet shoreline below the sand band.
    Gravel,
    /// Tree trunk.
    Log,
    /// Tree canopy.
    Leaves,
    /// Water near the floor of a water column.
    ShallowWater,
    /// Water above the shallow band.
    DeepWater,
    /// Frozen water surface.
    Ice,
    /// Swamp biome surface.
    Swamp,
    /// Tundra biome surface.
    Tundra,
    /// Flora decoration; never meshed.
    ShortGrass,
}

/// How a block takes part in face visibility during meshing.
///
/// Categories are ordered: a face between two different categories always
/// belongs to the higher one, so land faces win over water faces at shorelines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Air, null and non-solid decorations.
    Empty,
    /// Water of any depth.
    Liquid,
    /// Solid terrain, trees and ice.
    Opaque,
}

impl BlockType {
    /// Decodes a compact block id.
    ///
    /// # Returns
    /// `None` if the id does not name a block type.
    pub fn from_raw(id: BlockTypeSize) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(id)
    }

    /// Whether this type is a liquid.
    pub fn is_liquid(self) -> bool {
        matches!(self, BlockType::ShallowWater | BlockType::DeepWater)
    }

    /// Whether this type is empty space (air or the null placeholder).
    pub fn is_air(self) -> bool {
        matches!(self, BlockType::Air | BlockType::Null)
    }

    /// The solidity a freshly placed block of this type has.
    ///
    /// Air, liquids and decorations are never solid.
    pub fn is_solid_by_default(self) -> bool {
        !(self.is_air() || self.is_liquid() || self == BlockType::ShortGrass)
    }

    /// Mining resistance. Bedrock is the hardest type and leaves the softest
    /// solid one; non-solid types have no resistance.
    pub fn hardness(self) -> f32 {
        match self {
            BlockType::Bedrock => 1.0,
            BlockType::Stone => 0.5,
            BlockType::Ice => 0.4,
            BlockType::Log => 0.3,
            BlockType::Tundra => 0.3,
            BlockType::Gravel => 0.25,
            BlockType::Dirt | BlockType::DryDirt | BlockType::Grass | BlockType::Swamp => 0.2,
            BlockType::Sand => 0.15,
            BlockType::Leaves => 0.1,
            BlockType::Null
            | BlockType::Air
            | BlockType::ShallowWater
            | BlockType::DeepWater
            | BlockType::ShortGrass => 0.0,
        }
    }
}

impl TryFrom<BlockTypeSize> for BlockType {
    type Error = TerrainError;

    fn try_from(value: BlockTypeSize) -> Result<Self, Self::Error> {
        BlockType::from_raw(value).ok_or(TerrainError::UnknownBlockType(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BlockType; 17] = [
        BlockType::Null,
        BlockType::Air,
        BlockType::Bedrock,
        BlockType::Stone,
        BlockType::Dirt,
        BlockType::DryDirt,
        BlockType::Grass,
        BlockType::Sand,
        BlockType::Gravel,
        BlockType::Log,
        BlockType::Leaves,
        BlockType::ShallowWater,
        BlockType::DeepWater,
        BlockType::Ice,
        BlockType::Swamp,
        BlockType::Tundra,
        BlockType::ShortGrass,
    ];

    #[test]
    fn bedrock_is_hardest_and_leaves_softest_solid() {
        for block_type in ALL {
            assert!(block_type.hardness() <= BlockType::Bedrock.hardness());
            if block_type.is_solid_by_default() {
                assert!(block_type.hardness() >= BlockType::Leaves.hardness());
            }
        }
    }

    #[test]
    fn air_and_liquids_are_never_solid() {
        for block_type in ALL {
            if block_type.is_air() || block_type.is_liquid() {
                assert!(!block_type.is_solid_by_default(), "{:?}", block_type);
            }
        }
    }

    #[test]
    fn raw_ids_decode() {
        for block_type in ALL {
            assert_eq!(BlockType::from_raw(block_type as BlockTypeSize), Some(block_type));
        }
        assert_eq!(BlockType::from_raw(200), None);
        assert!(matches!(
            BlockType::try_from(200),
            Err(TerrainError::UnknownBlockType(200))
        ));
    }
}
