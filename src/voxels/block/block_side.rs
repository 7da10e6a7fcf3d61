//! # Block Side Module
//!
//! This module defines the six faces/sides of a voxel block and the unit
//! offsets that lead from a block to its neighbor across each face.
//!
//! Z is the vertical axis. Side ids follow the order
//! `[Forward, Right, Back, Left, Up, Down]`.

use cgmath::Vector3;

use crate::error::TerrainError;

/// Represents the six possible faces of a voxel block.
///
/// Each variant is assigned a fixed integer id so that sides can cross an
/// API boundary as plain integers. Converting an out-of-range id back is
/// rejected rather than defaulted, see [`BlockSide::try_from`].
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
#[repr(u8)]
pub enum BlockSide {
    /// Facing positive X
    Forward = 0,

    /// Facing positive Y
    Right = 1,

    /// Facing negative X
    Back = 2,

    /// Facing negative Y
    Left = 3,

    /// Facing positive Z (up)
    Up = 4,

    /// Facing negative Z (down)
    Down = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in id order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::Forward,
            BlockSide::Right,
            BlockSide::Back,
            BlockSide::Left,
            BlockSide::Up,
            BlockSide::Down,
        ]
    }

    /// The integer step from a block to its neighbor across this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::Forward => Vector3::new(1, 0, 0),
            BlockSide::Right => Vector3::new(0, 1, 0),
            BlockSide::Back => Vector3::new(-1, 0, 0),
            BlockSide::Left => Vector3::new(0, -1, 0),
            BlockSide::Up => Vector3::new(0, 0, 1),
            BlockSide::Down => Vector3::new(0, 0, -1),
        }
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        let offset = self.offset();
        Vector3::new(offset.x as f32, offset.y as f32, offset.z as f32)
    }

    /// The face pointing the other way along the same axis.
    pub fn opposite(self) -> BlockSide {
        match self {
            BlockSide::Forward => BlockSide::Back,
            BlockSide::Right => BlockSide::Left,
            BlockSide::Back => BlockSide::Forward,
            BlockSide::Left => BlockSide::Right,
            BlockSide::Up => BlockSide::Down,
            BlockSide::Down => BlockSide::Up,
        }
    }

    /// The principal axis (0 = X, 1 = Y, 2 = Z) this face is perpendicular to.
    pub fn axis(self) -> usize {
        match self {
            BlockSide::Forward | BlockSide::Back => 0,
            BlockSide::Right | BlockSide::Left => 1,
            BlockSide::Up | BlockSide::Down => 2,
        }
    }

    /// Resolves a face from a sweep axis and a normal sign.
    ///
    /// # Arguments
    /// * `axis` - The principal axis, 0 = X, 1 = Y, 2 = Z
    /// * `sign` - Positive for the face looking along the axis, negative otherwise
    ///
    /// # Returns
    /// `None` if `axis` is not a principal axis or `sign` is zero.
    pub fn from_normal(axis: usize, sign: i32) -> Option<BlockSide> {
        match (axis, sign.signum()) {
            (0, 1) => Some(BlockSide::Forward),
            (0, -1) => Some(BlockSide::Back),
            (1, 1) => Some(BlockSide::Right),
            (1, -1) => Some(BlockSide::Left),
            (2, 1) => Some(BlockSide::Up),
            (2, -1) => Some(BlockSide::Down),
            _ => None,
        }
    }
}

impl TryFrom<u8> for BlockSide {
    type Error = TerrainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        BlockSide::all()
            .get(value as usize)
            .copied()
            .ok_or(TerrainError::InvalidDirection(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_u8() {
        for side in BlockSide::all() {
            assert_eq!(BlockSide::try_from(side as u8).unwrap(), side);
        }
    }

    #[test]
    fn out_of_range_id_is_rejected() {
        match BlockSide::try_from(6) {
            Err(TerrainError::InvalidDirection(6)) => {}
            other => panic!("expected InvalidDirection, got {:?}", other),
        }
    }

    #[test]
    fn opposite_offsets_cancel() {
        for side in BlockSide::all() {
            assert_eq!(side.offset() + side.opposite().offset(), Vector3::new(0, 0, 0));
            assert_eq!(side.opposite().axis(), side.axis());
        }
    }

    #[test]
    fn from_normal_matches_offset() {
        for side in BlockSide::all() {
            let offset = side.offset();
            let sign = offset.x + offset.y + offset.z;
            assert_eq!(BlockSide::from_normal(side.axis(), sign), Some(side));
        }
        assert_eq!(BlockSide::from_normal(1, 0), None);
        assert_eq!(BlockSide::from_normal(3, 1), None);
    }
}
