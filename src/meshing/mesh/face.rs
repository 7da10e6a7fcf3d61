use crate::voxels::block::{Block, BlockSide, BlockType};

use super::MeshPass;

/// One cell of the 2D visibility mask built for a sweep plane.
///
/// A cell either holds no face (`normal == 0`) or the block type that owns the
/// face together with the direction it looks along the sweep axis. Two cells
/// merge into the same quad only if they compare equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    /// Type of the block the face belongs to
    pub block_type: BlockType,
    /// `+1` when the face looks along the sweep axis, `-1` against it, `0` for no face
    pub normal: i8,
}

impl Mask {
    /// The "no face" cell.
    pub const EMPTY: Mask = Mask {
        block_type: BlockType::Null,
        normal: 0,
    };

    /// Decides the face between `current` and the block one step further along the axis.
    ///
    /// A face exists where the two blocks differ in
    /// [`Category`](crate::voxels::block::Category); it belongs to the higher
    /// category. Faces owned by a category the pass does not draw
    /// are dropped here, so an opaque/liquid boundary only ever yields a land face.
    pub fn between(current: &Block, next: &Block, pass: MeshPass) -> Mask {
        let (current_category, next_category) = (current.category(), next.category());
        let (owner, category, normal) = match current_category.cmp(&next_category) {
            std::cmp::Ordering::Equal => return Mask::EMPTY,
            std::cmp::Ordering::Greater => (current, current_category, 1),
            std::cmp::Ordering::Less => (next, next_category, -1),
        };

        if category != pass.category() {
            return Mask::EMPTY;
        }
        Mask {
            block_type: owner.block_type,
            normal,
        }
    }

    /// Whether this cell holds a face.
    pub fn is_face(&self) -> bool {
        self.normal != 0
    }

    /// The block side this face shows when swept along `axis`.
    pub fn side(&self, axis: usize) -> Option<BlockSide> {
        BlockSide::from_normal(axis, self.normal as i32)
    }
}
