//! # Editing Module
//!
//! Runtime voxel edits with mesh regeneration.
//!
//! An edit writes one block and then rebuilds, from scratch, every mesh the
//! write can have changed. Greedy merging is not local (one changed voxel can
//! move merge boundaries anywhere along its rows), so a mesh is either left
//! untouched or rebuilt whole, never patched.
//!
//! A mesh can only change if a face on one of the six boundaries around the
//! edited voxel changes, and a face only exists where one side belongs to the
//! mesh's category. So the land mesh is rebuilt iff the voxel or a neighbor is
//! opaque before or after the write, and the liquid mesh likewise for liquids.

use cgmath::Point3;
use log::{debug, trace};

use crate::{
    config::TerrainConfig,
    meshing::{ChunkMeshes, GreedyMesher, MeshSelection},
    voxels::{
        block::{BlockSide, BlockType, Category},
        chunk::VoxelGrid,
    },
};

/// What a call to [`VoxelEditor::modify_voxel`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The position lies outside the grid; nothing changed.
    OutOfBounds,
    /// The block already had the requested type, or water refilled it; nothing changed.
    Unchanged,
    /// The block was rewritten.
    Modified {
        /// Type the block had before the edit
        previous: BlockType,
        /// Meshes that were rebuilt
        rebuilt: MeshSelection,
        /// Blocks filled with water by the flood step, including the edited one
        flooded: usize,
    },
}

impl EditOutcome {
    /// Whether the grid changed.
    pub fn is_modified(&self) -> bool {
        matches!(self, EditOutcome::Modified { .. })
    }
}

/// Applies voxel edits to a grid and keeps its meshes current.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelEditor {
    mesher: GreedyMesher,
    water_level: i32,
    flood_on_edit: bool,
}

/// Sides water can flow in from: everything but straight up from below.
const FLOOD_SOURCES: [BlockSide; 5] = [
    BlockSide::Forward,
    BlockSide::Right,
    BlockSide::Back,
    BlockSide::Left,
    BlockSide::Up,
];

impl VoxelEditor {
    /// Creates an editor.
    ///
    /// # Arguments
    /// * `mesher` - Mesher used to rebuild affected meshes
    /// * `water_level` - World Z below which opened air may flood
    /// * `flood_on_edit` - Whether to flood air opened next to water
    pub fn new(mesher: GreedyMesher, water_level: i32, flood_on_edit: bool) -> Self {
        VoxelEditor {
            mesher,
            water_level,
            flood_on_edit,
        }
    }

    /// Creates an editor matching a terrain configuration.
    pub fn from_config(config: &TerrainConfig) -> Self {
        VoxelEditor::new(
            GreedyMesher::new(config.block_scale),
            config.water_level,
            config.flood_on_edit,
        )
    }

    /// Sets the block at a local position to `new_type` and rebuilds affected meshes.
    ///
    /// Out-of-range positions and writes of the type already present are
    /// no-ops, and so is clearing a flooded block that water would only flow
    /// straight back into. The caller holds both the grid and its meshes mutably for the
    /// whole call, so no renderer can observe the grid and meshes out of step.
    ///
    /// # Arguments
    /// * `grid` - The grid to edit
    /// * `meshes` - The grid's current meshes
    /// * `position` - Local block coordinates
    /// * `new_type` - Type to write
    pub fn modify_voxel(
        &self,
        grid: &mut VoxelGrid,
        meshes: &mut ChunkMeshes,
        position: Point3<i32>,
        new_type: BlockType,
    ) -> EditOutcome {
        if !grid.in_bounds(position.x, position.y, position.z) {
            trace!("Ignoring edit outside chunk at {:?}: {:?}", grid.origin(), position);
            return EditOutcome::OutOfBounds;
        }
        let previous = grid.block_type(position);
        if previous == new_type {
            return EditOutcome::Unchanged;
        }

        let before = affected_meshes(grid, position);
        grid.set_block_type(position, new_type);
        let flooded = if self.flood_on_edit {
            self.flood(grid, position)
        } else {
            0
        };
        if flooded == 1 && grid.block_type(position) == previous {
            // Water flowed straight back into the cell and nowhere else.
            trace!("Edit at {:?} refilled with {:?}", position, previous);
            return EditOutcome::Unchanged;
        }
        let after = affected_meshes(grid, position);

        let rebuilt = MeshSelection {
            land: before.land || after.land,
            liquid: before.liquid || after.liquid || flooded > 0,
        };
        self.mesher.rebuild(grid, meshes, rebuilt);

        debug!(
            "Edited {:?} in chunk at {:?}: {:?} -> {:?}, rebuilt {:?}, flooded {}",
            position,
            grid.origin(),
            previous,
            new_type,
            rebuilt,
            flooded
        );
        EditOutcome::Modified {
            previous,
            rebuilt,
            flooded,
        }
    }

    /// Lets water into air opened below the water level.
    ///
    /// If the block at `position` is air below the water level and water sits
    /// beside or above it, the block fills with that water, and so does every
    /// air block below the water level directly around it.
    ///
    /// # Returns
    /// The number of blocks filled.
    pub fn flood(&self, grid: &mut VoxelGrid, position: Point3<i32>) -> usize {
        if grid.block_type(position) != BlockType::Air || !self.below_water(grid, position) {
            return 0;
        }
        let Some(water) = FLOOD_SOURCES
            .iter()
            .map(|side| grid.block_type(position + side.offset()))
            .find(|block_type| block_type.is_liquid())
        else {
            return 0;
        };

        grid.set_block_type(position, water);
        let mut flooded = 1;
        for side in BlockSide::all() {
            let neighbor = position + side.offset();
            if grid.block_type(neighbor) == BlockType::Air
                && self.below_water(grid, neighbor)
                && grid.set_block_type(neighbor, water)
            {
                flooded += 1;
            }
        }
        flooded
    }

    fn below_water(&self, grid: &VoxelGrid, position: Point3<i32>) -> bool {
        grid.to_world(position).z < self.water_level
    }
}

/// Meshes with a face on one of the boundaries around `position`.
///
/// Reports the land mesh if the block or any neighbor is opaque, and the
/// liquid mesh if any of them is liquid.
pub fn affected_meshes(grid: &VoxelGrid, position: Point3<i32>) -> MeshSelection {
    let mut selection = MeshSelection::NONE;
    let neighbors = BlockSide::all().map(|side| position + side.offset());
    for cell in std::iter::once(position).chain(neighbors) {
        match grid.get(cell).category() {
            Category::Opaque => selection.land = true,
            Category::Liquid => selection.liquid = true,
            Category::Empty => {}
        }
    }
    selection
}
