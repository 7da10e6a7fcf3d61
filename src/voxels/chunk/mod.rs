//! # Chunk Module
//!
//! This module provides the `Chunk` struct, which bundles one cubic region's
//! [`VoxelGrid`] with the land and liquid meshes built from it.
//!
//! ## Lifecycle
//!
//! 1. The grid is filled by the [`TerrainGenerator`]
//! 2. The biome pass retypes blocks and queues trees and flora
//! 3. Queued features are written into the grid
//! 4. Both meshes are built
//!
//! After that, every mutation goes through a `&mut Chunk`, so a grid change
//! and the remesh it triggers are a single step from any observer's point of
//! view.

use cgmath::Point3;

use crate::{
    editing::{EditOutcome, VoxelEditor},
    generation::{
        features::place_features, DecorationRecord, FeatureQueue, GenerationMode, TerrainGenerator,
    },
    meshing::{ChunkMeshData, ChunkMeshes, GreedyMesher, MeshPass, MeshSelection},
};

use super::block::{Biome, Block, BlockType};

mod grid;

pub use grid::VoxelGrid;

/// A generated, meshed region of the world.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point3<i32>,
    grid: VoxelGrid,
    meshes: ChunkMeshes,
    pending: FeatureQueue,
    decorations: Vec<DecorationRecord>,
}

impl Chunk {
    /// Converts chunk coordinates to the world block coordinates of the chunk's origin.
    pub fn origin_of(position: Point3<i32>, chunk_size: usize) -> Point3<i32> {
        position * chunk_size as i32
    }

    /// Generates, decorates and meshes the chunk at `position`.
    ///
    /// # Arguments
    /// * `position` - Chunk coordinates
    /// * `generator` - Shared terrain generator
    /// * `mesher` - Mesher for the initial meshes
    pub fn generate(
        position: Point3<i32>,
        generator: &TerrainGenerator,
        mesher: &GreedyMesher,
    ) -> Self {
        let config = generator.config();
        let grid = generator.generate_chunk(Self::origin_of(position, config.chunk_size));
        let mut chunk = Chunk::from_grid(position, grid);

        if config.generation_mode == GenerationMode::Terrain {
            generator.assign_biomes(&mut chunk.grid, &mut chunk.pending);
        }
        chunk.finish_biome_pass(generator, mesher);
        chunk
    }

    /// Wraps an already populated grid. Meshes start out empty.
    pub fn from_grid(position: Point3<i32>, grid: VoxelGrid) -> Self {
        Chunk {
            position,
            grid,
            meshes: ChunkMeshes::default(),
            pending: FeatureQueue::default(),
            decorations: Vec::new(),
        }
    }

    /// The chunk's blocks.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Both meshes.
    pub fn meshes(&self) -> &ChunkMeshes {
        &self.meshes
    }

    /// Opaque geometry.
    pub fn land_mesh(&self) -> &ChunkMeshData {
        &self.meshes.land
    }

    /// Water geometry.
    pub fn liquid_mesh(&self) -> &ChunkMeshData {
        &self.meshes.liquid
    }

    /// Flora placed in this chunk, for the host to dress.
    pub fn decorations(&self) -> &[DecorationRecord] {
        &self.decorations
    }

    /// Features queued by [`Chunk::set_biome`] and not yet placed.
    pub fn pending_features(&self) -> &FeatureQueue {
        &self.pending
    }

    /// The block at local coordinates, Air when out of range.
    pub fn get_block(&self, local: Point3<i32>) -> Block {
        self.grid.get(local)
    }

    /// Applies a biome to one block; see [`TerrainGenerator::set_biome`].
    ///
    /// Features the biome queues are held until [`Chunk::finish_biome_pass`].
    pub fn set_biome(
        &mut self,
        generator: &TerrainGenerator,
        local: Point3<i32>,
        biome: Biome,
        humidity: f32,
    ) -> bool {
        generator.set_biome(&mut self.grid, local, biome, humidity, &mut self.pending)
    }

    /// Places pending features and rebuilds both meshes.
    pub fn finish_biome_pass(&mut self, generator: &TerrainGenerator, mesher: &GreedyMesher) {
        let placed = place_features(
            &mut self.grid,
            &mut self.pending,
            generator.config().canopy_radius,
        );
        self.decorations.extend(placed);
        // Trees may have overwritten earlier flora.
        let grid = &self.grid;
        self.decorations
            .retain(|record| grid.block_type(Point3::from(record.position)) == record.block_type);
        self.remesh(mesher, MeshSelection::ALL);
    }

    /// Rebuilds the selected meshes from the current grid.
    pub fn remesh(&mut self, mesher: &GreedyMesher, selection: MeshSelection) {
        mesher.rebuild(&self.grid, &mut self.meshes, selection);
    }

    /// Edits one block and rebuilds the meshes it affects.
    pub fn modify_voxel(
        &mut self,
        editor: &VoxelEditor,
        local: Point3<i32>,
        new_type: BlockType,
    ) -> EditOutcome {
        let outcome = editor.modify_voxel(&mut self.grid, &mut self.meshes, local, new_type);
        if outcome.is_modified() {
            let grid = &self.grid;
            self.decorations
                .retain(|record| grid.block_type(Point3::from(record.position)) == record.block_type);
        }
        outcome
    }

    /// Quads in the mesh built by `pass`.
    pub fn quad_count(&self, pass: MeshPass) -> usize {
        self.meshes.get(pass).quad_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;

    fn generator(mode: GenerationMode) -> TerrainGenerator {
        TerrainGenerator::new(TerrainConfig {
            chunk_size: 8,
            generation_mode: mode,
            ..TerrainConfig::default()
        })
    }

    #[test]
    fn generated_chunk_is_meshed() {
        let generator = generator(GenerationMode::Solid);
        let chunk = Chunk::generate(Point3::new(0, 0, 0), &generator, &GreedyMesher::new(1.0));
        assert_eq!(chunk.quad_count(MeshPass::Land), 6);
        assert!(chunk.liquid_mesh().is_empty());
        assert_eq!(chunk.get_block(Point3::new(9, 0, 0)).block_type, BlockType::Air);
    }

    #[test]
    fn chunk_origin_scales_by_size() {
        assert_eq!(Chunk::origin_of(Point3::new(-1, 2, 0), 16), Point3::new(-16, 32, 0));
    }

    #[test]
    fn biome_features_wait_for_finish() {
        let generator = TerrainGenerator::new(TerrainConfig {
            chunk_size: 8,
            generation_mode: GenerationMode::Empty,
            biome_tree_chance: 1,
            ..TerrainConfig::default()
        });
        let mesher = GreedyMesher::new(1.0);
        let mut grid = VoxelGrid::new(8, Point3::new(0, 0, 0));
        grid.set_block_type(Point3::new(4, 4, 0), BlockType::Grass);
        let mut chunk = Chunk::from_grid(Point3::new(0, 0, 0), grid);

        assert!(chunk.set_biome(&generator, Point3::new(4, 4, 0), Biome::Swamp, 0.9));
        assert_eq!(chunk.pending_features().trees.len(), 1);
        assert_eq!(chunk.grid().count(BlockType::Log), 0);

        chunk.finish_biome_pass(&generator, &mesher);
        assert!(chunk.pending_features().is_empty());
        assert_eq!(chunk.grid().count(BlockType::Log), 7);
        assert!(!chunk.land_mesh().is_empty());
    }
}
