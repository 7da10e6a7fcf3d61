//! # Terrain Generation Module
//!
//! Fills a [`VoxelGrid`] from noise, column by column.
//!
//! ## Layering
//!
//! For every column the 2D noise gives a surface height `S` in `[0, N]`. Each
//! block at world height `Z` is then decided top-down by the first matching
//! rule:
//!
//! 1. local `z == 0` in the bedrock chunk: bedrock
//! 2. 3D noise at or above the cave threshold and `Z <= S - cave_depth`: cave air
//! 3. `Z < S - 3`: stone
//! 4. `Z < S - 1`: dirt
//! 5. `Z == S - 1`: grass, or dirt under a queued tree
//! 6. otherwise: air
//!
//! Below the water line, exposed grass and upper dirt turn to sand and lower
//! dirt to gravel. Trees are grown once the whole grid is filled, and water
//! fills the remaining air below the water line last.

use cgmath::Point3;
use log::debug;
use web_time::Instant;

use crate::{
    config::TerrainConfig,
    voxels::{
        block::{Block, BlockType},
        chunk::VoxelGrid,
    },
};

use super::{
    features::{place_features, FeatureQueue, TreeSite},
    noise_source::NoiseSource,
    random::{one_in, TREE_SALT},
    GenerationMode,
};

/// Deterministic chunk generator shared by every chunk of a world.
///
/// Holds only read-only state, so one generator can fill many grids from
/// several threads at once.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    config: TerrainConfig,
    noise: NoiseSource,
}

impl TerrainGenerator {
    /// Creates a generator for the given configuration.
    pub fn new(config: TerrainConfig) -> Self {
        let noise = NoiseSource::new(config.seed, config.frequency, config.octaves);
        TerrainGenerator { config, noise }
    }

    /// The configuration this generator was built from.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// The terrain noise source.
    pub fn noise(&self) -> &NoiseSource {
        &self.noise
    }

    /// Generates the grid of the chunk whose local origin sits at `origin`.
    ///
    /// # Arguments
    /// * `origin` - World block coordinates of the chunk's `(0, 0, 0)` corner
    ///
    /// # Returns
    /// A fully populated grid. Identical inputs always yield identical grids.
    pub fn generate_chunk(&self, origin: Point3<i32>) -> VoxelGrid {
        let start = Instant::now();
        let mut grid = VoxelGrid::new(self.config.chunk_size, origin);

        match self.config.generation_mode {
            GenerationMode::Terrain => {
                let mut queue = FeatureQueue::default();
                self.generate_land(&mut grid, &mut queue);
                let trees = queue.trees.len();
                place_features(&mut grid, &mut queue, self.config.canopy_radius);
                self.generate_water(&mut grid);
                debug!("Chunk at {:?}: {} trees planted", origin, trees);
            }
            GenerationMode::Flat => self.fill_with(&mut grid, |zpos, water_level, _| {
                if zpos < water_level {
                    BlockType::Stone
                } else if zpos == water_level {
                    BlockType::Grass
                } else {
                    BlockType::Air
                }
            }),
            GenerationMode::Solid => self.fill_with(&mut grid, |_, _, _| BlockType::Stone),
            GenerationMode::Empty => {}
            GenerationMode::Checkerboard => self.fill_with(&mut grid, |_, _, local| {
                if (local.x + local.y + local.z) % 2 == 0 {
                    BlockType::Stone
                } else {
                    BlockType::Air
                }
            }),
        }

        debug!(
            "Generated {} chunk at {:?} in {:?}",
            self.config.generation_mode,
            origin,
            start.elapsed()
        );
        grid
    }

    /// Column pass: bedrock, caves, strata, surface and shoreline.
    ///
    /// Tree sites are queued rather than placed so that later columns cannot
    /// overwrite a half-built canopy.
    pub fn generate_land(&self, grid: &mut VoxelGrid, queue: &mut FeatureQueue) {
        let size = grid.size() as i32;
        let origin = grid.origin();
        let config = &self.config;
        let bedrock_chunk = origin.z == config.bedrock_level;

        for x in 0..size {
            for y in 0..size {
                let world_x = (origin.x + x) as f64;
                let world_y = (origin.y + y) as f64;
                let surface = self.noise.surface_height(world_x, world_y, size);

                for z in 0..size {
                    let local = Point3::new(x, y, z);
                    let zpos = origin.z + z;

                    if z == 0 && bedrock_chunk {
                        grid.set_block(local, Block::new(BlockType::Bedrock));
                        continue;
                    }

                    let cave = self.noise.sample_3d(world_x, world_y, zpos as f64);
                    if cave >= config.cave_threshold && zpos <= surface - config.cave_depth {
                        grid.set_block(local, Block::new(BlockType::Air));
                        continue;
                    }

                    let mut block_type = if zpos < surface - 3 {
                        BlockType::Stone
                    } else if zpos < surface - 1 {
                        BlockType::Dirt
                    } else if zpos == surface - 1 {
                        let world = grid.to_world(local);
                        if zpos > config.water_level
                            && one_in(config.seed, TREE_SALT, world, config.tree_chance)
                        {
                            queue.trees.push(TreeSite {
                                ground: local,
                                trunk_height: config.tree_height,
                            });
                            BlockType::Dirt
                        } else {
                            BlockType::Grass
                        }
                    } else {
                        BlockType::Air
                    };

                    if zpos < config.water_level {
                        block_type = shore_block(block_type, zpos, config);
                    }

                    grid.set_block(local, Block::new(block_type));
                }
            }
        }
    }

    /// Water pass: floods air below the water line.
    ///
    /// Within each run of flooded air, counted up from the run's floor, the
    /// first `shallow_water_depth` levels are shallow water and the rest deep.
    pub fn generate_water(&self, grid: &mut VoxelGrid) {
        let size = grid.size() as i32;
        let origin = grid.origin();
        let water_level = self.config.water_level;
        let shallow_depth = self.config.shallow_water_depth;
        let mut flooded = 0usize;

        for x in 0..size {
            for y in 0..size {
                let mut depth = 0;
                for z in 0..size {
                    let local = Point3::new(x, y, z);
                    let zpos = origin.z + z;
                    if zpos < water_level && grid.block_type(local) == BlockType::Air {
                        depth += 1;
                        let water = if depth > shallow_depth {
                            BlockType::DeepWater
                        } else {
                            BlockType::ShallowWater
                        };
                        grid.set_block_type(local, water);
                        flooded += 1;
                    } else {
                        depth = 0;
                    }
                }
            }
        }

        if flooded > 0 {
            debug!("Chunk at {:?}: {} water blocks", origin, flooded);
        }
    }

    fn fill_with<F>(&self, grid: &mut VoxelGrid, block_for: F)
    where
        F: Fn(i32, i32, Point3<i32>) -> BlockType,
    {
        let size = grid.size() as i32;
        let origin = grid.origin();
        for z in 0..size {
            for y in 0..size {
                for x in 0..size {
                    let local = Point3::new(x, y, z);
                    let block_type = block_for(origin.z + z, self.config.water_level, local);
                    grid.set_block(local, Block::new(block_type));
                }
            }
        }
    }
}

/// Beach transition for blocks below the water line.
fn shore_block(block_type: BlockType, zpos: i32, config: &TerrainConfig) -> BlockType {
    match block_type {
        BlockType::Grass => BlockType::Sand,
        BlockType::Dirt if zpos > config.water_level - config.sand_band => BlockType::Sand,
        BlockType::Dirt => BlockType::Gravel,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mode: GenerationMode) -> TerrainConfig {
        TerrainConfig {
            chunk_size: 16,
            seed: 99,
            generation_mode: mode,
            ..TerrainConfig::default()
        }
    }

    #[test]
    fn shore_converts_by_height() {
        let config = TerrainConfig::default();
        assert_eq!(shore_block(BlockType::Grass, 3, &config), BlockType::Sand);
        assert_eq!(shore_block(BlockType::Dirt, 12, &config), BlockType::Sand);
        assert_eq!(shore_block(BlockType::Dirt, 10, &config), BlockType::Gravel);
        assert_eq!(shore_block(BlockType::Stone, 12, &config), BlockType::Stone);
    }

    #[test]
    fn bedrock_only_in_bedrock_chunk() {
        let generator = TerrainGenerator::new(config(GenerationMode::Terrain));
        let floor = generator.generate_chunk(Point3::new(0, 0, 0));
        for x in 0..16 {
            for y in 0..16 {
                assert_eq!(floor.block_type(Point3::new(x, y, 0)), BlockType::Bedrock);
            }
        }
        let above = generator.generate_chunk(Point3::new(0, 0, 16));
        assert_eq!(above.count(BlockType::Bedrock), 0);
    }

    #[test]
    fn water_depth_counts_up_from_floor() {
        let generator = TerrainGenerator::new(TerrainConfig {
            water_level: 9,
            shallow_water_depth: 3,
            ..config(GenerationMode::Empty)
        });
        let mut grid = VoxelGrid::new(16, Point3::new(0, 0, 0));
        grid.set_block_type(Point3::new(0, 0, 0), BlockType::Stone);
        generator.generate_water(&mut grid);

        assert_eq!(grid.block_type(Point3::new(0, 0, 0)), BlockType::Stone);
        for z in 1..=3 {
            assert_eq!(grid.block_type(Point3::new(0, 0, z)), BlockType::ShallowWater);
        }
        for z in 4..9 {
            assert_eq!(grid.block_type(Point3::new(0, 0, z)), BlockType::DeepWater);
        }
        assert_eq!(grid.block_type(Point3::new(0, 0, 9)), BlockType::Air);
        assert!(!grid.get_block(0, 0, 5).is_solid);
    }

    #[test]
    fn pattern_modes_fill_as_named() {
        let solid = TerrainGenerator::new(config(GenerationMode::Solid))
            .generate_chunk(Point3::new(0, 0, 0));
        assert_eq!(solid.count(BlockType::Stone), 16 * 16 * 16);

        let empty = TerrainGenerator::new(config(GenerationMode::Empty))
            .generate_chunk(Point3::new(0, 0, 0));
        assert_eq!(empty.count(BlockType::Air), 16 * 16 * 16);

        let checker = TerrainGenerator::new(config(GenerationMode::Checkerboard))
            .generate_chunk(Point3::new(0, 0, 0));
        assert_eq!(checker.count(BlockType::Stone), 16 * 16 * 16 / 2);
        assert_eq!(checker.block_type(Point3::new(0, 0, 0)), BlockType::Stone);
        assert_eq!(checker.block_type(Point3::new(1, 0, 0)), BlockType::Air);

        let flat = TerrainGenerator::new(config(GenerationMode::Flat))
            .generate_chunk(Point3::new(0, 0, 0));
        assert_eq!(flat.count(BlockType::Stone), 16 * 16 * 15);
        assert_eq!(flat.count(BlockType::Grass), 16 * 16);
    }
}
