//! # Biome Pass Module
//!
//! Post-generation remapping of block types by climate.
//!
//! A chunk is classified block by block from two values: a low-frequency 3D
//! biome noise and a humidity that falls off with distance to the nearest
//! water in the chunk. [`TerrainGenerator::set_biome`] then retypes the block
//! for its biome and may queue trees or flora, which are written into the grid
//! once the whole chunk has been visited.

use std::collections::VecDeque;

use bitvec::prelude::BitVec;
use cgmath::Point3;
use log::debug;

use crate::voxels::{
    block::{Biome, Block, BlockSide, BlockType},
    chunk::VoxelGrid,
};

use super::{
    features::{DecorationRecord, FeatureQueue, TreeSite},
    noise_source::NoiseSource,
    random::{one_in, BIOME_TREE_SALT, FLORA_SALT},
    TerrainGenerator,
};

/// Mixed into the world seed so biome noise is decorrelated from terrain noise.
const BIOME_SEED_SALT: u64 = 0xB10E_5EED;
const BIOME_OCTAVES: usize = 3;

/// Maps biome noise and humidity to a [`Biome`].
#[derive(Clone, Debug)]
pub struct BiomeClassifier {
    noise: NoiseSource,
}

impl BiomeClassifier {
    /// Creates a classifier for a world seed.
    pub fn new(seed: u64, frequency: f64) -> Self {
        BiomeClassifier {
            noise: NoiseSource::new(seed ^ BIOME_SEED_SALT, frequency, BIOME_OCTAVES),
        }
    }

    /// Biome noise at a world block position, in `[-1, 1]`.
    pub fn sample(&self, world: Point3<i32>) -> f64 {
        self.noise
            .sample_3d(world.x as f64, world.y as f64, world.z as f64)
    }

    /// Classifies a block from its biome noise and humidity.
    ///
    /// The noise is split into five bands, each of which is split again by
    /// humidity.
    pub fn classify(noise: f64, humidity: f32) -> Biome {
        if noise < -0.6 {
            match humidity {
                h if h < 0.3 => Biome::Desert,
                h if h < 0.7 => Biome::Plains,
                _ => Biome::Swamp,
            }
        } else if noise < -0.2 {
            match humidity {
                h if h < 0.5 => Biome::Desert,
                h if h < 0.7 => Biome::Swamp,
                _ => Biome::Tundra,
            }
        } else if noise < 0.2 {
            match humidity {
                h if h < 0.3 => Biome::Plains,
                h if h < 0.7 => Biome::Taiga,
                _ => Biome::Swamp,
            }
        } else if noise < 0.6 {
            match humidity {
                h if h < 0.5 => Biome::Taiga,
                h if h < 0.8 => Biome::Tundra,
                _ => Biome::Swamp,
            }
        } else {
            match humidity {
                h if h < 0.6 => Biome::Tundra,
                h if h < 0.8 => Biome::Swamp,
                _ => Biome::Taiga,
            }
        }
    }

    /// Classifies the block at a world position.
    pub fn biome_at(&self, world: Point3<i32>, humidity: f32) -> Biome {
        Self::classify(self.sample(world), humidity)
    }
}

/// Humidity of every block of a grid, in grid index order.
///
/// Humidity is `1 - d / range` clamped to `[0, 1]`, where `d` is the number
/// of 6-connected steps to the nearest water block. Grids without water are
/// dry everywhere.
pub fn humidity_map(grid: &VoxelGrid, range: f32) -> Vec<f32> {
    let len = grid.blocks().len();
    let mut distance = vec![u32::MAX; len];
    let mut visited: BitVec = BitVec::repeat(false, len);
    let mut frontier = VecDeque::new();

    for (position, block) in grid.iter() {
        if block.block_type.is_liquid() {
            if let Some(index) = grid.index(position.x, position.y, position.z) {
                visited.set(index, true);
                distance[index] = 0;
                frontier.push_back((position, index));
            }
        }
    }

    if frontier.is_empty() {
        return vec![0.0; len];
    }

    while let Some((position, index)) = frontier.pop_front() {
        let next = distance[index] + 1;
        for side in BlockSide::all() {
            let neighbor = position + side.offset();
            let Some(neighbor_index) = grid.index(neighbor.x, neighbor.y, neighbor.z) else {
                continue;
            };
            if visited[neighbor_index] {
                continue;
            }
            visited.set(neighbor_index, true);
            distance[neighbor_index] = next;
            frontier.push_back((neighbor, neighbor_index));
        }
    }

    distance
        .into_iter()
        .map(|d| (1.0 - d as f32 / range).clamp(0.0, 1.0))
        .collect()
}

/// Tally of what one chunk's biome pass did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BiomeStats {
    /// Blocks whose type changed
    pub retyped: usize,
    /// Trees queued
    pub trees: usize,
    /// Flora decorations queued
    pub decorations: usize,
}

impl TerrainGenerator {
    /// Applies a biome to one block.
    ///
    /// Records the biome and humidity on the block, retypes it for the biome
    /// and may queue a tree or a flora decoration. Only surface blocks (air
    /// directly above) roll for features. Out-of-range positions are ignored.
    ///
    /// | Biome  | Retyping                         | Features            |
    /// |--------|----------------------------------|---------------------|
    /// | Desert | grass to sand, dirt to dry dirt  |                     |
    /// | Swamp  | grass to swamp                   | tall trees          |
    /// | Tundra | grass and sand to tundra, surface water to ice |       |
    /// | Taiga  | sand to gravel                   | taller trees        |
    /// | Plains |                                  | short grass on grass|
    ///
    /// # Returns
    /// Whether the block type changed.
    pub fn set_biome(
        &self,
        grid: &mut VoxelGrid,
        position: Point3<i32>,
        biome: Biome,
        humidity: f32,
        queue: &mut FeatureQueue,
    ) -> bool {
        let config = self.config();
        let world = grid.to_world(position);
        let surface = grid.block_type(position + BlockSide::Up.offset()) == BlockType::Air;
        let Some(block) = grid.get_mut(position) else {
            return false;
        };
        block.biome = biome;
        block.humidity = humidity.clamp(0.0, 1.0);

        let old = block.block_type;
        let new = match (biome, old) {
            (Biome::Desert, BlockType::Grass) => BlockType::Sand,
            (Biome::Desert, BlockType::Dirt) => BlockType::DryDirt,
            (Biome::Swamp, BlockType::Grass) => BlockType::Swamp,
            (Biome::Tundra, BlockType::Grass | BlockType::Sand) => BlockType::Tundra,
            (Biome::Tundra, BlockType::ShallowWater | BlockType::DeepWater) if surface => {
                BlockType::Ice
            }
            (Biome::Taiga, BlockType::Sand) => BlockType::Gravel,
            _ => old,
        };
        if new != old {
            *block = block.with_type(new);
        }

        if surface {
            let tree_height = match (biome, new) {
                (Biome::Swamp, BlockType::Swamp) => Some(config.swamp_tree_height),
                (Biome::Taiga, BlockType::Grass | BlockType::Dirt) => Some(config.taiga_tree_height),
                _ => None,
            };
            if let Some(trunk_height) = tree_height {
                if one_in(config.seed, BIOME_TREE_SALT, world, config.biome_tree_chance) {
                    queue.trees.push(TreeSite { ground: position, trunk_height });
                }
            } else if biome == Biome::Plains
                && new == BlockType::Grass
                && one_in(config.seed, FLORA_SALT, world, config.flora_chance)
            {
                let above = position + BlockSide::Up.offset();
                queue.decorations.push(DecorationRecord {
                    position: above.into(),
                    block_type: BlockType::ShortGrass,
                    texture_index: Block::texture_index(BlockType::ShortGrass, BlockSide::Up),
                });
            }
        }

        new != old
    }

    /// Runs the biome pass over a whole chunk, queueing features into `queue`.
    ///
    /// Humidity is measured before any block is retyped, so freezing water
    /// never changes the climate of its neighbors.
    pub fn assign_biomes(&self, grid: &mut VoxelGrid, queue: &mut FeatureQueue) -> BiomeStats {
        let classifier = BiomeClassifier::new(self.config().seed, self.config().biome_frequency);
        let humidity = humidity_map(grid, self.config().humidity_range);
        let size = grid.size() as i32;
        let mut stats = BiomeStats::default();
        let (trees, decorations) = (queue.trees.len(), queue.decorations.len());

        for z in 0..size {
            for y in 0..size {
                for x in 0..size {
                    let Some(index) = grid.index(x, y, z) else {
                        continue;
                    };
                    let position = Point3::new(x, y, z);
                    let biome = classifier.biome_at(grid.to_world(position), humidity[index]);
                    if self.set_biome(grid, position, biome, humidity[index], queue) {
                        stats.retyped += 1;
                    }
                }
            }
        }

        stats.trees = queue.trees.len() - trees;
        stats.decorations = queue.decorations.len() - decorations;
        debug!(
            "Biome pass at {:?}: {} blocks retyped, {} trees and {} flora queued",
            grid.origin(),
            stats.retyped,
            stats.trees,
            stats.decorations
        );
        stats
    }
}
