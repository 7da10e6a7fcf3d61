//! # Noise Source Module
//!
//! A seeded multi-octave Perlin generator sampled in world block coordinates.
//! The 2D sample drives surface height, the 3D sample carves caves and
//! classifies biomes.
//!
//! Sampling is a pure function of `(seed, frequency, octaves, position)`, so a
//! single `NoiseSource` can be shared read-only by every chunk worker.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// Seeded fractal-Brownian-motion Perlin noise.
#[derive(Clone, Debug)]
pub struct NoiseSource {
    fbm: Fbm<Perlin>,
    frequency: f64,
}

impl NoiseSource {
    /// Creates a noise source.
    ///
    /// # Arguments
    /// * `seed` - World seed; folded into the 32-bit seed the Perlin basis takes
    /// * `frequency` - Spatial frequency applied to block coordinates
    /// * `octaves` - Number of fractal octaves
    pub fn new(seed: u64, frequency: f64, octaves: usize) -> Self {
        let fbm = Fbm::<Perlin>::new(fold_seed(seed))
            .set_frequency(frequency)
            .set_octaves(octaves.clamp(1, Fbm::<Perlin>::MAX_OCTAVES));
        NoiseSource { fbm, frequency }
    }

    /// Frequency this source was built with.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Samples 2D noise, clamped to `[-1, 1]`.
    pub fn sample_2d(&self, x: f64, y: f64) -> f64 {
        self.fbm.get([x, y]).clamp(-1.0, 1.0)
    }

    /// Samples 3D noise, clamped to `[-1, 1]`.
    pub fn sample_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.fbm.get([x, y, z]).clamp(-1.0, 1.0)
    }

    /// Maps the 2D sample at a column to a surface height in `[0, max_height]`.
    ///
    /// The sample is normalized to `[0, 1]`, scaled by `max_height` and rounded.
    pub fn surface_height(&self, x: f64, y: f64, max_height: i32) -> i32 {
        let normalized = (self.sample_2d(x, y) + 1.0) / 2.0;
        ((normalized * max_height as f64).round() as i32).clamp(0, max_height)
    }
}

fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_samples_identically() {
        let a = NoiseSource::new(42, 0.03, 4);
        let b = NoiseSource::new(42, 0.03, 4);
        for i in 0..50 {
            let x = i as f64 * 1.7;
            let y = i as f64 * -2.3;
            assert_eq!(a.sample_2d(x, y).to_bits(), b.sample_2d(x, y).to_bits());
            assert_eq!(a.sample_3d(x, y, 3.0).to_bits(), b.sample_3d(x, y, 3.0).to_bits());
        }
    }

    #[test]
    fn samples_stay_in_range() {
        let source = NoiseSource::new(7, 0.1, 6);
        for i in 0..200 {
            let value = source.sample_3d(i as f64, (i * 3) as f64, (i * 7) as f64);
            assert!((-1.0..=1.0).contains(&value));
            let height = source.surface_height(i as f64, (i * 5) as f64, 32);
            assert!((0..=32).contains(&height));
        }
    }
}
