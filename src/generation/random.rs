//! Position-derived pseudorandom rolls.
//!
//! Feature placement must not depend on iteration order or on any ambient
//! generator, so every roll seeds a fresh `fastrand::Rng` from the world seed,
//! a per-feature salt and the world position being decided.

use cgmath::Point3;

/// Salt for the surface tree roll during column generation.
pub const TREE_SALT: u64 = 0x7472_6565;
/// Salt for the tree reroll in the biome pass.
pub const BIOME_TREE_SALT: u64 = 0x6269_6f6d_6574;
/// Salt for plains flora.
pub const FLORA_SALT: u64 = 0x666c_6f72_61;

/// Returns a generator whose stream depends only on `seed`, `salt` and `position`.
pub fn rng_at(seed: u64, salt: u64, position: Point3<i32>) -> fastrand::Rng {
    let mut hash = splitmix(seed ^ salt.rotate_left(17));
    hash = splitmix(hash ^ position.x as u32 as u64);
    hash = splitmix(hash ^ ((position.y as u32 as u64) << 21));
    hash = splitmix(hash ^ ((position.z as u32 as u64) << 42));
    fastrand::Rng::with_seed(hash)
}

/// A one-in-`odds` roll at `position`. Odds of 0 or 1 always succeed.
pub fn one_in(seed: u64, salt: u64, position: Point3<i32>, odds: u32) -> bool {
    odds <= 1 || rng_at(seed, salt, position).u32(0..odds) == 0
}

fn splitmix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolls_are_repeatable() {
        let position = Point3::new(3, -9, 27);
        for odds in [2, 7, 50] {
            assert_eq!(
                one_in(11, TREE_SALT, position, odds),
                one_in(11, TREE_SALT, position, odds)
            );
        }
    }

    #[test]
    fn roll_frequency_tracks_odds() {
        let hits = (0..10_000)
            .filter(|i| one_in(5, FLORA_SALT, Point3::new(i % 100, i / 100, 0), 10))
            .count();
        assert!((700..1300).contains(&hits), "hits = {}", hits);
    }

    #[test]
    fn salts_decorrelate_streams() {
        let differing = (0..1_000)
            .filter(|i| {
                let position = Point3::new(*i, 0, 0);
                rng_at(1, TREE_SALT, position).u64(..) != rng_at(1, FLORA_SALT, position).u64(..)
            })
            .count();
        assert!(differing > 990);
    }
}
