//! Biome identifiers carried by every block.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

/// Climate classification of a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Biome {
    /// Not yet classified. Every block starts here.
    #[default]
    Null,
    /// Hot and dry: grass turns to sand, soil dries out.
    Desert,
    /// Wet lowland with its own surface block and tall trees.
    Swamp,
    /// Cold: surfaces freeze and water ices over.
    Tundra,
    /// Cold forest: beaches turn to gravel, trees grow tall.
    Taiga,
    /// Open grassland with scattered flora.
    Plains,
}

static BIOME_NAMES: phf::Map<&'static str, Biome> = phf::phf_map! {
    "null" => Biome::Null,
    "desert" => Biome::Desert,
    "swamp" => Biome::Swamp,
    "tundra" => Biome::Tundra,
    "taiga" => Biome::Taiga,
    "plains" => Biome::Plains,
};

impl Biome {
    /// Lowercase registered name of this biome.
    pub fn name(self) -> &'static str {
        match self {
            Biome::Null => "null",
            Biome::Desert => "desert",
            Biome::Swamp => "swamp",
            Biome::Tundra => "tundra",
            Biome::Taiga => "taiga",
            Biome::Plains => "plains",
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Biome {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BIOME_NAMES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| TerrainError::UnknownBiome(s.to_string()))
    }
}

impl TryFrom<String> for Biome {
    type Error = TerrainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Biome> for String {
    fn from(biome: Biome) -> Self {
        biome.name().to_string()
    }
}
