//! Selectable grid fill strategies.
//!
//! Besides the full terrain pipeline, a few fixed patterns are available for
//! testing the mesher and for debugging a host renderer.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

/// The method used to fill new chunk grids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GenerationMode {
    /// Noise-driven terrain with caves, strata, water and trees.
    #[default]
    Terrain,
    /// Stone below the water level capped with a grass layer.
    Flat,
    /// Every block is stone.
    Solid,
    /// Every block is air.
    Empty,
    /// Stone and air alternating along all three axes.
    Checkerboard,
}

static GENERATION_MODES: phf::Map<&'static str, GenerationMode> = phf::phf_map! {
    "terrain" => GenerationMode::Terrain,
    "flat" => GenerationMode::Flat,
    "solid" => GenerationMode::Solid,
    "empty" => GenerationMode::Empty,
    "checkerboard" => GenerationMode::Checkerboard,
};

impl GenerationMode {
    /// Registered name of the mode.
    pub fn name(self) -> &'static str {
        match self {
            GenerationMode::Terrain => "terrain",
            GenerationMode::Flat => "flat",
            GenerationMode::Solid => "solid",
            GenerationMode::Empty => "empty",
            GenerationMode::Checkerboard => "checkerboard",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GenerationMode {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GENERATION_MODES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| TerrainError::UnknownGenerationMode(s.to_string()))
    }
}

impl TryFrom<String> for GenerationMode {
    type Error = TerrainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GenerationMode> for String {
    fn from(mode: GenerationMode) -> Self {
        mode.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_parses_from_its_name() {
        for mode in [
            GenerationMode::Terrain,
            GenerationMode::Flat,
            GenerationMode::Solid,
            GenerationMode::Empty,
            GenerationMode::Checkerboard,
        ] {
            assert_eq!(mode.name().parse::<GenerationMode>().unwrap(), mode);
        }
        assert_eq!("PERLIN".parse::<GenerationMode>().ok(), None);
    }

    #[test]
    fn unknown_mode_reports_the_name() {
        match "perlin".parse::<GenerationMode>() {
            Err(TerrainError::UnknownGenerationMode(name)) => assert_eq!(name, "perlin"),
            other => panic!("expected UnknownGenerationMode, got {:?}", other),
        }
    }
}
