use crate::{raster::Raster, topology::Dimensions};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use validator::Validate;

/// Static manifest content that isn't derived from terrain generation. The
/// nation list is placeholder data: fixed points on the full resolution map,
/// unrelated to the generated land.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ManifestConfig {
    /// Display name of the map
    #[validate(length(min = 1))]
    pub name: String,

    /// Landmarks listed in the manifest
    pub nations: Vec<Nation>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        let nation = |name: &str, x, y| Nation {
            coordinates: [x, y],
            flag: String::new(),
            name: name.into(),
            strength: 2,
        };
        Self {
            name: "Square Map".into(),
            nations: vec![
                nation("Northland", 400, 100),
                nation("Eastland", 700, 400),
                nation("Southland", 400, 700),
                nation("Westland", 100, 400),
            ],
        }
    }
}

/// A named landmark on the map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nation {
    /// `[x, y]` on the full resolution map
    pub coordinates: [u32; 2],
    /// Flag reference. Empty means no flag
    pub flag: String,
    pub name: String,
    pub strength: u32,
}

/// Size and land count of one generated raster.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MapInfo {
    pub width: u32,
    pub height: u32,
    pub num_land_tiles: usize,
}

impl From<&Raster> for MapInfo {
    fn from(raster: &Raster) -> Self {
        let Dimensions { width, height } = raster.dimensions();
        Self {
            width,
            height,
            num_land_tiles: raster.land_tiles(),
        }
    }
}

/// Describes a generated map directory. The land counts are always taken
/// from the generated [Raster]s themselves, so they can't drift from the
/// written raster content.
///
/// Serialized as pretty-printed JSON, field names are part of the format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    /// Full resolution
    pub map: MapInfo,
    /// Quarter resolution (4x fewer tiles)
    pub map4x: MapInfo,
    /// Sixteenth resolution (16x fewer tiles)
    pub map16x: MapInfo,
    pub nations: Vec<Nation>,
}

impl Manifest {
    /// Assemble a manifest from the three rasters of a map, from the largest
    /// to the smallest.
    pub fn new(
        config: &ManifestConfig,
        [full, quarter, sixteenth]: [&Raster; 3],
    ) -> Self {
        Self {
            name: config.name.clone(),
            map: full.into(),
            map4x: quarter.into(),
            map16x: sixteenth.into(),
            nations: config.nations.clone(),
        }
    }

    /// Serialize to human-readable JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("error serializing manifest")
    }

    /// Deserialize from JSON, as written by [Manifest::write_to]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("error deserializing manifest")
    }

    /// Write the manifest as JSON, replacing any existing file
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.to_json()?;
        fs::write(path, json)
            .with_context(|| format!("error writing manifest {:?}", path))
    }
}
