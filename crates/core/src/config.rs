use crate::{
    manifest::ManifestConfig,
    render::config::ThumbnailConfig,
    topology::{CircleTopology, Dimensions, SquareTopology, TopologyKind},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::Display;
use validator::Validate;

/// Configuration that defines a generation run. Generation is deterministic:
/// two runs with the same config always write identical rasters.
///
/// Every field has a default, and the defaults produce the standard map set:
/// a circle map and a square map, each at 800x800, 400x400 and 200x200.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Root directory for generated maps. Each topology gets its own
    /// subdirectory in here.
    pub output_dir: PathBuf,

    /// Sizes of the three rasters generated for every map
    #[validate]
    pub resolutions: ResolutionConfig,

    /// Config for the preview image of each map
    #[validate]
    pub thumbnail: ThumbnailConfig,

    /// The circle map
    #[validate]
    pub circle: CircleMapConfig,

    /// The square map
    #[validate]
    pub square: SquareMapConfig,
}

impl GeneratorConfig {
    /// Check if a topology should be generated
    pub fn is_enabled(&self, kind: TopologyKind) -> bool {
        match kind {
            TopologyKind::Circle => self.circle.enabled,
            TopologyKind::Square => self.square.enabled,
        }
    }

    /// Enable or disable a topology
    pub fn set_enabled(&mut self, kind: TopologyKind, enabled: bool) {
        match kind {
            TopologyKind::Circle => self.circle.enabled = enabled,
            TopologyKind::Square => self.square.enabled = enabled,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("resources/maps"),
            resolutions: ResolutionConfig::default(),
            thumbnail: ThumbnailConfig::default(),
            circle: CircleMapConfig::default(),
            square: SquareMapConfig::default(),
        }
    }
}

/// The three resolutions that every map is generated at. Each one is computed
/// independently from the map's distance field, none are resampled from
/// another.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ResolutionConfig {
    #[validate]
    pub full: Dimensions,
    /// Nominally 4x fewer tiles than full. This is also the source size for
    /// thumbnails.
    #[validate]
    pub quarter: Dimensions,
    /// Nominally 16x fewer tiles than full
    #[validate]
    pub sixteenth: Dimensions,
}

impl ResolutionConfig {
    /// Get the dimensions for one resolution level
    pub fn get(&self, level: ResolutionLevel) -> Dimensions {
        match level {
            ResolutionLevel::Full => self.full,
            ResolutionLevel::Quarter => self.quarter,
            ResolutionLevel::Sixteenth => self.sixteenth,
        }
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            full: Dimensions::new(800, 800),
            quarter: Dimensions::new(400, 400),
            sixteenth: Dimensions::new(200, 200),
        }
    }
}

/// One of the three resolutions a map is generated at.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ResolutionLevel {
    Full,
    Quarter,
    Sixteenth,
}

impl ResolutionLevel {
    /// All levels, from largest to smallest
    pub const ALL: [Self; 3] = [Self::Full, Self::Quarter, Self::Sixteenth];

    /// Name of the raster file for this level. Raster files have no header,
    /// so the file name is what tells readers which dimensions to expect.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Full => "map.bin",
            Self::Quarter => "map4x.bin",
            Self::Sixteenth => "map16x.bin",
        }
    }
}

/// Config for the circle map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CircleMapConfig {
    pub enabled: bool,

    /// Subdirectory of the output dir to write to
    #[validate(length(min = 1))]
    pub directory: String,

    #[validate]
    pub shape: CircleTopology,
}

impl Default for CircleMapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: "circlemap".into(),
            shape: CircleTopology::default(),
        }
    }
}

/// Config for the square map. Unlike the circle map, this one also gets a
/// manifest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SquareMapConfig {
    pub enabled: bool,

    /// Subdirectory of the output dir to write to
    #[validate(length(min = 1))]
    pub directory: String,

    #[validate]
    pub shape: SquareTopology,

    #[validate]
    pub manifest: ManifestConfig,
}

impl Default for SquareMapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: "squaremap".into(),
            shape: SquareTopology::default(),
            manifest: ManifestConfig::default(),
        }
    }
}
