//! Procedural generation of fixed-size terrain maps. Each tile of a map is
//! packed into a single [TerrainByte] that holds its land/ocean category plus a
//! magnitude (depth for ocean, richness/elevation for land). Every map is
//! generated at three resolutions from the same continuous distance field, so
//! its shape is identical at every zoom level.
//!
//! ```no_run
//! use mapgen::{GeneratorConfig, MapGenerator};
//!
//! let generator = MapGenerator::new(GeneratorConfig::default())?;
//! for report in generator.run()? {
//!     println!("{} -> {:?}", report.kind, report.directory);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Map shapes are defined by the [Topology] trait. See [CircleTopology] and
//! [SquareTopology] for the built-in shapes, and [GeneratorConfig] for
//! everything else that can be customized.

mod config;
mod generate;
mod manifest;
mod raster;
mod render;
mod terrain;
mod topology;
mod util;

pub use crate::{
    config::{
        CircleMapConfig, GeneratorConfig, ResolutionConfig, ResolutionLevel,
        SquareMapConfig,
    },
    generate::{MapGenerator, MapReport, RasterSummary},
    manifest::{Manifest, ManifestConfig, MapInfo, Nation},
    raster::Raster,
    render::{
        config::{ThumbnailConfig, ThumbnailFormat},
        tile_color,
        unit::Color3,
        Thumbnail, ThumbnailRenderer,
    },
    terrain::{TerrainByte, TileCategory},
    topology::{
        CircleTopology, Dimensions, DistanceMetric, FieldSample,
        SquareTopology, TilePoint, Topology, TopologyKind, GRADIENT_SCALE,
    },
    util::range::NumRange,
};
