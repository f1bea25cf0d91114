use crate::{
    config::{GeneratorConfig, ResolutionLevel},
    manifest::{Manifest, ManifestConfig},
    raster::Raster,
    render::ThumbnailRenderer,
    timed,
    topology::{Dimensions, Topology, TopologyKind},
};
use anyhow::Context;
use log::{info, log, warn, Level};
use std::{
    fs,
    path::{Path, PathBuf},
};
use validator::Validate;

/// Drives a full generation run. For each enabled topology, this generates the
/// three rasters, then the manifest (if the topology has one), then the
/// thumbnail (if image encoding is available), all into that topology's
/// output directory.
///
/// Everything runs sequentially. Any filesystem error aborts the run
/// immediately, and files written before the failure are left in place.
#[derive(Clone, Debug)]
pub struct MapGenerator {
    config: GeneratorConfig,
    /// `None` if thumbnails are disabled, or this build can't encode images
    renderer: Option<ThumbnailRenderer>,
}

impl MapGenerator {
    /// Create a generator for the given config. Returns an error if the config
    /// is invalid. This is also where the thumbnail capability is checked, so
    /// a missing capability is reported once here rather than per map.
    pub fn new(config: GeneratorConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid config")?;

        let renderer = if config.thumbnail.enabled {
            let renderer = ThumbnailRenderer::detect(config.thumbnail);
            if renderer.is_none() {
                warn!(
                    "Image encoding is not available in this build, \
                    thumbnails will not be generated"
                );
            }
            renderer
        } else {
            None
        };

        Ok(Self { config, renderer })
    }

    /// Replace the thumbnail renderer. Passing `None` disables thumbnails,
    /// same as running in a build without image encoding.
    pub fn with_renderer(mut self, renderer: Option<ThumbnailRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Can this generator write thumbnails?
    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Generate every enabled topology, circle first. Returns one report per
    /// generated map.
    pub fn run(&self) -> anyhow::Result<Vec<MapReport>> {
        let mut reports = Vec::new();
        if self.config.circle.enabled {
            let circle = &self.config.circle;
            reports.push(self.generate_map(
                &circle.shape,
                &circle.directory,
                None,
            )?);
        }
        if self.config.square.enabled {
            let square = &self.config.square;
            reports.push(self.generate_map(
                &square.shape,
                &square.directory,
                Some(&square.manifest),
            )?);
        }
        Ok(reports)
    }

    /// Generate a single map into `<output_dir>/<directory>`. This is the same
    /// for every topology, only the distance field and magnitude mapping
    /// differ.
    pub fn generate_map(
        &self,
        topology: &impl Topology,
        directory: &str,
        manifest: Option<&ManifestConfig>,
    ) -> anyhow::Result<MapReport> {
        let kind = topology.kind();
        let directory = self.config.output_dir.join(directory);
        info!("Generating {} map in {:?}", kind, directory);
        fs::create_dir_all(&directory).with_context(|| {
            format!("error creating output directory {:?}", directory)
        })?;

        let [full, quarter, sixteenth] = ResolutionLevel::ALL;
        let rasters = [
            self.generate_raster(topology, &directory, full)?,
            self.generate_raster(topology, &directory, quarter)?,
            self.generate_raster(topology, &directory, sixteenth)?,
        ];
        let summaries = [
            RasterSummary::new(full, &directory, &rasters[0]),
            RasterSummary::new(quarter, &directory, &rasters[1]),
            RasterSummary::new(sixteenth, &directory, &rasters[2]),
        ];

        // Manifest comes after all rasters, since it needs their land counts
        let manifest_path = match manifest {
            Some(manifest_config) => {
                let path = directory.join("manifest.json");
                let [full, quarter, sixteenth] = &rasters;
                Manifest::new(manifest_config, [full, quarter, sixteenth])
                    .write_to(&path)?;
                info!("Generated manifest {:?}", path);
                Some(path)
            }
            None => None,
        };

        let thumbnail_path = match &self.renderer {
            Some(renderer) => {
                let path = directory.join(renderer.file_name());
                let dimensions = renderer.write_to(
                    topology,
                    self.config.resolutions.quarter,
                    &path,
                )?;
                info!("Generated thumbnail {:?} ({})", path, dimensions);
                Some(path)
            }
            None => {
                log!(
                    self.thumbnail_skip_level(),
                    "Skipping thumbnail for {} map",
                    kind
                );
                None
            }
        };

        Ok(MapReport {
            kind,
            directory,
            rasters: summaries,
            manifest: manifest_path,
            thumbnail: thumbnail_path,
        })
    }

    /// Skipping a thumbnail is only worth a warning if one was asked for and
    /// couldn't be made
    fn thumbnail_skip_level(&self) -> Level {
        if self.config.thumbnail.enabled {
            Level::Warn
        } else {
            Level::Debug
        }
    }

    /// Generate and write one raster
    fn generate_raster(
        &self,
        topology: &impl Topology,
        directory: &Path,
        level: ResolutionLevel,
    ) -> anyhow::Result<Raster> {
        let dimensions = self.config.resolutions.get(level);
        let path = directory.join(level.file_name());
        let raster = timed!(
            format!("{} raster generation ({})", level, dimensions),
            Raster::generate(topology, dimensions)
        );
        raster.write_to(&path)?;
        info!(
            "Generated {:?}: {}, {} land tiles",
            path,
            dimensions,
            raster.land_tiles()
        );
        Ok(raster)
    }
}

/// What was written for one raster.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterSummary {
    pub level: ResolutionLevel,
    pub dimensions: Dimensions,
    pub path: PathBuf,
    pub land_tiles: usize,
}

impl RasterSummary {
    fn new(level: ResolutionLevel, directory: &Path, raster: &Raster) -> Self {
        Self {
            level,
            dimensions: raster.dimensions(),
            path: directory.join(level.file_name()),
            land_tiles: raster.land_tiles(),
        }
    }
}

/// What was written for one map.
#[derive(Clone, Debug, PartialEq)]
pub struct MapReport {
    pub kind: TopologyKind,
    pub directory: PathBuf,
    /// One per resolution level, from largest to smallest
    pub rasters: [RasterSummary; 3],
    /// Path of the manifest, for topologies that have one
    pub manifest: Option<PathBuf>,
    /// Path of the thumbnail, if one was written
    pub thumbnail: Option<PathBuf>,
}

impl MapReport {
    /// Get the summary for one resolution level
    pub fn raster(&self, level: ResolutionLevel) -> &RasterSummary {
        match level {
            ResolutionLevel::Full => &self.rasters[0],
            ResolutionLevel::Quarter => &self.rasters[1],
            ResolutionLevel::Sixteenth => &self.rasters[2],
        }
    }
}
