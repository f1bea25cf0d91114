pub mod config;
pub mod unit;

use crate::{
    render::{config::ThumbnailConfig, unit::Color3},
    timed,
    topology::{Dimensions, TilePoint, Topology},
    util::{self, range::NumRange},
};
use anyhow::{anyhow, Context};
use std::{fs, path::Path};

/// Land this close to the coast (exclusive) is drawn as beach
const SHORE_LAND_WIDTH: f64 = 2.0;
/// Water this close to the coast (exclusive) is drawn as shallows
const SHORE_WATER_WIDTH: f64 = 3.0;
/// Distance per shade step of open ocean
const OCEAN_SHADE_STEP: f64 = 20.0;
const OCEAN_SHADE_RANGE: NumRange<u8> = NumRange::new(0, 10);
/// Relief at or above this is drawn as highlands, below as plains
const HIGHLANDS_RELIEF: u8 = 10;
const CHANNEL_RANGE: NumRange<i16> = NumRange::new(0, 255);

const SHORE_LAND_COLOR: Color3 = Color3::new(204, 203, 158);
const SHORE_WATER_COLOR: Color3 = Color3::new(100, 143, 255);

/// Compute the preview color of a single tile. This re-evaluates the
/// topology's distance field at the given (thumbnail) dimensions, so it
/// doesn't depend on any generated raster.
pub fn tile_color(
    topology: &impl Topology,
    point: TilePoint,
    dimensions: Dimensions,
) -> Color3 {
    let sample = topology.sample(point, dimensions);

    if sample.is_land() {
        let relief = topology.relief(&sample);
        if sample.distance > sample.boundary - SHORE_LAND_WIDTH {
            SHORE_LAND_COLOR
        } else if relief < HIGHLANDS_RELIEF {
            // Plains
            Color3::new(190, 220 - 2 * relief, 138)
        } else {
            // Highlands
            let adj = 2 * relief;
            Color3::new(180 + adj / 4, 200 - adj, 130)
        }
    } else if sample.distance < sample.boundary + SHORE_WATER_WIDTH {
        SHORE_WATER_COLOR
    } else {
        // Open ocean gets darker further out
        let shade = util::truncate_into(
            (sample.distance - sample.boundary) / OCEAN_SHADE_STEP,
            OCEAN_SHADE_RANGE,
        );
        let adj = 1 - i16::from(shade);
        let channel = |base: i16| CHANNEL_RANGE.clamp(base + adj) as u8;
        Color3::new(channel(70), channel(132), channel(180))
    }
}

/// A rendered preview image, before encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct Thumbnail {
    dimensions: Dimensions,
    /// Row-major, same as rasters
    pixels: Vec<Color3>,
}

impl Thumbnail {
    /// Color every pixel of a thumbnail with the given dimensions
    pub fn render(topology: &impl Topology, dimensions: Dimensions) -> Self {
        let pixels = dimensions
            .tiles()
            .map(|point| tile_color(topology, point, dimensions))
            .collect();
        Self { dimensions, pixels }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Get a single pixel. Returns `None` if the point is out of bounds.
    pub fn get(&self, point: TilePoint) -> Option<Color3> {
        self.dimensions
            .index_of(point)
            .map(|index| self.pixels[index])
    }

    /// Packed RGB8 pixel data, as image encoders expect it
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color.to_array())
            .collect()
    }
}

/// Renders and encodes thumbnail previews. Image encoding is an optional
/// capability of this crate (the `thumbnail` feature), so a renderer can only
/// be obtained through [ThumbnailRenderer::detect], which returns `None` when
/// the capability is missing. Callers are expected to skip thumbnails in that
/// case rather than fail.
#[derive(Clone, Debug)]
pub struct ThumbnailRenderer {
    config: ThumbnailConfig,
}

impl ThumbnailRenderer {
    /// Check whether this build can encode images, and if so, create a
    /// renderer. This does not look at [ThumbnailConfig::enabled], that's
    /// up to the caller.
    pub fn detect(config: ThumbnailConfig) -> Option<Self> {
        if cfg!(feature = "thumbnail") {
            Some(Self { config })
        } else {
            None
        }
    }

    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    /// Name of the thumbnail file in each map directory
    pub fn file_name(&self) -> &'static str {
        self.config.format.file_name()
    }

    /// Size of the thumbnail derived from a source (quarter resolution) map.
    /// Each side is at least 1.
    pub fn dimensions(&self, source: Dimensions) -> Dimensions {
        source.scale(self.config.quality)
    }

    /// Render a thumbnail for the given topology. `source` is the size of the
    /// map the thumbnail is scaled down from.
    pub fn render(
        &self,
        topology: &impl Topology,
        source: Dimensions,
    ) -> Thumbnail {
        Thumbnail::render(topology, self.dimensions(source))
    }

    /// Encode a thumbnail in the configured format
    #[cfg(feature = "thumbnail")]
    pub fn encode(&self, thumbnail: &Thumbnail) -> anyhow::Result<Vec<u8>> {
        use crate::render::config::ThumbnailFormat;
        use image::{codecs::jpeg::JpegEncoder, ExtendedColorType, ImageEncoder};

        let Dimensions { width, height } = thumbnail.dimensions();
        let pixels = thumbnail.to_rgb_bytes();
        let quality = self.config.encoder_quality;
        match self.config.format {
            ThumbnailFormat::Webp => {
                let encoded = webp::Encoder::from_rgb(&pixels, width, height)
                    .encode_simple(false, f32::from(quality))
                    .map_err(|err| {
                        anyhow!("error encoding webp thumbnail: {:?}", err)
                    })?;
                Ok(encoded.to_vec())
            }
            ThumbnailFormat::Jpeg => {
                let mut buffer = Vec::new();
                JpegEncoder::new_with_quality(&mut buffer, quality)
                    .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
                    .context("error encoding jpeg thumbnail")?;
                Ok(buffer)
            }
        }
    }

    /// Without the `thumbnail` feature, [ThumbnailRenderer::detect] never
    /// hands out a renderer, so this can't actually be reached.
    #[cfg(not(feature = "thumbnail"))]
    pub fn encode(&self, _thumbnail: &Thumbnail) -> anyhow::Result<Vec<u8>> {
        Err(anyhow!("image encoding is not available in this build"))
    }

    /// Render, encode and write a thumbnail in one go. Returns the dimensions
    /// of the written image.
    pub fn write_to(
        &self,
        topology: &impl Topology,
        source: Dimensions,
        path: &Path,
    ) -> anyhow::Result<Dimensions> {
        let thumbnail = timed!("Thumbnail rendering", {
            self.render(topology, source)
        });
        let bytes = self.encode(&thumbnail)?;
        fs::write(path, bytes)
            .with_context(|| format!("error writing thumbnail {:?}", path))?;
        Ok(thumbnail.dimensions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{CircleTopology, SquareTopology};

    /// Same dimensions as the default thumbnail
    const DIMS: Dimensions = Dimensions::new(200, 200);

    #[test]
    fn test_land_colors() {
        let square = SquareTopology::default();
        // Boundary is 80. Center of the map has relief 20 -> highlands
        assert_eq!(
            tile_color(&square, TilePoint::new(100, 100), DIMS),
            Color3::new(190, 160, 130)
        );
        // 40 in from the coast, relief 10 -> first highlands shade
        assert_eq!(
            tile_color(&square, TilePoint::new(140, 100), DIMS),
            Color3::new(185, 180, 130)
        );
        // 10 in from the coast, relief 2 -> plains
        assert_eq!(
            tile_color(&square, TilePoint::new(170, 100), DIMS),
            Color3::new(190, 216, 138)
        );
        // 1 in from the coast -> beach
        assert_eq!(
            tile_color(&square, TilePoint::new(179, 100), DIMS),
            SHORE_LAND_COLOR
        );
        // 2 in from the coast is no longer beach
        assert_ne!(
            tile_color(&square, TilePoint::new(178, 100), DIMS),
            SHORE_LAND_COLOR
        );
        // Right on the boundary is land, and beach
        assert_eq!(
            tile_color(&square, TilePoint::new(180, 100), DIMS),
            SHORE_LAND_COLOR
        );
    }

    #[test]
    fn test_water_colors() {
        let square = SquareTopology::default();
        // 2 past the coast -> shallows
        assert_eq!(
            tile_color(&square, TilePoint::new(182, 100), DIMS),
            SHORE_WATER_COLOR
        );
        // 3 past the coast -> open ocean, shade 0
        assert_eq!(
            tile_color(&square, TilePoint::new(183, 100), DIMS),
            Color3::new(71, 133, 181)
        );

        // Corner of a big circle map is far enough out to hit the max shade
        let circle = CircleTopology::default();
        let dims = Dimensions::new(800, 800);
        assert_eq!(
            tile_color(&circle, TilePoint::new(0, 0), dims),
            Color3::new(61, 123, 171)
        );
    }

    #[test]
    fn test_thumbnail_dimensions() {
        let renderer = ThumbnailRenderer {
            config: ThumbnailConfig::default(),
        };
        assert_eq!(
            renderer.dimensions(Dimensions::new(400, 400)),
            Dimensions::new(200, 200)
        );
        assert_eq!(
            renderer.dimensions(Dimensions::new(1, 3)),
            Dimensions::new(1, 1)
        );
    }

    #[test]
    fn test_render_thumbnail() {
        let renderer = ThumbnailRenderer {
            config: ThumbnailConfig::default(),
        };
        let square = SquareTopology::default();
        let thumbnail = renderer.render(&square, Dimensions::new(40, 30));
        assert_eq!(thumbnail.dimensions(), Dimensions::new(20, 15));
        assert_eq!(thumbnail.to_rgb_bytes().len(), 20 * 15 * 3);
        let point = TilePoint::new(3, 4);
        assert_eq!(
            thumbnail.get(point),
            Some(tile_color(&square, point, Dimensions::new(20, 15)))
        );
    }

    #[cfg(feature = "thumbnail")]
    #[test]
    fn test_encode_webp_by_default() {
        let renderer =
            ThumbnailRenderer::detect(ThumbnailConfig::default()).unwrap();
        assert_eq!(renderer.file_name(), "thumbnail.webp");

        let square = SquareTopology::default();
        let thumbnail = renderer.render(&square, Dimensions::new(64, 64));
        let bytes = renderer.encode(&thumbnail).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
        // "VP8 " is the lossy bitstream, lossless would be "VP8L"
        assert_eq!(&bytes[12..16], b"VP8 ");
    }

    #[cfg(feature = "thumbnail")]
    #[test]
    fn test_encode_jpeg() {
        use crate::render::config::ThumbnailFormat;

        let renderer = ThumbnailRenderer::detect(ThumbnailConfig {
            format: ThumbnailFormat::Jpeg,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(renderer.file_name(), "thumbnail.jpg");

        let square = SquareTopology::default();
        let thumbnail = renderer.render(&square, Dimensions::new(64, 64));
        let bytes = renderer.encode(&thumbnail).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }

    #[cfg(not(feature = "thumbnail"))]
    #[test]
    fn test_detect_without_image_support() {
        assert!(ThumbnailRenderer::detect(ThumbnailConfig::default()).is_none());
    }
}
