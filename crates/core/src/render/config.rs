use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Configuration for the thumbnail preview. These options have no bearing on
/// the generated rasters, only on the preview image.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Render a thumbnail for each map? Even if enabled, thumbnails are
    /// skipped when this build can't encode images.
    pub enabled: bool,

    /// Scale factor applied to the quarter resolution map to get the
    /// thumbnail size. E.g. with a 400x400 quarter map and 0.5 quality, the
    /// thumbnail is 200x200.
    #[validate(range(min = 0.001, max = 1.0))]
    pub quality: f64,

    /// Quality passed to the encoder, in `[1, 100]`
    #[validate(range(min = 1, max = 100))]
    pub encoder_quality: u8,

    /// The image format to write
    pub format: ThumbnailFormat,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            quality: 0.5,
            encoder_quality: 90,
            format: ThumbnailFormat::Webp,
        }
    }
}

/// Supported thumbnail image formats.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ThumbnailFormat {
    /// Lossy WebP, encoded at [ThumbnailConfig::encoder_quality]
    Webp,
    /// Lossy JPEG, encoded at [ThumbnailConfig::encoder_quality]
    Jpeg,
}

impl ThumbnailFormat {
    /// Name of the thumbnail file in each map directory
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Webp => "thumbnail.webp",
            Self::Jpeg => "thumbnail.jpg",
        }
    }
}
