//! The packed per-tile terrain encoding. Every tile of a generated map is
//! stored as exactly one byte:
//!
//! ```text
//!  bit  7      6          5      4..0
//!     [land][shoreline][ocean][magnitude]
//! ```
//!
//! - **land** is set for land tiles
//! - **shoreline** is reserved. Generators never set it, so it is always 0 in
//!   generated output
//! - **ocean** is set for water tiles. Land and ocean are mutually exclusive
//! - **magnitude** is an unsigned intensity in `[0, 31]`: depth for ocean,
//!   elevation/richness for land

use crate::util::{self, range::NumRange};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// High-level category of a tile, as encoded in its flag bits.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileCategory {
    Land,
    Ocean,
}

/// A single packed terrain byte. See the module-level docs for the layout.
///
/// The constructors [TerrainByte::land] and [TerrainByte::ocean] are the only
/// way generation produces values, and they guarantee the flag invariants.
/// `From<u8>` exists for inspecting raw raster files, and makes no such
/// guarantee.
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq, Hash, From, Into)]
#[display(fmt = "{:#010b}", "self.0")]
pub struct TerrainByte(u8);

impl TerrainByte {
    pub const LAND_FLAG: u8 = 0b1000_0000;
    pub const SHORELINE_FLAG: u8 = 0b0100_0000;
    pub const OCEAN_FLAG: u8 = 0b0010_0000;
    pub const MAGNITUDE_MASK: u8 = 0b0001_1111;
    /// Every magnitude is clamped into this range before packing, so it can
    /// never overflow into the flag bits.
    pub const MAGNITUDE_RANGE: NumRange<u8> =
        NumRange::new(0, Self::MAGNITUDE_MASK);

    /// Pack a land tile with the given magnitude. Magnitudes above the max are
    /// clamped down.
    pub fn land(magnitude: u8) -> Self {
        Self(Self::LAND_FLAG | Self::MAGNITUDE_RANGE.clamp(magnitude))
    }

    /// Pack an ocean tile with the given magnitude. Magnitudes above the max
    /// are clamped down.
    pub fn ocean(magnitude: u8) -> Self {
        Self(Self::OCEAN_FLAG | Self::MAGNITUDE_RANGE.clamp(magnitude))
    }

    /// Pack a tile of either category.
    pub fn pack(category: TileCategory, magnitude: u8) -> Self {
        match category {
            TileCategory::Land => Self::land(magnitude),
            TileCategory::Ocean => Self::ocean(magnitude),
        }
    }

    /// Convert a raw (unbounded, fractional) magnitude measure into a valid
    /// magnitude. The value is truncated toward zero, then clamped to
    /// [Self::MAGNITUDE_RANGE].
    pub fn magnitude_from(raw: f64) -> u8 {
        util::truncate_into(raw, Self::MAGNITUDE_RANGE)
    }

    pub fn is_land(self) -> bool {
        self.0 & Self::LAND_FLAG != 0
    }

    pub fn is_ocean(self) -> bool {
        self.0 & Self::OCEAN_FLAG != 0
    }

    /// Always false for generated tiles, the bit is reserved.
    pub fn is_shoreline(self) -> bool {
        self.0 & Self::SHORELINE_FLAG != 0
    }

    pub fn magnitude(self) -> u8 {
        self.0 & Self::MAGNITUDE_MASK
    }

    /// Get the category of this tile, based on the land flag.
    pub fn category(self) -> TileCategory {
        if self.is_land() {
            TileCategory::Land
        } else {
            TileCategory::Ocean
        }
    }

    /// The raw byte value
    pub fn inner(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_land() {
        let byte = TerrainByte::land(20);
        assert_eq!(byte.inner(), 148);
        assert!(byte.is_land());
        assert!(!byte.is_ocean());
        assert!(!byte.is_shoreline());
        assert_eq!(byte.magnitude(), 20);
        assert_eq!(byte.category(), TileCategory::Land);
    }

    #[test]
    fn test_pack_ocean() {
        let byte = TerrainByte::ocean(0);
        assert_eq!(byte.inner(), 32);
        assert!(byte.is_ocean());
        assert!(!byte.is_land());
        assert_eq!(byte.category(), TileCategory::Ocean);
    }

    /// Out-of-range magnitudes must never bleed into the flag bits
    #[test]
    fn test_pack_clamps_magnitude() {
        for magnitude in 0..=u8::MAX {
            for byte in &[
                TerrainByte::land(magnitude),
                TerrainByte::ocean(magnitude),
            ] {
                assert!(
                    !(byte.is_land() && byte.is_ocean()),
                    "both flags set in {}",
                    byte
                );
                assert!(!byte.is_shoreline(), "shoreline set in {}", byte);
                assert_eq!(byte.magnitude(), magnitude.min(31));
            }
        }
        assert_eq!(TerrainByte::land(200).inner(), 0x80 | 31);
        assert_eq!(TerrainByte::ocean(32).inner(), 0x20 | 31);
    }

    #[test]
    fn test_magnitude_from() {
        assert_eq!(TerrainByte::magnitude_from(20.0), 20);
        assert_eq!(TerrainByte::magnitude_from(0.42799), 0);
        assert_eq!(TerrainByte::magnitude_from(30.99), 30);
        assert_eq!(TerrainByte::magnitude_from(64.0), 31);
        assert_eq!(TerrainByte::magnitude_from(-3.0), 0);
    }

    #[test]
    fn test_pack_by_category() {
        assert_eq!(
            TerrainByte::pack(TileCategory::Land, 31),
            TerrainByte::from(159)
        );
        assert_eq!(
            TerrainByte::pack(TileCategory::Ocean, 7),
            TerrainByte::from(0b0010_0111)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TerrainByte::land(0).to_string(), "0b10000000");
    }
}
