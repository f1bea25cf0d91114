use crate::{
    terrain::TerrainByte,
    timed,
    topology::{Dimensions, TilePoint, Topology},
};
use anyhow::Context;
use std::{fs::OpenOptions, io::Write, path::Path};

/// A fully generated map at one resolution: one [TerrainByte] per tile, in
/// row-major order (y outer, x inner).
///
/// ## File Format
/// [Raster::write_to] writes the tile bytes verbatim. There is no header,
/// magic number or length prefix, so a file is exactly `width * height` bytes
/// and readers must know the dimensions by convention (see
/// [ResolutionLevel](crate::ResolutionLevel)).
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    dimensions: Dimensions,
    tiles: Vec<TerrainByte>,
    land_tiles: usize,
}

impl Raster {
    /// Generate a raster for the given topology. Every tile is evaluated
    /// independently from the continuous distance field at this resolution,
    /// nothing is resampled from other resolutions.
    pub fn generate(topology: &impl Topology, dimensions: Dimensions) -> Self {
        let mut tiles = Vec::with_capacity(dimensions.area());
        let mut land_tiles = 0;

        for point in dimensions.tiles() {
            let byte = topology.terrain_at(point, dimensions);
            if byte.is_land() {
                land_tiles += 1;
            }
            tiles.push(byte);
        }

        debug_assert_eq!(tiles.len(), dimensions.area());
        Self {
            dimensions,
            tiles,
            land_tiles,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// All tiles, in row-major order
    pub fn tiles(&self) -> &[TerrainByte] {
        &self.tiles
    }

    /// Number of tiles with the land flag set
    pub fn land_tiles(&self) -> usize {
        self.land_tiles
    }

    /// Fraction of the map that is land, in `[0, 1]`
    pub fn land_fraction(&self) -> f64 {
        self.land_tiles as f64 / self.tiles.len() as f64
    }

    /// Get a single tile. Returns `None` if the point is out of bounds.
    pub fn get(&self, point: TilePoint) -> Option<TerrainByte> {
        self.dimensions
            .index_of(point)
            .map(|index| self.tiles[index])
    }

    /// The raw file contents of this raster
    pub fn to_bytes(&self) -> Vec<u8> {
        self.tiles.iter().map(|tile| tile.inner()).collect()
    }

    /// Write the raster to a file, replacing it if it exists already.
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        timed!(format!("Writing {:?}", path), {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
                .with_context(|| {
                    format!("error opening raster file {:?}", path)
                })?;
            file.write_all(&self.to_bytes())
                .with_context(|| format!("error writing to file {:?}", path))?;
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use crate::topology::{CircleTopology, SquareTopology};

    #[test]
    fn test_generate_small_circle() {
        let raster =
            Raster::generate(&CircleTopology::default(), Dimensions::new(4, 4));
        assert_eq!(raster.tiles().len(), 16);
        assert_eq!(raster.get(TilePoint::new(2, 2)).unwrap().inner(), 148);
        assert_eq!(raster.get(TilePoint::new(0, 0)).unwrap().inner(), 32);
        assert_eq!(raster.get(TilePoint::new(4, 0)), None);

        let land = raster.tiles().iter().filter(|t| t.is_land()).count();
        assert_eq!(raster.land_tiles(), land);
    }

    #[test]
    fn test_generate_small_square() {
        let raster =
            Raster::generate(&SquareTopology::default(), Dimensions::new(10, 10));
        // Land is every tile with both coordinates in [1, 9]
        assert_eq!(raster.land_tiles(), 81);
        assert_approx_eq!(raster.land_fraction(), 0.81);
        assert_eq!(raster.get(TilePoint::new(5, 5)).unwrap().inner(), 159);
        assert_eq!(raster.get(TilePoint::new(5, 7)).unwrap().inner(), 128);
    }

    #[test]
    fn test_to_bytes_row_major() {
        let dims = Dimensions::new(7, 3);
        let topology = SquareTopology::default();
        let raster = Raster::generate(&topology, dims);
        let bytes = raster.to_bytes();
        assert_eq!(bytes.len(), 21);
        for point in dims.tiles() {
            let index = (point.y * 7 + point.x) as usize;
            assert_eq!(
                bytes[index],
                topology.terrain_at(point, dims).inner(),
                "wrong byte at {}",
                point
            );
        }
    }
}
