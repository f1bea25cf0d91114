//! Map shapes. A topology is a pluggable strategy that defines two things:
//! the distance field that shapes the map (distance metric + land boundary),
//! and how a land tile's magnitude is derived from its distance. Everything
//! else (rasterization, thumbnails, manifests) is shared between all
//! topologies.
//!
//! All boundary parameters scale linearly with the shorter side of the map, so
//! the same topology produces the same shape at every resolution.

use crate::terrain::{TerrainByte, TileCategory};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};
use validator::Validate;

/// Multiplier applied to the normalized depth of ocean tiles, and to the
/// normalized relief used for thumbnail coloring.
pub const GRADIENT_SCALE: f64 = 20.0;

/// Width and height of a raster, in tiles.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    Validate,
)]
#[display(fmt = "{}x{}", width, height)]
pub struct Dimensions {
    #[validate(range(min = 1))]
    pub width: u32,
    #[validate(range(min = 1))]
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of tiles
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The center of the grid. This is `(width/2, height/2)` in continuous
    /// coordinates, so for even sizes it sits on a tile corner, not a tile.
    pub fn center(self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Length of the shorter side. All boundary parameters are a fraction of
    /// this value.
    pub fn min_side(self) -> f64 {
        f64::from(self.width.min(self.height))
    }

    /// Scale both sides by a factor, truncating. Each side is at least 1.
    pub fn scale(self, factor: f64) -> Self {
        let scale_side = |side: u32| ((f64::from(side) * factor) as u32).max(1);
        Self::new(scale_side(self.width), scale_side(self.height))
    }

    /// Iterate over every tile position, in row-major order (y outer, x
    /// inner). This is the order tiles are stored in a raster.
    pub fn tiles(self) -> impl Iterator<Item = TilePoint> {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| TilePoint { x, y }))
    }

    /// Get the row-major index of a tile, or `None` if it's out of bounds.
    pub fn index_of(self, point: TilePoint) -> Option<usize> {
        if point.x < self.width && point.y < self.height {
            Some(point.y as usize * self.width as usize + point.x as usize)
        } else {
            None
        }
    }
}

/// The position of a single tile in a grid.
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq, Hash)]
#[display(fmt = "({}, {})", x, y)]
pub struct TilePoint {
    pub x: u32,
    pub y: u32,
}

impl TilePoint {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// How distance from the center of the map is measured. The metric determines
/// the shape of the distance field's level sets.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DistanceMetric {
    /// Straight-line distance. Level sets are circles.
    Euclidean,
    /// Max of the per-axis distances. Level sets are squares.
    Chebyshev,
}

impl DistanceMetric {
    /// Measure the distance between a tile and a continuous point
    pub fn distance(self, point: TilePoint, (cx, cy): (f64, f64)) -> f64 {
        let dx = (f64::from(point.x) - cx).abs();
        let dy = (f64::from(point.y) - cy).abs();
        match self {
            Self::Euclidean => (dx * dx + dy * dy).sqrt(),
            Self::Chebyshev => dx.max(dy),
        }
    }
}

/// The supported map shapes.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Hash,
    StrumDisplay,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TopologyKind {
    Circle,
    Square,
}

/// One evaluation of a distance field: where a tile sits relative to the land
/// boundary, for a particular map size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldSample {
    pub point: TilePoint,
    pub dimensions: Dimensions,
    /// Distance from the center of the map, per the topology's metric
    pub distance: f64,
    /// Distance from the center at which land ends
    pub boundary: f64,
}

impl FieldSample {
    /// Tiles exactly on the boundary are land.
    pub fn category(&self) -> TileCategory {
        if self.distance <= self.boundary {
            TileCategory::Land
        } else {
            TileCategory::Ocean
        }
    }

    pub fn is_land(&self) -> bool {
        self.category() == TileCategory::Land
    }
}

/// A map shape. Implementors supply the metric, boundary ratio and land
/// magnitude mapping, the rest is shared. All methods must be pure: the same
/// tile and dimensions always give the same result.
pub trait Topology: std::fmt::Debug {
    fn kind(&self) -> TopologyKind;

    fn metric(&self) -> DistanceMetric;

    /// The land boundary, as a fraction of the shorter map side
    fn land_ratio(&self) -> f64;

    /// Distance past the boundary over which ocean depth ramps up
    fn ocean_falloff(&self) -> f64;

    /// Magnitude of a tile that's already known to be land
    fn land_magnitude(&self, sample: &FieldSample) -> u8;

    /// Distance from the center at which land ends, for a given map size
    fn boundary(&self, dimensions: Dimensions) -> f64 {
        dimensions.min_side() * self.land_ratio()
    }

    /// Evaluate the distance field for one tile
    fn sample(&self, point: TilePoint, dimensions: Dimensions) -> FieldSample {
        FieldSample {
            point,
            dimensions,
            distance: self.metric().distance(point, dimensions.center()),
            boundary: self.boundary(dimensions),
        }
    }

    /// Magnitude of a tile that's already known to be ocean. Deeper the
    /// further it is from the coast.
    fn ocean_magnitude(&self, sample: &FieldSample) -> u8 {
        TerrainByte::magnitude_from(
            (sample.distance - sample.boundary) / self.ocean_falloff()
                * GRADIENT_SCALE,
        )
    }

    /// Generic land relief: 0 at the coast, up to [GRADIENT_SCALE] at the
    /// center. This is used for coloring, and is independent of whatever
    /// [Self::land_magnitude] packs into the raster.
    fn relief(&self, sample: &FieldSample) -> u8 {
        TerrainByte::magnitude_from(
            (sample.boundary - sample.distance) / sample.boundary
                * GRADIENT_SCALE,
        )
    }

    /// Classify and pack a single tile
    fn pack(&self, sample: &FieldSample) -> TerrainByte {
        match sample.category() {
            TileCategory::Land => TerrainByte::land(self.land_magnitude(sample)),
            TileCategory::Ocean => {
                TerrainByte::ocean(self.ocean_magnitude(sample))
            }
        }
    }

    /// Shorthand for sampling and packing a tile
    fn terrain_at(
        &self,
        point: TilePoint,
        dimensions: Dimensions,
    ) -> TerrainByte {
        self.pack(&self.sample(point, dimensions))
    }
}

/// A circular island. Land magnitude rises linearly from 0 at the coast to
/// `land_scale` at the center.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CircleTopology {
    /// Radius of the island, as a fraction of the shorter map side
    #[validate(range(min = 0.0, max = 1.0))]
    pub land_ratio: f64,
    /// Land magnitude at the very center of the island
    #[validate(range(min = 0.0, max = 31.0))]
    pub land_scale: f64,
    /// See [Topology::ocean_falloff]
    #[validate(range(min = 0.001))]
    pub ocean_falloff: f64,
}

impl Default for CircleTopology {
    fn default() -> Self {
        Self {
            land_ratio: 0.44,
            land_scale: 20.0,
            ocean_falloff: 100.0,
        }
    }
}

impl Topology for CircleTopology {
    fn kind(&self) -> TopologyKind {
        TopologyKind::Circle
    }

    fn metric(&self) -> DistanceMetric {
        DistanceMetric::Euclidean
    }

    fn land_ratio(&self) -> f64 {
        self.land_ratio
    }

    fn ocean_falloff(&self) -> f64 {
        self.ocean_falloff
    }

    fn land_magnitude(&self, sample: &FieldSample) -> u8 {
        TerrainByte::magnitude_from(
            (sample.boundary - sample.distance) / sample.boundary
                * self.land_scale,
        )
    }
}

/// A square landmass. Most land is flat (magnitude 0), except for the crystal
/// zone: a smaller square in the center where magnitude jumps to
/// `crystal_base` at its edge and climbs to the max at the center.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SquareTopology {
    /// Half the side length of the landmass, as a fraction of the shorter map
    /// side
    #[validate(range(min = 0.0, max = 1.0))]
    pub land_ratio: f64,
    /// Half the side length of the crystal zone, as a fraction of the shorter
    /// map side
    #[validate(range(min = 0.0, max = 1.0))]
    pub crystal_ratio: f64,
    /// Magnitude at the outer edge of the crystal zone
    #[validate(range(max = 31))]
    pub crystal_base: u8,
    /// Magnitude gained between the edge of the crystal zone and its center
    #[validate(range(min = 0.0, max = 31.0))]
    pub crystal_scale: f64,
    /// See [Topology::ocean_falloff]
    #[validate(range(min = 0.001))]
    pub ocean_falloff: f64,
}

impl SquareTopology {
    /// Distance from the center at which the crystal zone ends
    pub fn crystal_boundary(&self, dimensions: Dimensions) -> f64 {
        dimensions.min_side() * self.crystal_ratio
    }
}

impl Default for SquareTopology {
    fn default() -> Self {
        Self {
            land_ratio: 0.40,
            crystal_ratio: 0.10,
            crystal_base: 6,
            crystal_scale: 25.0,
            ocean_falloff: 50.0,
        }
    }
}

impl Topology for SquareTopology {
    fn kind(&self) -> TopologyKind {
        TopologyKind::Square
    }

    fn metric(&self) -> DistanceMetric {
        DistanceMetric::Chebyshev
    }

    fn land_ratio(&self) -> f64 {
        self.land_ratio
    }

    fn ocean_falloff(&self) -> f64 {
        self.ocean_falloff
    }

    fn land_magnitude(&self, sample: &FieldSample) -> u8 {
        let crystal_boundary = self.crystal_boundary(sample.dimensions);
        if sample.distance <= crystal_boundary {
            // 1 at the center, 0 at the edge of the crystal zone
            let closeness = 1.0 - sample.distance / crystal_boundary;
            TerrainByte::magnitude_from(
                (closeness * self.crystal_scale).trunc()
                    + f64::from(self.crystal_base),
            )
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_dimensions() {
        let dims = Dimensions::new(4, 3);
        assert_eq!(dims.area(), 12);
        assert_eq!(dims.center(), (2.0, 1.5));
        assert_eq!(dims.min_side(), 3.0);
        assert_eq!(dims.to_string(), "4x3");
        assert_eq!(dims.scale(0.5), Dimensions::new(2, 1));
        assert_eq!(dims.scale(0.01), Dimensions::new(1, 1));
        assert_eq!(Dimensions::new(400, 400).scale(0.5).width, 200);
    }

    #[test]
    fn test_tiles_row_major() {
        let dims = Dimensions::new(3, 2);
        let tiles: Vec<_> = dims.tiles().collect();
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles[0], TilePoint::new(0, 0));
        assert_eq!(tiles[1], TilePoint::new(1, 0));
        assert_eq!(tiles[3], TilePoint::new(0, 1));
        for (i, point) in tiles.into_iter().enumerate() {
            assert_eq!(dims.index_of(point), Some(i));
        }
        assert_eq!(dims.index_of(TilePoint::new(3, 0)), None);
    }

    #[test]
    fn test_distance_metrics() {
        let center = (2.0, 2.0);
        let point = TilePoint::new(0, 0);
        assert_approx_eq!(
            DistanceMetric::Euclidean.distance(point, center),
            8.0f64.sqrt()
        );
        assert_approx_eq!(
            DistanceMetric::Chebyshev.distance(TilePoint::new(5, 1), center),
            3.0
        );
    }

    /// 4x4 circle: center (2,2), radius 1.76
    #[test]
    fn test_circle_small() {
        let topology = CircleTopology::default();
        let dims = Dimensions::new(4, 4);
        assert_approx_eq!(topology.boundary(dims), 1.76);

        let center = topology.sample(TilePoint::new(2, 2), dims);
        assert_eq!(center.distance, 0.0);
        assert_eq!(topology.pack(&center).inner(), 148);

        let corner = topology.sample(TilePoint::new(0, 0), dims);
        assert!(!corner.is_land());
        assert_eq!(topology.pack(&corner).inner(), 32);
    }

    /// 10x10 square: land half size 4, crystal zone 1
    #[test]
    fn test_square_small() {
        let topology = SquareTopology::default();
        let dims = Dimensions::new(10, 10);
        assert_approx_eq!(topology.boundary(dims), 4.0);
        assert_approx_eq!(topology.crystal_boundary(dims), 1.0);

        assert_eq!(topology.terrain_at(TilePoint::new(5, 5), dims).inner(), 159);
        assert_eq!(topology.terrain_at(TilePoint::new(5, 7), dims).inner(), 128);
        // Edge of the crystal zone gets the base magnitude
        assert_eq!(
            topology.terrain_at(TilePoint::new(6, 5), dims),
            TerrainByte::land(6)
        );
        // Way outside the landmass
        assert_eq!(
            topology.terrain_at(TilePoint::new(0, 0), dims),
            TerrainByte::ocean(0)
        );
    }

    #[test]
    fn test_boundary_is_land() {
        // Radius is exactly 22, and (25,3) is exactly 22 from the center
        let circle = CircleTopology::default();
        let dims = Dimensions::new(50, 50);
        let edge = circle.sample(TilePoint::new(25, 3), dims);
        assert_eq!(edge.distance, edge.boundary);
        assert!(edge.is_land());
        assert_eq!(circle.pack(&edge), TerrainByte::land(0));
        assert!(!circle.sample(TilePoint::new(25, 2), dims).is_land());

        let square = SquareTopology::default();
        let dims = Dimensions::new(10, 10);
        for point in &[TilePoint::new(1, 5), TilePoint::new(9, 9)] {
            let edge = square.sample(*point, dims);
            assert_eq!(edge.distance, edge.boundary);
            assert!(edge.is_land(), "{} should be land", point);
        }
        assert!(!square.sample(TilePoint::new(0, 5), dims).is_land());
    }

    #[test]
    fn test_ocean_depth() {
        let circle = CircleTopology::default();
        let dims = Dimensions::new(800, 800);
        // Corner is ~565.7 from the center, boundary is 352
        let corner = circle.sample(TilePoint::new(0, 0), dims);
        assert_eq!(circle.ocean_magnitude(&corner), 31);
        // 46 past the boundary -> 46 / 100 * 20
        let near = circle.sample(TilePoint::new(400, 798), dims);
        assert_approx_eq!(near.distance - near.boundary, 46.0);
        assert_eq!(circle.ocean_magnitude(&near), 9);

        let square = SquareTopology::default();
        // 50 past the boundary -> 50 / 50 * 20
        let near = square.sample(TilePoint::new(400, 770), dims);
        assert_approx_eq!(near.distance - near.boundary, 50.0);
        assert_eq!(square.ocean_magnitude(&near), 20);
    }

    #[test]
    fn test_relief() {
        let square = SquareTopology::default();
        let dims = Dimensions::new(200, 200);
        // Boundary 80, 40 in from the coast -> 0.5 * 20
        let sample = square.sample(TilePoint::new(140, 100), dims);
        assert_eq!(square.relief(&sample), 10);
        // Relief is independent of the packed magnitude, which is flat here
        assert_eq!(square.land_magnitude(&sample), 0);
    }
}
