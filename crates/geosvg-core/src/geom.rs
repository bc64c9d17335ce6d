#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

/// A single `(x, y)` position: `(longitude, latitude)` or already-projected planar units.
pub type Coord = euclid::Point2D<f64, Unit>;

pub fn coord(x: f64, y: f64) -> Coord {
    euclid::point2(x, y)
}
