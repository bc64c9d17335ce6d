use geosvg_core::{Coord, coord};
use geosvg_render::Projection;
use std::f64::consts::PI;

const MAP_WIDTH: f64 = 100.0;
const MAP_HEIGHT: f64 = 100.0;

/// Spherical Mercator onto a 100 x 100 plane, y growing northward.
///
/// Input is `(longitude, latitude)` in degrees. Latitudes at or beyond the poles are not finite.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mercator;

impl Projection for Mercator {
    fn project(&self, c: Coord) -> Coord {
        mercator(c)
    }
}

pub fn mercator(c: Coord) -> Coord {
    let x = (c.x + 180.0) * (MAP_WIDTH / 360.0);

    let lat_rad = c.y * PI / 180.0;
    let merc_n = ((PI / 4.0) + (lat_rad / 2.0)).tan().ln();
    let y = (MAP_HEIGHT / 2.0) - (MAP_HEIGHT * merc_n / (2.0 * PI));

    coord(x, MAP_HEIGHT - y)
}
