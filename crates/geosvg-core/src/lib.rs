#![forbid(unsafe_code)]

//! GeoJSON geometry model + parser (headless).
//!
//! This crate owns the input side of `geosvg`: the typed geometry values that the renderer walks,
//! and the GeoJSON boundary that turns text into those values. Everything structural is
//! rejected here, so the renderer can stay total over well-formed input.

pub mod error;
pub mod geojson;
pub mod geom;
pub mod geometry;

pub use error::{Error, Result};
pub use geojson::{GeoJson, parse_any, parse_feature, parse_feature_collection, parse_geometry};
pub use geom::{Coord, coord};
pub use geometry::{Feature, FeatureCollection, Geometry, Properties};

#[cfg(test)]
mod tests;
