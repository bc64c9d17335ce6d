//! GeoJSON (RFC 7946) input boundary.
//!
//! Only the members needed for drawing are read: `type`, `coordinates`, `geometries`,
//! `geometry`, `properties` and `features`. Everything else (`bbox`, `crs`, `id`, foreign
//! members) is ignored.

use crate::geom::{Coord, coord};
use crate::geometry::{Feature, FeatureCollection, Geometry, Properties};
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Any top-level GeoJSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    Geometry(Geometry),
    Feature(Feature),
    FeatureCollection(FeatureCollection),
}

pub fn parse_geometry(text: &str) -> Result<Geometry> {
    serde_json::from_str(text).map_err(|err| {
        tracing::debug!(error = %err, "geometry rejected");
        Error::InvalidGeometry {
            input: text.to_string(),
        }
    })
}

pub fn parse_feature(text: &str) -> Result<Feature> {
    serde_json::from_str(text).map_err(|err| {
        tracing::debug!(error = %err, "feature rejected");
        Error::InvalidFeature {
            input: text.to_string(),
        }
    })
}

pub fn parse_feature_collection(text: &str) -> Result<FeatureCollection> {
    serde_json::from_str(text).map_err(|err| {
        tracing::debug!(error = %err, "feature collection rejected");
        Error::InvalidFeatureCollection {
            input: text.to_string(),
        }
    })
}

/// Parses any GeoJSON object, dispatching on its top-level `type` member.
pub fn parse_any(text: &str) -> Result<GeoJson> {
    let value: Value = serde_json::from_str(text).map_err(|err| {
        tracing::debug!(error = %err, "GeoJSON text is not JSON");
        Error::InvalidGeoJson {
            input: text.to_string(),
        }
    })?;

    match value.get("type").and_then(Value::as_str) {
        Some("Feature") => Ok(GeoJson::Feature(parse_feature(text)?)),
        Some("FeatureCollection") => Ok(GeoJson::FeatureCollection(parse_feature_collection(
            text,
        )?)),
        Some(_) => Ok(GeoJson::Geometry(parse_geometry(text)?)),
        None => Err(Error::InvalidGeoJson {
            input: text.to_string(),
        }),
    }
}

/// A GeoJSON position. Extra ordinates (altitude, measures) are accepted and dropped.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub(crate) struct Position(Coord);

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(value: Vec<f64>) -> std::result::Result<Self, Self::Error> {
        match value.as_slice() {
            [x, y, ..] => Ok(Position(coord(*x, *y))),
            other => Err(format!(
                "a position needs at least 2 numbers, got {}",
                other.len()
            )),
        }
    }
}

fn positions(ps: Vec<Position>) -> Vec<Coord> {
    ps.into_iter().map(|p| p.0).collect()
}

fn rings(rs: Vec<Vec<Position>>) -> Vec<Vec<Coord>> {
    rs.into_iter().map(positions).collect()
}

#[derive(Deserialize)]
#[serde(tag = "type")]
pub(crate) enum GeometryRepr {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl From<GeometryRepr> for Geometry {
    fn from(repr: GeometryRepr) -> Self {
        match repr {
            GeometryRepr::Point { coordinates } => Geometry::Point(coordinates.0),
            GeometryRepr::MultiPoint { coordinates } => Geometry::MultiPoint(positions(coordinates)),
            GeometryRepr::LineString { coordinates } => Geometry::LineString(positions(coordinates)),
            GeometryRepr::MultiLineString { coordinates } => {
                Geometry::MultiLineString(rings(coordinates))
            }
            GeometryRepr::Polygon { coordinates } => Geometry::Polygon(rings(coordinates)),
            GeometryRepr::MultiPolygon { coordinates } => {
                Geometry::MultiPolygon(coordinates.into_iter().map(rings).collect())
            }
            GeometryRepr::GeometryCollection { geometries } => {
                Geometry::GeometryCollection(geometries)
            }
        }
    }
}

#[derive(Deserialize)]
enum FeatureTag {
    Feature,
}

#[derive(Deserialize)]
pub(crate) struct FeatureRepr {
    #[serde(rename = "type")]
    _tag: FeatureTag,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Option<Properties>,
}

impl From<FeatureRepr> for Feature {
    fn from(repr: FeatureRepr) -> Self {
        Feature {
            geometry: repr.geometry,
            properties: repr.properties.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
enum FeatureCollectionTag {
    FeatureCollection,
}

#[derive(Deserialize)]
pub(crate) struct FeatureCollectionRepr {
    #[serde(rename = "type")]
    _tag: FeatureCollectionTag,
    features: Vec<Feature>,
}

impl From<FeatureCollectionRepr> for FeatureCollection {
    fn from(repr: FeatureCollectionRepr) -> Self {
        FeatureCollection {
            features: repr.features,
        }
    }
}
