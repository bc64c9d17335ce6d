#![forbid(unsafe_code)]

//! `geosvg` is a headless GeoJSON to SVG renderer.
//!
//! Geometries, features and feature collections are added to an [`Svg`], then drawn into a
//! canvas of a given size. All coordinates are fitted into the canvas with a single uniform
//! scale, optionally after a [`Projection`] such as [`Mercator`].
//!
//! ```
//! use geosvg::Svg;
//!
//! let mut svg = Svg::new();
//! svg.add_geometry(r#"{"type": "LineString", "coordinates": [[10.4,20.5], [40.3,42.3]]}"#)?;
//! assert_eq!(
//!     svg.draw(400.0, 400.0),
//!     r#"<svg width="400.000000" height="400.000000"><path d="M0.000000 291.638796,400.000000 0.000000"/></svg>"#
//! );
//! # Ok::<(), geosvg::Error>(())
//! ```
//!
//! # Features
//!
//! - `raster`: PNG output via pure-Rust SVG rasterization (`geosvg::raster`)

pub mod drawing;
pub mod options;
pub mod projection;

#[cfg(feature = "raster")]
pub mod raster;

pub use drawing::Svg;
pub use geosvg_core::*;
pub use geosvg_render::{Bounds, Identity, Padding, Projection};
pub use options::{DrawOptions, PropertyFilter};
pub use projection::{Mercator, mercator};

/// Lower-level scaling and rendering building blocks.
pub mod render {
    pub use geosvg_render::*;
}
