#![forbid(unsafe_code)]

//! Headless SVG renderer for GeoJSON geometries.
//!
//! Rendering is two passes over the input: [`path::collect_coordinates`] gathers every raw
//! coordinate, [`scale::compute_transform`] fits them into the canvas once, and
//! [`path::render_geometry`] emits the elements through that transform.

pub mod attrs;
pub mod path;
pub mod scale;
pub mod svg;

pub use attrs::{attributes_from_properties, format_attributes};
pub use path::{collect_coordinates, coordinates, render_geometry};
pub use scale::{
    Bounds, Identity, Padding, Projection, ScaleTransform, bounding_rectangle, compute_transform,
};
pub use svg::{Layer, SvgRenderOptions, render_document, render_svg};
