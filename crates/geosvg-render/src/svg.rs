use crate::attrs::format_attributes;
use crate::path::{collect_coordinates, render_geometry};
use crate::scale::{Padding, Projection, compute_transform};
use geosvg_core::Geometry;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Inset of the drawing area inside the canvas.
    pub padding: Padding,
    /// Attributes of the root `<svg>` element.
    pub root_attributes: BTreeMap<String, String>,
}

/// One geometry to draw, with the attribute string attached to each element it produces.
#[derive(Debug, Clone, Copy)]
pub struct Layer<'a> {
    pub geometry: &'a Geometry,
    pub attrs: &'a str,
}

impl<'a> Layer<'a> {
    pub fn new(geometry: &'a Geometry, attrs: &'a str) -> Self {
        Self { geometry, attrs }
    }
}

/// Wraps already-rendered element markup in the root `<svg>` element.
pub fn render_document(
    width: f64,
    height: f64,
    root_attributes: &BTreeMap<String, String>,
    content: &str,
) -> String {
    format!(
        r#"<svg width="{width:.6}" height="{height:.6}"{}>{content}</svg>"#,
        format_attributes(root_attributes)
    )
}

/// Renders `layers` into a `width` x `height` document.
///
/// Coordinates of every layer are gathered first so that a single transform covers the whole
/// drawing; layers are then emitted in order.
pub fn render_svg(
    width: f64,
    height: f64,
    options: &SvgRenderOptions,
    projection: &dyn Projection,
    layers: &[Layer<'_>],
) -> String {
    let mut coords = Vec::new();
    for layer in layers {
        collect_coordinates(layer.geometry, &mut coords);
    }
    let transform = compute_transform(width, height, options.padding, &coords, projection);

    let mut content = String::new();
    for layer in layers {
        render_geometry(&mut content, &transform, layer.geometry, layer.attrs);
    }
    tracing::debug!(
        layers = layers.len(),
        coordinates = coords.len(),
        bytes = content.len(),
        "rendered svg body"
    );

    render_document(width, height, &options.root_attributes, &content)
}
