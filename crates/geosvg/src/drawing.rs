use crate::options::{DrawOptions, PropertyFilter};
use geosvg_core::{Coord, Feature, FeatureCollection, Geometry, Result};
use geosvg_render::{
    Identity, Layer, Padding, Projection, SvgRenderOptions, attributes_from_properties,
    bounding_rectangle, collect_coordinates, render_svg,
};
use std::collections::BTreeMap;

/// A drawing of GeoJSON geometries, features and feature collections.
///
/// Inputs are drawn in groups: plain geometries first, then features, then feature collections,
/// each group in insertion order. Defaults: no padding, no root attributes, only the `class`
/// property is copied onto elements.
#[derive(Debug, Clone, Default)]
pub struct Svg {
    property_filter: PropertyFilter,
    padding: Padding,
    attributes: BTreeMap<String, String>,
    geometries: Vec<Geometry>,
    features: Vec<Feature>,
    feature_collections: Vec<FeatureCollection>,
}

impl Svg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Adds an attribute to the root `<svg>` element, replacing any previous value for `key`.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_attributes<I, K, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Copies exactly these feature properties onto rendered elements.
    pub fn use_properties<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.property_filter = PropertyFilter::only(keys);
        self
    }

    pub fn use_property_filter(mut self, filter: PropertyFilter) -> Self {
        self.property_filter = filter;
        self
    }

    /// Applies config-file settings. Root attributes are merged; padding and the property
    /// selection are replaced when present.
    pub fn apply_options(&mut self, options: &DrawOptions) {
        if let Some(padding) = options.padding {
            self.padding = padding;
        }
        self.attributes.extend(
            options
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        if let Some(keys) = &options.properties {
            self.property_filter = PropertyFilter::only(keys.iter().cloned());
        }
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Parses and adds a GeoJSON geometry. On error the drawing is left unchanged.
    pub fn add_geometry(&mut self, text: &str) -> Result<()> {
        let g = geosvg_core::parse_geometry(text)?;
        self.append_geometry(g);
        Ok(())
    }

    pub fn append_geometry(&mut self, geometry: Geometry) {
        self.geometries.push(geometry);
    }

    /// Parses and adds a GeoJSON feature. On error the drawing is left unchanged.
    pub fn add_feature(&mut self, text: &str) -> Result<()> {
        let f = geosvg_core::parse_feature(text)?;
        self.append_feature(f);
        Ok(())
    }

    pub fn append_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Parses and adds a GeoJSON feature collection. On error the drawing is left unchanged.
    pub fn add_feature_collection(&mut self, text: &str) -> Result<()> {
        let fc = geosvg_core::parse_feature_collection(text)?;
        self.append_feature_collection(fc);
        Ok(())
    }

    pub fn append_feature_collection(&mut self, collection: FeatureCollection) {
        self.feature_collections.push(collection);
    }

    /// Renders the drawing into a `width` x `height` SVG document.
    pub fn draw(&self, width: f64, height: f64) -> String {
        self.draw_with_projection(width, height, &Identity)
    }

    /// Like [`Svg::draw`], converting every coordinate with `projection` before fitting.
    pub fn draw_with_projection(
        &self,
        width: f64,
        height: f64,
        projection: &dyn Projection,
    ) -> String {
        let featured: Vec<(&Geometry, String)> = self
            .all_features()
            .filter_map(|f| {
                let g = f.geometry.as_ref()?;
                let attrs = attributes_from_properties(
                    |k| self.property_filter.allows(k),
                    &f.properties,
                );
                Some((g, attrs))
            })
            .collect();

        let layers: Vec<Layer<'_>> = self
            .geometries
            .iter()
            .map(|g| Layer::new(g, ""))
            .chain(featured.iter().map(|(g, attrs)| Layer::new(g, attrs)))
            .collect();

        tracing::debug!(width, height, layers = layers.len(), "draw");

        let options = SvgRenderOptions {
            padding: self.padding,
            root_attributes: self.attributes.clone(),
        };
        render_svg(width, height, &options, projection, &layers)
    }

    /// Every raw coordinate in the drawing, in draw order.
    pub fn points(&self) -> Vec<Coord> {
        let mut out = Vec::new();
        for g in &self.geometries {
            collect_coordinates(g, &mut out);
        }
        for f in self.all_features() {
            if let Some(g) = &f.geometry {
                collect_coordinates(g, &mut out);
            }
        }
        out
    }

    /// Height that keeps the projected drawing's aspect ratio at the given `width`, rounded to
    /// the nearest whole pixel.
    ///
    /// `None` when the ratio is undefined: no coordinates, or a bounding box of zero width
    /// (a single point, identical points, a vertical line).
    pub fn height_for_width(&self, width: f64, projection: &dyn Projection) -> Option<f64> {
        let b = bounding_rectangle(projection, &self.points())?;
        if b.width() == 0.0 {
            tracing::debug!(?b, "zero-width bounds; aspect ratio undefined");
            return None;
        }
        let height = (width * b.height() / b.width() + 0.5).floor();
        height.is_finite().then_some(height)
    }

    fn all_features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().chain(
            self.feature_collections
                .iter()
                .flat_map(|fc| fc.features.iter()),
        )
    }
}
