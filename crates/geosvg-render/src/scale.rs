//! Fitting input coordinates into a padded canvas.
//!
//! A [`ScaleTransform`] is computed once per render from the complete coordinate set and then
//! applied to every point. It must not be reused for a different set of geometries: the bounding
//! box it closes over would be stale.

use geosvg_core::{Coord, coord};
use serde::{Deserialize, Serialize};

/// A coordinate pre-transform applied before bounding-box computation and scaling.
///
/// Implemented for any `Fn(Coord) -> Coord`, so closures can be passed directly.
pub trait Projection {
    fn project(&self, c: Coord) -> Coord;
}

impl<F> Projection for F
where
    F: Fn(Coord) -> Coord,
{
    fn project(&self, c: Coord) -> Coord {
        self(c)
    }
}

/// The projection that leaves coordinates untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Projection for Identity {
    fn project(&self, c: Coord) -> Coord {
        c
    }
}

/// Canvas padding, in pixels.
///
/// Not validated: padding larger than the canvas yields a negative drawing area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Axis-aligned bounds of the projected coordinates, or `None` when there are none.
pub fn bounding_rectangle(projection: &dyn Projection, coords: &[Coord]) -> Option<Bounds> {
    let (first, rest) = coords.split_first()?;
    let p = projection.project(*first);
    let mut b = Bounds {
        min_x: p.x,
        min_y: p.y,
        max_x: p.x,
        max_y: p.y,
    };
    for c in rest {
        let p = projection.project(*c);
        b.min_x = b.min_x.min(p.x);
        b.max_x = b.max_x.max(p.x);
        b.min_y = b.min_y.min(p.y);
        b.max_y = b.max_y.max(p.y);
    }
    Some(b)
}

/// Maps input coordinates to canvas pixels.
#[derive(Clone, Copy)]
pub enum ScaleTransform<'a> {
    /// No coordinates were known: only the projection applies.
    Projection(&'a dyn Projection),
    /// Exactly one coordinate was known: everything lands on this point.
    Constant(Coord),
    /// Uniform fit of the projected bounding box into the drawing area.
    Fit(Fit<'a>),
}

#[derive(Clone, Copy)]
pub struct Fit<'a> {
    pub projection: &'a dyn Projection,
    pub bounds: Bounds,
    /// Input units per pixel, shared by both axes.
    pub resolution: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ScaleTransform<'_> {
    pub fn apply(&self, c: Coord) -> Coord {
        match self {
            ScaleTransform::Projection(projection) => projection.project(c),
            ScaleTransform::Constant(p) => *p,
            ScaleTransform::Fit(fit) => {
                let p = fit.projection.project(c);
                // Pixel y grows downward, so y is measured from the top of the box.
                coord(
                    (p.x - fit.bounds.min_x) / fit.resolution + fit.offset_x,
                    (fit.bounds.max_y - p.y) / fit.resolution + fit.offset_y,
                )
            }
        }
    }
}

impl std::fmt::Debug for ScaleTransform<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleTransform::Projection(_) => f.write_str("Projection"),
            ScaleTransform::Constant(p) => f.debug_tuple("Constant").field(p).finish(),
            ScaleTransform::Fit(fit) => f
                .debug_struct("Fit")
                .field("bounds", &fit.bounds)
                .field("resolution", &fit.resolution)
                .field("offset_x", &fit.offset_x)
                .field("offset_y", &fit.offset_y)
                .finish(),
        }
    }
}

/// Computes the canvas transform for `coords` (raw, pre-projection coordinates).
///
/// - no coordinates: projection only;
/// - one coordinate: constant `(w/2, h/2)` where `w`/`h` is the padded drawing area. Padding
///   offsets are not added in this case;
/// - otherwise: the projected bounding box is scaled uniformly so that it touches the drawing
///   area on its tighter axis, anchored at the top-left padding corner.
///
/// When every coordinate projects to the same point the resolution is zero and the transform
/// produces non-finite values.
pub fn compute_transform<'a>(
    width: f64,
    height: f64,
    padding: Padding,
    coords: &[Coord],
    projection: &'a dyn Projection,
) -> ScaleTransform<'a> {
    let w = width - padding.left - padding.right;
    let h = height - padding.top - padding.bottom;

    let bounds = match coords.len() {
        0 => {
            tracing::debug!("no coordinates; using projection only");
            return ScaleTransform::Projection(projection);
        }
        1 => {
            tracing::debug!(w, h, "single coordinate; centering");
            return ScaleTransform::Constant(coord(w / 2.0, h / 2.0));
        }
        _ => match bounding_rectangle(projection, coords) {
            Some(b) => b,
            None => return ScaleTransform::Projection(projection),
        },
    };

    let x_res = bounds.width() / w;
    let y_res = bounds.height() / h;
    // `f64::max` drops a NaN operand: a zero-width area with a zero x-extent (0/0) still fits
    // on the y axis instead of turning every coordinate into NaN.
    let resolution = x_res.max(y_res);
    if resolution == 0.0 || resolution.is_nan() {
        tracing::warn!(
            count = coords.len(),
            ?bounds,
            "degenerate bounding box; output coordinates will not be finite"
        );
    }
    tracing::debug!(count = coords.len(), ?bounds, resolution, "fit transform");

    ScaleTransform::Fit(Fit {
        projection,
        bounds,
        resolution,
        offset_x: padding.left,
        offset_y: padding.top,
    })
}
