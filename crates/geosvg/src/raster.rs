//! PNG output for drawings.

use crate::Svg;
use geosvg_render::Projection;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color: {0}")]
    Background(String),
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Pixels per SVG user unit.
    pub scale: f32,
    /// `transparent`, `white`, `black` or `#rgb[a]` / `#rrggbb[aa]`. Transparent when unset.
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

/// Draws `svg` at `width` x `height` and rasterizes the result.
pub fn render_png(
    svg: &Svg,
    width: f64,
    height: f64,
    projection: &dyn Projection,
    options: &RasterOptions,
) -> Result<Vec<u8>> {
    let text = svg.draw_with_projection(width, height, projection);
    svg_to_png(&text, options)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

/// Drawings carry no namespace unless the caller sets one as a root attribute; the SVG parser
/// needs it.
fn with_svg_namespace(svg: &str) -> std::borrow::Cow<'_, str> {
    if svg.contains("xmlns=") {
        return svg.into();
    }
    match svg.strip_prefix("<svg") {
        Some(rest) => format!(r#"<svg xmlns="{SVG_NS}"{rest}"#).into(),
        None => svg.into(),
    }
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let fill = match background {
        Some(bg) => {
            Some(parse_tiny_skia_color(bg).ok_or_else(|| RasterError::Background(bg.into()))?)
        }
        None => None,
    };

    let svg = with_svg_namespace(svg);
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).map_err(|e| {
        tracing::debug!(error = %e, "svg parse failed");
        RasterError::SvgParse
    })?;

    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;
    tracing::debug!(width_px, height_px, scale, "rasterizing");

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    if let Some(color) = fill {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::from_rgba8(255, 255, 255, 255)),
        "black" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 255)),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;

    let rgba = match digits.as_slice() {
        &[r, g, b] => [r * 17, g * 17, b * 17, 255],
        &[r, g, b, a] => [r * 17, g * 17, b * 17, a * 17],
        &[r1, r0, g1, g0, b1, b0] => [(r1 << 4) | r0, (g1 << 4) | g0, (b1 << 4) | b0, 255],
        &[r1, r0, g1, g0, b1, b0, a1, a0] => [
            (r1 << 4) | r0,
            (g1 << 4) | g0,
            (b1 << 4) | b0,
            (a1 << 4) | a0,
        ],
        _ => return None,
    };
    Some(tiny_skia::Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]))
}
