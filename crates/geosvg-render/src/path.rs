//! Geometry → SVG element emitters.
//!
//! Every numeric field is written as fixed-point with six fractional digits (`{:.6}`), never in
//! scientific notation and never trimmed, so that output is stable and diffable.

use crate::scale::ScaleTransform;
use geosvg_core::{Coord, Geometry};
use std::fmt::Write as _;

/// Appends the markup for `geometry` to `out`.
///
/// `attrs` is appended verbatim to every emitted element (see [`crate::attrs`]). Collections emit
/// no wrapper element: their children are rendered in order with the same transform and
/// attributes.
pub fn render_geometry(
    out: &mut String,
    transform: &ScaleTransform<'_>,
    geometry: &Geometry,
    attrs: &str,
) {
    tracing::trace!(kind = geometry.kind(), "render geometry");
    match geometry {
        Geometry::Point(p) => render_point(out, transform, *p, attrs),
        Geometry::MultiPoint(ps) => {
            for p in ps {
                render_point(out, transform, *p, attrs);
            }
        }
        Geometry::LineString(ps) => render_line_string(out, transform, ps, attrs),
        Geometry::MultiLineString(lines) => {
            for ps in lines {
                render_line_string(out, transform, ps, attrs);
            }
        }
        Geometry::Polygon(rings) => render_polygon(out, transform, rings, attrs),
        Geometry::MultiPolygon(polygons) => {
            for rings in polygons {
                render_polygon(out, transform, rings, attrs);
            }
        }
        Geometry::GeometryCollection(children) => {
            for child in children {
                render_geometry(out, transform, child, attrs);
            }
        }
    }
}

/// Appends the raw (untransformed) coordinates of `geometry` to `out`, in the same structural
/// order that [`render_geometry`] visits them.
pub fn collect_coordinates(geometry: &Geometry, out: &mut Vec<Coord>) {
    match geometry {
        Geometry::Point(p) => out.push(*p),
        Geometry::MultiPoint(ps) | Geometry::LineString(ps) => out.extend_from_slice(ps),
        Geometry::MultiLineString(rings) | Geometry::Polygon(rings) => {
            for ps in rings {
                out.extend_from_slice(ps);
            }
        }
        Geometry::MultiPolygon(polygons) => {
            for ps in polygons.iter().flatten() {
                out.extend_from_slice(ps);
            }
        }
        Geometry::GeometryCollection(children) => {
            for child in children {
                collect_coordinates(child, out);
            }
        }
    }
}

pub fn coordinates(geometry: &Geometry) -> Vec<Coord> {
    let mut out = Vec::new();
    collect_coordinates(geometry, &mut out);
    out
}

fn render_point(out: &mut String, transform: &ScaleTransform<'_>, p: Coord, attrs: &str) {
    let q = transform.apply(p);
    let _ = write!(
        out,
        r#"<circle cx="{:.6}" cy="{:.6}" r="1"{attrs}/>"#,
        q.x, q.y
    );
}

fn render_line_string(
    out: &mut String,
    transform: &ScaleTransform<'_>,
    ps: &[Coord],
    attrs: &str,
) {
    out.push_str(r#"<path d=""#);
    push_subpath(out, transform, ps);
    let _ = write!(out, r#""{attrs}/>"#);
}

/// All rings share one `<path>` and one trailing `Z`, so holes are cut out by the fill rule.
fn render_polygon(
    out: &mut String,
    transform: &ScaleTransform<'_>,
    rings: &[Vec<Coord>],
    attrs: &str,
) {
    out.push_str(r#"<path d=""#);
    for (idx, ring) in rings.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        push_subpath(out, transform, ring);
    }
    let _ = write!(out, r#" Z"{attrs}/>"#);
}

/// `M x0 y0,x1 y1,...` without a trailing separator; a bare `M` for an empty sequence.
fn push_subpath(out: &mut String, transform: &ScaleTransform<'_>, ps: &[Coord]) {
    out.push('M');
    for (idx, p) in ps.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        let q = transform.apply(*p);
        let _ = write!(out, "{:.6} {:.6}", q.x, q.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{Identity, Padding, compute_transform};
    use geosvg_core::coord;

    fn render(geometry: &Geometry, attrs: &str) -> String {
        let coords = coordinates(geometry);
        let t = compute_transform(400.0, 400.0, Padding::default(), &coords, &Identity);
        let mut out = String::new();
        render_geometry(&mut out, &t, geometry, attrs);
        out
    }

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Coord> {
        vec![
            coord(x0, y0),
            coord(x1, y0),
            coord(x1, y1),
            coord(x0, y1),
            coord(x0, y0),
        ]
    }

    #[test]
    fn point_is_a_circle() {
        let g = Geometry::Point(coord(10.5, 20.0));
        assert_eq!(
            render(&g, ""),
            r#"<circle cx="200.000000" cy="200.000000" r="1"/>"#
        );
    }

    #[test]
    fn multi_point_repeats_attributes() {
        let g = Geometry::MultiPoint(vec![coord(10.5, 20.0), coord(20.5, 62.0)]);
        assert_eq!(
            render(&g, r#" class="c""#),
            concat!(
                r#"<circle cx="0.000000" cy="400.000000" r="1" class="c"/>"#,
                r#"<circle cx="95.238095" cy="0.000000" r="1" class="c"/>"#,
            )
        );
    }

    #[test]
    fn line_string_chains_pairs_with_commas() {
        let g = Geometry::LineString(vec![coord(10.4, 20.5), coord(40.3, 42.3)]);
        assert_eq!(
            render(&g, ""),
            r#"<path d="M0.000000 291.638796,400.000000 0.000000"/>"#
        );
    }

    #[test]
    fn empty_line_string_is_a_bare_move() {
        let g = Geometry::LineString(Vec::new());
        assert_eq!(render(&g, ""), r#"<path d="M"/>"#);
    }

    #[test]
    fn multi_line_string_emits_one_path_each() {
        let g = Geometry::MultiLineString(vec![
            vec![coord(10.4, 20.5), coord(40.3, 42.3)],
            vec![coord(11.4, 21.5), coord(41.3, 41.3)],
        ]);
        assert_eq!(
            render(&g, ""),
            concat!(
                r#"<path d="M0.000000 282.200647,387.055016 0.000000"/>"#,
                r#"<path d="M12.944984 269.255663,400.000000 12.944984"/>"#,
            )
        );
    }

    #[test]
    fn polygon_closes_once() {
        let g = Geometry::Polygon(vec![vec![
            coord(10.4, 20.5),
            coord(40.3, 42.3),
            coord(20.2, 10.2),
            coord(10.4, 20.5),
        ]]);
        assert_eq!(
            render(&g, ""),
            r#"<path d="M0.000000 271.651090,372.585670 0.000000,122.118380 400.000000,0.000000 271.651090 Z"/>"#
        );
    }

    #[test]
    fn polygon_with_hole_shares_one_path() {
        let g = Geometry::Polygon(vec![
            square(100.0, 0.0, 101.0, 1.0),
            square(100.2, 0.2, 100.8, 0.8),
        ]);
        let out = render(&g, "");
        assert_eq!(
            out,
            concat!(
                r#"<path d="M0.000000 400.000000,400.000000 400.000000,400.000000 0.000000,0.000000 0.000000,0.000000 400.000000"#,
                r#" M80.000000 320.000000,320.000000 320.000000,320.000000 80.000000,80.000000 80.000000,80.000000 320.000000 Z"/>"#,
            )
        );
        assert_eq!(out.matches('M').count(), 2);
        assert_eq!(out.matches(" Z").count(), 1);
    }

    #[test]
    fn polygon_without_rings_still_closes() {
        assert_eq!(render(&Geometry::Polygon(Vec::new()), ""), r#"<path d=" Z"/>"#);
        assert_eq!(
            render(&Geometry::Polygon(vec![Vec::new()]), ""),
            r#"<path d="M Z"/>"#
        );
    }

    #[test]
    fn multi_polygon_emits_one_closed_path_each() {
        let g = Geometry::MultiPolygon(vec![
            vec![vec![
                coord(10.4, 20.5),
                coord(40.3, 42.3),
                coord(20.2, 10.2),
                coord(10.4, 20.5),
            ]],
            vec![square(100.0, 0.0, 101.0, 1.0), square(100.2, 0.2, 100.8, 0.8)],
        ]);
        assert_eq!(
            render(&g, ""),
            concat!(
                r#"<path d="M0.000000 96.247241,132.008830 0.000000,43.267108 141.721854,0.000000 96.247241 Z"/>"#,
                r#"<path d="M395.584989 186.754967,400.000000 186.754967,400.000000 182.339956,395.584989 182.339956,395.584989 186.754967"#,
                r#" M396.467991 185.871965,399.116998 185.871965,399.116998 183.222958,396.467991 183.222958,396.467991 185.871965 Z"/>"#,
            )
        );
    }

    #[test]
    fn collection_recurses_without_wrapper() {
        let g = Geometry::GeometryCollection(vec![
            Geometry::LineString(vec![coord(10.4, 20.5), coord(40.3, 42.3)]),
            Geometry::GeometryCollection(vec![Geometry::Point(coord(10.5, 20.0))]),
        ]);
        assert_eq!(
            render(&g, r#" id="x""#),
            concat!(
                r#"<path d="M0.000000 291.638796,400.000000 0.000000" id="x"/>"#,
                r#"<circle cx="1.337793" cy="298.327759" r="1" id="x"/>"#,
            )
        );
    }

    #[test]
    fn empty_collection_renders_nothing() {
        assert_eq!(render(&Geometry::GeometryCollection(Vec::new()), ""), "");
    }

    #[test]
    fn coordinates_follow_structural_order() {
        let g = Geometry::GeometryCollection(vec![
            Geometry::MultiPolygon(vec![vec![vec![coord(1.0, 1.0)], vec![coord(2.0, 2.0)]]]),
            Geometry::Point(coord(3.0, 3.0)),
            Geometry::MultiLineString(vec![vec![coord(4.0, 4.0), coord(5.0, 5.0)]]),
        ]);
        let xs: Vec<f64> = coordinates(&g).iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
