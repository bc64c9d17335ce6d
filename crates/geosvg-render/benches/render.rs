use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use geosvg_core::{Coord, Geometry, coord};
use geosvg_render::{Identity, Layer, SvgRenderOptions, render_svg};

fn ring(cx: f64, cy: f64, r: f64, n: usize) -> Vec<Coord> {
    let mut out: Vec<Coord> = (0..n)
        .map(|i| {
            let a = i as f64 / n as f64 * std::f64::consts::TAU;
            coord(cx + r * a.cos(), cy + r * a.sin())
        })
        .collect();
    out.push(out[0]);
    out
}

fn fixtures() -> Vec<(&'static str, Geometry)> {
    vec![
        (
            "line_10k",
            Geometry::LineString((0..10_000).map(|i| coord(i as f64, (i as f64).sin())).collect()),
        ),
        (
            "polygon_holes",
            Geometry::Polygon(vec![ring(0.0, 0.0, 100.0, 2_000), ring(0.0, 0.0, 50.0, 1_000)]),
        ),
        (
            "nested_collection",
            Geometry::GeometryCollection(
                (0..200)
                    .map(|i| {
                        Geometry::GeometryCollection(vec![
                            Geometry::Point(coord(i as f64, 0.0)),
                            Geometry::Polygon(vec![ring(i as f64, 5.0, 2.0, 16)]),
                        ])
                    })
                    .collect(),
            ),
        ),
    ]
}

fn bench_render_svg(c: &mut Criterion) {
    let options = SvgRenderOptions::default();
    let mut group = c.benchmark_group("render_svg");
    for (name, geometry) in fixtures() {
        group.bench_function(name, |b| {
            b.iter_batched(
                || Layer::new(&geometry, r#" class="bench""#),
                |layer| render_svg(800.0, 600.0, &options, &Identity, &[layer]),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render_svg);
criterion_main!(benches);
