use criterion::{criterion_group, criterion_main, Criterion};
use loam_features::{Loam, Point, SensorModel};
use std::f64::consts::TAU;

/// An HDL-64E sized sweep of a square room with a pillar in it.
fn synthetic_sweep() -> Vec<Point> {
    let mut sweep = Vec::with_capacity(64 * 1800);
    for ring in 0..64 {
        let elevation = if ring < 32 {
            2.0 - ring as f64 / 3.0
        } else {
            -8.93 - (ring - 32) as f64 / 2.0
        };
        let slope = f64::tan(elevation.to_radians());
        for i in 0..1800 {
            let azimuth = i as f64 / 1800.0 * TAU;
            let (sin, cos) = azimuth.sin_cos();
            let wall = 20.0 / cos.abs().max(sin.abs());
            let pillar = (azimuth - 1.0).abs() < 0.05;
            let range = if pillar { 6.0 } else { wall };
            sweep.push(Point::new(range * cos, range * sin, range * slope, 1.0));
        }
    }
    sweep
}

fn extract(c: &mut Criterion) {
    let sweep = synthetic_sweep();
    let loam = Loam::hdl64();
    c.bench_function("extract", |b| b.iter(|| loam.extract(&sweep)));
}

fn select_rings(c: &mut Criterion) {
    let sweep = synthetic_sweep();
    let loam = Loam::hdl64();
    let rings = loam.assign_rings(&SensorModel::Hdl64e, &sweep);
    c.bench_function("assign_rings", |b| {
        b.iter(|| loam.assign_rings(&SensorModel::Hdl64e, &sweep))
    });
    c.bench_function("select_ring", |b| b.iter(|| loam.select_ring(&rings[10])));
}

criterion_group!(
    name = loam;
    config = Criterion::default().sample_size(10);
    targets = extract, select_rings
);
criterion_main!(loam);
