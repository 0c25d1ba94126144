#![allow(dead_code)]

use loam_features::Point;
use rand::Rng;

/// Elevation in degrees at the middle of an HDL-64E laser's band.
pub fn hdl64_elevation(ring: usize) -> f64 {
    if ring < 32 {
        2.0 - ring as f64 / 3.0
    } else {
        -8.83 - (ring - 32) as f64 / 2.0 - 0.1
    }
}

/// A return at `azimuth` radians and horizontal range `range`, seen by the
/// laser at `elevation_deg`.
pub fn polar(azimuth: f64, range: f64, elevation_deg: f64) -> Point {
    Point::new(
        range * azimuth.cos(),
        range * azimuth.sin(),
        range * elevation_deg.to_radians().tan(),
        1.0,
    )
}

/// A full HDL-64E sweep of a noisy cylindrical room, laser by laser.
pub fn random_sweep(rng: &mut impl Rng, points_per_ring: usize) -> Vec<Point> {
    let mut sweep = Vec::with_capacity(64 * points_per_ring);
    for ring in 0..64 {
        let elevation = hdl64_elevation(ring);
        for i in 0..points_per_ring {
            let azimuth = i as f64 / points_per_ring as f64 * std::f64::consts::TAU;
            let range = rng.gen_range(8.0..12.0);
            sweep.push(polar(azimuth, range, elevation));
        }
    }
    // A few returns off the vehicle and straight above the sensor.
    sweep.push(Point::new(0.5, 0.2, -0.3, 0.0));
    sweep.push(Point::new(0.0, 0.0, 4.0, 0.0));
    sweep
}
