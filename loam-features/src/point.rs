use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::Point3;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A single LiDAR return.
///
/// The position is relative to the sensor origin, with +z pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Cartesian position of the return in sensor coordinates.
    pub position: Point3<f64>,
    /// Calibrated reflectivity as reported by the sensor.
    pub intensity: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64, intensity: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            intensity,
        }
    }

    /// Most sensors (and KITTI dumps) report single precision returns.
    pub fn from_f32(x: f32, y: f32, z: f32, intensity: f32) -> Self {
        Self::new(x.into(), y.into(), z.into(), intensity.into())
    }

    /// Distance from the sensor origin.
    pub fn range(&self) -> f64 {
        self.position.coords.norm()
    }

    /// Distance from the sensor's vertical axis.
    pub fn horizontal_range(&self) -> f64 {
        self.position.x.hypot(self.position.y)
    }

    /// Elevation above the sensor's horizontal plane in degrees.
    ///
    /// Returns `None` when the point lies on the vertical axis, where the
    /// elevation is undefined.
    pub fn elevation_deg(&self) -> Option<f64> {
        let r_xy = self.horizontal_range();
        if r_xy == 0.0 || !r_xy.is_finite() {
            return None;
        }
        let elevation = (self.position.z / r_xy).atan().to_degrees();
        elevation.is_finite().then_some(elevation)
    }

    pub fn distance_squared(&self, other: &Point) -> f64 {
        (self.position - other.position).norm_squared()
    }
}

/// One full rotation worth of returns, in the order the sensor stored them.
///
/// Ring decomposition keeps this order, so it should be azimuth-monotonic
/// within each laser for the neighborhood windows to be meaningful.
#[derive(Debug, Clone, Default, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
pub struct Sweep(pub Vec<Point>);

impl FromIterator<Point> for Sweep {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Sweep(iter.into_iter().collect())
    }
}

/// Which distance is compared against `minimum_range` to reject returns off
/// the vehicle itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum RangeMetric {
    /// Distance in the `xy` plane, ignoring height.
    #[default]
    Horizontal,
    /// Full 3d distance from the sensor origin.
    Euclidean,
}

impl RangeMetric {
    pub fn range(self, point: &Point) -> f64 {
        match self {
            RangeMetric::Horizontal => point.horizontal_range(),
            RangeMetric::Euclidean => point.range(),
        }
    }
}
