use crate::{Loam, LoamError, Point};
use log::*;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Maps the elevation angle of a return to the laser that produced it.
///
/// The mapping is calibration data for a particular sensor, so it is kept
/// behind this trait. Implement it to support a sensor that has no built-in
/// [`SensorModel`].
pub trait RingModel {
    /// Number of lasers, and so the number of rings produced.
    fn ring_count(&self) -> usize;

    /// The laser index for a return at `elevation_deg` degrees.
    ///
    /// The value does not need to be in range; returns mapping outside
    /// `0..ring_count()` are dropped by the caller.
    fn ring_index(&self, elevation_deg: f64) -> i64;
}

/// Velodyne sensors with a known elevation calibration.
///
/// The laws are the piecewise-linear fits used by A-LOAM's scan registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum SensorModel {
    /// Velodyne VLP-16, 16 lasers over +-15 degrees at 2 degree spacing.
    Vlp16,
    /// Velodyne HDL-32E, 32 lasers from about -30.67 to +10.67 degrees.
    Hdl32e,
    /// Velodyne HDL-64E (as used in KITTI), two blocks of 32 lasers.
    Hdl64e,
}

impl SensorModel {
    /// Look up the calibration for a sensor with `n_scans` lasers.
    pub fn from_scan_count(n_scans: usize) -> Result<Self, LoamError> {
        match n_scans {
            16 => Ok(SensorModel::Vlp16),
            32 => Ok(SensorModel::Hdl32e),
            64 => Ok(SensorModel::Hdl64e),
            n => Err(LoamError::UnsupportedScanCount(n)),
        }
    }
}

impl RingModel for SensorModel {
    fn ring_count(&self) -> usize {
        match self {
            SensorModel::Vlp16 => 16,
            SensorModel::Hdl32e => 32,
            SensorModel::Hdl64e => 64,
        }
    }

    fn ring_index(&self, elevation_deg: f64) -> i64 {
        // `as i64` truncates towards zero, which is what the calibration fits expect.
        match self {
            SensorModel::Vlp16 => ((elevation_deg + 15.0) / 2.0 + 0.5) as i64,
            SensorModel::Hdl32e => ((elevation_deg + 92.0 / 3.0) * 3.0 / 4.0 + 0.5) as i64,
            SensorModel::Hdl64e => {
                if elevation_deg >= -8.83 {
                    ((2.0 - elevation_deg) * 3.0 + 0.5) as i64
                } else {
                    32 + ((-8.83 - elevation_deg) * 2.0 + 0.5) as i64
                }
            }
        }
    }
}

impl Loam {
    /// Split a sweep into `model.ring_count()` rings.
    ///
    /// Returns closer than `minimum_range` (under `range_metric`) are discarded,
    /// as are returns with no defined elevation or whose laser index falls
    /// outside the calibration. Surviving points keep their sweep order within
    /// each ring.
    pub fn assign_rings<M: RingModel + ?Sized>(
        &self,
        model: &M,
        sweep: &[Point],
    ) -> Vec<Vec<Point>> {
        let ring_count = model.ring_count();
        let mut rings: Vec<Vec<Point>> = vec![Vec::new(); ring_count];
        let mut too_close = 0usize;
        let mut unassigned = 0usize;
        for point in sweep {
            if self.range_metric.range(point) <= self.minimum_range {
                too_close += 1;
                continue;
            }
            let ring = point
                .elevation_deg()
                .map(|elevation| model.ring_index(elevation))
                .and_then(|index| usize::try_from(index).ok())
                .filter(|&index| index < ring_count);
            match ring {
                Some(index) => rings[index].push(*point),
                None => unassigned += 1,
            }
        }
        debug!(
            "Assigned {} of {} points to {} rings ({} too close, {} outside calibration).",
            sweep.len() - too_close - unassigned,
            sweep.len(),
            ring_count,
            too_close,
            unassigned
        );
        rings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_scan_counts_are_rejected() {
        assert_eq!(
            SensorModel::from_scan_count(128),
            Err(LoamError::UnsupportedScanCount(128))
        );
        assert_eq!(
            SensorModel::from_scan_count(0),
            Err(LoamError::UnsupportedScanCount(0))
        );
    }

    #[test]
    fn hdl64_upper_block() {
        let model = SensorModel::Hdl64e;
        assert_eq!(model.ring_index(2.0), 0);
        assert_eq!(model.ring_index(0.0), 6);
        assert_eq!(model.ring_index(-8.0), 30);
    }

    #[test]
    fn hdl64_lower_block() {
        let model = SensorModel::Hdl64e;
        assert_eq!(model.ring_index(-8.83), 32);
        assert_eq!(model.ring_index(-9.0), 32);
        assert_eq!(model.ring_index(-24.33), 63);
        assert!(model.ring_index(-30.0) >= 64);
    }

    #[test]
    fn vlp16_spans_its_field_of_view() {
        let model = SensorModel::Vlp16;
        assert_eq!(model.ring_index(-15.0), 0);
        assert_eq!(model.ring_index(-1.0), 7);
        assert_eq!(model.ring_index(15.0), 15);
    }

    #[test]
    fn hdl32_spans_its_field_of_view() {
        let model = SensorModel::Hdl32e;
        assert_eq!(model.ring_index(-92.0 / 3.0), 0);
        assert_eq!(model.ring_index(-92.0 / 3.0 + 31.0 * 4.0 / 3.0), 31);
    }

    #[test]
    fn points_keep_sweep_order() {
        let loam = Loam::hdl64();
        let sweep: Vec<Point> = (0..5)
            .map(|i| Point::new(10.0, i as f64, 0.0, i as f64))
            .collect();
        let rings = loam.assign_rings(&SensorModel::Hdl64e, &sweep);
        assert_eq!(rings.len(), 64);
        let ring = &rings[6];
        assert_eq!(ring.len(), 5);
        assert!(ring.windows(2).all(|w| w[0].intensity < w[1].intensity));
    }

    #[test]
    fn close_and_axial_points_are_dropped() {
        let loam = Loam {
            minimum_range: 1.0,
            ..Loam::hdl64()
        };
        let sweep = [
            Point::new(0.5, 0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0, 0.0),
            Point::new(0.0, 0.0, 10.0, 0.0),
            Point::new(10.0, 0.0, 0.0, 0.0),
        ];
        let rings = loam.assign_rings(&SensorModel::Hdl64e, &sweep);
        assert_eq!(rings.iter().map(Vec::len).sum::<usize>(), 1);
    }

    #[test]
    fn euclidean_metric_measures_height() {
        // About 9.5 degrees of elevation, ring 12 on a VLP-16.
        let sweep = [Point::new(3.0, 0.0, 0.5, 0.0)];
        let horizontal = Loam {
            minimum_range: 3.02,
            ..Loam::vlp16()
        };
        let euclidean = Loam {
            range_metric: crate::RangeMetric::Euclidean,
            ..horizontal
        };
        assert!(horizontal.assign_rings(&SensorModel::Vlp16, &sweep)[12].is_empty());
        assert_eq!(euclidean.assign_rings(&SensorModel::Vlp16, &sweep)[12].len(), 1);
    }
}
