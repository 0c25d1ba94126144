//! # LOAM feature extraction
//!
//! Extracts the sparse edge and planar features that LOAM-style LiDAR odometry registers
//! between sweeps. A sweep from a rotating multi-laser sensor is decomposed into one ring per
//! laser. Every ring point is scored by how far it is from the centroid of its neighbors along
//! the ring, and each ring is cut into sectors. In every sector the highest scoring points
//! become edges and the lowest scoring points become planar patches. A selection suppresses its
//! close neighbors so that features are spread across the sector.
//!
//! Everything is controlled from [`Loam`]. Most users only need [`Loam::extract`]:
//!
//! ```
//! use loam_features::{Loam, Point};
//!
//! // A single laser at 0 degrees elevation sweeping a square room.
//! let sweep: Vec<Point> = (0..400)
//!     .map(|i| {
//!         let t = i as f64 / 100.0;
//!         let (x, y) = match i / 100 {
//!             0 => (10.0, -10.0 + 20.0 * t),
//!             1 => (10.0 - 20.0 * (t - 1.0), 10.0),
//!             2 => (-10.0, 10.0 - 20.0 * (t - 2.0)),
//!             _ => (-10.0 + 20.0 * (t - 3.0), -10.0),
//!         };
//!         Point::new(x, y, 0.0, 1.0)
//!     })
//!     .collect();
//! let features = Loam::hdl64().extract(&sweep).unwrap();
//! assert!(!features.sharp_edges.is_empty());
//! assert!(!features.planar_points.is_empty());
//! ```
//!
//! The individual stages are exposed as well: [`Loam::assign_rings`], [`Loam::curvature`],
//! [`Loam::sector_ranges`], [`Loam::select_sector`] and [`Loam::select_ring`].

mod curvature;
mod error;
mod features;
mod point;
mod ring;
mod sector;

pub use curvature::ring_curvature;
pub use error::LoamError;
pub use features::FeatureSets;
pub use nalgebra;
pub use point::{Point, RangeMetric, Sweep};
pub use ring::{RingModel, SensorModel};
pub use sector::{CurvaturePoint, Label, RingSelection, SectorSelection};

use log::*;

#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Contains the configuration parameters of the feature extractor.
///
/// `n_scans` selects the elevation calibration used to split a sweep into rings
/// (see [`SensorModel`]); everything else tunes the selection. [`Loam::new`] sets the
/// ring count and leaves all other parameters at their defaults.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(default))]
pub struct Loam {
    /// Number of lasers of the sensor
    pub n_scans: usize,

    /// Returns at or below this range are discarded as hits on the vehicle itself
    pub minimum_range: f64,

    /// How the range compared against `minimum_range` is measured
    pub range_metric: RangeMetric,

    /// Number of sectors each ring is split into
    pub sector_count: usize,

    /// Curvature above which a point is an edge candidate and below which it is a planar
    /// candidate
    pub curvature_threshold: f64,

    /// Maximum sharp edges per sector
    pub max_sharp_per_sector: usize,

    /// Maximum sharp plus less sharp edges per sector
    pub max_less_sharp_per_sector: usize,

    /// Maximum planar points per sector
    pub max_planar_per_sector: usize,

    /// Squared distance under which a neighbor of a selected point is suppressed
    pub suppression_radius_sq: f64,

    /// Half width of the ring window used for curvature and suppression
    pub neighbor_window: usize,

    /// Whether the selection that fills a sector's quota still suppresses its neighbors
    pub apply_suppression_after_cap: bool,
}

impl Loam {
    /// This convenience constructor is provided for the common case of only
    /// choosing the sensor.
    pub fn new(n_scans: usize) -> Self {
        Self {
            n_scans,
            ..Default::default()
        }
    }

    /// Velodyne HDL-64E, the sensor used by KITTI.
    pub fn hdl64() -> Self {
        Self::new(64)
    }

    /// Velodyne HDL-32E.
    pub fn hdl32() -> Self {
        Self::new(32)
    }

    /// Velodyne VLP-16.
    pub fn vlp16() -> Self {
        Self::new(16)
    }

    /// Check that the parameters describe a usable selection.
    ///
    /// Does not check `n_scans`, since a custom [`RingModel`] may support counts
    /// that [`SensorModel`] does not.
    pub fn validate(&self) -> Result<(), LoamError> {
        if self.sector_count == 0 {
            return Err(LoamError::InvalidConfig("sector_count must be at least 1"));
        }
        if self.neighbor_window == 0 {
            return Err(LoamError::InvalidConfig("neighbor_window must be at least 1"));
        }
        if self.neighbor_window > usize::MAX / 2 {
            return Err(LoamError::InvalidConfig("neighbor_window is too large"));
        }
        if self.max_sharp_per_sector > self.max_less_sharp_per_sector {
            return Err(LoamError::InvalidConfig(
                "max_sharp_per_sector cannot exceed max_less_sharp_per_sector",
            ));
        }
        if !self.curvature_threshold.is_finite() {
            return Err(LoamError::InvalidConfig("curvature_threshold must be finite"));
        }
        if !self.suppression_radius_sq.is_finite() {
            return Err(LoamError::InvalidConfig("suppression_radius_sq must be finite"));
        }
        if self.minimum_range.is_nan() {
            return Err(LoamError::InvalidConfig("minimum_range must not be NaN"));
        }
        Ok(())
    }

    /// Extract features using the built-in calibration for `n_scans`.
    ///
    /// # Errors
    /// [`LoamError::UnsupportedScanCount`] if there is no [`SensorModel`] with
    /// `n_scans` lasers, or [`LoamError::InvalidConfig`] if [`Loam::validate`] fails.
    pub fn extract(&self, sweep: &[Point]) -> Result<FeatureSets, LoamError> {
        let model = SensorModel::from_scan_count(self.n_scans)?;
        self.extract_with_model(&model, sweep)
    }

    /// Extract features, using `model` to assign points to rings.
    ///
    /// This performs all operations end-to-end. Rings are independent of each
    /// other, and with the `rayon` feature they are processed in parallel.
    pub fn extract_with_model<M: RingModel + ?Sized>(
        &self,
        model: &M,
        sweep: &[Point],
    ) -> Result<FeatureSets, LoamError> {
        self.validate()?;
        if model.ring_count() != self.n_scans {
            return Err(LoamError::ScanCountMismatch {
                configured: self.n_scans,
                model: model.ring_count(),
            });
        }
        trace!("Assigning {} points to rings.", sweep.len());
        let rings = self.assign_rings(model, sweep);
        let process_ring = |(index, ring): (usize, &Vec<Point>)| {
            let selection = self.select_ring(ring);
            let features = FeatureSets::from_ring(&selection);
            debug!(
                "Ring {}: {} points, {} sharp, {} less sharp, {} planar.",
                index,
                ring.len(),
                features.sharp_edges.len(),
                features.less_sharp_edges.len(),
                features.planar_points.len()
            );
            features
        };
        #[cfg(not(feature = "rayon"))]
        let features: FeatureSets = rings.iter().enumerate().map(process_ring).collect();
        #[cfg(feature = "rayon")]
        let features: FeatureSets = rings
            .par_iter()
            .enumerate()
            .map(process_ring)
            .collect::<Vec<FeatureSets>>()
            .into_iter()
            .collect();
        info!(
            "Extracted {} sharp, {} less sharp and {} planar features",
            features.sharp_edges.len(),
            features.less_sharp_edges.len(),
            features.planar_points.len()
        );
        Ok(features)
    }
}

impl Default for Loam {
    fn default() -> Loam {
        Loam {
            n_scans: 64,
            minimum_range: 5.0,
            range_metric: RangeMetric::Horizontal,
            sector_count: 6,
            curvature_threshold: 0.1,
            max_sharp_per_sector: 2,
            max_less_sharp_per_sector: 20,
            max_planar_per_sector: 4,
            suppression_radius_sq: 0.05,
            neighbor_window: 5,
            apply_suppression_after_cap: true,
        }
    }
}
