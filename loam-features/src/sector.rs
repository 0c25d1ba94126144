use crate::curvature::circular_neighbors;
use crate::{Loam, Point};
use core::cmp::Reverse;
use core::ops::Range;
use float_ord::FloatOrd;
use log::*;

/// The feature class a point was selected as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Label {
    #[default]
    Unlabeled,
    /// One of the few highest curvature points of its sector.
    Sharp,
    /// Edge-like, but not among the sharpest of its sector.
    LessSharp,
    /// One of the few lowest curvature points of its sector.
    Planar,
}

impl Label {
    /// Sharp points are part of the less sharp set as well.
    pub fn is_edge(self) -> bool {
        matches!(self, Label::Sharp | Label::LessSharp)
    }
}

/// A ring point together with its working state during selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvaturePoint {
    pub point: Point,
    pub curvature: f64,
    pub label: Label,
}

/// What one sector contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorSelection {
    /// Indices of the sector within its ring.
    pub range: Range<usize>,
    pub sharp: usize,
    /// Includes the sharp points.
    pub less_sharp: usize,
    pub planar: usize,
    /// Number of points the edge and planar passes marked as suppressed.
    pub suppressed: usize,
}

/// A labeled ring along with the per-sector breakdown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RingSelection {
    /// Empty when the ring was too short to produce features.
    pub points: Vec<CurvaturePoint>,
    pub sectors: Vec<SectorSelection>,
}

/// The result of one greedy pass over a sector.
struct Pass {
    accepted: Vec<usize>,
    suppressed: usize,
}

impl Loam {
    /// Split `len` ring indices into `sector_count` contiguous ranges.
    ///
    /// All sectors have `len / sector_count` points except the last, which also
    /// takes the remainder.
    pub fn sector_ranges(&self, len: usize) -> Vec<Range<usize>> {
        let count = self.sector_count;
        if count == 0 {
            return vec![];
        }
        let base = len / count;
        (0..count)
            .map(|k| {
                let end = if k + 1 == count { len } else { (k + 1) * base };
                k * base..end
            })
            .collect()
    }

    /// Compute curvature for a ring and label its edge and planar points.
    pub fn select_ring(&self, ring: &[Point]) -> RingSelection {
        let curvature = self.curvature(ring);
        if curvature.is_empty() {
            trace!("Skipping ring of {} points.", ring.len());
            return RingSelection::default();
        }
        let mut points: Vec<CurvaturePoint> = ring
            .iter()
            .zip(curvature)
            .map(|(&point, curvature)| CurvaturePoint {
                point,
                curvature,
                label: Label::Unlabeled,
            })
            .collect();
        let sectors = self
            .sector_ranges(points.len())
            .into_iter()
            .map(|range| self.select_sector(&mut points, range))
            .collect();
        RingSelection { points, sectors }
    }

    /// Label the edge and planar points of one sector of a ring.
    ///
    /// `points` is the whole ring, since suppression looks at the circular
    /// neighborhood in ring indices. Only points inside `range` are labeled
    /// or suppressed. A `range` reaching past the end of the ring is cut off
    /// at `points.len()`.
    pub fn select_sector(
        &self,
        points: &mut [CurvaturePoint],
        range: Range<usize>,
    ) -> SectorSelection {
        let range = range.start.min(points.len())..range.end.min(points.len());
        let mut order: Vec<usize> = range.clone().collect();
        // Stable, so equal curvatures keep their ring order.
        order.sort_by_key(|&i| Reverse(FloatOrd(points[i].curvature)));

        let threshold = self.curvature_threshold;
        let ring: &[CurvaturePoint] = &*points;
        let edge_pass = || {
            self.greedy_pass(
                ring,
                &range,
                order.iter().copied(),
                |c| c > threshold,
                self.max_less_sharp_per_sector,
            )
        };
        let planar_pass = || {
            self.greedy_pass(
                ring,
                &range,
                order.iter().rev().copied(),
                |c| c < threshold,
                self.max_planar_per_sector,
            )
        };
        #[cfg(not(feature = "rayon"))]
        let (edges, planes) = (edge_pass(), planar_pass());
        #[cfg(feature = "rayon")]
        let (edges, planes) = rayon::join(edge_pass, planar_pass);

        for (rank, &idx) in edges.accepted.iter().enumerate() {
            points[idx].label = if rank < self.max_sharp_per_sector {
                Label::Sharp
            } else {
                Label::LessSharp
            };
        }
        for &idx in &planes.accepted {
            points[idx].label = Label::Planar;
        }

        let selection = SectorSelection {
            sharp: edges.accepted.len().min(self.max_sharp_per_sector),
            less_sharp: edges.accepted.len(),
            planar: planes.accepted.len(),
            suppressed: edges.suppressed + planes.suppressed,
            range,
        };
        trace!(
            "Sector {:?}: {} sharp, {} less sharp, {} planar, {} suppressed.",
            selection.range,
            selection.sharp,
            selection.less_sharp,
            selection.planar,
            selection.suppressed
        );
        selection
    }

    /// Walk `order` and accept up to `cap` points whose curvature satisfies
    /// `accept`, suppressing the close neighbors of each accepted point.
    fn greedy_pass(
        &self,
        ring: &[CurvaturePoint],
        range: &Range<usize>,
        order: impl Iterator<Item = usize>,
        accept: impl Fn(f64) -> bool,
        cap: usize,
    ) -> Pass {
        let mut pass = Pass {
            accepted: Vec::with_capacity(cap),
            suppressed: 0,
        };
        if cap == 0 {
            return pass;
        }
        let mut suppressed = vec![false; range.len()];
        for idx in order {
            if suppressed[idx - range.start] || !accept(ring[idx].curvature) {
                continue;
            }
            pass.accepted.push(idx);
            let full = pass.accepted.len() >= cap;
            if full && !self.apply_suppression_after_cap {
                break;
            }
            for j in circular_neighbors(idx, self.neighbor_window, ring.len()) {
                if !range.contains(&j) || suppressed[j - range.start] {
                    continue;
                }
                let distance_squared = ring[idx].point.distance_squared(&ring[j].point);
                if distance_squared < self.suppression_radius_sq {
                    suppressed[j - range.start] = true;
                    pass.suppressed += 1;
                }
            }
            if full {
                break;
            }
        }
        pass
    }
}
