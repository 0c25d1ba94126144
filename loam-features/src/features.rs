use crate::{Label, Point, RingSelection};

/// The features extracted from one sweep.
///
/// Each collection is unordered. `less_sharp_edges` always contains every
/// point of `sharp_edges`. Planar points never overlap with either edge set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSets {
    pub sharp_edges: Vec<Point>,
    pub less_sharp_edges: Vec<Point>,
    pub planar_points: Vec<Point>,
}

impl FeatureSets {
    /// Collect the labeled points of a ring.
    pub fn from_ring(ring: &RingSelection) -> Self {
        let mut features = FeatureSets::default();
        for cp in &ring.points {
            match cp.label {
                Label::Sharp => {
                    features.sharp_edges.push(cp.point);
                    features.less_sharp_edges.push(cp.point);
                }
                Label::LessSharp => features.less_sharp_edges.push(cp.point),
                Label::Planar => features.planar_points.push(cp.point),
                Label::Unlabeled => {}
            }
        }
        features
    }

    /// Total number of distinct feature points.
    pub fn len(&self) -> usize {
        self.less_sharp_edges.len() + self.planar_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Extend<FeatureSets> for FeatureSets {
    fn extend<I: IntoIterator<Item = FeatureSets>>(&mut self, iter: I) {
        for other in iter {
            self.sharp_edges.extend(other.sharp_edges);
            self.less_sharp_edges.extend(other.less_sharp_edges);
            self.planar_points.extend(other.planar_points);
        }
    }
}

impl FromIterator<FeatureSets> for FeatureSets {
    fn from_iter<I: IntoIterator<Item = FeatureSets>>(iter: I) -> Self {
        let mut features = FeatureSets::default();
        features.extend(iter);
        features
    }
}
