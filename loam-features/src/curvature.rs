use crate::{Loam, Point};
use nalgebra::Vector3;

/// Indices of the `window` predecessors and `window` successors of `center`
/// in a closed ring of `len` points.
///
/// The ring must hold at least `2 * window + 1` points for the neighbors to
/// be distinct.
pub(crate) fn circular_neighbors(
    center: usize,
    window: usize,
    len: usize,
) -> impl Iterator<Item = usize> {
    (1..=window).flat_map(move |offset| {
        [
            (center + len - offset % len) % len,
            (center + offset) % len,
        ]
    })
}

/// Smallest ring that holds `window` distinct neighbors on either side of a
/// point. Saturates instead of overflowing for absurd windows.
pub(crate) fn window_len(window: usize) -> usize {
    window.saturating_mul(2).saturating_add(1)
}

/// Compute the smoothness score of every point in a ring.
///
/// For a point `p` with neighbors `q` inside the circular window this is
/// `|sum(q) - 2 * window * p|^2`. It is zero wherever the neighborhood is
/// locally linear and grows quickly at corners. Only differences between
/// points enter the sum, so the score does not change under a rigid motion
/// of the whole ring.
///
/// # Return value
/// One value per point in ring order, or an empty vector when the ring is too
/// short to hold a full window.
pub fn ring_curvature(ring: &[Point], window: usize) -> Vec<f64> {
    let len = ring.len();
    if window == 0 || len < window_len(window) {
        return vec![];
    }
    let scale = (2 * window) as f64;
    (0..len)
        .map(|i| {
            let sum = circular_neighbors(i, window, len)
                .map(|j| ring[j].position.coords)
                .fold(Vector3::zeros(), |acc, coords| acc + coords);
            (sum - ring[i].position.coords * scale).norm_squared()
        })
        .collect()
}

impl Loam {
    /// Curvature of every point in `ring` using this configuration's
    /// `neighbor_window`.
    pub fn curvature(&self, ring: &[Point]) -> Vec<f64> {
        ring_curvature(ring, self.neighbor_window)
    }

    /// Smallest ring that can produce features.
    pub fn minimum_ring_len(&self) -> usize {
        window_len(self.neighbor_window)
    }
}
