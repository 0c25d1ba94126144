//! Reader for the KITTI odometry benchmark's velodyne sweeps.
//!
//! Each `velodyne/NNNNNN.bin` file is a flat array of little-endian `f32`
//! quadruples `x y z reflectance`, one per return, in the order the HDL-64E
//! reported them. That order is what ring decomposition in `loam-features`
//! relies on, so it is preserved.

use loam_features::{Point, Sweep};
use log::*;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

/// Size of one return on disk.
pub const RECORD_LEN: usize = 4 * core::mem::size_of::<f32>();

#[derive(Debug, Error)]
pub enum KittiError {
    #[error("failed to read sweep: {0}")]
    Io(#[from] io::Error),
    /// The data does not hold a whole number of returns.
    #[error("sweep of {len} bytes is not a whole number of {} byte records", RECORD_LEN)]
    TruncatedRecord { len: usize },
}

/// Decode a sweep from the raw contents of a `.bin` file.
pub fn parse_sweep(bytes: &[u8]) -> Result<Sweep, KittiError> {
    if bytes.len() % RECORD_LEN != 0 {
        return Err(KittiError::TruncatedRecord { len: bytes.len() });
    }
    let sweep: Sweep = bytes
        .chunks_exact(RECORD_LEN)
        .map(|record| {
            let value = |i: usize| {
                f32::from_le_bytes([record[i], record[i + 1], record[i + 2], record[i + 3]])
            };
            Point::from_f32(value(0), value(4), value(8), value(12))
        })
        .collect();
    trace!("Decoded {} returns.", sweep.len());
    Ok(sweep)
}

/// Read and decode one `.bin` sweep.
pub fn read_sweep(path: impl AsRef<Path>) -> Result<Sweep, KittiError> {
    let path = path.as_ref();
    let sweep = parse_sweep(&fs::read(path)?)?;
    debug!("Read {} returns from {}", sweep.len(), path.display());
    Ok(sweep)
}

/// The `.bin` sweeps of a sequence's `velodyne` directory, in frame order.
pub fn sweep_paths(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, KittiError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "bin") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Encode a sweep in the `.bin` layout.
///
/// Coordinates are narrowed to `f32`.
pub fn encode_sweep(sweep: &[Point]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(sweep.len() * RECORD_LEN);
    for point in sweep {
        let p = &point.position;
        for value in [p.x, p.y, p.z, point.intensity] {
            bytes.extend_from_slice(&(value as f32).to_le_bytes());
        }
    }
    bytes
}
