//! Extract LOAM features from KITTI velodyne sweeps.
//!
//! Pass either `.bin` files or a sequence's `velodyne` directory. For every
//! sweep three CSV files `x, y, z, intensity` are written to the working
//! directory: `<frame>_sharp.csv`, `<frame>_less_sharp.csv` and `<frame>_planar.csv`.

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use loam_features::{Loam, Point};
use log::*;

fn replace_ext(path: &Path, new: &str) -> Result<String, Box<dyn Error>> {
    let stemmed = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| format!("{} has no file name", path.display()))?;
    Ok(format!("{stemmed}{new}"))
}

fn write_points(filename: String, points: &[Point]) -> Result<(), Box<dyn Error>> {
    let mut file = BufWriter::new(File::create(filename)?);
    for point in points {
        let p = &point.position;
        writeln!(file, "{}, {}, {}, {}", p.x, p.y, p.z, point.intensity)?;
    }
    file.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init_timed();
    let mut paths: Vec<PathBuf> = Vec::new();
    for arg in std::env::args().skip(1) {
        let path = PathBuf::from(arg);
        if path.is_dir() {
            paths.extend(loam_kitti::sweep_paths(&path)?);
        } else {
            paths.push(path);
        }
    }

    let loam = Loam::hdl64();
    for path in &paths {
        let sweep = loam_kitti::read_sweep(path)?;
        let features = loam.extract(&sweep)?;
        info!(
            "{}: {} returns, {} sharp, {} less sharp, {} planar",
            path.display(),
            sweep.len(),
            features.sharp_edges.len(),
            features.less_sharp_edges.len(),
            features.planar_points.len()
        );
        write_points(replace_ext(path, "_sharp.csv")?, &features.sharp_edges)?;
        write_points(replace_ext(path, "_less_sharp.csv")?, &features.less_sharp_edges)?;
        write_points(replace_ext(path, "_planar.csv")?, &features.planar_points)?;
    }
    Ok(())
}
