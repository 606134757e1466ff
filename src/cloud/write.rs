use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::{OutputError, Result};
use crate::math::Point3;

/// Writes points one per line as space-separated `x y z` coordinates,
/// preserving slice order. Pure formatting, no numeric transformation.
///
/// The whole body is formatted before anything touches the filesystem, so
/// a failure never leaves a partial file behind.
///
/// # Errors
///
/// Returns an error if the destination path is not writable.
pub fn write_points(path: &Path, points: &[Point3]) -> Result<()> {
    let mut body = String::with_capacity(points.len() * 32);
    for p in points {
        // Writing to a String cannot fail.
        let _ = writeln!(body, "{} {} {}", p.x, p.y, p.z);
    }
    fs::write(path, body).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
