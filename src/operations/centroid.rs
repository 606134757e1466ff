use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

/// Component-wise mean position of a set of points.
///
/// Every call recomputes from scratch; nothing is cached between inputs.
///
/// # Errors
///
/// Returns an error if `points` is empty, since the mean of zero points is
/// undefined.
pub fn centroid(points: &[Point3]) -> Result<Point3> {
    if points.is_empty() {
        return Err(GeometryError::EmptyCloud.into());
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    #[allow(clippy::cast_precision_loss)]
    let count = points.len() as f64;
    Ok(Point3::from(sum / count))
}
