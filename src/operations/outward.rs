use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

/// Displaces `point` away from `centroid` by `distance` along the ray from
/// the centroid through the point.
///
/// The result lies exactly `distance` from `point`, further along the
/// outward direction. A zero `distance` returns the point unchanged; only
/// a zero-length direction is fatal.
///
/// # Errors
///
/// Returns an error if `point` coincides with `centroid` within the global
/// tolerance, in which case no outward direction exists.
pub fn outward_point(point: &Point3, centroid: &Point3, distance: f64) -> Result<Point3> {
    let direction = point - centroid;
    let magnitude = direction.norm();
    if magnitude < TOLERANCE {
        return Err(GeometryError::DegenerateDirection.into());
    }
    Ok(point + direction * (distance / magnitude))
}

/// Applies [`outward_point`] to each point independently, producing a new
/// sequence of the same length and order.
///
/// # Errors
///
/// Fails on the first point that coincides with the centroid; nothing is
/// returned for the points before it (fail-fast).
pub fn outward_points(points: &[Point3], centroid: &Point3, distance: f64) -> Result<Vec<Point3>> {
    points
        .iter()
        .map(|p| outward_point(p, centroid, distance))
        .collect()
}
