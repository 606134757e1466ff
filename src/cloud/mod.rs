pub mod load;
pub mod write;

pub use load::{load_cloud, parse_cloud};
pub use write::write_points;

use crate::math::Point3;

/// A single point tagged with its group label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPoint {
    pub label: String,
    pub position: Point3,
}

impl LabeledPoint {
    /// Creates a new labeled point.
    #[must_use]
    pub fn new(label: impl Into<String>, position: Point3) -> Self {
        Self {
            label: label.into(),
            position,
        }
    }
}

/// An ordered collection of labeled points.
///
/// Loaded once from input and treated as immutable for the remainder of a
/// run; every accessor preserves the original point order.
#[derive(Debug, Clone, Default)]
pub struct LabeledCloud {
    points: Vec<LabeledPoint>,
}

impl LabeledCloud {
    /// Creates a cloud from an ordered list of labeled points.
    #[must_use]
    pub fn new(points: Vec<LabeledPoint>) -> Self {
        Self { points }
    }

    /// Number of points in the cloud, all labels combined.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the cloud holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the labeled points in input order.
    pub fn iter(&self) -> impl Iterator<Item = &LabeledPoint> {
        self.points.iter()
    }

    /// Coordinates of every point regardless of label, in input order.
    #[must_use]
    pub fn positions(&self) -> Vec<Point3> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Ordered subsequence of coordinates carrying the given label.
    ///
    /// Returns an empty vector when nothing matches; an unknown label is
    /// not an error.
    #[must_use]
    pub fn select(&self, label: &str) -> Vec<Point3> {
        self.points
            .iter()
            .filter(|p| p.label == label)
            .map(|p| p.position)
            .collect()
    }

    /// Distinct labels in order of first appearance.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for point in &self.points {
            if !seen.contains(&point.label.as_str()) {
                seen.push(point.label.as_str());
            }
        }
        seen
    }
}
