use std::collections::HashMap;

use crate::error::{GeometryError, Result};

use super::{Point3, Vector3, TOLERANCE};

/// A triangular hull face with an outward-pointing unit normal.
#[derive(Debug, Clone, Copy)]
struct Face {
    verts: [usize; 3],
    normal: Vector3,
}

impl Face {
    /// Returns `None` if the three vertices are collinear (zero-area face).
    fn new(verts: [usize; 3], points: &[Point3]) -> Option<Self> {
        let a = points[verts[0]];
        let b = points[verts[1]];
        let c = points[verts[2]];
        let normal = (b - a).cross(&(c - a));
        let len = normal.norm();
        if len < TOLERANCE {
            return None;
        }
        Some(Self {
            verts,
            normal: normal / len,
        })
    }

    /// Signed distance from `point` to the face plane, positive on the
    /// normal side.
    fn signed_distance(&self, point: &Point3, points: &[Point3]) -> f64 {
        self.normal.dot(&(point - points[self.verts[0]]))
    }

    /// Re-creates the face with reversed winding, flipping the normal.
    fn flipped(&self, points: &[Point3]) -> Option<Self> {
        Self::new(
            [self.verts[1], self.verts[0], self.verts[2]],
            points,
        )
    }
}

/// Convex hull of a 3D point set, stored as triangular faces indexing into
/// the original point slice.
#[derive(Debug, Clone)]
pub struct Hull {
    faces: Vec<[usize; 3]>,
}

impl Hull {
    /// Builds the convex hull of `points` by incremental insertion: a seed
    /// tetrahedron of affinely independent points, then one point at a time,
    /// replacing the faces it can see with a fan over the horizon edges.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 4 points are given, or if all points
    /// are affinely dependent (coincident, collinear or coplanar), since no
    /// 3D hull exists in either case.
    pub fn build(points: &[Point3]) -> Result<Self> {
        let degenerate = GeometryError::DegenerateHull {
            points: points.len(),
        };
        if points.len() < 4 {
            return Err(degenerate.into());
        }

        let seed = seed_tetrahedron(points).ok_or(degenerate)?;
        let interior = seed_interior(points, &seed);

        let [p0, p1, p2, p3] = seed;
        let mut faces: Vec<Face> = Vec::with_capacity(4);
        for verts in [[p0, p1, p2], [p0, p1, p3], [p0, p2, p3], [p1, p2, p3]] {
            let face = Face::new(verts, points)
                .and_then(|f| orient_outward(f, &interior, points))
                .ok_or(GeometryError::DegenerateHull {
                    points: points.len(),
                })?;
            faces.push(face);
        }

        for idx in 0..points.len() {
            if seed.contains(&idx) {
                continue;
            }
            let visible: Vec<usize> = faces
                .iter()
                .enumerate()
                .filter(|(_, f)| f.signed_distance(&points[idx], points) > TOLERANCE)
                .map(|(i, _)| i)
                .collect();
            if visible.is_empty() {
                continue;
            }

            // Horizon edges appear in exactly one visible face.
            let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
            for &fi in &visible {
                let [a, b, c] = faces[fi].verts;
                for (u, v) in [(a, b), (b, c), (c, a)] {
                    let key = if u < v { (u, v) } else { (v, u) };
                    *edge_count.entry(key).or_default() += 1;
                }
            }

            let mut kept: Vec<Face> = faces
                .iter()
                .enumerate()
                .filter(|(i, _)| !visible.contains(i))
                .map(|(_, f)| *f)
                .collect();

            for ((u, v), count) in edge_count {
                if count != 1 {
                    continue;
                }
                let face = Face::new([u, v, idx], points)
                    .and_then(|f| orient_outward(f, &interior, points));
                if let Some(face) = face {
                    kept.push(face);
                }
            }
            faces = kept;
        }

        Ok(Self {
            faces: faces.into_iter().map(|f| f.verts).collect(),
        })
    }

    /// Triangular faces as index triples into the input point slice.
    #[must_use]
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Unique undirected edges of the hull, suitable for wireframe drawing.
    #[must_use]
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .faces
            .iter()
            .flat_map(|&[a, b, c]| {
                [(a, b), (b, c), (c, a)]
                    .map(|(u, v)| if u < v { (u, v) } else { (v, u) })
            })
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    /// Indices of the points that appear on the hull boundary, ascending.
    #[must_use]
    pub fn vertices(&self) -> Vec<usize> {
        let mut verts: Vec<usize> = self.faces.iter().flatten().copied().collect();
        verts.sort_unstable();
        verts.dedup();
        verts
    }
}

/// Flips `face` if its normal points toward the interior reference point.
fn orient_outward(face: Face, interior: &Point3, points: &[Point3]) -> Option<Face> {
    if face.signed_distance(interior, points) > 0.0 {
        face.flipped(points)
    } else {
        Some(face)
    }
}

/// Picks four affinely independent seed points: the farthest pair, the point
/// farthest from their line, and the point farthest from their plane.
fn seed_tetrahedron(points: &[Point3]) -> Option<[usize; 4]> {
    let (p0, p1) = farthest_pair(points)?;
    let p2 = farthest_from_line(points, p0, p1)?;
    let p3 = farthest_from_plane(points, p0, p1, p2)?;
    Some([p0, p1, p2, p3])
}

fn farthest_pair(points: &[Point3]) -> Option<(usize, usize)> {
    let mut best = (0, 0, 0.0);
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = (points[j] - points[i]).norm_squared();
            if d > best.2 {
                best = (i, j, d);
            }
        }
    }
    (best.2.sqrt() > TOLERANCE).then_some((best.0, best.1))
}

fn farthest_from_line(points: &[Point3], a: usize, b: usize) -> Option<usize> {
    let dir = (points[b] - points[a]).normalize();
    let mut best = (0, 0.0);
    for (i, p) in points.iter().enumerate() {
        let rel = p - points[a];
        let d = (rel - dir * rel.dot(&dir)).norm();
        if d > best.1 {
            best = (i, d);
        }
    }
    (best.1 > TOLERANCE).then_some(best.0)
}

fn farthest_from_plane(points: &[Point3], a: usize, b: usize, c: usize) -> Option<usize> {
    let normal = (points[b] - points[a])
        .cross(&(points[c] - points[a]))
        .normalize();
    let mut best = (0, 0.0);
    for (i, p) in points.iter().enumerate() {
        let d = normal.dot(&(p - points[a])).abs();
        if d > best.1 {
            best = (i, d);
        }
    }
    (best.1 > TOLERANCE).then_some(best.0)
}

/// Mean of the seed tetrahedron corners; strictly inside the hull.
fn seed_interior(points: &[Point3], seed: &[usize; 4]) -> Point3 {
    let sum = seed
        .iter()
        .fold(Vector3::zeros(), |acc, &i| acc + points[i].coords);
    Point3::from(sum / 4.0)
}
