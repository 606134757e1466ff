use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_svg::SVGBackend;

use crate::cloud::LabeledCloud;
use crate::error::{OutputError, Result};
use crate::math::hull_3d::Hull;
use crate::math::{Point3, Vector3};

/// Everything the renderer consumes: the loaded cloud plus the values the
/// pipeline computed from it. The geometric operations never depend on this
/// module; rendering is a downstream consumer only.
#[derive(Debug)]
pub struct Scene<'a> {
    /// The full labeled input cloud.
    pub cloud: &'a LabeledCloud,
    /// Points the offsets were derived from, in input order.
    pub sources: &'a [Point3],
    /// The derived outward points, parallel to `sources`.
    pub offsets: &'a [Point3],
    /// Centroid of the cloud.
    pub centroid: Point3,
}

/// Display parameters for the rendered figure.
#[derive(Debug, Clone)]
pub struct RenderParams {
    /// Output image size in pixels.
    pub size: (u32, u32),
    /// Display-only scale applied to each offset arrow. Independent of the
    /// geometric offset distance.
    pub arrow_scale: f64,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            size: (800, 600),
            arrow_scale: 0.3,
        }
    }
}

/// Renders the labeled cloud, its convex hull wireframe, the centroid
/// marker and the outward offset arrows into an image file.
///
/// The backend is picked from the file extension: `.svg` produces a vector
/// image, anything else goes through the bitmap backend.
///
/// # Errors
///
/// Returns an error if the full point set does not admit a 3D convex hull,
/// or if the drawing backend fails (unwritable path, font issues).
pub fn render_figure(path: &Path, scene: &Scene<'_>, params: &RenderParams) -> Result<()> {
    // Hull degeneracy is a geometry error; detect it before any backend work.
    let positions = scene.cloud.positions();
    let hull = Hull::build(&positions)?;

    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path, params.size).into_drawing_area();
        draw_scene(&root, scene, &positions, &hull, params)?;
    } else {
        let root = BitMapBackend::new(path, params.size).into_drawing_area();
        draw_scene(&root, scene, &positions, &hull, params)?;
    }
    Ok(())
}

fn draw_scene<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &Scene<'_>,
    positions: &[Point3],
    hull: &Hull,
    params: &RenderParams,
) -> Result<()> {
    root.fill(&WHITE).map_err(draw_err)?;

    let (min, max) = padded_bounds(
        positions
            .iter()
            .chain(scene.offsets.iter())
            .chain(std::iter::once(&scene.centroid)),
    );

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .build_cartesian_3d(min.x..max.x, min.y..max.y, min.z..max.z)
        .map_err(draw_err)?;
    chart.configure_axes().draw().map_err(draw_err)?;

    // Hull wireframe first, underneath the markers.
    let grey = RGBColor(160, 160, 160);
    for (a, b) in hull.edges() {
        let (pa, pb) = (positions[a], positions[b]);
        chart
            .draw_series(LineSeries::new(
                vec![(pa.x, pa.y, pa.z), (pb.x, pb.y, pb.z)],
                &grey,
            ))
            .map_err(draw_err)?;
    }

    for (index, label) in scene.cloud.labels().into_iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        let points = scene.cloud.select(label);
        chart
            .draw_series(
                points
                    .iter()
                    .map(|p| Circle::new((p.x, p.y, p.z), 3, color.filled())),
            )
            .map_err(draw_err)?
            .label(label)
            .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
    }

    let centroid = scene.centroid;
    chart
        .draw_series(std::iter::once(Cross::new(
            (centroid.x, centroid.y, centroid.z),
            5,
            BLACK.stroke_width(2),
        )))
        .map_err(draw_err)?
        .label("centroid")
        .legend(|(x, y)| Cross::new((x, y), 5, BLACK.stroke_width(2)));

    // Offset arrows, shortened for display.
    for (source, offset) in scene.sources.iter().zip(scene.offsets) {
        let tip = source + (offset - source) * params.arrow_scale;
        chart
            .draw_series(LineSeries::new(
                vec![
                    (source.x, source.y, source.z),
                    (tip.x, tip.y, tip.z),
                ],
                BLACK.stroke_width(2),
            ))
            .map_err(draw_err)?;
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Axis-aligned bounds of the given points, padded so markers at the
/// extremes stay inside the axes.
fn padded_bounds<'a>(points: impl Iterator<Item = &'a Point3>) -> (Point3, Point3) {
    let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
    let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }
    let pad = (max - min) * 0.05 + Vector3::new(1e-3, 1e-3, 1e-3);
    (min - pad, max + pad)
}

fn draw_err<E: std::fmt::Display>(err: E) -> crate::CloudwardError {
    OutputError::Render(err.to_string()).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use crate::cloud::LabeledPoint;

    use super::*;

    fn scene_cloud() -> LabeledCloud {
        LabeledCloud::new(vec![
            LabeledPoint::new("A", Point3::new(0.0, 0.0, 0.0)),
            LabeledPoint::new("A", Point3::new(2.0, 0.0, 0.0)),
            LabeledPoint::new("A", Point3::new(0.0, 2.0, 0.0)),
            LabeledPoint::new("A", Point3::new(0.0, 0.0, 2.0)),
            LabeledPoint::new("B", Point3::new(1.0, 1.0, 1.0)),
        ])
    }

    #[test]
    fn renders_svg_figure() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("figure.svg");
        let cloud = scene_cloud();
        let sources = cloud.select("B");
        let offsets = vec![Point3::new(1.5, 1.5, 1.5)];
        let scene = Scene {
            cloud: &cloud,
            sources: &sources,
            offsets: &offsets,
            centroid: Point3::new(0.6, 0.6, 0.6),
        };

        render_figure(&path, &scene, &RenderParams::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn coplanar_cloud_is_a_geometry_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("figure.svg");
        let cloud = LabeledCloud::new(vec![
            LabeledPoint::new("A", Point3::new(0.0, 0.0, 0.0)),
            LabeledPoint::new("A", Point3::new(1.0, 0.0, 0.0)),
            LabeledPoint::new("A", Point3::new(0.0, 1.0, 0.0)),
            LabeledPoint::new("B", Point3::new(1.0, 1.0, 0.0)),
        ]);
        let scene = Scene {
            cloud: &cloud,
            sources: &[],
            offsets: &[],
            centroid: Point3::new(0.5, 0.5, 0.0),
        };

        let err = render_figure(&path, &scene, &RenderParams::default()).unwrap_err();
        assert!(matches!(err, crate::CloudwardError::Geometry(_)));
        assert!(!path.exists());
    }
}
