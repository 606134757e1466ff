use std::path::PathBuf;

use tracing::info;

use crate::cloud::{load_cloud, write_points, LabeledCloud};
use crate::error::Result;
use crate::math::Point3;
use crate::operations::{centroid, outward_points};
use crate::render::{render_figure, RenderParams, Scene};

/// Default offset distance applied along each outward direction.
pub const DEFAULT_DISTANCE: f64 = 1.0;

/// Default label of the points the offsets are derived from.
pub const DEFAULT_SOURCE_LABEL: &str = "B";

/// Configuration for one pipeline run.
///
/// The label conventions are explicit parameters rather than hardcoded
/// strings: `source_label` names the group the offsets are derived from,
/// and `centroid_labels` optionally restricts which groups contribute to
/// the centroid (`None` folds every label together).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Input data file, one `label x y z` row per line.
    pub input: PathBuf,
    /// Output data file for the derived points.
    pub output: PathBuf,
    /// Optional output image for the rendered figure.
    pub plot: Option<PathBuf>,
    /// Offset distance along each outward direction.
    pub distance: f64,
    /// Label of the points to offset.
    pub source_label: String,
    /// Labels contributing to the centroid; `None` means all of them.
    pub centroid_labels: Option<Vec<String>>,
    /// Display parameters for the figure.
    pub render: RenderParams,
}

impl PipelineConfig {
    /// Creates a configuration with default distance, source label and
    /// render parameters.
    #[must_use]
    pub fn new(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output,
            plot: None,
            distance: DEFAULT_DISTANCE,
            source_label: DEFAULT_SOURCE_LABEL.to_owned(),
            centroid_labels: None,
            render: RenderParams::default(),
        }
    }
}

/// Counters reported after a successful run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineSummary {
    /// Points loaded from the input file, all labels combined.
    pub loaded: usize,
    /// Outward points derived and written.
    pub derived: usize,
}

/// Runs the full pipeline: load, centroid, select, offset, write, and
/// optionally render.
///
/// Stages run strictly in order and the first failure aborts the run. The
/// output data file is only written once every outward point has been
/// computed, so a failed run leaves no partial output behind.
///
/// # Errors
///
/// Propagates any input, geometry or output error from the stages; see
/// [`crate::error`] for the taxonomy.
pub fn run(config: &PipelineConfig) -> Result<PipelineSummary> {
    info!(path = %config.input.display(), "loading input data");
    let cloud = load_cloud(&config.input)?;

    info!(points = cloud.len(), "computing outward points");
    let center = centroid(&centroid_positions(&cloud, config))?;
    let sources = cloud.select(&config.source_label);
    let offsets = outward_points(&sources, &center, config.distance)?;

    info!(path = %config.output.display(), count = offsets.len(), "writing derived points");
    write_points(&config.output, &offsets)?;

    if let Some(plot) = &config.plot {
        info!(path = %plot.display(), "rendering figure");
        let scene = Scene {
            cloud: &cloud,
            sources: &sources,
            offsets: &offsets,
            centroid: center,
        };
        render_figure(plot, &scene, &config.render)?;
    }

    Ok(PipelineSummary {
        loaded: cloud.len(),
        derived: offsets.len(),
    })
}

/// Coordinates feeding the centroid, honoring the optional label
/// restriction while preserving input order.
fn centroid_positions(cloud: &LabeledCloud, config: &PipelineConfig) -> Vec<Point3> {
    match &config.centroid_labels {
        None => cloud.positions(),
        Some(labels) => cloud
            .iter()
            .filter(|p| labels.iter().any(|l| *l == p.label))
            .map(|p| p.position)
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::error::{CloudwardError, GeometryError, InputError};

    use super::*;

    fn read_rows(path: &std::path::Path) -> Vec<Vec<f64>> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| {
                line.split_whitespace()
                    .map(|t| t.parse().unwrap())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn end_to_end_small_cloud() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("points.txt");
        let output = tmp.path().join("c_points.txt");
        fs::write(&input, "A 0 0 0\nA 2 0 0\nB 1 1 0\n").unwrap();

        let config = PipelineConfig::new(input, output.clone());
        let summary = run(&config).unwrap();

        assert_eq!(summary.loaded, 3);
        assert_eq!(summary.derived, 1);

        let rows = read_rows(&output);
        assert_eq!(rows.len(), 1);
        assert!((rows[0][0] - 1.0).abs() < 1e-9);
        assert!((rows[0][1] - 2.0).abs() < 1e-9);
        assert!(rows[0][2].abs() < 1e-9);
    }

    #[test]
    fn offsets_follow_input_order_despite_interleaving() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("points.txt");
        let output = tmp.path().join("out.txt");
        fs::write(
            &input,
            "B 10 0 0\nA 0 0 0\nB 0 10 0\nA 1 1 1\n",
        )
        .unwrap();

        let config = PipelineConfig::new(input, output.clone());
        let summary = run(&config).unwrap();
        assert_eq!(summary.derived, 2);

        let rows = read_rows(&output);
        // First row comes from (10,0,0), second from (0,10,0).
        assert!(rows[0][0] > 10.0);
        assert!(rows[1][1] > 10.0);
    }

    #[test]
    fn zero_distance_returns_the_sources() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("points.txt");
        let output = tmp.path().join("out.txt");
        fs::write(&input, "A 0 0 0\nA 2 0 0\nB 1 1 0\n").unwrap();

        let mut config = PipelineConfig::new(input, output.clone());
        config.distance = 0.0;
        run(&config).unwrap();

        let rows = read_rows(&output);
        assert!((rows[0][0] - 1.0).abs() < 1e-12);
        assert!((rows[0][1] - 1.0).abs() < 1e-12);
        assert!(rows[0][2].abs() < 1e-12);
    }

    #[test]
    fn no_matching_source_label_writes_an_empty_file() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("points.txt");
        let output = tmp.path().join("out.txt");
        fs::write(&input, "A 0 0 0\nA 2 0 0\n").unwrap();

        let summary = run(&PipelineConfig::new(input, output.clone())).unwrap();
        assert_eq!(summary.derived, 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn custom_source_label_is_honored() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("points.txt");
        let output = tmp.path().join("out.txt");
        fs::write(&input, "A 0 0 0\nA 2 0 0\nQ 1 1 0\n").unwrap();

        let mut config = PipelineConfig::new(input, output.clone());
        config.source_label = "Q".to_owned();
        let summary = run(&config).unwrap();
        assert_eq!(summary.derived, 1);
    }

    #[test]
    fn centroid_label_restriction_changes_the_result() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("points.txt");
        let output = tmp.path().join("out.txt");
        // Restricting the centroid to "A" puts it at the origin.
        fs::write(&input, "A -1 0 0\nA 1 0 0\nB 0 3 0\n").unwrap();

        let mut config = PipelineConfig::new(input, output.clone());
        config.centroid_labels = Some(vec!["A".to_owned()]);
        run(&config).unwrap();

        let rows = read_rows(&output);
        assert!(rows[0][0].abs() < 1e-9);
        assert!((rows[0][1] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_source_aborts_without_writing_output() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("points.txt");
        let output = tmp.path().join("out.txt");
        // The lone B point sits exactly on the centroid of {A, A, B}.
        fs::write(&input, "A -1 0 0\nA 1 0 0\nB 0 0 0\n").unwrap();

        let err = run(&PipelineConfig::new(input, output.clone())).unwrap_err();
        assert!(matches!(
            err,
            CloudwardError::Geometry(GeometryError::DegenerateDirection)
        ));
        assert!(!output.exists());
    }

    #[test]
    fn missing_input_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let config = PipelineConfig::new(
            tmp.path().join("missing.txt"),
            tmp.path().join("out.txt"),
        );
        let err = run(&config).unwrap_err();
        assert!(matches!(
            err,
            CloudwardError::Input(InputError::NotFound { .. })
        ));
    }

    #[test]
    fn empty_input_cannot_produce_a_centroid() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("points.txt");
        fs::write(&input, "").unwrap();

        let err = run(&PipelineConfig::new(input, tmp.path().join("out.txt"))).unwrap_err();
        assert!(matches!(
            err,
            CloudwardError::Geometry(GeometryError::EmptyCloud)
        ));
    }

    #[test]
    fn plot_request_produces_an_image_file() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("points.txt");
        let output = tmp.path().join("out.txt");
        let plot = tmp.path().join("figure.svg");
        fs::write(
            &input,
            "A 0 0 0\nA 2 0 0\nA 0 2 0\nA 0 0 2\nB 1 1 1\n",
        )
        .unwrap();

        let mut config = PipelineConfig::new(input, output);
        config.plot = Some(plot.clone());
        run(&config).unwrap();
        assert!(plot.exists());
    }
}
