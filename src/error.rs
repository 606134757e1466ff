use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the cloudward pipeline.
#[derive(Debug, Error)]
pub enum CloudwardError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Errors related to loading and parsing input data.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input file not found or unreadable: {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read input data")]
    Read(#[source] io::Error),

    #[error("line {line}: expected `label x y z`, found {found} fields")]
    MalformedLine { line: usize, found: usize },

    #[error("line {line}: invalid coordinate {token:?}")]
    InvalidCoordinate {
        line: usize,
        token: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("cannot compute the centroid of an empty point set")]
    EmptyCloud,

    #[error("zero-length outward direction: point coincides with the centroid")]
    DegenerateDirection,

    #[error("convex hull requires at least 4 affinely independent points, got {points}")]
    DegenerateHull { points: usize },
}

/// Errors related to writing results.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write output file: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render figure: {0}")]
    Render(String),
}

/// Convenience type alias for results using [`CloudwardError`].
pub type Result<T> = std::result::Result<T, CloudwardError>;
