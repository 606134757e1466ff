use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{InputError, Result};
use crate::math::Point3;

use super::{LabeledCloud, LabeledPoint};

/// Loads a labeled point cloud from a whitespace-delimited text file.
///
/// Each line must hold exactly four fields, `label x y z`, with no header
/// row. Coordinates use standard decimal notation.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, or if any line does not
/// parse as a labeled point.
pub fn load_cloud(path: &Path) -> Result<LabeledCloud> {
    let file = File::open(path).map_err(|source| InputError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    parse_cloud(BufReader::new(file))
}

/// Parses labeled points from a buffered reader, one `label x y z` row per
/// line.
///
/// # Errors
///
/// Returns an error on a mid-stream read failure, a line with a field count
/// other than four, or a coordinate token that is not a real number. Errors
/// carry the 1-based line number.
pub fn parse_cloud<R: BufRead>(reader: R) -> Result<LabeledCloud> {
    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(InputError::Read)?;
        points.push(parse_line(&line, index + 1)?);
    }
    Ok(LabeledCloud::new(points))
}

fn parse_line(line: &str, number: usize) -> Result<LabeledPoint> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(InputError::MalformedLine {
            line: number,
            found: fields.len(),
        }
        .into());
    }

    let mut coords = [0.0_f64; 3];
    for (slot, token) in coords.iter_mut().zip(&fields[1..]) {
        *slot = token
            .parse()
            .map_err(|source| InputError::InvalidCoordinate {
                line: number,
                token: (*token).to_owned(),
                source,
            })?;
    }

    Ok(LabeledPoint::new(
        fields[0],
        Point3::new(coords[0], coords[1], coords[2]),
    ))
}
