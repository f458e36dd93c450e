//! Point files.
//!
//! Point sets are stored as `{"points": [[x, y], ...]}` and hulls as
//! `{"hull_points": [[x, y], ...]}`. Malformed files are rejected here, before any
//! point reaches the hull computation.
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::data::{Hull, Point, PointSet};

#[derive(Debug, Error)]
pub enum LoadError {
  /// The document does not have the shape of a point file.
  #[error("invalid input format: {0}")]
  InvalidInputFormat(String),
  #[error("point {index} has a non-numeric coordinate: {value}")]
  NonNumericCoordinate { index: usize, value: String },
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error("malformed JSON: {0}")]
  Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct PointsFile<'a, T> {
  points: Vec<&'a [T; 2]>,
}

#[derive(Serialize)]
struct HullFile<'a, T> {
  hull_points: Vec<&'a [T; 2]>,
}

/// The sample set used when no point file is available.
pub fn default_points() -> PointSet<f64> {
  [
    (0., 3.),
    (1., 1.),
    (2., 2.),
    (4., 4.),
    (0., 0.),
    (1., 2.),
    (3., 1.),
    (3., 3.),
  ]
  .into_iter()
  .map(Point::from)
  .collect()
}

/// Read a point file.
pub fn load_points(path: impl AsRef<Path>) -> Result<PointSet<f64>, LoadError> {
  let path = path.as_ref();
  let text = fs::read_to_string(path)?;
  let points = parse_points(&text)?;
  info!(path = %path.display(), points = points.len(), "loaded points");
  Ok(points)
}

/// Where the points returned by [`load_or_default`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSource {
  File,
  /// The file did not exist. `saved` is set when the defaults were written to it.
  Defaults { saved: bool },
}

/// Read a point file, or fall back to [`default_points`] when it does not exist.
///
/// Only a missing file triggers the fallback. Files that exist but cannot be read
/// or parsed are errors, and are never overwritten. With `write_defaults` the
/// default points are saved to `path` so the next run finds them.
pub fn load_or_default(
  path: impl AsRef<Path>,
  write_defaults: bool,
) -> Result<(PointSet<f64>, PointSource), LoadError> {
  let path = path.as_ref();
  match load_points(path) {
    Ok(points) => Ok((points, PointSource::File)),
    Err(LoadError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
      warn!(path = %path.display(), "input not found, using default points");
      let points = default_points();
      if write_defaults {
        save_points(path, &points)?;
      }
      Ok((points, PointSource::Defaults { saved: write_defaults }))
    }
    Err(err) => Err(err),
  }
}

/// Parse the contents of a point file.
///
/// ```rust
/// # use hullscan::io::{parse_points, LoadError};
/// let set = parse_points(r#"{"points": [[0, 0], [1.5, 2]]}"#).unwrap();
/// assert_eq!(set.len(), 2);
/// assert!(matches!(
///   parse_points(r#"{"points": [[0, "a"]]}"#),
///   Err(LoadError::NonNumericCoordinate { index: 0, .. })
/// ));
/// ```
pub fn parse_points(text: &str) -> Result<PointSet<f64>, LoadError> {
  let doc: Value = serde_json::from_str(text)?;
  let object = doc
    .as_object()
    .ok_or_else(|| LoadError::InvalidInputFormat("expected a JSON object".to_string()))?;
  let points = object
    .get("points")
    .ok_or_else(|| LoadError::InvalidInputFormat("missing \"points\" list".to_string()))?;
  let pairs = points
    .as_array()
    .ok_or_else(|| LoadError::InvalidInputFormat(format!("\"points\" is not a list: {points}")))?;
  debug!(pairs = pairs.len(), "parsing points");
  pairs
    .iter()
    .enumerate()
    .map(|(index, pair)| parse_pair(index, pair))
    .collect()
}

fn parse_pair(index: usize, pair: &Value) -> Result<Point<f64, 2>, LoadError> {
  let coords = match pair.as_array() {
    Some(coords) if coords.len() == 2 => coords,
    _ => {
      return Err(LoadError::InvalidInputFormat(format!(
        "point {index} is not an [x, y] pair: {pair}"
      )))
    }
  };
  let coord = |value: &Value| {
    value
      .as_f64()
      .ok_or_else(|| LoadError::NonNumericCoordinate {
        index,
        value: value.to_string(),
      })
  };
  Ok(Point::new([coord(&coords[0])?, coord(&coords[1])?]))
}

/// Write a point file.
pub fn save_points<T: Serialize>(
  path: impl AsRef<Path>,
  points: &[Point<T, 2>],
) -> std::io::Result<()> {
  let doc = PointsFile {
    points: points.iter().map(|pt| &pt.array).collect(),
  };
  write_json(path.as_ref(), &doc)?;
  info!(path = %path.as_ref().display(), points = points.len(), "saved points");
  Ok(())
}

/// Write the vertices of a hull, anchor first.
pub fn save_hull<T: Serialize>(path: impl AsRef<Path>, hull: &Hull<T>) -> std::io::Result<()> {
  let doc = HullFile {
    hull_points: hull.iter().map(|pt| &pt.array).collect(),
  };
  write_json(path.as_ref(), &doc)?;
  info!(path = %path.as_ref().display(), vertices = hull.len(), "saved hull");
  Ok(())
}

fn write_json(path: &Path, doc: &impl Serialize) -> std::io::Result<()> {
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      fs::create_dir_all(parent)?;
    }
  }
  let text = serde_json::to_string_pretty(doc)?;
  fs::write(path, text + "\n")
}
