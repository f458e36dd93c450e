use num_traits::ToPrimitive;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

use super::{to_f64, Bounds};
use crate::data::{Hull, Point};

pub const DEFAULT_TITLE: &str = "Convex Hull using Graham Scan";

// Distance between the plot area and the edge of the image.
const MARGIN: f64 = 60.0;
// Roughly this many grid lines per axis.
const GRID_LINES: f64 = 8.0;

/// SVG plot of a point set and its hull.
///
/// Input points are drawn as blue dots and the hull as a closed red outline. A
/// two-vertex hull is drawn as a segment and smaller hulls are not drawn at all.
///
/// ```rust
/// # use hullscan::algorithms::convex_hull;
/// # use hullscan::data::Point;
/// # use hullscan::render::SvgPlot;
/// let pts = vec![Point::new([0, 0]), Point::new([4, 0]), Point::new([0, 4]), Point::new([1, 1])];
/// let hull = convex_hull(&pts);
/// let svg = SvgPlot::new(&pts, &hull).size(400, 300).to_string();
/// assert!(svg.starts_with("<svg"));
/// assert!(svg.contains("<polygon"));
/// ```
#[derive(Debug, Clone)]
pub struct SvgPlot<'a, T> {
  points: &'a [Point<T, 2>],
  hull: &'a Hull<T>,
  width: u32,
  height: u32,
  title: String,
}

impl<'a, T> SvgPlot<'a, T>
where
  T: ToPrimitive,
{
  pub fn new(points: &'a [Point<T, 2>], hull: &'a Hull<T>) -> SvgPlot<'a, T> {
    SvgPlot {
      points,
      hull,
      width: 800,
      height: 800,
      title: DEFAULT_TITLE.to_string(),
    }
  }

  /// Image size in pixels.
  #[must_use]
  pub fn size(mut self, width: u32, height: u32) -> Self {
    self.width = width;
    self.height = height;
    self
  }

  #[must_use]
  pub fn title(mut self, title: impl Into<String>) -> Self {
    self.title = title.into();
    self
  }

  pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
    let path = path.as_ref();
    fs::write(path, self.to_string())?;
    info!(path = %path.display(), "saved plot");
    Ok(())
  }

  fn frame(&self) -> Frame {
    Frame {
      bounds: Bounds::of(self.points.iter().chain(self.hull.iter())).padded(0.1),
      width: f64::from(self.width),
      height: f64::from(self.height),
    }
  }

  fn write_grid(&self, f: &mut fmt::Formatter<'_>, frame: &Frame) -> fmt::Result {
    let (left, top, right, bottom) = frame.plot_area();
    for axis in 0..2 {
      let step = nice_step(frame.bounds.extent(axis) / GRID_LINES);
      for value in ticks(frame.bounds.min[axis], frame.bounds.max[axis], step) {
        let label = format_tick(value, step);
        if axis == 0 {
          let (x, _) = frame.project([value, frame.bounds.min[1]]);
          writeln!(
            f,
            r##"  <line x1="{x:.1}" y1="{top:.1}" x2="{x:.1}" y2="{bottom:.1}" stroke="#dddddd" stroke-width="1"/>"##
          )?;
          writeln!(
            f,
            r#"  <text x="{x:.1}" y="{:.1}" font-size="12" text-anchor="middle">{label}</text>"#,
            bottom + 18.0
          )?;
        } else {
          let (_, y) = frame.project([frame.bounds.min[0], value]);
          writeln!(
            f,
            r##"  <line x1="{left:.1}" y1="{y:.1}" x2="{right:.1}" y2="{y:.1}" stroke="#dddddd" stroke-width="1"/>"##
          )?;
          writeln!(
            f,
            r#"  <text x="{:.1}" y="{:.1}" font-size="12" text-anchor="end">{label}</text>"#,
            left - 8.0,
            y + 4.0
          )?;
        }
      }
    }
    writeln!(
      f,
      r#"  <rect x="{left:.1}" y="{top:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="black" stroke-width="1"/>"#,
      right - left,
      bottom - top
    )
  }

  fn write_hull(&self, f: &mut fmt::Formatter<'_>, frame: &Frame) -> fmt::Result {
    let vertices: Vec<(f64, f64)> = self
      .hull
      .iter()
      .filter_map(to_f64)
      .map(|pt| frame.project(pt))
      .collect();
    match vertices.as_slice() {
      [] | [_] => Ok(()),
      [(x1, y1), (x2, y2)] => writeln!(
        f,
        r#"  <line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="red" stroke-width="2"/>"#
      ),
      _ => {
        let coords: Vec<String> = vertices
          .iter()
          .map(|(x, y)| format!("{x:.1},{y:.1}"))
          .collect();
        writeln!(
          f,
          r#"  <polygon points="{}" fill="none" stroke="red" stroke-width="2"/>"#,
          coords.join(" ")
        )
      }
    }
  }
}

impl<'a, T> fmt::Display for SvgPlot<'a, T>
where
  T: ToPrimitive,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let frame = self.frame();
    let (left, top, right, bottom) = frame.plot_area();
    writeln!(
      f,
      r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
      w = self.width,
      h = self.height
    )?;
    writeln!(f, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;
    self.write_grid(f, &frame)?;
    writeln!(
      f,
      r#"  <text x="{:.1}" y="{:.1}" font-size="18" text-anchor="middle">{}</text>"#,
      (left + right) / 2.0,
      top / 2.0 + 6.0,
      escape(&self.title)
    )?;
    writeln!(
      f,
      r#"  <text x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle">X</text>"#,
      (left + right) / 2.0,
      bottom + 42.0
    )?;
    writeln!(
      f,
      r#"  <text x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle">Y</text>"#,
      left - 42.0,
      (top + bottom) / 2.0
    )?;
    self.write_hull(f, &frame)?;
    for (x, y) in self.points.iter().filter_map(to_f64).map(|pt| frame.project(pt)) {
      writeln!(f, r#"  <circle cx="{x:.1}" cy="{y:.1}" r="4" fill="blue"/>"#)?;
    }
    writeln!(f, "</svg>")
  }
}

struct Frame {
  bounds: Bounds,
  width: f64,
  height: f64,
}

impl Frame {
  fn plot_area(&self) -> (f64, f64, f64, f64) {
    (MARGIN, MARGIN, self.width - MARGIN, self.height - MARGIN)
  }

  // Data space to image space. The y-axis points up.
  fn project(&self, pt: [f64; 2]) -> (f64, f64) {
    let (left, top, right, bottom) = self.plot_area();
    let [u, v] = self.bounds.normalize(pt);
    (left + u * (right - left), bottom - v * (bottom - top))
  }
}

// 1, 2 or 5 times a power of ten, at least `raw`.
fn nice_step(raw: f64) -> f64 {
  if !(raw.is_finite() && raw > 0.0) {
    return 1.0;
  }
  let magnitude = 10f64.powf(raw.log10().floor());
  let nice = match raw / magnitude {
    n if n <= 1.0 => 1.0,
    n if n <= 2.0 => 2.0,
    n if n <= 5.0 => 5.0,
    _ => 10.0,
  };
  nice * magnitude
}

fn ticks(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> {
  let first = (min / step).ceil();
  (0..100)
    .map(move |k| (first + f64::from(k)) * step)
    .take_while(move |value| *value <= max + step * 1e-9)
}

fn format_tick(value: f64, step: f64) -> String {
  let precision = if step >= 1.0 {
    0
  } else {
    (-step.log10().floor()) as usize
  };
  // No "-0".
  let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
  format!("{value:.precision$}")
}

fn escape(text: &str) -> String {
  text
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::algorithms::convex_hull;
  use crate::io::default_points;

  #[test]
  fn draws_points_and_closed_hull() {
    let pts = default_points();
    let hull = convex_hull(&pts);
    let svg = SvgPlot::new(&pts, &hull).to_string();
    assert_eq!(svg.matches("<circle").count(), 8);
    assert_eq!(svg.matches("<polygon").count(), 1);
    // (0, 0) in a 4.8 by 4.8 box starting at -0.4.
    assert!(svg.contains(r#"<polygon points="116.7,683.3 "#));
    assert!(svg.contains(DEFAULT_TITLE));
    assert!(svg.trim_end().ends_with("</svg>"));
  }

  #[test]
  fn segment_hull_is_a_line() {
    let pts = vec![Point::new([0, 0]), Point::new([1, 1]), Point::new([2, 2])];
    let hull = convex_hull(&pts);
    let svg = SvgPlot::new(&pts, &hull).to_string();
    assert!(!svg.contains("<polygon"));
    assert!(svg.contains(r#"stroke="red""#));
  }

  #[test]
  fn single_point_has_no_outline() {
    let pts = vec![Point::new([3, 3])];
    let hull = convex_hull(&pts);
    let svg = SvgPlot::new(&pts, &hull).size(200, 200).to_string();
    assert!(!svg.contains(r#"stroke="red""#));
    assert!(svg.contains(r#"<circle cx="100.0" cy="100.0""#));
  }

  #[test]
  fn title_is_escaped() {
    let pts: Vec<Point<f64, 2>> = vec![];
    let hull = convex_hull(&pts);
    let svg = SvgPlot::new(&pts, &hull).title("a < b & c").to_string();
    assert!(svg.contains("a &lt; b &amp; c"));
  }

  #[test]
  fn steps_and_ticks() {
    assert_eq!(nice_step(0.6), 1.0);
    assert_eq!(nice_step(1.3), 2.0);
    assert_eq!(nice_step(30.0), 50.0);
    assert_eq!(nice_step(0.0), 1.0);
    let values: Vec<f64> = ticks(-0.4, 4.4, 1.0).collect();
    assert_eq!(values, vec![-0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(format_tick(-0.0, 1.0), "0");
    assert_eq!(format_tick(0.25, 0.05), "0.25");
  }

  #[test]
  fn save_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hull.svg");
    let pts = default_points();
    let hull = pts.convex_hull();
    SvgPlot::new(&pts, &hull).save(&path).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("<polygon"));
  }
}
