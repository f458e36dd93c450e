use num_traits::ToPrimitive;
use std::fmt;

use super::{to_f64, Bounds};
use crate::data::{Hull, Point};

/// A terminal preview of a point set and its hull using Braille Unicode symbols.
///
/// Braille characters (U+2800 to U+28FF) encode 2×4 dot patterns, so every
/// character cell holds a 2-pixel-wide by 4-pixel-tall piece of the picture. The
/// drawing is scaled to fill the requested number of cells.
///
/// # Braille Dot Numbering
///
/// ```text
/// 1  4
/// 2  5
/// 3  6
/// 7  8
/// ```
///
/// # Examples
///
/// ```
/// use hullscan::algorithms::convex_hull;
/// use hullscan::data::Point;
/// use hullscan::render::BraillePrinter;
///
/// let pts = vec![Point::new([0, 0]), Point::new([10, 0]), Point::new([5, 8])];
/// let hull = convex_hull(&pts);
/// let preview = BraillePrinter::new(&pts, &hull).size(6, 2).to_string();
/// assert_eq!(preview.lines().count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BraillePrinter<'a, T> {
  points: &'a [Point<T, 2>],
  hull: &'a Hull<T>,
  columns: usize,
  rows: usize,
}

// Bit of each dot, indexed by [row][column] inside a cell.
const DOTS: [[u32; 2]; 4] = [
  [0b0000_0001, 0b0000_1000],
  [0b0000_0010, 0b0001_0000],
  [0b0000_0100, 0b0010_0000],
  [0b0100_0000, 0b1000_0000],
];

impl<'a, T> BraillePrinter<'a, T>
where
  T: ToPrimitive,
{
  pub fn new(points: &'a [Point<T, 2>], hull: &'a Hull<T>) -> BraillePrinter<'a, T> {
    BraillePrinter {
      points,
      hull,
      columns: 40,
      rows: 12,
    }
  }

  /// Size of the preview in characters.
  #[must_use]
  pub fn size(mut self, columns: usize, rows: usize) -> Self {
    self.columns = columns;
    self.rows = rows;
    self
  }

  fn render(&self) -> String {
    let width = self.columns * 2;
    let height = self.rows * 4;
    if width == 0 || height == 0 {
      return String::new();
    }
    let bounds = Bounds::of(self.points.iter().chain(self.hull.iter()));
    let to_pixel = |pt: &Point<T, 2>| -> Option<(i32, i32)> {
      let [u, v] = bounds.normalize(to_f64(pt)?);
      let x = (u * (width - 1) as f64).round() as i32;
      let y = ((1.0 - v) * (height - 1) as f64).round() as i32;
      Some((x, y))
    };

    let mut grid = vec![vec![false; width]; height];
    let mut plot = |x: i32, y: i32| {
      if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
        if x < width && y < height {
          grid[y][x] = true;
        }
      }
    };

    for edge in self.hull.iter_edges() {
      if let (Some((x0, y0)), Some((x1, y1))) = (to_pixel(edge.src), to_pixel(edge.dst)) {
        bresenham_line(x0, y0, x1, y1, &mut plot);
      }
    }
    for (x, y) in self.points.iter().chain(self.hull.iter()).filter_map(to_pixel) {
      plot(x, y);
    }

    grid_to_braille(&grid)
  }
}

impl<'a, T> fmt::Display for BraillePrinter<'a, T>
where
  T: ToPrimitive,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.render())
  }
}

fn grid_to_braille(grid: &[Vec<bool>]) -> String {
  let height = grid.len();
  let width = grid.first().map_or(0, Vec::len);
  let pixel = |x: usize, y: usize| grid.get(y).and_then(|row| row.get(x)).copied().unwrap_or(false);

  let mut result = String::new();
  for row in 0..height.div_ceil(4) {
    for col in 0..width.div_ceil(2) {
      let mut dots = 0;
      for (dy, bits) in DOTS.iter().enumerate() {
        for (dx, bit) in bits.iter().enumerate() {
          if pixel(col * 2 + dx, row * 4 + dy) {
            dots |= bit;
          }
        }
      }
      // U+2800 is the blank pattern.
      result.push(char::from_u32(0x2800 + dots).unwrap_or('?'));
    }
    result.push('\n');
  }
  result
}

/// Bresenham's line drawing algorithm.
///
/// Calls the provided closure for each point along the line from (x0, y0) to (x1, y1).
fn bresenham_line<F>(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: F)
where
  F: FnMut(i32, i32),
{
  let dx = (x1 - x0).abs();
  let dy = -(y1 - y0).abs();
  let sx = if x0 < x1 { 1 } else { -1 };
  let sy = if y0 < y1 { 1 } else { -1 };
  let mut error = dx + dy;
  let (mut x, mut y) = (x0, y0);

  loop {
    plot(x, y);
    if x == x1 && y == y1 {
      break;
    }
    let e2 = 2 * error;
    if e2 >= dy {
      error += dy;
      x += sx;
    }
    if e2 <= dx {
      error += dx;
      y += sy;
    }
  }
}
