//! Pictures of a point set and its hull: an SVG plot and a Braille preview for
//! terminals.
use num_traits::ToPrimitive;

use crate::data::Point;

mod braille;
mod svg;

pub use braille::BraillePrinter;
pub use svg::SvgPlot;

// Data-space box around everything that gets drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
  min: [f64; 2],
  max: [f64; 2],
}

impl Bounds {
  // Points without a finite f64 value are ignored. Without any points the unit
  // square is used.
  fn of<'a, T, I>(pts: I) -> Bounds
  where
    T: ToPrimitive + 'a,
    I: IntoIterator<Item = &'a Point<T, 2>>,
  {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for pt in pts.into_iter().filter_map(to_f64) {
      for axis in 0..2 {
        min[axis] = min[axis].min(pt[axis]);
        max[axis] = max[axis].max(pt[axis]);
      }
    }
    if min[0] > max[0] {
      return Bounds {
        min: [0.0; 2],
        max: [1.0; 2],
      };
    }
    Bounds { min, max }
  }

  // Grow each side by a fraction of the extent, or by one unit along flat axes.
  fn padded(mut self, fraction: f64) -> Bounds {
    for axis in 0..2 {
      let extent = self.max[axis] - self.min[axis];
      let pad = if extent > 0.0 { extent * fraction } else { 1.0 };
      self.min[axis] -= pad;
      self.max[axis] += pad;
    }
    self
  }

  fn extent(&self, axis: usize) -> f64 {
    self.max[axis] - self.min[axis]
  }

  // Position inside the box, in [0, 1] along each axis. Flat axes map to the middle.
  fn normalize(&self, pt: [f64; 2]) -> [f64; 2] {
    let mut out = [0.5; 2];
    for axis in 0..2 {
      let extent = self.extent(axis);
      if extent > 0.0 {
        out[axis] = (pt[axis] - self.min[axis]) / extent;
      }
    }
    out
  }
}

fn to_f64<T: ToPrimitive>(pt: &Point<T, 2>) -> Option<[f64; 2]> {
  let xy = [pt.x_coord().to_f64()?, pt.y_coord().to_f64()?];
  if xy.iter().all(|c| c.is_finite()) {
    Some(xy)
  } else {
    None
  }
}
