use tracing::{debug, trace};

use crate::data::{Hull, Point};
use crate::PolygonScalar;

// https://en.wikipedia.org/wiki/Graham_scan

/// What to do with input points that lie on an edge of the hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Collinear {
  /// Only corners are hull vertices. Every turn of the hull is strictly
  /// counter-clockwise.
  #[default]
  Exclude,
  /// Points on the boundary are kept as (straight-turn) vertices.
  Retain,
}

/// Configurable Graham scan.
///
/// ```rust
/// # use hullscan::algorithms::{Collinear, GrahamScan};
/// # use hullscan::data::Point;
/// let pts = vec![
///   Point::new([0, 0]),
///   Point::new([1, 0]),
///   Point::new([2, 0]),
///   Point::new([1, 1]),
/// ];
/// let strict = GrahamScan::new().compute(&pts);
/// assert_eq!(strict.len(), 3);
/// let retained = GrahamScan::new().collinear(Collinear::Retain).compute(&pts);
/// assert_eq!(retained.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GrahamScan {
  collinear: Collinear,
}

impl GrahamScan {
  pub const fn new() -> GrahamScan {
    GrahamScan {
      collinear: Collinear::Exclude,
    }
  }

  #[must_use]
  pub fn collinear(self, collinear: Collinear) -> GrahamScan {
    GrahamScan { collinear }
  }

  // Properties:
  //    No panics.
  //    All results pass Hull::validate_weakly (Hull::validate for Collinear::Exclude).
  //    No points are outside the resulting hull.
  /// $O(n \log n)$ Convex hull of a set of points.
  ///
  /// The input is only borrowed. Empty, coincident and colinear inputs produce
  /// hulls with zero, one and two vertices respectively. A colinear input is
  /// reduced to its two extreme points regardless of [`Collinear`].
  pub fn compute<T>(&self, pts: &[Point<T, 2>]) -> Hull<T>
  where
    T: PolygonScalar,
  {
    let anchor = match pts.iter().min_by(|a, b| a.cmp_lowest(b)) {
      Some(anchor) => anchor.clone(),
      None => {
        debug!("empty point set");
        return Hull::new_unchecked(Vec::new());
      }
    };

    let mut rest: Vec<Point<T, 2>> = pts.iter().filter(|pt| **pt != anchor).cloned().collect();
    rest.sort_by(|a, b| {
      anchor
        .cmp_polar_angle(a, b)
        .then_with(|| anchor.cmp_distance_to(a, b))
    });
    // Copies sort next to each other.
    rest.dedup();

    let last = match rest.last() {
      Some(last) => last.clone(),
      None => {
        debug!(points = pts.len(), "all points coincide");
        return Hull::new_unchecked(vec![anchor]);
      }
    };
    // The first and the last ray around the anchor coincide only when every
    // point lies on it.
    if anchor.orientation(&rest[0], &last).is_colinear() {
      debug!(points = pts.len(), "all points are colinear");
      return Hull::new_unchecked(vec![anchor, last]);
    }

    // Points on the closing edge have to be visited from the far end.
    if self.collinear == Collinear::Retain {
      let run = rest
        .iter()
        .rev()
        .take_while(|pt| anchor.orientation(pt, &last).is_colinear())
        .count();
      let len = rest.len();
      rest[len - run..].reverse();
    }

    let mut stack: Vec<Point<T, 2>> = Vec::with_capacity(rest.len() + 1);
    stack.push(anchor);
    for pt in rest {
      while let [.., second, top] = stack.as_slice() {
        let turn = second.orientation(top, &pt);
        let keep = match self.collinear {
          Collinear::Exclude => turn.is_ccw(),
          Collinear::Retain => !turn.is_cw(),
        };
        if keep {
          break;
        }
        trace!(?top, ?turn, "pop");
        stack.pop();
      }
      stack.push(pt);
    }

    debug!(points = pts.len(), vertices = stack.len(), "hull computed");
    Hull::new_unchecked(stack)
  }
}

/// $O(n \log n)$ Convex hull of a set of points.
///
/// [Graham scan][wiki] algorithm for finding the smallest convex polygon which
/// contains all the given points. Points on the edges of the hull are dropped, see
/// [`GrahamScan`] for keeping them.
///
/// # Properties
/// * No points from the input set will be outside the returned hull.
/// * All vertices of the hull are from the input set.
/// * Vertices are listed counter-clockwise starting at the lowest (then leftmost)
///   point and every turn is strictly counter-clockwise.
///
/// # Examples
///
/// ```rust
/// # use hullscan::algorithms::convex_hull;
/// # use hullscan::data::Point;
/// let empty_set: Vec<Point<i32, 2>> = vec![];
/// assert!(convex_hull(&empty_set).is_empty());
///
/// let dups = vec![Point::new([0, 0])].repeat(3);
/// assert_eq!(convex_hull(&dups).points(), &[Point::new([0, 0])]);
/// ```
///
/// [wiki]: https://en.wikipedia.org/wiki/Graham_scan
pub fn convex_hull<T>(pts: &[Point<T, 2>]) -> Hull<T>
where
  T: PolygonScalar,
{
  GrahamScan::new().compute(pts)
}
