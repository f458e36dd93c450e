use claims::debug_assert_ok;
use num_traits::NumOps;
use std::cmp::Ordering;
use std::iter::Sum;
use std::ops::Deref;

use crate::data::{Point, PointLocation};
use crate::{Error, Orientation, PolygonScalar, TotalOrd};

/// The boundary of a convex hull.
///
/// Vertices are listed counter-clockwise starting at the anchor, the lowest (then
/// leftmost) vertex. The anchor is stored once; the closing edge back to it is
/// implicit. Hulls of degenerate point sets have fewer than three vertices: none
/// for the empty set, one for coincident points and two (a segment) for colinear
/// points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hull<T> {
  points: Vec<Point<T, 2>>,
}

///////////////////////////////////////////////////////////////////////////////
// Hull

impl<T> Hull<T> {
  /// The lowest (then leftmost) vertex. `None` for the hull of an empty set.
  pub fn anchor(&self) -> Option<&Point<T, 2>> {
    self.points.first()
  }

  pub fn points(&self) -> &[Point<T, 2>] {
    &self.points
  }

  /// Boundary edges in counter-clockwise order, closing edge included. A two-vertex
  /// hull has a single edge and smaller hulls have none.
  pub fn iter_edges(&self) -> EdgeIter<'_, T> {
    let len = match self.points.len() {
      0 | 1 => 0,
      2 => 1,
      n => n,
    };
    EdgeIter {
      points: &self.points,
      index: 0,
      len,
    }
  }
}

impl<T> Hull<T>
where
  T: PolygonScalar,
{
  /// $O(1)$ Assume that the points form a convex boundary.
  ///
  /// The points have to start at the lowest vertex and run counter-clockwise without
  /// clockwise turns. Only checked, with [`Hull::validate_weakly`], in debug builds.
  pub fn new_unchecked(points: Vec<Point<T, 2>>) -> Hull<T> {
    let hull = Hull { points };
    debug_assert_ok!(hull.validate_weakly());
    hull
  }

  /// $O(n \log n)$ Wrap a strictly convex boundary, such as a previously saved hull.
  pub fn new(points: Vec<Point<T, 2>>) -> Result<Hull<T>, Error> {
    let hull = Hull { points };
    hull.validate()?;
    Ok(hull)
  }

  /// $O(n \log n)$ Check that the hull is strictly convex.
  ///
  /// Vertices must be distinct, start at the lowest vertex and every consecutive
  /// triple must turn counter-clockwise.
  pub fn validate(&self) -> Result<(), Error> {
    self.validate_with(Orientation::is_ccw)
  }

  /// $O(n \log n)$ Like [`Hull::validate`] but colinear vertices on the boundary are
  /// accepted.
  pub fn validate_weakly(&self) -> Result<(), Error> {
    self.validate_with(|turn| !turn.is_cw())
  }

  fn validate_with<F>(&self, turn_ok: F) -> Result<(), Error>
  where
    F: Fn(Orientation) -> bool,
  {
    let pts = &self.points;
    let mut sorted: Vec<&Point<T, 2>> = pts.iter().collect();
    sorted.sort_by(|a, b| a.cmp_lowest(b));
    if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
      return Err(Error::DuplicatePoints);
    }
    let anchor = match pts.first() {
      Some(anchor) => anchor,
      None => return Ok(()),
    };
    if sorted[0].cmp_lowest(anchor) == Ordering::Less {
      return Err(Error::AnchorViolation);
    }
    let n = pts.len();
    if n < 3 {
      return Ok(());
    }
    // The vertices must sweep once around the anchor...
    let mut swept = false;
    for pair in pts[1..].windows(2) {
      match anchor.orientation(&pair[0], &pair[1]) {
        Orientation::ClockWise => return Err(Error::ClockWiseViolation),
        Orientation::CounterClockWise => swept = true,
        Orientation::CoLinear if !turn_ok(Orientation::CoLinear) => {
          return Err(Error::ConvexViolation)
        }
        Orientation::CoLinear => {}
      }
    }
    if !swept {
      return Err(Error::ConvexViolation);
    }
    // ...and turn left at every vertex.
    for i in 0..n {
      let prev = &pts[(i + n - 1) % n];
      let next = &pts[(i + 1) % n];
      if !turn_ok(prev.orientation(&pts[i], next)) {
        return Err(Error::ConvexViolation);
      }
    }
    Ok(())
  }

  /// $O(\log n)$ Locate a point relative to the closed hull polygon.
  ///
  /// Degenerate hulls are closed sets as well: a point lies on a one-vertex hull
  /// when it equals that vertex and on a two-vertex hull when it lies on the segment.
  pub fn locate(&self, pt: &Point<T, 2>) -> PointLocation {
    use Orientation::*;
    let pts = &self.points;
    let n = pts.len();
    match n {
      0 => return PointLocation::Outside,
      1 if &pts[0] == pt => return PointLocation::OnBoundary,
      1 => return PointLocation::Outside,
      2 if on_segment(&pts[0], &pts[1], pt) => return PointLocation::OnBoundary,
      2 => return PointLocation::Outside,
      _ => {}
    }
    let p0 = &pts[0];
    let first_ray = p0.orientation(&pts[1], pt);
    let last_ray = p0.orientation(&pts[n - 1], pt);
    if first_ray == ClockWise || last_ray == CounterClockWise {
      return PointLocation::Outside;
    }
    // Last fan vertex that `pt` is not clockwise of. Vertex 1 always qualifies.
    let lower = pts[1..n - 1].partition_point(|v| p0.orientation(v, pt) != ClockWise);
    match pts[lower].orientation(&pts[lower + 1], pt) {
      ClockWise => PointLocation::Outside,
      CoLinear => PointLocation::OnBoundary,
      CounterClockWise if first_ray == CoLinear || last_ray == CoLinear => {
        PointLocation::OnBoundary
      }
      CounterClockWise => PointLocation::Inside,
    }
  }

  /// $O(n)$ Axis-aligned bounding box as `(min, max)`.
  pub fn bounding_box(&self) -> Option<(Point<T, 2>, Point<T, 2>)> {
    let first = self.points.first()?;
    let mut min = first.clone();
    let mut max = first.clone();
    for pt in &self.points[1..] {
      for axis in 0..2 {
        if pt.array[axis].total_cmp(&min.array[axis]) == Ordering::Less {
          min.array[axis] = pt.array[axis].clone();
        }
        if pt.array[axis].total_cmp(&max.array[axis]) == Ordering::Greater {
          max.array[axis] = pt.array[axis].clone();
        }
      }
    }
    Some((min, max))
  }

  /// Twice the enclosed area, computed in `F`. Zero for degenerate hulls.
  ///
  /// ```rust
  /// # use hullscan::algorithms::convex_hull;
  /// # use hullscan::data::Point;
  /// let square = vec![
  ///   Point::new([0, 0]), Point::new([3, 0]), Point::new([3, 3]), Point::new([0, 3]),
  /// ];
  /// assert_eq!(convex_hull(&square).signed_area_2x::<i64>(), 18);
  /// ```
  pub fn signed_area_2x<F>(&self) -> F
  where
    T: Into<F>,
    F: NumOps<F, F> + Sum + Clone,
  {
    let edges = if self.points.len() < 3 { 0 } else { self.points.len() };
    (0..edges)
      .map(|i| {
        let p = &self.points[i];
        let q = &self.points[(i + 1) % edges];
        let (px, py): (F, F) = (p.x_coord().clone().into(), p.y_coord().clone().into());
        let (qx, qy): (F, F) = (q.x_coord().clone().into(), q.y_coord().clone().into());
        px * qy - qx * py
      })
      .sum()
  }
}

fn on_segment<T: PolygonScalar>(a: &Point<T, 2>, b: &Point<T, 2>, pt: &Point<T, 2>) -> bool {
  let between = |lo: &T, hi: &T, x: &T| {
    let (lo, hi) = (lo.total_min(hi), lo.total_max(hi));
    x.total_cmp(lo) != Ordering::Less && x.total_cmp(hi) != Ordering::Greater
  };
  a.orientation(b, pt).is_colinear()
    && between(a.x_coord(), b.x_coord(), pt.x_coord())
    && between(a.y_coord(), b.y_coord(), pt.y_coord())
}

///////////////////////////////////////////////////////////////////////////////
// Edges

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a, T> {
  pub src: &'a Point<T, 2>,
  pub dst: &'a Point<T, 2>,
}

#[derive(Debug, Clone)]
pub struct EdgeIter<'a, T> {
  points: &'a [Point<T, 2>],
  index: usize,
  len: usize,
}

impl<'a, T> Iterator for EdgeIter<'a, T> {
  type Item = Edge<'a, T>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.index >= self.len {
      return None;
    }
    let src = &self.points[self.index];
    let dst = &self.points[(self.index + 1) % self.points.len()];
    self.index += 1;
    Some(Edge { src, dst })
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let remaining = self.len - self.index;
    (remaining, Some(remaining))
  }
}

impl<'a, T> ExactSizeIterator for EdgeIter<'a, T> {}

///////////////////////////////////////////////////////////////////////////////
// Trait Implementations

impl<T> Deref for Hull<T> {
  type Target = [Point<T, 2>];
  fn deref(&self) -> &Self::Target {
    &self.points
  }
}

impl<T> IntoIterator for Hull<T> {
  type Item = Point<T, 2>;
  type IntoIter = std::vec::IntoIter<Point<T, 2>>;
  fn into_iter(self) -> Self::IntoIter {
    self.points.into_iter()
  }
}

impl<'a, T> IntoIterator for &'a Hull<T> {
  type Item = &'a Point<T, 2>;
  type IntoIter = std::slice::Iter<'a, Point<T, 2>>;
  fn into_iter(self) -> Self::IntoIter {
    self.points.iter()
  }
}

///////////////////////////////////////////////////////////////////////////////
// Tests

#[cfg(test)]
mod tests {
  use super::*;

  use crate::algorithms::convex_hull;
  use crate::testing::*;
  use claims::{assert_err_eq, assert_ok};
  use proptest::prelude::*;

  fn square() -> Hull<i32> {
    Hull::new(vec![
      Point::new([0, 0]),
      Point::new([4, 0]),
      Point::new([4, 4]),
      Point::new([0, 4]),
    ])
    .unwrap()
  }

  #[test]
  fn locate_square() {
    let hull = square();
    assert_eq!(hull.locate(&Point::new([2, 2])), PointLocation::Inside);
    // On a diagonal of the fan, still inside.
    assert_eq!(hull.locate(&Point::new([1, 1])), PointLocation::Inside);
    assert_eq!(hull.locate(&Point::new([0, 0])), PointLocation::OnBoundary);
    assert_eq!(hull.locate(&Point::new([2, 0])), PointLocation::OnBoundary);
    assert_eq!(hull.locate(&Point::new([4, 3])), PointLocation::OnBoundary);
    assert_eq!(hull.locate(&Point::new([0, 1])), PointLocation::OnBoundary);
    assert_eq!(hull.locate(&Point::new([5, 2])), PointLocation::Outside);
    assert_eq!(hull.locate(&Point::new([-1, 0])), PointLocation::Outside);
    assert_eq!(hull.locate(&Point::new([0, -1])), PointLocation::Outside);
    assert_eq!(hull.locate(&Point::new([6, 0])), PointLocation::Outside);
  }

  #[test]
  fn locate_degenerate() {
    let empty: Hull<i32> = Hull::new(vec![]).unwrap();
    assert_eq!(empty.locate(&Point::new([0, 0])), PointLocation::Outside);

    let single = Hull::new(vec![Point::new([5, 5])]).unwrap();
    assert_eq!(single.locate(&Point::new([5, 5])), PointLocation::OnBoundary);
    assert_eq!(single.locate(&Point::new([5, 6])), PointLocation::Outside);

    let segment = Hull::new(vec![Point::new([0, 0]), Point::new([4, 2])]).unwrap();
    assert_eq!(segment.locate(&Point::new([2, 1])), PointLocation::OnBoundary);
    assert_eq!(segment.locate(&Point::new([6, 3])), PointLocation::Outside);
    assert_eq!(segment.locate(&Point::new([2, 2])), PointLocation::Outside);
  }

  #[test]
  fn validate_rejects_bad_boundaries() {
    // Clockwise.
    assert_err_eq!(
      Hull::new(vec![Point::new([0, 0]), Point::new([0, 4]), Point::new([4, 0])]),
      Error::ClockWiseViolation
    );
    // Does not start at the lowest point.
    assert_err_eq!(
      Hull::new(vec![Point::new([4, 0]), Point::new([0, 4]), Point::new([0, 0])]),
      Error::AnchorViolation
    );
    assert_err_eq!(
      Hull::new(vec![Point::new([1, 1]), Point::new([1, 1])]),
      Error::DuplicatePoints
    );
    // A colinear vertex is only accepted by the weak check.
    let pts = vec![
      Point::new([0, 0]),
      Point::new([2, 0]),
      Point::new([4, 0]),
      Point::new([0, 4]),
    ];
    assert_err_eq!(Hull::new(pts.clone()), Error::ConvexViolation);
    assert_ok!(Hull { points: pts }.validate_weakly());
    // A pentagram turns the same way at every vertex but winds twice.
    let star = Hull {
      points: vec![
        Point::new([0, 0]),
        Point::new([4, 6]),
        Point::new([-2, 3]),
        Point::new([6, 3]),
        Point::new([0, 6]),
      ],
    };
    assert!(star.validate_weakly().is_err());
  }

  #[test]
  fn edges_close_the_boundary() {
    let hull = square();
    let edges: Vec<_> = hull.iter_edges().collect();
    assert_eq!(edges.len(), 4);
    assert_eq!(edges[3].src, &Point::new([0, 4]));
    assert_eq!(edges[3].dst, &Point::new([0, 0]));

    let segment = Hull::new(vec![Point::new([0, 0]), Point::new([1, 1])]).unwrap();
    assert_eq!(segment.iter_edges().len(), 1);
  }

  // Needs no predicates, so it works for any coordinate type.
  fn edge_count<T>(hull: &Hull<T>) -> usize {
    hull.iter_edges().count()
  }

  #[test]
  fn edges_of_unordered_scalars() {
    let hull = Hull {
      points: vec![Point::new(["a", "b"]), Point::new(["c", "d"]), Point::new(["e", "f"])],
    };
    assert_eq!(edge_count(&hull), 3);
    assert_eq!(hull.anchor(), Some(&Point::new(["a", "b"])));
    assert_eq!(edge_count(&square()), 4);
  }

  #[test]
  fn area_and_bounds() {
    let hull = square();
    assert_eq!(hull.signed_area_2x::<i64>(), 32);
    assert_eq!(
      hull.bounding_box(),
      Some((Point::new([0, 0]), Point::new([4, 4])))
    );
    assert_eq!(hull.anchor(), Some(&Point::new([0, 0])));
  }

  proptest! {
    #[test]
    fn locate_matches_membership(pts in small_grid_set(), query in small_grid_point()) {
      let hull = convex_hull(&pts);
      if pts.contains(&query) {
        prop_assert_ne!(hull.locate(&query), PointLocation::Outside);
      }
      if hull.contains(&query) {
        prop_assert_eq!(hull.locate(&query), PointLocation::OnBoundary);
      }
    }

    #[test]
    fn locate_agrees_with_linear_scan(pts in small_grid_set(), query in small_grid_point()) {
      let hull = convex_hull(&pts);
      if hull.len() >= 3 {
        let turns: Vec<Orientation> = hull
          .iter_edges()
          .map(|edge| edge.src.orientation(edge.dst, &query))
          .collect();
        let expected = if turns.iter().any(|t| t.is_cw()) {
          PointLocation::Outside
        } else if turns.iter().any(|t| t.is_colinear()) {
          PointLocation::OnBoundary
        } else {
          PointLocation::Inside
        };
        prop_assert_eq!(hull.locate(&query), expected);
      }
    }
  }
}
