use std::iter::FromIterator;
use std::ops::Deref;

use crate::algorithms::convex_hull::graham_scan::convex_hull;
use crate::data::{Hull, Point};
use crate::PolygonScalar;

/// An immutable collection of points.
///
/// Order and multiplicity are kept as given but neither affects the hull. Adding
/// points produces a new set; nothing caches a hull that could go stale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PointSet<T> {
  points: Vec<Point<T, 2>>,
}

impl<T> PointSet<T> {
  pub fn new(points: Vec<Point<T, 2>>) -> PointSet<T> {
    PointSet { points }
  }

  /// $O(n + m)$ A new set holding these points followed by `extra`.
  ///
  /// ```rust
  /// # use hullscan::data::{Point, PointSet};
  /// let set = PointSet::new(vec![Point::new([0, 0])]);
  /// let bigger = set.with_points(vec![Point::new([1, 0]), Point::new([0, 1])]);
  /// assert_eq!(set.len(), 1);
  /// assert_eq!(bigger.len(), 3);
  /// ```
  #[must_use]
  pub fn with_points<I>(&self, extra: I) -> PointSet<T>
  where
    T: Clone,
    I: IntoIterator<Item = Point<T, 2>>,
  {
    self.points.iter().cloned().chain(extra).collect()
  }

  pub fn points(&self) -> &[Point<T, 2>] {
    &self.points
  }

  pub fn into_vec(self) -> Vec<Point<T, 2>> {
    self.points
  }

  /// $O(n \log n)$ Convex hull of the set, see [`convex_hull`].
  pub fn convex_hull(&self) -> Hull<T>
  where
    T: PolygonScalar,
  {
    convex_hull(&self.points)
  }
}

impl<T> Default for PointSet<T> {
  fn default() -> Self {
    PointSet { points: Vec::new() }
  }
}

impl<T> Deref for PointSet<T> {
  type Target = [Point<T, 2>];
  fn deref(&self) -> &Self::Target {
    &self.points
  }
}

impl<T> From<Vec<Point<T, 2>>> for PointSet<T> {
  fn from(points: Vec<Point<T, 2>>) -> PointSet<T> {
    PointSet::new(points)
  }
}

impl<T> FromIterator<Point<T, 2>> for PointSet<T> {
  fn from_iter<I: IntoIterator<Item = Point<T, 2>>>(iter: I) -> Self {
    PointSet::new(iter.into_iter().collect())
  }
}

impl<T> IntoIterator for PointSet<T> {
  type Item = Point<T, 2>;
  type IntoIter = std::vec::IntoIter<Point<T, 2>>;
  fn into_iter(self) -> Self::IntoIter {
    self.points.into_iter()
  }
}

impl<'a, T> IntoIterator for &'a PointSet<T> {
  type Item = &'a Point<T, 2>;
  type IntoIter = std::slice::Iter<'a, Point<T, 2>>;
  fn into_iter(self) -> Self::IntoIter {
    self.points.iter()
  }
}
