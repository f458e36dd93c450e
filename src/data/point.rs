use array_init::array_init;
use ordered_float::{FloatIsNan, NotNan};
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::ops::Deref;
use std::ops::Index;

use crate::{Orientation, PolygonScalar, TotalOrd};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Point<T, const N: usize> {
  pub array: [T; N],
}

// Random sampling.
impl<T, const N: usize> Distribution<Point<T, N>> for Standard
where
  Standard: Distribution<T>,
{
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point<T, N> {
    Point {
      array: array_init(|_| rng.gen()),
    }
  }
}

// Methods on N-dimensional points.
impl<T, const N: usize> Point<T, N> {
  pub const fn new(array: [T; N]) -> Point<T, N> {
    Point { array }
  }

  pub fn cast<U, F>(&self, f: F) -> Point<U, N>
  where
    T: Clone,
    F: Fn(T) -> U,
  {
    Point {
      array: array_init(|i| f(self.array[i].clone())),
    }
  }
}

impl<T, const N: usize> Index<usize> for Point<T, N> {
  type Output = T;
  fn index(&self, key: usize) -> &T {
    self.array.index(key)
  }
}

impl<T, const N: usize> Deref for Point<T, N> {
  type Target = [T; N];
  fn deref(&self) -> &[T; N] {
    &self.array
  }
}

impl<T> From<(T, T)> for Point<T, 2> {
  fn from(point: (T, T)) -> Point<T, 2> {
    Point {
      array: [point.0, point.1],
    }
  }
}

impl<const N: usize> TryFrom<Point<f64, N>> for Point<NotNan<f64>, N> {
  type Error = FloatIsNan;
  fn try_from(point: Point<f64, N>) -> Result<Point<NotNan<f64>, N>, FloatIsNan> {
    Ok(Point {
      array: array_init::try_array_init(|i| NotNan::new(point.array[i]))?,
    })
  }
}

// Methods on two-dimensional points.
impl<T> Point<T, 2> {
  pub fn x_coord(&self) -> &T {
    &self.array[0]
  }

  pub fn y_coord(&self) -> &T {
    &self.array[1]
  }

  pub fn orientation(&self, q: &Point<T, 2>, r: &Point<T, 2>) -> Orientation
  where
    T: PolygonScalar,
  {
    Orientation::new(&self.array, &q.array, &r.array)
  }

  /// Compare the distances from `self` to `p` and to `q`. Exact for every scalar.
  pub fn cmp_distance_to(&self, p: &Point<T, 2>, q: &Point<T, 2>) -> Ordering
  where
    T: PolygonScalar,
  {
    T::cmp_dist(&self.array, &p.array, &q.array)
  }

  /// Compare `p` and `q` by their polar angle around `self`.
  ///
  /// Only the sign of the cross product `(p - self) × (q - self)` is used, so no
  /// angle is ever computed. The result is a consistent ordering when every point
  /// lies at an angle in `[0, π)` around `self`, which holds when `self` is the
  /// lowest (then leftmost) point of the set. Points on a common ray compare as
  /// `Equal`.
  ///
  /// ```rust
  /// # use hullscan::data::Point;
  /// # use std::cmp::Ordering;
  /// let anchor = Point::new([0, 0]);
  /// assert_eq!(anchor.cmp_polar_angle(&Point::new([5, 1]), &Point::new([1, 1])), Ordering::Less);
  /// assert_eq!(anchor.cmp_polar_angle(&Point::new([2, 2]), &Point::new([1, 1])), Ordering::Equal);
  /// ```
  pub fn cmp_polar_angle(&self, p: &Point<T, 2>, q: &Point<T, 2>) -> Ordering
  where
    T: PolygonScalar,
  {
    self.orientation(p, q).as_angular_ordering()
  }

  /// Lowest y-coordinate first, ties broken by the lowest x-coordinate.
  pub fn cmp_lowest(&self, other: &Point<T, 2>) -> Ordering
  where
    T: TotalOrd,
  {
    (self.y_coord(), self.x_coord()).total_cmp(&(other.y_coord(), other.x_coord()))
  }
}
