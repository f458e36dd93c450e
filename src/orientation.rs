use std::cmp::Ordering;

use crate::PolygonScalar;

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
pub enum Orientation {
  CounterClockWise,
  ClockWise,
  CoLinear,
}

impl Orientation {
  /// Determine the direction you have to turn if you walk from `p1`
  /// to `p2` to `p3`.
  ///
  /// For fixed-precision types (i8,i16,i32,i64), this function is
  /// guaranteed to work for any input and never cause any arithmetic overflows.
  /// Floating point input is evaluated exactly as well.
  ///
  /// # Examples
  ///
  /// ```rust
  /// # use hullscan::data::Point;
  /// # use hullscan::Orientation;
  /// let p1 = Point::new([ 0, 0 ]);
  /// let p2 = Point::new([ 0, 1 ]); // One unit above p1.
  /// // (0,0) -> (0,1) -> (0,2) == Orientation::CoLinear
  /// assert!(Orientation::new(&p1, &p2, &Point::new([ 0, 2 ])).is_colinear());
  /// // (0,0) -> (0,1) -> (-1,2) == Orientation::CounterClockWise
  /// assert!(Orientation::new(&p1, &p2, &Point::new([ -1, 2 ])).is_ccw());
  /// // (0,0) -> (0,1) -> (1,2) == Orientation::ClockWise
  /// assert!(Orientation::new(&p1, &p2, &Point::new([ 1, 2 ])).is_cw());
  /// ```
  pub fn new<T>(p1: &[T; 2], p2: &[T; 2], p3: &[T; 2]) -> Orientation
  where
    T: PolygonScalar,
  {
    match T::cmp_slope(p1, p2, p3) {
      Ordering::Less => Orientation::ClockWise,
      Ordering::Equal => Orientation::CoLinear,
      Ordering::Greater => Orientation::CounterClockWise,
    }
  }

  pub fn is_colinear(self) -> bool {
    matches!(self, Orientation::CoLinear)
  }

  pub fn is_ccw(self) -> bool {
    matches!(self, Orientation::CounterClockWise)
  }

  pub fn is_cw(self) -> bool {
    matches!(self, Orientation::ClockWise)
  }

  /// Angular order implied by a turn around a common pivot: a counter-clockwise
  /// turn from `p` to `q` puts `p` first.
  pub fn as_angular_ordering(self) -> Ordering {
    match self {
      Orientation::CounterClockWise => Ordering::Less,
      Orientation::ClockWise => Ordering::Greater,
      Orientation::CoLinear => Ordering::Equal,
    }
  }
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;

  use crate::data::Point;
  use num_bigint::BigInt;
  use proptest::prelude::*;
  use test_strategy::proptest;

  #[test]
  fn orientation_limit_1() {
    assert_eq!(
      Orientation::new(&[i8::MAX, i8::MAX], &[i8::MIN, i8::MIN], &[i8::MIN, i8::MIN]),
      Orientation::CoLinear
    );
  }

  #[test]
  fn cmp_slope_1() {
    assert_eq!(
      PolygonScalar::cmp_slope(&[0i8, 0], &[1, 1], &[2, 2],),
      Ordering::Equal
    );
  }

  #[test]
  fn cmp_slope_2() {
    assert_eq!(
      Orientation::new(&[0i8, 0], &[0, 1], &[2, 2],),
      Orientation::ClockWise
    );
  }

  #[proptest]
  fn orientation_reverse(a: [i64; 2], b: [i64; 2], c: [i64; 2]) {
    let abc = Orientation::new(&a, &b, &c);
    let cba = Orientation::new(&c, &b, &a);
    prop_assert_eq!(abc.as_angular_ordering(), cba.as_angular_ordering().reverse())
  }

  #[proptest]
  fn orientation_rotate(a: [i16; 2], b: [i16; 2], c: [i16; 2]) {
    prop_assert_eq!(Orientation::new(&a, &b, &c), Orientation::new(&b, &c, &a))
  }

  #[proptest]
  fn bigint_colinear(a: [i32; 2], b: [i32; 2]) {
    let pt1 = Point::new(a).cast(BigInt::from);
    let pt2 = Point::new(b).cast(BigInt::from);
    let pt3 = Point::new([
      &pt2.array[0] * 2 - &pt1.array[0],
      &pt2.array[1] * 2 - &pt1.array[1],
    ]);
    prop_assert!(Orientation::new(&pt1, &pt2, &pt3).is_colinear())
  }
}
