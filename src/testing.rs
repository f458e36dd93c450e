// Strategies for points and point sets.
use crate::data::Point;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Float;
use ordered_float::NotNan;
use proptest::arbitrary::*;
use proptest::collection::*;
use proptest::prelude::*;
use proptest::strategy::*;
use std::convert::TryInto;

type Mapped<I, O> = Map<StrategyFor<I>, fn(_: I) -> O>;

///////////////////////////////////////////////////////////////////////////////
// Arbitrary point

impl<T: Arbitrary, const N: usize> Arbitrary for Point<T, N>
where
  T::Strategy: Clone,
  T::Parameters: Clone,
  T: Clone + std::fmt::Debug,
{
  type Strategy = Mapped<Vec<T>, Point<T, N>>;
  type Parameters = T::Parameters;
  fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
    vec(any_with::<T>(params), N).prop_map(|vec: Vec<T>| Point {
      array: vec.try_into().unwrap(),
    })
  }
}

///////////////////////////////////////////////////////////////////////////////
// Convenience functions

pub fn any_8() -> impl Strategy<Value = Point<i8, 2>> {
  any::<Point<i8, 2>>()
}

pub fn any_64() -> impl Strategy<Value = Point<i64, 2>> {
  any::<Point<i64, 2>>()
}

// Arbitrary isn't defined for NotNan.
pub fn any_nn() -> impl Strategy<Value = Point<NotNan<f64>, 2>> {
  any::<Point<f64, 2>>().prop_filter_map("Check for NaN", |pt| pt.cast(rem_float).try_into().ok())
}

// Arbitrary isn't defined for BigInt.
pub fn any_r() -> impl Strategy<Value = Point<BigInt, 2>> {
  any::<Point<i64, 2>>().prop_map(|pt| pt.cast(BigInt::from))
}

pub fn any_rational() -> impl Strategy<Value = Point<BigRational, 2>> {
  any::<Point<f64, 2>>()
    .prop_filter_map("Check for NaN", |pt| {
      Some(Point::new([
        BigRational::from_float(rem_float(pt.array[0]))?,
        BigRational::from_float(rem_float(pt.array[1]))?,
      ]))
    })
}

// Float representation: mantissa * 2^exponent * sign
// This function changes the exponent modulo 250. This rules out extreme
// numbers (very large, very small, very close to zero). Such extremes
// are likely to overflow since the arbitrary precision machinery we're
// using cannot compute answers with an exponent larger than 1024.
pub fn rem_float(f: f64) -> f64 {
  let (mantissa, exponent, sign) = Float::integer_decode(f);
  ((mantissa as f64) * 2f64.powi(i32::from(exponent) % 250)).copysign(f64::from(sign))
}

///////////////////////////////////////////////////////////////////////////////
// Point sets

// Small coordinates make colinear triples, duplicates and degenerate sets common.
pub fn small_grid_point() -> impl Strategy<Value = Point<i32, 2>> {
  (-8i32..=8, -8i32..=8).prop_map(|(x, y)| Point::new([x, y]))
}

pub fn small_grid_set() -> impl Strategy<Value = Vec<Point<i32, 2>>> {
  vec(small_grid_point(), 0..40)
}

pub fn float_set() -> impl Strategy<Value = Vec<Point<f64, 2>>> {
  vec(
    (-1e6f64..1e6, -1e6f64..1e6).prop_map(|(x, y)| Point::new([x, y])),
    0..100,
  )
}

// `rem_float` scaled by a power of two. Covers exponents from about -950 to 1000,
// where plain f64 cross products underflow or overflow.
pub fn any_wide_f64() -> impl Strategy<Value = f64> {
  (any::<f64>(), -700i32..=700).prop_map(|(f, e)| rem_float(f) * 2f64.powi(e))
}

pub fn wide_float_set() -> impl Strategy<Value = Vec<Point<f64, 2>>> {
  vec(
    (any_wide_f64(), any_wide_f64()).prop_map(|(x, y)| Point::new([x, y])),
    0..60,
  )
}

// A grid set and a power of two to scale it by. Scaling by 2^e is exact for
// every grid coordinate.
pub fn scaled_grid_set() -> impl Strategy<Value = (Vec<Point<i32, 2>>, f64)> {
  (small_grid_set(), -1000i32..=1000).prop_map(|(pts, e)| (pts, 2f64.powi(e)))
}

pub fn big_set() -> impl Strategy<Value = Vec<Point<BigInt, 2>>> {
  vec(any_r(), 0..60)
}
