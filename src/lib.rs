// #![deny(warnings)]
#![deny(clippy::cast_lossless)]
#![doc(test(no_crate_inject))]
//! Exact convex hulls of planar point sets.
//!
//! The heart of the crate is [`algorithms::convex_hull`], a Graham scan that turns a
//! slice of points into a counter-clockwise [`Hull`](data::Hull). Every geometric
//! decision (the angular sort around the anchor, the distance tie-break and the turn
//! test of the scan) goes through the exact predicates of [`PolygonScalar`], so the
//! same answer is produced for `i32`, `BigRational` or `f64` coordinates and no
//! epsilon needs tuning.
//!
//! ```rust
//! use hullscan::algorithms::convex_hull;
//! use hullscan::data::Point;
//!
//! let pts = vec![
//!   Point::new([0, 0]),
//!   Point::new([1, 1]),
//!   Point::new([0, 2]),
//!   Point::new([2, 1]),
//! ];
//! let hull = convex_hull(&pts);
//! assert_eq!(
//!   hull.points(),
//!   &[Point::new([0, 0]), Point::new([2, 1]), Point::new([0, 2])]
//! );
//! ```
//!
//! Loading and saving point files lives in [`io`], plotting in [`render`].
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::float::FloatCore;
use ordered_float::{NotNan, OrderedFloat};
use std::cmp::Ordering;

pub mod algorithms;
pub mod data;
pub mod io;
mod orientation;
pub mod render;

pub use orientation::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  InsufficientVertices,
  DuplicatePoints,
  /// Two consecutive edges are either colinear or oriented clockwise.
  ConvexViolation,
  ClockWiseViolation,
  /// The first vertex is not the lowest (then leftmost) vertex.
  AnchorViolation,
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    match self {
      Error::InsufficientVertices => write!(f, "Insufficient vertices"),
      Error::DuplicatePoints => write!(f, "Duplicate points"),
      Error::ConvexViolation => write!(f, "Convex violation"),
      Error::ClockWiseViolation => write!(f, "Clockwise violation"),
      Error::AnchorViolation => write!(f, "Hull does not start at its lowest point"),
    }
  }
}

impl std::error::Error for Error {}

pub trait TotalOrd {
  fn total_cmp(&self, other: &Self) -> Ordering;

  fn total_min(self, other: Self) -> Self
  where
    Self: Sized,
  {
    std::cmp::min_by(self, other, TotalOrd::total_cmp)
  }

  fn total_max(self, other: Self) -> Self
  where
    Self: Sized,
  {
    std::cmp::max_by(self, other, TotalOrd::total_cmp)
  }
}

impl<A: TotalOrd> TotalOrd for &A {
  fn total_cmp(&self, other: &Self) -> Ordering {
    TotalOrd::total_cmp(*self, *other)
  }
}

impl<A: TotalOrd, B: TotalOrd> TotalOrd for (A, B) {
  fn total_cmp(&self, other: &Self) -> Ordering {
    TotalOrd::total_cmp(&self.0, &other.0).then_with(|| TotalOrd::total_cmp(&self.1, &other.1))
  }
}

/// Coordinate types the hull algorithms can work with.
///
/// Both predicates must be exact. The Graham scan uses `cmp_slope` for its angular
/// sort and for its turn test, and an inexact implementation could make the two
/// disagree about whether three points are colinear.
pub trait PolygonScalar: std::fmt::Debug + Clone + PartialEq + PartialOrd + TotalOrd {
  /// Compare the squared distances `|pq|²` and `|pr|²`.
  fn cmp_dist(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering;

  /// Sign of the cross product `(q - p) × (r - p)`, as an ordering against zero.
  ///
  /// `Greater` means `p`, `q`, `r` turn counter-clockwise.
  fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering;
}

// Product of two sign-magnitude numbers compared against another such product.
fn cmp_signed_products<U: Ord>(lhs: (U, bool), rhs: (U, bool)) -> Ordering {
  match (lhs.1, rhs.1) {
    (false, true) => Ordering::Greater,
    (true, false) => Ordering::Less,
    (false, false) => lhs.0.cmp(&rhs.0),
    (true, true) => rhs.0.cmp(&lhs.0),
  }
}

// Fixed precision integers widen every difference to an unsigned type twice their
// size. Differences, products and sums of two squares never overflow that way.
macro_rules! fixed_precision {
  ( $ty:ty, $ulong:ty ) => {
    impl TotalOrd for $ty {
      fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
      }
    }

    impl PolygonScalar for $ty {
      fn cmp_dist(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
        fn dist_squared(a: &[$ty; 2], b: &[$ty; 2]) -> ($ulong, bool) {
          let dx = <$ulong>::from(a[0].abs_diff(b[0]));
          let dy = <$ulong>::from(a[1].abs_diff(b[1]));
          (dx * dx).overflowing_add(dy * dy)
        }
        let (pq, pq_overflow) = dist_squared(p, q);
        let (pr, pr_overflow) = dist_squared(p, r);
        // An overflowing sum lies in [2^k, 2^(k+1)), so wrapped values still
        // compare correctly when both sides overflow.
        pq_overflow
          .cmp(&pr_overflow)
          .then_with(|| pq.cmp(&pr))
      }

      fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
        // (magnitude, is_negative) of a - b.
        fn diff(a: $ty, b: $ty) -> ($ulong, bool) {
          (<$ulong>::from(a.abs_diff(b)), a < b)
        }
        fn mul(a: ($ulong, bool), b: ($ulong, bool)) -> ($ulong, bool) {
          let magnitude = a.0 * b.0;
          (magnitude, magnitude != 0 && (a.1 ^ b.1))
        }
        let ux = diff(q[0], p[0]);
        let uy = diff(q[1], p[1]);
        let vx = diff(r[0], p[0]);
        let vy = diff(r[1], p[1]);
        cmp_signed_products(mul(ux, vy), mul(uy, vx))
      }
    }
  };
}

macro_rules! arbitrary_precision {
  ( $( $ty:ty ),* ) => {
    $(
      impl TotalOrd for $ty {
        fn total_cmp(&self, other: &Self) -> Ordering {
          self.cmp(other)
        }
      }

      impl PolygonScalar for $ty {
        fn cmp_dist(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
          let pq_x = &p[0] - &q[0];
          let pq_y = &p[1] - &q[1];
          let pq_dist_squared: Self = &pq_x * &pq_x + &pq_y * &pq_y;
          let pr_x = &p[0] - &r[0];
          let pr_y = &p[1] - &r[1];
          let pr_dist_squared: Self = &pr_x * &pr_x + &pr_y * &pr_y;
          pq_dist_squared.cmp(&pr_dist_squared)
        }

        fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
          let lhs = (&q[0] - &p[0]) * (&r[1] - &p[1]);
          let rhs = (&q[1] - &p[1]) * (&r[0] - &p[0]);
          lhs.cmp(&rhs)
        }
      }
    )*
  };
}

/// Floating point scalars that can be widened to `f64` without rounding.
trait ExactF64 {
  fn exact_f64(&self) -> f64;
}

impl ExactF64 for f64 {
  fn exact_f64(&self) -> f64 {
    *self
  }
}

impl ExactF64 for f32 {
  fn exact_f64(&self) -> f64 {
    f64::from(*self)
  }
}

impl<F: ExactF64 + FloatCore> ExactF64 for OrderedFloat<F> {
  fn exact_f64(&self) -> f64 {
    self.0.exact_f64()
  }
}

impl<F: ExactF64 + FloatCore> ExactF64 for NotNan<F> {
  fn exact_f64(&self) -> f64 {
    self.into_inner().exact_f64()
  }
}

fn float_to_rational(pt: &[impl ExactF64; 2]) -> Option<[BigRational; 2]> {
  Some([
    BigRational::from_float(pt[0].exact_f64())?,
    BigRational::from_float(pt[1].exact_f64())?,
  ])
}

// Distances are compared after an exact conversion to rationals. NaN and infinite
// coordinates have no rational value and compare as equal.
fn float_cmp_dist<F: ExactF64>(p: &[F; 2], q: &[F; 2], r: &[F; 2]) -> Ordering {
  match (float_to_rational(p), float_to_rational(q), float_to_rational(r)) {
    (Some(p), Some(q), Some(r)) => BigRational::cmp_dist(&p, &q, &r),
    _ => Ordering::Equal,
  }
}

// `orient2d` is exact only while none of its intermediate products underflow or
// overflow. Coordinates outside 2^-300..2^300 take the exact rational path.
fn orient2d_in_range(c: f64) -> bool {
  let c = c.abs();
  c == 0.0 || (f64::powi(2.0, -300)..=f64::powi(2.0, 300)).contains(&c)
}

fn float_cmp_slope<F: ExactF64>(p: &[F; 2], q: &[F; 2], r: &[F; 2]) -> Ordering {
  let [p, q, r] = [p, q, r].map(|pt| [pt[0].exact_f64(), pt[1].exact_f64()]);
  if [p, q, r].iter().flatten().all(|&c| orient2d_in_range(c)) {
    let orient = geometry_predicates::predicates::orient2d(p, q, r);
    return orient.partial_cmp(&0.0).unwrap_or(Ordering::Equal);
  }
  // NaN and infinite coordinates have no orientation.
  match (float_to_rational(&p), float_to_rational(&q), float_to_rational(&r)) {
    (Some(p), Some(q), Some(r)) => BigRational::cmp_slope(&p, &q, &r),
    _ => Ordering::Equal,
  }
}

macro_rules! wrapped_floating_precision {
  ( $( $ty:ty ),* ) => {
    $(
      impl TotalOrd for $ty {
        fn total_cmp(&self, other: &Self) -> Ordering {
          self.cmp(other)
        }
      }

      impl PolygonScalar for $ty {
        fn cmp_dist(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
          float_cmp_dist(p, q, r)
        }

        fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
          float_cmp_slope(p, q, r)
        }
      }
    )*
  };
}

macro_rules! floating_precision {
  ( $( $ty:ty ),* ) => {
    $(
      // -0.0 and 0.0 are the same coordinate. NaN falls back to the IEEE total order.
      impl TotalOrd for $ty {
        fn total_cmp(&self, other: &Self) -> Ordering {
          self
            .partial_cmp(other)
            .unwrap_or_else(|| <$ty>::total_cmp(self, other))
        }
      }

      impl PolygonScalar for $ty {
        fn cmp_dist(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
          float_cmp_dist(p, q, r)
        }

        fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
          float_cmp_slope(p, q, r)
        }
      }
    )*
  };
}

fixed_precision!(i8, u16);
fixed_precision!(i16, u32);
fixed_precision!(i32, u64);
fixed_precision!(i64, u128);
arbitrary_precision!(BigInt, BigRational);
wrapped_floating_precision!(OrderedFloat<f32>, OrderedFloat<f64>, NotNan<f32>, NotNan<f64>);
floating_precision!(f32, f64);

#[cfg(test)]
pub mod testing;
