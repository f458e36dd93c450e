mod hull;
pub(crate) mod point;
mod point_set;

pub use hull::{Edge, EdgeIter, Hull};
pub use point::Point;
pub use point_set::PointSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PointLocation {
  Inside,
  OnBoundary,
  Outside,
}
