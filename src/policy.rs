//! Strategies that tell an [`Octree`](crate::Octree) where its elements are and how far away they
//! are from a query point.
//!
//! Both are passed to the tree as values, the same way a `HashMap` receives its `BuildHasher`.
//! Stateless policies are unit structs implementing `Default`.

use crate::bounding_box::BoundingBox;
use crate::coordinate::Coordinate;
use num_traits::{Float, Zero};

/// Maps a stored element to the region it occupies.
///
/// The box is computed once when the element is inserted.
pub trait Bounds<T> {
    type Coord: Coordinate;

    fn bounding_box(&self, element: &T) -> BoundingBox<Self::Coord>;
}

/// Stores coordinates as themselves: every element is the degenerate box `[p, p]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointBounds;

impl<C: Coordinate> Bounds<C> for PointBounds {
    type Coord = C;

    #[inline]
    fn bounding_box(&self, element: &C) -> BoundingBox<C> {
        BoundingBox::point(*element)
    }
}

/// Stores axis aligned boxes as themselves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoxBounds;

impl<C: Coordinate> Bounds<BoundingBox<C>> for BoxBounds {
    type Coord = C;

    #[inline]
    fn bounding_box(&self, element: &BoundingBox<C>) -> BoundingBox<C> {
        *element
    }
}

/// Distance between stored elements and query points.
///
/// `distance_to_region` is used to skip whole subtrees during nearest neighbour searches. It must
/// never exceed `distance(element, point)` for an element whose bounding box lies inside `region`,
/// otherwise the search can miss the true nearest element.
pub trait Metric<T, C: Coordinate> {
    type Distance: PartialOrd + Copy;

    fn distance(&self, element: &T, point: &C) -> Self::Distance;

    fn distance_to_region(&self, region: &BoundingBox<C>, point: &C) -> Self::Distance;
}

/// Straight line distance for floating point coordinates.
///
/// Boxes are measured from the query point to their closest point, so a point inside a box is at
/// distance zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Euclidean;

/// Squared straight line distance.
///
/// Avoids the square root and works for integer coordinates. Unsigned components are subtracted
/// without wrapping.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SquaredEuclidean;

/// Sum of the squared per-axis differences of `a` and `b`.
#[must_use]
pub fn squared_distance<C: Coordinate>(a: &C, b: &C) -> C::Scalar {
    (0..3).fold(<C::Scalar as Zero>::zero(), |sum, axis| {
        let (p, q) = (a.axis(axis), b.axis(axis));
        let delta = if p > q { p - q } else { q - p };
        sum + delta * delta
    })
}

impl<C> Metric<C, C> for Euclidean
where
    C: Coordinate,
    C::Scalar: Float,
{
    type Distance = C::Scalar;

    #[inline]
    fn distance(&self, element: &C, point: &C) -> C::Scalar {
        squared_distance(element, point).sqrt()
    }

    #[inline]
    fn distance_to_region(&self, region: &BoundingBox<C>, point: &C) -> C::Scalar {
        squared_distance(&region.clamp(point), point).sqrt()
    }
}

impl<C> Metric<BoundingBox<C>, C> for Euclidean
where
    C: Coordinate,
    C::Scalar: Float,
{
    type Distance = C::Scalar;

    #[inline]
    fn distance(&self, element: &BoundingBox<C>, point: &C) -> C::Scalar {
        squared_distance(&element.clamp(point), point).sqrt()
    }

    #[inline]
    fn distance_to_region(&self, region: &BoundingBox<C>, point: &C) -> C::Scalar {
        squared_distance(&region.clamp(point), point).sqrt()
    }
}

impl<C: Coordinate> Metric<C, C> for SquaredEuclidean {
    type Distance = C::Scalar;

    #[inline]
    fn distance(&self, element: &C, point: &C) -> C::Scalar {
        squared_distance(element, point)
    }

    #[inline]
    fn distance_to_region(&self, region: &BoundingBox<C>, point: &C) -> C::Scalar {
        squared_distance(&region.clamp(point), point)
    }
}

impl<C: Coordinate> Metric<BoundingBox<C>, C> for SquaredEuclidean {
    type Distance = C::Scalar;

    #[inline]
    fn distance(&self, element: &BoundingBox<C>, point: &C) -> C::Scalar {
        squared_distance(&element.clamp(point), point)
    }

    #[inline]
    fn distance_to_region(&self, region: &BoundingBox<C>, point: &C) -> C::Scalar {
        squared_distance(&region.clamp(point), point)
    }
}
