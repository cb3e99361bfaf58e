//! Axis aligned bounding boxes over any [`Coordinate`].

use crate::coordinate::{partial_max, partial_min, Coordinate, Scalar};

#[cfg(feature = "serde-1")]
use serde::{Deserialize, Serialize};

/// An axis aligned region spanned by two opposite corners.
///
/// A box is well formed when every component of `bottom_front_left` is less than or equal to the
/// same component of `top_back_right`. [`BoundingBox::new`] always produces a well formed box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(Serialize, Deserialize))]
pub struct BoundingBox<C> {
    pub bottom_front_left: C,
    pub top_back_right: C,
}

impl<C: Coordinate> BoundingBox<C> {
    /// Creates the smallest box containing both `a` and `b`.
    #[must_use]
    pub fn new(a: C, b: C) -> Self {
        Self {
            bottom_front_left: C::from_fn(|axis| partial_min(a.axis(axis), b.axis(axis))),
            top_back_right: C::from_fn(|axis| partial_max(a.axis(axis), b.axis(axis))),
        }
    }

    /// The degenerate box holding only `point`.
    #[inline]
    #[must_use]
    pub fn point(point: C) -> Self {
        Self {
            bottom_front_left: point,
            top_back_right: point,
        }
    }

    #[inline]
    fn axis_range(&self, axis: usize) -> (C::Scalar, C::Scalar) {
        (
            self.bottom_front_left.axis(axis),
            self.top_back_right.axis(axis),
        )
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, point: &C) -> bool {
        (0..3).all(|axis| {
            let (min, max) = self.axis_range(axis);
            let value = point.axis(axis);
            min <= value && value <= max
        })
    }

    /// Two boxes overlap unless one lies strictly to one side of the other on some axis.
    ///
    /// Shared faces, edges and corners count as overlapping.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..3).all(|axis| {
            let (a_min, a_max) = self.axis_range(axis);
            let (b_min, b_max) = other.axis_range(axis);
            a_min <= b_max && b_min <= a_max
        })
    }

    /// Corner `index` takes the upper value on axis `k` when bit `k` of `index` is set.
    ///
    /// # Panics
    ///
    /// If `index` is not below 8.
    #[must_use]
    pub fn corner(&self, index: usize) -> C {
        assert!(index < 8, "a box has 8 corners, got corner {}", index);
        C::from_fn(|axis| {
            let (min, max) = self.axis_range(axis);
            if index & (1 << axis) == 0 {
                min
            } else {
                max
            }
        })
    }

    #[must_use]
    pub fn corners(&self) -> [C; 8] {
        [0, 1, 2, 3, 4, 5, 6, 7].map(|index| self.corner(index))
    }

    #[inline]
    #[must_use]
    pub fn midpoint(&self) -> C {
        C::from_fn(|axis| {
            let (min, max) = self.axis_range(axis);
            <C::Scalar as Scalar>::midpoint(min, max)
        })
    }

    /// Splits the box at `midpoint` into its eight octants.
    ///
    /// Bit 0 of the octant index selects the upper x half, bit 1 the upper y half and bit 2 the
    /// upper z half.
    #[must_use]
    pub fn subdivide(&self, midpoint: &C) -> [Self; 8] {
        [0, 1, 2, 3, 4, 5, 6, 7].map(|octant| self.octant(octant, midpoint))
    }

    fn octant(&self, octant: usize, midpoint: &C) -> Self {
        let upper = |axis: usize| octant & (1 << axis) != 0;
        Self {
            bottom_front_left: C::from_fn(|axis| {
                if upper(axis) {
                    midpoint.axis(axis)
                } else {
                    self.bottom_front_left.axis(axis)
                }
            }),
            top_back_right: C::from_fn(|axis| {
                if upper(axis) {
                    self.top_back_right.axis(axis)
                } else {
                    midpoint.axis(axis)
                }
            }),
        }
    }

    /// The smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            bottom_front_left: C::from_fn(|axis| {
                partial_min(
                    self.bottom_front_left.axis(axis),
                    other.bottom_front_left.axis(axis),
                )
            }),
            top_back_right: C::from_fn(|axis| {
                partial_max(
                    self.top_back_right.axis(axis),
                    other.top_back_right.axis(axis),
                )
            }),
        }
    }

    /// The point of the box closest to `point`.
    #[must_use]
    pub fn clamp(&self, point: &C) -> C {
        C::from_fn(|axis| {
            let (min, max) = self.axis_range(axis);
            partial_min(partial_max(point.axis(axis), min), max)
        })
    }
}
