//! Abstractions over the point types the octree can be keyed by.

use nalgebra::{Point3, Vector3};
use num_traits::Num;

/// A numeric component of a [`Coordinate`].
///
/// The octree only ever compares, subtracts and multiplies scalars, and splits ranges at their
/// midpoint. The midpoint has to be computed without overflowing for integer types.
pub trait Scalar: Num + Copy + PartialOrd {
    /// The midpoint of `a` and `b`, rounded towards negative infinity for integers.
    fn midpoint(a: Self, b: Self) -> Self;
}

macro_rules! impl_scalar_int {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn midpoint(a: Self, b: Self) -> Self {
                    (a >> 1) + (b >> 1) + (a & b & 1)
                }
            }
        )*
    };
}

macro_rules! impl_scalar_float {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn midpoint(a: Self, b: Self) -> Self {
                    a * 0.5 + b * 0.5
                }
            }
        )*
    };
}

impl_scalar_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_scalar_float!(f32, f64);

/// A three dimensional position with totally ordered components.
///
/// Implemented for `nalgebra` points and vectors, `[N; 3]` and `(N, N, N)`.
pub trait Coordinate: Copy {
    type Scalar: Scalar;

    fn x(&self) -> Self::Scalar;
    fn y(&self) -> Self::Scalar;
    fn z(&self) -> Self::Scalar;

    fn from_xyz(x: Self::Scalar, y: Self::Scalar, z: Self::Scalar) -> Self;

    /// Component `axis`, where 0 is x, 1 is y and 2 is z.
    ///
    /// # Panics
    ///
    /// If `axis` is greater than 2.
    #[inline]
    fn axis(&self, axis: usize) -> Self::Scalar {
        match axis {
            0 => self.x(),
            1 => self.y(),
            2 => self.z(),
            _ => panic!("axis {} out of range for a 3D coordinate", axis),
        }
    }

    /// Builds a coordinate by evaluating `f` once per axis.
    #[inline]
    fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize) -> Self::Scalar,
    {
        let x = f(0);
        let y = f(1);
        let z = f(2);
        Self::from_xyz(x, y, z)
    }
}

impl<N> Coordinate for Point3<N>
where
    N: Scalar + nalgebra::Scalar,
{
    type Scalar = N;

    #[inline]
    fn x(&self) -> N {
        self.x
    }

    #[inline]
    fn y(&self) -> N {
        self.y
    }

    #[inline]
    fn z(&self) -> N {
        self.z
    }

    #[inline]
    fn from_xyz(x: N, y: N, z: N) -> Self {
        Point3::new(x, y, z)
    }
}

impl<N> Coordinate for Vector3<N>
where
    N: Scalar + nalgebra::Scalar,
{
    type Scalar = N;

    #[inline]
    fn x(&self) -> N {
        self.x
    }

    #[inline]
    fn y(&self) -> N {
        self.y
    }

    #[inline]
    fn z(&self) -> N {
        self.z
    }

    #[inline]
    fn from_xyz(x: N, y: N, z: N) -> Self {
        Vector3::new(x, y, z)
    }
}

impl<N: Scalar> Coordinate for [N; 3] {
    type Scalar = N;

    #[inline]
    fn x(&self) -> N {
        self[0]
    }

    #[inline]
    fn y(&self) -> N {
        self[1]
    }

    #[inline]
    fn z(&self) -> N {
        self[2]
    }

    #[inline]
    fn from_xyz(x: N, y: N, z: N) -> Self {
        [x, y, z]
    }
}

impl<N: Scalar> Coordinate for (N, N, N) {
    type Scalar = N;

    #[inline]
    fn x(&self) -> N {
        self.0
    }

    #[inline]
    fn y(&self) -> N {
        self.1
    }

    #[inline]
    fn z(&self) -> N {
        self.2
    }

    #[inline]
    fn from_xyz(x: N, y: N, z: N) -> Self {
        (x, y, z)
    }
}

/// The smaller of two partially ordered values, preferring `a` when they are unordered.
#[inline]
pub(crate) fn partial_min<S: PartialOrd>(a: S, b: S) -> S {
    if b < a {
        b
    } else {
        a
    }
}

/// The larger of two partially ordered values, preferring `a` when they are unordered.
#[inline]
pub(crate) fn partial_max<S: PartialOrd>(a: S, b: S) -> S {
    if b > a {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_midpoint_does_not_overflow() {
        assert_eq!(<i32 as Scalar>::midpoint(i32::MIN, i32::MAX), -1);
        assert_eq!(<u8 as Scalar>::midpoint(u8::MAX, u8::MAX), u8::MAX);
        assert_eq!(<u8 as Scalar>::midpoint(0, u8::MAX), 127);
        assert_eq!(<i64 as Scalar>::midpoint(-3, 0), -2);
        assert_eq!(<i64 as Scalar>::midpoint(2, 6), 4);
    }

    #[test]
    fn float_midpoint() {
        assert_eq!(<f64 as Scalar>::midpoint(0.0, 100.0), 50.0);
        assert_eq!(<f32 as Scalar>::midpoint(-1.0, 1.0), 0.0);
        assert!(<f64 as Scalar>::midpoint(f64::MAX, f64::MAX).is_finite());
    }

    #[test]
    fn coordinate_impls_agree() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let v = Vector3::new(1.0, 2.0, 3.0);
        let a = [1.0, 2.0, 3.0];
        let t = (1.0, 2.0, 3.0);

        for axis in 0..3 {
            assert_eq!(p.axis(axis), v.axis(axis));
            assert_eq!(p.axis(axis), a.axis(axis));
            assert_eq!(p.axis(axis), t.axis(axis));
        }
        assert_eq!(<[f64; 3]>::from_fn(|axis| p.axis(axis)), a);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn axis_out_of_range() {
        let _ = [0u32; 3].axis(3);
    }
}
