//! Geometric primitives for force-directed layout.
//!
//! This module provides the coordinate types the layout engine moves around.
//!
//! # Overview
//!
//! - [`Scalar`] - The floating-point precision of a coordinate (`f32` or `f64`)
//! - [`Point`] - A point (or displacement vector) with `D` coordinates
//! - [`Point2`] / [`Point3`] - Aliases for the two- and three-dimensional cases
//!
//! Points double as vectors: the difference of two points is a [`Point`] whose
//! [`norm`](Point::norm) is the Euclidean distance between them.

use std::{
    fmt::Debug,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub},
};

/// Floating-point scalar used for coordinates.
///
/// Implemented for [`f32`] and [`f64`]. Values are converted through `f64`
/// when parameters are supplied at runtime.
pub trait Scalar:
    Copy
    + Debug
    + PartialOrd
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const INFINITY: Self;
    const MIN_POSITIVE: Self;
    /// Largest value strictly below one
    const LARGEST_BELOW_ONE: Self;

    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn max(self, other: Self) -> Self;
    fn is_finite(self) -> bool;
    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;
}

macro_rules! impl_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;
                const INFINITY: Self = <$t>::INFINITY;
                const MIN_POSITIVE: Self = <$t>::MIN_POSITIVE;
                const LARGEST_BELOW_ONE: Self = 1.0 - <$t>::EPSILON / 2.0;

                fn sqrt(self) -> Self {
                    <$t>::sqrt(self)
                }

                fn abs(self) -> Self {
                    <$t>::abs(self)
                }

                fn max(self, other: Self) -> Self {
                    <$t>::max(self, other)
                }

                fn is_finite(self) -> bool {
                    <$t>::is_finite(self)
                }

                #[allow(clippy::cast_possible_truncation)]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                fn to_f64(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
}

impl_scalar!(f32, f64);

/// A point in `D`-dimensional layout space.
///
/// Points provide the vector operations the force model needs: addition,
/// subtraction, scaling and the Euclidean norm.
///
/// # Examples
///
/// ```
/// # use yifanhu_core::geometry::Point;
/// let p1 = Point::new([3.0_f64, 0.0]);
/// let p2 = Point::new([0.0_f64, 4.0]);
///
/// let delta = p2.sub_point(p1);
/// assert_eq!(delta.norm(), 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.coords(), &[3.0, 4.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<T, const D: usize> {
    coords: [T; D],
}

/// A point in the plane.
pub type Point2<T> = Point<T, 2>;

/// A point in three-dimensional space.
pub type Point3<T> = Point<T, 3>;

impl<T: Scalar, const D: usize> Point<T, D> {
    /// Creates a new point from its coordinates
    pub fn new(coords: [T; D]) -> Self {
        Self { coords }
    }

    /// Returns the point with every coordinate set to zero
    pub fn origin() -> Self {
        Self {
            coords: [T::ZERO; D],
        }
    }

    /// Returns the coordinates of the point
    pub fn coords(&self) -> &[T; D] {
        &self.coords
    }

    /// Returns the coordinate along `axis`
    ///
    /// # Panics
    ///
    /// Panics if `axis >= D`.
    pub fn coord(self, axis: usize) -> T {
        self.coords[axis]
    }

    /// Checks if every coordinate is zero
    pub fn is_zero(self) -> bool {
        self.coords.iter().all(|&c| c == T::ZERO)
    }

    /// Checks if every coordinate is finite (neither NaN nor infinite)
    pub fn is_finite(self) -> bool {
        self.coords.iter().all(|&c| c.is_finite())
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Self) -> Self {
        let mut coords = self.coords;
        for (c, o) in coords.iter_mut().zip(other.coords) {
            *c += o;
        }
        Self { coords }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Self) -> Self {
        let mut coords = self.coords;
        for (c, o) in coords.iter_mut().zip(other.coords) {
            *c = *c - o;
        }
        Self { coords }
    }

    /// Multiplies every coordinate by the given factor
    pub fn scale(self, factor: T) -> Self {
        let mut coords = self.coords;
        for c in &mut coords {
            *c = *c * factor;
        }
        Self { coords }
    }

    /// Sum of the squared coordinates
    pub fn norm_squared(self) -> T {
        self.coords.iter().fold(T::ZERO, |acc, &c| acc + c * c)
    }

    /// Euclidean length of the point seen as a vector from the origin
    pub fn norm(self) -> T {
        self.norm_squared().sqrt()
    }

    /// Euclidean distance between this point and another
    pub fn distance(self, other: Self) -> T {
        other.sub_point(self).norm()
    }
}

impl<T: Scalar> Point<T, 2> {
    /// Returns the x-coordinate of the point
    pub fn x(self) -> T {
        self.coords[0]
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> T {
        self.coords[1]
    }
}

impl<T: Scalar> Point<T, 3> {
    /// Returns the x-coordinate of the point
    pub fn x(self) -> T {
        self.coords[0]
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> T {
        self.coords[1]
    }

    /// Returns the z-coordinate of the point
    pub fn z(self) -> T {
        self.coords[2]
    }
}

impl<T: Scalar, const D: usize> From<[T; D]> for Point<T, D> {
    fn from(coords: [T; D]) -> Self {
        Self::new(coords)
    }
}

impl<T: Scalar, const D: usize> Default for Point<T, D> {
    fn default() -> Self {
        Self::origin()
    }
}
