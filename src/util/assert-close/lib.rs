/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Approximate comparison of floating point data.
//!
//! The comparison is asymmetric: the second operand is the reference value,
//! and `a` is close to `b` when `|a - b| <= abs + rel * |b|`.

#[macro_use]
extern crate failure;

use std::fmt;

/// Default absolute tolerance.
pub const DEFAULT_ABS_TOL: f64 = 1e-8;
/// Default relative tolerance.
pub const DEFAULT_REL_TOL: f64 = 1.00000000000000001e-5;

/// Asserts that two values are close, with optional `abs=` and `rel=` overrides.
///
/// ```
/// # #[macro_use] extern crate colmat_assert_close;
/// # fn main() {
/// assert_close!(1.0, 1.0 + 1e-12);
/// assert_close!(abs=1e-3, 1.0, 1.0005);
/// assert_close!(rel=1e-3, abs=0.0, 1000.0, 1000.5, "context: {}", 42);
/// # }
/// ```
#[macro_export]
macro_rules! assert_close {
    (@tol [$tol:expr] $a:expr, $b:expr $(,)*) => {
        $crate::__assert_close(&$a, &$b, $tol, format_args!("not nearly equal!"))
    };
    (@tol [$tol:expr] $a:expr, $b:expr, $($fmt:tt)+) => {
        $crate::__assert_close(&$a, &$b, $tol, format_args!($($fmt)+))
    };
    (abs=$abs:expr, rel=$rel:expr, $($rest:tt)+) => {
        $crate::assert_close!(@tol [$crate::Tolerances::new($abs, $rel)] $($rest)+)
    };
    (rel=$rel:expr, abs=$abs:expr, $($rest:tt)+) => {
        $crate::assert_close!(@tol [$crate::Tolerances::new($abs, $rel)] $($rest)+)
    };
    (abs=$abs:expr, $($rest:tt)+) => {
        $crate::assert_close!(@tol [$crate::Tolerances::default().with_abs($abs)] $($rest)+)
    };
    (rel=$rel:expr, $($rest:tt)+) => {
        $crate::assert_close!(@tol [$crate::Tolerances::default().with_rel($rel)] $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::assert_close!(@tol [$crate::Tolerances::default()] $($rest)+)
    };
}

#[macro_export]
macro_rules! debug_assert_close {
    ($($t:tt)*) => {{
        #[cfg(debug_assertions)] {
            $crate::assert_close!{$($t)*}
        }
    }};
}

#[doc(hidden)]
pub fn __assert_close<A, B>(a: &A, b: &B, tol: Tolerances, msg: fmt::Arguments<'_>)
where
    A: ?Sized + CheckClose<B> + fmt::Debug,
    B: ?Sized + fmt::Debug,
{
    if let Err(e) = a.check_close(b, tol) {
        panic!(
            "{} (tolerances: abs={}, rel={})\n left: {:?}\nright: {:?}\n{}",
            msg, tol.abs, tol.rel, a, b, e,
        );
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self
    { Tolerances { abs: DEFAULT_ABS_TOL, rel: DEFAULT_REL_TOL } }
}

impl Tolerances {
    pub fn new(abs: f64, rel: f64) -> Self
    {
        assert!(abs >= 0.0, "negative absolute tolerance: {}", abs);
        assert!(rel >= 0.0, "negative relative tolerance: {}", rel);
        Tolerances { abs, rel }
    }

    pub fn with_abs(self, abs: f64) -> Self { Tolerances::new(abs, self.rel) }
    pub fn with_rel(self, rel: f64) -> Self { Tolerances::new(self.abs, rel) }

    /// Largest difference accepted against the reference value `expected`.
    #[inline]
    pub fn bound(&self, expected: f64) -> f64
    { self.abs + self.rel * expected.abs() }

    /// Test `|value - expected| <= abs + rel * |expected|`.
    ///
    /// Only a difference that is known to exceed the bound is rejected.
    /// Comparisons involving NaN are therefore accepted, so a matrix is
    /// always close to itself. Any value is close to an infinite reference.
    #[inline]
    pub fn is_close(&self, value: f64, expected: f64) -> bool
    {
        if value == expected {
            return true;
        }
        !((value - expected).abs() > self.bound(expected))
    }
}

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum CheckCloseError {
    #[fail(display = "shapes differ: {:?} vs {:?}", _0, _1)]
    Shape((usize, usize), (usize, usize)),

    #[fail(
        display = "failed at {:?}:\n  left: {:?}\n right: {:?}\n   tol: {:?}",
        index, left, right, tol
    )]
    Value {
        index: (usize, usize),
        left: f64,
        right: f64,
        tol: Tolerances,
    },
}

impl CheckCloseError {
    /// Re-label the position of a failed element comparison.
    pub fn at(self, index: (usize, usize)) -> Self
    {
        match self {
            CheckCloseError::Value { left, right, tol, .. } => {
                CheckCloseError::Value { index, left, right, tol }
            },
            e => e,
        }
    }
}

pub trait CheckClose<Rhs: ?Sized = Self> {
    /// Test that all values of self are close to those of `other`.
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError>;
}

impl CheckClose for f64 {
    #[inline]
    fn check_close(&self, other: &f64, tol: Tolerances) -> Result<(), CheckCloseError>
    {
        match tol.is_close(*self, *other) {
            true => Ok(()),
            false => Err(CheckCloseError::Value {
                index: (0, 0),
                left: *self,
                right: *other,
                tol,
            }),
        }
    }
}

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { CheckClose::check_close(*self, *other, tol) }
}

// slices are treated as column vectors
impl CheckClose for [f64] {
    fn check_close(&self, other: &[f64], tol: Tolerances) -> Result<(), CheckCloseError>
    {
        if self.len() != other.len() {
            return Err(CheckCloseError::Shape((self.len(), 1), (other.len(), 1)));
        }
        for (i, (a, b)) in self.iter().zip(other).enumerate() {
            a.check_close(b, tol).map_err(|e| e.at((i, 0)))?;
        }
        Ok(())
    }
}

impl CheckClose for Vec<f64> {
    fn check_close(&self, other: &Vec<f64>, tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

impl CheckClose<[f64]> for Vec<f64> {
    fn check_close(&self, other: &[f64], tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(other, tol) }
}
