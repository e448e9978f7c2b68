/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense column-major `f64` matrices with zero-copy strided views.
//!
//! Every matrix is a [`MatrixBase`] over some storage: an owned `Vec<f64>`
//! ([`Matrix`]), or a borrowed slice of another matrix's buffer
//! ([`MatrixRef`], [`MatrixMut`]). Views alias their parent, so writing through
//! a [`MatrixMut`] is visible through the parent once the view is dropped.
//! Views are checked by the borrow checker: a parent can lend out any number
//! of read-only views, or a single writable one, and a [`MatrixMut`] prevents
//! every other view of the same parent (overlapping or not) while it lives.
//!
//! Element access is tolerant (out of range reads give NaN, writes are
//! ignored, bad views come out empty), while structural operations like
//! [`MatrixBase::copy_from`] report errors.
//!
//! [`MatrixBase`]: struct.MatrixBase.html
//! [`Matrix`]: type.Matrix.html
//! [`MatrixRef`]: type.MatrixRef.html
//! [`MatrixMut`]: type.MatrixMut.html
//! [`MatrixBase::copy_from`]: struct.MatrixBase.html#method.copy_from

#[macro_use] extern crate log;
#[macro_use] extern crate failure;
#[cfg_attr(test, macro_use)] extern crate colmat_assert_close;
extern crate colmat_byte_tools_plus_float as byte_tools;
extern crate rand;

pub type FailResult<T> = Result<T, ::failure::Error>;

/// A structural operation was given matrices of incompatible extents.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
#[fail(display = "{}: expected a {:?} matrix, got {:?}", op, expected, actual)]
pub struct ShapeError {
    pub op: &'static str,
    pub expected: (usize, usize),
    pub actual: (usize, usize),
}

/// Storage supplied for a matrix is too small.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
#[fail(display = "matrix storage too small: need {} elements, have {}", required, capacity)]
pub struct CapacityError {
    pub required: usize,
    pub capacity: usize,
}

/// A nonzero stride given for external storage is shorter than a column.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
#[fail(display = "stride {} cannot hold columns of length {}", stride, rows)]
pub struct StrideError {
    pub stride: usize,
    pub rows: usize,
}

/// Reasons why caller-supplied storage cannot back a matrix.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum BindError {
    #[fail(display = "{}", _0)]
    Stride(#[cause] StrideError),
    #[fail(display = "{}", _0)]
    Capacity(#[cause] CapacityError),
}

impl From<StrideError> for BindError {
    fn from(e: StrideError) -> Self { BindError::Stride(e) }
}

impl From<CapacityError> for BindError {
    fn from(e: CapacityError) -> Self { BindError::Capacity(e) }
}

mod storage;
mod display;
mod traversal;
mod source;
mod join;
mod binary;
mod json;
#[cfg(feature = "serde")]
mod serde_impls;

pub use crate::storage::{MatrixBase, Matrix, MatrixRef, MatrixMut};
pub use crate::traversal::Region;
pub use crate::source::{Source, Sink, ConstSource, UniformSource, NormalSource, TableSource};
pub use crate::join::{join, JoinKind};
pub use crate::binary::BINARY_FORMAT_VERSION;

pub use colmat_assert_close::{Tolerances, CheckClose, CheckCloseError};
pub use colmat_assert_close::{DEFAULT_ABS_TOL, DEFAULT_REL_TOL};
