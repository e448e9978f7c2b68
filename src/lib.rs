/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense column-major `f64` matrices.
//!
//! ```
//! use colmat::{Matrix, Region, ConstSource};
//!
//! let mut m = Matrix::zeros((3, 3));
//! m.populate(&mut ConstSource(1.0), Region::Upper);
//!
//! // views alias their parent
//! m.sub_matrix_mut(1, 1).scale(4.0);
//! assert_eq!(m.get(1, 2), 4.0);
//! assert_eq!(m.get(-1, -1), 4.0);
//! assert_eq!(m.get(0, 2), 1.0);
//!
//! let bytes = m.to_binary();
//! assert_eq!(Matrix::from_binary(&bytes).unwrap(), m);
//! ```

pub use colmat_matrix::*;
pub use colmat_assert_close::{assert_close, debug_assert_close};

/// The types and traits needed for everyday use.
pub mod prelude {
    pub use colmat_matrix::{Matrix, MatrixBase, MatrixMut, MatrixRef};
    pub use colmat_matrix::{Region, JoinKind, Source, Sink, Tolerances, CheckClose};
}
