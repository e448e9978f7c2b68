/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Matrix, MatrixBase};

/// Direction of a [`join`](fn.join.html).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// Place the inputs one below the other.
    Stack,
    /// Place the inputs side by side.
    Augment,
}

impl Default for JoinKind {
    fn default() -> Self { JoinKind::Augment }
}

/// Concatenate matrices into a freshly allocated one.
///
/// `Augment` produces `max(rows) x sum(cols)` and `Stack` produces
/// `sum(rows) x max(cols)`. Each input lands at the top (resp. left) edge
/// of its slot, and whatever it doesn't cover stays zero.
pub fn join<S: AsRef<[f64]>>(how: JoinKind, matrices: &[MatrixBase<S>]) -> Matrix
{
    let max_rows = matrices.iter().map(|m| m.rows()).max().unwrap_or(0);
    let max_cols = matrices.iter().map(|m| m.cols()).max().unwrap_or(0);
    let sum_rows = matrices.iter().map(|m| m.rows()).sum::<usize>();
    let sum_cols = matrices.iter().map(|m| m.cols()).sum::<usize>();

    let mut out = match how {
        JoinKind::Augment => Matrix::zeros((max_rows, sum_cols)),
        JoinKind::Stack => Matrix::zeros((sum_rows, max_cols)),
    };

    let mut offset = 0;
    for m in matrices {
        if !m.is_empty() {
            let (row, col) = match how {
                JoinKind::Augment => (0, offset),
                JoinKind::Stack => (offset, 0),
            };
            out.sub_matrix_sized_mut(row as isize, col as isize, m.dims())
                .copy_elements(m);
        }
        offset += match how {
            JoinKind::Augment => m.cols(),
            JoinKind::Stack => m.rows(),
        };
    }
    out
}
