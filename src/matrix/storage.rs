/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{BindError, CapacityError, ShapeError, StrideError};
use ::colmat_assert_close::{CheckClose, CheckCloseError, Tolerances};
use ::std::ops::{Bound, Index, IndexMut, Range, RangeBounds};

/// Column-major `f64` matrix over some storage `S`.
///
/// Element `(i, j)` lives at `data[i + j * stride]`, where `stride` (the
/// "leading dimension") is at least `rows`. The storage is one of:
///
/// * `Vec<f64>` for an owned matrix ([`Matrix`]),
/// * `&[f64]` for a read-only view ([`MatrixRef`]),
/// * `&mut [f64]` for a writable view ([`MatrixMut`]).
///
/// Views are windows into the buffer of the matrix they were taken from, and
/// borrow it for as long as they live.
///
/// [`Matrix`]: type.Matrix.html
/// [`MatrixRef`]: type.MatrixRef.html
/// [`MatrixMut`]: type.MatrixMut.html
#[derive(Clone, Copy)]
pub struct MatrixBase<S> {
    // begins at element (0, 0); may extend past the last element
    data: S,
    rows: usize,
    cols: usize,
    // invariant: stride >= rows whenever rows > 0
    // invariant: data.len() >= span(rows, cols, stride)
    stride: usize,
}

/// An owned matrix.
pub type Matrix = MatrixBase<Vec<f64>>;
/// A read-only view.
pub type MatrixRef<'a> = MatrixBase<&'a [f64]>;
/// A writable view.
pub type MatrixMut<'a> = MatrixBase<&'a mut [f64]>;

/// Number of buffer slots addressed by a `rows x cols` matrix with the given stride.
fn span(rows: usize, cols: usize, stride: usize) -> Option<usize>
{
    if rows == 0 || cols == 0 {
        return Some(0);
    }
    (cols - 1).checked_mul(stride)?.checked_add(rows)
}

/// Apply python-style negative wrapping to an index, then bounds-check it.
fn wrap_index(index: isize, len: usize) -> Option<usize>
{
    let index = match index < 0 {
        true => index + len as isize,
        false => index,
    };
    match 0 <= index && (index as usize) < len {
        true => Some(index as usize),
        false => None,
    }
}

fn resolve_range<R: RangeBounds<usize>>(range: R, len: usize) -> Option<Range<usize>>
{
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.checked_add(1)?,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.checked_add(1)?,
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };
    match start <= end && end <= len {
        true => Some(start..end),
        false => None,
    }
}

// Placement of a view relative to the origin of its parent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Window {
    offset: usize,
    rows: usize,
    cols: usize,
    stride: usize,
}

impl Window {
    const EMPTY: Window = Window { offset: 0, rows: 0, cols: 0, stride: 0 };

    fn len(&self) -> usize
    { span(self.rows, self.cols, self.stride).unwrap_or(0) }
}

impl<S> MatrixBase<S> {
    #[inline] pub fn rows(&self) -> usize { self.rows }
    #[inline] pub fn cols(&self) -> usize { self.cols }
    #[inline] pub fn dims(&self) -> (usize, usize) { (self.rows, self.cols) }
    /// Distance in buffer slots between the starts of consecutive columns.
    #[inline] pub fn stride(&self) -> usize { self.stride }
    /// Number of logical elements.
    #[inline] pub fn len(&self) -> usize { self.rows * self.cols }
    #[inline] pub fn is_empty(&self) -> bool { self.rows == 0 || self.cols == 0 }
    #[inline] pub fn is_square(&self) -> bool { self.rows == self.cols }
    #[inline] pub fn is_vector(&self) -> bool { self.rows == 1 || self.cols == 1 }
}

impl Matrix {
    /// Allocate a zero-filled matrix with `stride == rows`.
    pub fn zeros(dims: (usize, usize)) -> Self
    { Matrix::new_filled(dims, 0.0) }

    pub fn new_filled((rows, cols): (usize, usize), fill: f64) -> Self
    { MatrixBase { data: vec![fill; rows * cols], rows, cols, stride: rows } }

    /// Take ownership of column-major data with `stride == rows`.
    pub fn from_column_major_data((rows, cols): (usize, usize), data: Vec<f64>) -> Self
    {
        assert_eq!(data.len(), rows * cols);
        MatrixBase { data, rows, cols, stride: rows }
    }

    /// Build a matrix from row-major data. Mostly useful for literals.
    pub fn from_row_major_data((rows, cols): (usize, usize), data: &[f64]) -> Self
    {
        assert_eq!(data.len(), rows * cols);
        let mut out = Matrix::zeros((rows, cols));
        out.map(crate::Region::All, |i, j, _| data[i * cols + j]);
        out
    }

    /// Give up the backing buffer.
    pub fn into_data(self) -> Vec<f64>
    { self.data }
}

impl<S: AsRef<[f64]>> MatrixBase<S> {
    /// Wrap caller-supplied storage.
    ///
    /// A `stride` of zero means `rows`. A nonzero `stride` smaller than `rows`
    /// is a `StrideError`, and storage holding fewer than `stride * cols`
    /// elements is a `CapacityError`.
    pub fn bind((rows, cols): (usize, usize), stride: usize, data: S) -> Result<Self, BindError>
    {
        let stride = match stride {
            0 => rows,
            s => s,
        };
        if stride < rows {
            return Err(StrideError { stride, rows }.into());
        }

        let required = stride.checked_mul(cols).unwrap_or(usize::max_value());
        let capacity = data.as_ref().len();
        if capacity < required {
            return Err(CapacityError { required, capacity }.into());
        }
        Ok(MatrixBase { data, rows, cols, stride })
    }

    /// The buffer, starting at element `(0, 0)`.
    ///
    /// For a view this may include elements of the parent outside of the view.
    pub fn data(&self) -> &[f64]
    { self.data.as_ref() }

    /// The contiguous elements of column `j`.
    pub fn column_data(&self, j: usize) -> &[f64]
    {
        assert!(j < self.cols, "column {} out of bounds for {} columns", j, self.cols);
        match self.rows {
            0 => &[],
            rows => &self.data.as_ref()[j * self.stride..j * self.stride + rows],
        }
    }

    /// All elements in column-major order.
    pub fn iter(&self) -> impl Iterator<Item=f64> + '_
    { (0..self.cols).flat_map(move |j| self.column_data(j).iter().cloned()) }

    pub fn as_matrix_ref(&self) -> MatrixRef<'_>
    {
        let MatrixBase { rows, cols, stride, .. } = *self;
        MatrixBase { data: self.data.as_ref(), rows, cols, stride }
    }

    /// Deep copy into a freshly allocated matrix with `stride == rows`.
    pub fn to_owned_matrix(&self) -> Matrix
    {
        let mut out = Matrix::zeros(self.dims());
        out.copy_elements(self);
        out
    }

    /// Freshly allocated transpose.
    pub fn transposed(&self) -> Matrix
    {
        let mut out = Matrix::zeros((self.cols, self.rows));
        out.transpose_elements(self);
        out
    }

    /// Element `(i, j)`, where negative indices count from the end.
    ///
    /// Out of range indices produce NaN. An empty matrix produces `0.0`.
    pub fn get(&self, i: isize, j: isize) -> f64
    {
        if self.is_empty() {
            return 0.0;
        }
        match self.locate(i, j) {
            Some(k) => self.data.as_ref()[k],
            None => ::std::f64::NAN,
        }
    }

    /// Element `k` in column-major order, where negative indices count from the end.
    ///
    /// Out of range indices produce NaN.
    pub fn get_flat(&self, k: isize) -> f64
    {
        match self.locate_flat(k) {
            Some(k) => self.data.as_ref()[k],
            None => ::std::f64::NAN,
        }
    }

    fn locate(&self, i: isize, j: isize) -> Option<usize>
    {
        let i = wrap_index(i, self.rows)?;
        let j = wrap_index(j, self.cols)?;
        Some(i + j * self.stride)
    }

    fn locate_flat(&self, k: isize) -> Option<usize>
    {
        let k = wrap_index(k, self.len())?;
        Some(k % self.rows + (k / self.rows) * self.stride)
    }

    /// `true` if every element is within the default tolerances of the
    /// corresponding element of `other`. Differently shaped matrices are never close.
    pub fn all_close<T: AsRef<[f64]>>(&self, other: &MatrixBase<T>) -> bool
    { self.all_close_with(other, Tolerances::default()) }

    pub fn all_close_with<T: AsRef<[f64]>>(&self, other: &MatrixBase<T>, tol: Tolerances) -> bool
    { self.check_close(other, tol).is_ok() }
}

/// View construction.
///
/// All of these degrade to an empty (`0 x 0`) view instead of failing when
/// the requested window does not lie inside the parent.
impl<S: AsRef<[f64]>> MatrixBase<S> {
    /// View from `(row, col)` to the far corner. Negative indices count from the end.
    pub fn sub_matrix(&self, row: isize, col: isize) -> MatrixRef<'_>
    { self.view(self.sub_window(row, col, None, None)) }

    /// View of the given extents at `(row, col)`.
    pub fn sub_matrix_sized(&self, row: isize, col: isize, dims: (usize, usize)) -> MatrixRef<'_>
    { self.view(self.sub_window(row, col, Some(dims), None)) }

    /// View of the given extents at `(row, col)` with an explicit stride.
    pub fn sub_matrix_strided(&self, row: isize, col: isize, dims: (usize, usize), stride: usize) -> MatrixRef<'_>
    { self.view(self.sub_window(row, col, Some(dims), Some(stride))) }

    /// Row `i` as a `1 x cols` view.
    pub fn row(&self, i: isize) -> MatrixRef<'_>
    { self.row_range(i, ..) }

    /// Part of row `i` spanning the given columns.
    pub fn row_range<R: RangeBounds<usize>>(&self, i: isize, cols: R) -> MatrixRef<'_>
    { self.view(self.row_window(i, cols)) }

    /// Column `j` as a `rows x 1` view.
    pub fn column(&self, j: isize) -> MatrixRef<'_>
    { self.column_range(j, ..) }

    /// Part of column `j` spanning the given rows.
    pub fn column_range<R: RangeBounds<usize>>(&self, j: isize, rows: R) -> MatrixRef<'_>
    { self.view(self.column_window(j, rows)) }

    /// The main diagonal as a `1 x min(rows, cols)` view.
    pub fn diagonal(&self) -> MatrixRef<'_>
    { self.view(self.diagonal_window()) }

    fn view(&self, w: Window) -> MatrixRef<'_>
    {
        let data = match w.len() {
            0 => &[][..],
            len => &self.data.as_ref()[w.offset..w.offset + len],
        };
        MatrixBase { data, rows: w.rows, cols: w.cols, stride: w.stride }
    }

    fn sub_window(&self, row: isize, col: isize, dims: Option<(usize, usize)>, stride: Option<usize>) -> Window
    {
        let (row, col) = match (wrap_index(row, self.rows), wrap_index(col, self.cols)) {
            (Some(row), Some(col)) => (row, col),
            _ => {
                trace!("sub-matrix origin ({}, {}) is outside a {}x{} matrix", row, col, self.rows, self.cols);
                return Window::EMPTY;
            },
        };
        let (rows, cols) = dims.unwrap_or((self.rows - row, self.cols - col));
        let stride = stride.unwrap_or(self.stride);
        self.fit(Window { offset: row + col * self.stride, rows, cols, stride })
    }

    fn row_window<R: RangeBounds<usize>>(&self, i: isize, cols: R) -> Window
    {
        match (wrap_index(i, self.rows), resolve_range(cols, self.cols)) {
            (Some(i), Some(cols)) => self.fit(Window {
                offset: i + cols.start * self.stride,
                rows: 1,
                cols: cols.len(),
                stride: self.stride,
            }),
            _ => {
                trace!("row {} is outside a {}x{} matrix", i, self.rows, self.cols);
                Window::EMPTY
            },
        }
    }

    fn column_window<R: RangeBounds<usize>>(&self, j: isize, rows: R) -> Window
    {
        match (wrap_index(j, self.cols), resolve_range(rows, self.rows)) {
            (Some(j), Some(rows)) => self.fit(Window {
                offset: rows.start + j * self.stride,
                rows: rows.len(),
                cols: 1,
                stride: self.stride,
            }),
            _ => {
                trace!("column {} is outside a {}x{} matrix", j, self.rows, self.cols);
                Window::EMPTY
            },
        }
    }

    fn diagonal_window(&self) -> Window
    {
        if self.is_empty() {
            return Window::EMPTY;
        }
        let n = usize::min(self.rows, self.cols);
        self.fit(Window { offset: 0, rows: 1, cols: n, stride: self.stride + 1 })
    }

    // Replace windows that would reach outside the buffer with an empty one.
    fn fit(&self, w: Window) -> Window
    {
        if w.rows == 0 || w.cols == 0 {
            return w;
        }
        let end = span(w.rows, w.cols, w.stride).and_then(|len| len.checked_add(w.offset));
        match end {
            Some(end) if w.stride >= w.rows && end <= self.data.as_ref().len() => w,
            _ => {
                trace!("view {:?} does not fit in a buffer of {}", w, self.data.as_ref().len());
                Window::EMPTY
            },
        }
    }
}

impl<S: AsRef<[f64]> + AsMut<[f64]>> MatrixBase<S> {
    /// The buffer, starting at element `(0, 0)`.
    pub fn data_mut(&mut self) -> &mut [f64]
    { self.data.as_mut() }

    /// The contiguous elements of column `j`.
    pub fn column_data_mut(&mut self, j: usize) -> &mut [f64]
    {
        assert!(j < self.cols, "column {} out of bounds for {} columns", j, self.cols);
        let (rows, stride) = (self.rows, self.stride);
        match rows {
            0 => Default::default(),
            rows => &mut self.data.as_mut()[j * stride..j * stride + rows],
        }
    }

    pub fn as_matrix_mut(&mut self) -> MatrixMut<'_>
    {
        let MatrixBase { rows, cols, stride, .. } = *self;
        MatrixBase { data: self.data.as_mut(), rows, cols, stride }
    }

    /// Set element `(i, j)`, where negative indices count from the end.
    ///
    /// Out of range indices are silently ignored.
    pub fn set(&mut self, i: isize, j: isize, value: f64)
    {
        if let Some(k) = self.locate(i, j) {
            self.data.as_mut()[k] = value;
        }
    }

    /// Set element `k` in column-major order. Out of range indices are ignored.
    pub fn set_flat(&mut self, k: isize, value: f64)
    {
        if let Some(k) = self.locate_flat(k) {
            self.data.as_mut()[k] = value;
        }
    }

    /// Overwrite all elements with those of an identically shaped matrix.
    pub fn copy_from<T: AsRef<[f64]>>(&mut self, src: &MatrixBase<T>) -> Result<(), ShapeError>
    {
        if self.dims() != src.dims() {
            return Err(ShapeError { op: "copy", expected: self.dims(), actual: src.dims() });
        }
        self.copy_elements(src);
        Ok(())
    }

    /// Overwrite `self` with the transpose of `src`.
    pub fn transpose_from<T: AsRef<[f64]>>(&mut self, src: &MatrixBase<T>) -> Result<(), ShapeError>
    {
        if self.dims() != (src.cols, src.rows) {
            return Err(ShapeError { op: "transpose", expected: (src.cols, src.rows), actual: self.dims() });
        }
        self.transpose_elements(src);
        Ok(())
    }

    // requires matching dims
    pub(crate) fn copy_elements<T: AsRef<[f64]>>(&mut self, src: &MatrixBase<T>)
    {
        debug_assert_eq!(self.dims(), src.dims());
        if self.is_empty() {
            return;
        }
        let MatrixBase { rows, cols, stride: dst_stride, .. } = *self;
        let src_stride = src.stride;
        let dst = self.data.as_mut();
        let src = src.data.as_ref();

        if rows == 1 {
            // step along the row stride
            for j in 0..cols {
                dst[j * dst_stride] = src[j * src_stride];
            }
            return;
        }
        for j in 0..cols {
            let d = j * dst_stride;
            let s = j * src_stride;
            dst[d..d + rows].copy_from_slice(&src[s..s + rows]);
        }
    }

    // requires transposed dims
    fn transpose_elements<T: AsRef<[f64]>>(&mut self, src: &MatrixBase<T>)
    {
        debug_assert_eq!(self.dims(), (src.cols, src.rows));
        let dst_stride = self.stride;
        let dst = self.data.as_mut();
        for j in 0..src.cols {
            for (i, &x) in src.column_data(j).iter().enumerate() {
                dst[j + i * dst_stride] = x;
            }
        }
    }
}

/// Writable view construction. Same rules as for the read-only views.
impl<S: AsRef<[f64]> + AsMut<[f64]>> MatrixBase<S> {
    pub fn sub_matrix_mut(&mut self, row: isize, col: isize) -> MatrixMut<'_>
    { self.view_mut(self.sub_window(row, col, None, None)) }

    pub fn sub_matrix_sized_mut(&mut self, row: isize, col: isize, dims: (usize, usize)) -> MatrixMut<'_>
    { self.view_mut(self.sub_window(row, col, Some(dims), None)) }

    pub fn sub_matrix_strided_mut(&mut self, row: isize, col: isize, dims: (usize, usize), stride: usize) -> MatrixMut<'_>
    { self.view_mut(self.sub_window(row, col, Some(dims), Some(stride))) }

    pub fn row_mut(&mut self, i: isize) -> MatrixMut<'_>
    { self.row_range_mut(i, ..) }

    pub fn row_range_mut<R: RangeBounds<usize>>(&mut self, i: isize, cols: R) -> MatrixMut<'_>
    { self.view_mut(self.row_window(i, cols)) }

    pub fn column_mut(&mut self, j: isize) -> MatrixMut<'_>
    { self.column_range_mut(j, ..) }

    pub fn column_range_mut<R: RangeBounds<usize>>(&mut self, j: isize, rows: R) -> MatrixMut<'_>
    { self.view_mut(self.column_window(j, rows)) }

    pub fn diagonal_mut(&mut self) -> MatrixMut<'_>
    { self.view_mut(self.diagonal_window()) }

    fn view_mut(&mut self, w: Window) -> MatrixMut<'_>
    {
        let data = match w.len() {
            0 => Default::default(),
            len => &mut self.data.as_mut()[w.offset..w.offset + len],
        };
        MatrixBase { data, rows: w.rows, cols: w.cols, stride: w.stride }
    }
}

impl<S: AsRef<[f64]>> Index<(usize, usize)> for MatrixBase<S> {
    type Output = f64;

    /// Strict indexing.
    ///
    /// # Panics
    ///
    /// Panics when the index is out of bounds. Use `get` for the tolerant version.
    #[inline(always)]
    fn index(&self, (i, j): (usize, usize)) -> &f64
    {
        assert!(
            i < self.rows && j < self.cols,
            "index {:?} out of bounds for a {}x{} matrix", (i, j), self.rows, self.cols,
        );
        &self.data.as_ref()[i + j * self.stride]
    }
}

impl<S: AsRef<[f64]> + AsMut<[f64]>> IndexMut<(usize, usize)> for MatrixBase<S> {
    #[inline(always)]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64
    {
        assert!(
            i < self.rows && j < self.cols,
            "index {:?} out of bounds for a {}x{} matrix", (i, j), self.rows, self.cols,
        );
        let stride = self.stride;
        &mut self.data.as_mut()[i + j * stride]
    }
}

// Exact comparison of the logical elements; strides and storage don't matter.
impl<S: AsRef<[f64]>, T: AsRef<[f64]>> PartialEq<MatrixBase<T>> for MatrixBase<S> {
    fn eq(&self, other: &MatrixBase<T>) -> bool
    { self.dims() == other.dims() && self.iter().eq(other.iter()) }
}

impl<S: AsRef<[f64]>, T: AsRef<[f64]>> CheckClose<MatrixBase<T>> for MatrixBase<S> {
    fn check_close(&self, other: &MatrixBase<T>, tol: Tolerances) -> Result<(), CheckCloseError>
    {
        if self.dims() != other.dims() {
            return Err(CheckCloseError::Shape(self.dims(), other.dims()));
        }
        for j in 0..self.cols {
            for (i, (&a, &b)) in self.column_data(j).iter().zip(other.column_data(j)).enumerate() {
                a.check_close(&b, tol).map_err(|e| e.at((i, j)))?;
            }
        }
        Ok(())
    }
}
