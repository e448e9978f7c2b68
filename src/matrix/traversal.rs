/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::MatrixBase;

/// Which elements a traversal visits, and in what order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Region {
    /// Every element, column by column.
    All,
    /// `i <= j`, row by row.
    Upper,
    /// `i < j`, row by row.
    StrictUpper,
    /// `i >= j`, column by column.
    Lower,
    /// `i > j`, column by column.
    StrictLower,
    /// The upper triangle of a square matrix, with each off-diagonal
    /// result mirrored into the lower triangle.
    ///
    /// Non-square matrices are left alone.
    Symmetric,
}

impl Default for Region {
    fn default() -> Self { Region::All }
}

impl Region {
    /// Call `f(i, j)` for each index of a `rows x cols` matrix in this region.
    ///
    /// For `Symmetric` this visits `i < j` of column `j` followed by `(j, j)`,
    /// so that every unordered pair is seen exactly once.
    pub fn for_each_index<F>(self, (rows, cols): (usize, usize), mut f: F)
    where F: FnMut(usize, usize),
    {
        match self {
            Region::All => {
                for j in 0..cols {
                    for i in 0..rows {
                        f(i, j);
                    }
                }
            },
            Region::Upper | Region::StrictUpper => {
                let skip = (self == Region::StrictUpper) as usize;
                for i in 0..rows {
                    for j in i + skip..cols {
                        f(i, j);
                    }
                }
            },
            Region::Lower | Region::StrictLower => {
                let skip = (self == Region::StrictLower) as usize;
                for j in 0..cols {
                    for i in j + skip..rows {
                        f(i, j);
                    }
                }
            },
            Region::Symmetric => {
                if rows != cols {
                    trace!("symmetric traversal of a {}x{} matrix does nothing", rows, cols);
                    return;
                }
                for j in 0..cols {
                    for i in 0..j {
                        f(i, j);
                    }
                    f(j, j);
                }
            },
        }
    }
}

/// In-place element-wise transformation.
impl<S: AsRef<[f64]> + AsMut<[f64]>> MatrixBase<S> {
    /// Replace each element `(i, j)` in `region` by `f(i, j, old)`.
    ///
    /// With `Region::Symmetric`, an off-diagonal result is also written to `(j, i)`.
    pub fn map<F>(&mut self, region: Region, mut f: F)
    where F: FnMut(usize, usize, f64) -> f64,
    {
        let dims = self.dims();
        let stride = self.stride();
        let data = self.data_mut();
        region.for_each_index(dims, |i, j| {
            let k = i + j * stride;
            let value = f(i, j, data[k]);
            data[k] = value;
            if region == Region::Symmetric && i != j {
                data[j + i * stride] = value;
            }
        });
    }

    /// Replace every element by `f(old)`.
    pub fn map_values<F>(&mut self, mut f: F)
    where F: FnMut(f64) -> f64,
    { self.map(Region::All, |_, _, x| f(x)) }

    pub fn scale(&mut self, factor: f64)
    { self.map_values(|x| x * factor) }

    pub fn add_scalar(&mut self, value: f64)
    { self.map_values(|x| x + value) }

    /// Natural logarithm of every element.
    pub fn ln(&mut self)
    { self.map_values(f64::ln) }

    /// Zero everything below the diagonal. With `unit`, also set the diagonal to one.
    pub fn make_upper_triangular(&mut self, unit: bool)
    { self.map(Region::Lower, |i, j, x| triangular_value(i, j, x, unit)) }

    /// Zero everything above the diagonal. With `unit`, also set the diagonal to one.
    pub fn make_lower_triangular(&mut self, unit: bool)
    { self.map(Region::Upper, |i, j, x| triangular_value(i, j, x, unit)) }
}

fn triangular_value(i: usize, j: usize, old: f64, unit: bool) -> f64
{
    match (i == j, unit) {
        (false, _) => 0.0,
        (true, true) => 1.0,
        (true, false) => old,
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::Matrix;

    fn visits(region: Region, dims: (usize, usize)) -> Vec<(usize, usize)> {
        let mut out = vec![];
        region.for_each_index(dims, |i, j| out.push((i, j)));
        out
    }

    #[test]
    fn orders() {
        assert_eq!(visits(Region::All, (2, 2)), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(visits(Region::Upper, (3, 3)), vec![
            (0, 0), (0, 1), (0, 2),
                    (1, 1), (1, 2),
                            (2, 2),
        ]);
        assert_eq!(visits(Region::StrictUpper, (3, 3)), vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(visits(Region::Lower, (3, 3)), vec![
            (0, 0), (1, 0), (2, 0),
                    (1, 1), (2, 1),
                            (2, 2),
        ]);
        assert_eq!(visits(Region::StrictLower, (3, 3)), vec![(1, 0), (2, 0), (2, 1)]);
        assert_eq!(visits(Region::Symmetric, (3, 3)), vec![
            (0, 0),
            (0, 1), (1, 1),
            (0, 2), (1, 2), (2, 2),
        ]);
    }

    #[test]
    fn rectangular_triangles() {
        assert_eq!(visits(Region::Upper, (3, 2)), vec![(0, 0), (0, 1), (1, 1)]);
        assert_eq!(visits(Region::Lower, (2, 3)), vec![(0, 0), (1, 0), (1, 1)]);
        assert_eq!(visits(Region::StrictLower, (3, 1)), vec![(1, 0), (2, 0)]);
        assert_eq!(visits(Region::Symmetric, (3, 2)), vec![]);
        assert_eq!(visits(Region::All, (0, 4)), vec![]);
    }

    #[test]
    fn symmetric_mirrors() {
        let n = 5;
        let mut count = 0;
        let mut m = Matrix::zeros((n, n));
        m.map(Region::Symmetric, |i, j, _| {
            count += 1;
            (10 * i + j) as f64
        });
        assert_eq!(count, n * (n + 1) / 2);
        for i in 0..n {
            for j in 0..n {
                let (lo, hi) = (usize::min(i, j), usize::max(i, j));
                assert_eq!(m[(i, j)], (10 * lo + hi) as f64);
            }
        }
    }

    #[test]
    fn symmetric_leaves_rectangles_alone() {
        let mut m = Matrix::new_filled((2, 3), 4.0);
        m.map(Region::Symmetric, |_, _, _| panic!("visited"));
        assert!(m.iter().all(|x| x == 4.0));
    }

    #[test]
    fn map_sees_old_values() {
        let mut m = Matrix::from_row_major_data((2, 2), &[1.0, 2.0, 3.0, 4.0]);
        m.map(Region::StrictLower, |_, _, x| -x);
        assert_eq!(m, Matrix::from_row_major_data((2, 2), &[1.0, 2.0, -3.0, 4.0]));
    }

    #[test]
    fn map_through_a_view_stays_inside_it() {
        let mut m = Matrix::zeros((4, 4));
        m.sub_matrix_sized_mut(1, 1, (2, 2)).map(Region::All, |_, _, _| 1.0);
        assert_eq!(m.iter().filter(|&x| x == 1.0).count(), 4);
        assert_eq!(m[(1, 1)], 1.0);
        assert_eq!(m[(2, 2)], 1.0);
        assert_eq!(m[(3, 3)], 0.0);

        // mirroring happens in view coordinates
        m.sub_matrix_sized_mut(0, 1, (3, 3)).map(Region::Symmetric, |i, j, _| (i + j) as f64);
        assert_eq!(m[(0, 2)], 1.0);
        assert_eq!(m[(1, 1)], 1.0);
        assert_eq!(m[(2, 1)], 2.0);
        assert_eq!(m[(0, 3)], 2.0);
        assert_eq!(m[(2, 1)], m[(0, 3)]);
    }

    #[test]
    fn scalar_helpers() {
        let mut m = Matrix::new_filled((2, 3), 2.0);
        m.scale(3.0);
        m.add_scalar(-5.0);
        assert!(m.iter().all(|x| x == 1.0));
        m.ln();
        assert!(m.iter().all(|x| x == 0.0));
    }

    #[test]
    fn triangular_idempotence() {
        let data = (1..=9).map(f64::from).collect::<Vec<_>>();
        let full = Matrix::from_row_major_data((3, 3), &data);

        let mut upper = full.clone();
        upper.make_upper_triangular(false);
        assert_eq!(upper, Matrix::from_row_major_data((3, 3), &[
            1.0, 2.0, 3.0,
            0.0, 5.0, 6.0,
            0.0, 0.0, 9.0,
        ]));
        let again = {
            let mut m = upper.clone();
            m.make_upper_triangular(false);
            m
        };
        assert_eq!(again, upper);

        let mut unit_lower = full.clone();
        unit_lower.make_lower_triangular(true);
        assert_eq!(unit_lower, Matrix::from_row_major_data((3, 3), &[
            1.0, 0.0, 0.0,
            4.0, 1.0, 0.0,
            7.0, 8.0, 1.0,
        ]));
        let again = {
            let mut m = unit_lower.clone();
            m.make_lower_triangular(true);
            m
        };
        assert_eq!(again, unit_lower);
    }
}
