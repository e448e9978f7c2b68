/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Pull-based element providers for `populate`, and their push-based dual.

use crate::{MatrixBase, Region};
use ::rand::{Rng, SeedableRng, XorShiftRng};
use ::rand::distributions::normal::StandardNormal;
use ::std::fmt;

/// Provides the value for element `(i, j)`.
///
/// Implemented for closures `FnMut(usize, usize) -> f64`, and for matrices
/// (with the usual out-of-range NaN).
pub trait Source {
    fn get(&mut self, i: usize, j: usize) -> f64;
}

/// Receives the value of element `(i, j)`.
pub trait Sink {
    fn put(&mut self, i: usize, j: usize, value: f64);
}

impl<F: FnMut(usize, usize) -> f64> Source for F {
    fn get(&mut self, i: usize, j: usize) -> f64
    { self(i, j) }
}

impl<S: AsRef<[f64]>> Source for MatrixBase<S> {
    fn get(&mut self, i: usize, j: usize) -> f64
    { MatrixBase::<S>::get(self, i as isize, j as isize) }
}

impl<F: FnMut(usize, usize, f64)> Sink for F {
    fn put(&mut self, i: usize, j: usize, value: f64)
    { self(i, j, value) }
}

impl<S: AsRef<[f64]> + AsMut<[f64]>> Sink for MatrixBase<S> {
    fn put(&mut self, i: usize, j: usize, value: f64)
    { self.set(i as isize, j as isize, value) }
}

impl<S: AsRef<[f64]> + AsMut<[f64]>> MatrixBase<S> {
    /// Fill `region` with values drawn from `source`.
    ///
    /// This is a `map` that ignores the old values, so `Region::Symmetric`
    /// draws `n(n+1)/2` values and mirrors them.
    pub fn populate<Src>(&mut self, source: &mut Src, region: Region)
    where Src: ?Sized + Source,
    { self.map(region, |i, j, _| source.get(i, j)) }
}

impl<S: AsRef<[f64]>> MatrixBase<S> {
    /// Push the elements of `region` into `sink`, in traversal order.
    pub fn emit<K>(&self, sink: &mut K, region: Region)
    where K: ?Sized + Sink,
    { region.for_each_index(self.dims(), |i, j| sink.put(i, j, self[(i, j)])) }
}

/// The same value everywhere.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConstSource(pub f64);

impl Source for ConstSource {
    fn get(&mut self, _: usize, _: usize) -> f64
    { self.0 }
}

// Expand a user seed into the four nonzero words the generator wants.
fn seeded_rng(seed: u64) -> XorShiftRng
{
    XorShiftRng::from_seed([
        seed as u32,
        (seed >> 32) as u32,
        0x9e37_79b9,
        0x7f4a_7c15,
    ])
}

/// `scale * (u + shift)` where `u` is uniform on `[0, 1)`.
#[derive(Clone)]
pub struct UniformSource {
    scale: f64,
    shift: f64,
    rng: XorShiftRng,
}

impl UniformSource {
    /// Seeded once from the thread-local generator.
    pub fn new(scale: f64, shift: f64) -> Self
    { UniformSource { scale, shift, rng: ::rand::weak_rng() } }

    /// Reproducible stream.
    pub fn with_seed(scale: f64, shift: f64, seed: u64) -> Self
    { UniformSource { scale, shift, rng: seeded_rng(seed) } }
}

impl Default for UniformSource {
    fn default() -> Self { UniformSource::new(1.0, 0.0) }
}

impl Source for UniformSource {
    fn get(&mut self, _: usize, _: usize) -> f64
    { self.scale * (self.rng.gen::<f64>() + self.shift) }
}

impl fmt::Debug for UniformSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("UniformSource")
            .field("scale", &self.scale)
            .field("shift", &self.shift)
            .finish()
    }
}

/// `stddev * z + mean` where `z` is standard normal.
#[derive(Clone)]
pub struct NormalSource {
    mean: f64,
    stddev: f64,
    rng: XorShiftRng,
}

impl NormalSource {
    /// Seeded once from the thread-local generator.
    pub fn new(mean: f64, stddev: f64) -> Self
    { NormalSource { mean, stddev, rng: ::rand::weak_rng() } }

    /// Reproducible stream.
    pub fn with_seed(mean: f64, stddev: f64, seed: u64) -> Self
    { NormalSource { mean, stddev, rng: seeded_rng(seed) } }
}

impl Default for NormalSource {
    fn default() -> Self { NormalSource::new(0.0, 1.0) }
}

impl Source for NormalSource {
    fn get(&mut self, _: usize, _: usize) -> f64
    {
        let StandardNormal(z) = self.rng.gen();
        self.stddev * z + self.mean
    }
}

impl fmt::Debug for NormalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("NormalSource")
            .field("mean", &self.mean)
            .field("stddev", &self.stddev)
            .finish()
    }
}

/// Values from a jagged table of rows, with a fallback for anything the table doesn't cover.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSource {
    data: Vec<Vec<f64>>,
    default: f64,
}

impl TableSource {
    pub fn new(data: Vec<Vec<f64>>, default: f64) -> Self
    { TableSource { data, default } }

    /// Number of rows, and the length of the longest row.
    pub fn size(&self) -> (usize, usize)
    {
        let cols = self.data.iter().map(|row| row.len()).max().unwrap_or(0);
        (self.data.len(), cols)
    }
}

impl Source for TableSource {
    fn get(&mut self, i: usize, j: usize) -> f64
    {
        self.data.get(i)
            .and_then(|row| row.get(j))
            .cloned()
            .unwrap_or(self.default)
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::Matrix;

    #[test]
    fn const_fill_then_copy() {
        let mut a = Matrix::zeros((4, 4));
        a.populate(&mut ConstSource(2.0), Region::All);

        let mut b = Matrix::zeros((4, 4));
        b.copy_from(&a).unwrap();
        assert!(b.iter().all(|x| x == 2.0));
        assert!(a.all_close(&b));
    }

    #[test]
    fn populate_regions() {
        let mut m = Matrix::zeros((3, 3));
        m.populate(&mut ConstSource(1.0), Region::StrictUpper);
        assert_eq!(m, Matrix::from_row_major_data((3, 3), &[
            0.0, 1.0, 1.0,
            0.0, 0.0, 1.0,
            0.0, 0.0, 0.0,
        ]));

        let mut m = Matrix::zeros((3, 3));
        m.populate(&mut ConstSource(1.0), Region::Lower);
        assert_eq!(m.iter().sum::<f64>(), 6.0);
        assert_eq!(m[(0, 2)], 0.0);
    }

    #[test]
    fn closures_are_sources() {
        let mut m = Matrix::zeros((2, 3));
        m.populate(&mut |i: usize, j: usize| (i * 3 + j) as f64, Region::All);
        assert_eq!(m, Matrix::from_row_major_data((2, 3), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]));
    }

    #[test]
    fn matrices_are_sources() {
        let mut src = Matrix::from_row_major_data((2, 2), &[1.0, 2.0, 3.0, 4.0]);
        let mut dst = Matrix::zeros((3, 2));
        dst.populate(&mut src, Region::All);
        assert_eq!(dst.row(1).iter().collect::<Vec<_>>(), vec![3.0, 4.0]);
        assert!(dst.get(2, 0).is_nan());
    }

    #[test]
    fn table_source() {
        let mut table = TableSource::new(vec![vec![1.0, 2.0, 3.0], vec![4.0]], -1.0);
        assert_eq!(table.size(), (2, 3));
        assert_eq!(TableSource::new(vec![], 0.0).size(), (0, 0));

        let mut m = Matrix::zeros((3, 3));
        m.populate(&mut table, Region::All);
        assert_eq!(m, Matrix::from_row_major_data((3, 3), &[
            1.0, 2.0, 3.0,
            4.0, -1.0, -1.0,
            -1.0, -1.0, -1.0,
        ]));
    }

    #[test]
    fn uniform_range_and_seeding() {
        let mut m = Matrix::zeros((20, 20));
        m.populate(&mut UniformSource::with_seed(2.0, -0.5, 42), Region::All);
        assert!(m.iter().all(|x| -1.0 <= x && x < 1.0));
        // not constant
        assert!(m.iter().any(|x| x != m[(0, 0)]));

        let mut again = Matrix::zeros((20, 20));
        again.populate(&mut UniformSource::with_seed(2.0, -0.5, 42), Region::All);
        assert_eq!(m, again);

        let mut other = Matrix::zeros((20, 20));
        other.populate(&mut UniformSource::with_seed(2.0, -0.5, 43), Region::All);
        assert_ne!(m, other);

        let mut unseeded = Matrix::zeros((20, 20));
        unseeded.populate(&mut UniformSource::default(), Region::All);
        assert!(unseeded.iter().all(|x| 0.0 <= x && x < 1.0));
    }

    #[test]
    fn normal_moments() {
        let n = 100 * 100;
        let mut m = Matrix::zeros((100, 100));
        m.populate(&mut NormalSource::with_seed(3.0, 2.0, 7), Region::All);

        let mean = m.iter().sum::<f64>() / n as f64;
        let var = m.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n as f64;
        assert_close!(abs=0.1, mean, 3.0);
        assert_close!(abs=0.1, var.sqrt(), 2.0);
    }

    #[test]
    fn default_sources_are_standard() {
        let n = 100 * 100;
        let mut m = Matrix::zeros((100, 100));
        m.populate(&mut NormalSource::default(), Region::All);

        let mean = m.iter().sum::<f64>() / n as f64;
        let var = m.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n as f64;
        assert_close!(abs=0.1, mean, 0.0);
        assert_close!(abs=0.1, var.sqrt(), 1.0);

        assert_eq!(
            format!("{:?}", NormalSource::default()),
            "NormalSource { mean: 0.0, stddev: 1.0 }",
        );
        assert_eq!(
            format!("{:?}", UniformSource::default()),
            "UniformSource { scale: 1.0, shift: 0.0 }",
        );
    }

    #[test]
    fn symmetric_random_fill() {
        let mut m = Matrix::zeros((6, 6));
        m.populate(&mut NormalSource::with_seed(0.0, 1.0, 1), Region::Symmetric);
        assert_eq!(m, m.transposed());
    }

    #[test]
    fn emit_into_sinks() {
        let m = Matrix::from_row_major_data((2, 2), &[1.0, 2.0, 3.0, 4.0]);

        let mut seen = vec![];
        m.emit(&mut |i: usize, j: usize, x: f64| seen.push((i, j, x)), Region::Upper);
        assert_eq!(seen, vec![(0, 0, 1.0), (0, 1, 2.0), (1, 1, 4.0)]);

        let mut dst = Matrix::zeros((2, 2));
        m.emit(&mut dst, Region::StrictLower);
        assert_eq!(dst, Matrix::from_row_major_data((2, 2), &[0.0, 0.0, 3.0, 0.0]));
    }

    #[test]
    fn debug_skips_generator_state() {
        let s = format!("{:?}", UniformSource::with_seed(1.0, 0.0, 0));
        assert_eq!(s, "UniformSource { scale: 1.0, shift: 0.0 }");
    }
}
