/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Versioned little-endian binary format.
//!
//! ```text
//! u8               format version (1)
//! u64              rows
//! u64              cols
//! cols times:
//!   u64            number of elements in the column (== rows)
//!   rows x f64     the column
//! ```

use crate::{FailResult, Matrix, MatrixBase};
use crate::byte_tools::{extend_f64v_le, read_f64v_le, read_u64_le, write_u64_le, F64_SIZE};
use ::std::convert::TryFrom;
use ::std::io::{Read, Write};

/// Version byte written by this library, and the only one it reads.
pub const BINARY_FORMAT_VERSION: u8 = 1;

fn push_u64(out: &mut Vec<u8>, value: u64)
{
    let start = out.len();
    out.resize(start + 8, 0);
    write_u64_le(&mut out[start..], value);
}

fn read_u64(r: &mut impl Read) -> FailResult<u64>
{
    let mut buf = [0; 8];
    r.read_exact(&mut buf)?;
    Ok(read_u64_le(&buf))
}

fn to_usize(value: u64, what: &str) -> FailResult<usize>
{
    usize::try_from(value).map_err(|_| format_err!("{} too large for this platform: {}", what, value))
}

impl<S: AsRef<[f64]>> MatrixBase<S> {
    /// Encode the logical elements. Padding between columns of a view is not written.
    pub fn to_binary(&self) -> Vec<u8>
    {
        let mut out = Vec::with_capacity(17 + self.cols() * (8 + F64_SIZE * self.rows()));
        self.encode_header(&mut out);
        for j in 0..self.cols() {
            self.encode_column(&mut out, j);
        }
        out
    }

    /// Stream the binary encoding into a writer, one column at a time.
    pub fn write_binary<W: Write>(&self, mut w: W) -> FailResult<()>
    {
        let mut buf = Vec::with_capacity(8 + F64_SIZE * self.rows());
        self.encode_header(&mut buf);
        w.write_all(&buf)?;
        for j in 0..self.cols() {
            buf.clear();
            self.encode_column(&mut buf, j);
            w.write_all(&buf)?;
        }
        Ok(())
    }

    fn encode_header(&self, out: &mut Vec<u8>)
    {
        out.push(BINARY_FORMAT_VERSION);
        push_u64(out, self.rows() as u64);
        push_u64(out, self.cols() as u64);
    }

    fn encode_column(&self, out: &mut Vec<u8>, j: usize)
    {
        let column = self.column_data(j);
        push_u64(out, column.len() as u64);
        extend_f64v_le(out, column);
    }
}

impl Matrix {
    /// Decode a matrix from a reader, consuming exactly the bytes of one matrix.
    ///
    /// Any read error (including a premature end of data) is returned as is,
    /// and nothing is returned for a partially read matrix.
    pub fn read_binary<R: Read>(mut r: R) -> FailResult<Matrix>
    {
        let mut version = [0];
        r.read_exact(&mut version)?;
        if version[0] != BINARY_FORMAT_VERSION {
            bail!("unsupported matrix format version {}", version[0]);
        }

        let rows = read_u64(&mut r)?;
        let cols = read_u64(&mut r)?;
        debug!("decoding a {}x{} matrix", rows, cols);

        let col_bytes = match rows.checked_mul(F64_SIZE as u64) {
            Some(n) => n,
            None => bail!("matrix column length overflows: {}", rows),
        };
        let (rows, cols) = (to_usize(rows, "row count")?, to_usize(cols, "column count")?);
        if rows.checked_mul(cols).is_none() {
            bail!("matrix size overflows: {}x{}", rows, cols);
        }

        // grows with the data actually read, never with the sizes claimed in the header
        let mut data = vec![];
        let mut bytes = vec![];
        for j in 0..cols {
            let len = read_u64(&mut r)?;
            if len != rows as u64 {
                bail!("column {} has {} elements in a matrix with {} rows", j, len, rows);
            }

            bytes.clear();
            r.by_ref().take(col_bytes).read_to_end(&mut bytes)?;
            if bytes.len() as u64 != col_bytes {
                bail!("unexpected end of data in column {} of {}", j, cols);
            }

            let start = data.len();
            data.resize(start + rows, 0.0);
            read_f64v_le(&mut data[start..], &bytes);
        }
        Ok(Matrix::from_column_major_data((rows, cols), data))
    }

    /// Decode a matrix from a byte buffer.
    pub fn from_binary(bytes: &[u8]) -> FailResult<Matrix>
    {
        let mut rest = bytes;
        let matrix = Matrix::read_binary(&mut rest)?;
        if !rest.is_empty() {
            warn!("ignoring {} bytes after the encoded matrix", rest.len());
        }
        Ok(matrix)
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_row_major_data((3, 4), &[
            1.0, 2.0, 3.0, 4.0,
            -5.5, 6.25, ::std::f64::INFINITY, 8.0,
            1e-300, ::std::f64::NEG_INFINITY, 0.1, -0.0,
        ])
    }

    #[test]
    fn layout() {
        let m = Matrix::from_row_major_data((2, 1), &[1.0, 2.0]);
        let mut expected = vec![1];
        expected.extend_from_slice(&[2, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(&[2, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0xf0, 0x3f]);
        expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0x00, 0x40]);
        assert_eq!(m.to_binary(), expected);
    }

    #[test]
    fn round_trip() {
        let m = sample();
        let decoded = Matrix::from_binary(&m.to_binary()).unwrap();
        assert_eq!(decoded, m);
        assert_eq!(decoded.stride(), 3);
        // bit-level: -0.0 == 0.0, so check the sign explicitly
        assert!(decoded.get(2, 3).is_sign_negative());
    }

    #[test]
    fn round_trip_strided_view() {
        let m = sample();
        let v = m.sub_matrix_sized(1, 1, (2, 2));
        let bytes = v.to_binary();
        // padding rows of the parent are not written
        assert_eq!(bytes.len(), 17 + 2 * (8 + 16));

        let decoded = Matrix::from_binary(&bytes).unwrap();
        assert_eq!(decoded.dims(), (2, 2));
        assert_eq!(decoded.stride(), 2);
        assert_eq!(decoded, v);
    }

    #[test]
    fn nan_survives() {
        let mut m = Matrix::zeros((1, 2));
        m.set(0, 1, ::std::f64::NAN);
        let decoded = Matrix::from_binary(&m.to_binary()).unwrap();
        assert_eq!(decoded.get(0, 0), 0.0);
        assert!(decoded.get(0, 1).is_nan());
    }

    #[test]
    fn empty_matrices() {
        for &dims in &[(0, 0), (0, 3), (3, 0)] {
            let decoded = Matrix::from_binary(&Matrix::zeros(dims).to_binary()).unwrap();
            assert_eq!(decoded.dims(), dims);
        }
    }

    #[test]
    fn writer_matches_buffer() {
        let m = sample();
        let mut streamed = vec![];
        m.sub_matrix(1, 0).write_binary(&mut streamed).unwrap();
        assert_eq!(streamed, m.sub_matrix(1, 0).to_binary());
    }

    #[test]
    fn reader_stops_after_one_matrix() {
        let a = sample();
        let b = a.transposed();
        let mut bytes = a.to_binary();
        bytes.extend(b.to_binary());

        let mut r = &bytes[..];
        assert_eq!(Matrix::read_binary(&mut r).unwrap(), a);
        assert_eq!(Matrix::read_binary(&mut r).unwrap(), b);
        assert!(r.is_empty());
    }

    #[test]
    fn bad_version() {
        let mut bytes = sample().to_binary();
        bytes[0] = 2;
        let err = Matrix::from_binary(&bytes).unwrap_err();
        assert!(err.to_string().contains("version 2"));
    }

    #[test]
    fn bad_column_length() {
        let mut bytes = sample().to_binary();
        // first column prefix starts right after the header
        bytes[17] = 2;
        assert!(Matrix::from_binary(&bytes).is_err());
    }

    #[test]
    fn truncation() {
        let bytes = sample().to_binary();
        for &len in &[0, 1, 9, 17, 20, 25, bytes.len() - 1] {
            assert!(Matrix::from_binary(&bytes[..len]).is_err(), "accepted {} bytes", len);
        }
    }

    #[test]
    fn absurd_header_fails_cleanly() {
        let mut bytes = vec![1];
        bytes.extend_from_slice(&[0xff; 8]);
        bytes.extend_from_slice(&[0xff; 8]);
        bytes.extend_from_slice(&[0xff; 8]);
        assert!(Matrix::from_binary(&bytes).is_err());

        // large but representable: fails when the data runs out
        let mut bytes = vec![1];
        bytes.extend_from_slice(&(1u64 << 20).to_le_bytes());
        bytes.extend_from_slice(&(1u64 << 20).to_le_bytes());
        bytes.extend_from_slice(&(1u64 << 20).to_le_bytes());
        bytes.extend_from_slice(&[0; 64]);
        assert!(Matrix::from_binary(&bytes).is_err());
    }
}
