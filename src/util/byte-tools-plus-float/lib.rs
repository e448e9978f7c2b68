/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! read-tools from crates.io extended with float functions.
//!
//! Floats are moved through their IEEE-754 bit patterns, so every value
//! (NaNs included) survives a write/read cycle bit-for-bit.

extern crate byte_tools;
pub use byte_tools::*;

use std::mem::size_of;

/// Number of bytes taken by one encoded `f64`.
pub const F64_SIZE: usize = size_of::<f64>();

/// Read one `f64` from exactly 8 little-endian bytes.
pub fn read_f64_le(src: &[u8]) -> f64
{ f64::from_bits(read_u64_le(src)) }

/// Write one `f64` into exactly 8 bytes, little-endian.
pub fn write_f64_le(dst: &mut [u8], value: f64)
{ write_u64_le(dst, value.to_bits()) }

/// Read `dst.len()` little-endian floats.
///
/// # Panics
///
/// Panics if `src.len() != 8 * dst.len()`.
pub fn read_f64v_le(dst: &mut [f64], src: &[u8]) {
    assert_eq!(src.len(), F64_SIZE * dst.len(), "read_f64v_le: length mismatch");
    for (f, bytes) in dst.iter_mut().zip(src.chunks(F64_SIZE)) {
        *f = read_f64_le(bytes);
    }
}

/// Write every float in `src` as little-endian bytes.
///
/// # Panics
///
/// Panics if `dst.len() != 8 * src.len()`.
pub fn write_f64v_le(dst: &mut [u8], src: &[f64]) {
    assert_eq!(dst.len(), F64_SIZE * src.len(), "write_f64v_le: length mismatch");
    for (bytes, &f) in dst.chunks_mut(F64_SIZE).zip(src) {
        write_f64_le(bytes, f);
    }
}

/// Append the little-endian encoding of `src` to a growing buffer.
pub fn extend_f64v_le(dst: &mut Vec<u8>, src: &[f64]) {
    let start = dst.len();
    dst.resize(start + F64_SIZE * src.len(), 0);
    write_f64v_le(&mut dst[start..], src);
}
