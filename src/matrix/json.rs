/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! JSON text format.
//!
//! `{"rows":R,"cols":C,"elems":[...]}` with the elements in column-major
//! order, each written like C's `%.16e` (`NaN`, `+Inf` and `-Inf` for the
//! special values).
//!
//! The reader is not a general JSON parser. It expects the keys in the
//! order written above and the element list to be the third field.

use crate::{FailResult, Matrix, MatrixBase};
use ::std::io::{Read, Write};

// "%.16e": 17 significant digits, exponent with a sign and at least two digits
fn format_elem(x: f64) -> String
{
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return match x > 0.0 {
            true => "+Inf".to_string(),
            false => "-Inf".to_string(),
        };
    }

    crate::display::c_exp(x, 16)
}

fn parse_elem(token: &str) -> FailResult<f64>
{
    let (sign, body) = match token.as_bytes().first() {
        Some(b'-') => (-1.0, &token[1..]),
        Some(b'+') => (1.0, &token[1..]),
        _ => (1.0, token),
    };
    if body.eq_ignore_ascii_case("nan") {
        return Ok(::std::f64::NAN);
    }
    if body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity") {
        return Ok(sign * ::std::f64::INFINITY);
    }
    token.parse::<f64>()
        .map_err(|e| format_err!("bad matrix element {:?}: {}", token, e))
}

// the text after the first ':' of a `"key":value` field
fn parse_count(field: &str, key: &str) -> FailResult<usize>
{
    let value = match field.find(':') {
        Some(k) => &field[k + 1..],
        None => bail!("missing ':' after matrix {:?}", key),
    };
    let value = value.trim_matches(|c: char| c.is_whitespace() || c == '}');
    value.parse()
        .map_err(|e| format_err!("bad matrix {} {:?}: {}", key, value, e))
}

impl<S: AsRef<[f64]>> MatrixBase<S> {
    /// Encode the logical elements as JSON text.
    pub fn to_json(&self) -> String
    {
        let mut out = format!(r#"{{"rows":{},"cols":{},"elems":["#, self.rows(), self.cols());
        for (k, x) in self.iter().enumerate() {
            if k > 0 {
                out.push(',');
            }
            out.push_str(&format_elem(x));
        }
        out.push_str("]}");
        out
    }

    pub fn write_json<W: Write>(&self, mut w: W) -> FailResult<()>
    {
        w.write_all(self.to_json().as_bytes())?;
        Ok(())
    }
}

impl Matrix {
    /// Decode text produced by [`to_json`](struct.MatrixBase.html#method.to_json).
    ///
    /// Text that names no size decodes to an empty matrix. Elements past
    /// `rows * cols` are ignored with a warning.
    pub fn from_json(text: &str) -> FailResult<Matrix>
    {
        let (mut rows, mut cols) = (0, 0);
        let mut elems = None;
        for field in text.splitn(3, ',') {
            if field.contains("rows") {
                rows = parse_count(field, "rows")?;
            } else if field.contains("cols") {
                cols = parse_count(field, "cols")?;
            } else {
                elems = Some(field);
            }
        }

        let count = match usize::checked_mul(rows, cols) {
            Some(n) => n,
            None => bail!("matrix size overflows: {}x{}", rows, cols),
        };
        debug!("decoding a {}x{} matrix from JSON", rows, cols);
        if count == 0 {
            return Ok(Matrix::zeros((rows, cols)));
        }

        let list = elems
            .and_then(|field| field.find('[').map(|k| &field[k + 1..]))
            .ok_or_else(|| format_err!("matrix elements not found"))?;
        let list = match list.find(']') {
            Some(k) => &list[..k],
            None => bail!("unterminated matrix element list"),
        };

        let mut tokens = list.split(',');
        let mut data = vec![];
        for k in 0..count {
            let token = match tokens.next() {
                Some(token) => token.trim(),
                None => bail!("expected {} matrix elements, found {}", count, k),
            };
            data.push(parse_elem(token)?);
        }

        let extra = tokens.count();
        if extra > 0 {
            warn!("ignoring {} matrix elements past the declared {}x{}", extra, rows, cols);
        }
        Ok(Matrix::from_column_major_data((rows, cols), data))
    }

    pub fn read_json<R: Read>(mut r: R) -> FailResult<Matrix>
    {
        let mut text = String::new();
        r.read_to_string(&mut text)?;
        Matrix::from_json(&text)
    }
}
