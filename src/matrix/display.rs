/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::MatrixBase;
use ::std::fmt::{self, Write};

// One bracketed row per line, elements separated by ", ".
fn write_rows<S, W, F>(m: &MatrixBase<S>, w: &mut W, mut elem: F) -> fmt::Result
where
    S: AsRef<[f64]>,
    W: fmt::Write,
    F: FnMut(&mut W, f64) -> fmt::Result,
{
    for i in 0..m.rows() {
        if i > 0 {
            w.write_char('\n')?;
        }
        w.write_char('[')?;
        for j in 0..m.cols() {
            if j > 0 {
                w.write_str(", ")?;
            }
            elem(w, m[(i, j)])?;
        }
        w.write_char(']')?;
    }
    Ok(())
}

/// Scientific notation with a signed exponent of at least two digits,
/// as in `1.25e-01`. Non-finite values use the usual `NaN`/`inf` spelling.
pub(crate) fn c_exp(x: f64, precision: usize) -> String
{
    if !x.is_finite() {
        return x.to_string();
    }

    let s = format!("{:.*e}", precision, x);
    match s.find('e') {
        Some(k) => {
            let (mantissa, exp) = (&s[..k], &s[k + 1..]);
            let (sign, digits) = match exp.starts_with('-') {
                true => ('-', &exp[1..]),
                false => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        },
        None => s,
    }
}

/// Row by row.
///
/// Without flags each element is written as `{:>9}` of a two-digit
/// scientific form (` 1.00e+00`), so that columns line up. Width and
/// precision flags, when given, apply to each element instead, so
/// `format!("{:8.3}", m)` prints fixed point.
impl<S: AsRef<[f64]>> fmt::Display for MatrixBase<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match (f.width(), f.precision()) {
            (None, None) => write_rows(self, f, |f, x| write!(f, "{:>9}", c_exp(x, 2))),
            _ => write_rows(self, f, |f, x| fmt::Display::fmt(&x, f)),
        }
    }
}

impl<S: AsRef<[f64]>> fmt::LowerExp for MatrixBase<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { write_rows(self, f, |f, x| fmt::LowerExp::fmt(&x, f)) }
}

impl<S: AsRef<[f64]>> fmt::Debug for MatrixBase<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let rows = (0..self.rows())
            .map(|i| (0..self.cols()).map(|j| self[(i, j)]).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        f.debug_struct("MatrixBase")
            .field("dims", &self.dims())
            .field("stride", &self.stride())
            .field("rows", &rows)
            .finish()
    }
}

impl<S: AsRef<[f64]>> MatrixBase<S> {
    /// Render like `Display`, with each element formatted by `elem`.
    pub fn format_with<F>(&self, mut elem: F) -> String
    where F: FnMut(f64) -> String,
    {
        let mut out = String::new();
        // writing to a String cannot fail
        let _ = write_rows(self, &mut out, |out, x| out.write_str(&elem(x)));
        out
    }
}
