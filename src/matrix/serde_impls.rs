/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Matrix, MatrixBase};
use serde::{Serialize, Deserialize, ser, de};
use serde::ser::SerializeStruct;

// Same shape as the JSON text format: column-major elements.
impl<S: AsRef<[f64]>> Serialize for MatrixBase<S> {
    fn serialize<Z: ser::Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        let elems = self.iter().collect::<Vec<_>>();
        let mut s = serializer.serialize_struct("Matrix", 3)?;
        s.serialize_field("rows", &self.rows())?;
        s.serialize_field("cols", &self.cols())?;
        s.serialize_field("elems", &elems)?;
        s.end()
    }
}

impl<'de> Deserialize<'de> for Matrix {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename = "Matrix")]
        struct Raw {
            rows: usize,
            cols: usize,
            elems: Vec<f64>,
        }

        let Raw { rows, cols, elems } = Raw::deserialize(deserializer)?;
        if rows.checked_mul(cols) != Some(elems.len()) {
            return Err(de::Error::invalid_length(
                elems.len(),
                &&*format!("{} elements for a {}x{} matrix", rows.saturating_mul(cols), rows, cols),
            ));
        }
        Ok(Matrix::from_column_major_data((rows, cols), elems))
    }
}
