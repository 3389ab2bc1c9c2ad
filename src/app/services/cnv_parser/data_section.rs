//! Data section tokenization
//!
//! After the `*END*` sentinel every row is a whitespace-delimited list of
//! numbers. Rows are buffered during the line pass and turned into columns
//! here, once the number of declared variables is known.

use crate::{Error, Result};

/// One buffered data line with its 1-based position in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRow {
    pub line_number: usize,
    pub text: String,
}

/// Tokenize buffered rows into `variable_count` numeric columns
///
/// The rows must form a rectangular matrix at least `variable_count` wide.
/// Columns past the declared variables are dropped.
///
/// # Errors
/// * Returns `Error::MalformedDataRow` for a non-numeric token, a row narrower
///   than the declared variables, or a row whose width differs from the first
pub fn build_columns(
    origin: &str,
    rows: &[DataRow],
    variable_count: usize,
) -> Result<Vec<Vec<f64>>> {
    let mut columns: Vec<Vec<f64>> = (0..variable_count)
        .map(|_| Vec::with_capacity(rows.len()))
        .collect();
    let mut expected_width = None;

    for row in rows {
        let values = tokenize_row(origin, row)?;

        let width = *expected_width.get_or_insert(values.len());
        if values.len() != width {
            return Err(Error::malformed_data_row(
                origin,
                row.line_number,
                format!(
                    "expected {} fields like the preceding rows, found {}",
                    width,
                    values.len()
                ),
            ));
        }
        if values.len() < variable_count {
            return Err(Error::malformed_data_row(
                origin,
                row.line_number,
                format!(
                    "expected {} fields for the declared variables, found {}",
                    variable_count,
                    values.len()
                ),
            ));
        }

        for (column, value) in columns.iter_mut().zip(values) {
            column.push(value);
        }
    }

    Ok(columns)
}

/// Parse every whitespace-separated token of a row as a finite f64
fn tokenize_row(origin: &str, row: &DataRow) -> Result<Vec<f64>> {
    row.text
        .split_whitespace()
        .map(|token| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(Error::malformed_data_row(
                origin,
                row.line_number,
                format!("invalid numeric value '{}'", token),
            )),
        })
        .collect()
}
