//! Conversion from parsed records to polars DataFrames

use crate::Result;
use crate::app::models::ParsedRecord;
use polars::prelude::{Column, DataFrame, NamedFrom};
use std::collections::HashSet;
use tracing::debug;

/// Build a DataFrame from the resolved columns of a record
///
/// Columns follow declaration order. A canonical name declared more than once
/// appears once, holding the column stored in the record.
pub fn record_to_dataframe(record: &ParsedRecord) -> Result<DataFrame> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(record.data.len());

    for canonical in &record.canonical_variables {
        let Some(name) = canonical.as_resolved() else {
            continue;
        };
        if !seen.insert(name) {
            continue;
        }
        if let Some(values) = record.data.get(name) {
            columns.push(Column::new(name.into(), values.as_slice()));
        }
    }

    debug!(
        "Built DataFrame with {} columns and {} rows from {}",
        columns.len(),
        record.row_count(),
        record.source
    );

    Ok(DataFrame::new(columns)?)
}
