//! Test fixtures for Parquet export

use crate::app::models::{Canonical, ParsedRecord};


/// Record with two resolved columns, one unresolved variable and a duplicate
pub fn create_test_record() -> ParsedRecord {
    let mut record = ParsedRecord::new("casts/cast042.cnv");
    record.variables = vec![
        "t090C".to_string(),
        "prDM".to_string(),
        "mystery".to_string(),
        "prdM".to_string(),
    ];
    record.canonical_variables = vec![
        Canonical::Resolved("temperature".to_string()),
        Canonical::Resolved("pressure".to_string()),
        Canonical::Unresolved,
        Canonical::Resolved("pressure".to_string()),
    ];
    record
        .data
        .insert("temperature".to_string(), vec![10.1, 10.2, 10.3]);
    record
        .data
        .insert("pressure".to_string(), vec![1.0, 2.0, 3.0]);
    record
}
