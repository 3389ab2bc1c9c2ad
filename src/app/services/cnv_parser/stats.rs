//! Parsing statistics and result structures for CNV processing
//!
//! This module provides the types returned from a parse: the finished record
//! plus counters describing how the input lines were classified.

use crate::app::models::ParsedRecord;
use serde::{Deserialize, Serialize};

/// Parsing result with the finished record and its statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Fully populated record
    pub record: ParsedRecord,

    /// Line classification statistics
    pub stats: ParseStats,
}

/// Line classification statistics for one parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Non-empty, non-noise lines seen before the end-of-header sentinel
    pub header_lines: usize,

    /// Header lines that matched no category (counted in `header_lines`)
    pub ignored_header_lines: usize,

    /// XML/SML fragments dropped anywhere in the file
    pub noise_lines: usize,

    /// Rows in the data section
    pub data_rows: usize,

    /// Raw mnemonics with no entry in the variable table
    pub unresolved_variables: Vec<String>,

    /// `# name` declarations whose written index differs from their position
    pub out_of_order_declarations: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of declared variables that resolved, as a percentage
    pub fn resolution_rate(&self, declared_variables: usize) -> f64 {
        if declared_variables == 0 {
            100.0
        } else {
            let resolved = declared_variables.saturating_sub(self.unresolved_variables.len());
            (resolved as f64 / declared_variables as f64) * 100.0
        }
    }

    /// Whether every declared variable resolved
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved_variables.is_empty()
    }
}
