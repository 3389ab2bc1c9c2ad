//! Core CNV parser implementation
//!
//! This module provides the parser orchestration: a single forward pass over
//! the input lines that classifies the header block, buffers the data section
//! and finally resolves variables and assembles the numeric columns.

use std::sync::Arc;
use tracing::{debug, info, trace, warn};

use super::data_section::{DataRow, build_columns};
use super::header::HeaderLine;
use super::line_classifier::is_noise;
use super::stats::{ParseResult, ParseStats};
use crate::Result;
use crate::app::adapters::source::{CnvSource, SourceReader};
use crate::app::models::{Canonical, ParsedRecord};
use crate::app::services::variable_resolver::VariableResolver;
use crate::constants::markers;

/// Position of the parser within the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    InHeader,
    InData,
}

/// CNV parser for Sea-Bird instrument exports
///
/// The parser holds no per-file state; every call builds an independent
/// record, so one instance can serve many files and threads.
#[derive(Debug, Clone)]
pub struct CnvParser {
    resolver: Arc<VariableResolver>,
}

impl CnvParser {
    /// Create a new parser with variable resolver dependency
    pub fn new(resolver: Arc<VariableResolver>) -> Self {
        Self { resolver }
    }

    /// The variable resolver used for canonical names
    pub fn resolver(&self) -> &VariableResolver {
        &self.resolver
    }

    /// Fetch a source and parse its content
    ///
    /// # Errors
    /// * Returns `Error::SourceUnavailable` if the file or URL cannot be read;
    ///   nothing is parsed in that case
    /// * Returns `Error::MalformedDataRow` if the data section is not a
    ///   rectangular numeric matrix covering the declared variables
    pub async fn parse_source(
        &self,
        source: &CnvSource,
        reader: &SourceReader,
    ) -> Result<ParseResult> {
        let lines = reader.read_lines(source).await?;
        self.parse_lines(&source.identifier(), lines)
    }

    /// Parse CNV content held in memory
    pub fn parse_str(&self, origin: &str, content: &str) -> Result<ParseResult> {
        self.parse_lines(origin, content.lines())
    }

    /// Parse a sequence of CNV lines
    ///
    /// `origin` is recorded as the record's source and used in error messages.
    pub fn parse_lines<I, S>(&self, origin: &str, lines: I) -> Result<ParseResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        info!("Parsing CNV source: {}", origin);

        let mut record = ParsedRecord::new(origin);
        let mut stats = ParseStats::new();
        let mut state = ParseState::InHeader;
        let mut data_rows: Vec<DataRow> = Vec::new();

        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim();

            if is_noise(line) {
                trace!("Dropping tag fragment at line {}: {}", index + 1, line);
                stats.noise_lines += 1;
                continue;
            }

            if line.starts_with(markers::END_OF_HEADER) {
                if state == ParseState::InHeader {
                    debug!(
                        "End of header at line {} after {} header lines",
                        index + 1,
                        stats.header_lines
                    );
                }
                state = ParseState::InData;
                continue;
            }

            match state {
                ParseState::InHeader => {
                    if line.is_empty() {
                        continue;
                    }
                    stats.header_lines += 1;

                    let header_line = HeaderLine::classify(line);
                    if let HeaderLine::Variable(declaration) = &header_line {
                        if declaration.index != Some(record.variables.len()) {
                            stats.out_of_order_declarations += 1;
                        }
                    }
                    if !header_line.apply(&mut record) {
                        trace!("Ignoring header line {}: {}", index + 1, line);
                        stats.ignored_header_lines += 1;
                    }
                }
                ParseState::InData => {
                    if !line.is_empty() {
                        data_rows.push(DataRow {
                            line_number: index + 1,
                            text: line.to_string(),
                        });
                    }
                }
            }
        }

        self.resolve_variables(&mut record, &mut stats);

        stats.data_rows = data_rows.len();
        if !data_rows.is_empty() {
            let columns = build_columns(origin, &data_rows, record.variables.len())?;
            Self::assign_columns(&mut record, columns);
        }

        info!(
            "Parsed {} variables and {} data rows from {}",
            record.variables.len(),
            stats.data_rows,
            origin
        );

        Ok(ParseResult { record, stats })
    }

    /// Map every declared variable through the resolver
    fn resolve_variables(&self, record: &mut ParsedRecord, stats: &mut ParseStats) {
        for raw_name in &record.variables {
            match self.resolver.resolve(raw_name) {
                Some(mapping) => {
                    record
                        .canonical_variables
                        .push(Canonical::Resolved(mapping.name.clone()));
                    record
                        .canonical_formats
                        .push(Canonical::Resolved(mapping.format.clone()));
                    record
                        .canonical_units
                        .push(Canonical::Resolved(mapping.unit.clone()));
                }
                None => {
                    warn!(
                        "No canonical mapping for variable '{}' in {}",
                        raw_name, record.source
                    );
                    record.canonical_variables.push(Canonical::Unresolved);
                    record.canonical_formats.push(Canonical::Unresolved);
                    record.canonical_units.push(Canonical::Unresolved);
                    stats.unresolved_variables.push(raw_name.clone());
                }
            }
        }
    }

    /// Store columns under their canonical names, skipping unresolved slots
    fn assign_columns(record: &mut ParsedRecord, columns: Vec<Vec<f64>>) {
        for (canonical, column) in record.canonical_variables.iter().zip(columns) {
            let Some(name) = canonical.as_resolved() else {
                continue;
            };
            if record.data.insert(name.to_string(), column).is_some() {
                warn!(
                    "Canonical variable '{}' declared more than once in {}; keeping the later column",
                    name, record.source
                );
            }
        }
    }
}
