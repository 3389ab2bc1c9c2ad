//! CNV header line classification
//!
//! Each header line is sorted into one of the metadata categories by its
//! prefix. The grammar is irregular across instruments, so anything that fits
//! no category is reported as [`HeaderLine::Ignored`] rather than an error.

use super::declarations::{VariableDeclaration, parse_name_declaration, parse_span};
use super::line_classifier::{sanitize_key, strip_marker};
use crate::app::models::ParsedRecord;
use crate::constants::{markers, single_values};
use tracing::{debug, trace};

/// Classification of one trimmed, non-noise header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderLine {
    /// `* key = value`
    Instrument { key: String, value: String },
    /// `* ... Data File ...`
    DataFileType(String),
    /// `* ... Seasave ...`
    SeasaveVersion(String),
    /// `** key: value`
    User { key: String, value: String },
    /// `# name <index> = <raw>: <long name> [<unit>]`
    Variable(VariableDeclaration),
    /// `# span ... <min> <max>`
    Span([String; 2]),
    /// `# key = value`
    Software { key: String, value: String },
    /// Blank, unrecognized or irregular line
    Ignored,
}

impl HeaderLine {
    /// Classify a trimmed header line
    pub fn classify(line: &str) -> Self {
        if line.starts_with(markers::INSTRUMENT) {
            classify_instrument(line)
        } else if line.starts_with(markers::USER) {
            classify_user(line)
        } else if line.starts_with(markers::SOFTWARE) {
            classify_software(line)
        } else {
            HeaderLine::Ignored
        }
    }

    /// Store this line's content in the record
    ///
    /// Returns `false` when the line contributed nothing.
    pub fn apply(self, record: &mut ParsedRecord) -> bool {
        match self {
            HeaderLine::Instrument { key, value } => {
                record.instrument_headers.insert(key, value);
            }
            HeaderLine::DataFileType(value) => {
                set_once(&mut record.data_file_type, value, "data file type");
            }
            HeaderLine::SeasaveVersion(value) => {
                set_once(&mut record.seasave_version, value, "Seasave version");
            }
            HeaderLine::User { key, value } => {
                record.user_headers.insert(key, value);
            }
            HeaderLine::Variable(declaration) => {
                record.variables.push(declaration.raw_name);
                record.long_names.push(declaration.long_name);
                record.units.push(declaration.unit);
            }
            HeaderLine::Span(span) => {
                record.spans.push(span);
            }
            HeaderLine::Software { key, value } => {
                record.software_headers.insert(key, value);
            }
            HeaderLine::Ignored => return false,
        }
        true
    }
}

fn classify_instrument(line: &str) -> HeaderLine {
    if let Some((key, value)) = line.split_once('=') {
        HeaderLine::Instrument {
            key: sanitize_key(key.trim()),
            value: value.trim().to_string(),
        }
    } else if line.contains(single_values::DATA_FILE) {
        HeaderLine::DataFileType(single_value(line))
    } else if line.contains(single_values::SEASAVE) {
        HeaderLine::SeasaveVersion(single_value(line))
    } else {
        HeaderLine::Ignored
    }
}

fn classify_user(line: &str) -> HeaderLine {
    // Everything after the first colon is the value, inner colons included
    let (left, value) = line.split_once(':').unwrap_or((line, ""));
    HeaderLine::User {
        key: sanitize_key(strip_marker(left, markers::USER_MARKER_WIDTH).trim()),
        value: value.trim().to_string(),
    }
}

fn classify_software(line: &str) -> HeaderLine {
    if line.contains(markers::NAME_DECLARATION) {
        match parse_name_declaration(line) {
            Some(declaration) => HeaderLine::Variable(declaration),
            None => {
                debug!("Skipping irregular variable declaration: {}", line);
                HeaderLine::Ignored
            }
        }
    } else if line.contains(markers::SPAN_DECLARATION) {
        parse_span(line).map_or(HeaderLine::Ignored, HeaderLine::Span)
    } else if let Some((key, value)) = line.split_once('=') {
        HeaderLine::Software {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        }
    } else {
        HeaderLine::Ignored
    }
}

/// Text of a single-value instrument line without its `* ` marker
fn single_value(line: &str) -> String {
    strip_marker(line, markers::INSTRUMENT_MARKER_WIDTH)
        .trim()
        .to_string()
}

fn set_once(slot: &mut Option<String>, value: String, what: &str) {
    if slot.is_none() {
        *slot = Some(value);
    } else {
        trace!("Ignoring repeated {} line: {}", what, value);
    }
}
