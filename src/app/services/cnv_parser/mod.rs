//! Sea-Bird CNV parser
//!
//! This module turns the lines of a CNV file into a [`ParsedRecord`]. The
//! header block is classified line by line; the data section after `*END*` is
//! assembled into numeric columns keyed by canonical variable names.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Line pass state machine and post-processing
//! - [`header`] - Header line classification into metadata categories
//! - [`declarations`] - `# name` and `# span` declaration parsing
//! - [`line_classifier`] - XML fragment detection and key sanitizing
//! - [`data_section`] - Numeric matrix tokenization
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use cnv_processor::{CnvParser, VariableResolver};
//!
//! # fn main() -> cnv_processor::Result<()> {
//! let parser = CnvParser::new(VariableResolver::bundled()?);
//! let content = "# name 0 = prDM: Pressure [db]\n*END*\n1.0\n2.0\n";
//! let result = parser.parse_str("cast.cnv", content)?;
//!
//! assert_eq!(result.record.column("pressure"), Some(&[1.0, 2.0][..]));
//! assert_eq!(result.stats.data_rows, 2);
//! # Ok(())
//! # }
//! ```
//!
//! [`ParsedRecord`]: crate::app::models::ParsedRecord

pub mod data_section;
pub mod declarations;
pub mod header;
pub mod line_classifier;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header::HeaderLine;
pub use line_classifier::is_noise;
pub use parser::CnvParser;
pub use stats::{ParseResult, ParseStats};
