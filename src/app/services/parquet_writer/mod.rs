//! Parquet export for parsed CNV records
//!
//! A record's resolved sensor columns become one polars `DataFrame` column
//! each, named by canonical variable, in the order the variables were
//! declared. Unresolved variables carry no data and are left out.
//!
//! # Architecture
//!
//! - [`conversion`] - `ParsedRecord` to `DataFrame`
//! - [`writer`] - Parquet file output
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use cnv_processor::app::services::parquet_writer::write_parquet;
//! use cnv_processor::config::CompressionAlgorithm;
//! use cnv_processor::{CnvParser, VariableResolver};
//!
//! # fn main() -> cnv_processor::Result<()> {
//! let parser = CnvParser::new(VariableResolver::bundled()?);
//! let result = parser.parse_str("cast.cnv", "# name 0 = prDM: Pressure [db]\n*END*\n1.0\n")?;
//!
//! let bytes = write_parquet(&result.record, Path::new("cast.parquet"), CompressionAlgorithm::Snappy)?;
//! println!("Wrote {} bytes", bytes);
//! # Ok(())
//! # }
//! ```

pub mod conversion;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use conversion::record_to_dataframe;
pub use writer::{claim_output_path, parquet_file_name, write_parquet};
