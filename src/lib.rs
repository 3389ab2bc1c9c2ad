//! CNV Processor Library
//!
//! A Rust library for reading Sea-Bird CNV instrument exports into structured
//! records: classified header metadata plus numeric sensor columns keyed by
//! canonical variable names.
//!
//! This library provides tools for:
//! - Classifying the free-form CNV header block (instrument, user and software
//!   metadata plus variable declarations)
//! - Filtering malformed XML fragments that some instruments embed in headers
//! - Resolving raw Sea-Bird variable mnemonics to canonical names, formats and units
//! - Assembling the data section into equal-length numeric columns
//! - Fetching sources from local disk or over HTTP(S)
//! - Exporting parsed records to Parquet

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod cnv_parser;
        pub mod parquet_writer;
        pub mod variable_resolver;
    }
    pub mod adapters {
        pub mod source;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Canonical, HeaderMap, ParsedRecord};
pub use app::services::cnv_parser::{CnvParser, ParseResult, ParseStats};
pub use app::services::variable_resolver::{VariableMapping, VariableResolver};
pub use config::CnvConfig;

/// Result type alias for the CNV processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for CNV processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The line source could not be opened or fetched
    #[error("Source unavailable '{origin}': {reason}")]
    SourceUnavailable { origin: String, reason: String },

    /// A data row did not tokenize into the expected numeric fields
    #[error("Malformed data row in '{origin}' at line {line}: {reason}")]
    MalformedDataRow {
        origin: String,
        line: usize,
        reason: String,
    },

    /// Variable mapping table could not be loaded
    #[error("Variable table error: {message}")]
    VariableTable { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Parquet writing error
    #[error("Parquet writing error: {message}")]
    ParquetWriting {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a source unavailable error
    pub fn source_unavailable(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed data row error
    pub fn malformed_data_row(
        origin: impl Into<String>,
        line: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedDataRow {
            origin: origin.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create a variable table error
    pub fn variable_table(message: impl Into<String>) -> Self {
        Self::VariableTable {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a Parquet writing error
    pub fn parquet_writing(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::ParquetWriting {
            message: message.into(),
            source,
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether this error aborted parsing of a single source
    ///
    /// Used by batch commands to keep going after a bad file.
    pub fn is_per_source(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable { .. } | Self::MalformedDataRow { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::ParquetWriting {
            message: "Polars operation failed".to_string(),
            source: Box::new(error),
        }
    }
}
