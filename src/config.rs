//! Configuration management and validation.
//!
//! Provides configuration structures for source acquisition, concurrency,
//! variable table selection and Parquet export settings. Values are read
//! from an optional TOML file and overridden by command-line flags.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CNV_EXTENSION, DEFAULT_HTTP_TIMEOUT_SECS,
};
use crate::{Error, Result};
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// Main configuration for CNV processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CnvConfig {
    /// Replacement variable table (JSON); the bundled table is used when unset
    pub variable_table: Option<PathBuf>,

    /// HTTP request timeout for remote sources, in seconds
    pub http_timeout_secs: u64,

    /// Maximum number of sources parsed concurrently
    pub workers: usize,

    /// File extension matched when walking input directories
    pub file_extension: String,

    /// Compression used for Parquet export
    pub parquet_compression: CompressionAlgorithm,
}

impl Default for CnvConfig {
    fn default() -> Self {
        Self {
            variable_table: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            workers: num_cpus::get(),
            file_extension: DEFAULT_CNV_EXTENSION.to_string(),
            parquet_compression: CompressionAlgorithm::Snappy,
        }
    }
}

impl CnvConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        config.file_extension = normalize_extension(&config.file_extension);

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the user configuration file if present, otherwise defaults
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Location of the user configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::configuration("workers must be at least 1"));
        }
        if self.http_timeout_secs == 0 {
            return Err(Error::configuration(
                "http_timeout_secs must be greater than 0",
            ));
        }
        if self.file_extension.trim().is_empty() {
            return Err(Error::configuration("file_extension must not be empty"));
        }
        Ok(())
    }

    /// HTTP timeout as a Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Create configuration with a custom variable table
    pub fn with_variable_table(mut self, path: PathBuf) -> Self {
        self.variable_table = Some(path);
        self
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Create configuration with custom HTTP timeout
    pub fn with_http_timeout_secs(mut self, secs: u64) -> Self {
        self.http_timeout_secs = secs;
        self
    }

    /// Configure Parquet compression
    pub fn with_parquet_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.parquet_compression = compression;
        self
    }
}

/// Extension without a leading dot, as `Path::extension` reports it
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_string()
}
