//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! the command implementations.

use crate::app::services::variable_resolver::VariableResolver;
use crate::cli::args::ParseArgs;
use crate::config::CnvConfig;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of sources found from the inputs
    pub sources_discovered: usize,
    /// Number of sources parsed successfully
    pub sources_parsed: usize,
    /// Number of sources that could not be read or parsed
    pub sources_failed: usize,
    /// Data rows across all parsed records
    pub data_rows: usize,
    /// Declared variables with no canonical mapping, across all records
    pub unresolved_variables: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
    /// Output file sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
}

impl ProcessingStats {
    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Whether every discovered source failed
    pub fn all_failed(&self) -> bool {
        self.sources_discovered > 0 && self.sources_parsed == 0
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging
///
/// `RUST_LOG` takes precedence over the level derived from the CLI flags.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cnv_processor={}", log_level)));

    let installed = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    installed.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration with the parse command's overrides applied
///
/// Precedence: CLI flags, then the `--config` file (or the user config file),
/// then defaults.
pub fn load_configuration(args: &ParseArgs) -> Result<CnvConfig> {
    let mut config = match &args.config_file {
        Some(path) => CnvConfig::load(path)?,
        None => CnvConfig::load_default()?,
    };

    if let Some(path) = &args.variables {
        config = config.with_variable_table(path.clone());
    }
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_http_timeout_secs(secs);
    }

    config.validate()?;
    Ok(config)
}

/// Load the variable table from `path`, or the bundled table
pub fn load_resolver(path: Option<&Path>) -> Result<Arc<VariableResolver>> {
    let resolver = VariableResolver::load(path)?;
    match path {
        Some(path) => info!(
            "Loaded {} variable mappings from {}",
            resolver.len(),
            path.display()
        ),
        None => info!("Using bundled table with {} variable mappings", resolver.len()),
    }
    Ok(resolver)
}

/// Create a progress bar with consistent styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
