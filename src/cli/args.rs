//! Command-line argument definitions for the CNV processor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the Sea-Bird CNV processor
///
/// Parses Sea-Bird CNV instrument exports into structured records with
/// canonical variable names, and optionally writes them as JSON or Parquet.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cnv_processor",
    version,
    about = "Parse Sea-Bird CNV files into structured records with canonical variable names",
    long_about = "Reads Sea-Bird CNV exports from local files, directories, glob patterns or \
                  HTTP(S) URLs. The free-form header is classified into instrument, user and \
                  software metadata, raw variable mnemonics are mapped to canonical names, and \
                  the data section is assembled into numeric columns."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse one or more CNV files
    Parse(ParseArgs),
    /// Look up canonical mappings for raw variable mnemonics
    Resolve(ResolveArgs),
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Files, directories, glob patterns or URLs to parse
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<String>,

    /// Output format for parsed records
    #[arg(
        long = "format",
        value_enum,
        default_value = "summary",
        help = "Output format printed to stdout"
    )]
    pub format: OutputFormat,

    /// Write all parsed records as a JSON array to this file
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write all parsed records as JSON to this file"
    )]
    pub output: Option<PathBuf>,

    /// Directory for one Parquet file per parsed record
    ///
    /// Created if it doesn't exist. Files are named after the source file stem.
    #[arg(
        long = "parquet-dir",
        value_name = "DIR",
        help = "Write one Parquet file per record into this directory"
    )]
    pub parquet_dir: Option<PathBuf>,

    /// Replacement variable table (JSON)
    #[arg(
        long = "variables",
        value_name = "FILE",
        help = "Variable mapping table to use instead of the bundled one"
    )]
    pub variables: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/cnv-processor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Number of sources parsed concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of sources parsed concurrently"
    )]
    pub workers: Option<usize>,

    /// HTTP timeout for remote sources in seconds
    #[arg(
        long = "timeout",
        value_name = "SECS",
        help = "HTTP timeout for remote sources in seconds"
    )]
    pub timeout_secs: Option<u64>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the resolve command
#[derive(Debug, Clone, Parser)]
pub struct ResolveArgs {
    /// Raw Sea-Bird mnemonics to look up (e.g. prDM t090C)
    #[arg(value_name = "NAME", required = true, num_args = 1..)]
    pub names: Vec<String>,

    /// Replacement variable table (JSON)
    #[arg(
        long = "variables",
        value_name = "FILE",
        help = "Variable mapping table to use instead of the bundled one"
    )]
    pub variables: Option<PathBuf>,

    /// Output format for mappings
    #[arg(long = "format", value_enum, default_value = "summary")]
    pub format: OutputFormat,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// JSON for scripting
    Json,
}

impl ParseArgs {
    /// Validate the parse command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(Error::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(Error::configuration("Timeout must be greater than 0"));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(parquet_dir) = &self.parquet_dir {
            if parquet_dir.exists() && !parquet_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Parquet output path is not a directory: {}",
                    parquet_dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Get the appropriate log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level_for(self.verbose)
        }
    }

    /// Whether to show a progress bar
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Summary
    }
}

impl ResolveArgs {
    /// Get the appropriate log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        log_level_for(self.verbose)
    }
}

fn log_level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(argv: &[&str]) -> ParseArgs {
        match Args::try_parse_from(argv).unwrap().command {
            Some(Commands::Parse(args)) => args,
            other => panic!("expected parse command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_command_defaults() {
        let args = parse_args(&["cnv_processor", "parse", "cast.cnv"]);

        assert_eq!(args.inputs, vec!["cast.cnv"]);
        assert_eq!(args.format, OutputFormat::Summary);
        assert!(args.output.is_none());
        assert!(args.workers.is_none());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_parse_command_options() {
        let args = parse_args(&[
            "cnv_processor",
            "parse",
            "a.cnv",
            "https://example.org/b.cnv",
            "--format",
            "json",
            "-j",
            "4",
            "--timeout",
            "10",
            "--parquet-dir",
            "out",
        ]);

        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.workers, Some(4));
        assert_eq!(args.timeout_secs, Some(10));
        assert_eq!(args.parquet_dir, Some(PathBuf::from("out")));
        assert!(!args.show_progress());
    }

    #[test]
    fn test_parse_requires_input() {
        assert!(Args::try_parse_from(["cnv_processor", "parse"]).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let args = Args::try_parse_from(["cnv_processor"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["cnv_processor", "parse", "a.cnv", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_validation() {
        let mut args = parse_args(&["cnv_processor", "parse", "a.cnv"]);
        args.workers = Some(0);
        assert!(args.validate().is_err());

        args.workers = Some(2);
        args.timeout_secs = Some(0);
        assert!(args.validate().is_err());

        args.timeout_secs = None;
        args.config_file = Some(PathBuf::from("/nonexistent/config.toml"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = parse_args(&["cnv_processor", "parse", "a.cnv"]);
        assert_eq!(args.get_log_level(), "warn");

        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");
        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");
        args.verbose = 5;
        assert_eq!(args.get_log_level(), "trace");

        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_resolve_command() {
        let args = Args::try_parse_from(["cnv_processor", "resolve", "prDM", "t090C", "-vv"]).unwrap();
        match args.command {
            Some(Commands::Resolve(resolve)) => {
                assert_eq!(resolve.names, vec!["prDM", "t090C"]);
                assert_eq!(resolve.get_log_level(), "debug");
            }
            other => panic!("expected resolve command, got {other:?}"),
        }
    }
}
