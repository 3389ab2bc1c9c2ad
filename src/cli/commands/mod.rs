//! Command implementations for the CNV processor CLI
//!
//! Each command is implemented in its own module:
//! - `parse`: Parse CNV sources and report or export the records
//! - `resolve`: Look up canonical variable mappings

pub mod parse;
pub mod resolve;
pub mod shared;

pub use shared::ProcessingStats;

use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Dispatches to the subcommand handler. Without a subcommand nothing runs.
pub async fn run(args: Args) -> anyhow::Result<ProcessingStats> {
    match args.command {
        Some(Commands::Parse(parse_args)) => parse::run_parse(parse_args).await,
        Some(Commands::Resolve(resolve_args)) => resolve::run_resolve(resolve_args).await,
        None => Ok(ProcessingStats::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_without_command_does_nothing() {
        let stats = run(Args { command: None }).await.unwrap();
        assert_eq!(stats.sources_discovered, 0);
        assert_eq!(stats.total_output_size(), 0);
    }
}
