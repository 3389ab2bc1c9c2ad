//! Resolve command implementation
//!
//! Prints the canonical mapping for each raw mnemonic given on the command line.

use super::shared::{ProcessingStats, load_resolver, setup_logging};
use crate::app::services::variable_resolver::{VariableMapping, VariableResolver};
use crate::cli::args::{OutputFormat, ResolveArgs};
use anyhow::Context;
use colored::*;
use serde::Serialize;

/// One looked-up name with its mapping, if any
#[derive(Debug, Serialize)]
struct Resolution<'a> {
    raw_name: &'a str,
    name: Option<&'a str>,
    format: Option<&'a str>,
    unit: Option<&'a str>,
}

impl<'a> Resolution<'a> {
    fn new(raw_name: &'a str, mapping: Option<&'a VariableMapping>) -> Self {
        Self {
            raw_name,
            name: mapping.map(|m| m.name.as_str()),
            format: mapping.map(|m| m.format.as_str()),
            unit: mapping.map(|m| m.unit.as_str()),
        }
    }
}

/// Resolve command runner
pub async fn run_resolve(args: ResolveArgs) -> anyhow::Result<ProcessingStats> {
    setup_logging(args.get_log_level(), false)?;

    let resolver = load_resolver(args.variables.as_deref()).context("Failed to load variable table")?;
    let resolutions = resolve_names(&resolver, &args.names);

    match args.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&resolutions).context("Failed to serialize mappings")?
        ),
        OutputFormat::Summary => {
            for resolution in &resolutions {
                match resolution.name {
                    Some(name) => println!(
                        "{} {} -> {} [{}] ({})",
                        "✓".green(),
                        resolution.raw_name.bold(),
                        name,
                        resolution.unit.unwrap_or_default(),
                        resolution.format.unwrap_or_default()
                    ),
                    None => println!(
                        "{} {} -> {}",
                        "✗".red(),
                        resolution.raw_name.bold(),
                        "unresolved".yellow()
                    ),
                }
            }
        }
    }

    let resolved = resolutions.iter().filter(|r| r.name.is_some()).count();
    Ok(ProcessingStats {
        sources_discovered: args.names.len(),
        sources_parsed: resolved,
        unresolved_variables: args.names.len() - resolved,
        ..Default::default()
    })
}

fn resolve_names<'a>(resolver: &'a VariableResolver, names: &'a [String]) -> Vec<Resolution<'a>> {
    names
        .iter()
        .map(|raw_name| Resolution::new(raw_name, resolver.resolve(raw_name)))
        .collect()
}
