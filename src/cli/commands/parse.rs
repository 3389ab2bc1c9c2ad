//! Parse command implementation
//!
//! Discovers sources from the command-line inputs, parses them concurrently,
//! and reports or exports the resulting records.

use super::shared::{
    ProcessingStats, create_progress_bar, load_configuration, load_resolver, setup_logging,
};
use crate::app::adapters::source::{CnvSource, SourceReader, discover_sources};
use crate::app::models::ParsedRecord;
use crate::app::services::cnv_parser::{CnvParser, ParseResult};
use crate::app::services::parquet_writer::{claim_output_path, parquet_file_name, write_parquet};
use crate::cli::args::{OutputFormat, ParseArgs};
use crate::config::CnvConfig;
use crate::{Error, Result};
use anyhow::Context;
use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::HumanDuration;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

/// Outcome of parsing one source
struct SourceOutcome {
    identifier: String,
    result: Result<ParseResult>,
}

/// Parse command runner
///
/// Per-source failures (unreachable sources, malformed data) are reported and
/// counted; the command only fails when no source could be parsed or when an
/// output cannot be written.
pub async fn run_parse(args: ParseArgs) -> anyhow::Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;
    info!("Starting CNV processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args).context("Failed to load configuration")?;
    debug!("Loaded configuration: {:?}", config);

    let resolver =
        load_resolver(config.variable_table.as_deref()).context("Failed to load variable table")?;
    let sources = discover_sources(&args.inputs, &config.file_extension)?;
    if sources.is_empty() {
        anyhow::bail!("No CNV sources found in {}", args.inputs.join(", "));
    }

    let mut stats = ProcessingStats {
        sources_discovered: sources.len(),
        ..Default::default()
    };

    let outcomes = parse_all(&sources, CnvParser::new(resolver), &config, &args).await?;

    let mut records = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome.result {
            Ok(result) => {
                stats.sources_parsed += 1;
                stats.data_rows += result.stats.data_rows;
                stats.unresolved_variables += result.stats.unresolved_variables.len();
                if args.format == OutputFormat::Summary && !args.quiet {
                    print_record_summary(&result);
                }
                records.push(result.record);
            }
            Err(e) if e.is_per_source() => {
                error!("Failed to parse {}: {:#}", outcome.identifier, e);
                stats.sources_failed += 1;
                if !args.quiet {
                    println!("{} {}", "✗".red(), e);
                }
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to parse {}", outcome.identifier));
            }
        }
    }

    if let Some(parquet_dir) = &args.parquet_dir {
        export_parquet(&records, parquet_dir, &config, &mut stats)?;
    }

    if let Some(output) = &args.output {
        write_json_file(&records, output)?;
        info!("Wrote {} records to {}", records.len(), output.display());
    }

    if args.format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&records).context("Failed to serialize records")?
        );
    }

    stats.processing_time = start_time.elapsed();
    if args.format == OutputFormat::Summary && !args.quiet {
        print_processing_summary(&stats);
    }

    if stats.all_failed() {
        anyhow::bail!("All {} sources failed to parse", stats.sources_discovered);
    }

    Ok(stats)
}

/// Parse every source with bounded concurrency, returning outcomes in input order
async fn parse_all(
    sources: &[CnvSource],
    parser: CnvParser,
    config: &CnvConfig,
    args: &ParseArgs,
) -> Result<Vec<SourceOutcome>> {
    let reader = SourceReader::new(config.http_timeout())?;
    let pb = create_progress_bar(sources.len() as u64, "Parsing CNV files");
    if !args.show_progress() || sources.len() < 2 {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let parser = &parser;
    let reader = &reader;
    let pb_ref = &pb;

    let mut outcomes: Vec<(usize, SourceOutcome)> = stream::iter(sources.iter().enumerate())
        .map(|(index, source)| async move {
            let result = parser.parse_source(source, reader).await;
            pb_ref.inc(1);
            (
                index,
                SourceOutcome {
                    identifier: source.identifier().into_owned(),
                    result,
                },
            )
        })
        .buffer_unordered(config.workers)
        .collect()
        .await;

    pb.finish_and_clear();
    outcomes.sort_by_key(|(index, _)| *index);
    Ok(outcomes.into_iter().map(|(_, outcome)| outcome).collect())
}

/// Write one Parquet file per record into `parquet_dir`
///
/// Sources sharing a file stem get numbered names instead of overwriting
/// each other.
fn export_parquet(
    records: &[ParsedRecord],
    parquet_dir: &Path,
    config: &CnvConfig,
    stats: &mut ProcessingStats,
) -> Result<()> {
    std::fs::create_dir_all(parquet_dir).map_err(|e| {
        Error::io(
            format!("Failed to create output directory {}", parquet_dir.display()),
            e,
        )
    })?;

    let mut used = HashSet::with_capacity(records.len());
    for record in records {
        let path = claim_output_path(parquet_file_name(&record.source, parquet_dir), &mut used);
        let bytes = write_parquet(record, &path, config.parquet_compression)?;
        stats
            .output_sizes
            .push((path.display().to_string(), bytes));
    }

    Ok(())
}

fn write_json_file(records: &[ParsedRecord], path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)
        .map_err(|e| Error::serialization(format!("Failed to write {}", path.display()), e))
}

fn print_record_summary(result: &ParseResult) {
    let record = &result.record;
    let unresolved = result.stats.unresolved_variables.len();

    println!(
        "{} {} ({} variables, {} rows)",
        "✓".green(),
        record.source.bold(),
        record.variables.len(),
        record.row_count()
    );
    if let Some(file_type) = &record.data_file_type {
        println!("   • {}", file_type);
    }
    if let Some(start) = record.start_time() {
        println!("   • Start time: {}", start);
    }
    if let Some((lat, lon)) = record.nmea_position() {
        println!("   • Position: {:.4}, {:.4}", lat, lon);
    }
    if unresolved > 0 {
        println!(
            "   • {} {}",
            "Unresolved:".yellow(),
            result.stats.unresolved_variables.join(", ")
        );
    }
}

fn print_processing_summary(stats: &ProcessingStats) {
    println!("\n{}", "CNV Processing Complete".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   • Sources parsed: {}/{}", stats.sources_parsed, stats.sources_discovered);
    println!("   • Data rows: {}", stats.data_rows);
    if stats.unresolved_variables > 0 {
        println!(
            "   • {} {}",
            "Unresolved variables:".yellow(),
            stats.unresolved_variables
        );
    }
    if stats.sources_failed > 0 {
        println!("   • {} {}", "Failed:".red(), stats.sources_failed);
    }
    if !stats.output_sizes.is_empty() {
        println!(
            "   • Parquet output: {} files, {}",
            stats.output_sizes.len(),
            ProcessingStats::format_size(stats.total_output_size())
        );
    }
    println!("   • Processing time: {}", HumanDuration(stats.processing_time));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{Args, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn parse_args(argv: &[&str]) -> ParseArgs {
        match Args::try_parse_from(argv).unwrap().command {
            Some(Commands::Parse(args)) => args,
            other => panic!("expected parse command, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_parse_all_keeps_input_order_and_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.cnv");
        let bad = dir.path().join("bad.cnv");
        fs::write(&good, "# name 0 = prDM: Pressure [db]\n*END*\n1.0\n").unwrap();
        fs::write(&bad, "# name 0 = prDM: Pressure [db]\n*END*\nabc\n").unwrap();

        let sources = vec![
            CnvSource::Local(bad.clone()),
            CnvSource::Local(dir.path().join("missing.cnv")),
            CnvSource::Local(good.clone()),
        ];
        let args = parse_args(&["cnv_processor", "parse", "x", "-q"]);
        let config = CnvConfig::default().with_workers(2);
        let parser = CnvParser::new(load_resolver(None).unwrap());

        let outcomes = parse_all(&sources, parser, &config, &args).await.unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(matches!(
            outcomes[0].result,
            Err(Error::MalformedDataRow { line: 3, .. })
        ));
        assert!(matches!(
            outcomes[1].result,
            Err(Error::SourceUnavailable { .. })
        ));
        assert!(outcomes[2].result.is_ok());
        assert_eq!(outcomes[2].identifier, good.to_string_lossy());
    }

    #[test]
    fn test_export_parquet_records_sizes() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("parquet");
        let parser = CnvParser::new(load_resolver(None).unwrap());
        let record = parser
            .parse_str("casts/cast1.cnv", "# name 0 = prDM: Pressure [db]\n*END*\n1.0\n2.0\n")
            .unwrap()
            .record;

        let mut stats = ProcessingStats::default();
        export_parquet(&[record], &out, &CnvConfig::default(), &mut stats).unwrap();

        assert_eq!(stats.output_sizes.len(), 1);
        assert!(out.join("cast1.parquet").exists());
        assert!(stats.total_output_size() > 0);
    }

    #[test]
    fn test_export_parquet_keeps_records_with_same_file_stem() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("parquet");
        let parser = CnvParser::new(load_resolver(None).unwrap());
        let records: Vec<ParsedRecord> = [("leg1/cast1.cnv", "1.0\n"), ("leg2/cast1.cnv", "2.0\n3.0\n")]
            .into_iter()
            .map(|(source, rows)| {
                let content = format!("# name 0 = prDM: Pressure [db]\n*END*\n{}", rows);
                parser.parse_str(source, &content).unwrap().record
            })
            .collect();

        let mut stats = ProcessingStats::default();
        export_parquet(&records, &out, &CnvConfig::default(), &mut stats).unwrap();

        let first = out.join("cast1.parquet");
        let second = out.join("cast1-2.parquet");
        assert!(first.exists());
        assert!(second.exists());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 2);

        let paths: Vec<&str> = stats.output_sizes.iter().map(|(path, _)| path.as_str()).collect();
        assert_eq!(
            paths,
            vec![first.display().to_string(), second.display().to_string()]
        );
    }

    #[test]
    fn test_write_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        let record = ParsedRecord::new("a.cnv");

        write_json_file(&[record], &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["source"], "a.cnv");
    }
}
