//! Variable and span declaration parsing
//!
//! CNV files declare each data column with a `# name` line and optionally its
//! observed range with a `# span` line:
//!
//! ```text
//! # name 0 = prDM: Pressure, Digiquartz [db]
//! # span 0 =      1.000,    250.000
//! ```

use regex::Regex;
use std::sync::LazyLock;

static INDEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"# name (\d+)").expect("index pattern is valid"));

static RAW_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"= ([^:]+)").expect("raw name pattern is valid"));

static LONG_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r": ([^\[]+)").expect("long name pattern is valid"));

static UNIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.+?)\]").expect("unit pattern is valid"));

/// One `# name <index> = <raw>: <long name> [<unit>]` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    /// Column index as written in the file (informational only)
    pub index: Option<usize>,

    /// Raw instrument mnemonic (e.g. `prDM`)
    pub raw_name: String,

    /// Human-readable description
    pub long_name: String,

    /// Unit text inside the first bracket pair, empty when absent
    pub unit: String,
}

/// Parse a `# name` declaration line
///
/// Returns `None` when no raw mnemonic can be extracted; such lines are
/// irregular and skipped by the parser.
pub fn parse_name_declaration(line: &str) -> Option<VariableDeclaration> {
    let raw_name = RAW_NAME_PATTERN
        .captures(line)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())?;

    let index = INDEX_PATTERN
        .captures(line)
        .and_then(|caps| caps[1].parse::<usize>().ok());

    let long_name = LONG_NAME_PATTERN
        .captures(line)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();

    let unit = UNIT_PATTERN
        .captures(line)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    Some(VariableDeclaration {
        index,
        raw_name,
        long_name,
        unit,
    })
}

/// Parse a `# span` line into its `[min, max]` pair
///
/// The last two whitespace-separated tokens are kept verbatim as strings.
pub fn parse_span(line: &str) -> Option<[String; 2]> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [.., min, max] => Some([min.to_string(), max.to_string()]),
        _ => None,
    }
}
