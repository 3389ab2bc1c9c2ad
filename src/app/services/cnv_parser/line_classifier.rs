//! Line-level helpers for CNV header classification
//!
//! Some instruments (notably the SBE 56) embed XML/SML tags in the header
//! block, sometimes split across lines by stray carriage returns. Those
//! fragments carry nothing the parser uses and are dropped before any other
//! classification.

use regex::Regex;
use std::sync::LazyLock;

/// Any `<...>` tag on a single line
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("tag pattern is valid"));

/// Any character that is not a letter, digit or underscore
static NON_WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W").expect("non-word pattern is valid"));

/// Check whether a line is a fragment of an embedded XML/SML tag
///
/// A line is noise when it contains a `<...>` tag or ends with a self-closing
/// `/>` once trailing whitespace is stripped.
pub fn is_noise(line: &str) -> bool {
    TAG_PATTERN.is_match(line) || line.trim_end().ends_with("/>")
}

/// Replace every character outside letters, digits and `_` with `_`
pub fn sanitize_key(key: &str) -> String {
    NON_WORD_PATTERN.replace_all(key, "_").into_owned()
}

/// Drop the first `width` characters of a line
///
/// Character-based so multi-byte header text never splits a code point.
pub fn strip_marker(line: &str, width: usize) -> &str {
    match line.char_indices().nth(width) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}
