//! Data models for CNV processing
//!
//! This module contains the core data structures for representing a parsed
//! Sea-Bird CNV file: the classified header metadata, the variable declarations
//! and the numeric data columns keyed by canonical variable name.

use crate::constants::header_keys;
use chrono::NaiveDateTime;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Ordered Header Map
// =============================================================================

/// Insertion-ordered string map for header metadata
///
/// Header lines are kept in the order they appear in the file. Inserting an
/// existing key replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, returning the previous value if the key existed
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for HeaderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HeaderMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeaderMapVisitor;

        impl<'de> Visitor<'de> for HeaderMapVisitor {
            type Value = HeaderMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of header strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<HeaderMap, A::Error> {
                let mut map = HeaderMap::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(HeaderMapVisitor)
    }
}

// =============================================================================
// Canonical Resolution Slot
// =============================================================================

/// Result of mapping one declared variable through the variable table
///
/// `Unresolved` is an explicit marker: the parser never guesses a replacement
/// name when the table has no entry for a raw mnemonic. Serialized as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Canonical {
    Resolved(String),
    Unresolved,
}

impl Canonical {
    /// The resolved value, if any
    pub fn as_resolved(&self) -> Option<&str> {
        match self {
            Canonical::Resolved(value) => Some(value),
            Canonical::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Canonical::Resolved(_))
    }
}

// =============================================================================
// Parsed Record
// =============================================================================

/// One parsed CNV file
///
/// Sequences `variables`, `long_names`, `units`, `canonical_variables`,
/// `canonical_formats` and `canonical_units` are parallel: index `i` describes
/// column `i` of the data section. `spans` is appended per `# span` line and
/// may be shorter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecord {
    /// Origin identifier (path or URL)
    pub source: String,

    /// Instrument data file type line (e.g. "Sea-Bird SBE 9 Data File:")
    pub data_file_type: Option<String>,

    /// Seasave acquisition software version line
    pub seasave_version: Option<String>,

    /// `* key = value` lines, keys sanitized
    pub instrument_headers: HeaderMap,

    /// `** key: value` lines, keys sanitized
    pub user_headers: HeaderMap,

    /// `# key = value` lines, keys kept raw
    pub software_headers: HeaderMap,

    /// Raw variable mnemonics in declaration order
    pub variables: Vec<String>,

    /// Long names parallel to `variables`
    pub long_names: Vec<String>,

    /// Declared units parallel to `variables` (empty when absent)
    pub units: Vec<String>,

    /// `[min, max]` span pairs as written in the header
    pub spans: Vec<[String; 2]>,

    /// Canonical names parallel to `variables`
    pub canonical_variables: Vec<Canonical>,

    /// Canonical output formats parallel to `variables`
    pub canonical_formats: Vec<Canonical>,

    /// Canonical units parallel to `variables`
    pub canonical_units: Vec<Canonical>,

    /// Numeric columns keyed by canonical variable name
    pub data: BTreeMap<String, Vec<f64>>,
}

impl ParsedRecord {
    /// Create an empty record for the given origin
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            data_file_type: None,
            seasave_version: None,
            instrument_headers: HeaderMap::new(),
            user_headers: HeaderMap::new(),
            software_headers: HeaderMap::new(),
            variables: Vec::new(),
            long_names: Vec::new(),
            units: Vec::new(),
            spans: Vec::new(),
            canonical_variables: Vec::new(),
            canonical_formats: Vec::new(),
            canonical_units: Vec::new(),
            data: BTreeMap::new(),
        }
    }

    /// Number of data rows (0 when the file has no data section)
    pub fn row_count(&self) -> usize {
        self.data.values().next().map_or(0, Vec::len)
    }

    /// Data column for a canonical variable name
    pub fn column(&self, canonical_name: &str) -> Option<&[f64]> {
        self.data.get(canonical_name).map(Vec::as_slice)
    }

    /// Whether the variable at `index` resolved to a canonical name
    pub fn is_resolved(&self, index: usize) -> bool {
        self.canonical_variables
            .get(index)
            .is_some_and(Canonical::is_resolved)
    }

    /// Raw mnemonics of variables without a canonical mapping
    pub fn unresolved_variables(&self) -> Vec<&str> {
        self.variables
            .iter()
            .zip(&self.canonical_variables)
            .filter(|(_, canonical)| !canonical.is_resolved())
            .map(|(raw, _)| raw.as_str())
            .collect()
    }

    /// Cast start time from the `# start_time` software header
    ///
    /// The value looks like `Jun 10 2019 12:00:00 [NMEA time, header]`; the
    /// bracketed qualifier is ignored.
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        let value = self.software_headers.get(header_keys::START_TIME)?;
        let timestamp = value.split('[').next()?.trim();
        NaiveDateTime::parse_from_str(timestamp, header_keys::START_TIME_FORMAT).ok()
    }

    /// Ship position from the NMEA instrument headers as (latitude, longitude)
    pub fn nmea_position(&self) -> Option<(f64, f64)> {
        let latitude =
            parse_nmea_coordinate(self.instrument_headers.get(header_keys::NMEA_LATITUDE)?)?;
        let longitude =
            parse_nmea_coordinate(self.instrument_headers.get(header_keys::NMEA_LONGITUDE)?)?;
        Some((latitude, longitude))
    }
}

/// Parse an NMEA "degrees minutes hemisphere" string (e.g. "47 35.50 N")
fn parse_nmea_coordinate(value: &str) -> Option<f64> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }

    let degrees = parts[0].parse::<f64>().ok()?;
    let minutes = parts[1].parse::<f64>().ok()?;
    let magnitude = degrees + minutes / 60.0;

    match parts[2] {
        "N" | "E" => Some(magnitude),
        "S" | "W" => Some(-magnitude),
        _ => None,
    }
}
