//! Variable resolver for canonical Sea-Bird variable names
//!
//! This module maps the raw variable mnemonics declared in CNV headers
//! (e.g. `prDM`, `t090C`, `sbeox0Mm/L`) onto a canonical name, output format
//! and unit. The table is loaded once and treated as immutable; parsers share
//! it through an `Arc`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub mod loader;

#[cfg(test)]
pub mod tests;

/// One entry of the variable table
///
/// Field names on the wire follow the bundled `sbs_variables.json` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableMapping {
    /// Raw mnemonics accepted for this entry
    #[serde(rename = "sbs_variable")]
    pub aliases: HashSet<String>,

    /// Canonical variable name
    #[serde(rename = "kname")]
    pub name: String,

    /// Canonical printf-style output format
    #[serde(rename = "kformat")]
    pub format: String,

    /// Canonical unit string
    #[serde(rename = "kunits")]
    pub unit: String,
}

impl VariableMapping {
    /// Create a mapping from an alias list and a canonical triple
    pub fn new<I, S>(
        aliases: I,
        name: impl Into<String>,
        format: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            name: name.into(),
            format: format.into(),
            unit: unit.into(),
        }
    }

    /// Check whether a raw mnemonic is one of this entry's aliases
    pub fn accepts(&self, raw_name: &str) -> bool {
        self.aliases.contains(raw_name)
    }
}

/// Immutable lookup table from raw mnemonics to canonical variables
///
/// Entries are scanned in table order and the first entry whose alias set
/// contains the raw mnemonic wins.
#[derive(Debug, Clone, Default)]
pub struct VariableResolver {
    pub(crate) mappings: Vec<VariableMapping>,
}

impl VariableResolver {
    /// Look up the canonical mapping for a raw variable mnemonic
    pub fn resolve(&self, raw_name: &str) -> Option<&VariableMapping> {
        self.mappings.iter().find(|mapping| mapping.accepts(raw_name))
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// All entries in table order
    pub fn mappings(&self) -> &[VariableMapping] {
        &self.mappings
    }
}
