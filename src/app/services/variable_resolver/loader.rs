//! Variable table loading
//!
//! This module builds a [`VariableResolver`] from the JSON table format, either
//! from the copy bundled into the binary or from a user-supplied file.

use super::{VariableMapping, VariableResolver};
use crate::constants::BUNDLED_VARIABLE_TABLE;
use crate::{Error, Result};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Bundled table, decoded on first use
static BUNDLED: OnceLock<std::result::Result<Arc<VariableResolver>, String>> = OnceLock::new();

impl VariableResolver {
    /// Build a resolver from already-decoded mappings
    ///
    /// # Errors
    /// * Returns `Error::VariableTable` if an entry has no aliases or an empty
    ///   canonical name
    pub fn from_mappings(mappings: Vec<VariableMapping>) -> Result<Self> {
        for (index, mapping) in mappings.iter().enumerate() {
            if mapping.aliases.is_empty() {
                return Err(Error::variable_table(format!(
                    "Entry {} ('{}') has no aliases",
                    index, mapping.name
                )));
            }
            if mapping.name.trim().is_empty() {
                return Err(Error::variable_table(format!(
                    "Entry {} has an empty canonical name",
                    index
                )));
            }
        }

        Ok(Self { mappings })
    }

    /// Decode a resolver from the JSON table format
    pub fn from_json_str(content: &str) -> Result<Self> {
        let mappings: Vec<VariableMapping> = serde_json::from_str(content)
            .map_err(|e| Error::variable_table(format!("Invalid variable table JSON: {}", e)))?;

        debug!("Decoded variable table with {} entries", mappings.len());
        Self::from_mappings(mappings)
    }

    /// Load a resolver from a JSON table file
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading variable table from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read variable table {}", path.display()),
                e,
            )
        })?;

        Self::from_json_str(&content)
    }

    /// Shared resolver over the table bundled with the crate
    ///
    /// The table is decoded once per process; later calls return the same `Arc`.
    pub fn bundled() -> Result<Arc<Self>> {
        BUNDLED
            .get_or_init(|| {
                Self::from_json_str(BUNDLED_VARIABLE_TABLE)
                    .map(Arc::new)
                    .map_err(|e| e.to_string())
            })
            .clone()
            .map_err(Error::variable_table)
    }

    /// Load the resolver selected by an optional override path
    pub fn load(table: Option<&Path>) -> Result<Arc<Self>> {
        match table {
            Some(path) => Self::from_file(path).map(Arc::new),
            None => Self::bundled(),
        }
    }
}
