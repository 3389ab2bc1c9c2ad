//! Line source acquisition for CNV files
//!
//! Sources are either local paths or HTTP(S) URLs. Content is read completely
//! before parsing starts, and any failure to obtain it is reported as
//! `Error::SourceUnavailable` so the parser itself never sees I/O errors.

use crate::config::normalize_extension;
use crate::constants::REMOTE_PREFIXES;
use crate::{Error, Result};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Where a CNV file comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CnvSource {
    /// File on local disk
    Local(PathBuf),
    /// HTTP(S) URL
    Remote(String),
}

impl CnvSource {
    /// Build a source from a path or URL string
    ///
    /// Identifiers starting with `http://` or `https://` are remote.
    pub fn from_identifier(identifier: &str) -> Self {
        if REMOTE_PREFIXES
            .iter()
            .any(|prefix| identifier.starts_with(prefix))
        {
            CnvSource::Remote(identifier.to_string())
        } else {
            CnvSource::Local(PathBuf::from(identifier))
        }
    }

    /// Identifier recorded as the parsed record's source
    pub fn identifier(&self) -> Cow<'_, str> {
        match self {
            CnvSource::Local(path) => path.to_string_lossy(),
            CnvSource::Remote(url) => Cow::Borrowed(url),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, CnvSource::Remote(_))
    }
}

/// Reads complete sources into lines
#[derive(Debug, Clone)]
pub struct SourceReader {
    client: reqwest::Client,
}

impl SourceReader {
    /// Create a reader whose HTTP requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Read every line of a source
    ///
    /// Bytes that are not valid UTF-8 (Seasoft writes some headers in
    /// Windows-1252) are replaced rather than rejected.
    ///
    /// # Errors
    /// * Returns `Error::SourceUnavailable` if the file cannot be read, the
    ///   request fails, or the server answers with a non-success status
    pub async fn read_lines(&self, source: &CnvSource) -> Result<Vec<String>> {
        let bytes = match source {
            CnvSource::Local(path) => Self::read_local(path).await?,
            CnvSource::Remote(url) => self.fetch_remote(url).await?,
        };

        let content = String::from_utf8_lossy(&bytes);
        let lines: Vec<String> = content.lines().map(str::to_string).collect();
        debug!("Read {} lines from {}", lines.len(), source.identifier());
        Ok(lines)
    }

    async fn read_local(path: &Path) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|e| Error::source_unavailable(path.to_string_lossy(), e.to_string()))
    }

    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>> {
        info!("Fetching CNV file: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::source_unavailable(url, format!("request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| Error::source_unavailable(url, format!("bad response: {}", e)))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::source_unavailable(url, format!("failed to read body: {}", e)))?;

        Ok(body.to_vec())
    }
}

/// Expand command-line inputs into individual sources
///
/// URLs pass through unchanged, directories are walked for files with the
/// given extension, glob patterns are expanded, and anything else is taken as
/// a single path (a missing file surfaces later as `SourceUnavailable`).
pub fn discover_sources(inputs: &[String], extension: &str) -> Result<Vec<CnvSource>> {
    let extension = normalize_extension(extension);
    let extension = extension.as_str();
    let mut sources = Vec::new();

    for input in inputs {
        let source = CnvSource::from_identifier(input);
        if source.is_remote() {
            sources.push(source);
            continue;
        }

        let path = Path::new(input);
        if path.is_dir() {
            let found = walk_directory(path, extension)?;
            if found.is_empty() {
                warn!("No .{} files found under {}", extension, path.display());
            }
            sources.extend(found.into_iter().map(CnvSource::Local));
        } else if is_glob_pattern(input) {
            let pattern = glob::glob(input).map_err(|e| {
                Error::configuration(format!("Invalid glob pattern '{}': {}", input, e))
            })?;
            for entry in pattern {
                match entry {
                    Ok(path) if path.is_file() => sources.push(CnvSource::Local(path)),
                    Ok(_) => {}
                    Err(e) => warn!("Skipping unreadable glob match: {}", e),
                }
            }
        } else {
            sources.push(source);
        }
    }

    debug!("Discovered {} sources from {} inputs", sources.len(), inputs.len());
    Ok(sources)
}

/// All files under `root` whose extension matches, sorted by path
fn walk_directory(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| {
            Error::directory_traversal(format!("Failed to walk {}", root.display()), e)
        })?;

        let matches_extension = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

        if entry.file_type().is_file() && matches_extension {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}
