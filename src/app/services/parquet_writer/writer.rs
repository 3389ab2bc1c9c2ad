//! Parquet file output

use super::conversion::record_to_dataframe;
use crate::app::models::ParsedRecord;
use crate::config::CompressionAlgorithm;
use crate::{Error, Result};
use polars::prelude::ParquetWriter;
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write a record's resolved columns to a Parquet file
///
/// Returns the size of the written file in bytes.
///
/// # Errors
/// * Returns `Error::Io` if the file cannot be created
/// * Returns `Error::ParquetWriting` if polars fails to encode the frame
pub fn write_parquet(
    record: &ParsedRecord,
    path: &Path,
    compression: CompressionAlgorithm,
) -> Result<u64> {
    let mut df = record_to_dataframe(record)?;

    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

    ParquetWriter::new(file)
        .with_compression(compression.to_polars_compression())
        .finish(&mut df)
        .map_err(|e| {
            Error::parquet_writing(
                format!("Failed to write parquet file {}", path.display()),
                Box::new(e),
            )
        })?;

    let bytes = std::fs::metadata(path)
        .map_err(|e| Error::io(format!("Failed to stat {}", path.display()), e))?
        .len();

    info!(
        "Wrote {} columns x {} rows to {} ({} bytes)",
        df.width(),
        df.height(),
        path.display(),
        bytes
    );

    Ok(bytes)
}

/// Output path for a record inside `output_dir`
///
/// The file stem of the source (local path or URL) is kept and the extension
/// replaced with `.parquet`.
pub fn parquet_file_name(source: &str, output_dir: &Path) -> PathBuf {
    let last_segment = source
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(source);

    let stem = Path::new(last_segment)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("record");

    output_dir.join(format!("{}.parquet", stem))
}

/// Claim `path`, or the first free `<stem>-<n>.parquet` next to it
///
/// `used` holds the paths already written in this run; the returned path is
/// added to it.
pub fn claim_output_path(path: PathBuf, used: &mut HashSet<PathBuf>) -> PathBuf {
    if used.insert(path.clone()) {
        return path;
    }

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("record")
        .to_string();

    let mut n = 2;
    loop {
        let candidate = path.with_file_name(format!("{}-{}.parquet", stem, n));
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
