//! Integration tests for the CNV parser against files on disk
//!
//! These tests go through the public API only: source discovery, the bundled
//! variable table, async parsing and Parquet export.

use cnv_processor::app::adapters::source::{CnvSource, SourceReader, discover_sources};
use cnv_processor::app::services::parquet_writer::{parquet_file_name, write_parquet};
use cnv_processor::config::{CnvConfig, CompressionAlgorithm};
use cnv_processor::{Canonical, CnvParser, Error, VariableResolver};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SBE911_CAST: &str = r#"* Sea-Bird SBE 9 Data File:
* FileName = C:\data\cast007.hex
* Software Version Seasave V 7.26.7.107
* Temperature SN = 5083
* Conductivity SN = 3622
* NMEA Latitude = 47 35.50 N
* NMEA Longitude = 122 20.10 W
* <!-- embedded instrument configuration -->
* <Sensor index='0' SensorID='55' >
* </Sensor>
** Ship: R/V Thompson
** Cast: 007
# nquan = 5
# nvalues = 4
# name 0 = prDM: Pressure, Digiquartz [db]
# name 1 = t090C: Temperature [ITS-90, deg C]
# name 2 = c0S/m: Conductivity [S/m]
# name 3 = sbeox0V: Oxygen raw, SBE 43 [V]
# name 4 = xyzzy: Experimental channel
# span 0 =      1.000,      4.000
# start_time = Jun 10 2019 12:00:05 [NMEA time, header]
# bad_flag = -9.990e-29
*END*
      1.000    10.1000   3.500000   2.5000  1.0
      2.000    10.2000   3.510000   2.5100  1.0
      3.000    10.3000   3.520000   2.5200  1.0
      4.000    10.4000   3.530000   2.5300  1.0
"#;

fn bundled_parser() -> CnvParser {
    CnvParser::new(VariableResolver::bundled().unwrap())
}

fn write_cast(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// End-to-end parse of a realistic cast file with the bundled table
#[tokio::test]
async fn test_parse_cast_from_disk_with_bundled_table() {
    let dir = TempDir::new().unwrap();
    let path = write_cast(dir.path(), "cast007.cnv", SBE911_CAST);

    let reader = SourceReader::new(CnvConfig::default().http_timeout()).unwrap();
    let result = bundled_parser()
        .parse_source(&CnvSource::Local(path.clone()), &reader)
        .await
        .unwrap();
    let record = result.record;

    assert_eq!(record.source, path.to_string_lossy());
    assert_eq!(record.variables.len(), 5);
    assert_eq!(record.row_count(), 4);

    // XML fragments never reach the header maps
    assert_eq!(result.stats.noise_lines, 3);
    assert!(record.instrument_headers.keys().all(|key| !key.contains('<')));

    assert_eq!(
        record.canonical_variables[2],
        Canonical::Resolved("conductivity".to_string())
    );
    assert_eq!(record.canonical_variables[4], Canonical::Unresolved);
    assert_eq!(record.units[4], "");
    assert_eq!(result.stats.unresolved_variables, vec!["xyzzy"]);

    assert_eq!(record.column("pressure"), Some(&[1.0, 2.0, 3.0, 4.0][..]));
    assert_eq!(record.column("conductivity").map(<[f64]>::len), Some(4));
    assert!(record.data.values().all(|column| column.len() == 4));

    assert!(record.start_time().is_some());
    assert!(record.nmea_position().is_some());
}

/// Directory discovery feeds the parser one source per file
#[tokio::test]
async fn test_discover_and_parse_directory() {
    let dir = TempDir::new().unwrap();
    write_cast(dir.path(), "a.cnv", SBE911_CAST);
    write_cast(
        dir.path(),
        "b.cnv",
        "* Data File: test\n# name 0 = prDM: Pressure [db]\n*END*\n5.0\n",
    );
    write_cast(dir.path(), "readme.txt", "not a cast");

    let sources = discover_sources(&[dir.path().to_string_lossy().to_string()], "cnv").unwrap();
    assert_eq!(sources.len(), 2);

    let parser = bundled_parser();
    let reader = SourceReader::new(CnvConfig::default().http_timeout()).unwrap();
    for source in &sources {
        let result = parser.parse_source(source, &reader).await.unwrap();
        assert!(result.record.data.contains_key("pressure"));
    }
}

/// A malformed data section fails only its own source
#[tokio::test]
async fn test_malformed_file_does_not_affect_others() {
    let dir = TempDir::new().unwrap();
    let bad = write_cast(
        dir.path(),
        "bad.cnv",
        "# name 0 = prDM: Pressure [db]\n# name 1 = t090C: Temperature [deg C]\n*END*\n1.0 2.0\n3.0\n",
    );
    let good = write_cast(dir.path(), "good.cnv", SBE911_CAST);

    let parser = bundled_parser();
    let reader = SourceReader::new(CnvConfig::default().http_timeout()).unwrap();

    let err = parser
        .parse_source(&CnvSource::Local(bad), &reader)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedDataRow { line: 5, .. }));
    assert!(err.is_per_source());

    assert!(parser.parse_source(&CnvSource::Local(good), &reader).await.is_ok());
}

/// A custom table replaces the bundled mappings entirely
#[test]
fn test_custom_variable_table() {
    let dir = TempDir::new().unwrap();
    let table = write_cast(
        dir.path(),
        "vars.json",
        r#"[{"sbs_variable": ["xyzzy"], "kname": "experimental", "kformat": "%5.2f", "kunits": "V"}]"#,
    );

    let resolver = VariableResolver::load(Some(&table)).unwrap();
    let record = CnvParser::new(resolver)
        .parse_str("cast007.cnv", SBE911_CAST)
        .unwrap()
        .record;

    assert_eq!(record.data.len(), 1);
    assert_eq!(record.column("experimental"), Some(&[1.0, 1.0, 1.0, 1.0][..]));
    assert_eq!(record.canonical_units[4], Canonical::Resolved("V".to_string()));
}

/// Unresolved slots serialize as null and header maps keep their order
#[test]
fn test_record_json_shape() {
    let record = bundled_parser()
        .parse_str("cast007.cnv", SBE911_CAST)
        .unwrap()
        .record;

    let json = serde_json::to_value(&record).unwrap();
    assert!(json["canonical_variables"][4].is_null());
    assert_eq!(json["canonical_variables"][0], "pressure");
    assert_eq!(json["instrument_headers"]["__Temperature_SN"], "5083");

    let back: cnv_processor::ParsedRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back.variables, record.variables);
    assert_eq!(back.canonical_variables, record.canonical_variables);
    assert_eq!(back.instrument_headers, record.instrument_headers);
}

/// Parsed casts export to Parquet next to each other
#[test]
fn test_parquet_export() {
    let dir = TempDir::new().unwrap();
    let record = bundled_parser()
        .parse_str("casts/cast007.cnv", SBE911_CAST)
        .unwrap()
        .record;

    let path = parquet_file_name(&record.source, dir.path());
    let bytes = write_parquet(&record, &path, CompressionAlgorithm::Zstd).unwrap();

    assert_eq!(path, dir.path().join("cast007.parquet"));
    assert!(bytes > 0);
}
