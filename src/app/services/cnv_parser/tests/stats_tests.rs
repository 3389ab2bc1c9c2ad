//! Tests for parsing statistics

use super::super::stats::ParseStats;

#[test]
fn test_new_stats_are_empty() {
    let stats = ParseStats::new();
    assert_eq!(stats.header_lines, 0);
    assert_eq!(stats.noise_lines, 0);
    assert_eq!(stats.data_rows, 0);
    assert!(stats.is_fully_resolved());
}

#[test]
fn test_resolution_rate() {
    let mut stats = ParseStats::new();
    assert_eq!(stats.resolution_rate(0), 100.0);
    assert_eq!(stats.resolution_rate(4), 100.0);

    stats.unresolved_variables.push("mystery".to_string());
    assert_eq!(stats.resolution_rate(4), 75.0);
    assert!(!stats.is_fully_resolved());
}

#[test]
fn test_stats_serialize() {
    let mut stats = ParseStats::new();
    stats.data_rows = 12;
    stats.unresolved_variables.push("v9".to_string());

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["data_rows"], 12);
    assert_eq!(json["unresolved_variables"][0], "v9");
}
