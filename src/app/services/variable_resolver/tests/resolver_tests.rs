//! Tests for variable lookup semantics

use super::super::{VariableMapping, VariableResolver};
use super::create_test_resolver;

#[test]
fn test_resolve_known_alias() {
    let resolver = create_test_resolver();

    let mapping = resolver.resolve("prDM").unwrap();
    assert_eq!(mapping.name, "pressure");
    assert_eq!(mapping.format, "%8.3f");
    assert_eq!(mapping.unit, "dbar");

    // Second alias of the same entry
    assert_eq!(resolver.resolve("prdM").unwrap().name, "pressure");
}

#[test]
fn test_resolve_unknown_returns_none() {
    let resolver = create_test_resolver();
    assert!(resolver.resolve("mystery").is_none());
    assert!(resolver.resolve("").is_none());
}

#[test]
fn test_resolve_is_exact_membership() {
    let resolver = create_test_resolver();

    // No substring or case-insensitive matches
    assert!(resolver.resolve("prD").is_none());
    assert!(resolver.resolve("PRDM").is_none());
    assert!(resolver.resolve("prDM ").is_none());
}

#[test]
fn test_first_matching_entry_wins() {
    let resolver = VariableResolver::from_mappings(vec![
        VariableMapping::new(["t090C"], "temperature", "%8.4f", "degC"),
        VariableMapping::new(["t090C", "t190C"], "temperature_secondary", "%8.4f", "degC"),
    ])
    .unwrap();

    assert_eq!(resolver.resolve("t090C").unwrap().name, "temperature");
    assert_eq!(resolver.resolve("t190C").unwrap().name, "temperature_secondary");
}

#[test]
fn test_empty_resolver() {
    let resolver = VariableResolver::default();
    assert!(resolver.is_empty());
    assert_eq!(resolver.len(), 0);
    assert!(resolver.resolve("prDM").is_none());
}

#[test]
fn test_mapping_accepts() {
    let mapping = VariableMapping::new(["c0S/m", "c0mS/cm"], "conductivity", "%8.6f", "S/m");
    assert!(mapping.accepts("c0S/m"));
    assert!(mapping.accepts("c0mS/cm"));
    assert!(!mapping.accepts("c1S/m"));
}
