//! Test utilities for variable resolver testing

use super::{VariableMapping, VariableResolver};

mod resolver_tests;

/// Small table covering the mnemonics used across parser tests
pub fn create_test_resolver() -> VariableResolver {
    VariableResolver::from_mappings(vec![
        VariableMapping::new(["prDM", "prdM"], "pressure", "%8.3f", "dbar"),
        VariableMapping::new(["t090C", "t068C"], "temperature", "%8.4f", "degC"),
        VariableMapping::new(["sal00"], "salinity", "%8.4f", "PSU"),
        VariableMapping::new(["t190C"], "temperature2", "%8.4f", "degC"),
    ])
    .unwrap()
}

/// Minimal JSON table in the bundled layout
pub fn create_test_table_json() -> String {
    r#"[
  {"sbs_variable": ["prDM", "prdM"], "kname": "pressure", "kformat": "%8.3f", "kunits": "dbar"},
  {"sbs_variable": ["sbeox0Mm/L"], "kname": "oxygen_umol", "kformat": "%8.3f", "kunits": "umol/L"}
]"#
    .to_string()
}
