//! Test utilities and fixtures for CNV parser testing
//!
//! This module provides common fixtures and helper functions used across
//! the parser test modules.

use std::sync::Arc;

use super::parser::CnvParser;
use crate::app::services::variable_resolver::{VariableMapping, VariableResolver};

mod stats_tests;

/// Resolver covering the mnemonics used in the fixtures
pub fn create_test_resolver() -> Arc<VariableResolver> {
    Arc::new(
        VariableResolver::from_mappings(vec![
            VariableMapping::new(["prDM", "prdM"], "pressure", "%8.3f", "dbar"),
            VariableMapping::new(["t090C"], "temperature", "%8.4f", "degC"),
            VariableMapping::new(["sal00"], "salinity", "%8.4f", "PSU"),
            VariableMapping::new(["flag"], "flag", "%1.0f", ""),
        ])
        .unwrap(),
    )
}

/// Parser over the test resolver
pub fn create_test_parser() -> CnvParser {
    CnvParser::new(create_test_resolver())
}

/// The worked example from the format documentation
pub fn create_minimal_cnv() -> String {
    "* Data File: test\n\
     * Seasave V1\n\
     # name 0 = prDM: Pressure [db]\n\
     # span 0 = 1 0.0 10.0\n\
     *END*\n\
     0.0 1.0\n\
     5.0 2.0\n\
     10.0 3.0\n"
        .to_string()
}

/// A realistic SBE 911plus header with every line category represented
pub fn create_test_cnv() -> String {
    r#"* Sea-Bird SBE 9 Data File:
* FileName = C:\data\cast042.hex
* Software Version Seasave V 7.26.7.107
* Temperature SN = 5083
* Conductivity SN = 3622
* System UpLoad Time = Jun 10 2019 12:00:00
* NMEA Latitude = 47 35.50 N
* NMEA Longitude = 122 20.10 W
* System UTC = Jun 10 2019 12:00:05
** Ship: R/V Thompson
** Station: 42
** Cast time: 12:00:05 UTC
** Operator:
* ds
# nquan = 4
# nvalues = 3
# units = specified
# name 0 = prDM: Pressure, Digiquartz [db]
# name 1 = t090C: Temperature [ITS-90, deg C]
# name 2 = sal00: Salinity, Practical [PSU]
# name 3 = flag:  0.000e+00
# span 0 =      1.000,      3.000
# span 1 =     10.1000,     10.3000
# span 2 =     32.0000,     32.2000
# span 3 = 0.0000e+00, 0.0000e+00
# interval = decibars: 1
# start_time = Jun 10 2019 12:00:05 [NMEA time, header]
# bad_flag = -9.990e-29
# file_type = ascii
*END*
      1.000    10.1000    32.0000  0.000e+00
      2.000    10.2000    32.1000  0.000e+00
      3.000    10.3000    32.2000  0.000e+00
"#
    .to_string()
}
