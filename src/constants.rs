//! Application constants for CNV processor
//!
//! This module contains the line markers of the CNV header grammar, default
//! values and resource locations used throughout the CNV processor.

// =============================================================================
// CNV Line Markers
// =============================================================================

/// Line markers that drive header classification
pub mod markers {
    /// Sentinel separating the header block from the data section
    pub const END_OF_HEADER: &str = "*END*";

    /// Instrument metadata line prefix (single asterisk + space)
    pub const INSTRUMENT: &str = "* ";

    /// User comment line prefix (double asterisk)
    pub const USER: &str = "**";

    /// Software/processing metadata line prefix (hash + space)
    pub const SOFTWARE: &str = "# ";

    /// Variable declaration token within software lines
    pub const NAME_DECLARATION: &str = "# name";

    /// Span declaration token within software lines
    pub const SPAN_DECLARATION: &str = "# span";

    /// Width of the `* ` instrument marker stripped from single-value lines
    pub const INSTRUMENT_MARKER_WIDTH: usize = 2;

    /// Width of the `** ` user marker stripped from user header keys
    pub const USER_MARKER_WIDTH: usize = 3;
}

/// Substrings identifying single-value instrument lines
pub mod single_values {
    /// Marks the instrument data file type line (e.g. "Sea-Bird SBE 9 Data File:")
    pub const DATA_FILE: &str = "Data File";

    /// Marks the Seasave acquisition software version line
    pub const SEASAVE: &str = "Seasave";
}

/// Well-known header keys used by record convenience accessors
pub mod header_keys {
    /// Software header carrying the cast start time
    pub const START_TIME: &str = "# start_time";

    /// Sanitized instrument header carrying the NMEA latitude
    pub const NMEA_LATITUDE: &str = "__NMEA_Latitude";

    /// Sanitized instrument header carrying the NMEA longitude
    pub const NMEA_LONGITUDE: &str = "__NMEA_Longitude";

    /// Format of the start_time value before any bracketed qualifier
    pub const START_TIME_FORMAT: &str = "%b %d %Y %H:%M:%S";
}

// =============================================================================
// Sources and Variable Table
// =============================================================================

/// Identifier prefixes recognized as remote HTTP(S) sources
pub const REMOTE_PREFIXES: &[&str] = &["http://", "https://"];

/// Default file extension for CNV discovery in directories
pub const DEFAULT_CNV_EXTENSION: &str = "cnv";

/// Bundled Sea-Bird variable table, embedded at compile time
pub const BUNDLED_VARIABLE_TABLE: &str = include_str!("../data/sbs_variables.json");

// =============================================================================
// Processing Defaults
// =============================================================================

/// Default HTTP request timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Application directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "cnv-processor";

/// Configuration file name within the application config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";
