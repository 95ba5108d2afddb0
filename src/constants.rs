//! Constants shared by the loaders, the store and the CLI
//!
//! File markers, derived variable names and default values used
//! throughout the crate.

use crate::models::TextEncoding;

// =============================================================================
// Text decoding
// =============================================================================

/// Encodings tried in order when decoding a result file
pub const ENCODINGS: &[TextEncoding] = &[
    TextEncoding::Utf8,
    TextEncoding::Windows1252,
    TextEncoding::Latin1,
];

// =============================================================================
// Format A (Opthyca `.opt`)
// =============================================================================

/// Marker opening the variable declarations
pub const OPT_VARIABLES_MARKER: &str = "[variables]";

/// Marker opening the result rows
pub const OPT_RESULTS_MARKER: &str = "[resultats]";

/// Field separator for both declarations and result rows
pub const OPT_SEPARATOR: char = ';';

/// Fields of a variable declaration: name, abbreviation, unit, integer flag
pub const OPT_DECLARATION_FIELDS: usize = 4;

/// Top-level fields of a result row: time, reach, profile id, PK, values
pub const OPT_ROW_FIELDS: usize = 5;

// =============================================================================
// Format B (Courlis `.plong`)
// =============================================================================

/// Water surface elevation, first value of every row
pub const PLONG_WATER_LEVEL: &str = "Z_water";

/// Rigid bottom elevation, last value of every row
pub const PLONG_RIGID_BOTTOM: &str = "Z_rb";

/// Prefix of interior interface elevations (`Z_1`, `Z_2`, ...)
pub const PLONG_INTERFACE_PREFIX: &str = "Z_";

/// Minimum tokens of a row: section id, PK and at least one value
pub const PLONG_MIN_ROW_TOKENS: usize = 3;

/// Minimum number of sections announced on the first line
pub const PLONG_MIN_SECTIONS: usize = 1;

// =============================================================================
// File discovery and defaults
// =============================================================================

/// Extension of Opthyca result files
pub const OPT_EXTENSION: &str = "opt";

/// Extension of Courlis longitudinal profile files
pub const PLONG_EXTENSION: &str = "plong";

/// Implicit reach name used by single-reach files
pub const DEFAULT_REACH_NAME: &str = "reach_1";

/// Default number of decimals when printing values
pub const DEFAULT_DISPLAY_PRECISION: usize = 3;

/// Upper bound for the configured display precision
pub const MAX_DISPLAY_PRECISION: usize = 12;
