//! Test fixtures for the result file parsers
//!
//! Provides sample `.opt` and `.plong` contents and helpers to write them
//! to temporary files.

use std::io::Write;
use tempfile::NamedTempFile;

// Test modules
mod opt_tests;

/// Two reaches, two variables, three frames
pub fn create_test_opt() -> String {
    r#"# Opthyca results
# generated by the test suite
[variables]
"Cote de l eau";"Z";"m";3
"Debit mineur";"QMIN";"m3/s";3
[resultats]
0.0;"amont";1;0.0;102.5;35.0
0.0;"amont";2;150.0;102.1;35.0
0.0;"aval";1;0.0;98.7;12.0
60.0;"amont";1;0.0;102.6;36.0
60.0;"amont";2;150.0;102.2;36.0
60.0;"aval";1;0.0;98.8;12.5
120.0;"amont";1;0.0;102.7;37.0
120.0;"amont";2;150.0;102.3;37.0
120.0;"aval";1;0.0;98.9;13.0"#
        .to_string()
}

/// Three sections, two interior interfaces, two frames
pub fn create_test_plong() -> String {
    r#"3
0.0
1 0.0 12.0 5.0 3.0 0.0
2 50.0 11.5 4.8 2.9 -0.5
3 100.0 11.0 4.5 2.5 -1.0
3600.0
1 0.0 12.2 5.2 3.0 0.0
2 50.0 11.6 4.9 2.9 -0.5
3 100.0 11.1 4.4 2.5 -1.0"#
        .to_string()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut temp_file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    writeln!(temp_file, "{}", content).unwrap();
    temp_file
}
