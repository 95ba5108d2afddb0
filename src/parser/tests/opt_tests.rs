//! Tests for the Opthyca (`.opt`) parser

use super::{create_temp_file, create_test_opt};
use crate::error::{ErrorKind, ResultsError};
use crate::models::FileFormat;
use crate::parser::{load_file, load_str};

const HEADER_TWO_VARIABLES: &str =
    "[variables]\n\"Z\";\"Z\";\"m\";3\n\"Q\";\"Q\";\"m3/s\";3\n[resultats]\n";

#[test]
fn test_parse_multi_reach_file() {
    let store = load_str(&create_test_opt(), FileFormat::Opt).unwrap();

    assert_eq!(store.variables(), &["Cote de l eau", "Debit mineur"]);
    assert_eq!(store.reach_names(), vec!["amont", "aval"]);
    assert_eq!(store.sections("amont").unwrap(), &[0.0, 150.0]);
    assert_eq!(store.sections("aval").unwrap(), &[0.0]);
    assert_eq!(store.times(), vec![0.0, 60.0, 120.0]);

    assert_eq!(
        store
            .values_across_time("amont", 150.0, "Cote de l eau")
            .unwrap(),
        vec![102.1, 102.2, 102.3]
    );
    assert_eq!(
        store
            .values_across_sections("Debit mineur", 60.0, Some("amont"))
            .unwrap(),
        vec![36.0, 36.0]
    );
}

#[test]
fn test_variable_order_matches_declarations() {
    let text = format!("{}0.0;b1;1;0.0;1.0;2.0\n1.0;b1;1;0.0;1.1;2.1\n", HEADER_TWO_VARIABLES);
    let store = load_str(&text, FileFormat::Opt).unwrap();

    assert_eq!(store.variables(), &["Z", "Q"]);
    assert_eq!(store.values_across_time("b1", 0.0, "Q").unwrap(), vec![2.0, 2.1]);
}

#[test]
fn test_two_reaches_one_section_each() {
    let text = "[variables]\n\"Depth\";\"Z\";\"m\";1\n[resultats]\n\
                0;r1;1;0.0;1.0\n0;r2;1;0.0;2.0\n1;r1;1;0.0;1.5\n1;r2;1;0.0;2.5\n";
    let store = load_str(text, FileFormat::Opt).unwrap();

    let summary = store.summary();
    assert_eq!(summary.reaches.len(), 2);
    assert!(summary.reaches.iter().all(|reach| reach.sections == 1));
    assert_eq!(summary.variables, 1);
    assert_eq!(summary.frames, 2);
    assert_eq!(store.values_across_time("r2", 0.0, "Depth").unwrap(), vec![2.0, 2.5]);
}

#[test]
fn test_single_frame_file() {
    let text = format!("{}0.0;b1;1;0.0;1.0;2.0\n0.0;b1;2;10.0;1.5;2.5\n", HEADER_TWO_VARIABLES);
    let store = load_str(&text, FileFormat::Opt).unwrap();

    assert_eq!(store.frame_count(), 1);
    assert_eq!(store.sections("b1").unwrap(), &[0.0, 10.0]);
}

#[test]
fn test_value_count_mismatch_reports_line() {
    // Line 6 carries three values for two declared variables
    let text = format!("{}0.0;b1;1;0.0;1.0;2.0\n0.0;b1;2;10.0;1.0;2.0;3.0\n", HEADER_TWO_VARIABLES);
    let error = load_str(&text, FileFormat::Opt).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.line_number(), Some(6));
    let message = error.to_string();
    assert!(message.contains("3 instead of 2"));
    assert!(message.contains("0.0;b1;2;10.0;1.0;2.0;3.0"));
}

#[test]
fn test_mutated_pk_in_later_frame() {
    let text = format!(
        "{}0.0;b1;1;0.0;1.0;2.0\n0.0;b1;2;10.0;1.0;2.0\n\
         1.0;b1;1;0.0;1.0;2.0\n1.0;b1;2;11.0;1.0;2.0\n",
        HEADER_TWO_VARIABLES
    );
    let error = load_str(&text, FileFormat::Opt).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.line_number(), Some(8));
    assert!(error.to_string().contains("Unexpected PK: 11 (instead of 10)"));
}

#[test]
fn test_unexpected_time_within_frame() {
    let text = format!(
        "{}0.0;b1;1;0.0;1.0;2.0\n0.0;b1;2;10.0;1.0;2.0\n\
         1.0;b1;1;0.0;1.0;2.0\n2.0;b1;2;10.0;1.0;2.0\n",
        HEADER_TWO_VARIABLES
    );
    let error = load_str(&text, FileFormat::Opt).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.line_number(), Some(8));
    assert!(error.to_string().contains("Unexpected time"));
}

#[test]
fn test_reach_order_must_be_reproduced() {
    let text = "[variables]\n\"Depth\";\"Z\";\"m\";1\n[resultats]\n\
                0;r1;1;0.0;1.0\n0;r2;1;0.0;2.0\n1;r2;1;0.0;1.5\n1;r1;1;0.0;2.5\n";
    let error = load_str(text, FileFormat::Opt).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.line_number(), Some(6));
    assert!(error.to_string().contains("Unexpected reach"));
}

#[test]
fn test_duplicate_time_rejected() {
    let text = format!(
        "{}0.0;b1;1;0.0;1.0;2.0\n1.0;b1;1;0.0;1.0;2.0\n0.0;b1;1;0.0;1.0;2.0\n",
        HEADER_TWO_VARIABLES
    );
    let error = load_str(&text, FileFormat::Opt).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.line_number(), Some(7));
    assert!(error.to_string().contains("already exists"));
}

#[test]
fn test_reach_reappearing_in_first_frame() {
    let text = "[variables]\n\"Depth\";\"Z\";\"m\";1\n[resultats]\n\
                0;r1;1;0.0;1.0\n0;r2;1;0.0;2.0\n0;r1;2;10.0;1.5\n";
    let error = load_str(text, FileFormat::Opt).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.line_number(), Some(6));
}

#[test]
fn test_duplicate_variable_declaration() {
    let text = "[variables]\n\"Z\";\"Z\";\"m\";3\n\"Z\";\"Z2\";\"m\";3\n\
                [resultats]\n0;b1;1;0.0;1.0;2.0\n";
    let error = load_str(text, FileFormat::Opt).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.line_number(), Some(3));
}

#[test]
fn test_unreadable_declaration() {
    let text = "comment\n[variables]\n\"Z\";\"Z\";\"m\"\n[resultats]\n";
    let error = load_str(text, FileFormat::Opt).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Structural);
    assert_eq!(error.line_number(), Some(3));
}

#[test]
fn test_row_with_too_few_fields() {
    let text = format!("{}0.0;b1;1\n", HEADER_TWO_VARIABLES);
    let error = load_str(&text, FileFormat::Opt).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Structural);
    assert_eq!(error.line_number(), Some(5));
}

#[test]
fn test_unparseable_number() {
    let text = format!("{}0.0;b1;1;zero;1.0;2.0\n", HEADER_TWO_VARIABLES);
    let error = load_str(&text, FileFormat::Opt).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.line_number(), Some(5));
}

#[test]
fn test_non_finite_time_and_pk_rejected() {
    let text = format!("{}0.0;b1;1;0.0;1.0;2.0\nNaN;b1;1;0.0;1.0;2.0\n", HEADER_TWO_VARIABLES);
    let error = load_str(&text, FileFormat::Opt).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.line_number(), Some(6));
    assert!(error.to_string().contains("not a finite number"));

    let text = format!("{}0.0;b1;1;inf;1.0;2.0\n", HEADER_TWO_VARIABLES);
    let error = load_str(&text, FileFormat::Opt).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.line_number(), Some(5));
}

#[test]
fn test_missing_markers() {
    let error = load_str("# nothing here\n", FileFormat::Opt).unwrap_err();
    assert!(matches!(error, ResultsError::PrematureEndOfInput { .. }));

    let error = load_str("[variables]\n\"Z\";\"Z\";\"m\";3\n", FileFormat::Opt).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::PrematureEndOfInput);

    let error = load_str(HEADER_TWO_VARIABLES, FileFormat::Opt).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::PrematureEndOfInput);
}

#[test]
fn test_truncated_later_frame() {
    let text = format!(
        "{}0.0;b1;1;0.0;1.0;2.0\n0.0;b1;2;10.0;1.0;2.0\n1.0;b1;1;0.0;1.0;2.0\n",
        HEADER_TWO_VARIABLES
    );
    let error = load_str(&text, FileFormat::Opt).unwrap_err();

    assert!(matches!(error, ResultsError::PrematureEndOfInput { line: 7 }));
}

#[test]
fn test_load_legacy_encoded_file() {
    let temp_file = tempfile::Builder::new().suffix(".opt").tempfile().unwrap();
    let mut bytes = b"[variables]\n\"Cote de l\xe9eau\";\"Z\";\"m\";3\n[resultats]\n".to_vec();
    bytes.extend_from_slice(b"0.0;b1;1;0.0;1.0\n1.0;b1;1;0.0;2.0\n");
    std::fs::write(temp_file.path(), bytes).unwrap();

    let store = load_file(temp_file.path(), None).unwrap();
    assert_eq!(store.variables(), &["Cote de l\u{e9}eau"]);
    assert_eq!(store.frame_count(), 2);
}

#[test]
fn test_load_file_detects_format() {
    let temp_file = create_temp_file(&create_test_opt(), ".opt");
    let store = load_file(temp_file.path(), None).unwrap();
    assert_eq!(store.frame_count(), 3);

    let temp_file = create_temp_file(&create_test_opt(), ".txt");
    let error = load_file(temp_file.path(), None).unwrap_err();
    assert!(matches!(error, ResultsError::UnsupportedFormat { .. }));

    let store = load_file(temp_file.path(), Some(FileFormat::Opt)).unwrap();
    assert_eq!(store.reach_names(), vec!["amont", "aval"]);
}
