//! Integration tests for the whole-file verify and reseal passes.
//!
//! The fixture files under `testdata/` carry integrity codes generated with
//! the original consumer's algorithm, so these tests pin end-to-end
//! compatibility: a file this crate accepts is a file the original client
//! accepts.

use logseal::audit::{AuditOptions, IssueKind, audit_file, reseal_file};
use logseal::integrity::engine::Scheme;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new("testdata").join(name)
}

fn legacy_options() -> AuditOptions {
    AuditOptions {
        scheme: Scheme::Legacy,
        ..AuditOptions::default()
    }
}

#[test]
fn test_sealed_file_verifies_clean() {
    let report = audit_file(&fixture("sealed.log"), AuditOptions::default()).unwrap();

    assert!(report.passed, "sealed.log should verify clean");
    assert_eq!(report.total_lines, 7, "6 records plus one blank line");
    assert_eq!(report.records_checked, 6);
    assert!(report.issues.is_empty());
    assert!(report.format_cli().contains("✓ PASS"));
}

#[test]
fn test_tampered_file_reports_exactly_the_edited_line() {
    let report = audit_file(&fixture("tampered.log"), AuditOptions::default()).unwrap();

    assert!(!report.passed);
    assert_eq!(report.issues.len(), 1, "only the edited record should fail");

    let issue = &report.issues[0];
    assert_eq!(issue.kind, IssueKind::Mismatch);
    assert_eq!(issue.line_number, 3);
    assert_eq!(issue.sequence, Some(3));
    assert!(issue.detail.contains("checksum mismatch"));
}

#[test]
fn test_legacy_file_needs_legacy_mode() {
    let path = fixture("legacy.log");

    // Under the sequenced scheme every record looks tampered.
    let sequenced = audit_file(&path, AuditOptions::default()).unwrap();
    assert!(!sequenced.passed);
    assert_eq!(sequenced.issues.len(), 3);

    // Under the legacy scheme the file is clean.
    let legacy = audit_file(&path, legacy_options()).unwrap();
    assert!(legacy.passed, "legacy.log should verify clean in legacy mode");
    assert_eq!(legacy.records_checked, 3);
}

#[test]
fn test_messy_file_isolates_the_bad_line() {
    let report = audit_file(&fixture("messy.log"), AuditOptions::default()).unwrap();

    // The undelimited line is reported, but it still consumed a sequence
    // number, so the records after it (sealed with the shifted numbers)
    // verify clean.
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].kind, IssueKind::Malformed);
    assert_eq!(report.issues[0].line_number, 2);
    assert_eq!(report.issues[0].sequence, Some(2));
    assert_eq!(report.records_checked, 3);
}

#[test]
fn test_reseal_repairs_a_tampered_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("repaired.log");

    let summary =
        reseal_file(&fixture("tampered.log"), &output, AuditOptions::default()).unwrap();
    assert_eq!(summary.records_resealed, 6);
    assert_eq!(summary.records_changed, 1, "only the tampered record needed a new code");

    let report = audit_file(&output, AuditOptions::default()).unwrap();
    assert!(report.passed, "resealed file should verify clean");
}

#[test]
fn test_reseal_is_idempotent_on_a_clean_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("copy.log");

    let summary = reseal_file(&fixture("sealed.log"), &output, AuditOptions::default()).unwrap();
    assert_eq!(summary.records_changed, 0);

    let original = std::fs::read_to_string(fixture("sealed.log")).unwrap();
    let rewritten = std::fs::read_to_string(&output).unwrap();
    assert_eq!(original, rewritten, "clean input should round-trip byte for byte");
}

#[test]
fn test_reseal_converts_between_schemes() {
    let dir = tempfile::TempDir::new().unwrap();
    let as_legacy = dir.path().join("as_legacy.log");
    let back = dir.path().join("back.log");

    // Sequenced fixture -> legacy codes -> sequenced codes again.
    reseal_file(&fixture("sealed.log"), &as_legacy, legacy_options()).unwrap();
    let legacy_report = audit_file(&as_legacy, legacy_options()).unwrap();
    assert!(legacy_report.passed);

    reseal_file(&as_legacy, &back, AuditOptions::default()).unwrap();
    let original = std::fs::read_to_string(fixture("sealed.log")).unwrap();
    let round_tripped = std::fs::read_to_string(&back).unwrap();
    assert_eq!(original, round_tripped);
}
