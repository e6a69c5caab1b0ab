//! File-level verification and resealing passes.
//!
//! A pass walks a whole log file: physical lines are decoded one at a time,
//! sequenced, and checked (or resealed). One bad line never aborts a pass —
//! the report says which lines failed and the scan continues, so a file with
//! a single tampered record still gets a complete diagnosis.

use crate::error::{LogsealError, Result, ResultExt as _};
use crate::integrity::engine::{self, FieldSpan, Scheme, Validation};
use crate::integrity::{Record, Sequencer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options shared by the verify and reseal passes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditOptions {
    /// Which integrity scheme the file uses.
    pub scheme: Scheme,
    /// Which content fields the legacy scheme hashes. Ignored under the
    /// sequenced scheme.
    pub span: FieldSpan,
}

impl AuditOptions {
    /// Load options from a JSON file, e.g. `{"scheme": "legacy", "span": {"first": 10}}`.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not valid JSON for
    /// these options.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file: {}", path.display()))?;
        let options = serde_json::from_str(&text)?;
        Ok(options)
    }
}

/// What went wrong on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Too few fields to carry an integrity code.
    Malformed,
    /// Stored code differs from the recomputed one.
    Mismatch,
    /// Line bytes are not valid UTF-8.
    Encoding,
}

/// One failed line in a verification pass.
#[derive(Debug, Clone, Serialize)]
pub struct LineIssue {
    /// Physical 1-based line number in the file.
    pub line_number: usize,
    /// Sequence number the line received, if it consumed one.
    pub sequence: Option<u64>,
    pub kind: IssueKind,
    /// Human-readable detail (the mismatch codes, the decode error, ...).
    pub detail: String,
}

/// Result of verifying a whole file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file_path: String,
    pub checked_utc: DateTime<Utc>,
    pub scheme: Scheme,
    /// Physical lines in the file, blank ones included.
    pub total_lines: usize,
    /// Records that were complete enough to check.
    pub records_checked: usize,
    pub issues: Vec<LineIssue>,
    pub passed: bool,
}

impl FileReport {
    /// Format the report for terminal display.
    #[must_use]
    pub fn format_cli(&self) -> String {
        if self.passed {
            format!(
                "✓ PASS: {} record(s) verified\n  File: {}\n  Scheme: {:?}",
                self.records_checked, self.file_path, self.scheme
            )
        } else {
            let mut output = format!(
                "✗ FAIL: {} issue(s) across {} checked record(s)\n  File: {}\n  Scheme: {:?}",
                self.issues.len(),
                self.records_checked,
                self.file_path,
                self.scheme
            );
            for issue in &self.issues {
                let seq = issue
                    .sequence
                    .map_or_else(String::new, |n| format!(" (seq {n})"));
                output.push_str(&format!(
                    "\n  Line {}{}: {}",
                    issue.line_number, seq, issue.detail
                ));
            }
            output
        }
    }
}

/// Verify every record in a file.
///
/// Sequence numbers are assigned by a full sequencer replay; lines that are
/// not valid UTF-8 still consume their sequence number (they are sequenced
/// from a lossy decode) but are reported as [`IssueKind::Encoding`] instead
/// of being checked.
///
/// # Errors
///
/// Returns error only if the file itself cannot be read. Per-line problems
/// land in the report, never abort the pass.
pub fn audit_file(path: &Path, options: AuditOptions) -> Result<FileReport> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read log file: {}", path.display()))?;
    let lines = physical_lines(&bytes);
    let total_lines = lines.len();

    tracing::info!(file = %path.display(), total_lines, scheme = ?options.scheme, "verifying log file");

    let mut sequencer = Sequencer::new();
    let mut issues = Vec::new();
    let mut records_checked = 0usize;

    for (index, raw) in lines.iter().enumerate() {
        let line_number = index + 1;
        match std::str::from_utf8(raw) {
            Ok(text) => {
                let Some((line, sequence)) = sequencer.feed(text) else {
                    continue; // blank line
                };
                let record = Record::parse(line);
                match engine::validate_with(&record, sequence, options.scheme, options.span) {
                    Validation::Valid => records_checked += 1,
                    Validation::Malformed { reason } => {
                        issues.push(LineIssue {
                            line_number,
                            sequence: Some(sequence),
                            kind: IssueKind::Malformed,
                            detail: reason,
                        });
                    }
                    Validation::Mismatch { expected, found } => {
                        records_checked += 1;
                        issues.push(LineIssue {
                            line_number,
                            sequence: Some(sequence),
                            kind: IssueKind::Mismatch,
                            detail: format!("checksum mismatch: expected {expected}, found {found}"),
                        });
                    }
                }
            }
            Err(e) => {
                // Sequence from a lossy decode so later numbers stay right.
                let lossy = String::from_utf8_lossy(raw);
                let sequence = sequencer.feed(&lossy).map(|(_, n)| n);
                issues.push(LineIssue {
                    line_number,
                    sequence,
                    kind: IssueKind::Encoding,
                    detail: format!("invalid UTF-8: {e}"),
                });
            }
        }
    }

    for issue in &issues {
        tracing::warn!(
            line = issue.line_number,
            kind = ?issue.kind,
            detail = %issue.detail,
            "verification issue"
        );
    }

    let passed = issues.is_empty();
    tracing::info!(records_checked, issues = issues.len(), passed, "verify pass complete");

    Ok(FileReport {
        file_path: path.display().to_string(),
        checked_utc: Utc::now(),
        scheme: options.scheme,
        total_lines,
        records_checked,
        issues,
        passed,
    })
}

/// Result of resealing a whole file.
#[derive(Debug, Clone, Serialize)]
pub struct ResealSummary {
    pub input_path: String,
    pub output_path: String,
    pub resealed_utc: DateTime<Utc>,
    pub scheme: Scheme,
    /// Records whose trailing code was recomputed.
    pub records_resealed: usize,
    /// Subset of resealed records whose code actually changed.
    pub records_changed: usize,
    /// Non-empty lines left untouched because they cannot carry a code.
    pub lines_skipped: usize,
}

impl ResealSummary {
    /// Format the summary for terminal display.
    #[must_use]
    pub fn format_cli(&self) -> String {
        format!(
            "✓ Resealed {} record(s) ({} changed, {} skipped)\n  Input:  {}\n  Output: {}",
            self.records_resealed,
            self.records_changed,
            self.lines_skipped,
            self.input_path,
            self.output_path
        )
    }
}

/// Recompute every record's integrity code and write the result.
///
/// The whole file is replayed through a fresh sequencer, so codes come out
/// right even when earlier edits inserted or removed lines. Blank lines are
/// preserved verbatim; non-empty lines with fewer than 2 fields are left
/// untouched and counted in `lines_skipped`. Record lines are written in
/// trimmed, re-joined form — identical field count and delimiter usage,
/// only the trailing code recomputed. Trailing-newline presence is
/// preserved; line endings are normalized to LF.
///
/// # Errors
///
/// Returns error if the file cannot be read or written, or if any line is
/// not valid UTF-8 (reseal needs to re-join fields, which requires a clean
/// decode — run [`audit_file`] first to locate the offending line).
pub fn reseal_file(input: &Path, output: &Path, options: AuditOptions) -> Result<ResealSummary> {
    let bytes = fs::read(input)
        .with_context(|| format!("Failed to read log file: {}", input.display()))?;
    let had_trailing_newline = bytes.ends_with(b"\n");
    let lines = physical_lines(&bytes);

    tracing::info!(file = %input.display(), scheme = ?options.scheme, "resealing log file");

    let mut sequencer = Sequencer::new();
    let mut out_lines: Vec<String> = Vec::with_capacity(lines.len());
    let mut records_resealed = 0usize;
    let mut records_changed = 0usize;
    let mut lines_skipped = 0usize;

    for (index, raw) in lines.iter().enumerate() {
        let line_number = index + 1;
        let text = std::str::from_utf8(raw).map_err(|e| {
            LogsealError::Encoding(format!("line {line_number} is not valid UTF-8: {e}"))
        })?;

        let Some((line, sequence)) = sequencer.feed(text) else {
            out_lines.push(text.to_owned());
            continue;
        };

        let record = Record::parse(line);
        if !record.is_sealable() {
            tracing::warn!(line = line_number, "line has no code field, leaving as-is");
            out_lines.push(text.to_owned());
            lines_skipped += 1;
            continue;
        }

        let sealed = engine::reseal_with(&record, sequence, options.scheme, options.span)?;
        if sealed.stored_code() != record.stored_code() {
            records_changed += 1;
        }
        records_resealed += 1;
        out_lines.push(sealed.to_line());
    }

    let mut contents = out_lines.join("\n");
    if had_trailing_newline {
        contents.push('\n');
    }
    fs::write(output, contents)
        .with_context(|| format!("Failed to write resealed file: {}", output.display()))?;

    tracing::info!(records_resealed, records_changed, lines_skipped, "reseal pass complete");

    Ok(ResealSummary {
        input_path: input.display().to_string(),
        output_path: output.display().to_string(),
        resealed_utc: Utc::now(),
        scheme: options.scheme,
        records_resealed,
        records_changed,
        lines_skipped,
    })
}

/// Split file bytes into physical lines. A trailing newline does not
/// produce a phantom empty line.
fn physical_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = bytes.split(|&b| b == b'\n').collect();
    if bytes.is_empty() || bytes.ends_with(b"\n") {
        lines.pop();
    }
    lines
}
