//! Integrity engine: compute, validate, and reseal record codes.
//!
//! Two schemes exist in the wild. The current scheme appends the record's
//! sequence number to the joined content fields before hashing; the legacy
//! scheme hashes the content fields alone and survives in older files and
//! tooling. Both run through one shared path here — the only difference is
//! whether a sequence number is appended — so the schemes cannot drift.
//!
//! Every function is a pure function of its explicit inputs. In particular,
//! the engine never infers a sequence number: callers obtain it from a
//! [`Sequencer`](crate::integrity::Sequencer) replay over the file.

use crate::error::{LogsealError, Result};
use crate::integrity::record::{DELIMITER, Record};
use crate::integrity::transform::code_from_digest;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt::Write as _;

/// Which integrity scheme a file uses. An explicit caller choice; nothing
/// auto-detects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// Current scheme: content fields plus sequence number.
    #[default]
    Sequenced,
    /// Older files: content fields only.
    Legacy,
}

/// Which content fields the legacy scheme hashes.
///
/// Old call sites disagreed between hashing every content field and a
/// fixed-count prefix, so the choice is an explicit parameter rather than a
/// guess. `All` is what the original write path used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSpan {
    /// Hash every content field.
    #[default]
    All,
    /// Hash only the first `n` content fields. Records with fewer than `n`
    /// content fields are malformed under this span.
    First(usize),
}

impl FieldSpan {
    fn apply<S: AsRef<str>>(self, fields: &[S]) -> Result<&[S]> {
        match self {
            Self::All => Ok(fields),
            Self::First(n) => fields.get(..n).ok_or_else(|| {
                LogsealError::MalformedRecord(format!(
                    "field span wants {n} content fields, record has {}",
                    fields.len()
                ))
            }),
        }
    }
}

/// Outcome of checking one record. Never silently valid: every non-`Valid`
/// case says what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Validation {
    /// Stored code matches the recomputed one.
    Valid,
    /// Record cannot carry a code (fewer than 2 fields, or the field span
    /// asked for more content fields than exist).
    Malformed {
        /// What made the record uncheckable.
        reason: String,
    },
    /// Stored code differs from the recomputed one — corruption or an
    /// unsealed edit.
    Mismatch {
        /// Code recomputed from the content fields.
        expected: String,
        /// Code found in the record.
        found: String,
    },
}

impl Validation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Join fields and optionally append the sequence number — the exact byte
/// string the digest runs over.
fn seal_input<S: AsRef<str>>(fields: &[S], sequence: Option<u64>) -> String {
    let mut input = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            input.push(DELIMITER);
        }
        input.push_str(field.as_ref());
    }
    if let Some(n) = sequence {
        input.push(DELIMITER);
        let _ = write!(input, "{n}");
    }
    input
}

fn code_for<S: AsRef<str>>(fields: &[S], sequence: Option<u64>) -> String {
    let digest: [u8; 32] = Sha256::digest(seal_input(fields, sequence).as_bytes()).into();
    code_from_digest(&digest)
}

/// Compute the integrity code for a record's content fields under the
/// current (sequence-aware) scheme.
pub fn compute<S: AsRef<str>>(content_fields: &[S], sequence: u64) -> String {
    code_for(content_fields, Some(sequence))
}

/// Compute the integrity code under the legacy (no sequence number) scheme.
///
/// # Errors
///
/// `MalformedRecord` if `span` selects more content fields than exist.
pub fn compute_legacy<S: AsRef<str>>(content_fields: &[S], span: FieldSpan) -> Result<String> {
    Ok(code_for(span.apply(content_fields)?, None))
}

/// Check a record's stored code against the current scheme.
#[must_use]
pub fn validate(record: &Record, sequence: u64) -> Validation {
    let Some(content) = record.content_fields() else {
        return too_short(record);
    };
    let expected = compute(content, sequence);
    compare(record, expected)
}

/// Check a record's stored code against the legacy scheme.
#[must_use]
pub fn validate_legacy(record: &Record, span: FieldSpan) -> Validation {
    let Some(content) = record.content_fields() else {
        return too_short(record);
    };
    match compute_legacy(content, span) {
        Ok(expected) => compare(record, expected),
        Err(e) => Validation::Malformed {
            reason: e.to_string(),
        },
    }
}

/// Scheme-dispatching form of [`validate`] / [`validate_legacy`].
#[must_use]
pub fn validate_with(record: &Record, sequence: u64, scheme: Scheme, span: FieldSpan) -> Validation {
    match scheme {
        Scheme::Sequenced => validate(record, sequence),
        Scheme::Legacy => validate_legacy(record, span),
    }
}

/// Recompute and replace a record's trailing code under the current scheme.
///
/// The sequence number must come from a sequencer replay over the file up to
/// this record's position — it cannot be recovered from the record itself.
///
/// # Errors
///
/// `MalformedRecord` if the record has fewer than 2 fields.
pub fn reseal(record: &Record, sequence: u64) -> Result<Record> {
    let content = record
        .content_fields()
        .ok_or_else(|| malformed_err(record))?;
    let code = compute(content, sequence);
    let mut sealed = record.clone();
    sealed.set_stored_code(code);
    Ok(sealed)
}

/// Recompute and replace a record's trailing code under the legacy scheme.
///
/// # Errors
///
/// `MalformedRecord` if the record has fewer than 2 fields or the span
/// selects more content fields than exist.
pub fn reseal_legacy(record: &Record, span: FieldSpan) -> Result<Record> {
    let content = record
        .content_fields()
        .ok_or_else(|| malformed_err(record))?;
    let code = compute_legacy(content, span)?;
    let mut sealed = record.clone();
    sealed.set_stored_code(code);
    Ok(sealed)
}

/// Scheme-dispatching form of [`reseal`] / [`reseal_legacy`].
///
/// # Errors
///
/// `MalformedRecord` as in the scheme-specific functions.
pub fn reseal_with(
    record: &Record,
    sequence: u64,
    scheme: Scheme,
    span: FieldSpan,
) -> Result<Record> {
    match scheme {
        Scheme::Sequenced => reseal(record, sequence),
        Scheme::Legacy => reseal_legacy(record, span),
    }
}

fn too_short(record: &Record) -> Validation {
    Validation::Malformed {
        reason: format!(
            "record has {} field(s); at least 2 required",
            record.field_count()
        ),
    }
}

fn malformed_err(record: &Record) -> LogsealError {
    LogsealError::MalformedRecord(format!(
        "record has {} field(s); at least 2 required",
        record.field_count()
    ))
}

fn compare(record: &Record, expected: String) -> Validation {
    // content_fields() was Some, so stored_code() is too.
    let found = record.stored_code().unwrap_or_default();
    if found == expected {
        Validation::Valid
    } else {
        Validation::Mismatch {
            expected,
            found: found.to_owned(),
        }
    }
}
