//! Record codec: splitting and joining pipe-delimited log lines.

use std::fmt;

/// Field delimiter used by the log format. Fields cannot contain a literal
/// `|` — the format has no escaping, and this codec does not invent any.
pub const DELIMITER: char = '|';

/// Record-type marker that opens a new log segment (a zone change) and
/// resets sequence numbering.
pub const SEGMENT_BOUNDARY: &str = "01";

/// One log line as an ordered list of fields.
///
/// A record with at least 2 fields carries an integrity code in its last
/// field; everything before it is content. Records with fewer fields parse
/// fine but are invalid for integrity purposes — [`content_fields`] and
/// [`stored_code`] return `None` for them.
///
/// [`content_fields`]: Record::content_fields
/// [`stored_code`]: Record::stored_code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Parse a line into its fields. Never fails; a line without any
    /// delimiter becomes a single-field record.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        Self {
            fields: line.split(DELIMITER).map(str::to_owned).collect(),
        }
    }

    /// Build a record directly from owned fields.
    #[must_use]
    pub fn from_fields(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// All fields, including the trailing code field if present.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// The record-type marker (first field).
    #[must_use]
    pub fn record_type(&self) -> &str {
        self.fields.first().map_or("", String::as_str)
    }

    /// Whether this record opens a new log segment (`01|...`).
    #[must_use]
    pub fn is_segment_boundary(&self) -> bool {
        self.fields.len() >= 2 && self.fields[0] == SEGMENT_BOUNDARY
    }

    /// Whether the record has enough fields to carry an integrity code.
    #[must_use]
    pub fn is_sealable(&self) -> bool {
        self.fields.len() >= 2
    }

    /// All fields except the trailing integrity code, or `None` if the
    /// record is too short to carry one.
    #[must_use]
    pub fn content_fields(&self) -> Option<&[String]> {
        if self.is_sealable() {
            Some(&self.fields[..self.fields.len() - 1])
        } else {
            None
        }
    }

    /// The stored integrity code (last field), or `None` if the record is
    /// too short to carry one.
    #[must_use]
    pub fn stored_code(&self) -> Option<&str> {
        if self.is_sealable() {
            self.fields.last().map(String::as_str)
        } else {
            None
        }
    }

    /// Replace one field in place.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_field(&mut self, index: usize, value: impl Into<String>) {
        self.fields[index] = value.into();
    }

    /// Replace the trailing code field. Used by the engine after
    /// recomputing a code.
    ///
    /// # Panics
    ///
    /// Panics if the record has no fields.
    pub(crate) fn set_stored_code(&mut self, code: String) {
        let last = self.fields.len() - 1;
        self.fields[last] = code;
    }

    /// Re-join the fields into a log line. Inverse of [`Record::parse`]:
    /// field count and delimiter usage are preserved exactly.
    #[must_use]
    pub fn to_line(&self) -> String {
        self.fields.join("|")
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join_round_trip() {
        let line = "21|2024-01-15T10:30:15.123|12345678|Player|1001|Attack|87654321|EnemyA|0000|1500|abcd";
        let record = Record::parse(line);
        assert_eq!(record.field_count(), 11);
        assert_eq!(record.to_line(), line);
    }

    #[test]
    fn test_content_and_code_split() {
        let record = Record::parse("21|foo|bar|deadbeefdeadbeef");
        assert_eq!(
            record.content_fields().unwrap(),
            &["21".to_owned(), "foo".to_owned(), "bar".to_owned()]
        );
        assert_eq!(record.stored_code(), Some("deadbeefdeadbeef"));
    }

    #[test]
    fn test_single_field_record_is_not_sealable() {
        let record = Record::parse("garbage-without-delimiter");
        assert!(!record.is_sealable());
        assert!(record.content_fields().is_none());
        assert!(record.stored_code().is_none());
        assert_eq!(record.record_type(), "garbage-without-delimiter");
    }

    #[test]
    fn test_empty_fields_are_preserved() {
        // "||" is three empty fields; join must reproduce it byte for byte.
        let record = Record::parse("21||x||");
        assert_eq!(record.field_count(), 5);
        assert_eq!(record.to_line(), "21||x||");
    }

    #[test]
    fn test_segment_boundary_detection() {
        assert!(Record::parse("01|2024-01-15T10:29:58.000|0134|Zone|code").is_segment_boundary());
        // A bare "01" with no delimiter is not a boundary marker.
        assert!(!Record::parse("01").is_segment_boundary());
        assert!(!Record::parse("21|x|y").is_segment_boundary());
        // "011|..." must not match either.
        assert!(!Record::parse("011|x").is_segment_boundary());
    }

    #[test]
    fn test_set_field() {
        let mut record = Record::parse("21|old|code");
        record.set_field(1, "new");
        assert_eq!(record.to_line(), "21|new|code");
    }
}
