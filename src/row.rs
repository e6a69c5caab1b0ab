//! Typed view over type-`21` combat action records.
//!
//! The codec itself is agnostic to field positions; this module is the
//! crate-side half of the editor interface, giving field-grid style callers
//! named access to the columns of a damage row and a way to produce an
//! edited (unsealed) record for the engine to reseal.

use crate::error::{LogsealError, Result};
use crate::integrity::Record;

/// Record-type marker for combat action rows.
pub const COMBAT_RECORD_TYPE: &str = "21";

const IDX_TIMESTAMP: usize = 1;
const IDX_SOURCE_ID: usize = 2;
const IDX_SOURCE_NAME: usize = 3;
const IDX_ABILITY_ID: usize = 4;
const IDX_ABILITY_NAME: usize = 5;
const IDX_TARGET_ID: usize = 6;
const IDX_TARGET_NAME: usize = 7;
const IDX_FLAGS: usize = 8;
const IDX_DAMAGE: usize = 9;

/// A combat row needs the type marker, the nine addressed columns, and the
/// trailing integrity code. Extra columns between damage and the code are
/// allowed and preserved.
const MIN_FIELDS: usize = 11;

/// Read-only named access to the columns of a `21|` record.
#[derive(Debug, Clone, Copy)]
pub struct CombatRow<'a> {
    record: &'a Record,
}

impl<'a> CombatRow<'a> {
    /// View a record as a combat row.
    ///
    /// Returns `None` if the record is not a type-`21` row or is too short
    /// to address every column.
    #[must_use]
    pub fn from_record(record: &'a Record) -> Option<Self> {
        if record.record_type() == COMBAT_RECORD_TYPE && record.field_count() >= MIN_FIELDS {
            Some(Self { record })
        } else {
            None
        }
    }

    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.record.fields()[IDX_TIMESTAMP]
    }

    #[must_use]
    pub fn source_id(&self) -> &str {
        &self.record.fields()[IDX_SOURCE_ID]
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.record.fields()[IDX_SOURCE_NAME]
    }

    #[must_use]
    pub fn ability_id(&self) -> &str {
        &self.record.fields()[IDX_ABILITY_ID]
    }

    #[must_use]
    pub fn ability_name(&self) -> &str {
        &self.record.fields()[IDX_ABILITY_NAME]
    }

    #[must_use]
    pub fn target_id(&self) -> &str {
        &self.record.fields()[IDX_TARGET_ID]
    }

    #[must_use]
    pub fn target_name(&self) -> &str {
        &self.record.fields()[IDX_TARGET_NAME]
    }

    #[must_use]
    pub fn flags(&self) -> &str {
        &self.record.fields()[IDX_FLAGS]
    }

    #[must_use]
    pub fn damage(&self) -> &str {
        &self.record.fields()[IDX_DAMAGE]
    }
}

/// A set of column edits to apply to a combat row.
///
/// Unset columns keep their current value. Applying edits yields a new,
/// *unsealed* record — the stored code is untouched and stale until the
/// caller reseals it with the row's sequence number.
#[derive(Debug, Clone, Default)]
pub struct CombatEdit {
    pub timestamp: Option<String>,
    pub source_id: Option<String>,
    pub source_name: Option<String>,
    pub ability_id: Option<String>,
    pub ability_name: Option<String>,
    pub target_id: Option<String>,
    pub target_name: Option<String>,
    pub flags: Option<String>,
    pub damage: Option<String>,
}

impl CombatEdit {
    /// Apply the edits to a combat record, producing an unsealed copy.
    ///
    /// # Errors
    ///
    /// `MalformedRecord` if the record is not an addressable combat row.
    pub fn apply(&self, record: &Record) -> Result<Record> {
        if CombatRow::from_record(record).is_none() {
            return Err(LogsealError::MalformedRecord(format!(
                "not an editable combat row (type {:?}, {} fields)",
                record.record_type(),
                record.field_count()
            )));
        }

        let mut edited = record.clone();
        let sets = [
            (IDX_TIMESTAMP, &self.timestamp),
            (IDX_SOURCE_ID, &self.source_id),
            (IDX_SOURCE_NAME, &self.source_name),
            (IDX_ABILITY_ID, &self.ability_id),
            (IDX_ABILITY_NAME, &self.ability_name),
            (IDX_TARGET_ID, &self.target_id),
            (IDX_TARGET_NAME, &self.target_name),
            (IDX_FLAGS, &self.flags),
            (IDX_DAMAGE, &self.damage),
        ];
        for (index, value) in sets {
            if let Some(value) = value {
                edited.set_field(index, value.clone());
            }
        }
        Ok(edited)
    }
}
