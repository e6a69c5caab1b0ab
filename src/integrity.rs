//! Record Integrity Codec
//!
//! This module implements the stateful integrity scheme used by the game
//! client's combat event logs. Every non-empty log line carries a trailing
//! 16-character code derived from the line's content fields and, in the
//! current scheme, the line's position within its log segment. Editing a
//! record without recomputing that code makes the file unreadable by the
//! original client, so the codec here must reproduce the scheme bit-exactly.
//!
//! ## Key Concepts
//!
//! - **Record**: one parsed log line as an ordered list of `|`-delimited
//!   fields; the last field is the stored integrity code.
//! - **Sequence number**: the 1-based position of a record within its
//!   current segment. Lines beginning with `01|` mark a segment boundary
//!   and reset numbering.
//! - **Integrity code**: 16 characters derived from SHA-256 of the content
//!   fields (plus the sequence number in the current scheme) through a
//!   fixed 256-entry byte-to-character table.
//!
//! ## Read path
//!
//! Feed raw lines through a [`Sequencer`] to obtain `(line, sequence)`
//! pairs, then check each with [`engine::validate`]:
//!
//! ```
//! use logseal::integrity::{Record, Sequencer, engine};
//!
//! let mut seq = Sequencer::new();
//! let (line, n) = seq
//!     .feed("01|2024-01-15T10:29:58.000|0134|Central Shroud|e8e0c681340c5a72")
//!     .unwrap();
//! let record = Record::parse(line);
//! assert!(engine::validate(&record, n).is_valid());
//! ```
//!
//! ## Write path
//!
//! After editing content fields, reseal the record with the sequence number
//! obtained from the same scan — the engine never infers position:
//!
//! ```
//! use logseal::integrity::{Record, engine};
//!
//! let mut record = Record::parse("21|2024-01-15T10:30:15.123|12345678|Player|1001|Attack|87654321|EnemyA|0000|1500|0000000000000000");
//! record.set_field(9, "2500");
//! let resealed = engine::reseal(&record, 7).unwrap();
//! assert!(engine::validate(&resealed, 7).is_valid());
//! ```

pub mod engine;
pub mod record;
pub mod sequencer;
pub mod table;
pub mod transform;

pub use engine::{FieldSpan, Scheme, Validation, compute, compute_legacy, reseal, reseal_legacy};
pub use record::{DELIMITER, Record, SEGMENT_BOUNDARY};
pub use sequencer::Sequencer;
pub use transform::code_from_digest;
