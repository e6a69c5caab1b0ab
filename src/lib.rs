//! # Logseal - Combat Log Integrity Codec
//!
//! Logseal reads, verifies, and re-certifies the integrity codes carried by
//! a game client's combat event logs. Every non-empty log line ends in a
//! 16-character code derived from the line's content fields and its position
//! within the current log segment; editing a record without recomputing that
//! code makes the file unreadable by the original client. Logseal reproduces
//! the client's scheme bit-exactly, so edited files stay readable.
//!
//! ## Quick Start
//!
//! ```
//! use logseal::integrity::{Record, Sequencer, engine};
//!
//! let contents = "\
//! 01|2024-01-15T10:29:58.000|0134|Central Shroud|e8e0c681340c5a72
//! 21|2024-01-15T10:30:15.123|12345678|Player|1001|Attack|87654321|EnemyA|0000|1500|2578a8fc8334312d";
//!
//! let mut sequencer = Sequencer::new();
//! for raw in contents.lines() {
//!     let Some((line, sequence)) = sequencer.feed(raw) else {
//!         continue;
//!     };
//!     let record = Record::parse(line);
//!     assert!(engine::validate(&record, sequence).is_valid());
//! }
//! ```
//!
//! Whole files are handled by the [`audit`] module:
//!
//! ```no_run
//! use logseal::audit::{AuditOptions, audit_file};
//! use std::path::Path;
//!
//! # fn example() -> logseal::error::Result<()> {
//! let report = audit_file(Path::new("combat.log"), AuditOptions::default())?;
//! if !report.passed {
//!     eprintln!("{}", report.format_cli());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`integrity`]: the record integrity codec
//!   - [`integrity::table`]: the fixed byte-to-character lookup table
//!   - [`integrity::transform`]: SHA-256 digest to 16-character code
//!   - [`integrity::record`]: pipe-delimited record splitting/joining
//!   - [`integrity::sequencer`]: per-segment line sequence numbers
//!   - [`integrity::engine`]: compute, validate, and reseal codes
//! - [`audit`]: whole-file verification and resealing passes
//! - [`row`]: named access to the columns of combat action records
//! - [`error`]: error types and handling utilities
//!
//! ## Positional integrity
//!
//! The current scheme hashes each record's sequence number alongside its
//! content, so a record's code depends on every line before it back to the
//! most recent segment boundary (a `01|` zone-change line). Validation and
//! resealing therefore always replay the file through a
//! [`Sequencer`](integrity::Sequencer) — a record in isolation cannot be
//! checked. Engine calls themselves are pure and freely parallelizable once
//! sequence numbers are known.

#![warn(clippy::all, rust_2018_idioms)]

pub mod audit;
pub mod error;
pub mod integrity;
pub mod logging;
pub mod row;
