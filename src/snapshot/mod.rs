//! Snapshot Module
//!
//! Tab-separated channel listing for out-of-band reordering.
//!
//! ## File Format
//! ```text
//! Number<TAB>Name<TAB>Source<TAB>RecordIndex      <- line 1, always skipped
//! 1<TAB>Das Erste HD<TAB>map-SateD<TAB>17
//! 2<TAB>ZDF HD<TAB>map-SateD<TAB>4
//! ...
//! ```
//!
//! `Number` and `Name` are informational. `Source` and `RecordIndex` form
//! the slot identity. On import the new program number of a row is its
//! position among the data rows, starting at 1. Rows with too few fields
//! or a non-integer `RecordIndex` do not count. Rows naming an unknown
//! source or an impossible index still take their position but match no
//! record.

mod tsv;

use std::fmt;

use crate::record::{ProgNr, SlotId};

pub use tsv::{parse_tsv, read_tsv_file, write_tsv_file, HEADER};

/// One exported channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRow {
    pub prog_nr: ProgNr,
    pub name: String,
    pub slot: SlotId,
}

/// Active channels of all renumbered stores, ordered by program number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub rows: Vec<SnapshotRow>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SnapshotRow> {
        self.rows.iter()
    }

    /// Slot identities in row order, the input import expects
    pub fn slots(&self) -> Vec<SlotId> {
        self.rows.iter().map(|row| row.slot).collect()
    }
}

/// Why a snapshot line was not applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningReason {
    /// Fewer than four tab-separated fields
    TooFewFields(usize),
    /// RecordIndex is not an integer
    InvalidRecordIndex(String),
    /// Source names none of the five stores
    UnknownStore(String),
    /// RecordIndex is an integer no record can have, such as -1
    IndexOutOfRange(i64),
}

impl WarningReason {
    /// Whether the line still took a program number
    pub fn keeps_position(&self) -> bool {
        matches!(self, Self::UnknownStore(_) | Self::IndexOutOfRange(_))
    }
}

/// A snapshot line that was not applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotWarning {
    /// 1-based line number in the file
    pub line: usize,
    pub reason: WarningReason,
}

impl fmt::Display for SnapshotWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            WarningReason::TooFewFields(n) => {
                write!(f, "line {}: expected 4 fields, found {}", self.line, n)
            }
            WarningReason::InvalidRecordIndex(raw) => {
                write!(f, "line {}: invalid record index {:?}", self.line, raw)
            }
            WarningReason::UnknownStore(raw) => {
                write!(f, "line {}: unknown source {:?}", self.line, raw)
            }
            WarningReason::IndexOutOfRange(index) => {
                write!(f, "line {}: record index {} out of range", self.line, index)
            }
        }
    }
}

/// A parsed row that names a record, with the number it should receive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportRow {
    /// 1-based row position, the new program number
    pub position: u32,
    pub slot: SlotId,
}

impl ImportRow {
    /// Rows numbered by their order in `slots`
    pub fn sequence(slots: &[SlotId]) -> Vec<ImportRow> {
        (1u32..)
            .zip(slots)
            .map(|(position, &slot)| ImportRow { position, slot })
            .collect()
    }
}

/// Result of parsing a snapshot file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSnapshot {
    /// Rows naming a store record, in file order
    pub rows: Vec<ImportRow>,
    /// Lines that were not applied
    pub warnings: Vec<SnapshotWarning>,
}

impl ParsedSnapshot {
    /// Slot identities in row order
    pub fn slots(&self) -> Vec<SlotId> {
        self.rows.iter().map(|row| row.slot).collect()
    }
}
