//! Store Scanner
//!
//! Sequential iteration over the active records of one store.

use crate::error::Result;
use crate::format::{layout_for, RecordLayout, SourceKind};
use crate::record::{is_active, read_name, read_prog_nr, ProgNr, SlotId};
use crate::ScmError;

/// One active record as seen by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEntry {
    /// 0-based record index within the store
    pub index: usize,
    pub prog_nr: ProgNr,
    pub name: String,
}

impl ChannelEntry {
    /// Durable identity of this record
    pub fn slot(&self, store: SourceKind) -> SlotId {
        SlotId::new(store, self.index)
    }
}

/// Scan the active records of a `kind` store held in `buf`
///
/// Fails with `FormatSizeMismatch` before reading any record when `buf`
/// does not hold a whole number of records.
pub fn scan(kind: SourceKind, buf: &[u8]) -> Result<StoreScanner<'_>> {
    let layout = layout_for(kind);
    if layout.record_count(buf.len()).is_none() {
        return Err(ScmError::FormatSizeMismatch {
            store: kind,
            len: buf.len(),
            record_size: layout.record_size,
        });
    }
    Ok(StoreScanner::new(buf, layout))
}

/// Iterator over active records in ascending index order
///
/// Skips records whose program number is 0 or whose activity rule says
/// the slot is unused. Cloning yields an independent restart point.
#[derive(Debug, Clone)]
pub struct StoreScanner<'a> {
    buf: &'a [u8],
    layout: &'static RecordLayout,
    /// Next record index to inspect
    next_index: usize,
    /// Whole records in the buffer
    record_count: usize,
}

impl<'a> StoreScanner<'a> {
    /// Build a scanner over an already validated buffer
    pub(crate) fn new(buf: &'a [u8], layout: &'static RecordLayout) -> Self {
        Self {
            buf,
            layout,
            next_index: 0,
            record_count: buf.len() / layout.record_size,
        }
    }
}

impl<'a> Iterator for StoreScanner<'a> {
    type Item = ChannelEntry;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_index < self.record_count {
            let index = self.next_index;
            self.next_index += 1;

            let prog_nr = read_prog_nr(self.buf, self.layout, index);
            if prog_nr == 0 || !is_active(self.buf, self.layout, index) {
                continue;
            }

            return Some(ChannelEntry {
                index,
                prog_nr,
                name: read_name(self.buf, self.layout, index),
            });
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.record_count - self.next_index))
    }
}
