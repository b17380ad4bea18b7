//! Record checksum
//!
//! 8-bit wrapping sum over the bytes that precede the checksum byte.

use std::ops::Range;

use crate::format::RecordLayout;

/// Byte range of record `index` within its store buffer
pub(super) fn record_range(layout: &RecordLayout, index: usize) -> Range<usize> {
    let start = index * layout.record_size;
    start..start + layout.record_size
}

/// Checksum of a single record slice
pub fn checksum_compute(record: &[u8], checksum_offset: usize) -> u8 {
    record[..checksum_offset]
        .iter()
        .fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Recompute and store the checksum byte of record `index`
pub fn checksum_recompute(buf: &mut [u8], layout: &RecordLayout, index: usize) {
    let record = &mut buf[record_range(layout, index)];
    record[layout.checksum_offset] = checksum_compute(record, layout.checksum_offset);
}

/// Whether the stored checksum byte of record `index` is consistent
pub fn checksum_matches(buf: &[u8], layout: &RecordLayout, index: usize) -> bool {
    let record = &buf[record_range(layout, index)];
    record[layout.checksum_offset] == checksum_compute(record, layout.checksum_offset)
}
