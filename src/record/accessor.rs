//! Field accessors
//!
//! Generic over [`RecordLayout`]; the same code serves all five stores.

use crate::format::{ActivityRule, RecordLayout};

use super::checksum::{checksum_recompute, record_range};
use super::{ChannelFlags, ProgNr};

/// Read the little-endian program number of record `index`
pub fn read_prog_nr(buf: &[u8], layout: &RecordLayout, index: usize) -> ProgNr {
    let at = record_range(layout, index).start + layout.prog_nr_offset;
    match layout.prog_nr_width {
        1 => buf[at] as ProgNr,
        _ => u16::from_le_bytes([buf[at], buf[at + 1]]),
    }
}

/// Write the program number of record `index` and refresh its checksum
///
/// # Panics
/// When `value` does not fit a 1-byte field. Callers check
/// [`RecordLayout::max_prog_nr`] first.
pub fn write_prog_nr(buf: &mut [u8], layout: &RecordLayout, index: usize, value: ProgNr) {
    assert!(
        value as u32 <= layout.max_prog_nr(),
        "program number {} exceeds field width {}",
        value,
        layout.prog_nr_width
    );

    let at = record_range(layout, index).start + layout.prog_nr_offset;
    let bytes = value.to_le_bytes();
    buf[at..at + layout.prog_nr_width].copy_from_slice(&bytes[..layout.prog_nr_width]);

    checksum_recompute(buf, layout, index);
}

/// Decode the UTF-16BE name of record `index`, trailing NULs stripped
///
/// Unpaired surrogates decode to U+FFFD; unused slots often hold garbage.
pub fn read_name(buf: &[u8], layout: &RecordLayout, index: usize) -> String {
    let start = record_range(layout, index).start + layout.name_offset;
    let field = &buf[start..start + layout.name_length];

    let units = field
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));

    let name: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();

    name.trim_end_matches('\0').to_string()
}

/// Encode `name` as UTF-16BE into record `index`, NUL padded, and refresh
/// the checksum. Names longer than the field are cut at a character
/// boundary.
pub fn write_name(buf: &mut [u8], layout: &RecordLayout, index: usize, name: &str) {
    let capacity = layout.name_length / 2;
    let mut units: Vec<u16> = Vec::with_capacity(capacity);
    for c in name.chars() {
        let mut pair = [0u16; 2];
        let encoded = c.encode_utf16(&mut pair);
        if units.len() + encoded.len() > capacity {
            break;
        }
        units.extend_from_slice(encoded);
    }

    let start = record_range(layout, index).start + layout.name_offset;
    let field = &mut buf[start..start + layout.name_length];
    field.fill(0);
    for (slot, unit) in field.chunks_exact_mut(2).zip(&units) {
        slot.copy_from_slice(&unit.to_be_bytes());
    }

    checksum_recompute(buf, layout, index);
}

/// Apply the layout's activity rule to record `index`
pub fn is_active(buf: &[u8], layout: &RecordLayout, index: usize) -> bool {
    let start = record_range(layout, index).start;
    match layout.activity {
        ActivityRule::DeletedBit(offset) => buf[start + offset] & 0x01 == 0,
        ActivityRule::InUseBit(offset) => buf[start + offset] & 0x01 != 0,
        ActivityRule::None => true,
    }
}

/// Read the display flags of record `index`; absent offsets read as unset
pub fn read_flags(buf: &[u8], layout: &RecordLayout, index: usize) -> ChannelFlags {
    let start = record_range(layout, index).start;
    let bit0 = |offset: Option<usize>| offset.is_some_and(|o| buf[start + o] & 0x01 != 0);

    ChannelFlags {
        encrypted: bit0(layout.flags.encrypted),
        locked: bit0(layout.flags.locked),
        hidden: layout.flags.hidden.is_some_and(|o| buf[start + o] != 0),
    }
}
