//! Record layout descriptors
//!
//! Plain data describing where each field lives inside a fixed-size record.
//! The record codec is generic over these values.

use super::SourceKind;

/// How a record signals that its slot is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityRule {
    /// Inactive when bit 0 of the byte at this offset is set
    DeletedBit(usize),

    /// Inactive when bit 0 of the byte at this offset is clear
    InUseBit(usize),

    /// Always active
    None,
}

/// Offsets of the display flags shown by `list`
///
/// `encrypted` and `locked` test bit 0; `hidden` tests the whole byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlagOffsets {
    pub encrypted: Option<usize>,
    pub locked: Option<usize>,
    pub hidden: Option<usize>,
}

/// Fixed byte layout of one record family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    /// Length of every record in the store
    pub record_size: usize,

    /// Program number field (little-endian)
    pub prog_nr_offset: usize,
    /// Width of the program number field: 1 or 2 bytes
    pub prog_nr_width: usize,

    /// Name field (UTF-16BE, NUL padded)
    pub name_offset: usize,
    pub name_length: usize,

    /// Checksum byte; every byte before it is summed into it
    pub checksum_offset: usize,

    pub activity: ActivityRule,

    pub flags: FlagOffsets,
}

impl RecordLayout {
    /// Digital terrestrial and cable (DVB-T / DVB-C)
    pub const DIGITAL: RecordLayout = RecordLayout {
        record_size: 320,
        prog_nr_offset: 0,
        prog_nr_width: 2,
        name_offset: 64,
        name_length: 100,
        checksum_offset: 319,
        activity: ActivityRule::DeletedBit(8),
        flags: FlagOffsets {
            encrypted: Some(24),
            locked: Some(31),
            hidden: Some(25),
        },
    };

    /// Satellite (DVB-S)
    pub const SATELLITE: RecordLayout = RecordLayout {
        record_size: 168,
        prog_nr_offset: 0,
        prog_nr_width: 2,
        name_offset: 36,
        name_length: 100,
        checksum_offset: 167,
        activity: ActivityRule::InUseBit(7),
        flags: FlagOffsets {
            encrypted: Some(136),
            locked: Some(13),
            hidden: None,
        },
    };

    /// Analog cable and antenna
    pub const ANALOG: RecordLayout = RecordLayout {
        record_size: 64,
        prog_nr_offset: 9,
        prog_nr_width: 1,
        name_offset: 20,
        name_length: 10,
        checksum_offset: 63,
        activity: ActivityRule::InUseBit(1),
        flags: FlagOffsets {
            encrypted: None,
            locked: None,
            hidden: None,
        },
    };

    /// Largest program number the field can hold
    pub fn max_prog_nr(&self) -> u32 {
        match self.prog_nr_width {
            1 => u8::MAX as u32,
            _ => u16::MAX as u32,
        }
    }

    /// Number of whole records in a buffer of `len` bytes, or `None` when
    /// `len` leaves a partial trailing record
    pub fn record_count(&self, len: usize) -> Option<usize> {
        (len % self.record_size == 0).then(|| len / self.record_size)
    }
}

/// Layout of the store backing `kind`
pub fn layout_for(kind: SourceKind) -> &'static RecordLayout {
    match kind {
        SourceKind::CableDigital | SourceKind::AirDigital => &RecordLayout::DIGITAL,
        SourceKind::Satellite => &RecordLayout::SATELLITE,
        SourceKind::CableAnalog | SourceKind::AirAnalog => &RecordLayout::ANALOG,
    }
}
