//! Record Module
//!
//! Byte-exact access to single channel records inside a store buffer.
//!
//! ## Responsibilities
//! - Read/write the program number at the layout's offset and width
//! - Decode/encode the fixed-width UTF-16BE name
//! - Evaluate the activity rule and the display flags
//! - Keep the trailing checksum byte consistent after every write
//!
//! Every function takes the whole store buffer plus a record index. The
//! record starts at `index * record_size`. Passing an index past the end of
//! the buffer is a caller bug and panics.
//!
//! ## Checksum
//! ```text
//! ┌──────────────────────────────────────────────┬──────────┐
//! │ bytes [0, checksum_offset)                   │ CS (1)   │
//! └──────────────────────────────────────────────┴──────────┘
//!   CS = (b0 + b1 + ... + b[checksum_offset-1]) mod 256
//! ```

mod accessor;
mod checksum;

use std::fmt;

use crate::format::SourceKind;

pub use accessor::{
    is_active, read_flags, read_name, read_prog_nr, write_name, write_prog_nr,
};
pub use checksum::{checksum_compute, checksum_matches, checksum_recompute};

/// User-visible channel position. Not stable across edits; 0 means unused.
pub type ProgNr = u16;

/// Durable identity of a physical record: the store it lives in plus its
/// 0-based record index. Survives every renumbering operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId {
    pub store: SourceKind,
    pub index: usize,
}

impl SlotId {
    pub fn new(store: SourceKind, index: usize) -> Self {
        Self { store, index }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.store, self.index)
    }
}

/// Display flags of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelFlags {
    pub encrypted: bool,
    pub locked: bool,
    pub hidden: bool,
}

impl ChannelFlags {
    /// Compact marker string: `$` encrypted, `L` locked, `H` hidden
    pub fn markers(&self) -> String {
        let mut out = String::new();
        if self.encrypted {
            out.push('$');
        }
        if self.locked {
            out.push('L');
        }
        if self.hidden {
            out.push('H');
        }
        out
    }
}
