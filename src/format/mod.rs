//! Format Module
//!
//! Record layouts for the store files inside a `.scm` container.
//!
//! ## Responsibilities
//! - Name the five store files and the tuning technology behind each
//! - Map every store to its fixed record layout (one per family)
//!
//! ## Record Layouts
//! ```text
//! Digital (map-CableD, map-AirD) - 320 bytes
//! ┌──────────┬─────┬─────────┬──────┬──────────────────┬─────┬──────┐
//! │ProgNr (2)│ ... │Del (@8) │ ...  │ Name (@64, 100)  │ ... │CS @319│
//! └──────────┴─────┴─────────┴──────┴──────────────────┴─────┴──────┘
//!
//! Satellite (map-SateD) - 168 bytes
//! ┌──────────┬─────┬─────────┬──────┬──────────────────┬─────┬──────┐
//! │ProgNr (2)│ ... │Use (@7) │ ...  │ Name (@36, 100)  │ ... │CS @167│
//! └──────────┴─────┴─────────┴──────┴──────────────────┴─────┴──────┘
//!
//! Analog (map-CableA, map-AirA) - 64 bytes
//! ┌─────┬─────────┬─────┬────────────┬────────────────┬─────┬──────┐
//! │ ... │Use (@1) │ ... │ProgNr (@9) │ Name (@20, 10) │ ... │CS @63 │
//! └─────┴─────────┴─────┴────────────┴────────────────┴─────┴──────┘
//! ```
//!
//! Multi-byte integers are little-endian. Names are UTF-16BE, NUL padded.
//! The checksum byte is the wrapping sum of every byte before it.

mod kind;
mod layout;

pub use kind::{ParseSourceKindError, SourceKind};
pub use layout::{layout_for, ActivityRule, FlagOffsets, RecordLayout};
