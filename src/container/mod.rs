//! Container Module
//!
//! The `.scm` file: a zip archive with one entry per store plus other
//! tuning data this crate does not interpret.
//!
//! ## Responsibilities
//! - Unpack all entries into memory, keeping their order
//! - Hand the five store entries to the engine as a `StoreSet`
//! - Copy the original aside before the first rewrite
//! - Repack only when a store changed, via a temp file and rename
//!
//! ## Layout
//! ```text
//! channels.scm (zip)
//!   ├── map-CableD     320-byte records
//!   ├── map-AirD       320-byte records
//!   ├── map-SateD      168-byte records
//!   ├── map-CableA      64-byte records
//!   ├── map-AirA        64-byte records
//!   └── ...            passed through untouched
//! ```

mod archive;

pub use archive::{path_with_suffix, SaveOutcome, ScmArchive};
