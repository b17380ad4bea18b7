//! Store Module
//!
//! Owned store buffers and the scanner over their active records.
//!
//! ## Responsibilities
//! - Validate that a buffer holds a whole number of records
//! - Enumerate active records in index order
//! - Track whether any record bytes changed since load
//!
//! ## Buffer Shape
//! ```text
//! ┌──────────────┬──────────────┬─────┬──────────────┐
//! │ Record 0     │ Record 1     │ ... │ Record N-1   │
//! │ record_size  │ record_size  │     │ record_size  │
//! └──────────────┴──────────────┴─────┴──────────────┘
//!   len == N * record_size, otherwise FormatSizeMismatch
//! ```

mod buffer;
mod scanner;

pub use buffer::{StoreBuffer, StoreSet};
pub use scanner::{scan, ChannelEntry, StoreScanner};
