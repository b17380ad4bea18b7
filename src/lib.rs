//! # scmedit
//!
//! Channel list editor for Samsung `.scm` containers:
//! - Byte-exact codec for the fixed-size channel records of each store
//! - Checksum kept consistent after every program number write
//! - Move, compact, export and import renumbering
//! - Slot identity (store, record index) kept stable across edits
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          CLI                                 │
//! │          list / move / compact / export / import             │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//! ┌──────────────▼──────────────┐   ┌───────────▼───────────────┐
//! │   Container (.scm zip)      │   │   Snapshot (TSV)          │
//! │   unpack / backup / repack  │   │   export / parse          │
//! └──────────────┬──────────────┘   └───────────┬───────────────┘
//!                │ StoreSet                     │ SlotIds
//! ┌──────────────▼──────────────────────────────▼───────────────┐
//! │                    Renumbering Engine                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Scanner   │ ───────▶ │   Record    │
//!   │   (store)   │          │  Accessor   │
//!   └─────────────┘          └──────┬──────┘
//!                                   ▼
//!                           ┌─────────────┐
//!                           │   Format    │
//!                           │  Registry   │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod format;
pub mod record;
pub mod store;
pub mod snapshot;
pub mod container;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ScmError, Result};
pub use config::Config;
pub use engine::Engine;
pub use format::{layout_for, RecordLayout, SourceKind};
pub use record::{ProgNr, SlotId};
pub use store::{StoreBuffer, StoreSet};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of scmedit
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
