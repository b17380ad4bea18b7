//! Error types for scmedit
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::format::SourceKind;
use crate::record::ProgNr;

/// Result type alias using ScmError
pub type Result<T> = std::result::Result<T, ScmError>;

/// Unified error type for scmedit operations
#[derive(Debug, Error)]
pub enum ScmError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{what} not found: {}", path.display())]
    NotFound { what: &'static str, path: PathBuf },

    // -------------------------------------------------------------------------
    // Container Errors
    // -------------------------------------------------------------------------
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    // -------------------------------------------------------------------------
    // Format Errors
    // -------------------------------------------------------------------------
    #[error(
        "{store}: size {len} is not a multiple of the {record_size}-byte record size"
    )]
    FormatSizeMismatch {
        store: SourceKind,
        len: usize,
        record_size: usize,
    },

    #[error("{store} record {index}: program number {value} does not fit the field")]
    ProgNrOutOfRange {
        store: SourceKind,
        index: usize,
        value: u32,
    },

    // -------------------------------------------------------------------------
    // Renumbering Errors
    // -------------------------------------------------------------------------
    #[error("Channel {0} not found")]
    ChannelNotFound(ProgNr),

    #[error("Invalid program number: {0}")]
    InvalidProgNr(String),

    // -------------------------------------------------------------------------
    // Snapshot Errors
    // -------------------------------------------------------------------------
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
