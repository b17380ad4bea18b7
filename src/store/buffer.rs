//! Store buffers
//!
//! A `StoreBuffer` owns the raw bytes of one store file and is the only
//! mutation path the engine uses, so the modified flag stays accurate.

use std::collections::BTreeMap;

use bytes::BytesMut;

use crate::error::Result;
use crate::format::{layout_for, RecordLayout, SourceKind};
use crate::record::{self, ChannelFlags, ProgNr};
use crate::ScmError;

use super::scanner::StoreScanner;

/// Raw bytes of one store file plus its layout
#[derive(Debug, Clone)]
pub struct StoreBuffer {
    kind: SourceKind,
    layout: &'static RecordLayout,
    data: BytesMut,
    /// Set once any record byte changed since load
    modified: bool,
}

impl StoreBuffer {
    /// Wrap the bytes of a `kind` store
    ///
    /// Rejects buffers that end in a partial record.
    pub fn new(kind: SourceKind, data: &[u8]) -> Result<Self> {
        let layout = layout_for(kind);
        if layout.record_count(data.len()).is_none() {
            return Err(ScmError::FormatSizeMismatch {
                store: kind,
                len: data.len(),
                record_size: layout.record_size,
            });
        }

        Ok(Self {
            kind,
            layout,
            data: BytesMut::from(data),
            modified: false,
        })
    }

    /// Get the source kind
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Get the record layout
    pub fn layout(&self) -> &'static RecordLayout {
        self.layout
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of records (active or not)
    pub fn record_count(&self) -> usize {
        self.data.len() / self.layout.record_size
    }

    /// Whether any record changed since load
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Iterate over active records in index order
    pub fn scan(&self) -> StoreScanner<'_> {
        StoreScanner::new(&self.data, self.layout)
    }

    pub fn prog_nr(&self, index: usize) -> ProgNr {
        record::read_prog_nr(&self.data, self.layout, index)
    }

    pub fn name(&self, index: usize) -> String {
        record::read_name(&self.data, self.layout, index)
    }

    pub fn is_active(&self, index: usize) -> bool {
        record::is_active(&self.data, self.layout, index)
    }

    pub fn flags(&self, index: usize) -> ChannelFlags {
        record::read_flags(&self.data, self.layout, index)
    }

    /// Set the program number of record `index`, refreshing its checksum
    ///
    /// Returns `Ok(false)` without touching the buffer when the record
    /// already holds `value`.
    pub fn set_prog_nr(&mut self, index: usize, value: ProgNr) -> Result<bool> {
        if value as u32 > self.layout.max_prog_nr() {
            return Err(ScmError::ProgNrOutOfRange {
                store: self.kind,
                index,
                value: value as u32,
            });
        }
        if self.prog_nr(index) == value {
            return Ok(false);
        }

        record::write_prog_nr(&mut self.data, self.layout, index, value);
        self.modified = true;
        Ok(true)
    }
}

/// The store buffers of one container, keyed by kind
#[derive(Debug, Clone, Default)]
pub struct StoreSet {
    stores: BTreeMap<SourceKind, StoreBuffer>,
}

impl StoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a store, replacing any previous buffer of the same kind
    pub fn insert(&mut self, store: StoreBuffer) {
        self.stores.insert(store.kind(), store);
    }

    /// Validate and add raw store bytes
    pub fn insert_bytes(&mut self, kind: SourceKind, data: &[u8]) -> Result<()> {
        self.insert(StoreBuffer::new(kind, data)?);
        Ok(())
    }

    pub fn get(&self, kind: SourceKind) -> Option<&StoreBuffer> {
        self.stores.get(&kind)
    }

    pub fn get_mut(&mut self, kind: SourceKind) -> Option<&mut StoreBuffer> {
        self.stores.get_mut(&kind)
    }

    pub fn contains(&self, kind: SourceKind) -> bool {
        self.stores.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoreBuffer> {
        self.stores.values()
    }

    /// Stores whose bytes changed since load
    pub fn modified(&self) -> impl Iterator<Item = &StoreBuffer> {
        self.stores.values().filter(|s| s.is_modified())
    }

    /// Whether any store changed since load
    pub fn any_modified(&self) -> bool {
        self.modified().next().is_some()
    }
}
