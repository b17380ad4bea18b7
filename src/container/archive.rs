//! Zip-backed `.scm` archive

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::config::Config;
use crate::error::Result;
use crate::format::SourceKind;
use crate::store::StoreSet;
use crate::ScmError;

/// One file inside the archive
#[derive(Debug, Clone)]
struct ArchiveEntry {
    name: String,
    data: Bytes,
}

/// Result of [`ScmArchive::save`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No store changed; the file on disk was left alone
    Unchanged,

    /// The archive was rewritten
    Written {
        /// Stores whose entries were replaced
        stores: Vec<SourceKind>,
        /// Backup created by this save, if any
        backup: Option<PathBuf>,
    },
}

/// An unpacked `.scm` archive held in memory
#[derive(Debug, Clone)]
pub struct ScmArchive {
    path: PathBuf,
    entries: Vec<ArchiveEntry>,
}

impl ScmArchive {
    /// Open and unpack an archive
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScmError::NotFound {
                what: "File",
                path: path.to_path_buf(),
            });
        }

        let mut zip = ZipArchive::new(File::open(path)?)?;
        let mut entries = Vec::with_capacity(zip.len());

        for i in 0..zip.len() {
            let mut file = zip.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            tracing::trace!("Unpacked {} ({} bytes)", name, data.len());
            entries.push(ArchiveEntry {
                name,
                data: Bytes::from(data),
            });
        }

        tracing::debug!("Opened {} with {} entries", path.display(), entries.len());

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Write a new archive at `path` from `(name, bytes)` pairs
    pub fn create<I, N>(path: &Path, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, Vec<u8>)>,
        N: Into<String>,
    {
        let archive = Self {
            path: path.to_path_buf(),
            entries: entries
                .into_iter()
                .map(|(name, data)| ArchiveEntry {
                    name: name.into(),
                    data: Bytes::from(data),
                })
                .collect(),
        };
        archive.write_to(path)?;
        Ok(archive)
    }

    /// Get the archive path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entry names in archive order
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Raw bytes of an entry
    pub fn entry(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.data.as_ref())
    }

    /// Load every store entry present into a `StoreSet`
    ///
    /// Fails with `FormatSizeMismatch` when a store is not a whole number
    /// of records.
    pub fn stores(&self) -> Result<StoreSet> {
        self.stores_for(&SourceKind::ALL)
    }

    /// Load only the `kinds` stores present
    ///
    /// Entries of other stores are not validated, so a damaged store does
    /// not block edits to the rest. Unloaded entries are written back
    /// untouched by [`ScmArchive::save`].
    pub fn stores_for(&self, kinds: &[SourceKind]) -> Result<StoreSet> {
        let mut stores = StoreSet::new();
        for &kind in kinds {
            if let Some(data) = self.entry(kind.store_name()) {
                stores.insert_bytes(kind, data)?;
            }
        }
        Ok(stores)
    }

    /// Persist modified stores back into the archive file
    ///
    /// Does nothing when no store changed. Otherwise creates the backup
    /// (when enabled and not already present), replaces the changed store
    /// entries and rewrites the archive.
    pub fn save(&mut self, stores: &StoreSet, config: &Config) -> Result<SaveOutcome> {
        let changed: Vec<_> = stores.modified().collect();
        if changed.is_empty() {
            tracing::debug!("No store changed, {} left as is", self.path.display());
            return Ok(SaveOutcome::Unchanged);
        }

        let backup = if config.create_backup {
            self.create_backup(&config.backup_suffix)?
        } else {
            None
        };

        for store in &changed {
            let name = store.kind().store_name();
            let data = Bytes::copy_from_slice(store.as_bytes());
            match self.entries.iter_mut().find(|e| e.name == name) {
                Some(entry) => entry.data = data,
                None => self.entries.push(ArchiveEntry {
                    name: name.to_string(),
                    data,
                }),
            }
        }

        self.write_to(&self.path)?;
        tracing::debug!("Saved {}", self.path.display());

        Ok(SaveOutcome::Written {
            stores: changed.iter().map(|s| s.kind()).collect(),
            backup,
        })
    }

    /// Copy the archive file aside unless a backup already exists
    fn create_backup(&self, suffix: &str) -> Result<Option<PathBuf>> {
        let backup = path_with_suffix(&self.path, suffix);
        if backup.exists() {
            return Ok(None);
        }
        fs::copy(&self.path, &backup)?;
        tracing::debug!("Backup created: {}", backup.display());
        Ok(Some(backup))
    }

    /// Write all entries to a sibling temp file, then rename it over `path`
    fn write_to(&self, path: &Path) -> Result<()> {
        let tmp = path_with_suffix(path, ".tmp");
        {
            let file = File::create(&tmp)?;
            let mut zip = ZipWriter::new(BufWriter::new(file));
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

            for entry in &self.entries {
                zip.start_file(entry.name.as_str(), options)?;
                zip.write_all(&entry.data)?;
            }

            let mut writer = zip.finish()?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// `path` with `suffix` appended to its file name
pub fn path_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
