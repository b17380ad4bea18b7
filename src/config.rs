//! Configuration for scmedit
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, ScmError};
use crate::format::SourceKind;
use crate::record::ProgNr;

/// Main configuration for an editing session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Backup Configuration
    // -------------------------------------------------------------------------
    /// Copy the container aside before the first rewrite
    pub create_backup: bool,

    /// Appended to the container path to name the backup:
    ///   channels.scm -> channels.scm.backup
    pub backup_suffix: String,

    // -------------------------------------------------------------------------
    // Renumbering Configuration
    // -------------------------------------------------------------------------
    /// Stores touched by move/compact/export/import. Order is the search
    /// priority for move.
    pub renumber_sources: Vec<SourceKind>,

    /// First program number used by compact when none is given
    pub compact_start: ProgNr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            create_backup: true,
            backup_suffix: ".backup".to_string(),
            renumber_sources: SourceKind::RENUMBERED.to_vec(),
            compact_start: 1,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the engine cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.create_backup && self.backup_suffix.is_empty() {
            return Err(ScmError::Config(
                "backup suffix must not be empty".to_string(),
            ));
        }
        if self.renumber_sources.is_empty() {
            return Err(ScmError::Config(
                "at least one renumber source is required".to_string(),
            ));
        }
        for (i, kind) in self.renumber_sources.iter().enumerate() {
            if self.renumber_sources[..i].contains(kind) {
                return Err(ScmError::Config(format!(
                    "renumber source {} listed twice",
                    kind
                )));
            }
        }
        if self.compact_start == 0 {
            return Err(ScmError::Config(
                "compact start must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Enable or disable the pre-write backup copy
    pub fn create_backup(mut self, enabled: bool) -> Self {
        self.config.create_backup = enabled;
        self
    }

    /// Set the backup file suffix
    pub fn backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.backup_suffix = suffix.into();
        self
    }

    /// Set the stores touched by renumbering, in move search priority
    pub fn renumber_sources(mut self, sources: impl IntoIterator<Item = SourceKind>) -> Self {
        self.config.renumber_sources = sources.into_iter().collect();
        self
    }

    /// Set the default compact start number
    pub fn compact_start(mut self, start: ProgNr) -> Self {
        self.config.compact_start = start;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
