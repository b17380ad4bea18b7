//! Engine Module
//!
//! The renumbering engine that edits program numbers across store buffers.
//!
//! ## Responsibilities
//! - Move one channel and shift the channels in between
//! - Compact numbering into a gap-free sequence
//! - Export a snapshot ordered by program number
//! - Import a reordered snapshot by slot identity
//! - List channels with their display flags
//!
//! ## Mutation Model
//! Every operation first builds a plan of `(record index, new number)` for a
//! store, validates all new numbers against the field width, then applies
//! the plan. A failing store is therefore never left half-edited. Records
//! whose number does not change are not written, so a store with an empty
//! plan stays byte-identical and is not marked modified.

use std::collections::{HashMap, HashSet};

use crate::config::Config;
use crate::error::{Result, ScmError};
use crate::format::SourceKind;
use crate::record::{ChannelFlags, ProgNr, SlotId};
use crate::snapshot::{ImportRow, Snapshot, SnapshotRow};
use crate::store::{StoreBuffer, StoreSet};

/// Outcome of [`Engine::move_channel`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Source and target are equal; nothing was touched
    NoOp,

    /// The channel was found and renumbered
    Moved {
        /// Identity of the moved record
        slot: SlotId,
        /// Its name, for reporting
        name: String,
        /// Records rewritten, the moved one included
        changed: usize,
    },
}

/// Per-store result of [`Engine::compact`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCompaction {
    pub store: SourceKind,
    /// Active records found
    pub found: usize,
    /// Records whose number changed
    pub changed: usize,
}

/// Outcome of [`Engine::compact`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactOutcome {
    pub stores: Vec<StoreCompaction>,
}

impl CompactOutcome {
    /// Active records found across all stores
    pub fn total_found(&self) -> usize {
        self.stores.iter().map(|s| s.found).sum()
    }

    /// Records renumbered across all stores
    pub fn total_changed(&self) -> usize {
        self.stores.iter().map(|s| s.changed).sum()
    }
}

/// Outcome of [`Engine::import`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Records whose number changed
    pub updated: usize,
    /// Snapshot identities that matched no active record
    pub unmatched: Vec<SlotId>,
}

/// One channel in a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedChannel {
    pub index: usize,
    pub prog_nr: ProgNr,
    pub name: String,
    pub flags: ChannelFlags,
}

/// Active channels of one store sorted by program number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreListing {
    pub store: SourceKind,
    pub channels: Vec<ListedChannel>,
}

/// Planned rewrite: record index and its new program number
type Plan = Vec<(usize, u32)>;

/// The renumbering engine
///
/// Stateless apart from its configuration. Each call borrows the store set
/// mutably for its whole duration, so two operations can never interleave
/// on the same buffers.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
}

impl Engine {
    /// Create an engine after validating `config`
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Move channel `from` to position `to`
    ///
    /// Stores are searched in the configured priority; only the first store
    /// holding an active `from` is edited. Within it, every other active
    /// record numbered in `[min, max]` shifts by one toward the vacated
    /// position. Gaps and duplicates are kept as they are.
    pub fn move_channel(
        &self,
        stores: &mut StoreSet,
        from: ProgNr,
        to: ProgNr,
    ) -> Result<MoveOutcome> {
        if from == 0 || to == 0 {
            return Err(ScmError::InvalidProgNr(format!(
                "program numbers start at 1 (got {} -> {})",
                from, to
            )));
        }
        if from == to {
            tracing::info!("Source and target are the same, nothing to do");
            return Ok(MoveOutcome::NoOp);
        }

        let (lo, hi) = (from.min(to), from.max(to));

        for &kind in &self.config.renumber_sources {
            let Some(store) = stores.get_mut(kind) else {
                continue;
            };
            let Some(found) = store.scan().find(|entry| entry.prog_nr == from) else {
                continue;
            };

            tracing::info!("Found: {}: {} in {}", from, found.name, kind);

            let plan: Plan = store
                .scan()
                .filter_map(|entry| {
                    let current = entry.prog_nr as u32;
                    let next = if entry.index == found.index {
                        to as u32
                    } else if (lo..=hi).contains(&entry.prog_nr) {
                        if from > to {
                            current + 1
                        } else {
                            current - 1
                        }
                    } else {
                        return None;
                    };
                    (next != current).then_some((entry.index, next))
                })
                .collect();

            let changed = apply_plan(store, &plan)?;
            tracing::debug!("{}: {} records rewritten", kind, changed);

            return Ok(MoveOutcome::Moved {
                slot: found.slot(kind),
                name: found.name,
                changed,
            });
        }

        Err(ScmError::ChannelNotFound(from))
    }

    /// Renumber each store sequentially from `start_from`
    ///
    /// Records numbered below `start_from` keep their numbers. The rest are
    /// sorted by current number (stable, so duplicates keep index order) and
    /// renumbered `start_from, start_from + 1, ...`.
    pub fn compact(&self, stores: &mut StoreSet, start_from: ProgNr) -> Result<CompactOutcome> {
        if start_from == 0 {
            return Err(ScmError::InvalidProgNr(
                "compact must start at 1 or higher".to_string(),
            ));
        }

        let mut outcome = CompactOutcome::default();

        for &kind in &self.config.renumber_sources {
            let Some(store) = stores.get_mut(kind) else {
                continue;
            };

            let mut entries: Vec<_> = store.scan().collect();
            entries.sort_by_key(|entry| entry.prog_nr);

            let plan: Plan = entries
                .iter()
                .filter(|entry| entry.prog_nr >= start_from)
                .zip(start_from as u32..)
                .filter(|(entry, next)| entry.prog_nr as u32 != *next)
                .map(|(entry, next)| (entry.index, next))
                .collect();

            let changed = apply_plan(store, &plan)?;
            if changed > 0 {
                tracing::info!("{}: Renumbered {} channels", kind, changed);
            }

            outcome.stores.push(StoreCompaction {
                store: kind,
                found: entries.len(),
                changed,
            });
        }

        Ok(outcome)
    }

    /// Collect every active channel, ordered by program number
    ///
    /// Stores are interleaved by number; ties keep store priority and index
    /// order.
    pub fn export(&self, stores: &StoreSet) -> Snapshot {
        let mut rows: Vec<SnapshotRow> = self
            .config
            .renumber_sources
            .iter()
            .filter_map(|&kind| stores.get(kind).map(|store| (kind, store)))
            .flat_map(|(kind, store)| {
                store.scan().map(move |entry| SnapshotRow {
                    prog_nr: entry.prog_nr,
                    slot: entry.slot(kind),
                    name: entry.name,
                })
            })
            .collect();

        rows.sort_by_key(|row| row.prog_nr);
        tracing::debug!("Exported {} channels", rows.len());

        Snapshot { rows }
    }

    /// Renumber channels by their position in `slots`
    ///
    /// The record named by `slots[i]` gets program number `i + 1`. Active
    /// records not named keep their numbers. When a slot appears twice the
    /// later position wins.
    pub fn import(&self, stores: &mut StoreSet, slots: &[SlotId]) -> Result<ImportOutcome> {
        self.import_rows(stores, &ImportRow::sequence(slots))
    }

    /// Renumber channels from parsed snapshot rows
    ///
    /// Each row carries its own position, so rows dropped by the parser
    /// can still leave their number unused.
    pub fn import_rows(&self, stores: &mut StoreSet, rows: &[ImportRow]) -> Result<ImportOutcome> {
        let mut mapping: HashMap<SlotId, u32> = HashMap::with_capacity(rows.len());
        for row in rows {
            if let Some(previous) = mapping.insert(row.slot, row.position) {
                tracing::warn!(
                    "{} listed at positions {} and {}, using {}",
                    row.slot,
                    previous,
                    row.position,
                    row.position
                );
            }
        }

        let mut matched: HashSet<SlotId> = HashSet::with_capacity(mapping.len());
        let mut updated = 0;

        for &kind in &self.config.renumber_sources {
            let Some(store) = stores.get_mut(kind) else {
                continue;
            };

            let plan: Plan = store
                .scan()
                .filter_map(|entry| {
                    let slot = entry.slot(kind);
                    let next = *mapping.get(&slot)?;
                    matched.insert(slot);
                    (next != entry.prog_nr as u32).then_some((entry.index, next))
                })
                .collect();

            let changed = apply_plan(store, &plan)?;
            tracing::debug!("{}: {} channels updated", kind, changed);
            updated += changed;
        }

        let mut unmatched: Vec<SlotId> = mapping
            .keys()
            .filter(|slot| !matched.contains(slot))
            .copied()
            .collect();
        unmatched.sort();
        for slot in &unmatched {
            tracing::warn!("{} is not an active channel, ignored", slot);
        }

        Ok(ImportOutcome { updated, unmatched })
    }

    /// List the active channels of every store present
    ///
    /// All five stores are listed, analog included. Stores without active
    /// channels are omitted.
    pub fn list(&self, stores: &StoreSet) -> Vec<StoreListing> {
        SourceKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let store = stores.get(kind)?;
                let mut channels: Vec<ListedChannel> = store
                    .scan()
                    .map(|entry| ListedChannel {
                        index: entry.index,
                        prog_nr: entry.prog_nr,
                        flags: store.flags(entry.index),
                        name: entry.name,
                    })
                    .collect();
                if channels.is_empty() {
                    return None;
                }
                channels.sort_by_key(|channel| channel.prog_nr);
                Some(StoreListing {
                    store: kind,
                    channels,
                })
            })
            .collect()
    }
}

/// Validate then apply a plan; returns the number of records rewritten
fn apply_plan(store: &mut StoreBuffer, plan: &[(usize, u32)]) -> Result<usize> {
    let max = store.layout().max_prog_nr();
    if let Some(&(index, value)) = plan.iter().find(|(_, value)| *value > max) {
        return Err(ScmError::ProgNrOutOfRange {
            store: store.kind(),
            index,
            value,
        });
    }

    let mut changed = 0;
    for &(index, value) in plan {
        if value == 0 {
            tracing::warn!("{} record {} set to 0 and becomes unused", store.kind(), index);
        }
        // Bounded by `max` above, which never exceeds u16::MAX
        if store.set_prog_nr(index, value as ProgNr)? {
            changed += 1;
        }
    }
    Ok(changed)
}
