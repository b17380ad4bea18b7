//! TSV encoding and decoding for snapshots

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::format::SourceKind;
use crate::record::SlotId;
use crate::ScmError;

use super::{ImportRow, ParsedSnapshot, Snapshot, SnapshotWarning, WarningReason};

/// Header line written on export and skipped on import
pub const HEADER: &str = "Number\tName\tSource\tRecordIndex";

/// Renders the snapshot as TSV, header first
///
/// Tabs and line breaks inside names become spaces so every row keeps
/// exactly four fields.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEADER)?;
        for row in &self.rows {
            let name: String = row
                .name
                .chars()
                .map(|c| if matches!(c, '\t' | '\r' | '\n') { ' ' } else { c })
                .collect();
            writeln!(
                f,
                "{}\t{}\t{}\t{}",
                row.prog_nr, name, row.slot.store, row.slot.index
            )?;
        }
        Ok(())
    }
}

impl Snapshot {
    /// Write the snapshot as TSV to `writer`
    pub fn write_tsv<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()?;
        Ok(())
    }

    /// Render the snapshot as a TSV string
    pub fn to_tsv(&self) -> String {
        self.to_string()
    }
}

/// Parse snapshot text
///
/// Line 1 is skipped unconditionally. Every data line takes the next
/// program number except lines with fewer than four fields or a
/// non-integer record index. Lines naming an unknown source or a negative
/// index keep their number but name no record. Every line not applied is
/// reported as a warning.
pub fn parse_tsv(text: &str) -> ParsedSnapshot {
    let mut parsed = ParsedSnapshot::default();
    let mut next_position: u32 = 1;

    for (i, line) in text.lines().enumerate().skip(1) {
        let line_nr = i + 1;
        let fields: Vec<&str> = line.split('\t').collect();

        let reason = if fields.len() < 4 {
            WarningReason::TooFewFields(fields.len())
        } else {
            match fields[3].trim().parse::<i64>() {
                Err(_) => WarningReason::InvalidRecordIndex(fields[3].to_string()),
                Ok(raw_index) => {
                    let position = next_position;
                    next_position += 1;

                    match (
                        SourceKind::from_store_name(fields[2].trim()),
                        usize::try_from(raw_index),
                    ) {
                        (Some(store), Ok(index)) => {
                            parsed.rows.push(ImportRow {
                                position,
                                slot: SlotId::new(store, index),
                            });
                            continue;
                        }
                        (None, _) => WarningReason::UnknownStore(fields[2].to_string()),
                        (Some(_), Err(_)) => WarningReason::IndexOutOfRange(raw_index),
                    }
                }
            }
        };

        let warning = SnapshotWarning {
            line: line_nr,
            reason,
        };
        if warning.reason.keeps_position() {
            tracing::warn!("Ignoring snapshot {}, its position is kept", warning);
        } else {
            tracing::warn!("Skipping snapshot {}", warning);
        }
        parsed.warnings.push(warning);
    }

    parsed
}

/// Read and parse a snapshot file
pub fn read_tsv_file(path: &Path) -> Result<ParsedSnapshot> {
    if !path.exists() {
        return Err(ScmError::NotFound {
            what: "Snapshot file",
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| ScmError::Snapshot(format!("{} is not UTF-8: {}", path.display(), e)))?;

    Ok(parse_tsv(text.strip_prefix('\u{feff}').unwrap_or(&text)))
}

/// Write a snapshot to `path`, replacing any existing file
pub fn write_tsv_file(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let file = File::create(path)?;
    snapshot.write_tsv(BufWriter::new(file))
}
