//! Tests for the .scm archive container
//!
//! These tests verify:
//! - Unpacking store entries into a StoreSet
//! - No rewrite and no backup when nothing changed
//! - Backup creation and write-back of changed stores only
//! - Missing files and malformed stores

#[path = "../common/mod.rs"]
mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::{numbered_store, raw_numbers};
use scmedit::container::{path_with_suffix, SaveOutcome, ScmArchive};
use scmedit::format::SourceKind;
use scmedit::{Config, Engine, ScmError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const CLONE_INFO: &[u8] = b"opaque tuning data";

fn write_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("channels.scm");
    ScmArchive::create(
        &path,
        vec![
            ("CloneInfo", CLONE_INFO.to_vec()),
            (
                "map-SateD",
                numbered_store(SourceKind::Satellite, &[3, 1, 2]).as_bytes().to_vec(),
            ),
            (
                "map-CableD",
                numbered_store(SourceKind::CableDigital, &[1, 2]).as_bytes().to_vec(),
            ),
            (
                "map-AirA",
                numbered_store(SourceKind::AirAnalog, &[1]).as_bytes().to_vec(),
            ),
        ],
    )
    .unwrap();
    path
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_lists_entries_in_order() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());

    let archive = ScmArchive::open(&path).unwrap();

    let names: Vec<&str> = archive.entry_names().collect();
    assert_eq!(names, vec!["CloneInfo", "map-SateD", "map-CableD", "map-AirA"]);
    assert_eq!(archive.entry("CloneInfo"), Some(CLONE_INFO));
}

#[test]
fn test_stores_loads_present_kinds_only() {
    let dir = TempDir::new().unwrap();
    let archive = ScmArchive::open(&write_fixture(dir.path())).unwrap();

    let stores = archive.stores().unwrap();

    assert_eq!(stores.len(), 3);
    assert!(stores.contains(SourceKind::Satellite));
    assert!(stores.contains(SourceKind::AirAnalog));
    assert!(!stores.contains(SourceKind::AirDigital));
    assert_eq!(raw_numbers(stores.get(SourceKind::Satellite).unwrap()), vec![3, 1, 2]);
}

#[test]
fn test_open_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = ScmArchive::open(&dir.path().join("nope.scm")).unwrap_err();
    assert!(matches!(err, ScmError::NotFound { .. }));
}

#[test]
fn test_open_non_zip_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.scm");
    fs::write(&path, b"definitely not a zip archive").unwrap();

    assert!(matches!(ScmArchive::open(&path), Err(ScmError::Archive(_))));
}

#[test]
fn test_stores_rejects_partial_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.scm");
    ScmArchive::create(&path, vec![("map-CableD", vec![0u8; 321])]).unwrap();

    let err = ScmArchive::open(&path).unwrap().stores().unwrap_err();

    assert!(matches!(
        err,
        ScmError::FormatSizeMismatch {
            store: SourceKind::CableDigital,
            len: 321,
            record_size: 320
        }
    ));
}

#[test]
fn test_damaged_unused_store_does_not_block_renumbering() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("damaged.scm");
    ScmArchive::create(
        &path,
        vec![
            (
                "map-SateD",
                numbered_store(SourceKind::Satellite, &[1, 2, 3]).as_bytes().to_vec(),
            ),
            ("map-AirA", vec![0u8; 65]),
        ],
    )
    .unwrap();
    let config = Config::default();
    let engine = Engine::new(config.clone()).unwrap();

    let mut archive = ScmArchive::open(&path).unwrap();
    assert!(matches!(
        archive.stores(),
        Err(ScmError::FormatSizeMismatch {
            store: SourceKind::AirAnalog,
            ..
        })
    ));

    let mut stores = archive.stores_for(&config.renumber_sources).unwrap();
    assert!(!stores.contains(SourceKind::AirAnalog));
    engine.move_channel(&mut stores, 3, 1).unwrap();
    archive.save(&stores, &config).unwrap();

    let reopened = ScmArchive::open(&path).unwrap();
    let reloaded = reopened.stores_for(&[SourceKind::Satellite]).unwrap();
    assert_eq!(raw_numbers(reloaded.get(SourceKind::Satellite).unwrap()), vec![2, 3, 1]);
    assert_eq!(reopened.entry("map-AirA"), Some(&[0u8; 65][..]));
}

#[test]
fn test_stores_for_rejects_damaged_store_in_use() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("damaged.scm");
    ScmArchive::create(&path, vec![("map-SateD", vec![0u8; 170])]).unwrap();

    let err = ScmArchive::open(&path)
        .unwrap()
        .stores_for(&SourceKind::RENUMBERED)
        .unwrap_err();

    assert!(matches!(
        err,
        ScmError::FormatSizeMismatch {
            store: SourceKind::Satellite,
            ..
        }
    ));
}

// =============================================================================
// Save Tests
// =============================================================================

#[test]
fn test_save_unchanged_does_not_touch_file() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());
    let before = fs::read(&path).unwrap();

    let mut archive = ScmArchive::open(&path).unwrap();
    let stores = archive.stores().unwrap();
    let outcome = archive.save(&stores, &Config::default()).unwrap();

    assert_eq!(outcome, SaveOutcome::Unchanged);
    assert_eq!(fs::read(&path).unwrap(), before);
    assert!(!path_with_suffix(&path, ".backup").exists());
}

#[test]
fn test_save_writes_changed_store_and_backup() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());
    let original = fs::read(&path).unwrap();

    let mut archive = ScmArchive::open(&path).unwrap();
    let mut stores = archive.stores().unwrap();
    let cable_before = archive.entry("map-CableD").unwrap().to_vec();
    stores
        .get_mut(SourceKind::Satellite)
        .unwrap()
        .set_prog_nr(0, 9)
        .unwrap();

    let outcome = archive.save(&stores, &Config::default()).unwrap();

    let backup = path_with_suffix(&path, ".backup");
    assert_eq!(
        outcome,
        SaveOutcome::Written {
            stores: vec![SourceKind::Satellite],
            backup: Some(backup.clone()),
        }
    );
    assert_eq!(fs::read(&backup).unwrap(), original);

    let reopened = ScmArchive::open(&path).unwrap();
    let reloaded = reopened.stores().unwrap();
    assert_eq!(raw_numbers(reloaded.get(SourceKind::Satellite).unwrap()), vec![9, 1, 2]);
    assert_eq!(reopened.entry("map-CableD").unwrap(), &cable_before[..]);
    assert_eq!(reopened.entry("CloneInfo"), Some(CLONE_INFO));
    assert!(!path_with_suffix(&path, ".tmp").exists());
}

#[test]
fn test_existing_backup_is_kept() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());
    let backup = path_with_suffix(&path, ".backup");
    fs::write(&backup, b"older backup").unwrap();

    let mut archive = ScmArchive::open(&path).unwrap();
    let mut stores = archive.stores().unwrap();
    stores
        .get_mut(SourceKind::CableDigital)
        .unwrap()
        .set_prog_nr(1, 7)
        .unwrap();
    let outcome = archive.save(&stores, &Config::default()).unwrap();

    assert!(matches!(outcome, SaveOutcome::Written { backup: None, .. }));
    assert_eq!(fs::read(&backup).unwrap(), b"older backup");
}

#[test]
fn test_backup_disabled() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());
    let config = Config::builder().create_backup(false).build();

    let mut archive = ScmArchive::open(&path).unwrap();
    let mut stores = archive.stores().unwrap();
    stores
        .get_mut(SourceKind::Satellite)
        .unwrap()
        .set_prog_nr(2, 4)
        .unwrap();
    archive.save(&stores, &config).unwrap();

    assert!(!path_with_suffix(&path, ".backup").exists());
}

#[test]
fn test_path_with_suffix_appends_to_file_name() {
    assert_eq!(
        path_with_suffix(Path::new("/tmp/list.scm"), ".backup"),
        PathBuf::from("/tmp/list.scm.backup")
    );
}
