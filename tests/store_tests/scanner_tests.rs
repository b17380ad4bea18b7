//! Tests for the store scanner and store buffers
//!
//! These tests verify:
//! - Only active, nonzero records are yielded, in index order
//! - Size mismatches are rejected before any record is read
//! - The modified flag tracks real byte changes only

#[path = "../common/mod.rs"]
mod common;

use common::{assert_checksums, store, store_bytes, Slot};
use scmedit::format::SourceKind;
use scmedit::store::{scan, StoreBuffer};
use scmedit::ScmError;

// =============================================================================
// Scanner Tests
// =============================================================================

#[test]
fn test_scan_skips_inactive_and_empty() {
    for kind in SourceKind::ALL {
        let store = store(
            kind,
            &[
                Slot::Active(5, "Five"),
                Slot::Empty,
                Slot::Inactive(9, "Gone"),
                Slot::Active(2, "Two"),
            ],
        );

        let entries: Vec<_> = store.scan().collect();

        assert_eq!(entries.len(), 2, "{}", kind);
        assert_eq!((entries[0].index, entries[0].prog_nr), (0, 5));
        assert_eq!((entries[1].index, entries[1].prog_nr), (3, 2));
    }
}

#[test]
fn test_scan_keeps_index_order_not_number_order() {
    let store = store(
        SourceKind::Satellite,
        &[
            Slot::Active(30, "C"),
            Slot::Active(10, "A"),
            Slot::Active(20, "B"),
        ],
    );

    let numbers: Vec<u16> = store.scan().map(|e| e.prog_nr).collect();
    assert_eq!(numbers, vec![30, 10, 20]);
}

#[test]
fn test_scan_decodes_names() {
    let store = store(
        SourceKind::CableDigital,
        &[Slot::Active(1, "Das Erste HD"), Slot::Active(2, "")],
    );

    let names: Vec<String> = store.scan().map(|e| e.name).collect();
    assert_eq!(names, vec!["Das Erste HD".to_string(), String::new()]);
}

#[test]
fn test_scan_is_restartable() {
    let store = store(SourceKind::AirDigital, &[Slot::Active(1, "A"), Slot::Active(2, "B")]);

    let scanner = store.scan();
    let first: Vec<_> = scanner.clone().collect();
    let second: Vec<_> = scanner.collect();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_scan_empty_buffer() {
    let entries: Vec<_> = scan(SourceKind::Satellite, &[]).unwrap().collect();
    assert!(entries.is_empty());
}

#[test]
fn test_scan_yields_each_active_record_once() {
    let slots: Vec<Slot<'_>> = (0..50u16)
        .map(|i| match i % 3 {
            0 => Slot::Active(i + 1, "x"),
            1 => Slot::Inactive(i + 1, "y"),
            _ => Slot::Empty,
        })
        .collect();
    let store = store(SourceKind::CableDigital, &slots);

    let indexes: Vec<usize> = store.scan().map(|e| e.index).collect();
    let expected: Vec<usize> = (0..50).filter(|i| i % 3 == 0).collect();
    assert_eq!(indexes, expected);
}

// =============================================================================
// Size Validation Tests
// =============================================================================

#[test]
fn test_scan_rejects_partial_record() {
    let mut bytes = store_bytes(SourceKind::Satellite, &[Slot::Active(1, "A")]);
    bytes.push(0);

    match scan(SourceKind::Satellite, &bytes) {
        Err(ScmError::FormatSizeMismatch {
            store,
            len,
            record_size,
        }) => {
            assert_eq!(store, SourceKind::Satellite);
            assert_eq!(len, 169);
            assert_eq!(record_size, 168);
        }
        other => panic!("Expected FormatSizeMismatch, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_store_buffer_rejects_partial_record() {
    let bytes = vec![0u8; 320 + 100];
    let err = StoreBuffer::new(SourceKind::AirDigital, &bytes).unwrap_err();
    assert!(matches!(err, ScmError::FormatSizeMismatch { .. }));
}

#[test]
fn test_satellite_bytes_are_not_a_digital_store() {
    // 168 is not a multiple of 320
    let bytes = store_bytes(SourceKind::Satellite, &[Slot::Active(1, "A")]);
    assert!(StoreBuffer::new(SourceKind::CableDigital, &bytes).is_err());
}

// =============================================================================
// Store Buffer Tests
// =============================================================================

#[test]
fn test_set_prog_nr_same_value_is_not_a_change() {
    let mut store = store(SourceKind::Satellite, &[Slot::Active(4, "A")]);
    let before = store.as_bytes().to_vec();

    assert!(!store.set_prog_nr(0, 4).unwrap());

    assert!(!store.is_modified());
    assert_eq!(store.as_bytes(), &before[..]);
}

#[test]
fn test_set_prog_nr_marks_modified() {
    let mut store = store(SourceKind::Satellite, &[Slot::Active(4, "A")]);

    assert!(store.set_prog_nr(0, 9).unwrap());

    assert!(store.is_modified());
    assert_eq!(store.prog_nr(0), 9);
    assert_checksums(&store);
}

#[test]
fn test_set_prog_nr_out_of_range_for_analog() {
    let mut store = store(SourceKind::AirAnalog, &[Slot::Active(4, "A")]);

    let err = store.set_prog_nr(0, 300).unwrap_err();

    assert!(matches!(
        err,
        ScmError::ProgNrOutOfRange {
            store: SourceKind::AirAnalog,
            index: 0,
            value: 300
        }
    ));
    assert!(!store.is_modified());
    assert_eq!(store.prog_nr(0), 4);
}

#[test]
fn test_reads_leave_buffer_unmodified() {
    let store = store(SourceKind::CableDigital, &[Slot::Active(1, "Old")]);

    assert_eq!(store.name(0), "Old");
    assert_eq!(store.prog_nr(0), 1);
    assert!(store.is_active(0));
    assert!(!store.is_modified());
}
