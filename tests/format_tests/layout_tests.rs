//! Tests for the format registry
//!
//! These tests verify:
//! - Every kind maps to the right layout family
//! - Layout constants match the on-device record formats
//! - Store names round-trip through FromStr

use scmedit::format::{layout_for, ActivityRule, RecordLayout, SourceKind};

// =============================================================================
// Registry Tests
// =============================================================================

#[test]
fn test_digital_kinds_share_layout() {
    assert_eq!(layout_for(SourceKind::CableDigital), &RecordLayout::DIGITAL);
    assert_eq!(layout_for(SourceKind::AirDigital), &RecordLayout::DIGITAL);
}

#[test]
fn test_analog_kinds_share_layout() {
    assert_eq!(layout_for(SourceKind::CableAnalog), &RecordLayout::ANALOG);
    assert_eq!(layout_for(SourceKind::AirAnalog), &RecordLayout::ANALOG);
}

#[test]
fn test_satellite_layout() {
    let layout = layout_for(SourceKind::Satellite);
    assert_eq!(layout.record_size, 168);
    assert_eq!((layout.prog_nr_offset, layout.prog_nr_width), (0, 2));
    assert_eq!((layout.name_offset, layout.name_length), (36, 100));
    assert_eq!(layout.checksum_offset, 167);
    assert_eq!(layout.activity, ActivityRule::InUseBit(7));
}

#[test]
fn test_digital_layout() {
    let layout = &RecordLayout::DIGITAL;
    assert_eq!(layout.record_size, 320);
    assert_eq!((layout.prog_nr_offset, layout.prog_nr_width), (0, 2));
    assert_eq!((layout.name_offset, layout.name_length), (64, 100));
    assert_eq!(layout.checksum_offset, 319);
    assert_eq!(layout.activity, ActivityRule::DeletedBit(8));
}

#[test]
fn test_analog_layout() {
    let layout = &RecordLayout::ANALOG;
    assert_eq!(layout.record_size, 64);
    assert_eq!((layout.prog_nr_offset, layout.prog_nr_width), (9, 1));
    assert_eq!((layout.name_offset, layout.name_length), (20, 10));
    assert_eq!(layout.checksum_offset, 63);
    assert_eq!(layout.activity, ActivityRule::InUseBit(1));
    assert_eq!(layout.max_prog_nr(), 255);
}

#[test]
fn test_checksum_is_last_byte_of_every_layout() {
    for kind in SourceKind::ALL {
        let layout = layout_for(kind);
        assert_eq!(layout.checksum_offset, layout.record_size - 1, "{}", kind);
        assert!(layout.name_offset + layout.name_length <= layout.checksum_offset);
    }
}

#[test]
fn test_record_count_rejects_partial_records() {
    let layout = &RecordLayout::SATELLITE;
    assert_eq!(layout.record_count(0), Some(0));
    assert_eq!(layout.record_count(168 * 3), Some(3));
    assert_eq!(layout.record_count(168 * 3 + 1), None);
}

// =============================================================================
// Store Name Tests
// =============================================================================

#[test]
fn test_store_names() {
    let names: Vec<&str> = SourceKind::ALL.iter().map(|k| k.store_name()).collect();
    assert_eq!(
        names,
        vec!["map-CableD", "map-AirD", "map-SateD", "map-CableA", "map-AirA"]
    );
}

#[test]
fn test_store_name_parse() {
    for kind in SourceKind::ALL {
        assert_eq!(kind.store_name().parse::<SourceKind>().unwrap(), kind);
    }
    assert!("map-Unknown".parse::<SourceKind>().is_err());
    assert!("map-sated".parse::<SourceKind>().is_err());
}

#[test]
fn test_renumbered_priority() {
    assert_eq!(
        SourceKind::RENUMBERED,
        [
            SourceKind::Satellite,
            SourceKind::CableDigital,
            SourceKind::AirDigital
        ]
    );
}
