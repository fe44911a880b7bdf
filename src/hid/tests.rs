//! Unit tests for keyboard report building and serialization.
//!
//! These tests run on the host (not embedded) and verify the pure
//! logic of character lookup and key slot handling.

use super::keyboard::{char_to_usage, KeyboardReport, Usage, MODIFIER_LEFT_SHIFT};
use crate::error::Error;

// ═══════════════════════════════════════════════════════════════════════════
// Character Lookup Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn digits_map_to_top_row() {
    assert_eq!(char_to_usage('1'), Some(Usage { code: 0x1E, shift: false }));
    assert_eq!(char_to_usage('9'), Some(Usage { code: 0x26, shift: false }));
    assert_eq!(char_to_usage('0'), Some(Usage { code: 0x27, shift: false }));
}

#[test]
fn letters_share_codes_across_case() {
    assert_eq!(char_to_usage('a'), Some(Usage { code: 0x04, shift: false }));
    assert_eq!(char_to_usage('A'), Some(Usage { code: 0x04, shift: true }));
    assert_eq!(char_to_usage('z'), Some(Usage { code: 0x1D, shift: false }));
}

#[test]
fn shifted_symbols_reuse_base_key() {
    assert_eq!(char_to_usage('!'), Some(Usage { code: 0x1E, shift: true }));
    assert_eq!(char_to_usage('?'), Some(Usage { code: 0x38, shift: true }));
    assert_eq!(char_to_usage('/'), Some(Usage { code: 0x38, shift: false }));
}

#[test]
fn control_characters() {
    assert_eq!(char_to_usage('\n').map(|u| u.code), Some(0x28));
    assert_eq!(char_to_usage('\t').map(|u| u.code), Some(0x2B));
    assert_eq!(char_to_usage('\x08').map(|u| u.code), Some(0x2A));
    assert_eq!(char_to_usage('\x1b').map(|u| u.code), Some(0x29));
}

#[test]
fn non_ascii_is_unmapped() {
    assert_eq!(char_to_usage('é'), None);
    assert_eq!(char_to_usage('\0'), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn keyboard_report_empty() {
    let report = KeyboardReport::empty();
    assert!(report.is_empty());
    assert_eq!(report.modifier, 0);
    assert_eq!(report.keycodes, [0; 6]);
}

#[test]
fn press_digit_fills_first_slot() {
    let mut report = KeyboardReport::empty();
    report.press('1').unwrap();

    let mut buf = [0u8; 8];
    assert_eq!(report.serialize(&mut buf), 8);
    assert_eq!(buf, [0x00, 0x00, 0x1E, 0x00, 0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn press_uppercase_sets_left_shift() {
    let mut report = KeyboardReport::empty();
    report.press('A').unwrap();
    assert_eq!(report.modifier, MODIFIER_LEFT_SHIFT);
    assert_eq!(report.keycodes[0], 0x04);

    report.release('A').unwrap();
    assert!(report.is_empty());
}

#[test]
fn press_same_key_twice_uses_one_slot() {
    let mut report = KeyboardReport::empty();
    report.press('5').unwrap();
    report.press('5').unwrap();
    assert_eq!(report.keycodes, [0x22, 0, 0, 0, 0, 0]);
}

#[test]
fn release_frees_slot_for_reuse() {
    let mut report = KeyboardReport::empty();
    report.press('1').unwrap();
    report.press('2').unwrap();
    report.release('1').unwrap();
    assert_eq!(report.keycodes, [0x00, 0x1F, 0, 0, 0, 0]);

    report.press('3').unwrap();
    assert_eq!(report.keycodes, [0x20, 0x1F, 0, 0, 0, 0]);
}

#[test]
fn seventh_key_is_rejected() {
    let mut report = KeyboardReport::empty();
    for ch in ['1', '2', '3', '4', '5', '6'] {
        report.press(ch).unwrap();
    }
    let before = report;

    assert_eq!(report.press('7'), Err(Error::RolloverFull));
    assert_eq!(report, before);
}

#[test]
fn unmapped_key_leaves_report_untouched() {
    let mut report = KeyboardReport::empty();
    assert_eq!(report.press('é'), Err(Error::UnmappedKey('é')));
    assert_eq!(report.release('é'), Err(Error::UnmappedKey('é')));
    assert!(report.is_empty());
}

#[test]
fn release_of_key_not_down_is_noop() {
    let mut report = KeyboardReport::empty();
    report.press('1').unwrap();
    report.release('9').unwrap();
    assert_eq!(report.keycodes[0], 0x1E);
}

#[test]
fn release_all_clears_keys_and_modifiers() {
    let mut report = KeyboardReport::empty();
    report.press('A').unwrap();
    report.press('2').unwrap();
    report.release_all();
    assert!(report.is_empty());
}

#[test]
fn keyboard_report_serialize_buffer_too_small() {
    let report = KeyboardReport::empty();
    let mut buf = [0u8; 4];
    assert_eq!(report.serialize(&mut buf), 0);
}

#[test]
fn held_keys_serialize_in_boot_layout() {
    // Exactly the bytes the HID writer puts on the keyboard endpoint.
    let mut report = KeyboardReport::empty();
    report.press('A').unwrap();
    report.press('2').unwrap();

    let mut buf = [0u8; 8];
    let n = report.serialize(&mut buf);
    assert_eq!(&buf[..n], &[MODIFIER_LEFT_SHIFT, 0x00, 0x04, 0x1F, 0, 0, 0, 0]);
}

#[test]
fn empty_report_serializes_to_all_released() {
    let mut buf = [0xFFu8; 8];
    let n = KeyboardReport::empty().serialize(&mut buf);
    assert_eq!(&buf[..n], &[0u8; 8]);
}
