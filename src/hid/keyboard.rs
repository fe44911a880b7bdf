//! USB HID keyboard report (boot protocol compatible).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```
//!
//! Keys are pressed and released by character.  A character is looked up
//! on the US layout; characters typed with Shift also hold Left Shift while
//! their key is down.

use crate::error::Error;

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Left Shift bit in the modifier byte.
pub const MODIFIER_LEFT_SHIFT: u8 = 0x02;

/// A key usage code plus whether Shift is needed to type the character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Usage {
    /// USB HID usage code (Keyboard/Keypad page).
    pub code: u8,
    /// Character is the shifted variant of `code`.
    pub shift: bool,
}

impl Usage {
    const fn plain(code: u8) -> Option<Self> {
        Some(Self { code, shift: false })
    }

    const fn shifted(code: u8) -> Option<Self> {
        Some(Self { code, shift: true })
    }
}

/// Map a character to its US-layout key usage.
///
/// Covers printable ASCII plus Enter (`\n`), Tab, Backspace and Escape.
pub fn char_to_usage(ch: char) -> Option<Usage> {
    match ch {
        'a'..='z' => Usage::plain(0x04 + (ch as u8 - b'a')),
        'A'..='Z' => Usage::shifted(0x04 + (ch as u8 - b'A')),
        '1'..='9' => Usage::plain(0x1E + (ch as u8 - b'1')),
        '0' => Usage::plain(0x27),
        '\n' => Usage::plain(0x28),
        '\x1b' => Usage::plain(0x29),
        '\x08' => Usage::plain(0x2A),
        '\t' => Usage::plain(0x2B),
        ' ' => Usage::plain(0x2C),
        '-' => Usage::plain(0x2D),
        '=' => Usage::plain(0x2E),
        '[' => Usage::plain(0x2F),
        ']' => Usage::plain(0x30),
        '\\' => Usage::plain(0x31),
        ';' => Usage::plain(0x33),
        '\'' => Usage::plain(0x34),
        '`' => Usage::plain(0x35),
        ',' => Usage::plain(0x36),
        '.' => Usage::plain(0x37),
        '/' => Usage::plain(0x38),
        '!' => Usage::shifted(0x1E),
        '@' => Usage::shifted(0x1F),
        '#' => Usage::shifted(0x20),
        '$' => Usage::shifted(0x21),
        '%' => Usage::shifted(0x22),
        '^' => Usage::shifted(0x23),
        '&' => Usage::shifted(0x24),
        '*' => Usage::shifted(0x25),
        '(' => Usage::shifted(0x26),
        ')' => Usage::shifted(0x27),
        '_' => Usage::shifted(0x2D),
        '+' => Usage::shifted(0x2E),
        '{' => Usage::shifted(0x2F),
        '}' => Usage::shifted(0x30),
        '|' => Usage::shifted(0x31),
        ':' => Usage::shifted(0x33),
        '"' => Usage::shifted(0x34),
        '~' => Usage::shifted(0x35),
        '<' => Usage::shifted(0x36),
        '>' => Usage::shifted(0x37),
        '?' => Usage::shifted(0x38),
        _ => None,
    }
}

/// Standard USB HID boot-protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte (always 0x00 per HID spec).
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Create an empty (all-keys-released) report.
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; 6],
        }
    }

    /// Add the key for `ch` to the report.
    ///
    /// Pressing a key that is already down leaves the key slots unchanged.
    /// On error the report is not modified.
    pub fn press(&mut self, ch: char) -> Result<(), Error> {
        let usage = char_to_usage(ch).ok_or(Error::UnmappedKey(ch))?;

        if !self.keycodes.contains(&usage.code) {
            let slot = self
                .keycodes
                .iter_mut()
                .find(|k| **k == 0)
                .ok_or(Error::RolloverFull)?;
            *slot = usage.code;
        }

        if usage.shift {
            self.modifier |= MODIFIER_LEFT_SHIFT;
        }
        Ok(())
    }

    /// Remove the key for `ch` from the report.
    pub fn release(&mut self, ch: char) -> Result<(), Error> {
        let usage = char_to_usage(ch).ok_or(Error::UnmappedKey(ch))?;

        for k in self.keycodes.iter_mut().filter(|k| **k == usage.code) {
            *k = 0;
        }
        if usage.shift {
            self.modifier &= !MODIFIER_LEFT_SHIFT;
        }
        Ok(())
    }

    /// Release every key and modifier.
    pub fn release_all(&mut self) {
        *self = Self::empty();
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (8, or 0 if `buf` is too small).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..8].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }

    /// Returns `true` if no keys are pressed (release event).
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}
