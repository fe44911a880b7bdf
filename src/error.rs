//! Unified error type for macropad.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

use core::fmt;

/// Top-level error type used across the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // GPIO
    /// Reading a button input failed.
    Pin,

    // HID
    /// The character has no USB HID usage code.
    UnmappedKey(char),

    /// All six key slots of the boot report are occupied.
    RolloverFull,

    // Transport
    /// The report queue to the USB task is full; the report was dropped.
    QueueFull,

    /// USB stack returned an error.
    Usb,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pin => f.write_str("button input read failed"),
            Error::UnmappedKey(c) => write!(f, "no HID usage for {:?}", c),
            Error::RolloverFull => f.write_str("six-key rollover exceeded"),
            Error::QueueFull => f.write_str("report queue full"),
            Error::Usb => f.write_str("USB transfer failed"),
        }
    }
}
