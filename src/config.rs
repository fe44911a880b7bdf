//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// Keypad

/// Number of buttons on the keypad.
pub const BUTTON_COUNT: usize = 9;

/// Button bindings as `(pin_id, key)` pairs, in scan order.
///
/// Pin ids are P0.xx numbers on the nRF52840.  Each button shorts its pin
/// to ground, so a pressed button reads LOW through the internal pull-up.
///
///   Button 1 → P0.02 → '1'      Button 6 → P0.07 → '6'
///   Button 2 → P0.03 → '2'      Button 7 → P0.08 → '7'
///   Button 3 → P0.04 → '3'      Button 8 → P0.09 → '8' (NFC1)
///   Button 4 → P0.05 → '4'      Button 9 → P0.10 → '9' (NFC2)
///   Button 5 → P0.06 → '5'
///
/// P0.09/P0.10 only work as GPIO with the `nfc-pins-as-gpio` feature.
/// Pins must be unique; nothing checks it at runtime.
pub const KEYMAP: [(u8, char); BUTTON_COUNT] = [
    (2, '1'),
    (3, '2'),
    (4, '3'),
    (5, '4'),
    (6, '5'),
    (7, '6'),
    (8, '7'),
    (9, '8'),
    (10, '9'),
];

/// Delay between two scans of the keypad (ms).  This is the only debounce.
pub const DEBOUNCE_MS: u64 = 50;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "macropad";
pub const USB_PRODUCT: &str = "Macro Keypad";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 1;

/// Max packet size of the CDC-ACM data endpoints.
pub const USB_SERIAL_PACKET_SIZE: u16 = 64;

/// How often the serial task checks for a terminal raising DTR (ms).
pub const SERIAL_DTR_POLL_MS: u64 = 100;

// Queues

/// Depth of the keyboard report queue between the scan task and the HID writer.
pub const REPORT_QUEUE_DEPTH: usize = 16;

/// Depth of the announcement queue between the scan task and the serial task.
pub const ANNOUNCE_QUEUE_DEPTH: usize = 16;
