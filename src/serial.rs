//! Button announcements on the USB serial port.
//!
//! The desktop companion app reads the CDC-ACM port line by line and
//! looks for `Button <n> pressed`, with `n` counted from 1 in scan order.
//! Releases are not announced.

use crate::mapper::{KeyAction, KeyEvent};
use core::fmt::Write;
use heapless::String;

/// Longest line we produce: "Button 256 pressed\r\n".
pub const ANNOUNCEMENT_CAPACITY: usize = 24;

/// A single announcement line, CR/LF terminated.
pub type Announcement = String<ANNOUNCEMENT_CAPACITY>;

/// Format the line for `event`, or `None` for events that are not announced.
pub fn announcement(event: &KeyEvent) -> Option<Announcement> {
    match event.action {
        KeyAction::Press => Some(pressed_line(event.index)),
        KeyAction::Release => None,
    }
}

/// `Button <index + 1> pressed\r\n`.
pub fn pressed_line(index: u8) -> Announcement {
    let mut line = Announcement::new();
    // Fits: the longest number is three digits.
    let _ = write!(line, "Button {} pressed\r\n", u16::from(index) + 1);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(index: u8, action: KeyAction) -> KeyEvent {
        KeyEvent {
            index,
            pin: index + 2,
            key: '1',
            action,
        }
    }

    #[test]
    fn press_is_announced_one_based() {
        let line = announcement(&event(0, KeyAction::Press)).unwrap();
        assert_eq!(line.as_str(), "Button 1 pressed\r\n");

        let line = announcement(&event(8, KeyAction::Press)).unwrap();
        assert_eq!(line.as_str(), "Button 9 pressed\r\n");
    }

    #[test]
    fn release_is_silent() {
        assert!(announcement(&event(3, KeyAction::Release)).is_none());
    }

    #[test]
    fn widest_index_fits() {
        assert_eq!(pressed_line(u8::MAX).as_str(), "Button 256 pressed\r\n");
    }
}
