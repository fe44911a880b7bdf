//! USB Device subsystem - presents a composite device to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  We create a **composite device** with two functions:
//!
//! - Interface 0:   Keyboard (boot protocol HID)
//! - Interface 1-2: CDC-ACM serial port (button announcements)
//!
//! The keypad task talks to the USB tasks only through the two channels
//! defined here.

pub mod device;
pub mod emitter;

use crate::config::{ANNOUNCE_QUEUE_DEPTH, REPORT_QUEUE_DEPTH};
use crate::hid::KeyboardReport;
use crate::serial::Announcement;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

/// Keypad → HID writer.
pub type ReportChannel = Channel<CriticalSectionRawMutex, KeyboardReport, REPORT_QUEUE_DEPTH>;
pub type ReportSender = Sender<'static, CriticalSectionRawMutex, KeyboardReport, REPORT_QUEUE_DEPTH>;
pub type ReportReceiver =
    Receiver<'static, CriticalSectionRawMutex, KeyboardReport, REPORT_QUEUE_DEPTH>;

/// Keypad → serial port.
pub type AnnounceChannel = Channel<CriticalSectionRawMutex, Announcement, ANNOUNCE_QUEUE_DEPTH>;
pub type AnnounceSender =
    Sender<'static, CriticalSectionRawMutex, Announcement, ANNOUNCE_QUEUE_DEPTH>;
pub type AnnounceReceiver =
    Receiver<'static, CriticalSectionRawMutex, Announcement, ANNOUNCE_QUEUE_DEPTH>;
