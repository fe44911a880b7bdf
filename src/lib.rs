//! Library interface for macropad.
//!
//! The pure logic (button mapper, keyboard reports, serial announcements)
//! builds on any target and is tested on the host:
//!
//! Usage: `cargo test --lib` or `cargo test`
//!
//! The hardware glue (`keypad`, `usb`) needs the `embedded` feature and is
//! only used by the firmware binary in `main.rs`.

#![cfg_attr(not(test), no_std)]

// ═══════════════════════════════════════════════════════════════════════════
// Host-testable modules
// ═══════════════════════════════════════════════════════════════════════════

pub mod config;
pub mod error;
pub mod hid;
pub mod mapper;
pub mod queue;
pub mod serial;

pub use error::Error;
pub use mapper::{Binding, KeyAction, KeyEmitter, KeyEvent, Level, Mapper};

// ═══════════════════════════════════════════════════════════════════════════
// nRF52840 glue
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(feature = "embedded")]
pub mod keypad;
#[cfg(feature = "embedded")]
pub mod usb;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
