//! HID keyboard report types and character-to-usage translation.

pub mod keyboard;

#[cfg(test)]
mod tests;

pub use keyboard::{char_to_usage, KeyboardReport, Usage};
