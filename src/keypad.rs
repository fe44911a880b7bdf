//! Keypad scan task.
//!
//! Nine tactile switches (active-low with internal pull-up), one per key
//! in `config::KEYMAP`.  The task samples every button, hands level changes
//! to the keyboard emitter, queues serial announcements for presses, then
//! sleeps for the debounce interval.

use crate::config::{BUTTON_COUNT, DEBOUNCE_MS};
use crate::mapper::Mapper;
use crate::serial;
use crate::usb::emitter::QueuedKeyboard;
use crate::usb::AnnounceSender;
use defmt::{debug, info};
use embassy_nrf::gpio::Input;
use embassy_time::{Duration, Timer};

/// The board's keypad: pulled-up GPIO inputs bound to keys.
pub type Keypad = Mapper<Input<'static>, BUTTON_COUNT>;

/// Run the keypad polling loop forever.
pub async fn scan_task(
    mut keypad: Keypad,
    mut keyboard: QueuedKeyboard,
    announce_tx: AnnounceSender,
) -> ! {
    info!("Keypad scan started ({} ms interval)", DEBOUNCE_MS);

    loop {
        for event in keypad.tick(&mut keyboard) {
            if let Some(line) = serial::announcement(&event) {
                if announce_tx.try_send(line).is_err() {
                    debug!("Serial: announcement for button {} dropped", event.index + 1);
                }
            }
        }

        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
    }
}
