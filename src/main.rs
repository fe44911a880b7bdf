//! Firmware entry point for the nRF52840 macro keypad.
//!
//! Spawns four tasks on the thread-mode executor:
//!
//! - `usb_task`    - USB enumeration and endpoint servicing
//! - `hid_task`    - writes queued keyboard reports to the host
//! - `serial_task` - writes button announcements to the CDC-ACM port
//! - `scan_task`   - polls the buttons every `DEBOUNCE_MS`

#![no_std]
#![no_main]

use defmt::{debug_assert_eq, info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Input, Pin, Pull};
use embassy_nrf::pac;
use embassy_usb::UsbDevice;
use macropad::config::{BUTTON_COUNT, KEYMAP};
use macropad::keypad::{self, Keypad};
use macropad::mapper::Mapper;
use macropad::usb::device::{self, KeyboardWriter, SerialPort, UsbDriver};
use macropad::usb::emitter::QueuedKeyboard;
use macropad::usb::{AnnounceChannel, ReportChannel};
use {defmt_rtt as _, panic_probe as _};

static REPORTS: ReportChannel = ReportChannel::new();
static ANNOUNCEMENTS: AnnounceChannel = AnnounceChannel::new();

#[embassy_executor::task]
async fn usb_task(usb: UsbDevice<'static, UsbDriver>) -> ! {
    device::run_usb_device(usb).await
}

#[embassy_executor::task]
async fn hid_task(writer: KeyboardWriter) -> ! {
    device::hid_writer_task(writer, REPORTS.receiver()).await
}

#[embassy_executor::task]
async fn serial_task(serial: SerialPort) -> ! {
    device::serial_task(serial, ANNOUNCEMENTS.receiver()).await
}

#[embassy_executor::task]
async fn scan_task(keypad: Keypad, keyboard: QueuedKeyboard) -> ! {
    keypad::scan_task(keypad, keyboard, ANNOUNCEMENTS.sender()).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("macropad starting");

    // USB needs the external high-frequency crystal.
    pac::CLOCK.tasks_hfclkstart().write_value(1);
    while pac::CLOCK.events_hfclkstarted().read() != 1 {}

    // Same order as `KEYMAP`.
    let pins: [AnyPin; BUTTON_COUNT] = [
        p.P0_02.degrade(),
        p.P0_03.degrade(),
        p.P0_04.degrade(),
        p.P0_05.degrade(),
        p.P0_06.degrade(),
        p.P0_07.degrade(),
        p.P0_08.degrade(),
        p.P0_09.degrade(),
        p.P0_10.degrade(),
    ];
    for (pin, &(pin_id, _)) in pins.iter().zip(KEYMAP.iter()) {
        debug_assert_eq!(pin.pin(), pin_id);
    }
    let inputs = pins.map(|pin| Input::new(pin, Pull::Up));

    let usb = device::init(p.USBD);

    let mut keyboard = QueuedKeyboard::new(REPORTS.sender());
    let keypad: Keypad = Mapper::setup(&KEYMAP, inputs, &mut keyboard);

    unwrap!(spawner.spawn(usb_task(usb.device)));
    unwrap!(spawner.spawn(hid_task(usb.keyboard_writer)));
    unwrap!(spawner.spawn(serial_task(usb.serial)));
    unwrap!(spawner.spawn(scan_task(keypad, keyboard)));
}
