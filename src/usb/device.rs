//! USB composite device - HID keyboard + CDC-ACM serial port.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes the keyboard endpoint and the serial class.

use super::{AnnounceReceiver, ReportReceiver};
use crate::config;
use crate::hid::keyboard::{KeyboardReport, KEYBOARD_REPORT_SIZE};
use crate::queue::discard_pending;
use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_time::{Duration, Timer};
use embassy_usb::class::cdc_acm::{CdcAcmClass, State as CdcState};
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;
use usbd_hid::descriptor::{KeyboardReport as BootKeyboardDescriptor, SerializedDescriptor};

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

/// Concrete USB driver on the nRF52840.
pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// HID endpoint writer for 8-byte boot keyboard reports.
pub type KeyboardWriter = HidWriter<'static, UsbDriver, 8>;

/// CDC-ACM class carrying the button announcements.
pub type SerialPort = CdcAcmClass<'static, UsbDriver>;

static KB_STATE: StaticCell<State> = StaticCell::new();
static SERIAL_STATE: StaticCell<CdcState> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Build result containing the USB device runner, the keyboard writer
/// and the serial port.
pub struct UsbKeypad {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard_writer: KeyboardWriter,
    pub serial: SerialPort,
}

/// Initialise the USB stack and create the composite device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbKeypad {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // CDC-ACM needs an interface association descriptor in a composite device.
    usb_config.device_class = 0xEF;
    usb_config.device_sub_class = 0x02;
    usb_config.device_protocol = 0x01;
    usb_config.composite_with_iads = true;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    // Build the USB device.
    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let kb_state = KB_STATE.init(State::new());
    let kb_config = HidConfig {
        report_descriptor: BootKeyboardDescriptor::desc(),
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let keyboard_writer = HidWriter::new(&mut builder, kb_state, kb_config);

    let serial_state = SERIAL_STATE.init(CdcState::new());
    let serial = CdcAcmClass::new(&mut builder, serial_state, config::USB_SERIAL_PACKET_SIZE);

    let device = builder.build();

    info!("USB composite device initialised (keyboard + serial)");

    UsbKeypad {
        device,
        keyboard_writer,
        serial,
    }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, and endpoint servicing.
/// It runs forever (or until the USB cable is disconnected).
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Keyboard report task - reads reports queued by the keypad and
/// writes them to the HID endpoint.
///
/// Reports queued before the host configured the device are discarded,
/// and the host first sees an all-released report.
pub async fn hid_writer_task(mut keyboard: KeyboardWriter, report_rx: ReportReceiver) -> ! {
    info!("HID writer task started - waiting for enumeration");
    keyboard.ready().await;

    let stale = discard_pending(&report_rx);
    info!("HID keyboard endpoint ready, {} stale reports dropped", stale);

    let mut buf = [0u8; KEYBOARD_REPORT_SIZE];

    let n = KeyboardReport::empty().serialize(&mut buf);
    if let Err(_e) = keyboard.write(&buf[..n]).await {
        warn!("USB keyboard write failed");
    }

    loop {
        let report = report_rx.receive().await;

        let n = report.serialize(&mut buf);
        if let Err(_e) = keyboard.write(&buf[..n]).await {
            warn!("USB keyboard write failed");
        }
    }
}

/// Serial announcement task - forwards `Button <n> pressed` lines to the
/// CDC-ACM port while the host holds DTR (a terminal has the port open).
///
/// Lines produced while DTR is low are discarded.
pub async fn serial_task(mut serial: SerialPort, announce_rx: AnnounceReceiver) -> ! {
    info!("Serial task started");

    loop {
        // Endpoint enabled: the host configured the device.
        serial.wait_connection().await;

        while !serial.dtr() {
            Timer::after(Duration::from_millis(config::SERIAL_DTR_POLL_MS)).await;
        }
        info!("Serial: terminal attached");

        // Stale lines from before the terminal opened the port.
        discard_pending(&announce_rx);

        loop {
            let line = announce_rx.receive().await;
            if !serial.dtr() {
                break;
            }
            if let Err(_e) = serial.write_packet(line.as_bytes()).await {
                warn!("Serial write failed");
                break;
            }
        }

        info!("Serial: terminal detached");
    }
}
