//! Key emitter backed by the keyboard report queue.
//!
//! Keeps the current boot keyboard report, applies each press/release to
//! it and queues a copy for the HID writer task.  Never blocks: a full
//! queue drops the report.

use super::ReportSender;
use crate::error::Error;
use crate::hid::KeyboardReport;
use crate::mapper::KeyEmitter;
use defmt::{debug, info};

pub struct QueuedKeyboard {
    report: KeyboardReport,
    tx: ReportSender,
}

impl QueuedKeyboard {
    pub fn new(tx: ReportSender) -> Self {
        Self {
            report: KeyboardReport::empty(),
            tx,
        }
    }

    fn send(&mut self) -> Result<(), Error> {
        debug!("HID report: {}", self.report);
        self.tx.try_send(self.report).map_err(|_| Error::QueueFull)
    }
}

impl KeyEmitter for QueuedKeyboard {
    fn open(&mut self) -> Result<(), Error> {
        self.report.release_all();
        info!("Keyboard emitter open");
        Ok(())
    }

    fn press(&mut self, key: char) -> Result<(), Error> {
        self.report.press(key)?;
        self.send()
    }

    fn release(&mut self, key: char) -> Result<(), Error> {
        self.report.release(key)?;
        self.send()
    }
}
