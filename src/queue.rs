//! Bounded queues between the keypad and the USB tasks.
//!
//! Producers never wait: the keypad uses `try_send`, so whatever piles up
//! while the host is away is stale by the time a consumer comes up.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;

/// Drop everything currently queued on `rx`.  Returns the number dropped.
pub fn discard_pending<M: RawMutex, T, const N: usize>(rx: &Receiver<'_, M, T, N>) -> usize {
    let mut dropped = 0;
    while rx.try_receive().is_ok() {
        dropped += 1;
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REPORT_QUEUE_DEPTH;
    use crate::hid::KeyboardReport;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;

    type Reports = Channel<NoopRawMutex, KeyboardReport, REPORT_QUEUE_DEPTH>;

    #[test]
    fn keystrokes_before_enumeration_are_not_replayed() {
        let channel = Reports::new();
        let tx = channel.sender();
        let rx = channel.receiver();

        // Two taps of '1' while the host has not configured the device.
        let mut report = KeyboardReport::empty();
        for _ in 0..2 {
            report.press('1').unwrap();
            tx.try_send(report).unwrap();
            report.release('1').unwrap();
            tx.try_send(report).unwrap();
        }

        assert_eq!(discard_pending(&rx), 4);
        assert!(rx.try_receive().is_err());

        // Reports after enumeration flow normally.
        report.press('2').unwrap();
        tx.try_send(report).unwrap();
        assert_eq!(rx.try_receive().unwrap().keycodes[0], 0x1F);
    }

    #[test]
    fn full_queue_is_emptied() {
        let channel = Reports::new();
        let tx = channel.sender();

        while tx.try_send(KeyboardReport::empty()).is_ok() {}

        assert_eq!(discard_pending(&channel.receiver()), REPORT_QUEUE_DEPTH);
        assert!(tx.try_send(KeyboardReport::empty()).is_ok());
    }

    #[test]
    fn empty_queue_drops_nothing() {
        let channel = Reports::new();
        assert_eq!(discard_pending(&channel.receiver()), 0);
    }
}
