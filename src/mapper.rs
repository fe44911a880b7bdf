//! Button-to-key mapper - polls the keypad and turns level changes into
//! key presses and releases.
//!
//! Every button is active-low with a pull-up: LOW means pressed, HIGH
//! means released.  Each [`Mapper::tick`] samples all bindings in order
//! and emits an event only when a binding's level differs from the last
//! sample, so a held button produces exactly one press and one release.
//!
//! There is no debounce beyond the caller's fixed delay between ticks.

use crate::error::Error;
use embedded_hal::digital::InputPin;
use heapless::Vec;

/// Electrical level of a button, as seen through the pull-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Pin pulled to ground (LOW).
    Pressed,
    /// Pin held high by the pull-up (HIGH).
    #[default]
    Released,
}

impl Level {
    /// Level for a pin that reads LOW (`true`) or HIGH (`false`).
    pub fn from_low(is_low: bool) -> Self {
        if is_low {
            Level::Pressed
        } else {
            Level::Released
        }
    }
}

/// What a level change means for the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    Press,
    Release,
}

/// One emitted transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Binding index in scan order.
    pub index: u8,
    /// Pin id of the binding.
    pub pin: u8,
    /// Key character of the binding.
    pub key: char,
    pub action: KeyAction,
}

/// Sink for key presses and releases (the USB HID keyboard on target).
pub trait KeyEmitter {
    /// Prepare the transport.  Called once before the first tick.
    fn open(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn press(&mut self, key: char) -> Result<(), Error>;

    fn release(&mut self, key: char) -> Result<(), Error>;
}

/// A button pin bound to one key, with its last observed level.
pub struct Binding<P> {
    pin_id: u8,
    key: char,
    pin: P,
    level: Level,
}

impl<P: InputPin> Binding<P> {
    /// Bind `pin` to `key`.  The pin must already be a pulled-up input.
    pub fn new(pin_id: u8, key: char, pin: P) -> Self {
        Self {
            pin_id,
            key,
            pin,
            level: Level::Released,
        }
    }

    pub fn pin_id(&self) -> u8 {
        self.pin_id
    }

    pub fn key(&self) -> char {
        self.key
    }

    /// Last observed level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Read the pin and record the level.
    ///
    /// Returns the action to emit if the level changed since the last
    /// sample.  On a read error the recorded level is kept.
    fn sample(&mut self) -> Result<Option<KeyAction>, Error> {
        let current = Level::from_low(self.pin.is_low().map_err(|_| Error::Pin)?);
        let previous = core::mem::replace(&mut self.level, current);

        Ok(match (previous, current) {
            (Level::Released, Level::Pressed) => Some(KeyAction::Press),
            (Level::Pressed, Level::Released) => Some(KeyAction::Release),
            _ => None,
        })
    }
}

/// The keypad: a fixed, ordered set of bindings.
pub struct Mapper<P, const N: usize> {
    bindings: [Binding<P>; N],
}

impl<P: InputPin, const N: usize> Mapper<P, N> {
    /// Build a mapper from ready bindings.  All start released.
    pub fn new(bindings: [Binding<P>; N]) -> Self {
        Self { bindings }
    }

    /// Pair each `(pin_id, key)` entry of `keymap` with the pin at the
    /// same position in `pins`, then open the emitter.
    ///
    /// Failing to open the emitter is logged and otherwise ignored: the
    /// keypad keeps scanning, events just go nowhere.
    pub fn setup<E: KeyEmitter>(keymap: &[(u8, char); N], pins: [P; N], emitter: &mut E) -> Self {
        let mut index = 0;
        let bindings = pins.map(|pin| {
            // Both arrays have length N, so `index` stays in range.
            let (pin_id, key) = keymap[index];
            index += 1;
            Binding::new(pin_id, key, pin)
        });

        if let Err(_e) = emitter.open() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Key emitter failed to open: {}", _e);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("Keypad ready: {} buttons", N);

        Self::new(bindings)
    }

    /// Sample every binding once, in index order, emitting a press or
    /// release for each level change.
    ///
    /// Returns the events of this tick in emission order.  Emitter errors
    /// are logged and dropped; the new level is recorded either way.
    pub fn tick<E: KeyEmitter>(&mut self, emitter: &mut E) -> Vec<KeyEvent, N> {
        let mut events = Vec::new();

        for (index, binding) in self.bindings.iter_mut().enumerate() {
            let action = match binding.sample() {
                Ok(Some(action)) => action,
                Ok(None) => continue,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Button {}: {}", index + 1, _e);
                    continue;
                }
            };

            let event = KeyEvent {
                index: index as u8,
                pin: binding.pin_id,
                key: binding.key,
                action,
            };

            #[cfg(feature = "defmt")]
            defmt::debug!("Button {} (pin {}): {} {}", index + 1, event.pin, action, event.key);

            let result = match action {
                KeyAction::Press => emitter.press(event.key),
                KeyAction::Release => emitter.release(event.key),
            };
            if let Err(_e) = result {
                #[cfg(feature = "defmt")]
                defmt::warn!("Button {}: {} dropped: {}", index + 1, action, _e);
            }

            // Capacity is N and each binding yields at most one event.
            let _ = events.push(event);
        }

        events
    }

    pub fn bindings(&self) -> &[Binding<P>] {
        &self.bindings
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }
}
