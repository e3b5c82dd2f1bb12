//! Indicator lights and speaker.

use embedded_hal::digital::OutputPin;

use crate::config::BUTTON_COUNT;

/// Trait for abstracting the four indicator lights.
pub trait Lights {
    /// Switches light `index` on or off.
    fn set(&mut self, index: usize, on: bool);

    /// Switches every light on or off.
    fn set_all(&mut self, on: bool) {
        for index in 0..BUTTON_COUNT {
            self.set(index, on);
        }
    }
}

/// [`Lights`] over four active-high output pins.
pub struct PinLights<P: OutputPin> {
    pins: [P; BUTTON_COUNT],
}

impl<P: OutputPin> PinLights<P> {
    /// Wraps four output pins and turns them off.
    pub fn new(pins: [P; BUTTON_COUNT]) -> Self {
        let mut lights = Self { pins };
        lights.set_all(false);
        lights
    }

    /// Returns the wrapped pins.
    pub fn release(self) -> [P; BUTTON_COUNT] {
        self.pins
    }
}

impl<P: OutputPin> Lights for PinLights<P> {
    fn set(&mut self, index: usize, on: bool) {
        let pin = &mut self.pins[index];
        let _ = if on { pin.set_high() } else { pin.set_low() };
    }
}

/// Trait for abstracting the square-wave speaker.
///
/// A new tone replaces whatever is playing.
pub trait Speaker {
    /// Starts a tone that stops by itself after `duration_ms`.
    fn tone(&mut self, frequency_hz: u32, duration_ms: u32);

    /// Stops the current tone, if any.
    fn silence(&mut self);
}
