//! Button sampling and edge detection.
//!
//! Buttons are pulled up and read active-low. [`InputSampler`] turns the four
//! raw lines into a [`ButtonMask`]; comparing two masks with
//! [`ButtonMask::edges`] yields per-button [`ButtonEdge`] records.

use embedded_hal::digital::InputPin;
use heapless::Vec;

use crate::config::BUTTON_COUNT;

/// Trait for abstracting the raw button lines.
pub trait ButtonLines {
    /// Returns true if line `index` currently reads low.
    fn is_low(&mut self, index: usize) -> bool;
}

/// [`ButtonLines`] over four `embedded-hal` input pins.
///
/// A pin that fails to read is reported as released.
pub struct PinButtons<P: InputPin> {
    pins: [P; BUTTON_COUNT],
}

impl<P: InputPin> PinButtons<P> {
    /// Wraps four pulled-up input pins.
    pub fn new(pins: [P; BUTTON_COUNT]) -> Self {
        Self { pins }
    }

    /// Returns the wrapped pins.
    pub fn release(self) -> [P; BUTTON_COUNT] {
        self.pins
    }
}

impl<P: InputPin> ButtonLines for PinButtons<P> {
    fn is_low(&mut self, index: usize) -> bool {
        self.pins[index].is_low().unwrap_or(false)
    }
}

/// Pressed state of all buttons, one bit per button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(u8);

impl ButtonMask {
    /// No button pressed.
    pub const NONE: Self = ButtonMask(0);

    /// Every button pressed.
    pub const ALL: Self = ButtonMask((1 << BUTTON_COUNT) - 1);

    /// Creates a mask from raw bits; bits above the button count are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        ButtonMask(bits & Self::ALL.0)
    }

    /// Mask with only button `index` pressed.
    pub const fn only(index: usize) -> Self {
        Self::from_bits(1 << index)
    }

    /// Raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if button `index` is pressed.
    pub const fn is_pressed(self, index: usize) -> bool {
        self.0 & (1 << index) != 0
    }

    /// Number of pressed buttons.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if every button is pressed.
    pub const fn is_all(self) -> bool {
        self.0 == Self::ALL.0
    }

    /// Index of the pressed button if exactly one is pressed.
    pub fn single(self) -> Option<usize> {
        if self.count() == 1 {
            Some(self.0.trailing_zeros() as usize)
        } else {
            None
        }
    }

    /// Per-button transitions from `previous` to `self`.
    ///
    /// Buttons released in both samples are omitted.
    pub fn edges(self, previous: ButtonMask) -> Vec<ButtonEdge, BUTTON_COUNT> {
        let mut edges = Vec::new();
        for index in 0..BUTTON_COUNT {
            let edge = ButtonEdge {
                index,
                was_pressed: previous.is_pressed(index),
                is_pressed: self.is_pressed(index),
            };
            if edge.was_pressed || edge.is_pressed {
                // Capacity equals the button count
                let _ = edges.push(edge);
            }
        }
        edges
    }
}

/// One button's state across two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEdge {
    /// Button index.
    pub index: usize,
    /// Pressed in the previous sample.
    pub was_pressed: bool,
    /// Pressed in the current sample.
    pub is_pressed: bool,
}

impl ButtonEdge {
    /// Button went down this sample.
    pub fn is_press(&self) -> bool {
        !self.was_pressed && self.is_pressed
    }

    /// Button is still down from the previous sample.
    pub fn is_hold(&self) -> bool {
        self.was_pressed && self.is_pressed
    }

    /// Button came up this sample.
    pub fn is_release(&self) -> bool {
        self.was_pressed && !self.is_pressed
    }
}

/// Stateless reader of the four button lines.
pub struct InputSampler<B: ButtonLines> {
    lines: B,
}

impl<B: ButtonLines> InputSampler<B> {
    /// Creates a sampler over `lines`.
    pub fn new(lines: B) -> Self {
        Self { lines }
    }

    /// Reads every line; a set bit means the line is low.
    pub fn sample(&mut self) -> ButtonMask {
        let mut bits = 0u8;
        for index in 0..BUTTON_COUNT {
            if self.lines.is_low(index) {
                bits |= 1 << index;
            }
        }
        ButtonMask(bits)
    }

    /// Returns a reference to the underlying lines.
    pub fn lines(&self) -> &B {
        &self.lines
    }

    /// Returns a mutable reference to the underlying lines.
    pub fn lines_mut(&mut self) -> &mut B {
        &mut self.lines
    }
}
