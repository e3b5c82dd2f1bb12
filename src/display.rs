//! Four-digit multiplexed 7-segment display behind a serial shift register.
//!
//! Provides [`DisplayFrame`], the decimal decomposition of a value, and
//! [`SegmentDisplay`], which clocks segment patterns out over a three-wire
//! link (latch, clock, data) and strobes one digit-enable line per position.
//! The [`DigitDisplay`] trait is the seam the game drives.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{DIGIT_COUNT, DIGIT_DWELL_US, SEGMENT_SETTLE_US};

/// Segment patterns for digits 0-9, bit 0 = segment A through bit 6 = segment G.
pub const SEGMENT_PATTERNS: [u8; 10] = [
    0b0011_1111, // 0
    0b0000_0110, // 1
    0b0101_1011, // 2
    0b0100_1111, // 3
    0b0110_0110, // 4
    0b0110_1101, // 5
    0b0111_1101, // 6
    0b0000_0111, // 7
    0b0111_1111, // 8
    0b0110_1111, // 9
];

/// Largest value the display can show.
pub const MAX_DISPLAY_VALUE: u16 = 9999;

/// Errors returned when building a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Value has more than four decimal digits.
    OutOfRange {
        /// The rejected value.
        value: u16,
    },
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::OutOfRange { value } => {
                write!(f, "{} does not fit in {} digits", value, DIGIT_COUNT)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// Decimal digits of a displayed value, least significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFrame {
    digits: [u8; DIGIT_COUNT],
}

impl DisplayFrame {
    /// Builds a frame, rejecting values above [`MAX_DISPLAY_VALUE`].
    pub fn new(value: u16) -> Result<Self, FrameError> {
        if value > MAX_DISPLAY_VALUE {
            return Err(FrameError::OutOfRange { value });
        }
        Ok(Self::truncating(value))
    }

    /// Builds a frame from the low four decimal digits of `value`.
    pub fn truncating(value: u16) -> Self {
        let mut digits = [0u8; DIGIT_COUNT];
        let mut rest = value;
        for digit in digits.iter_mut() {
            *digit = (rest % 10) as u8;
            rest /= 10;
        }
        Self { digits }
    }

    /// Digits, least significant first.
    pub fn digits(&self) -> [u8; DIGIT_COUNT] {
        self.digits
    }

    /// Recomposes the displayed value.
    pub fn value(&self) -> u16 {
        self.digits
            .iter()
            .rev()
            .fold(0u16, |acc, &digit| acc * 10 + digit as u16)
    }

    /// Segment pattern for the digit at `position` (0 = least significant).
    pub fn pattern(&self, position: usize) -> u8 {
        SEGMENT_PATTERNS[self.digits[position] as usize]
    }
}

/// Trait for abstracting the numeric display.
///
/// Each call to [`render`](DigitDisplay::render) is one full multiplexing pass
/// and blocks for its duration; the game loop's tick rate comes from here.
pub trait DigitDisplay {
    /// Drives one multiplexing pass of `frame`.
    ///
    /// With `enabled` false the segment data is still clocked out but no digit
    /// is lit.
    fn render(&mut self, frame: DisplayFrame, enabled: bool);

    /// Turns every digit off.
    fn blank(&mut self);
}

/// Electrical level that lights a digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitEnable {
    /// Driving the line high lights the digit.
    #[default]
    ActiveHigh,
    /// Driving the line low lights the digit (common-cathode sink drivers).
    ActiveLow,
}

/// Shift-register driven 4-digit display.
///
/// `digits[0]` enables the rightmost (least significant) digit.
///
/// # Type Parameters
/// * `LT` - Latch (register clock) output
/// * `CK` - Shift clock output
/// * `DT` - Serial data output
/// * `DG` - Digit-enable outputs
/// * `DL` - Delay provider for settle and dwell timing
pub struct SegmentDisplay<LT, CK, DT, DG, DL>
where
    LT: OutputPin,
    CK: OutputPin,
    DT: OutputPin,
    DG: OutputPin,
    DL: DelayNs,
{
    latch: LT,
    clock: CK,
    data: DT,
    digits: [DG; DIGIT_COUNT],
    delay: DL,
    enable: DigitEnable,
}

impl<LT, CK, DT, DG, DL> SegmentDisplay<LT, CK, DT, DG, DL>
where
    LT: OutputPin,
    CK: OutputPin,
    DT: OutputPin,
    DG: OutputPin,
    DL: DelayNs,
{
    /// Creates a driver with every digit turned off.
    pub fn new(
        latch: LT,
        clock: CK,
        data: DT,
        digits: [DG; DIGIT_COUNT],
        delay: DL,
        enable: DigitEnable,
    ) -> Self {
        let mut display = Self {
            latch,
            clock,
            data,
            digits,
            delay,
            enable,
        };
        let _ = display.clock.set_low();
        let _ = display.latch.set_high();
        display.blank_digits();
        display
    }

    /// Returns the pins and delay, in construction order.
    pub fn release(self) -> (LT, CK, DT, [DG; DIGIT_COUNT], DL) {
        (self.latch, self.clock, self.data, self.digits, self.delay)
    }

    fn set_digit(&mut self, position: usize, lit: bool) {
        let high = match self.enable {
            DigitEnable::ActiveHigh => lit,
            DigitEnable::ActiveLow => !lit,
        };
        let pin = &mut self.digits[position];
        let _ = if high { pin.set_high() } else { pin.set_low() };
    }

    fn blank_digits(&mut self) {
        for position in 0..DIGIT_COUNT {
            self.set_digit(position, false);
        }
    }

    /// Clocks `pattern` out most significant bit first.
    fn shift_out(&mut self, pattern: u8) {
        for bit in (0..8).rev() {
            let _ = if pattern & (1 << bit) != 0 {
                self.data.set_high()
            } else {
                self.data.set_low()
            };
            let _ = self.clock.set_high();
            let _ = self.clock.set_low();
        }
    }
}

impl<LT, CK, DT, DG, DL> DigitDisplay for SegmentDisplay<LT, CK, DT, DG, DL>
where
    LT: OutputPin,
    CK: OutputPin,
    DT: OutputPin,
    DG: OutputPin,
    DL: DelayNs,
{
    fn render(&mut self, frame: DisplayFrame, enabled: bool) {
        for position in 0..DIGIT_COUNT {
            self.blank_digits();
            self.delay.delay_us(SEGMENT_SETTLE_US);

            // Register outputs hold while the latch is low
            let _ = self.latch.set_low();
            self.shift_out(frame.pattern(position));
            let _ = self.latch.set_high();
            self.delay.delay_us(SEGMENT_SETTLE_US);

            if enabled {
                self.set_digit(position, true);
            }
            self.delay.delay_us(DIGIT_DWELL_US);
        }
    }

    fn blank(&mut self) {
        self.blank_digits();
    }
}
