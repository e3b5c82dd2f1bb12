//! Shared test infrastructure for reaction-game integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use reaction_game::{
    ButtonLines, DigitDisplay, DisplayFrame, Lights, MemoryStore, Peripherals, ReactionGame,
    Speaker, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Display
// ============================================================================

/// Mock display that records every pass
pub struct MockDisplay {
    passes: heapless::Vec<(u16, bool), 512>,
    pub render_count: u32,
    pub blank_count: u32,
    pub last: Option<(u16, bool)>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            passes: heapless::Vec::new(),
            render_count: 0,
            blank_count: 0,
            last: None,
        }
    }

    /// Recorded passes as (value, enabled), oldest first; stops recording when full
    pub fn passes(&self) -> &[(u16, bool)] {
        &self.passes
    }

    pub fn clear_passes(&mut self) {
        self.passes.clear();
    }
}

impl DigitDisplay for MockDisplay {
    fn render(&mut self, frame: DisplayFrame, enabled: bool) {
        let pass = (frame.value(), enabled);
        self.render_count += 1;
        self.last = Some(pass);
        let _ = self.passes.push(pass);
    }

    fn blank(&mut self) {
        self.blank_count += 1;
    }
}

// ============================================================================
// Mock Buttons, Lights, Speaker, Delay
// ============================================================================

/// Mock button lines driven by a bitmask of pressed buttons
pub struct MockButtons {
    pressed: u8,
}

impl MockButtons {
    pub fn new() -> Self {
        Self { pressed: 0 }
    }

    pub fn hold(&mut self, mask: u8) {
        self.pressed = mask;
    }

    pub fn release_all(&mut self) {
        self.pressed = 0;
    }
}

impl ButtonLines for MockButtons {
    fn is_low(&mut self, index: usize) -> bool {
        self.pressed & (1 << index) != 0
    }
}

/// Mock lights remembering their last state
pub struct MockLights {
    pub on: [bool; 4],
}

impl MockLights {
    pub fn new() -> Self {
        Self { on: [false; 4] }
    }
}

impl Lights for MockLights {
    fn set(&mut self, index: usize, on: bool) {
        self.on[index] = on;
    }
}

/// Mock speaker recording tones as (frequency, duration)
pub struct MockSpeaker {
    tones: heapless::Vec<(u32, u32), 64>,
    pub silence_count: u32,
}

impl MockSpeaker {
    pub fn new() -> Self {
        Self {
            tones: heapless::Vec::new(),
            silence_count: 0,
        }
    }

    pub fn tones(&self) -> &[(u32, u32)] {
        &self.tones
    }

    pub fn last_tone(&self) -> Option<(u32, u32)> {
        self.tones.last().copied()
    }
}

impl Speaker for MockSpeaker {
    fn tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        let _ = self.tones.push((frequency_hz, duration_ms));
    }

    fn silence(&mut self) {
        self.silence_count += 1;
    }
}

/// Delay that only adds up how long it was asked to wait
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

// ============================================================================
// Scripted RNG
// ============================================================================

/// Raw `next_u32` output that `gen_range(0..bound)` maps to `value`
///
/// Lands `value / bound` of the way through the `u32` range, so the
/// widening-multiply sampler accepts it on the first try.
pub const fn pick(value: u32, bound: u32) -> u32 {
    ((value as u64) << 32).div_ceil(bound as u64) as u32
}

/// RNG returning a fixed cycle of values from `next_u32`
pub struct ScriptedRng {
    values: heapless::Vec<u32, 32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: heapless::Vec::from_slice(values).unwrap(),
            cursor: 0,
        }
    }

    /// Cycles through lights, each drawn as a pick from `0..4`
    pub fn lights(lights: &[u32]) -> Self {
        let mut values = heapless::Vec::new();
        for &light in lights {
            values.push(pick(light, 4)).unwrap();
        }
        Self { values, cursor: 0 }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl rand::RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.next_u32() as u8;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// ============================================================================
// Mock Pins
// ============================================================================

/// Which mock pin an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinId {
    Latch,
    Clock,
    Data,
    Digit(usize),
}

/// Shared log of (pin, level) writes, `true` = high
pub type PinLog = Rc<RefCell<Vec<(PinId, bool)>>>;

pub fn pin_log() -> PinLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Output pin appending every write to a shared log
pub struct MockPin {
    id: PinId,
    log: PinLog,
}

impl MockPin {
    pub fn new(id: PinId, log: &PinLog) -> Self {
        Self {
            id,
            log: Rc::clone(log),
        }
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.id, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.id, true));
        Ok(())
    }
}

/// Input pin reading a fixed level
pub struct MockInputPin {
    pub low: bool,
}

impl ErrorType for MockInputPin {
    type Error = Infallible;
}

impl InputPin for MockInputPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.low)
    }
}

// ============================================================================
// Game Harness
// ============================================================================

pub type TestGame<'t> = ReactionGame<
    't,
    TestInstant,
    MockTimeSource,
    MockDisplay,
    MockButtons,
    MockLights,
    MockSpeaker,
    MemoryStore,
    MockDelay,
    ScriptedRng,
>;

/// Builds a game over mock peripherals
pub fn new_game<'t>(
    timer: &'t MockTimeSource,
    store: MemoryStore,
    rng: ScriptedRng,
) -> TestGame<'t> {
    let peripherals = Peripherals::new(
        MockDisplay::new(),
        MockButtons::new(),
        MockLights::new(),
        MockSpeaker::new(),
        store,
        MockDelay::new(),
    );
    ReactionGame::new(peripherals, timer, rng)
}

pub fn hold(game: &mut TestGame<'_>, mask: u8) {
    game.peripherals_mut().buttons.lines_mut().hold(mask);
}

pub fn release(game: &mut TestGame<'_>) {
    game.peripherals_mut().buttons.lines_mut().release_all();
}

/// Holds button `index` in the menu long enough to start a game, then releases it
pub fn start_game(game: &mut TestGame<'_>, timer: &MockTimeSource, index: usize) {
    hold(game, 1 << index);
    game.tick();
    timer.advance(60);
    game.tick();
    release(game);
}
