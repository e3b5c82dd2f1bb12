//! Prompt generation: light selection and the difficulty curve.

use rand::{Rng, RngCore};

use crate::config::{
    BUTTON_COUNT, INITIAL_WINDOW_TICKS, LIGHT_TONES_HZ, MIN_WINDOW_TICKS, REPEAT_REDRAW_CHANCE,
    TONE_MS_PER_TICK, WINDOW_DECAY_BASE, WINDOW_DECAY_PER_LEVEL,
};

/// A freshly issued prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Prompt {
    /// Light to arm.
    pub light: u8,
    /// Level reached by issuing this prompt.
    pub level: i16,
    /// Ticks the player has to respond.
    pub window: i32,
}

impl Prompt {
    /// Tone frequency for the prompt's light.
    pub fn tone_hz(&self) -> u32 {
        LIGHT_TONES_HZ[self.light as usize]
    }

    /// Tone length, proportional to the response window.
    pub fn tone_ms(&self) -> u32 {
        self.window as u32 * TONE_MS_PER_TICK
    }
}

/// Uniform draw from `0..bound`.
#[inline]
fn draw<R: RngCore>(rng: &mut R, bound: u32) -> u32 {
    rng.gen_range(0..bound)
}

/// Response window in ticks for the prompt issued at `level`.
///
/// `floor(150 * 1.6^(-level * 0.05))`, never below 10.
pub fn response_window(level: i16) -> i32 {
    let exponent = -(level as f32) * WINDOW_DECAY_PER_LEVEL;
    let window = libm::floorf(INITIAL_WINDOW_TICKS * libm::powf(WINDOW_DECAY_BASE, exponent));
    (window as i32).max(MIN_WINDOW_TICKS)
}

/// Picks the next light, redrawing a repeat of `previous` six times in ten.
///
/// The redraw is itself unbiased, so a repeat can still come out of it.
pub fn choose_light<R: RngCore>(rng: &mut R, previous: Option<u8>) -> u8 {
    let mut candidate = draw(rng, BUTTON_COUNT as u32) as u8;
    if Some(candidate) == previous && draw(rng, 10) < REPEAT_REDRAW_CHANCE {
        candidate = draw(rng, BUTTON_COUNT as u32) as u8;
    }
    candidate
}

/// Issues the prompt that follows `level`.
pub fn next_prompt<R: RngCore>(rng: &mut R, previous: Option<u8>, level: i16) -> Prompt {
    let light = choose_light(rng, previous);
    let level = level.saturating_add(1);
    Prompt {
        light,
        level,
        window: response_window(level),
    }
}
