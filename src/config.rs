//! Timing constants and tone tables.
//!
//! Tick-denominated values count passes of the main loop. One pass renders the
//! display once, so the tick rate follows from [`DIGIT_DWELL_US`] and
//! [`SEGMENT_SETTLE_US`] (roughly 2 ms per tick with the defaults).

/// Number of buttons, lights and display digits.
pub const BUTTON_COUNT: usize = 4;

/// Number of digits on the display.
pub const DIGIT_COUNT: usize = 4;

// ============================================================================
// Display multiplexing
// ============================================================================

/// Settle delay around each shift-register transfer, in microseconds.
pub const SEGMENT_SETTLE_US: u32 = 10;

/// Time each digit stays lit per pass, in microseconds.
pub const DIGIT_DWELL_US: u32 = 500;

// ============================================================================
// Prompt generation
// ============================================================================

/// Tone played for each light, indexed by light.
pub const LIGHT_TONES_HZ: [u32; BUTTON_COUNT] = [262, 330, 392, 494];

/// Tone length per tick of response window, in milliseconds.
pub const TONE_MS_PER_TICK: u32 = 8;

/// Response window for the first prompt of a game, in ticks.
pub const INITIAL_WINDOW_TICKS: f32 = 150.0;

/// Base of the exponential difficulty curve.
pub const WINDOW_DECAY_BASE: f32 = 1.6;

/// Exponent applied per level to the difficulty curve.
pub const WINDOW_DECAY_PER_LEVEL: f32 = 0.05;

/// Shortest response window, in ticks.
pub const MIN_WINDOW_TICKS: i32 = 10;

/// Chance, out of ten, that a repeated light is redrawn.
pub const REPEAT_REDRAW_CHANCE: u32 = 6;

// ============================================================================
// Game
// ============================================================================

/// A held button lights its lamp only while more than this many ticks remain.
pub const FEEDBACK_MIN_TICKS: i32 = 5;

// ============================================================================
// Start menu
// ============================================================================

/// Ticks spent showing each of the two menu values.
pub const MENU_HALF_CYCLE_TICKS: u16 = 1000;

/// Ticks at the end of each half cycle during which the display is blanked.
pub const MENU_BLANK_TICKS: u16 = 25;

/// Hold time of all four buttons that resets the high score.
pub const RESET_HOLD_MS: u64 = 2000;

/// Hold time of a single button that starts a game.
pub const START_HOLD_MS: u64 = 50;

/// Pause between the start gesture and the first game tick.
pub const START_PAUSE_MS: u32 = 2000;

/// Pause after a high-score reset before the menu resumes.
pub const RESET_PAUSE_MS: u32 = 500;

/// Confirmation tone for a high-score reset.
pub const RESET_TONE_HZ: u32 = 1000;

/// Length of the reset confirmation tone.
pub const RESET_TONE_MS: u32 = 200;

// ============================================================================
// Game over
// ============================================================================

/// Low tone played when a game is lost.
pub const LOSS_TONE_HZ: u32 = 120;

/// Length of the loss tone.
pub const LOSS_TONE_MS: u32 = 500;

/// Second tone fired partway through the blink sequence.
pub const FLASH_TONE_HZ: u32 = 90;

/// Length of the flash tone.
pub const FLASH_TONE_MS: u32 = 400;

/// Display passes in the game-over blink sequence.
pub const GAME_OVER_PASSES: u16 = 350;

/// Passes between display on/off toggles during the blink sequence.
pub const GAME_OVER_BLINK_PASSES: u16 = 60;

/// Pass at which the flash tone fires.
pub const GAME_OVER_FLASH_PASS: u16 = 140;
