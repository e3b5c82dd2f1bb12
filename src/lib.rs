#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ReactionGame`**: Runs the start menu / game / game over state machine, one handler per tick
//! - **`GameSession`**: Score, level, armed light and countdown of the game in progress
//! - **`DigitDisplay`**: Trait for the 4-digit numeric display; `SegmentDisplay` implements it over a shift register
//! - **`ButtonLines`**: Trait for the four active-low button lines, read through `InputSampler`
//! - **`Lights`** / **`Speaker`**: Traits for the indicator lights and the tone generator
//! - **`ByteStore`**: Trait for the non-volatile cells holding the high score, wrapped by `HiScoreStore`
//! - **`TimeSource`**: Trait to implement for your millisecond clock
//!
//! Pins are taken as `embedded-hal` 1.0 traits. Hardware errors are absorbed at
//! the adapters; nothing in the game loop can fail.

#[macro_use]
mod fmt;

pub mod config;
pub mod display;
pub mod game;
pub mod input;
pub mod outputs;
pub mod prompt;
pub mod store;
pub mod time;

pub use display::{DigitDisplay, DigitEnable, DisplayFrame, FrameError, SegmentDisplay};
pub use game::{GameSession, GameState, MenuState, Peripherals, ReactionGame, StateKind};
pub use input::{ButtonEdge, ButtonLines, ButtonMask, InputSampler, PinButtons};
pub use outputs::{Lights, PinLights, Speaker};
pub use prompt::{Prompt, choose_light, next_prompt, response_window};
pub use store::{ByteStore, HiScoreStore, MemoryStore};
pub use time::{TimeDuration, TimeInstant, TimeSource};
