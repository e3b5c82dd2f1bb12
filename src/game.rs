//! Session state machine: start menu, game, game over.
//!
//! [`ReactionGame`] owns the peripherals and one [`GameState`]. Each call to
//! [`ReactionGame::tick`] runs exactly one state handler to completion and
//! stores the state it hands back.

use embedded_hal::delay::DelayNs;
use rand::RngCore;

use crate::config::{
    BUTTON_COUNT, FEEDBACK_MIN_TICKS, FLASH_TONE_HZ, FLASH_TONE_MS, GAME_OVER_BLINK_PASSES,
    GAME_OVER_FLASH_PASS, GAME_OVER_PASSES, LOSS_TONE_HZ, LOSS_TONE_MS, MENU_BLANK_TICKS,
    MENU_HALF_CYCLE_TICKS, RESET_HOLD_MS, RESET_PAUSE_MS, RESET_TONE_HZ, RESET_TONE_MS,
    START_HOLD_MS, START_PAUSE_MS,
};
use crate::display::{DigitDisplay, DisplayFrame};
use crate::input::{ButtonLines, ButtonMask, InputSampler};
use crate::outputs::{Lights, Speaker};
use crate::prompt::{Prompt, next_prompt};
use crate::store::{ByteStore, HiScoreStore};
use crate::time::{TimeInstant, TimeSource, millis_between};

/// Which handler runs on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateKind {
    /// Alternating last score and high score, waiting for a gesture.
    StartMenu,
    /// A game in progress.
    Game,
    /// The loss sequence is about to play.
    GameOver,
}

/// Start-menu bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState<I> {
    cycle_tick: u16,
    last_score: u16,
    reset_hold_since: Option<I>,
    start_hold: Option<(usize, I)>,
}

impl<I: TimeInstant> MenuState<I> {
    /// Menu at the start of its alternation cycle, showing `last_score` first.
    pub fn new(last_score: u16) -> Self {
        Self {
            cycle_tick: 0,
            last_score,
            reset_hold_since: None,
            start_hold: None,
        }
    }

    /// Position within the two-value alternation cycle.
    pub fn cycle_tick(&self) -> u16 {
        self.cycle_tick
    }

    /// Score of the last completed game.
    pub fn last_score(&self) -> u16 {
        self.last_score
    }

    /// Returns true while the four-button reset gesture is being held.
    pub fn is_reset_pending(&self) -> bool {
        self.reset_hold_since.is_some()
    }

    /// Returns true while a single-button start gesture is being held.
    pub fn is_start_pending(&self) -> bool {
        self.start_hold.is_some()
    }

    fn clear_gestures(&mut self) {
        self.reset_hold_since = None;
        self.start_hold = None;
    }
}

/// State of one game, created fresh for every new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameSession {
    score: u16,
    level: i16,
    active_light: Option<u8>,
    previous_light: Option<u8>,
    ticks_until_next_event: i32,
    held: ButtonMask,
}

impl GameSession {
    /// A session before its first prompt. `held` is the button state the first
    /// tick compares against.
    pub fn new(held: ButtonMask) -> Self {
        Self {
            score: 0,
            level: -1,
            active_light: None,
            previous_light: None,
            ticks_until_next_event: 0,
            held,
        }
    }

    /// Current score.
    pub fn score(&self) -> u16 {
        self.score
    }

    /// Number of prompts issued minus one.
    pub fn level(&self) -> i16 {
        self.level
    }

    /// Light the player must press, if a prompt is armed.
    pub fn active_light(&self) -> Option<u8> {
        self.active_light
    }

    /// Light chosen by the most recent prompt.
    pub fn previous_light(&self) -> Option<u8> {
        self.previous_light
    }

    /// Ticks left before the next prompt or, with a light armed, the loss.
    pub fn ticks_until_next_event(&self) -> i32 {
        self.ticks_until_next_event
    }

    /// Returns true if button `index` was held at the end of the last tick.
    pub fn is_held(&self, index: usize) -> bool {
        self.held.is_pressed(index)
    }

    fn arm(&mut self, prompt: &Prompt) {
        self.active_light = Some(prompt.light);
        self.previous_light = Some(prompt.light);
        self.level = prompt.level;
        self.score = prompt.level.max(0) as u16;
        self.ticks_until_next_event = prompt.window;
    }

    fn lit(&self, index: usize, held: ButtonMask) -> bool {
        self.active_light == Some(index as u8)
            || (held.is_pressed(index) && self.ticks_until_next_event > FEEDBACK_MIN_TICKS)
    }
}

/// The machine's current state and its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState<I> {
    /// See [`StateKind::StartMenu`].
    StartMenu(MenuState<I>),
    /// See [`StateKind::Game`].
    Game(GameSession),
    /// See [`StateKind::GameOver`]. Carries the lost session.
    GameOver(GameSession),
}

impl<I> GameState<I> {
    /// The state's tag.
    pub fn kind(&self) -> StateKind {
        match self {
            GameState::StartMenu(_) => StateKind::StartMenu,
            GameState::Game(_) => StateKind::Game,
            GameState::GameOver(_) => StateKind::GameOver,
        }
    }
}

/// Hardware the game drives.
pub struct Peripherals<D, B, L, S, K, W>
where
    B: ButtonLines,
    K: ByteStore,
{
    pub display: D,
    pub buttons: InputSampler<B>,
    pub lights: L,
    pub speaker: S,
    pub store: HiScoreStore<K>,
    /// Delay used for the millisecond pauses at state transitions.
    pub delay: W,
}

impl<D, B, L, S, K, W> Peripherals<D, B, L, S, K, W>
where
    D: DigitDisplay,
    B: ButtonLines,
    L: Lights,
    S: Speaker,
    K: ByteStore,
    W: DelayNs,
{
    /// Bundles the game's hardware.
    pub fn new(display: D, buttons: B, lights: L, speaker: S, store: K, delay: W) -> Self {
        Self {
            display,
            buttons: InputSampler::new(buttons),
            lights,
            speaker,
            store: HiScoreStore::new(store),
            delay,
        }
    }
}

/// The reaction game.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `D` - Numeric display
/// * `B` - Button lines
/// * `L` - Indicator lights
/// * `S` - Speaker
/// * `K` - Byte store holding the high score
/// * `W` - Delay provider for transition pauses
/// * `R` - Random number generator for prompts
pub struct ReactionGame<'t, I, T, D, B, L, S, K, W, R>
where
    I: TimeInstant,
    T: TimeSource<I>,
    D: DigitDisplay,
    B: ButtonLines,
    L: Lights,
    S: Speaker,
    K: ByteStore,
    W: DelayNs,
    R: RngCore,
{
    peripherals: Peripherals<D, B, L, S, K, W>,
    time_source: &'t T,
    rng: R,
    state: GameState<I>,
    hi_score: u16,
}

impl<'t, I, T, D, B, L, S, K, W, R> ReactionGame<'t, I, T, D, B, L, S, K, W, R>
where
    I: TimeInstant,
    T: TimeSource<I>,
    D: DigitDisplay,
    B: ButtonLines,
    L: Lights,
    S: Speaker,
    K: ByteStore,
    W: DelayNs,
    R: RngCore,
{
    /// Creates the game in the start menu with lights and display off.
    pub fn new(
        mut peripherals: Peripherals<D, B, L, S, K, W>,
        time_source: &'t T,
        rng: R,
    ) -> Self {
        let hi_score = peripherals.store.read_hi_score();
        peripherals.lights.set_all(false);
        peripherals.display.blank();
        info!("hi score loaded: {}", hi_score);

        Self {
            peripherals,
            time_source,
            rng,
            state: GameState::StartMenu(MenuState::new(0)),
            hi_score,
        }
    }

    /// Runs one state handler.
    pub fn tick(&mut self) {
        let before = self.state.kind();
        let state = self.state;
        self.state = match state {
            GameState::StartMenu(menu) => self.menu_tick(menu),
            GameState::Game(session) => self.game_tick(session),
            GameState::GameOver(session) => self.game_over(session),
        };

        let after = self.state.kind();
        if after != before {
            info!("state {} -> {}", before, after);
        }
    }

    /// Ticks forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
        }
    }

    fn menu_tick(&mut self, mut menu: MenuState<I>) -> GameState<I> {
        let shown = if menu.cycle_tick < MENU_HALF_CYCLE_TICKS {
            menu.last_score
        } else {
            self.hi_score
        };
        let enabled =
            menu.cycle_tick % MENU_HALF_CYCLE_TICKS < MENU_HALF_CYCLE_TICKS - MENU_BLANK_TICKS;
        self.peripherals
            .display
            .render(DisplayFrame::truncating(shown), enabled);
        menu.cycle_tick = (menu.cycle_tick + 1) % (2 * MENU_HALF_CYCLE_TICKS);

        let pressed = self.peripherals.buttons.sample();
        let now = self.time_source.now();

        if pressed.is_all() {
            menu.start_hold = None;
            let since = *menu.reset_hold_since.get_or_insert(now);
            if millis_between(since, now) >= RESET_HOLD_MS {
                menu.reset_hold_since = None;
                self.reset_hi_score();
            }
        } else if let Some(index) = pressed.single() {
            menu.reset_hold_since = None;
            let since = match menu.start_hold {
                Some((held, since)) if held == index => since,
                _ => {
                    menu.start_hold = Some((index, now));
                    now
                }
            };
            if millis_between(since, now) >= START_HOLD_MS {
                return self.start_new_game();
            }
        } else {
            menu.clear_gestures();
        }

        GameState::StartMenu(menu)
    }

    fn reset_hi_score(&mut self) {
        self.peripherals.display.blank();
        self.peripherals.speaker.tone(RESET_TONE_HZ, RESET_TONE_MS);
        self.peripherals.store.reset();
        self.hi_score = 0;
        info!("hi score reset");
        self.peripherals.delay.delay_ms(RESET_PAUSE_MS);
    }

    fn start_new_game(&mut self) -> GameState<I> {
        self.peripherals.display.blank();
        self.peripherals.delay.delay_ms(START_PAUSE_MS);
        let held = self.peripherals.buttons.sample();
        info!("new game");
        GameState::Game(GameSession::new(held))
    }

    fn game_tick(&mut self, mut session: GameSession) -> GameState<I> {
        session.ticks_until_next_event -= 1;
        if session.ticks_until_next_event < 0 {
            if session.active_light.is_some() {
                info!(
                    "too slow for light {}, score {}",
                    session.active_light, session.score
                );
                return GameState::GameOver(session);
            }

            let prompt = next_prompt(&mut self.rng, session.previous_light, session.level);
            session.arm(&prompt);
            self.peripherals
                .speaker
                .tone(prompt.tone_hz(), prompt.tone_ms());
            debug!(
                "prompt light {} level {} window {}",
                prompt.light, prompt.level, prompt.window
            );
        }

        let pressed = self.peripherals.buttons.sample();
        for index in 0..BUTTON_COUNT {
            self.peripherals
                .lights
                .set(index, session.lit(index, pressed));
        }
        self.peripherals
            .display
            .render(DisplayFrame::truncating(session.score), true);

        for edge in pressed.edges(session.held) {
            if !edge.is_press() {
                continue;
            }
            // Presses with nothing armed are ignored
            let Some(light) = session.active_light else {
                continue;
            };
            if edge.index == light as usize {
                self.peripherals.speaker.silence();
                session.score = session.score.saturating_add(1);
                session.active_light = None;
                trace!("hit light {}, score {}", light, session.score);
            } else {
                info!(
                    "pressed {} instead of {}, score {}",
                    edge.index, light, session.score
                );
                session.held = pressed;
                return GameState::GameOver(session);
            }
        }

        session.held = pressed;
        GameState::Game(session)
    }

    fn game_over(&mut self, session: GameSession) -> GameState<I> {
        self.peripherals.speaker.tone(LOSS_TONE_HZ, LOSS_TONE_MS);
        let previous = self.hi_score;
        self.hi_score = self.peripherals.store.commit_if_higher(session.score);
        if self.hi_score != previous {
            info!("new hi score {}", self.hi_score);
        }

        self.peripherals.lights.set_all(true);
        let frame = DisplayFrame::truncating(session.score);
        for pass in 0..GAME_OVER_PASSES {
            if pass == GAME_OVER_FLASH_PASS {
                self.peripherals.speaker.tone(FLASH_TONE_HZ, FLASH_TONE_MS);
            }
            let enabled = (pass / GAME_OVER_BLINK_PASSES) % 2 == 0;
            self.peripherals.display.render(frame, enabled);
        }
        self.peripherals.lights.set_all(false);
        self.peripherals.display.blank();

        GameState::StartMenu(MenuState::new(session.score))
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState<I> {
        &self.state
    }

    /// Returns the session of a game in progress or about to be lost.
    pub fn session(&self) -> Option<&GameSession> {
        match &self.state {
            GameState::Game(session) | GameState::GameOver(session) => Some(session),
            GameState::StartMenu(_) => None,
        }
    }

    /// Returns the menu state while in the start menu.
    pub fn menu(&self) -> Option<&MenuState<I>> {
        match &self.state {
            GameState::StartMenu(menu) => Some(menu),
            _ => None,
        }
    }

    /// Returns the high score as last read or written.
    pub fn hi_score(&self) -> u16 {
        self.hi_score
    }

    /// Returns a reference to the peripherals.
    pub fn peripherals(&self) -> &Peripherals<D, B, L, S, K, W> {
        &self.peripherals
    }

    /// Returns a mutable reference to the peripherals.
    pub fn peripherals_mut(&mut self) -> &mut Peripherals<D, B, L, S, K, W> {
        &mut self.peripherals
    }
}
