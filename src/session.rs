use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, GameState, GRID_HEIGHT, GRID_WIDTH};
use crate::screens;
use crate::term::Screen;

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const INPUT_POLL: Duration = Duration::from_millis(10);
const BLINK_POLL: Duration = Duration::from_millis(50);
const BLINK_FRAMES: u32 = 30;

/// How a finished session should be reported to the player.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Exit {
    /// A quit key ended the session.
    Quit,
    /// CTRL+C ended the session; the player gets a friendly goodbye.
    Interrupted,
}

/// What a key press means. The same mapping serves every screen; each
/// screen simply ignores the intents it has no use for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Intent {
    Turn(Direction),
    Start,
    Restart,
    Quit,
    Interrupt,
    Ignore,
}

fn map_key(ev: &KeyEvent) -> Intent {
    if ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL) {
        return Intent::Interrupt;
    }

    match ev.code {
        KeyCode::Up => Intent::Turn(Direction::Up),
        KeyCode::Down => Intent::Turn(Direction::Down),
        KeyCode::Left => Intent::Turn(Direction::Left),
        KeyCode::Right => Intent::Turn(Direction::Right),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Intent::Quit,
            's' => Intent::Start,
            'r' => Intent::Restart,
            _ => Intent::Ignore,
        },
        _ => Intent::Ignore,
    }
}

/// Why a screen handed control back to [`Session::run`].
enum ScreenEnd {
    /// On to the next screen: splash started, play crashed, game over
    /// chose restart.
    Proceed,
    Quit,
    Interrupt,
}

/// Drives the splash → play → game-over flow over a [`Screen`], one round
/// after another until the player quits.
pub struct Session<S: Screen> {
    screen: S,
}

impl<S: Screen> Session<S> {
    pub fn new(screen: S) -> Self {
        Session { screen }
    }

    pub fn run(&mut self) -> Result<Exit> {
        match self.splash()? {
            ScreenEnd::Proceed => {}
            ScreenEnd::Quit => return Ok(Exit::Quit),
            ScreenEnd::Interrupt => return Ok(Exit::Interrupted),
        }

        loop {
            let mut game = GameState::new(GRID_WIDTH, GRID_HEIGHT);

            match self.play(&mut game)? {
                ScreenEnd::Proceed => {}
                ScreenEnd::Quit => return Ok(Exit::Quit),
                ScreenEnd::Interrupt => return Ok(Exit::Interrupted),
            }

            match self.game_over(game.score())? {
                ScreenEnd::Proceed => {} // restart with a fresh round
                ScreenEnd::Quit => return Ok(Exit::Quit),
                ScreenEnd::Interrupt => return Ok(Exit::Interrupted),
            }
        }
    }

    pub fn into_screen(self) -> S {
        self.screen
    }

    fn splash(&mut self) -> Result<ScreenEnd> {
        self.screen.clear()?;
        screens::draw_splash(&mut self.screen)?;
        self.screen.flush()?;

        let mut frames = 0;
        let mut prompt_visible = true;

        loop {
            screens::draw_splash_prompt(&mut self.screen, prompt_visible)?;
            self.screen.flush()?;

            if let Some(ev) = self.screen.poll_key(BLINK_POLL)? {
                match map_key(&ev) {
                    Intent::Start => return Ok(ScreenEnd::Proceed),
                    Intent::Quit => return Ok(ScreenEnd::Quit),
                    Intent::Interrupt => return Ok(ScreenEnd::Interrupt),
                    _ => {}
                }
            }

            frames += 1;
            if frames >= BLINK_FRAMES {
                prompt_visible = !prompt_visible;
                frames = 0;
            }
        }
    }

    /// One round. Each tick reads at most one pending key, advances the
    /// game, redraws, then sleeps off whatever is left of the tick so the
    /// pace does not depend on rendering cost. Once `advance` reports the
    /// round over, the game is not advanced again.
    fn play(&mut self, game: &mut GameState) -> Result<ScreenEnd> {
        loop {
            let tick_start = Instant::now();

            if let Some(ev) = self.screen.poll_key(INPUT_POLL)? {
                match map_key(&ev) {
                    Intent::Turn(dir) => game.set_direction(dir),
                    Intent::Quit => return Ok(ScreenEnd::Quit),
                    Intent::Interrupt => return Ok(ScreenEnd::Interrupt),
                    _ => {}
                }
            }

            if game.advance() {
                return Ok(ScreenEnd::Proceed);
            }

            screens::draw_frame(&mut self.screen, game)?;

            if let Some(rest) = TICK_INTERVAL.checked_sub(tick_start.elapsed()) {
                sleep(rest);
            }
        }
    }

    fn game_over(&mut self, score: u32) -> Result<ScreenEnd> {
        self.screen.clear()?;
        screens::draw_game_over(&mut self.screen, score)?;

        loop {
            let ev = self.screen.wait_key()?;
            match map_key(&ev) {
                Intent::Restart => return Ok(ScreenEnd::Proceed),
                Intent::Quit => return Ok(ScreenEnd::Quit),
                Intent::Interrupt => return Ok(ScreenEnd::Interrupt),
                _ => {}
            }
        }
    }
}
