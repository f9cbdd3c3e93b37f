//! Flow tests: drive a whole session through a scripted in-memory screen.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use retro_snake::session::{Exit, Session};
use retro_snake::term::Screen;

const ROWS: u16 = 45;
const COLS: u16 = 100;

/// Feeds a fixed key sequence to the session and records every drawn cell.
/// A `None` entry means "no key available for this poll". An exhausted
/// script keeps answering 'q' so a buggy loop cannot hang the test.
struct ScriptedScreen {
    script: VecDeque<Option<KeyEvent>>,
    cells: Vec<Vec<char>>,
    clears: usize,
}

impl ScriptedScreen {
    fn new(script: Vec<Option<KeyEvent>>) -> Self {
        ScriptedScreen {
            script: script.into(),
            cells: vec![vec![' '; COLS as usize]; ROWS as usize],
            clears: 0,
        }
    }

    fn shows(&self, needle: &str) -> bool {
        self.cells
            .iter()
            .any(|row| row.iter().collect::<String>().contains(needle))
    }
}

impl Screen for ScriptedScreen {
    fn size(&self) -> (u16, u16) {
        (ROWS, COLS)
    }

    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                *cell = ' ';
            }
        }
        Ok(())
    }

    fn put_char(&mut self, row: u16, col: u16, ch: char) -> Result<()> {
        if row < ROWS && col < COLS {
            self.cells[row as usize][col as usize] = ch;
        }
        Ok(())
    }

    fn put_str(&mut self, row: u16, col: u16, text: &str) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            self.put_char(row, col + i as u16, ch)?;
        }
        Ok(())
    }

    fn poll_key(&mut self, _timeout: Duration) -> Result<Option<KeyEvent>> {
        Ok(self.script.pop_front().unwrap_or_else(|| key(KeyCode::Char('q'))))
    }

    fn wait_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Some(ev) = self.poll_key(Duration::from_millis(0))? {
                return Ok(ev);
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

fn key(code: KeyCode) -> Option<KeyEvent> {
    Some(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl_c() -> Option<KeyEvent> {
    Some(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
}

/// 's' to leave the splash, one upward turn, then nine empty polls: the
/// head starts on row 10 and meets the top wall on the tenth tick.
fn crash_into_top_wall() -> Vec<Option<KeyEvent>> {
    let mut script = vec![key(KeyCode::Char('s')), key(KeyCode::Up)];
    script.extend((0..9).map(|_| None));
    script
}

fn run_session(script: Vec<Option<KeyEvent>>) -> (Exit, ScriptedScreen) {
    let mut session = Session::new(ScriptedScreen::new(script));
    let exit = session.run().expect("scripted session failed");
    (exit, session.into_screen())
}

#[test]
fn quitting_from_the_splash_exits() {
    let (exit, screen) = run_session(vec![key(KeyCode::Char('q'))]);
    assert_eq!(exit, Exit::Quit);
    assert!(screen.shows("Press 'Q' to quit"));
    assert!(screen.shows(">>> Press 'S' to START! <<<"));
}

#[test]
fn ctrl_c_on_the_splash_is_an_interrupt() {
    let (exit, _) = run_session(vec![ctrl_c()]);
    assert_eq!(exit, Exit::Interrupted);
}

#[test]
fn starting_renders_the_play_field() {
    // One empty poll so a frame gets drawn, then quit.
    let script = vec![key(KeyCode::Char('s')), None, key(KeyCode::Char('q'))];
    let (exit, screen) = run_session(script);
    assert_eq!(exit, Exit::Quit);
    assert!(screen.shows("Score: "));
    assert!(screen.shows("Use arrow keys to move, 'q' to quit"));
    assert!(screen.shows("█"));
}

#[test]
fn crashing_shows_the_game_over_screen() {
    let mut script = crash_into_top_wall();
    script.push(key(KeyCode::Char('q')));

    let (exit, screen) = run_session(script);
    assert_eq!(exit, Exit::Quit);
    assert!(screen.shows("Final Score: "));
    assert!(screen.shows("Press 'r' to restart or 'q' to quit"));

    // One clear for the splash, one per drawn play frame and one for the
    // game-over screen. The terminal tick must not draw a frame, so nine
    // frames exactly.
    assert_eq!(screen.clears, 11);
}

#[test]
fn restarting_begins_a_fresh_round() {
    let mut script = crash_into_top_wall();
    script.push(key(KeyCode::Char('r')));
    script.push(None); // one tick of the new round
    script.push(key(KeyCode::Char('q')));

    let (exit, screen) = run_session(script);
    assert_eq!(exit, Exit::Quit);
    // The new round is drawn over the game-over screen.
    assert!(screen.shows("Score: "));
    assert!(!screen.shows("Final Score: "));
}

#[test]
fn ctrl_c_during_play_is_an_interrupt() {
    let script = vec![key(KeyCode::Char('s')), ctrl_c()];
    let (exit, _) = run_session(script);
    assert_eq!(exit, Exit::Interrupted);
}

#[test]
fn ctrl_c_on_the_game_over_screen_is_an_interrupt() {
    let mut script = crash_into_top_wall();
    script.push(ctrl_c());

    let (exit, _) = run_session(script);
    assert_eq!(exit, Exit::Interrupted);
}
