use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style};

/// Everything the game needs from a display: a character grid addressed by
/// (row, column) plus key input. [`Terminal`] is the real implementation;
/// tests drive the session through an in-memory one.
pub trait Screen {
    /// Visible size as (rows, columns).
    fn size(&self) -> (u16, u16);

    fn clear(&mut self) -> Result<()>;

    /// Draws a single character. Positions outside the visible area are
    /// skipped, not errors, so oversized art degrades instead of failing.
    fn put_char(&mut self, row: u16, col: u16, ch: char) -> Result<()>;

    fn put_str(&mut self, row: u16, col: u16, text: &str) -> Result<()>;

    /// Waits up to `timeout` for a key press.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>>;

    /// Blocks until a key is pressed.
    fn wait_key(&mut self) -> Result<KeyEvent>;

    /// Pushes any queued drawing to the display.
    fn flush(&mut self) -> Result<()>;
}

/// Crossterm-backed screen: raw mode, alternate screen, hidden cursor.
/// The terminal is restored on drop, so every exit path puts it back.
pub struct Terminal {
    stdout: Stdout,
    rows: u16,
    cols: u16,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let (cols, rows) = terminal::size().context("could not query the terminal size")?;
        let mut stdout = stdout();

        execute!(stdout, EnterAlternateScreen)
            .context("could not enter the alternate screen")?;
        terminal::enable_raw_mode().context("could not enable raw mode")?;
        execute!(stdout, cursor::Hide).context("could not hide the cursor")?;

        Ok(Terminal { stdout, rows, cols })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Best effort only; the process is on its way out.
        let _ = execute!(self.stdout, cursor::Show);
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.stdout, LeaveAlternateScreen);
    }
}

impl Screen for Terminal {
    fn size(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    fn put_char(&mut self, row: u16, col: u16, ch: char) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Ok(());
        }
        queue!(self.stdout, cursor::MoveTo(col, row), style::Print(ch))?;
        Ok(())
    }

    fn put_str(&mut self, row: u16, col: u16, text: &str) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            self.put_char(row, col.saturating_add(i as u16), ch)?;
        }
        Ok(())
    }

    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if poll(timeout)? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    fn wait_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}
