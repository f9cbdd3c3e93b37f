use std::cmp::max;

use anyhow::Result;

use crate::game::GameState;
use crate::term::Screen;

const BORDER_CHAR: char = '█';
const HEAD_CHAR: char = '●';
const BODY_CHAR: char = '○';
const FOOD_CHAR: char = '♦';

pub const SPLASH_PROMPT: &str = ">>> Press 'S' to START! <<<";

const TITLE: [&str; 13] = [
    "██████╗ ███████╗████████╗██████╗  ██████╗ ",
    "██╔══██╗██╔════╝╚══██╔══╝██╔══██╗██╔═══██╗",
    "██████╔╝█████╗     ██║   ██████╔╝██║   ██║",
    "██╔══██╗██╔══╝     ██║   ██╔══██╗██║   ██║",
    "██║  ██║███████╗   ██║   ██║  ██║╚██████╔╝",
    "╚═╝  ╚═╝╚══════╝   ╚═╝   ╚═╝  ╚═╝ ╚═════╝ ",
    "",
    "   ███████╗███╗   ██╗ █████╗ ██╗  ██╗███████╗",
    "   ██╔════╝████╗  ██║██╔══██╗██║ ██╔╝██╔════╝",
    "   ███████╗██╔██╗ ██║███████║█████╔╝ █████╗  ",
    "   ╚════██║██║╚██╗██║██╔══██║██╔═██╗ ██╔══╝  ",
    "   ███████║██║ ╚████║██║  ██║██║  ██╗███████╗",
    "   ╚══════╝╚═╝  ╚═══╝╚═╝  ╚═╝╚═╝  ╚═╝╚══════╝",
];

const SPLASH_INFO: [&str; 11] = [
    "CLASSIC ARCADE EXPERIENCE",
    "",
    "CONTROLS:",
    "↑ ↓ ← → : Navigate your snake",
    "Q : Quit game",
    "",
    "OBJECTIVE:",
    "• Eat diamonds (♦) to grow",
    "• Avoid walls (█) and yourself",
    "• Achieve the highest score!",
    "",
];

const INFO_PANEL_INNER: usize = 45;

const GAME_OVER_ART: [&str; 5] = [
    "  ██████   █████  ███    ███ ███████     ██████  ██    ██ ███████ ██████  ",
    " ██       ██   ██ ████  ████ ██         ██    ██ ██    ██ ██      ██   ██ ",
    " ██   ███ ███████ ██ ████ ██ █████      ██    ██ ██    ██ █████   ██████  ",
    " ██    ██ ██   ██ ██  ██  ██ ██         ██    ██  ██  ██  ██      ██   ██ ",
    "  ██████  ██   ██ ██      ██ ███████     ██████    ████   ███████ ██   ██ ",
];

fn centered_col(screen_cols: u16, text: &str) -> u16 {
    let len = text.chars().count() as u16;
    screen_cols.saturating_sub(len) / 2
}

fn put_centered<S: Screen>(screen: &mut S, row: u16, text: &str) -> Result<()> {
    let (_, cols) = screen.size();
    screen.put_str(row, centered_col(cols, text), text)
}

/// Rows for the title block, the info panel and the blinking prompt.
/// Shared between the one-shot splash render and the per-frame prompt
/// toggle so they agree on where the prompt lives.
fn splash_layout(rows: u16) -> (u16, u16, u16) {
    let title_row = max(2, rows as i32 / 2 - TITLE.len() as i32 / 2 - 8) as u16;
    let info_row = title_row + TITLE.len() as u16 + 2;
    // The panel adds a border line above and below the info lines.
    let prompt_row = info_row + SPLASH_INFO.len() as u16 + 4;
    (title_row, info_row, prompt_row)
}

/// The static part of the splash screen: title art, the boxed info panel
/// and the quit hint. The prompt itself is drawn by
/// [`draw_splash_prompt`] so it can blink.
pub fn draw_splash<S: Screen>(screen: &mut S) -> Result<()> {
    let (rows, _) = screen.size();
    let (title_row, info_row, prompt_row) = splash_layout(rows);

    for (i, line) in TITLE.iter().enumerate() {
        put_centered(screen, title_row + i as u16, line)?;
    }

    let border = "▓".repeat(INFO_PANEL_INNER + 4);
    put_centered(screen, info_row, &border)?;
    for (i, line) in SPLASH_INFO.iter().enumerate() {
        let boxed = format!("▓ {:<width$} ▓", line, width = INFO_PANEL_INNER);
        put_centered(screen, info_row + 1 + i as u16, &boxed)?;
    }
    put_centered(screen, info_row + 1 + SPLASH_INFO.len() as u16, &border)?;

    put_centered(screen, prompt_row + 3, "Press 'Q' to quit")?;
    Ok(())
}

/// Draws or blanks the start prompt, depending on the blink phase.
pub fn draw_splash_prompt<S: Screen>(screen: &mut S, visible: bool) -> Result<()> {
    let (rows, cols) = screen.size();
    let (_, _, prompt_row) = splash_layout(rows);
    let col = centered_col(cols, SPLASH_PROMPT);
    let len = SPLASH_PROMPT.chars().count();

    if visible {
        screen.put_str(prompt_row, col, &"▓".repeat(len))?;
        screen.put_str(prompt_row + 1, col, SPLASH_PROMPT)?;
    } else {
        let blank = " ".repeat(len);
        screen.put_str(prompt_row, col, &blank)?;
        screen.put_str(prompt_row + 1, col, &blank)?;
    }
    Ok(())
}

/// One full play frame: border, snake, food and the status lines below
/// the grid.
pub fn draw_frame<S: Screen>(screen: &mut S, game: &GameState) -> Result<()> {
    screen.clear()?;

    let height = game.height() as u16;
    let width = game.width() as u16;

    for col in 0..width {
        screen.put_char(0, col, BORDER_CHAR)?;
        screen.put_char(height - 1, col, BORDER_CHAR)?;
    }
    for row in 1..height - 1 {
        screen.put_char(row, 0, BORDER_CHAR)?;
        screen.put_char(row, width - 1, BORDER_CHAR)?;
    }

    for (i, &(row, col)) in game.snake().iter().enumerate() {
        let ch = if i == 0 { HEAD_CHAR } else { BODY_CHAR };
        screen.put_char(row as u16, col as u16, ch)?;
    }

    let (food_row, food_col) = game.food();
    screen.put_char(food_row as u16, food_col as u16, FOOD_CHAR)?;

    screen.put_str(height + 1, 0, &format!("Score: {}", game.score()))?;
    screen.put_str(height + 2, 0, "Use arrow keys to move, 'q' to quit")?;
    screen.put_str(height + 3, 0, &"═".repeat(40))?;

    screen.flush()
}

/// The final screen of a round: game-over art, the score and the
/// restart/quit prompt.
pub fn draw_game_over<S: Screen>(screen: &mut S, score: u32) -> Result<()> {
    let (rows, _) = screen.size();
    let art_row = max(0, rows as i32 / 2 - GAME_OVER_ART.len() as i32 / 2 - 3) as u16;

    for (i, line) in GAME_OVER_ART.iter().enumerate() {
        put_centered(screen, art_row + i as u16, line)?;
    }

    let score_row = art_row + GAME_OVER_ART.len() as u16 + 2;
    put_centered(screen, score_row, &format!("Final Score: {}", score))?;
    put_centered(screen, score_row + 2, "Press 'r' to restart or 'q' to quit")?;

    screen.flush()
}
