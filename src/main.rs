use std::process::exit;

use anyhow::{Context, Result};

use retro_snake::session::{Exit, Session};
use retro_snake::term::Terminal;

fn main() {
    match run() {
        Ok(Exit::Quit) => {}
        Ok(Exit::Interrupted) => println!("\nThanks for playing!"),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            eprintln!("Make sure your terminal supports the required features.");
            exit(1);
        }
    }
}

fn run() -> Result<Exit> {
    let term = Terminal::new().context("could not initialize the terminal")?;
    let mut session = Session::new(term);
    session.run()
    // The session (and with it the terminal) is dropped here, so the
    // screen is back to normal before main prints anything.
}
