//! Laser Logic entry point
//!
//! Loads settings and puzzles, then runs the render/read/apply loop on the
//! terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use laser_logic::persistence::{FileProgressStore, PuzzleBook};
use laser_logic::platform::{HelpAction, help_action, parse_line};
use laser_logic::renderer::{Glyphs, HELP_CONTROLS, HELP_RULES, render_error, render_frame};
use laser_logic::settings::SETTINGS_FILENAME;
use laser_logic::sim::{Outcome, Session};
use laser_logic::{Error, Settings};

/// Show the help pages until the player closes them.
/// Returns false if input ended.
fn run_help(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    let pages = [HELP_CONTROLS, HELP_RULES];
    let mut page = 0;
    loop {
        writeln!(out)?;
        for line in pages[page] {
            writeln!(out, "{line}")?;
        }
        write!(out, "\n(? next page, x close) > ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let action = parse_line(&line).into_iter().find_map(help_action);
        match action {
            Some(HelpAction::NextPage) if page + 1 < pages.len() => page += 1,
            Some(HelpAction::NextPage) | Some(HelpAction::Close) => return Ok(true),
            Some(HelpAction::Redraw) | None => {}
        }
    }
}

fn play(settings: &Settings) -> Result<(), Error> {
    let book = PuzzleBook::read(&settings.puzzle_path())?;
    let store = FileProgressStore::new(settings.solved_path());
    let mut session = Session::start(book, store)?;
    let glyphs = Glyphs::for_set(settings.glyphs);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    if settings.show_help_on_start && !run_help(&mut input, &mut out).unwrap_or(false) {
        return Ok(());
    }

    loop {
        // Terminal write failures just end the session
        let frame = render_frame(&session, &glyphs, settings.show_beam);
        if write!(out, "\n{frame}> ").and_then(|_| out.flush()).is_err() {
            return Ok(());
        }

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => return Ok(()),
            Ok(_) => {}
        }

        for command in parse_line(&line) {
            match session.apply(command)? {
                Outcome::Continue => {}
                Outcome::Solved { id } => {
                    let _ = writeln!(out, "\nPuzzle {id} solved!");
                }
                Outcome::Help => {
                    if !run_help(&mut input, &mut out).unwrap_or(false) {
                        return Ok(());
                    }
                }
                Outcome::Quit => return Ok(()),
            }
        }
    }
}

fn main() -> ExitCode {
    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILENAME));
    let settings = Settings::load(&settings_path);

    let level = settings
        .as_ref()
        .map(|s| s.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::info!("Laser Logic starting...");

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", render_error(&e));
            return ExitCode::FAILURE;
        }
    };

    match play(&settings) {
        Ok(()) => {
            log::info!("Goodbye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("{}", render_error(&e));
            ExitCode::FAILURE
        }
    }
}
