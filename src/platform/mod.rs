//! Platform abstraction layer
//!
//! Maps terminal input to abstract `Command`s. A line may hold several
//! single-key commands ("ddde") or one whole word ("next", "quit").

use crate::sim::Command;

/// Map a single key character
pub fn key_command(key: char) -> Option<Command> {
    let command = match key.to_ascii_lowercase() {
        'w' | 'k' => Command::CursorUp,
        's' | 'j' => Command::CursorDown,
        'a' | 'h' => Command::CursorLeft,
        'd' | 'l' => Command::CursorRight,
        'e' | ' ' => Command::Select,
        'x' => Command::Cancel,
        'q' | '[' => Command::RotateCcw,
        'r' | ']' => Command::RotateCw,
        'n' | '+' | ')' => Command::PuzzleNext,
        'p' | '-' | '(' => Command::PuzzlePrev,
        '?' => Command::Help,
        _ => return None,
    };
    Some(command)
}

/// Map a whole word
pub fn word_command(word: &str) -> Option<Command> {
    let command = match word.to_ascii_lowercase().as_str() {
        "up" => Command::CursorUp,
        "down" => Command::CursorDown,
        "left" => Command::CursorLeft,
        "right" => Command::CursorRight,
        "select" | "enter" => Command::Select,
        "cancel" | "esc" | "exit" => Command::Cancel,
        "ccw" => Command::RotateCcw,
        "cw" => Command::RotateCw,
        "next" => Command::PuzzleNext,
        "prev" | "previous" => Command::PuzzlePrev,
        "help" | "f1" => Command::Help,
        "redraw" => Command::Redraw,
        "quit" | ":q" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Parse one input line. An empty line redraws.
pub fn parse_line(line: &str) -> Vec<Command> {
    let line = line.trim();
    if line.is_empty() {
        return vec![Command::Redraw];
    }

    let mut commands = Vec::new();
    for word in line.split_whitespace() {
        if let Some(command) = word_command(word) {
            commands.push(command);
            continue;
        }
        for key in word.chars() {
            match key_command(key) {
                Some(command) => commands.push(command),
                None => log::debug!("Ignoring unmapped key {key:?}"),
            }
        }
    }
    commands
}

/// What a key does while the help pages are open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpAction {
    /// Go to the next page (closes after the last)
    NextPage,
    /// Leave help
    Close,
    Redraw,
}

/// Only help, cancel and redraw mean anything on a help page
pub fn help_action(command: Command) -> Option<HelpAction> {
    match command {
        Command::Help => Some(HelpAction::NextPage),
        Command::Cancel | Command::Quit => Some(HelpAction::Close),
        Command::Redraw => Some(HelpAction::Redraw),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chained_keys() {
        assert_eq!(
            parse_line("ddE"),
            vec![Command::CursorRight, Command::CursorRight, Command::Select]
        );
    }

    #[test]
    fn test_words_and_keys() {
        assert_eq!(
            parse_line("next  r quit"),
            vec![Command::PuzzleNext, Command::RotateCw, Command::Quit]
        );
        assert_eq!(parse_line("   "), vec![Command::Redraw]);
        assert!(parse_line("zz").is_empty());
    }

    #[test]
    fn test_help_actions() {
        assert_eq!(help_action(Command::Help), Some(HelpAction::NextPage));
        assert_eq!(help_action(Command::Cancel), Some(HelpAction::Close));
        assert_eq!(help_action(Command::CursorUp), None);
    }
}
