//! Text rendering module
//!
//! Draws the board, beam and status into plain strings. Reads the session
//! through its public view only.

pub mod text;

pub use text::{render_board, status_line, token_glyph};

use crate::settings::GlyphSet;
use crate::sim::Session;

/// Characters used to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyphs {
    pub beam_h: char,
    pub beam_v: char,
    pub beam_cross: char,
    pub block: char,
    pub checkpoint_v: char,
    pub checkpoint_h: char,
    /// Indexed by direction bits (N, E, S, W)
    pub laser: [char; 4],
    pub mirror_nwse: char,
    pub mirror_nesw: char,
    pub splitter_nwse: char,
    pub splitter_nesw: char,
    pub target: char,
    pub target_req: char,
    pub target_face: char,
    pub target_hit: char,
    pub movable: char,
    pub rotatable: char,
    pub meter_hit: char,
    pub meter_miss: char,
}

impl Glyphs {
    pub fn ascii() -> Self {
        Self {
            beam_h: '-',
            beam_v: '|',
            beam_cross: '+',
            block: '#',
            checkpoint_v: 'H',
            checkpoint_h: '=',
            laser: ['^', '>', 'v', '<'],
            mirror_nwse: '\\',
            mirror_nesw: '/',
            splitter_nwse: 'N',
            splitter_nesw: 'Z',
            target: 'o',
            target_req: 'O',
            target_face: '.',
            target_hit: '*',
            movable: '+',
            rotatable: '~',
            meter_hit: '#',
            meter_miss: '_',
        }
    }

    pub fn unicode() -> Self {
        Self {
            beam_h: '─',
            beam_v: '│',
            beam_cross: '┼',
            block: '█',
            checkpoint_v: '┃',
            checkpoint_h: '━',
            laser: ['▲', '▶', '▼', '◀'],
            mirror_nwse: '╲',
            mirror_nesw: '╱',
            splitter_nwse: '⧹',
            splitter_nesw: '⧸',
            target: '○',
            target_req: '◉',
            target_face: '·',
            target_hit: '✱',
            movable: '✥',
            rotatable: '↻',
            meter_hit: '■',
            meter_miss: '□',
        }
    }

    pub fn for_set(set: GlyphSet) -> Self {
        match set {
            GlyphSet::Ascii => Self::ascii(),
            GlyphSet::Unicode => Self::unicode(),
        }
    }
}

/// Help page 1: controls
pub const HELP_CONTROLS: &[&str] = &[
    "CONTROLS",
    "",
    "  w a s d / h j k l   move cursor",
    "  e                   pick up / put down token",
    "  x                   cancel selection",
    "  q  r                rotate token left / right",
    "  n  p  (+ -)         next / previous puzzle",
    "  ?                   help (again for rules)",
    "  quit                leave the game",
    "",
    "Keys can be chained on one line, e.g. \"ddde\".",
];

/// Help page 2: rules
pub const HELP_RULES: &[&str] = &[
    "HOW TO PLAY",
    "",
    " * Move/rotate tokens to hit targets; targets light up when hit.",
    "   Not all tokens can move/rotate.",
    " * Hit the indicated number of targets, including all required targets.",
    " * Use every token (block excepted).",
];

/// Full frame: status line then board
pub fn render_frame<S>(session: &Session<S>, glyphs: &Glyphs, show_beam: bool) -> String {
    let mut out = status_line(session, glyphs);
    out.push('\n');
    for line in render_board(session, glyphs, show_beam) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Error screen for fatal storage failures
pub fn render_error(err: &crate::Error) -> String {
    match err {
        crate::Error::Storage { path, .. } => format!(
            "Error {} {}\n{}\n\n{}",
            err.code(),
            err.direction(),
            path.display(),
            err
        ),
        _ => format!("Error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageOp;

    #[test]
    fn test_error_screen() {
        let err = crate::Error::reading(
            StorageOp::Open,
            "LASER.dat",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let screen = render_error(&err);
        assert!(screen.starts_with("Error 10 reading\nLASER.dat"));
    }

    #[test]
    fn test_glyph_sets_differ() {
        assert_ne!(Glyphs::for_set(GlyphSet::Ascii), Glyphs::for_set(GlyphSet::Unicode));
        assert_eq!(Glyphs::ascii().laser[1], '>');
    }
}
