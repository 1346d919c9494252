//! Character-grid board renderer
//!
//! Each cell is a 7x3 block of characters:
//! ```text
//! [  |  ]     brackets mark the cursor (< > for the selection)
//! [--\--]     token glyph in the middle, beam arms on each edge
//! [ +|  ]     movable / rotatable marker bottom left
//! ```

use super::Glyphs;
use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
use crate::sim::{BeamSegment, Direction, Edge, Session, Token, TokenKind};

const CELL_W: usize = 7;
const CELL_H: usize = 3;
const MID_X: usize = 3;
const MID_Y: usize = 1;

/// Scratch canvas for one frame
struct Canvas {
    rows: Vec<Vec<char>>,
}

impl Canvas {
    fn new() -> Self {
        Self {
            rows: vec![vec![' '; GRID_WIDTH * CELL_W]; GRID_HEIGHT * CELL_H],
        }
    }

    fn put(&mut self, row: usize, col: usize, dy: usize, dx: usize, c: char) {
        self.rows[row * CELL_H + dy][col * CELL_W + dx] = c;
    }

    fn get(&self, row: usize, col: usize, dy: usize, dx: usize) -> char {
        self.rows[row * CELL_H + dy][col * CELL_W + dx]
    }

    /// Draw the beam arm from the cell middle to `edge`
    fn arm(&mut self, row: usize, col: usize, edge: Edge, g: &Glyphs) {
        match edge {
            Edge::North => self.put(row, col, 0, MID_X, g.beam_v),
            Edge::South => self.put(row, col, 2, MID_X, g.beam_v),
            Edge::West => {
                for dx in 0..MID_X {
                    self.put(row, col, MID_Y, dx, g.beam_h);
                }
            }
            Edge::East => {
                for dx in MID_X + 1..CELL_W {
                    self.put(row, col, MID_Y, dx, g.beam_h);
                }
            }
            Edge::Stop => {}
        }
    }

    /// Beam passing straight through an empty cell lights the middle too
    fn through(&mut self, row: usize, col: usize, segment: &BeamSegment, g: &Glyphs) {
        self.arm(row, col, segment.entry, g);
        self.arm(row, col, segment.exit, g);
        let c = if segment.entry.is_vertical() { g.beam_v } else { g.beam_h };
        let mid = match self.get(row, col, MID_Y, MID_X) {
            ' ' => c,
            existing if existing == c => c,
            _ => g.beam_cross,
        };
        self.put(row, col, MID_Y, MID_X, mid);
    }

    fn into_lines(self) -> Vec<String> {
        self.rows
            .into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}

fn face_offset(dir: Direction) -> (usize, usize) {
    match dir {
        Direction::North => (0, MID_X),
        Direction::East => (MID_Y, 5),
        Direction::South => (2, MID_X),
        Direction::West => (MID_Y, 1),
    }
}

/// Glyph for a token in the middle of its cell
pub fn token_glyph(token: &Token, g: &Glyphs) -> char {
    let dir = token.dir;
    match token.kind {
        TokenKind::None => ' ',
        TokenKind::Block => g.block,
        TokenKind::Checkpoint if dir.is_vertical() => g.checkpoint_v,
        TokenKind::Checkpoint => g.checkpoint_h,
        TokenKind::Laser => g.laser[dir.bits() as usize],
        TokenKind::Mirror if dir.is_vertical() => g.mirror_nwse,
        TokenKind::Mirror => g.mirror_nesw,
        TokenKind::Splitter if dir.is_vertical() => g.splitter_nwse,
        TokenKind::Splitter => g.splitter_nesw,
        TokenKind::Target if token.req_target => g.target_req,
        TokenKind::Target => g.target,
    }
}

/// Draw one beam segment according to the token it crosses
fn draw_segment(canvas: &mut Canvas, token: &Token, segment: &BeamSegment, g: &Glyphs) {
    let (row, col) = (segment.row, segment.col);
    match token.kind {
        TokenKind::None => canvas.through(row, col, segment, g),
        TokenKind::Block | TokenKind::Mirror | TokenKind::Splitter => {
            canvas.arm(row, col, segment.entry, g);
            canvas.arm(row, col, segment.exit, g);
        }
        TokenKind::Checkpoint => {
            if segment.exit != Edge::Stop {
                canvas.arm(row, col, segment.entry, g);
                canvas.arm(row, col, segment.exit, g);
            }
        }
        // The laser shows its emitting arm, or the arm a returning beam hits
        TokenKind::Laser => {
            if segment.entry == Edge::Stop {
                canvas.arm(row, col, segment.exit, g);
            } else {
                canvas.arm(row, col, segment.entry, g);
            }
        }
        TokenKind::Target => {
            if segment.exit != Edge::Stop {
                canvas.arm(row, col, segment.entry, g);
                canvas.arm(row, col, segment.exit, g);
            }
        }
    }
}

/// Render the board (without status line)
pub fn render_board<S>(session: &Session<S>, g: &Glyphs, show_beam: bool) -> Vec<String> {
    let mut canvas = Canvas::new();

    if show_beam {
        for segment in session.segments() {
            let token = session.token(segment.row, segment.col);
            draw_segment(&mut canvas, token, segment, g);
        }
    }

    for row in 0..GRID_HEIGHT {
        for col in 0..GRID_WIDTH {
            let token = session.token(row, col);
            if !token.is_empty() {
                canvas.put(row, col, MID_Y, MID_X, token_glyph(token, g));
            }

            if token.kind == TokenKind::Target {
                let (dy, dx) = face_offset(token.dir);
                let hit = show_beam
                    && session.segments().iter().any(|s| {
                        (s.row, s.col) == (row, col)
                            && s.exit == Edge::Stop
                            && s.entry == token.dir.edge()
                    });
                canvas.put(row, col, dy, dx, if hit { g.target_hit } else { g.target_face });
            }

            if token.can_move {
                canvas.put(row, col, 2, 1, g.movable);
            } else if token.can_rotate {
                canvas.put(row, col, 2, 1, g.rotatable);
            }

            let brackets = if session.is_selection(row, col) {
                Some(('<', '>'))
            } else if session.is_cursor(row, col) {
                Some(('[', ']'))
            } else {
                None
            };
            if let Some((open, close)) = brackets {
                for dy in 0..CELL_H {
                    canvas.put(row, col, dy, 0, open);
                    canvas.put(row, col, dy, CELL_W - 1, close);
                }
            }
        }
    }

    canvas.into_lines()
}

/// Puzzle id, target meter and solve state
pub fn status_line<S>(session: &Session<S>, g: &Glyphs) -> String {
    let meter: String = (0..session.targets_req())
        .map(|i| if i < session.targets_hit() { g.meter_hit } else { g.meter_miss })
        .collect();
    let mut line = format!(
        "Puzzle {:>2} ({}/{})  Targets {} {}/{}",
        session.puzzle_id(),
        session.index() + 1,
        session.puzzle_count(),
        meter,
        session.targets_hit(),
        session.targets_req()
    );
    if session.is_solved() {
        line.push_str("  SOLVED");
    }
    if session.is_total_winner() {
        line.push_str("  YOU WIN!");
    }
    line
}
