//! Puzzle session: the active puzzle, cursor, selection and solved flags
//!
//! The frontend feeds one `Command` at a time into [`Session::apply`]. Any
//! command that changes the grid (or loads another puzzle) re-runs the beam
//! engine, and the first evaluation that meets the win condition marks the
//! puzzle solved and persists the flags.

use super::beam::{BeamTrace, evaluate};
use super::state::{BeamSegment, Puzzle, Selection};
use super::token::{Token, TokenKind};
use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
use crate::error::{Error, Result};
use crate::persistence::{ProgressStore, PuzzleBook, SolvedFlags};
use crate::{cell_coords, cell_index};

/// Abstract input commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Redraw,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Pick up the token under the cursor, or drop the held one
    Select,
    /// Drop the selection without moving anything
    Cancel,
    RotateCcw,
    RotateCw,
    PuzzleNext,
    PuzzlePrev,
    Help,
    Quit,
}

/// What the frontend should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Redraw the board
    Continue,
    /// This command solved the puzzle for the first time
    Solved { id: u8 },
    /// Show the help pages
    Help,
    Quit,
}

/// Cursor axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Col,
}

/// Rotation sense for [`Session::rotate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Wrap `value + delta` into `0..len`
fn wrap(value: usize, delta: i32, len: usize) -> usize {
    (value as i64 + delta as i64).rem_euclid(len as i64) as usize
}

/// Game session over a puzzle book
#[derive(Debug)]
pub struct Session<S> {
    book: PuzzleBook,
    store: S,
    index: usize,
    puzzle: Puzzle,
    trace: BeamTrace,
    cursor: (usize, usize),
    selection: Selection,
    solved: SolvedFlags,
    total_winner: bool,
}

impl<S: ProgressStore> Session<S> {
    /// Start on the first unsolved puzzle.
    ///
    /// Unreadable solved flags are treated as "nothing solved yet".
    pub fn start(book: PuzzleBook, store: S) -> Result<Self> {
        let count = book.len();
        let solved = match store.load(count) {
            Ok(flags) => flags,
            Err(e) => {
                log::warn!("Could not read solved flags ({e}); starting fresh");
                SolvedFlags::new(count)
            }
        };
        let puzzle = book
            .get(0)
            .cloned()
            .ok_or(Error::PuzzleIndex { index: 0, max: 0 })?;

        let mut session = Self {
            book,
            store,
            index: 0,
            puzzle,
            trace: BeamTrace::default(),
            cursor: (0, 0),
            selection: Selection::None,
            solved,
            total_winner: false,
        };
        let first = session.find_first_unsolved();
        log::info!(
            "Session started: {}/{} solved, opening puzzle {}",
            session.solved.solved_count(),
            count,
            first
        );
        session.select_puzzle(first)?;
        Ok(session)
    }

    /// First unsolved puzzle index. When everything is solved this is the
    /// last puzzle and the total-winner flag is raised.
    pub fn find_first_unsolved(&mut self) -> usize {
        match self.solved.first_unsolved() {
            Some(index) => {
                self.total_winner = false;
                index
            }
            None => {
                self.total_winner = true;
                self.book.len().saturating_sub(1)
            }
        }
    }

    /// Reset the active puzzle from the book. Does not evaluate.
    pub fn load(&mut self, index: usize) -> Result<()> {
        let puzzle = self.book.get(index).cloned().ok_or(Error::PuzzleIndex {
            index,
            max: self.book.len().saturating_sub(1),
        })?;
        self.index = index;
        self.puzzle = puzzle;
        self.trace = BeamTrace::default();
        self.selection = Selection::None;
        self.cursor = self.puzzle.laser_cell().map(cell_coords).unwrap_or((0, 0));
        log::info!("Loaded puzzle {} (id {})", index, self.puzzle.id);
        Ok(())
    }

    /// Load a puzzle and evaluate it. Returns true if that evaluation solved it.
    pub fn select_puzzle(&mut self, index: usize) -> Result<bool> {
        self.load(index)?;
        self.refresh()
    }

    pub fn next(&mut self) -> Result<bool> {
        self.select_puzzle(wrap(self.index, 1, self.book.len()))
    }

    pub fn previous(&mut self) -> Result<bool> {
        self.select_puzzle(wrap(self.index, -1, self.book.len()))
    }

    /// Re-run the beam engine. Returns true on the unsolved -> solved
    /// transition, after the flags have been saved.
    pub fn refresh(&mut self) -> Result<bool> {
        self.trace = evaluate(&mut self.puzzle);
        if self.is_solved() || !self.trace.satisfies(self.puzzle.targets_req) {
            return Ok(false);
        }

        self.solved.mark_solved(self.index);
        self.find_first_unsolved();
        log::info!(
            "Puzzle {} (id {}) solved{}",
            self.index,
            self.puzzle.id,
            if self.total_winner { " - all puzzles complete" } else { "" }
        );
        self.store.save(&self.solved)?;
        Ok(true)
    }

    /// Handle one input command
    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        let solved = match command {
            Command::Redraw => return Ok(Outcome::Continue),
            Command::Help => return Ok(Outcome::Help),
            Command::Quit => return Ok(Outcome::Quit),
            Command::PuzzleNext => self.next()?,
            Command::PuzzlePrev => self.previous()?,
            _ => {
                let changed = match command {
                    Command::CursorUp => self.move_cursor(Axis::Row, -1),
                    Command::CursorDown => self.move_cursor(Axis::Row, 1),
                    Command::CursorLeft => self.move_cursor(Axis::Col, -1),
                    Command::CursorRight => self.move_cursor(Axis::Col, 1),
                    Command::Select => self.select_or_place(),
                    Command::Cancel => self.deselect(),
                    Command::RotateCcw => self.rotate(Rotation::CounterClockwise),
                    Command::RotateCw => self.rotate(Rotation::Clockwise),
                    _ => false,
                };
                changed && self.refresh()?
            }
        };

        if solved {
            Ok(Outcome::Solved { id: self.puzzle.id })
        } else {
            Ok(Outcome::Continue)
        }
    }

    /// Direct access to the store (tests and frontends that report saves)
    pub fn store(&self) -> &S {
        &self.store
    }
}

// Edit operations. Each returns true when the grid changed.
impl<S> Session<S> {
    /// Move the cursor, wrapping at the grid edges. Never changes the grid.
    pub fn move_cursor(&mut self, axis: Axis, delta: i32) -> bool {
        let (row, col) = self.cursor;
        self.cursor = match axis {
            Axis::Row => (wrap(row, delta, GRID_HEIGHT), col),
            Axis::Col => (row, wrap(col, delta, GRID_WIDTH)),
        };
        false
    }

    /// Pick up the movable token under the cursor, or drop the held token
    /// onto an empty cell. Dropping onto an occupied cell only cancels.
    pub fn select_or_place(&mut self) -> bool {
        let cell = cell_index(self.cursor.0, self.cursor.1);
        match self.selection {
            Selection::None => {
                let token = &self.puzzle.grid[cell];
                if !token.is_empty() && token.can_move {
                    self.selection = Selection::Cell(cell);
                }
                false
            }
            Selection::Cell(from) => {
                self.selection = Selection::None;
                if !self.puzzle.grid[cell].is_empty() {
                    return false;
                }
                self.puzzle.grid[cell] = self.puzzle.grid[from];
                self.puzzle.grid[from] = Token::EMPTY;
                true
            }
        }
    }

    pub fn deselect(&mut self) -> bool {
        self.selection = Selection::None;
        false
    }

    /// Turn the token under the cursor if it is allowed to rotate
    pub fn rotate(&mut self, rotation: Rotation) -> bool {
        let token = self.puzzle.token_mut(self.cursor.0, self.cursor.1);
        if token.kind == TokenKind::None || !token.can_rotate {
            return false;
        }
        token.dir = match rotation {
            Rotation::Clockwise => token.dir.cw(),
            Rotation::CounterClockwise => token.dir.ccw(),
        };
        true
    }
}

// Read-only view for renderers
impl<S> Session<S> {
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn token(&self, row: usize, col: usize) -> &Token {
        self.puzzle.token(row, col)
    }

    pub fn segments(&self) -> &[BeamSegment] {
        &self.trace.segments
    }

    pub fn trace(&self) -> &BeamTrace {
        &self.trace
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_cursor(&self, row: usize, col: usize) -> bool {
        self.cursor == (row, col)
    }

    pub fn is_selection(&self, row: usize, col: usize) -> bool {
        self.selection == Selection::Cell(cell_index(row, col))
    }

    /// Active puzzle's position in the book
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn puzzle_count(&self) -> usize {
        self.book.len()
    }

    pub fn puzzle_id(&self) -> u8 {
        self.puzzle.id
    }

    pub fn targets_req(&self) -> u8 {
        self.puzzle.targets_req
    }

    pub fn targets_hit(&self) -> u8 {
        self.puzzle.targets_hit
    }

    pub fn is_solved(&self) -> bool {
        self.solved.is_solved(self.index)
    }

    pub fn is_total_winner(&self) -> bool {
        self.total_winner
    }

    pub fn solved_flags(&self) -> &SolvedFlags {
        &self.solved
    }
}
