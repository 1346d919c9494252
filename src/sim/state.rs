//! Puzzle state and core simulation types
//!
//! A `Puzzle` is the 5x5 token grid plus its target quotas. The beam engine
//! writes `hit` marks and `targets_hit` back into it on every evaluation so
//! the renderer can read them.

use serde::{Deserialize, Serialize};

use super::direction::{Direction, Edge};
use super::token::{Token, TokenKind};
use crate::consts::*;
use crate::{cell_coords, cell_index};

/// The token grid, row-major
pub type Grid = [Token; GRID_SIZE];

/// One traversal of one cell by the beam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeamSegment {
    pub row: usize,
    pub col: usize,
    /// Edge the beam came in through (`Stop` for the laser's own cell)
    pub entry: Edge,
    /// Edge the beam leaves through (`Stop` when it ends here)
    pub exit: Edge,
}

impl BeamSegment {
    pub fn new(cell: usize, entry: Edge, exit: Edge) -> Self {
        let (row, col) = cell_coords(cell);
        Self {
            row,
            col,
            entry,
            exit,
        }
    }

    #[inline]
    pub fn cell(&self) -> usize {
        cell_index(self.row, self.col)
    }
}

/// A loaded puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: u8,
    /// Targets that must be hit
    pub targets_req: u8,
    /// How many optional targets may count toward `targets_req`
    pub targets_extra: u8,
    /// Result of the latest evaluation
    pub targets_hit: u8,
    pub grid: Grid,
}

impl Puzzle {
    /// Empty puzzle with no tokens
    pub fn new(id: u8, targets_req: u8) -> Self {
        Self {
            id,
            targets_req,
            targets_extra: 0,
            targets_hit: 0,
            grid: [Token::EMPTY; GRID_SIZE],
        }
    }

    /// Place a token (builder style, used for hand-made puzzles)
    pub fn with_token(mut self, row: usize, col: usize, token: Token) -> Self {
        self.grid[cell_index(row, col)] = token;
        self
    }

    #[inline]
    pub fn token(&self, row: usize, col: usize) -> &Token {
        &self.grid[cell_index(row, col)]
    }

    #[inline]
    pub fn token_mut(&mut self, row: usize, col: usize) -> &mut Token {
        &mut self.grid[cell_index(row, col)]
    }

    /// Cell holding the laser. The last one wins if the grid has several.
    pub fn laser_cell(&self) -> Option<usize> {
        self.grid
            .iter()
            .rposition(|t| t.kind == TokenKind::Laser)
    }

    /// Number of required targets on the grid
    pub fn required_targets(&self) -> usize {
        self.grid
            .iter()
            .filter(|t| t.kind == TokenKind::Target && t.req_target)
            .count()
    }

    /// Number of tokens the beam has to touch
    pub fn tokens_required(&self) -> usize {
        self.grid.iter().filter(|t| t.kind.must_be_hit()).count()
    }

    /// Recompute the optional-target allowance from `targets_req`.
    /// `None` when there are more required targets than the quota.
    pub fn update_targets_extra(&mut self) -> Option<u8> {
        let req = u8::try_from(self.required_targets()).ok()?;
        self.targets_extra = self.targets_req.checked_sub(req)?;
        Some(self.targets_extra)
    }

    /// Laser orientation, if there is a laser
    pub fn laser_dir(&self) -> Option<Direction> {
        self.laser_cell().map(|cell| self.grid[cell].dir)
    }
}

/// Grid selection for the move operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Cell(usize),
}
