//! Laser Logic - A 5x5 laser puzzle game
//!
//! Core modules:
//! - `sim`: Deterministic beam engine, puzzle session and edit operations
//! - `persistence`: Puzzle book decoding and solved-flag storage
//! - `platform`: Native input mapping (text keys to commands)
//! - `renderer`: Text renderer for the native frontend
//! - `settings`: JSON configuration

pub mod error;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result, StorageOp};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Grid dimensions
    pub const GRID_WIDTH: usize = 5;
    pub const GRID_HEIGHT: usize = 5;
    pub const GRID_SIZE: usize = GRID_WIDTH * GRID_HEIGHT;

    /// Token catalog per puzzle
    pub const BLOCK_COUNT: usize = 1;
    pub const CHECKPOINT_COUNT: usize = 1;
    pub const LASER_COUNT: usize = 1;
    pub const MIRROR_COUNT: usize = 1;
    pub const SPLITTER_COUNT: usize = 2;
    pub const TARGET_COUNT: usize = 5;
    pub const TOKEN_COUNT: usize =
        BLOCK_COUNT + CHECKPOINT_COUNT + LASER_COUNT + MIRROR_COUNT + SPLITTER_COUNT + TARGET_COUNT;

    /// Upper bound on beam segments in one evaluation (extra segments are dropped)
    pub const BEAM_MAX: usize = 2 * GRID_SIZE * SPLITTER_COUNT;

    /// Puzzle book layout: id + required count, then (cell, descriptor) per token
    pub const BYTES_PER_PUZZLE: usize = 2 + 2 * TOKEN_COUNT;
    pub const PUZZLE_COUNT: usize = 60;
    pub const PUZZLE_BYTES: usize = PUZZLE_COUNT * BYTES_PER_PUZZLE;

    /// Default storage file names
    pub const PUZZLE_FILENAME: &str = "LASER.dat";
    pub const SOLVED_FILENAME: &str = "LASER.cfg";
}

/// Flat cell index for a (row, col) pair
#[inline]
pub fn cell_index(row: usize, col: usize) -> usize {
    consts::GRID_WIDTH * row + col
}

/// (row, col) for a flat cell index
#[inline]
pub fn cell_coords(cell: usize) -> (usize, usize) {
    (cell / consts::GRID_WIDTH, cell % consts::GRID_WIDTH)
}
