//! Save/load of puzzle definitions and solved flags
//!
//! Features:
//! - Fixed-width binary puzzle book, validated on load
//! - One-byte-per-puzzle solved flags, rewritten in full on every solve
//! - `ProgressStore` boundary so sessions can run against disk or memory

pub mod progress;
pub mod puzzles;

pub use progress::{FileProgressStore, MemoryProgressStore, SolvedFlags};
pub use puzzles::{PuzzleBook, decode_record, encode_record};

use crate::Result;

/// Where solved flags live.
///
/// Loading may fail (missing file, unreadable storage); callers decide
/// whether that is fatal. Saving replaces whatever was stored before.
pub trait ProgressStore {
    /// Load flags for `count` puzzles
    fn load(&self, count: usize) -> Result<SolvedFlags>;

    /// Persist all flags
    fn save(&mut self, flags: &SolvedFlags) -> Result<()>;
}

