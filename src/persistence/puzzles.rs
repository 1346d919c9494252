//! Puzzle book: fixed-width binary puzzle records
//!
//! ```text
//! per puzzle (24 bytes):
//!   1 byte   id
//!   1 byte   required target count
//!   11 x 2   (cell index, token descriptor)
//! ```
//! Entries whose descriptor type is None are padding.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::consts::*;
use crate::error::{Error, Result, StorageOp};
use crate::sim::{Puzzle, Token, TokenKind};

/// All puzzles, validated and ready to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleBook {
    puzzles: Vec<Puzzle>,
}

impl PuzzleBook {
    /// Read and validate a puzzle file
    pub fn read(path: &Path) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| Error::reading(StorageOp::Open, path, e))?;
        let mut bytes = Vec::with_capacity(PUZZLE_BYTES);
        file.read_to_end(&mut bytes)
            .map_err(|e| Error::reading(StorageOp::Read, path, e))?;

        let book = Self::from_bytes(&bytes)?;
        log::info!("Loaded {} puzzles from {}", book.len(), path.display());
        Ok(book)
    }

    /// Decode a whole puzzle file image
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PUZZLE_BYTES {
            return Err(Error::PuzzleFileSize {
                expected: PUZZLE_BYTES,
                got: bytes.len(),
            });
        }
        let puzzles = bytes
            .chunks_exact(BYTES_PER_PUZZLE)
            .enumerate()
            .map(|(index, record)| decode_record(index, record))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { puzzles })
    }

    /// Build a book from puzzles made in code. Each one is validated the
    /// same way a file record is.
    pub fn from_puzzles(puzzles: Vec<Puzzle>) -> Result<Self> {
        if puzzles.is_empty() {
            return Err(Error::PuzzleFileSize {
                expected: BYTES_PER_PUZZLE,
                got: 0,
            });
        }
        let puzzles = puzzles
            .into_iter()
            .enumerate()
            .map(|(index, mut puzzle)| {
                for token in puzzle.grid.iter_mut() {
                    token.hit = false;
                }
                puzzle.targets_hit = 0;
                validate(index, &mut puzzle)?;
                Ok(puzzle)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { puzzles })
    }

    /// Encode every puzzle back into the file format
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.puzzles.len() * BYTES_PER_PUZZLE);
        for (index, puzzle) in self.puzzles.iter().enumerate() {
            bytes.extend_from_slice(&encode_record(index, puzzle)?);
        }
        Ok(bytes)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Puzzle> {
        self.puzzles.get(index)
    }
}

/// Decode one record into a fresh puzzle
pub fn decode_record(index: usize, record: &[u8]) -> Result<Puzzle> {
    let invalid = |reason: String| Error::InvalidPuzzle { index, reason };

    if record.len() != BYTES_PER_PUZZLE {
        return Err(invalid(format!(
            "record has {} bytes, expected {}",
            record.len(),
            BYTES_PER_PUZZLE
        )));
    }

    let mut puzzle = Puzzle::new(record[0], record[1]);
    for entry in record[2..].chunks_exact(2) {
        let (cell, data) = (entry[0] as usize, entry[1]);
        let token =
            Token::decode(data).ok_or_else(|| invalid(format!("unknown token type in {data:#04x}")))?;
        if token.is_empty() {
            continue;
        }
        if cell >= GRID_SIZE {
            return Err(invalid(format!("cell index {cell} is off the grid")));
        }
        puzzle.grid[cell] = token;
    }

    validate(index, &mut puzzle)?;
    Ok(puzzle)
}

/// Encode one puzzle as a file record
pub fn encode_record(index: usize, puzzle: &Puzzle) -> Result<[u8; BYTES_PER_PUZZLE]> {
    let mut record = [0u8; BYTES_PER_PUZZLE];
    record[0] = puzzle.id;
    record[1] = puzzle.targets_req;

    let tokens = puzzle
        .grid
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.is_empty());
    let mut count = 0;
    for (cell, token) in tokens {
        if count == TOKEN_COUNT {
            return Err(Error::InvalidPuzzle {
                index,
                reason: format!("more than {TOKEN_COUNT} tokens"),
            });
        }
        let at = 2 + 2 * count;
        record[at] = cell as u8;
        record[at + 1] = token.encode();
        count += 1;
    }
    Ok(record)
}

/// Check puzzle-data invariants and derive `targets_extra`
fn validate(index: usize, puzzle: &mut Puzzle) -> Result<()> {
    let lasers = puzzle
        .grid
        .iter()
        .filter(|t| t.kind == TokenKind::Laser)
        .count();
    if lasers != 1 {
        return Err(Error::InvalidPuzzle {
            index,
            reason: format!("expected exactly one laser, found {lasers}"),
        });
    }
    if puzzle.update_targets_extra().is_none() {
        return Err(Error::InvalidPuzzle {
            index,
            reason: format!(
                "{} required targets but only {} targets needed",
                puzzle.required_targets(),
                puzzle.targets_req
            ),
        });
    }
    Ok(())
}
