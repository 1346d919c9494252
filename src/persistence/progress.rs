//! Solved-puzzle flags
//!
//! Stored as one ASCII byte per puzzle: `'1'` solved, anything else
//! unsolved. The whole file is rewritten whenever a puzzle is solved.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ProgressStore;
use crate::error::{Error, Result, StorageOp};

const SOLVED: u8 = b'1';
const UNSOLVED: u8 = b'0';

/// One flag per puzzle. Flags are only ever set, never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvedFlags {
    flags: Vec<bool>,
}

impl SolvedFlags {
    /// All unsolved
    pub fn new(count: usize) -> Self {
        Self {
            flags: vec![false; count],
        }
    }

    /// Decode file bytes. Missing trailing entries count as unsolved and
    /// extra bytes are ignored.
    pub fn from_bytes(bytes: &[u8], count: usize) -> Self {
        let flags = (0..count)
            .map(|i| bytes.get(i).copied() == Some(SOLVED))
            .collect();
        Self { flags }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.flags
            .iter()
            .map(|&solved| if solved { SOLVED } else { UNSOLVED })
            .collect()
    }

    pub fn is_solved(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Mark a puzzle solved. Returns true if it wasn't already.
    pub fn mark_solved(&mut self, index: usize) -> bool {
        match self.flags.get_mut(index) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    /// Index of the first unsolved puzzle
    pub fn first_unsolved(&self) -> Option<usize> {
        self.flags.iter().position(|&solved| !solved)
    }

    pub fn solved_count(&self) -> usize {
        self.flags.iter().filter(|&&solved| solved).count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Solved flags kept in a file on disk
#[derive(Debug, Clone)]
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self, count: usize) -> Result<SolvedFlags> {
        let path = self.path.as_path();
        let mut file = File::open(path).map_err(|e| Error::reading(StorageOp::Open, path, e))?;
        let mut bytes = Vec::with_capacity(count);
        file.read_to_end(&mut bytes)
            .map_err(|e| Error::reading(StorageOp::Read, path, e))?;
        Ok(SolvedFlags::from_bytes(&bytes, count))
    }

    fn save(&mut self, flags: &SolvedFlags) -> Result<()> {
        let path = self.path.as_path();
        let mut file =
            File::create(path).map_err(|e| Error::writing(StorageOp::Create, path, e))?;
        file.write_all(&flags.to_bytes())
            .map_err(|e| Error::writing(StorageOp::Write, path, e))?;
        file.sync_all()
            .map_err(|e| Error::writing(StorageOp::Close, path, e))?;
        log::debug!("Saved solved flags to {}", path.display());
        Ok(())
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryProgressStore {
    bytes: Option<Vec<u8>>,
    saves: usize,
    fail_writes: bool,
}

impl MemoryProgressStore {
    /// Empty store: loading fails the way a missing file does
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with file bytes
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Some(bytes),
            ..Self::default()
        }
    }

    /// Make every save fail with a write error
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Bytes of the last successful save (or the initial contents)
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self, count: usize) -> Result<SolvedFlags> {
        match &self.bytes {
            Some(bytes) => Ok(SolvedFlags::from_bytes(bytes, count)),
            None => Err(Error::reading(
                StorageOp::Open,
                "memory",
                std::io::Error::new(std::io::ErrorKind::NotFound, "nothing saved"),
            )),
        }
    }

    fn save(&mut self, flags: &SolvedFlags) -> Result<()> {
        if self.fail_writes {
            return Err(Error::writing(
                StorageOp::Write,
                "memory",
                std::io::Error::other("write rejected"),
            ));
        }
        self.bytes = Some(flags.to_bytes());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        let flags = SolvedFlags::from_bytes(b"1011", 6);
        assert_eq!(flags.len(), 6);
        assert!(flags.is_solved(0));
        assert!(!flags.is_solved(1));
        assert!(flags.is_solved(3));
        assert!(!flags.is_solved(5));
        assert!(!flags.is_solved(100));
        assert_eq!(flags.first_unsolved(), Some(1));
        assert_eq!(flags.solved_count(), 3);
        assert_eq!(flags.to_bytes(), b"101100");
    }

    #[test]
    fn test_mark_solved_is_sticky() {
        let mut flags = SolvedFlags::new(3);
        assert!(flags.mark_solved(1));
        assert!(!flags.mark_solved(1));
        assert!(!flags.mark_solved(7));
        assert!(flags.is_solved(1));
    }

    #[test]
    fn test_first_unsolved_when_all_done() {
        let flags = SolvedFlags::from_bytes(b"111", 3);
        assert_eq!(flags.first_unsolved(), None);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryProgressStore::new();
        assert!(store.load(3).is_err());

        let mut flags = SolvedFlags::new(3);
        flags.mark_solved(2);
        store.save(&flags).unwrap();
        assert_eq!(store.bytes(), Some(&b"001"[..]));
        assert_eq!(store.load(3).unwrap(), flags);
        assert_eq!(store.saves(), 1);

        let mut failing = MemoryProgressStore::new().failing_writes();
        let err = failing.save(&flags).unwrap_err();
        assert_eq!(err.code(), 22);
    }
}
