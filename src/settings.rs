//! Game settings and preferences
//!
//! Persisted as JSON next to the puzzle data. Every field has a default so
//! older or partial files keep loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{PUZZLE_FILENAME, SOLVED_FILENAME};
use crate::error::{Error, Result, StorageOp};

/// Default settings file name
pub const SETTINGS_FILENAME: &str = "laser-logic.json";

/// Character set for the text renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GlyphSet {
    Ascii,
    #[default]
    Unicode,
}

impl GlyphSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlyphSet::Ascii => "Ascii",
            GlyphSet::Unicode => "Unicode",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ascii" => Some(GlyphSet::Ascii),
            "unicode" | "utf8" => Some(GlyphSet::Unicode),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the puzzle and solved files
    pub data_dir: PathBuf,
    /// Puzzle book file name
    pub puzzle_file: String,
    /// Solved flags file name
    pub solved_file: String,

    // === Logging ===
    /// Level used when RUST_LOG is not set
    pub log_level: String,

    // === Display ===
    /// Draw the beam over the grid
    pub show_beam: bool,
    /// Open the help pages before the first puzzle
    pub show_help_on_start: bool,
    /// Glyphs used for tokens and beam
    pub glyphs: GlyphSet,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            puzzle_file: PUZZLE_FILENAME.to_string(),
            solved_file: SOLVED_FILENAME.to_string(),

            log_level: "info".to_string(),

            show_beam: true,
            show_help_on_start: false,
            glyphs: GlyphSet::Unicode,
        }
    }
}

impl Settings {
    /// Full path of the puzzle book
    pub fn puzzle_path(&self) -> PathBuf {
        self.data_dir.join(&self.puzzle_file)
    }

    /// Full path of the solved flags
    pub fn solved_path(&self) -> PathBuf {
        self.data_dir.join(&self.solved_file)
    }

    /// Load settings from a JSON file. A missing file gives the defaults;
    /// a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::reading(StorageOp::Read, path, e)),
        };
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| Error::writing(StorageOp::Write, path, e))?;
        log::info!("Settings saved");
        Ok(())
    }
}
