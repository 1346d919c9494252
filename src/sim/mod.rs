//! Deterministic puzzle simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - No I/O except through the `ProgressStore` handed to a `Session`
//! - Stable segment order (discovery order)
//! - No rendering or platform dependencies

pub mod beam;
pub mod direction;
pub mod session;
pub mod state;
pub mod token;

pub use beam::{BeamQueue, BeamTrace, evaluate, evaluate_with_cap};
pub use direction::{Direction, Edge};
pub use session::{Axis, Command, Outcome, Rotation, Session};
pub use state::{BeamSegment, Grid, Puzzle, Selection};
pub use token::{Token, TokenKind};
