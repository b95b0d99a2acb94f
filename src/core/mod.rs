//! Core types: sides, marks, the board snapshot, errors, RNG.
//!
//! Everything else in the crate reads a `Board`; nothing here knows
//! about cards or move selection.

pub mod board;
pub mod error;
pub mod mark;
pub mod rng;

pub use board::{Axis, Board};
pub use error::{BoardError, CardError, Error, MoveError, Result};
pub use mark::{Block, Mark, Side};
pub use rng::GameRng;
