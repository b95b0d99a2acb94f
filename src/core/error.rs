//! Error types.
//!
//! The decision path never fails: "no legal move" is `None`.
//! Errors only come from constructing a malformed `Board` or from
//! applying a move, spending mana, or playing a card that the caller
//! got wrong.

use thiserror::Error as ThisError;

use super::mark::Side;
use crate::cards::CardId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Crate-level error.
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Card(#[from] CardError),
}

/// Rejected board construction.
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size must be at least 1")]
    ZeroSize,
    #[error("win length must be at least 1")]
    ZeroWinLength,
    #[error("win length {win_length} exceeds board size {size}")]
    WinLengthTooLong { size: usize, win_length: usize },
    #[error("{what} has {actual} cells, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Rejected move application.
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum MoveError {
    #[error("cell {cell} is outside a board of {cells} cells")]
    OutOfBounds { cell: usize, cells: usize },
    #[error("cell {cell} is not a legal target for {side}")]
    IllegalTarget { cell: usize, side: Side },
    #[error("move names card {expected} but {actual} was supplied")]
    CardMismatch { expected: CardId, actual: CardId },
    #[error("move names a card but none was supplied")]
    MissingCard,
}

/// Rejected card or mana operation.
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum CardError {
    #[error("hand has no card in slot {slot} (hand size {hand_size})")]
    EmptySlot { slot: usize, hand_size: usize },
    #[error("cost {cost} exceeds available mana {available}")]
    InsufficientMana { cost: u32, available: u32 },
}
