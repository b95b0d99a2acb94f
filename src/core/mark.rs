//! Sides, cell marks, and the blocked-cell overlay.
//!
//! ## Side
//!
//! The two participants. `Side::Player` is the human seat and
//! `Side::Opponent` the computer seat, but the engine treats them
//! symmetrically: every operation takes the acting side as input.
//!
//! ## Mark / Block
//!
//! A board cell carries one `Mark` and, independently, one `Block`.
//! A side may place on a cell it blocked itself, never on a cell the
//! other side blocked.

use serde::{Deserialize, Serialize};

/// One of the two seats at the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human seat (`X`).
    Player,
    /// The computer seat (`O`).
    Opponent,
}

impl Side {
    /// Both sides, player first.
    pub const ALL: [Side; 2] = [Side::Player, Side::Opponent];

    /// The other side.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// The mark this side places.
    #[inline]
    #[must_use]
    pub const fn mark(self) -> Mark {
        match self {
            Side::Player => Mark::Player,
            Side::Opponent => Mark::Opponent,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Opponent => write!(f, "Opponent"),
        }
    }
}

/// Contents of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    Player,
    Opponent,
}

impl Mark {
    /// Owning side, or `None` for an empty cell.
    #[inline]
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Mark::Empty => None,
            Mark::Player => Some(Side::Player),
            Mark::Opponent => Some(Side::Opponent),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Mark::Empty)
    }

    /// Single-character form used by `Board`'s `Display` and test fixtures.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::Player => 'X',
            Mark::Opponent => 'O',
        }
    }
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        side.mark()
    }
}

/// Blocked-cell overlay entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Block {
    #[default]
    Unblocked,
    /// Blocked by the given side; only that side may still place here.
    By(Side),
}

impl Block {
    /// True if this overlay entry forbids `side` from placing.
    #[inline]
    #[must_use]
    pub fn blocks(self, side: Side) -> bool {
        matches!(self, Block::By(owner) if owner != side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Player.opponent(), Side::Opponent);
        assert_eq!(Side::Opponent.opponent(), Side::Player);
    }

    #[test]
    fn test_mark_roundtrip_side() {
        for side in Side::ALL {
            assert_eq!(side.mark().side(), Some(side));
        }
        assert_eq!(Mark::Empty.side(), None);
    }

    #[test]
    fn test_self_block_is_not_a_block() {
        let block = Block::By(Side::Player);
        assert!(!block.blocks(Side::Player));
        assert!(block.blocks(Side::Opponent));
        assert!(!Block::Unblocked.blocks(Side::Player));
    }
}
