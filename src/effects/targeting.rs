//! Target enumeration and footprints for effect kinds.
//!
//! A *target* is the cell a card is played on. A *footprint* is the set
//! of further cells the effect touches (blocked or cleared). Both are
//! pure functions of the board; out-of-bound neighbours are dropped
//! silently.

use smallvec::SmallVec;

use crate::cards::EffectKind;
use crate::core::{Board, Mark, Side};

/// Cells touched by an effect besides its target.
pub type Footprint = SmallVec<[usize; 8]>;

/// True if `side` may play `kind` on `cell`.
///
/// - `Replace`, `Destroy`: `cell` holds the other side's mark and is not
///   blocked against `side`.
/// - every other kind: `cell` is empty and not blocked against `side`.
/// - `Block(dir)` additionally needs the neighbour in `dir` on the board;
///   `BlockAll` needs at least one neighbour.
#[must_use]
pub fn is_valid_target(board: &Board, side: Side, kind: EffectKind, cell: usize) -> bool {
    if !board.contains(cell) || !board.is_open_for(cell, side) {
        return false;
    }

    let occupancy_ok = if kind.targets_opponent_mark() {
        board.mark(cell) == side.opponent().mark()
    } else {
        board.mark(cell) == Mark::Empty
    };
    if !occupancy_ok {
        return false;
    }

    match kind {
        EffectKind::Block(_) | EffectKind::BlockAll => !footprint(board, kind, cell).is_empty(),
        _ => true,
    }
}

/// All cells `side` may play `kind` on, in index order.
///
/// ```
/// use connect_mana::cards::EffectKind;
/// use connect_mana::core::{Board, Side};
/// use connect_mana::effects::valid_targets;
///
/// let board = Board::from_symbols(3, "
///     . X .
///     O . .
///     . . .
/// ").unwrap();
/// assert_eq!(valid_targets(&board, Side::Opponent, EffectKind::Replace), vec![1]);
/// assert_eq!(valid_targets(&board, Side::Player, EffectKind::Destroy), vec![3]);
/// ```
#[must_use]
pub fn valid_targets(board: &Board, side: Side, kind: EffectKind) -> Vec<usize> {
    (0..board.cell_count())
        .filter(|&cell| is_valid_target(board, side, kind, cell))
        .collect()
}

/// Cells `kind` touches when played on `cell`, row-major.
///
/// - `Block(dir)`: the one neighbour in `dir`
/// - `BlockAll`, `AllDestroy`: the 8-neighbourhood
/// - `CrossDestroy`: the diagonal neighbours
/// - anything else: nothing
#[must_use]
pub fn footprint(board: &Board, kind: EffectKind, cell: usize) -> Footprint {
    match kind {
        EffectKind::Block(dir) => {
            let (dr, dc) = dir.delta();
            board.offset(cell, dr, dc).into_iter().collect()
        }
        EffectKind::BlockAll | EffectKind::AllDestroy => board.neighbours(cell),
        EffectKind::CrossDestroy => board.diagonal_neighbours(cell),
        EffectKind::PlaceNormal | EffectKind::Replace | EffectKind::Destroy => Footprint::new(),
    }
}

/// Number of `side`'s marks inside `kind`'s footprint at `cell`.
#[must_use]
pub fn marks_in_footprint(board: &Board, kind: EffectKind, cell: usize, side: Side) -> usize {
    footprint(board, kind, cell)
        .into_iter()
        .filter(|&c| board.mark(c) == side.mark())
        .count()
}
