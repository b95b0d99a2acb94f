//! Applying a selected move to a board.
//!
//! The selector only proposes; this is where a proposal becomes a board
//! mutation. Mana and hand bookkeeping stay with the caller.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::win::Run;
use crate::cards::{EffectCard, EffectKind};
use crate::core::{Block, Board, Mark, MoveError, Side};
use crate::effects::{footprint, is_valid_target};
use crate::policy::MoveCandidate;

/// What a move changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    pub cell: usize,
    pub side: Side,
    pub kind: EffectKind,
    /// Cells newly blocked for the other side.
    pub blocked: SmallVec<[usize; 8]>,
    /// Cells whose opponent mark was removed.
    pub cleared: SmallVec<[usize; 8]>,
    /// First completed run after the move, if any.
    pub run: Option<Run>,
    /// Owner of `run`.
    pub winner: Option<Side>,
}

/// Validate `candidate` for `side` and apply it to `board`.
///
/// `card` must be the card the candidate names; a candidate without a
/// card is a plain placement and ignores `card`. On error the board is
/// left untouched.
///
/// ```
/// use connect_mana::cards::{CardId, EffectCard, EffectKind};
/// use connect_mana::core::{Board, Mark, Side};
/// use connect_mana::policy::{CardChoice, MoveCandidate, MoveReason};
/// use connect_mana::rules::apply_move;
///
/// let mut board = Board::from_symbols(3, "
///     O . .
///     . . .
///     . . O
/// ").unwrap();
/// let nova = EffectCard::new(CardId::new(9), "Nova", 6, EffectKind::AllDestroy);
/// let chosen = MoveCandidate::new(
///     4,
///     Some(CardChoice { slot: 0, id: nova.id }),
///     MoveReason::Effect,
/// );
///
/// let applied = apply_move(&mut board, Side::Player, &chosen, Some(&nova)).unwrap();
/// assert_eq!(applied.cleared.as_slice(), &[0, 8]);
/// assert_eq!(board.mark(4), Mark::Player);
/// assert_eq!(board.mark(0), Mark::Empty);
/// ```
pub fn apply_move(
    board: &mut Board,
    side: Side,
    candidate: &MoveCandidate,
    card: Option<&EffectCard>,
) -> Result<AppliedMove, MoveError> {
    let kind = match (candidate.card, card) {
        (None, _) => EffectKind::PlaceNormal,
        (Some(_), None) => return Err(MoveError::MissingCard),
        (Some(choice), Some(card)) if choice.id != card.id => {
            return Err(MoveError::CardMismatch {
                expected: choice.id,
                actual: card.id,
            });
        }
        (Some(_), Some(card)) => card.kind,
    };

    let cell = candidate.cell;
    if !board.contains(cell) {
        return Err(MoveError::OutOfBounds {
            cell,
            cells: board.cell_count(),
        });
    }
    if !is_valid_target(board, side, kind, cell) {
        return Err(MoveError::IllegalTarget { cell, side });
    }

    let mut blocked: SmallVec<[usize; 8]> = SmallVec::new();
    let mut cleared: SmallVec<[usize; 8]> = SmallVec::new();

    if kind == EffectKind::Destroy {
        board.set_mark(cell, Mark::Empty);
        cleared.push(cell);
    } else {
        board.set_mark(cell, side.mark());
    }

    let touched = footprint(board, kind, cell);
    if kind.is_block() {
        for c in touched {
            board.set_block(c, Block::By(side));
            blocked.push(c);
        }
    } else if kind.is_area_destroy() {
        let enemy = side.opponent().mark();
        for c in touched {
            if board.mark(c) != enemy {
                continue;
            }
            board.set_mark(c, Mark::Empty);
            cleared.push(c);
        }
    }

    let run = board.completed_run();
    let winner = run.as_ref().and_then(|r| board.run_owner(r));
    debug!(side = %side, cell = cell, kind = %kind, blocked = blocked.len(), cleared = cleared.len(), ?winner, "move applied");

    Ok(AppliedMove {
        cell,
        side,
        kind,
        blocked,
        cleared,
        run,
        winner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BlockDirection, CardId};
    use crate::policy::{CardChoice, MoveReason};

    fn with_card(cell: usize, card: &EffectCard) -> MoveCandidate {
        MoveCandidate::new(
            cell,
            Some(CardChoice { slot: 0, id: card.id }),
            MoveReason::Effect,
        )
    }

    fn card(kind: EffectKind) -> EffectCard {
        EffectCard::new(CardId::new(1), "test", 1, kind)
    }

    #[test]
    fn test_plain_placement_reports_win() {
        let mut board = Board::from_symbols(3, "X X . . . . . . .").unwrap();
        let chosen = MoveCandidate::new(2, None, MoveReason::Win);

        let applied = apply_move(&mut board, Side::Player, &chosen, None).unwrap();
        assert_eq!(applied.winner, Some(Side::Player));
        assert_eq!(applied.run.unwrap().as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_occupied_target_is_rejected() {
        let mut board = Board::from_symbols(3, "X . . . . . . . .").unwrap();
        let before = board.clone();
        let chosen = MoveCandidate::new(0, None, MoveReason::Fallback);

        assert_eq!(
            apply_move(&mut board, Side::Opponent, &chosen, None),
            Err(MoveError::IllegalTarget { cell: 0, side: Side::Opponent })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new(2, 2).unwrap();
        let chosen = MoveCandidate::new(4, None, MoveReason::Fallback);
        assert_eq!(
            apply_move(&mut board, Side::Player, &chosen, None),
            Err(MoveError::OutOfBounds { cell: 4, cells: 4 })
        );
    }

    #[test]
    fn test_card_checks() {
        let mut board = Board::new(3, 3).unwrap();
        let replace = card(EffectKind::Replace);
        let chosen = with_card(4, &replace);

        assert_eq!(
            apply_move(&mut board, Side::Player, &chosen, None),
            Err(MoveError::MissingCard)
        );

        let other = EffectCard::new(CardId::new(2), "other", 0, EffectKind::PlaceNormal);
        assert_eq!(
            apply_move(&mut board, Side::Player, &chosen, Some(&other)),
            Err(MoveError::CardMismatch { expected: CardId::new(1), actual: CardId::new(2) })
        );
    }

    #[test]
    fn test_replace_overwrites() {
        let mut board = Board::from_symbols(3, ". O . . . . . . .").unwrap();
        let replace = card(EffectKind::Replace);
        apply_move(&mut board, Side::Player, &with_card(1, &replace), Some(&replace)).unwrap();
        assert_eq!(board.mark(1), Mark::Player);
    }

    #[test]
    fn test_destroy_places_nothing() {
        let mut board = Board::from_symbols(3, ". O . . . . . . .").unwrap();
        let destroy = card(EffectKind::Destroy);
        let applied = apply_move(&mut board, Side::Player, &with_card(1, &destroy), Some(&destroy)).unwrap();

        assert_eq!(board.mark(1), Mark::Empty);
        assert_eq!(applied.cleared.as_slice(), &[1]);
    }

    #[test]
    fn test_block_sets_overlay() {
        let mut board = Board::new(3, 3).unwrap();
        let ward = card(EffectKind::Block(BlockDirection::Down));
        let applied = apply_move(&mut board, Side::Opponent, &with_card(4, &ward), Some(&ward)).unwrap();

        assert_eq!(applied.blocked.as_slice(), &[7]);
        assert!(!board.can_place(7, Side::Player));
        assert!(board.can_place(7, Side::Opponent));
    }

    #[test]
    fn test_cross_destroy_spares_own_marks() {
        let mut board = Board::from_symbols(3, "O . X . . . X . O").unwrap();
        let blast = card(EffectKind::CrossDestroy);
        let applied = apply_move(&mut board, Side::Player, &with_card(4, &blast), Some(&blast)).unwrap();

        assert_eq!(applied.cleared.as_slice(), &[0, 8]);
        assert_eq!(board.mark(2), Mark::Player);
        assert_eq!(board.mark(6), Mark::Player);
        // 2-4-6 is now a completed run.
        assert_eq!(applied.winner, Some(Side::Player));
    }

    #[test]
    fn test_all_destroy_clears_every_enemy_neighbour() {
        let mut board = Board::from_symbols(3, "X O X O . O X O X").unwrap();
        let nova = card(EffectKind::AllDestroy);
        let applied = apply_move(&mut board, Side::Opponent, &with_card(4, &nova), Some(&nova)).unwrap();

        assert_eq!(applied.cleared.as_slice(), &[0, 2, 6, 8]);
        assert_eq!(board.mark(1), Mark::Opponent);
        assert_eq!(board.mark(4), Mark::Opponent);
        assert!(board.marks().iter().all(|&m| m != Mark::Player));
    }
}
