//! Priority-ordered move selection.
//!
//! ## Stages
//!
//! 1. **Win**: a plain placement, then a `Replace`, that completes a run
//!    for the acting side.
//! 2. **Block**: the first cell where the other side would complete a
//!    run and that we can stop. Taken with a plain placement if possible,
//!    otherwise countered with `Replace` on the run (and, when enabled,
//!    `Destroy`, `CrossDestroy` or `AllDestroy`). A counter only counts if
//!    the cell no longer wins for the other side afterwards.
//! 3. **Effect**: the most expensive affordable non-filler card with a
//!    valid target, played on its best-scoring target.
//! 4. **Fallback**: the cheapest filler card on the best-scoring cell.
//!
//! The first stage producing a move wins. Cards are always tried by
//! descending cost with ties broken by hand order, and equal target
//! scores go to the lowest cell index.

use tracing::{debug, instrument, trace};

use super::candidate::{CardChoice, MoveCandidate, MoveReason};
use super::config::PolicyConfig;
use super::observer::{DecisionObserver, NoopObserver};
use super::request::MoveRequest;
use crate::cards::{EffectCard, EffectKind};
use crate::core::{Board, Mark, Side};
use crate::effects::{footprint, is_valid_target, marks_in_footprint, valid_targets};
use crate::eval::{evaluate_cell, CellScore};
use crate::rules::{apply_move, Run};

/// Stateless move selector.
///
/// Holds only configuration, so one selector can serve any number of
/// threads at once.
///
/// ## Example
///
/// ```
/// use connect_mana::core::{Board, Side};
/// use connect_mana::policy::{MoveReason, MoveRequest, MoveSelector};
///
/// let board = Board::from_symbols(3, "
///     . . .
///     O O .
///     . . .
/// ").unwrap();
///
/// let selector = MoveSelector::default();
/// let chosen = selector
///     .select_move(&MoveRequest::new(&board, Side::Opponent, &[], 0))
///     .unwrap();
///
/// assert_eq!(chosen.cell, 5);
/// assert_eq!(chosen.reason, MoveReason::Win);
/// assert!(chosen.card.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MoveSelector {
    config: PolicyConfig,
}

impl MoveSelector {
    #[must_use]
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Pick a move, or `None` if the acting side has nothing to do.
    #[must_use]
    pub fn select_move(&self, request: &MoveRequest<'_>) -> Option<MoveCandidate> {
        self.select_move_observed(request, &mut NoopObserver)
    }

    /// Pick a move, reporting progress to `observer`.
    #[instrument(level = "trace", skip_all, fields(side = %request.side, mana = request.mana))]
    pub fn select_move_observed(
        &self,
        request: &MoveRequest<'_>,
        observer: &mut dyn DecisionObserver,
    ) -> Option<MoveCandidate> {
        let decision = self
            .find_win(request, observer)
            .or_else(|| self.find_block(request, observer))
            .or_else(|| self.find_effect(request, observer))
            .or_else(|| self.find_fallback(request, observer));

        match &decision {
            Some(chosen) => debug!(
                reason = ?chosen.reason,
                cell = chosen.cell,
                card = ?chosen.card.map(|c| c.id),
                score = ?chosen.score,
                "move selected"
            ),
            None => debug!("no legal move"),
        }
        observer.decided(decision.as_ref());
        decision
    }

    // === Win ===

    fn find_win(&self, request: &MoveRequest<'_>, observer: &mut dyn DecisionObserver) -> Option<MoveCandidate> {
        enter(observer, MoveReason::Win);
        let board = request.board;
        let side = request.side;

        if let Some(cell) = board.placeable_cells(side).find(|&cell| wins_with(board, cell, side)) {
            return Some(MoveCandidate::new(cell, None, MoveReason::Win));
        }

        for (slot, card) in request.cards_by_cost_desc(|c| c.kind == EffectKind::Replace) {
            let winning = valid_targets(board, side, card.kind)
                .into_iter()
                .find(|&cell| wins_with(board, cell, side));
            if let Some(cell) = winning {
                return Some(MoveCandidate::new(cell, Some(choice(slot, card)), MoveReason::Win));
            }
        }
        None
    }

    // === Block ===

    fn find_block(&self, request: &MoveRequest<'_>, observer: &mut dyn DecisionObserver) -> Option<MoveCandidate> {
        enter(observer, MoveReason::Block);
        let board = request.board;
        let side = request.side;
        let threat_side = side.opponent();

        for threat in board.placeable_cells(threat_side) {
            let Some(run) = winning_run(board, threat, threat_side) else {
                continue;
            };
            trace!(threat = threat, run = ?run.as_slice(), "threat found");

            if board.can_place(threat, side) {
                return Some(MoveCandidate::new(threat, None, MoveReason::Block));
            }
            if let Some(counter) = self.counter_threat(request, threat, &run) {
                return Some(counter);
            }
        }
        None
    }

    /// Card play that stops `threat` when the cell itself is closed to us.
    ///
    /// Every candidate is played out on a copy of the board and kept only
    /// if the other side can no longer win at `threat`; a threat cell that
    /// completes two lines needs both broken.
    fn counter_threat(&self, request: &MoveRequest<'_>, threat: usize, run: &Run) -> Option<MoveCandidate> {
        let board = request.board;
        let side = request.side;
        let threat_mark = side.opponent().mark();
        let on_run = |cell: usize| board.mark(cell) == threat_mark && run.contains(&cell);

        let stops = |slot: usize, card: &EffectCard, cell: usize| {
            let candidate = MoveCandidate::new(cell, Some(choice(slot, card)), MoveReason::Block);
            let mut after = board.clone();
            let neutralized = apply_move(&mut after, side, &candidate, Some(card)).is_ok()
                && winning_run(&after, threat, side.opponent()).is_none();
            if !neutralized {
                trace!(threat = threat, cell = cell, card = %card.id, "counter leaves threat open");
            }
            neutralized.then_some(candidate)
        };

        // Mark removers hit the run itself.
        let mut removers = vec![EffectKind::Replace];
        if self.config.destroy_blocks_threats {
            removers.push(EffectKind::Destroy);
        }
        for kind in removers {
            for (slot, card) in request.cards_by_cost_desc(|c| c.kind == kind) {
                let mut targets: Vec<usize> = run
                    .iter()
                    .copied()
                    .filter(|&cell| on_run(cell) && is_valid_target(board, side, kind, cell))
                    .collect();
                targets.sort_unstable();
                if let Some(counter) = targets.into_iter().find_map(|cell| stops(slot, card, cell)) {
                    return Some(counter);
                }
            }
        }

        if !self.config.destroy_blocks_threats {
            return None;
        }

        // Area destroys clear the run from a neighbouring empty cell.
        for (slot, card) in request.cards_by_cost_desc(|c| c.kind.is_area_destroy()) {
            let counter = valid_targets(board, side, card.kind)
                .into_iter()
                .filter(|&cell| footprint(board, card.kind, cell).into_iter().any(on_run))
                .find_map(|cell| stops(slot, card, cell));
            if counter.is_some() {
                return counter;
            }
        }
        None
    }

    // === Effect ===

    fn find_effect(&self, request: &MoveRequest<'_>, observer: &mut dyn DecisionObserver) -> Option<MoveCandidate> {
        enter(observer, MoveReason::Effect);
        let board = request.board;

        for (slot, card) in request.cards_by_cost_desc(|c| !c.kind.is_filler()) {
            let targets = valid_targets(board, request.side, card.kind);
            if targets.is_empty() {
                trace!(card = %card.id, kind = %card.kind, "no valid targets");
                continue;
            }

            let chosen = choice(slot, card);
            let best = best_target(targets, |cell| {
                let (score, bonus) = self.score_effect_target(request, card.kind, cell);
                observer.target_scored(Some(chosen), &score, bonus);
                score.total + bonus
            });
            return best.map(|(cell, score)| {
                MoveCandidate::new(cell, Some(chosen), MoveReason::Effect).with_score(score)
            });
        }
        None
    }

    /// Heuristic score of `cell` for `kind`, plus the card bonus.
    fn score_effect_target(&self, request: &MoveRequest<'_>, kind: EffectKind, cell: usize) -> (CellScore, f64) {
        let board = request.board;
        let side = request.side;
        let heuristic = &self.config.heuristic;
        let bonuses = &self.config.bonuses;

        match kind {
            EffectKind::Replace | EffectKind::Destroy => {
                let emptied = board.with_mark(cell, Mark::Empty);
                let score = evaluate_cell(&emptied, cell, side, heuristic);
                let bonus = if kind == EffectKind::Replace {
                    bonuses.replace
                } else {
                    bonuses.destroy
                };
                (score, bonus)
            }
            EffectKind::Block(_) | EffectKind::BlockAll => {
                let adjacent = board
                    .neighbours(cell)
                    .into_iter()
                    .filter(|&c| board.mark(c) == side.opponent().mark())
                    .count();
                let score = evaluate_cell(board, cell, side, heuristic);
                (score, bonuses.block_per_adjacent * adjacent as f64)
            }
            EffectKind::CrossDestroy | EffectKind::AllDestroy => {
                let hit = marks_in_footprint(board, kind, cell, side.opponent());
                let score = evaluate_cell(board, cell, side, heuristic);
                (score, bonuses.area_destroy_per_mark * hit as f64)
            }
            EffectKind::PlaceNormal => (evaluate_cell(board, cell, side, heuristic), 0.0),
        }
    }

    // === Fallback ===

    fn find_fallback(&self, request: &MoveRequest<'_>, observer: &mut dyn DecisionObserver) -> Option<MoveCandidate> {
        enter(observer, MoveReason::Fallback);
        let board = request.board;
        let side = request.side;

        let (slot, card) = request
            .hand
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind.is_filler() && c.is_affordable(request.mana))
            .min_by_key(|(_, c)| c.cost)?;
        let chosen = choice(slot, card);

        let best = best_target(board.placeable_cells(side), |cell| {
            let score = evaluate_cell(board, cell, side, &self.config.heuristic);
            observer.target_scored(Some(chosen), &score, 0.0);
            score.total
        });
        best.map(|(cell, score)| MoveCandidate::new(cell, Some(chosen), MoveReason::Fallback).with_score(score))
    }
}

fn enter(observer: &mut dyn DecisionObserver, stage: MoveReason) {
    trace!(?stage, "entering stage");
    observer.stage_entered(stage);
}

fn choice(slot: usize, card: &EffectCard) -> CardChoice {
    CardChoice { slot, id: card.id }
}

/// Run completed by `side` taking `cell`, if that run is the board's
/// first completed run.
fn winning_run(board: &Board, cell: usize, side: Side) -> Option<Run> {
    let next = board.with_mark(cell, side.mark());
    let run = next.completed_run()?;
    (next.run_owner(&run) == Some(side)).then_some(run)
}

fn wins_with(board: &Board, cell: usize, side: Side) -> bool {
    board.with_mark(cell, side.mark()).is_won_by(side)
}

/// Highest-scoring cell; ties keep the earliest (lowest index) cell.
fn best_target<I, F>(cells: I, mut score: F) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = usize>,
    F: FnMut(usize) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for cell in cells {
        let value = score(cell);
        if best.map_or(true, |(_, top)| value > top) {
            best = Some((cell, value));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BlockDirection, CardId};
    use crate::core::Block;
    use crate::policy::RecordingObserver;

    fn card(id: u32, cost: u32, kind: EffectKind) -> EffectCard {
        EffectCard::new(CardId::new(id), format!("{kind}"), cost, kind)
    }

    fn select(board: &Board, side: Side, hand: &[EffectCard], mana: u32) -> Option<MoveCandidate> {
        MoveSelector::default().select_move(&MoveRequest::new(board, side, hand, mana))
    }

    #[test]
    fn test_plain_win() {
        let board = Board::from_symbols(3, ". . . O O . . . .").unwrap();
        let chosen = select(&board, Side::Opponent, &[], 0).unwrap();
        assert_eq!(chosen.cell, 5);
        assert_eq!(chosen.reason, MoveReason::Win);
    }

    #[test]
    fn test_win_beats_block() {
        let board = Board::from_symbols(3, "X X . O O . . . .").unwrap();
        let chosen = select(&board, Side::Opponent, &[], 0).unwrap();
        assert_eq!(chosen.cell, 5);
        assert_eq!(chosen.reason, MoveReason::Win);
    }

    #[test]
    fn test_plain_block() {
        let board = Board::from_symbols(3, "X X . . O . . . .").unwrap();
        let chosen = select(&board, Side::Opponent, &[], 0).unwrap();
        assert_eq!(chosen.cell, 2);
        assert_eq!(chosen.reason, MoveReason::Block);
        assert!(chosen.card.is_none());
    }

    #[test]
    fn test_replace_wins_when_no_plain_win() {
        // Row 0 needs cell 2, which holds X.
        let board = Board::from_symbols(3, "O O X . X . . . .").unwrap();
        let hand = [card(0, 1, EffectKind::PlaceNormal), card(1, 3, EffectKind::Replace)];
        let chosen = select(&board, Side::Opponent, &hand, 3).unwrap();

        assert_eq!(chosen.cell, 2);
        assert_eq!(chosen.reason, MoveReason::Win);
        assert_eq!(chosen.card, Some(CardChoice { slot: 1, id: CardId::new(1) }));
    }

    #[test]
    fn test_unaffordable_replace_is_ignored() {
        let board = Board::from_symbols(3, "O O X . X . . . .").unwrap();
        let hand = [card(1, 3, EffectKind::Replace)];
        let chosen = select(&board, Side::Opponent, &hand, 2);
        // Without the card O cannot win, so it blocks X's 2-4-6 diagonal.
        assert_eq!(chosen.map(|c| (c.cell, c.reason)), Some((6, MoveReason::Block)));
    }

    #[test]
    fn test_block_with_replace_when_threat_cell_closed() {
        let mut board = Board::from_symbols(3, "X X . . O . . . .").unwrap();
        board.set_block(2, Block::By(Side::Player));
        let hand = [card(0, 2, EffectKind::Replace)];

        let chosen = select(&board, Side::Opponent, &hand, 5).unwrap();
        assert_eq!(chosen.reason, MoveReason::Block);
        assert_eq!(chosen.cell, 0);
        assert!(chosen.card.is_some());
    }

    #[test]
    fn test_block_with_destroy_is_configurable() {
        let mut board = Board::from_symbols(3, "X X . . O . . . .").unwrap();
        board.set_block(2, Block::By(Side::Player));
        let hand = [card(0, 2, EffectKind::Destroy)];
        let request = MoveRequest::new(&board, Side::Opponent, &hand, 5);

        let chosen = MoveSelector::default().select_move(&request).unwrap();
        assert_eq!((chosen.cell, chosen.reason), (0, MoveReason::Block));

        let strict = MoveSelector::new(PolicyConfig::default().with_destroy_blocks_threats(false));
        let chosen = strict.select_move(&request).unwrap();
        assert_eq!(chosen.reason, MoveReason::Effect);
    }

    #[test]
    fn test_block_with_cross_destroy() {
        let mut board = Board::from_symbols(3, "X X . . O . . . .").unwrap();
        board.set_block(2, Block::By(Side::Player));
        let hand = [card(0, 4, EffectKind::CrossDestroy)];

        let chosen = select(&board, Side::Opponent, &hand, 4).unwrap();
        assert_eq!(chosen.reason, MoveReason::Block);
        // Cell 3's diagonals are 1 and 7; 1 holds part of the run.
        assert_eq!(chosen.cell, 3);
    }

    #[test]
    fn test_double_threat_is_not_half_blocked() {
        // X wins at 0 along row 0 and column 0; one Replace breaks only one.
        let mut board = Board::from_symbols(3, ". X X X O . X . O").unwrap();
        board.set_block(0, Block::By(Side::Player));
        let hand = [card(0, 3, EffectKind::Replace)];

        let chosen = select(&board, Side::Opponent, &hand, 5).unwrap();
        assert_eq!(chosen.reason, MoveReason::Effect);
    }

    #[test]
    fn test_double_threat_cleared_by_area_destroy() {
        let mut board = Board::from_symbols(3, ". X X X . . X . .").unwrap();
        board.set_block(0, Block::By(Side::Player));
        let hand = [card(0, 3, EffectKind::Replace), card(1, 6, EffectKind::AllDestroy)];

        let chosen = select(&board, Side::Opponent, &hand, 6).unwrap();
        assert_eq!(chosen.reason, MoveReason::Block);
        assert_eq!(chosen.cell, 4);
        assert_eq!(chosen.card.map(|c| c.slot), Some(1));
    }

    #[test]
    fn test_effect_prefers_expensive_card() {
        let board = Board::from_symbols(3, ". . . . X . . . .").unwrap();
        let hand = [
            card(0, 2, EffectKind::Block(BlockDirection::Up)),
            card(1, 4, EffectKind::BlockAll),
        ];
        let chosen = select(&board, Side::Opponent, &hand, 4).unwrap();
        assert_eq!(chosen.reason, MoveReason::Effect);
        assert_eq!(chosen.card.map(|c| c.slot), Some(1));
    }

    #[test]
    fn test_effect_skips_card_without_targets() {
        // No X on the board, so Replace has nothing to take.
        let board = Board::from_symbols(3, ". . . . O . . . .").unwrap();
        let hand = [card(0, 5, EffectKind::Replace), card(1, 1, EffectKind::BlockAll)];
        let chosen = select(&board, Side::Opponent, &hand, 5).unwrap();
        assert_eq!(chosen.card.map(|c| c.slot), Some(1));
    }

    #[test]
    fn test_fallback_uses_cheapest_filler() {
        let board = Board::new(3, 3).unwrap();
        let hand = [
            card(0, 2, EffectKind::PlaceNormal),
            card(1, 1, EffectKind::PlaceNormal),
            card(2, 1, EffectKind::PlaceNormal),
        ];
        let chosen = select(&board, Side::Player, &hand, 2).unwrap();
        assert_eq!(chosen.reason, MoveReason::Fallback);
        assert_eq!(chosen.card.map(|c| c.slot), Some(1));
        assert_eq!(chosen.cell, 4);
    }

    #[test]
    fn test_no_move_without_cards() {
        let board = Board::new(3, 3).unwrap();
        assert!(select(&board, Side::Player, &[], 10).is_none());

        let hand = [card(0, 3, EffectKind::PlaceNormal)];
        assert!(select(&board, Side::Player, &hand, 2).is_none());
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = Board::from_symbols(3, "X O X X O O O X X").unwrap();
        let hand = [card(0, 0, EffectKind::PlaceNormal), card(1, 0, EffectKind::BlockAll)];
        assert!(select(&board, Side::Opponent, &hand, 0).is_none());
    }

    #[test]
    fn test_observer_sees_decision() {
        let board = Board::from_symbols(3, "X X . . O . . . .").unwrap();
        let mut recorder = RecordingObserver::new();
        let chosen = MoveSelector::default()
            .select_move_observed(&MoveRequest::new(&board, Side::Opponent, &[], 0), &mut recorder);

        let trace = recorder.into_trace();
        assert_eq!(trace.stages(), vec![MoveReason::Win, MoveReason::Block]);
        assert_eq!(trace.decision(), chosen.as_ref());
    }

    #[test]
    fn test_best_target_ties_go_to_lowest() {
        let best = best_target([3, 1, 7], |c| if c == 1 { 0.0 } else { 5.0 });
        assert_eq!(best, Some((3, 5.0)));
        assert_eq!(best_target(Vec::new(), |_| 1.0), None);
    }
}
