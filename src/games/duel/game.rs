//! Self-play duel between two move selectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{CardCatalog, Deck, ManaPool};
use crate::core::{Board, BoardError, CardError, GameRng, Result, Side};
use crate::policy::{MoveCandidate, MoveRequest, MoveSelector, PolicyConfig};
use crate::rules::{apply_move, AppliedMove};

/// Settings for a duel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Board width and height (default: 5).
    pub size: usize,

    /// Marks in a row needed to win (default: 4).
    pub win_length: usize,

    /// Mana cap per side (default: 10).
    pub max_mana: u32,

    /// Mana gained at the start of each own turn (default: 2).
    pub mana_regen: u32,

    /// Hand is refilled to this many cards every turn (default: 5).
    pub hand_size: usize,

    /// Filler copies in each side's deck, on top of one of every other
    /// card in the catalog (default: 8).
    pub filler_copies: usize,

    /// Seed for deck shuffling (default: 42).
    pub seed: u64,

    /// Pause before each decision (default: none).
    pub thinking_delay: Duration,

    /// Side taking the first turn (default: `Player`).
    pub first: Side,

    /// Selector settings, shared by both sides.
    pub policy: PolicyConfig,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            size: 5,
            win_length: 4,
            max_mana: 10,
            mana_regen: 2,
            hand_size: 5,
            filler_copies: 8,
            seed: 42,
            thinking_delay: Duration::ZERO,
            first: Side::Player,
            policy: PolicyConfig::default(),
        }
    }
}

/// How a duel ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuelResult {
    Winner(Side),
    /// Turn limit reached without a completed run.
    Draw,
}

/// Record of one played turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Zero-based turn number.
    pub turn: usize,
    pub side: Side,
    /// What the selector chose; `None` is a pass.
    pub decision: Option<MoveCandidate>,
    pub applied: Option<AppliedMove>,
    /// Mana left after paying for the move.
    pub mana_after: u32,
}

impl TurnOutcome {
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.decision.is_none()
    }
}

/// Builder for creating a `Duel`.
#[derive(Clone, Debug, Default)]
pub struct DuelBuilder {
    config: DuelConfig,
    catalog: Option<CardCatalog>,
}

impl DuelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing config.
    pub fn from_config(config: DuelConfig) -> Self {
        Self {
            config,
            catalog: None,
        }
    }

    pub fn size(mut self, size: usize) -> Self {
        self.config.size = size;
        self
    }

    pub fn win_length(mut self, win_length: usize) -> Self {
        self.config.win_length = win_length;
        self
    }

    pub fn max_mana(mut self, max_mana: u32) -> Self {
        self.config.max_mana = max_mana;
        self
    }

    pub fn mana_regen(mut self, regen: u32) -> Self {
        self.config.mana_regen = regen;
        self
    }

    pub fn hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = hand_size;
        self
    }

    pub fn filler_copies(mut self, copies: usize) -> Self {
        self.config.filler_copies = copies;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn thinking_delay(mut self, delay: Duration) -> Self {
        self.config.thinking_delay = delay;
        self
    }

    pub fn first(mut self, side: Side) -> Self {
        self.config.first = side;
        self
    }

    pub fn policy(mut self, policy: PolicyConfig) -> Self {
        self.config.policy = policy;
        self
    }

    /// Deal from `catalog` instead of [`CardCatalog::standard`].
    pub fn catalog(mut self, catalog: CardCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Build the duel: an empty board and a shuffled deck per side.
    pub fn build(self) -> std::result::Result<Duel, BoardError> {
        let config = self.config;
        let board = Board::new(config.size, config.win_length)?;
        let catalog = self.catalog.unwrap_or_else(CardCatalog::standard);
        let rng = GameRng::new(config.seed);

        let seat = |side: Side| {
            let mut rng = rng.for_context(&side.to_string());
            let mut deck = Deck::new(catalog.standard_deck(config.filler_copies));
            deck.shuffle(&mut rng);
            Seat {
                deck,
                mana: ManaPool::empty(config.max_mana),
                rng,
            }
        };
        let seats = [seat(Side::Player), seat(Side::Opponent)];

        info!(
            size = config.size,
            win_length = config.win_length,
            seed = config.seed,
            "duel created"
        );

        Ok(Duel {
            selector: MoveSelector::new(config.policy.clone()),
            to_move: config.first,
            config,
            board,
            seats,
            turn: 0,
            result: None,
            history: Vec::new(),
        })
    }
}

/// One side's cards, mana and shuffle stream.
#[derive(Clone, Debug)]
struct Seat {
    deck: Deck,
    mana: ManaPool,
    rng: GameRng,
}

/// Two selectors playing each other on one board.
///
/// ## Example
///
/// ```
/// use connect_mana::games::duel::{DuelBuilder, DuelResult};
///
/// let mut duel = DuelBuilder::new().size(3).win_length(3).seed(1).build().unwrap();
/// let result = duel.run(50).unwrap();
///
/// assert!(duel.is_finished());
/// if let DuelResult::Winner(side) = result {
///     assert!(duel.board().is_won_by(side));
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Duel {
    config: DuelConfig,
    board: Board,
    selector: MoveSelector,
    seats: [Seat; 2],
    to_move: Side,
    turn: usize,
    result: Option<DuelResult>,
    history: Vec<TurnOutcome>,
}

impl Duel {
    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Turns played so far.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    #[must_use]
    pub fn result(&self) -> Option<DuelResult> {
        self.result
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn history(&self) -> &[TurnOutcome] {
        &self.history
    }

    #[must_use]
    pub fn deck(&self, side: Side) -> &Deck {
        &self.seats[seat_index(side)].deck
    }

    #[must_use]
    pub fn mana(&self, side: Side) -> ManaPool {
        self.seats[seat_index(side)].mana
    }

    // === Play ===

    /// Play one turn for the side to move.
    ///
    /// Returns `None` once the duel has a result.
    pub fn play_turn(&mut self) -> Result<Option<TurnOutcome>> {
        if self.is_finished() {
            return Ok(None);
        }

        let side = self.to_move;
        let seat = &mut self.seats[seat_index(side)];
        seat.mana.regenerate(self.config.mana_regen);
        seat.deck.refill_hand(self.config.hand_size, &mut seat.rng);

        if !self.config.thinking_delay.is_zero() {
            std::thread::sleep(self.config.thinking_delay);
        }

        let request = MoveRequest::new(&self.board, side, seat.deck.hand(), seat.mana.current());
        let decision = self.selector.select_move(&request);
        let applied = match &decision {
            Some(candidate) => Some(self.commit(side, candidate)?),
            None => None,
        };

        let outcome = TurnOutcome {
            turn: self.turn,
            side,
            decision,
            applied,
            mana_after: self.mana(side).current(),
        };
        debug!(
            turn = outcome.turn,
            side = %side,
            cell = ?outcome.decision.as_ref().map(|d| d.cell),
            reason = ?outcome.decision.as_ref().map(|d| d.reason),
            mana = outcome.mana_after,
            "turn played"
        );

        if let Some(winner) = outcome.applied.as_ref().and_then(|a| a.winner) {
            info!(turn = self.turn, winner = %winner, "duel won");
            self.result = Some(DuelResult::Winner(winner));
        }

        self.turn += 1;
        self.to_move = side.opponent();
        self.history.push(outcome.clone());
        Ok(Some(outcome))
    }

    /// Validate and apply `candidate` for `side`, then pay for its card.
    ///
    /// Nothing is paid and the board is unchanged if the move is rejected.
    fn commit(&mut self, side: Side, candidate: &MoveCandidate) -> Result<AppliedMove> {
        let seat = &mut self.seats[seat_index(side)];
        let card = match candidate.card {
            Some(choice) => {
                let card = seat.deck.hand().get(choice.slot).cloned().ok_or(CardError::EmptySlot {
                    slot: choice.slot,
                    hand_size: seat.deck.hand().len(),
                })?;
                if !seat.mana.can_afford(card.cost) {
                    return Err(CardError::InsufficientMana {
                        cost: card.cost,
                        available: seat.mana.current(),
                    }
                    .into());
                }
                Some((choice.slot, card))
            }
            None => None,
        };

        let applied = apply_move(&mut self.board, side, candidate, card.as_ref().map(|(_, c)| c))?;
        if let Some((slot, card)) = card {
            seat.mana.spend(card.cost)?;
            seat.deck.play(slot)?;
        }
        Ok(applied)
    }

    /// Play until someone wins or `max_turns` more turns have passed.
    pub fn run(&mut self, max_turns: usize) -> Result<DuelResult> {
        for _ in 0..max_turns {
            if self.play_turn()?.is_none() {
                break;
            }
        }

        let result = *self.result.get_or_insert(DuelResult::Draw);
        if result == DuelResult::Draw {
            info!(turns = self.turn, "duel drawn");
        }
        Ok(result)
    }
}

fn seat_index(side: Side) -> usize {
    match side {
        Side::Player => 0,
        Side::Opponent => 1,
    }
}
