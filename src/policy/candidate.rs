//! The move selector's output.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Why a move was chosen; also the stage of the selector that chose it.
///
/// Stages run in declaration order and the first to produce a move wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveReason {
    /// Completes a run for the acting side.
    Win,
    /// Stops a run the other side would complete next turn.
    Block,
    /// Best target of the most expensive usable effect card.
    Effect,
    /// Best plain placement using a filler card.
    Fallback,
}

impl MoveReason {
    /// All stages, in priority order.
    pub const ALL: [MoveReason; 4] = [
        MoveReason::Win,
        MoveReason::Block,
        MoveReason::Effect,
        MoveReason::Fallback,
    ];
}

/// Card used by a move: its hand slot and identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardChoice {
    pub slot: usize,
    pub id: CardId,
}

/// A selected move. The caller owns applying it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveCandidate {
    /// Target cell index.
    pub cell: usize,

    /// Card to play, or `None` for a plain placement.
    pub card: Option<CardChoice>,

    pub reason: MoveReason,

    /// Heuristic score plus card bonus of the chosen target. Only the
    /// stages that rank targets (`Effect`, `Fallback`) set it.
    pub score: Option<f64>,
}

impl MoveCandidate {
    #[must_use]
    pub fn new(cell: usize, card: Option<CardChoice>, reason: MoveReason) -> Self {
        Self {
            cell,
            card,
            reason,
            score: None,
        }
    }

    /// Set the target score (builder pattern).
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    #[inline]
    #[must_use]
    pub fn uses_card(&self) -> bool {
        self.card.is_some()
    }
}
