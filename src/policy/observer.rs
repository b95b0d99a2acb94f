//! Decision observers.
//!
//! The selector reports what it is doing through `DecisionObserver`
//! instead of printing. Every method has an empty default, so an
//! observer only overrides what it cares about.
//!
//! ```
//! use connect_mana::cards::{CardId, EffectCard, EffectKind};
//! use connect_mana::core::{Board, Side};
//! use connect_mana::policy::{MoveReason, MoveRequest, MoveSelector, RecordingObserver};
//!
//! let board = Board::new(3, 3).unwrap();
//! let hand = [EffectCard::new(CardId::new(0), "Stone", 0, EffectKind::PlaceNormal)];
//! let request = MoveRequest::new(&board, Side::Opponent, &hand, 0);
//!
//! let mut recorder = RecordingObserver::new();
//! let chosen = MoveSelector::default().select_move_observed(&request, &mut recorder);
//!
//! let trace = recorder.into_trace();
//! assert_eq!(trace.stages(), MoveReason::ALL.to_vec());
//! assert_eq!(trace.scored_targets().count(), 9);
//! assert_eq!(trace.decision(), chosen.as_ref());
//! ```

use serde::{Deserialize, Serialize};

use super::candidate::{CardChoice, MoveCandidate, MoveReason};
use crate::eval::CellScore;

/// Receives selector progress events.
pub trait DecisionObserver {
    /// A stage has started.
    fn stage_entered(&mut self, _stage: MoveReason) {}

    /// A target was scored during a ranking stage. `bonus` is the card
    /// bonus added on top of `score.total`.
    fn target_scored(&mut self, _card: Option<CardChoice>, _score: &CellScore, _bonus: f64) {}

    /// The selector finished; `None` means no move.
    fn decided(&mut self, _decision: Option<&MoveCandidate>) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl DecisionObserver for NoopObserver {}

/// One recorded selector event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DecisionEvent {
    StageEntered(MoveReason),
    TargetScored {
        card: Option<CardChoice>,
        score: CellScore,
        bonus: f64,
    },
    Decided(Option<MoveCandidate>),
}

/// Ordered list of events from one `select_move_observed` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionTrace {
    pub events: Vec<DecisionEvent>,
}

impl DecisionTrace {
    /// Stages entered, in order.
    #[must_use]
    pub fn stages(&self) -> Vec<MoveReason> {
        self.events
            .iter()
            .filter_map(|e| match e {
                DecisionEvent::StageEntered(stage) => Some(*stage),
                _ => None,
            })
            .collect()
    }

    /// Every scored target with its bonus.
    pub fn scored_targets(&self) -> impl Iterator<Item = (&CellScore, f64)> + '_ {
        self.events.iter().filter_map(|e| match e {
            DecisionEvent::TargetScored { score, bonus, .. } => Some((score, *bonus)),
            _ => None,
        })
    }

    /// The final decision, if one was recorded and it was a move.
    #[must_use]
    pub fn decision(&self) -> Option<&MoveCandidate> {
        self.events.iter().rev().find_map(|e| match e {
            DecisionEvent::Decided(decision) => decision.as_ref(),
            _ => None,
        })
    }
}

/// Observer collecting every event into a `DecisionTrace`.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    trace: DecisionTrace,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn trace(&self) -> &DecisionTrace {
        &self.trace
    }

    #[must_use]
    pub fn into_trace(self) -> DecisionTrace {
        self.trace
    }
}

impl DecisionObserver for RecordingObserver {
    fn stage_entered(&mut self, stage: MoveReason) {
        self.trace.events.push(DecisionEvent::StageEntered(stage));
    }

    fn target_scored(&mut self, card: Option<CardChoice>, score: &CellScore, bonus: f64) {
        self.trace.events.push(DecisionEvent::TargetScored {
            card,
            score: score.clone(),
            bonus,
        });
    }

    fn decided(&mut self, decision: Option<&MoveCandidate>) {
        self.trace.events.push(DecisionEvent::Decided(decision.cloned()));
    }
}
