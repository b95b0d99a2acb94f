//! # connect-mana
//!
//! Decision engine for connect-N on an NxN board with a mana and
//! effect-card layer.
//!
//! ## Design Principles
//!
//! 1. **Pure decisions**: the selector reads a board snapshot, a hand
//!    and a mana balance and returns a move. It keeps no state between
//!    calls and never mutates the board.
//!
//! 2. **Any board**: board size and run length are data. The same code
//!    plays connect-3 on 3x3 and connect-5 on 15x15.
//!
//! 3. **Configuration Over Constants**: scoring tiers, defense weight and
//!    card bonuses live in serde-friendly config structs.
//!
//! ## Modules
//!
//! - `core`: Sides, marks, blocked overlay, `Board`, errors, RNG
//! - `rules`: Completed-run detection and move application
//! - `eval`: Directional cell scoring
//! - `cards`: Effect cards, catalog, deck and mana
//! - `effects`: Valid targets and footprints per effect kind
//! - `policy`: Priority-ordered move selection and observers
//! - `games`: Self-play duel loop
//!
//! ## Example
//!
//! ```
//! use connect_mana::{Board, MoveRequest, MoveSelector, Side};
//!
//! let board = Board::from_symbols(3, "
//!     X X .
//!     . O .
//!     . . .
//! ").unwrap();
//!
//! let chosen = MoveSelector::default()
//!     .select_move(&MoveRequest::new(&board, Side::Opponent, &[], 0))
//!     .unwrap();
//! assert_eq!(chosen.cell, 2);
//! ```

pub mod cards;
pub mod core;
pub mod effects;
pub mod eval;
pub mod games;
pub mod policy;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Axis, Block, Board, BoardError, CardError, Error, GameRng, Mark, MoveError, Result, Side,
};

pub use crate::cards::{BlockDirection, CardCatalog, CardId, Deck, EffectCard, EffectKind, ManaPool};

pub use crate::rules::{apply_move, find_completed_run, run_owner, AppliedMove, Run};

pub use crate::eval::{evaluate_cell, CellScore, HeuristicConfig, ScoreTable};

pub use crate::effects::{footprint, valid_targets};

pub use crate::policy::{
    CardBonuses, CardChoice, DecisionObserver, DecisionTrace, MoveCandidate, MoveReason, MoveRequest,
    MoveSelector, PolicyConfig, RecordingObserver,
};

pub use crate::games::{Duel, DuelBuilder, DuelConfig, DuelResult};
