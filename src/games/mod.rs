//! Game loops built on the decision engine.

pub mod duel;

pub use duel::{Duel, DuelBuilder, DuelConfig, DuelResult, TurnOutcome};
