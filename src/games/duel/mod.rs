//! Two-sided self-play on one board.
//!
//! Each turn the side to move:
//! - regenerates mana (capped)
//! - refills its hand from its deck
//! - waits out the optional thinking delay
//! - asks the `MoveSelector` for a move, passing on `None`
//! - pays for and discards the card, then applies the move
//!
//! The first completed run ends the duel. Decks are shuffled from the
//! configured seed, so a seed replays the same game.

mod game;

pub use game::{Duel, DuelBuilder, DuelConfig, DuelResult, TurnOutcome};
