//! Move selection: win, block, effect card, filler.
//!
//! ## Key Types
//!
//! - `MoveRequest`: borrowed board, side, hand and mana
//! - `MoveSelector`: the priority-ordered policy
//! - `MoveCandidate`: the chosen cell, card and reason
//! - `PolicyConfig`, `CardBonuses`: tuning
//! - `DecisionObserver`: progress reporting, with `RecordingObserver`
//!   to capture a `DecisionTrace`

pub mod candidate;
pub mod config;
pub mod observer;
pub mod request;
pub mod selector;

pub use candidate::{CardChoice, MoveCandidate, MoveReason};
pub use config::{CardBonuses, PolicyConfig};
pub use observer::{DecisionEvent, DecisionObserver, DecisionTrace, NoopObserver, RecordingObserver};
pub use request::MoveRequest;
pub use selector::MoveSelector;
