//! Card system: effect cards, catalog, deck and mana.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `EffectKind`: What a card does to the board
//! - `EffectCard`: Immutable card value held in hand
//! - `CardCatalog`: Card definition lookup
//! - `Deck`: Draw pile, hand and discard pile
//! - `ManaPool`: Capped per-side resource spent on cards

pub mod deck;
pub mod definition;
pub mod mana;
pub mod registry;

pub use deck::Deck;
pub use definition::{BlockDirection, CardId, EffectCard, EffectKind};
pub use mana::ManaPool;
pub use registry::CardCatalog;
