//! Effect card definitions - immutable card values.
//!
//! An `EffectCard` is what a side holds in hand: a cost in mana and an
//! effect kind that says what happens to the board when it is played.
//! Cards never change after they are drawn; playing one moves it from
//! the hand to the discard pile.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Direction of a single-cell block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockDirection {
    Up,
    Right,
    Down,
    Left,
}

impl BlockDirection {
    pub const ALL: [BlockDirection; 4] = [
        BlockDirection::Up,
        BlockDirection::Right,
        BlockDirection::Down,
        BlockDirection::Left,
    ];

    /// `(d_row, d_col)` step towards the blocked cell.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            BlockDirection::Up => (-1, 0),
            BlockDirection::Right => (0, 1),
            BlockDirection::Down => (1, 0),
            BlockDirection::Left => (0, -1),
        }
    }
}

/// What a card does when played on a target cell.
///
/// ## Placement
///
/// - `PlaceNormal`: place a mark on an empty cell. The generic filler.
///
/// ## Blocks
///
/// Place a mark and block neighbouring cells for the other side:
/// - `Block(dir)`: the one neighbour in `dir`
/// - `BlockAll`: all 8 neighbours
///
/// ## Removal
///
/// - `Replace`: turn an opponent mark into the actor's mark
/// - `Destroy`: clear an opponent mark
/// - `CrossDestroy`: place a mark and clear opponent marks on the
///   diagonal neighbours
/// - `AllDestroy`: place a mark and clear opponent marks on all 8
///   neighbours
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    PlaceNormal,
    Block(BlockDirection),
    BlockAll,
    Replace,
    Destroy,
    CrossDestroy,
    AllDestroy,
}

impl EffectKind {
    /// The generic always-available placement.
    #[inline]
    #[must_use]
    pub const fn is_filler(self) -> bool {
        matches!(self, EffectKind::PlaceNormal)
    }

    /// Directional or all-round block.
    #[inline]
    #[must_use]
    pub const fn is_block(self) -> bool {
        matches!(self, EffectKind::Block(_) | EffectKind::BlockAll)
    }

    /// Clears opponent marks around the target.
    #[inline]
    #[must_use]
    pub const fn is_area_destroy(self) -> bool {
        matches!(self, EffectKind::CrossDestroy | EffectKind::AllDestroy)
    }

    /// Targets a cell holding the opponent's mark rather than an empty one.
    #[inline]
    #[must_use]
    pub const fn targets_opponent_mark(self) -> bool {
        matches!(self, EffectKind::Replace | EffectKind::Destroy)
    }

    /// True if playing this kind leaves the actor's mark on the target.
    #[inline]
    #[must_use]
    pub const fn places_mark(self) -> bool {
        !matches!(self, EffectKind::Destroy)
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectKind::PlaceNormal => write!(f, "place"),
            EffectKind::Block(dir) => write!(f, "block-{dir:?}"),
            EffectKind::BlockAll => write!(f, "block-all"),
            EffectKind::Replace => write!(f, "replace"),
            EffectKind::Destroy => write!(f, "destroy"),
            EffectKind::CrossDestroy => write!(f, "cross-destroy"),
            EffectKind::AllDestroy => write!(f, "all-destroy"),
        }
    }
}

/// A card in a side's deck or hand.
///
/// ## Example
///
/// ```
/// use connect_mana::cards::{CardId, EffectCard, EffectKind};
///
/// let swap = EffectCard::new(CardId::new(7), "Swap", 4, EffectKind::Replace)
///     .with_attack_power(2);
///
/// assert_eq!(swap.cost, 4);
/// assert_eq!(swap.attack_power, Some(2));
/// assert!(swap.is_affordable(4));
/// assert!(!swap.is_affordable(3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectCard {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Mana cost to play.
    pub cost: u32,

    /// Board effect.
    pub kind: EffectKind,

    /// Damage dealt by runs this card contributes to. Not used by the
    /// move selector.
    pub attack_power: Option<u32>,
}

impl EffectCard {
    /// Create a new card.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, cost: u32, kind: EffectKind) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind,
            attack_power: None,
        }
    }

    /// Set attack power (builder pattern).
    #[must_use]
    pub fn with_attack_power(mut self, power: u32) -> Self {
        self.attack_power = Some(power);
        self
    }

    #[inline]
    #[must_use]
    pub fn is_affordable(&self, mana: u32) -> bool {
        self.cost <= mana
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_kind_classification() {
        assert!(EffectKind::PlaceNormal.is_filler());
        assert!(EffectKind::Block(BlockDirection::Up).is_block());
        assert!(EffectKind::BlockAll.is_block());
        assert!(EffectKind::CrossDestroy.is_area_destroy());
        assert!(EffectKind::Replace.targets_opponent_mark());
        assert!(EffectKind::Destroy.targets_opponent_mark());
        assert!(!EffectKind::Destroy.places_mark());
        assert!(EffectKind::AllDestroy.places_mark());
    }

    #[test]
    fn test_block_direction_deltas_are_unit_steps() {
        for dir in BlockDirection::ALL {
            let (dr, dc) = dir.delta();
            assert_eq!(dr.abs() + dc.abs(), 1);
        }
    }

    #[test]
    fn test_card_serialization() {
        let card = EffectCard::new(CardId::new(1), "Wall", 2, EffectKind::Block(BlockDirection::Left))
            .with_attack_power(1);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: EffectCard = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
