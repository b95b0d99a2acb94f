//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card a game can deal. It provides
//! fast lookup by `CardId`, deck-list expansion, and a standard card set
//! covering every effect kind.

use rustc_hash::FxHashMap;

use super::definition::{BlockDirection, CardId, EffectCard, EffectKind};

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use connect_mana::cards::{CardCatalog, EffectCard, CardId, EffectKind};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(EffectCard::new(CardId::new(1), "Usurp", 5, EffectKind::Replace));
///
/// let found = catalog.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Usurp");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, EffectCard>,
    next_id: u32,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard card set: one filler and one card per other effect kind.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.register_auto("Stone", 0, EffectKind::PlaceNormal);
        catalog.register_auto("North Ward", 2, EffectKind::Block(BlockDirection::Up));
        catalog.register_auto("East Ward", 2, EffectKind::Block(BlockDirection::Right));
        catalog.register_auto("South Ward", 2, EffectKind::Block(BlockDirection::Down));
        catalog.register_auto("West Ward", 2, EffectKind::Block(BlockDirection::Left));
        catalog.register_auto("Bastion", 4, EffectKind::BlockAll);
        catalog.register_auto("Shatter", 3, EffectKind::Destroy);
        catalog.register_auto("Cross Blast", 4, EffectKind::CrossDestroy);
        let usurp = catalog.register_auto("Usurp", 5, EffectKind::Replace);
        let nova = catalog.register_auto("Nova", 6, EffectKind::AllDestroy);

        catalog.set_attack_power(usurp, 2);
        catalog.set_attack_power(nova, 3);
        catalog
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: EffectCard) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.next_id = self.next_id.max(card.id.raw().saturating_add(1));
        self.cards.insert(card.id, card);
    }

    /// Register a card with an auto-assigned ID.
    ///
    /// Returns the assigned ID.
    pub fn register_auto(&mut self, name: impl Into<String>, cost: u32, kind: EffectKind) -> CardId {
        let id = CardId::new(self.next_id);
        self.register(EffectCard::new(id, name, cost, kind));
        id
    }

    fn set_attack_power(&mut self, id: CardId, power: u32) {
        if let Some(card) = self.cards.get_mut(&id) {
            card.attack_power = Some(power);
        }
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&EffectCard> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions, in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &EffectCard> {
        let mut cards: Vec<_> = self.cards.values().collect();
        cards.sort_by_key(|c| c.id);
        cards.into_iter()
    }

    /// Find cards matching a predicate, in ID order.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &EffectCard>
    where
        F: Fn(&EffectCard) -> bool,
    {
        self.iter().filter(move |c| predicate(c))
    }

    /// Expand a deck list of `(card, copies)` into card values.
    ///
    /// Unknown IDs are skipped.
    #[must_use]
    pub fn deck_list(&self, entries: &[(CardId, usize)]) -> Vec<EffectCard> {
        entries
            .iter()
            .filter_map(|&(id, copies)| self.get(id).map(|card| (card, copies)))
            .flat_map(|(card, copies)| std::iter::repeat(card.clone()).take(copies))
            .collect()
    }

    /// Every non-filler card once plus `filler_copies` copies of each filler.
    #[must_use]
    pub fn standard_deck(&self, filler_copies: usize) -> Vec<EffectCard> {
        let entries: Vec<(CardId, usize)> = self
            .iter()
            .map(|c| (c.id, if c.kind.is_filler() { filler_copies } else { 1 }))
            .collect();
        self.deck_list(&entries)
    }
}
