//! Draw pile, hand and discard pile for one side.
//!
//! Cards move one way: draw pile → hand → discard. When the draw pile
//! runs dry the discard pile is shuffled back under it, so a deck never
//! runs out while it owns any cards at all.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::definition::EffectCard;
use crate::core::{CardError, GameRng};

/// One side's cards.
///
/// The top of the draw pile is the end of its vector.
///
/// ## Example
///
/// ```
/// use connect_mana::cards::{CardCatalog, Deck};
/// use connect_mana::core::GameRng;
///
/// let catalog = CardCatalog::standard();
/// let mut rng = GameRng::new(3);
/// let mut deck = Deck::new(catalog.standard_deck(6));
/// deck.shuffle(&mut rng);
///
/// deck.refill_hand(5, &mut rng);
/// assert_eq!(deck.hand().len(), 5);
///
/// let played = deck.play(0).unwrap();
/// assert_eq!(deck.hand().len(), 4);
/// assert_eq!(deck.discard().last(), Some(&played));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    draw_pile: Vec<EffectCard>,
    hand: Vec<EffectCard>,
    discard: Vec<EffectCard>,
}

impl Deck {
    /// Create a deck whose draw pile holds `cards`, top card last.
    #[must_use]
    pub fn new(cards: Vec<EffectCard>) -> Self {
        Self {
            draw_pile: cards,
            hand: Vec::new(),
            discard: Vec::new(),
        }
    }

    #[must_use]
    pub fn hand(&self) -> &[EffectCard] {
        &self.hand
    }

    #[must_use]
    pub fn discard(&self) -> &[EffectCard] {
        &self.discard
    }

    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    /// Total cards owned across all three piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.hand.len() + self.discard.len()
    }

    /// Shuffle the draw pile.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.draw_pile);
    }

    /// Draw up to `count` cards into the hand.
    ///
    /// Returns the number actually drawn; fewer than `count` only when
    /// both the draw and discard piles are exhausted.
    pub fn draw(&mut self, count: usize, rng: &mut GameRng) -> usize {
        let mut drawn = 0;
        while drawn < count {
            if self.draw_pile.is_empty() && !self.recycle_discard(rng) {
                break;
            }
            let Some(card) = self.draw_pile.pop() else {
                break;
            };
            self.hand.push(card);
            drawn += 1;
        }
        drawn
    }

    /// Draw until the hand holds `hand_size` cards (or the deck is dry).
    pub fn refill_hand(&mut self, hand_size: usize, rng: &mut GameRng) -> usize {
        let missing = hand_size.saturating_sub(self.hand.len());
        self.draw(missing, rng)
    }

    /// Move the card in hand `slot` to the discard pile.
    ///
    /// Returns a copy of the played card.
    pub fn play(&mut self, slot: usize) -> Result<EffectCard, CardError> {
        if slot >= self.hand.len() {
            return Err(CardError::EmptySlot {
                slot,
                hand_size: self.hand.len(),
            });
        }
        let card = self.hand.remove(slot);
        self.discard.push(card.clone());
        Ok(card)
    }

    /// Hand slots whose card costs at most `mana`, in hand order.
    pub fn affordable(&self, mana: u32) -> impl Iterator<Item = (usize, &EffectCard)> + '_ {
        self.hand
            .iter()
            .enumerate()
            .filter(move |(_, card)| card.is_affordable(mana))
    }

    fn recycle_discard(&mut self, rng: &mut GameRng) -> bool {
        if self.discard.is_empty() {
            return false;
        }
        trace!(cards = self.discard.len(), "reshuffling discard into draw pile");
        self.draw_pile.append(&mut self.discard);
        rng.shuffle(&mut self.draw_pile);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, EffectKind};

    fn cards(n: u32) -> Vec<EffectCard> {
        (0..n)
            .map(|i| EffectCard::new(CardId::new(i), format!("Card {i}"), i, EffectKind::PlaceNormal))
            .collect()
    }

    #[test]
    fn test_draw_takes_from_top() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::new(cards(3));

        assert_eq!(deck.draw(1, &mut rng), 1);
        assert_eq!(deck.hand()[0].id, CardId::new(2));
        assert_eq!(deck.draw_pile_len(), 2);
    }

    #[test]
    fn test_refill_hand() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::new(cards(10));

        assert_eq!(deck.refill_hand(4, &mut rng), 4);
        assert_eq!(deck.refill_hand(4, &mut rng), 0);
        deck.play(1).unwrap();
        assert_eq!(deck.refill_hand(4, &mut rng), 1);
        assert_eq!(deck.hand().len(), 4);
    }

    #[test]
    fn test_play_moves_to_discard() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::new(cards(3));
        deck.draw(3, &mut rng);

        let played = deck.play(0).unwrap();
        assert_eq!(played.id, CardId::new(2));
        assert_eq!(deck.discard(), &[played]);
        assert_eq!(deck.hand().len(), 2);
    }

    #[test]
    fn test_play_empty_slot() {
        let mut deck = Deck::new(cards(3));
        assert_eq!(
            deck.play(0),
            Err(CardError::EmptySlot { slot: 0, hand_size: 0 })
        );
    }

    #[test]
    fn test_discard_recycled_when_draw_pile_empty() {
        let mut rng = GameRng::new(9);
        let mut deck = Deck::new(cards(2));
        deck.draw(2, &mut rng);
        deck.play(0).unwrap();
        deck.play(0).unwrap();
        assert_eq!(deck.draw_pile_len(), 0);

        assert_eq!(deck.draw(2, &mut rng), 2);
        assert!(deck.discard().is_empty());
        assert_eq!(deck.total_cards(), 2);
    }

    #[test]
    fn test_draw_stops_when_exhausted() {
        let mut rng = GameRng::new(9);
        let mut deck = Deck::new(cards(2));
        assert_eq!(deck.draw(5, &mut rng), 2);
        assert_eq!(deck.hand().len(), 2);
    }

    #[test]
    fn test_affordable_keeps_hand_order() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::new(cards(5));
        deck.draw(5, &mut rng);

        // Hand holds costs 4, 3, 2, 1, 0.
        let slots: Vec<usize> = deck.affordable(2).map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![2, 3, 4]);
    }
}
