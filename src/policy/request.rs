//! Input snapshot for one move decision.

use crate::cards::EffectCard;
use crate::core::{Board, Side};

/// Everything the selector looks at: the board, who is acting, their
/// hand and their mana. Borrowed; the selector keeps nothing after the
/// call returns.
#[derive(Clone, Copy, Debug)]
pub struct MoveRequest<'a> {
    pub board: &'a Board,
    pub side: Side,
    pub hand: &'a [EffectCard],
    pub mana: u32,
}

impl<'a> MoveRequest<'a> {
    #[must_use]
    pub const fn new(board: &'a Board, side: Side, hand: &'a [EffectCard], mana: u32) -> Self {
        Self {
            board,
            side,
            hand,
            mana,
        }
    }

    /// Affordable hand cards matching `filter`, by descending cost with
    /// ties in hand order.
    pub(crate) fn cards_by_cost_desc<F>(&self, filter: F) -> Vec<(usize, &'a EffectCard)>
    where
        F: Fn(&EffectCard) -> bool,
    {
        let mut cards: Vec<(usize, &'a EffectCard)> = self
            .hand
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_affordable(self.mana) && filter(card))
            .collect();
        cards.sort_by(|(_, a), (_, b)| b.cost.cmp(&a.cost));
        cards
    }
}
