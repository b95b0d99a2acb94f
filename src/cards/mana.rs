//! Per-side mana pool.

use serde::{Deserialize, Serialize};

use crate::core::CardError;

/// Mana balance capped at `max`.
///
/// ```
/// use connect_mana::cards::ManaPool;
///
/// let mut pool = ManaPool::new(2, 5);
/// assert!(pool.can_afford(2));
/// pool.spend(2).unwrap();
/// assert!(pool.spend(1).is_err());
///
/// pool.regenerate(10);
/// assert_eq!(pool.current(), 5);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaPool {
    current: u32,
    max: u32,
}

impl ManaPool {
    /// Create a pool; `current` is clamped to `max`.
    #[must_use]
    pub const fn new(current: u32, max: u32) -> Self {
        let current = if current > max { max } else { current };
        Self { current, max }
    }

    /// An empty pool with the given cap.
    #[must_use]
    pub const fn empty(max: u32) -> Self {
        Self { current: 0, max }
    }

    #[inline]
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    #[inline]
    #[must_use]
    pub const fn can_afford(&self, cost: u32) -> bool {
        cost <= self.current
    }

    /// Deduct `cost`, or fail without changing the balance.
    pub fn spend(&mut self, cost: u32) -> Result<(), CardError> {
        if !self.can_afford(cost) {
            return Err(CardError::InsufficientMana {
                cost,
                available: self.current,
            });
        }
        self.current -= cost;
        Ok(())
    }

    /// Add `amount`, saturating at the cap.
    pub fn regenerate(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }
}
