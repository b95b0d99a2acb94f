//! Move-selection configuration.

use serde::{Deserialize, Serialize};

use crate::eval::HeuristicConfig;

/// Flat bonuses added to a target's heuristic score by card kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardBonuses {
    /// Directional and all-round blocks: per opponent mark in the
    /// target's 8-neighbourhood (default: 100).
    pub block_per_adjacent: f64,

    /// `Replace`: added to the score of the cell as if emptied (default: 200).
    pub replace: f64,

    /// `Destroy`: added to the score of the cell as if emptied (default: 300).
    pub destroy: f64,

    /// `CrossDestroy` / `AllDestroy`: per opponent mark inside the
    /// footprint (default: 300).
    pub area_destroy_per_mark: f64,
}

impl Default for CardBonuses {
    fn default() -> Self {
        Self {
            block_per_adjacent: 100.0,
            replace: 200.0,
            destroy: 300.0,
            area_destroy_per_mark: 300.0,
        }
    }
}

/// Configuration for [`MoveSelector`](super::MoveSelector).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Cell scoring.
    pub heuristic: HeuristicConfig,

    /// Effect-card target bonuses.
    pub bonuses: CardBonuses,

    /// Let the block stage fall back to `Destroy`, `CrossDestroy` and
    /// `AllDestroy` when no plain placement or `Replace` can stop a
    /// threat (default: true).
    pub destroy_blocks_threats: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            heuristic: HeuristicConfig::default(),
            bonuses: CardBonuses::default(),
            destroy_blocks_threats: true,
        }
    }
}

impl PolicyConfig {
    /// Create a new config with a custom heuristic.
    #[must_use]
    pub fn with_heuristic(mut self, heuristic: HeuristicConfig) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Create a new config with custom card bonuses.
    #[must_use]
    pub fn with_bonuses(mut self, bonuses: CardBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }

    /// Create a new config with destroy-based blocking switched on or off.
    #[must_use]
    pub fn with_destroy_blocks_threats(mut self, enabled: bool) -> Self {
        self.destroy_blocks_threats = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PolicyConfig::default();
        assert!(config.destroy_blocks_threats);
        assert_eq!(config.bonuses.replace, 200.0);
        assert_eq!(config.bonuses.destroy, 300.0);
        assert_eq!(config.heuristic, HeuristicConfig::default());
    }

    #[test]
    fn test_serialization() {
        let config = PolicyConfig::default().with_destroy_blocks_threats(false);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PolicyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
