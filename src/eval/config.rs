//! Heuristic configuration parameters.

use serde::{Deserialize, Serialize};

use super::patterns::ScoreTable;

/// Cell-scoring configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// Run-length staircase.
    pub scores: ScoreTable,

    /// Multiplier on the defense score (default: 1.5).
    /// Values above 1.0 make blocking outrank extending an equal line.
    pub defense_weight: f64,

    /// Centre bonus per unit of `size - manhattan_distance` (default: 2).
    pub center_weight: i64,

    /// Allow one skipped empty cell per direction-arm when counting runs.
    pub gap_tolerance: bool,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            scores: ScoreTable::default(),
            defense_weight: 1.5,
            center_weight: 2,
            gap_tolerance: true,
        }
    }
}

impl HeuristicConfig {
    /// Create a new config with a custom score table.
    #[must_use]
    pub fn with_scores(mut self, scores: ScoreTable) -> Self {
        self.scores = scores;
        self
    }

    /// Create a new config with a custom defense weight.
    #[must_use]
    pub fn with_defense_weight(mut self, weight: f64) -> Self {
        self.defense_weight = weight;
        self
    }

    /// Create a new config with a custom centre weight.
    #[must_use]
    pub fn with_center_weight(mut self, weight: i64) -> Self {
        self.center_weight = weight;
        self
    }

    /// Create a new config with gap tolerance switched on or off.
    #[must_use]
    pub fn with_gap_tolerance(mut self, enabled: bool) -> Self {
        self.gap_tolerance = enabled;
        self
    }
}
