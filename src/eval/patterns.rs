//! Run-length scoring staircase.
//!
//! Maps a line's `(count, open_ends)` to a score. The thresholds are
//! relative to the board's win length, so the same table works for
//! connect-3 on 3x3 and connect-5 on 15x15.

use serde::{Deserialize, Serialize};

/// Score constants for the staircase.
///
/// Tiers are checked top-down and the first match wins:
///
/// | count              | two open ends   | one open end         |
/// |--------------------|-----------------|----------------------|
/// | `>= win_length`    | `win`           | `win`                |
/// | `win_length - 1`   | `near_open`     | `near_half_open`     |
/// | `win_length - 2`   | `build_open`    | `build_half_open`    |
/// | `win_length - 3`   | `seed_open`     | `seed_half_open`     |
/// | `1`                | `single`        | `single`             |
///
/// Anything else, or any incomplete line with no open end, scores 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    /// Completed run. Dominates every other term.
    pub win: i64,
    pub near_open: i64,
    pub near_half_open: i64,
    pub build_open: i64,
    pub build_half_open: i64,
    pub seed_open: i64,
    pub seed_half_open: i64,
    /// Lone mark with room to grow.
    pub single: i64,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            win: 1_000_000,
            near_open: 100_000,
            near_half_open: 10_000,
            build_open: 5_000,
            build_half_open: 500,
            seed_open: 300,
            seed_half_open: 30,
            single: 10,
        }
    }
}

impl ScoreTable {
    /// Score a line of `count` marks with `open_ends` (0-2) open ends.
    ///
    /// ```
    /// use connect_mana::eval::ScoreTable;
    ///
    /// let table = ScoreTable::default();
    /// assert_eq!(table.score(5, 0, 5), table.win);
    /// assert!(table.score(4, 2, 5) > table.score(4, 1, 5));
    /// assert_eq!(table.score(3, 0, 5), 0);
    /// ```
    #[must_use]
    pub fn score(&self, count: usize, open_ends: u8, win_length: usize) -> i64 {
        if count == 0 {
            return 0;
        }
        if count >= win_length {
            return self.win;
        }
        if open_ends == 0 {
            return 0;
        }

        let two_open = open_ends >= 2;
        let pick = |open: i64, half_open: i64| if two_open { open } else { half_open };

        if count + 1 == win_length {
            pick(self.near_open, self.near_half_open)
        } else if count + 2 == win_length {
            pick(self.build_open, self.build_half_open)
        } else if count + 3 == win_length {
            pick(self.seed_open, self.seed_half_open)
        } else if count == 1 {
            self.single
        } else {
            0
        }
    }

    /// True if every tier is strictly above the one below it.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        let ladder = [
            self.win,
            self.near_open,
            self.near_half_open,
            self.build_open,
            self.build_half_open,
            self.seed_open,
            self.seed_half_open,
            self.single,
            0,
        ];
        ladder.windows(2).all(|w| w[0] > w[1])
    }
}
