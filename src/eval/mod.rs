//! Heuristic cell evaluation.
//!
//! - `ScoreTable`: run-length staircase
//! - `HeuristicConfig`: staircase, defense weight, centre weight, gaps
//! - `evaluate_cell`: per-cell attack/defense/centre score with breakdown

pub mod config;
pub mod heuristic;
pub mod patterns;

pub use config::HeuristicConfig;
pub use heuristic::{center_bonus, evaluate_cell, CellScore, DirectionScore, LineScore, INVALID_TOTAL};
pub use patterns::ScoreTable;
