//! Effect targeting: which cells a card may be played on, and which
//! cells it touches.
//!
//! Applying an effect lives in [`crate::rules::apply_move`]; this module
//! only answers questions about the board and never mutates it.

mod targeting;

pub use targeting::{footprint, is_valid_target, marks_in_footprint, valid_targets, Footprint};
