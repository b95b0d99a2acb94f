//! Game rules: completed-run detection and move application.
//!
//! - `find_completed_run`: first run of `win_length` identical marks
//! - `apply_move`: validate a selected move and mutate the board

pub mod apply;
pub mod win;

pub use apply::{apply_move, AppliedMove};
pub use win::{find_completed_run, run_owner, Run};
