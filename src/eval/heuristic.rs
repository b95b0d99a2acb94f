//! Directional cell scoring.
//!
//! `evaluate_cell` rates an empty cell for the acting side by imagining
//! a mark there and looking along the four axes:
//! - **attack**: lines the acting side's mark would extend
//! - **defense**: lines the opponent's mark would extend if they
//!   took the cell instead
//! - **centre bonus**: closeness to the middle of the board
//!
//! The full per-axis breakdown is returned with the score so callers can
//! inspect why a cell was rated the way it was.

use serde::{Deserialize, Serialize};

use crate::core::{Axis, Board, Side};

use super::config::HeuristicConfig;

/// Sentinel `total` for cells that cannot be played.
pub const INVALID_TOTAL: f64 = -1.0;

/// One side's view of one axis through the evaluated cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineScore {
    /// Contiguous marks including the evaluated cell.
    pub count: usize,
    /// Open ends of the contiguous run (0-2).
    pub open_ends: u8,
    /// Marks counted when one gap per arm may be skipped.
    pub gapped_count: usize,
    /// Open ends of the gapped run (0-2).
    pub gapped_open_ends: u8,
    /// True if either arm actually skipped a gap.
    pub used_gap: bool,
    /// `max(continuous score, gapped score)`.
    pub score: i64,
}

/// Attack and defense view of one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionScore {
    pub axis: Axis,
    pub attack: LineScore,
    pub defense: LineScore,
}

impl DirectionScore {
    fn empty(axis: Axis) -> Self {
        Self {
            axis,
            attack: LineScore::default(),
            defense: LineScore::default(),
        }
    }
}

/// Heuristic score of a single cell for one side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellScore {
    pub cell: usize,
    pub attack: i64,
    pub defense: i64,
    pub center_bonus: i64,
    /// `attack + defense_weight * defense + center_bonus`, or `-1` if invalid.
    pub total: f64,
    /// Per-axis breakdown in `Axis::ALL` order; all zero when invalid.
    pub directions: [DirectionScore; 4],
}

impl CellScore {
    /// Score for an occupied or blocked cell.
    #[must_use]
    pub fn invalid(cell: usize) -> Self {
        Self {
            cell,
            attack: 0,
            defense: 0,
            center_bonus: 0,
            total: INVALID_TOTAL,
            directions: Axis::ALL.map(DirectionScore::empty),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.total != INVALID_TOTAL
    }
}

/// Score `cell` for `side`.
///
/// Returns [`CellScore::invalid`] if the cell is occupied or blocked
/// against `side`. A cell `side` blocked itself is scored normally.
///
/// ```
/// use connect_mana::core::{Board, Side};
/// use connect_mana::eval::{evaluate_cell, HeuristicConfig};
///
/// let board = Board::from_symbols(3, "
///     X X .
///     . O .
///     . . .
/// ").unwrap();
/// let config = HeuristicConfig::default();
///
/// let block = evaluate_cell(&board, 2, Side::Opponent, &config);
/// let elsewhere = evaluate_cell(&board, 6, Side::Opponent, &config);
/// assert!(block.total > elsewhere.total);
/// assert!(!evaluate_cell(&board, 0, Side::Opponent, &config).is_valid());
/// ```
#[must_use]
pub fn evaluate_cell(board: &Board, cell: usize, side: Side, config: &HeuristicConfig) -> CellScore {
    if !board.contains(cell) || !board.can_place(cell, side) {
        return CellScore::invalid(cell);
    }

    let opponent = side.opponent();
    let directions = Axis::ALL.map(|axis| DirectionScore {
        axis,
        attack: score_line(board, cell, axis, side, config),
        defense: score_line(board, cell, axis, opponent, config),
    });

    let attack: i64 = directions.iter().map(|d| d.attack.score).sum();
    let defense: i64 = directions.iter().map(|d| d.defense.score).sum();
    let center_bonus = center_bonus(board, cell, config.center_weight);
    let total = attack as f64 + config.defense_weight * defense as f64 + center_bonus as f64;

    CellScore {
        cell,
        attack,
        defense,
        center_bonus,
        total,
        directions,
    }
}

/// `max(0, (size - manhattan_distance_to_centre) * weight)`.
#[must_use]
pub fn center_bonus(board: &Board, cell: usize, weight: i64) -> i64 {
    let reach = board.size() as i64 - board.center_distance(cell) as i64;
    (reach * weight).max(0)
}

/// Result of walking one arm (one sign of one axis).
#[derive(Clone, Copy, Debug, Default)]
struct Arm {
    contiguous: usize,
    contiguous_open: bool,
    gapped: usize,
    gapped_open: bool,
    used_gap: bool,
}

/// Score the line through `cell` along `axis` as if `owner` marked `cell`.
fn score_line(
    board: &Board,
    cell: usize,
    axis: Axis,
    owner: Side,
    config: &HeuristicConfig,
) -> LineScore {
    let (dr, dc) = axis.delta();
    let forward = walk_arm(board, cell, dr, dc, owner, config.gap_tolerance);
    let backward = walk_arm(board, cell, -dr, -dc, owner, config.gap_tolerance);

    let count = 1 + forward.contiguous + backward.contiguous;
    let open_ends = u8::from(forward.contiguous_open) + u8::from(backward.contiguous_open);
    let gapped_count = 1 + forward.gapped + backward.gapped;
    let gapped_open_ends = u8::from(forward.gapped_open) + u8::from(backward.gapped_open);
    let used_gap = forward.used_gap || backward.used_gap;

    let win_length = board.win_length();
    let continuous = config.scores.score(count, open_ends, win_length);
    // A gapped line still needs the gap filled, so it never counts as complete.
    let gapped = if used_gap {
        let capped = gapped_count.min(win_length.saturating_sub(1));
        config.scores.score(capped, gapped_open_ends, win_length)
    } else {
        continuous
    };

    LineScore {
        count,
        open_ends,
        gapped_count,
        gapped_open_ends,
        used_gap,
        score: continuous.max(gapped),
    }
}

/// Walk outward from `cell` in one direction counting `owner`'s marks.
///
/// The contiguous count stops at the first non-matching cell. The gapped
/// count may then step over that cell once if it is open to `owner` and
/// followed by another of `owner`'s marks.
fn walk_arm(
    board: &Board,
    cell: usize,
    dr: isize,
    dc: isize,
    owner: Side,
    gap_tolerance: bool,
) -> Arm {
    let mark = owner.mark();
    let count_from = |start: usize| -> (usize, usize) {
        let mut cursor = start;
        let mut counted = 0;
        while let Some(next) = board.offset(cursor, dr, dc) {
            if board.mark(next) != mark {
                break;
            }
            counted += 1;
            cursor = next;
        }
        (counted, cursor)
    };
    let open_after =
        |cursor: usize| board.offset(cursor, dr, dc).is_some_and(|n| board.can_place(n, owner));

    let (contiguous, end) = count_from(cell);
    let contiguous_open = open_after(end);
    let mut arm = Arm {
        contiguous,
        contiguous_open,
        gapped: contiguous,
        gapped_open: contiguous_open,
        used_gap: false,
    };

    if !gap_tolerance || !contiguous_open {
        return arm;
    }

    // `contiguous_open` guarantees the gap cell exists and is placeable.
    let Some(gap) = board.offset(end, dr, dc) else {
        return arm;
    };
    let resumes = board
        .offset(gap, dr, dc)
        .is_some_and(|beyond| board.mark(beyond) == mark);
    if resumes {
        let (beyond_gap, gapped_end) = count_from(gap);
        arm.gapped = contiguous + beyond_gap;
        arm.gapped_open = open_after(gapped_end);
        arm.used_gap = true;
    }
    arm
}
