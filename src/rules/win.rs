//! Completed-run detection for connect-N on an arbitrary square board.
//!
//! Runs are searched in a fixed order so callers get reproducible
//! results when more than one run exists:
//! rows (top-to-bottom, left-to-right), then columns, then `↘`
//! diagonals, then `↙` diagonals. Within each family, start cells are
//! visited in row-major order and only starts where the whole run fits
//! inside the grid are considered.

use smallvec::SmallVec;

use crate::core::{Axis, Mark, Side};

/// Cell indices of a completed run, in scan order along its line.
pub type Run = SmallVec<[usize; 8]>;

/// Find the first completed run of `win_length` identical non-empty marks.
///
/// `marks` is the row-major cell sequence of a `size × size` board.
/// The result does not say who owns the run; read `marks[run[0]]`
/// (or use [`run_owner`]).
///
/// Degenerate inputs never panic: `win_length == 0`,
/// `win_length > size` and a `marks` slice shorter than `size²` all
/// yield `None`.
///
/// ```
/// use connect_mana::core::Mark;
/// use connect_mana::rules::find_completed_run;
///
/// let e = Mark::Empty;
/// let x = Mark::Player;
/// let marks = [x, e, e,
///              e, x, e,
///              e, e, x];
/// let run = find_completed_run(&marks, 3, 3).unwrap();
/// assert_eq!(run.as_slice(), &[0, 4, 8]);
/// ```
#[must_use]
pub fn find_completed_run(marks: &[Mark], size: usize, win_length: usize) -> Option<Run> {
    if win_length == 0 || win_length > size || marks.len() < size * size {
        return None;
    }

    for axis in Axis::ALL {
        if let Some(run) = scan_axis(marks, size, win_length, axis) {
            return Some(run);
        }
    }
    None
}

/// Side owning `run`, read from its first cell.
#[must_use]
pub fn run_owner(marks: &[Mark], run: &[usize]) -> Option<Side> {
    run.first().and_then(|&cell| marks.get(cell)).and_then(|m| m.side())
}

/// Scan one orientation family for the first completed run.
fn scan_axis(marks: &[Mark], size: usize, win_length: usize, axis: Axis) -> Option<Run> {
    let span = win_length - 1;
    let (rows, cols) = match axis {
        Axis::Horizontal => (0..size, 0..size - span),
        Axis::Vertical => (0..size - span, 0..size),
        Axis::Diagonal => (0..size - span, 0..size - span),
        Axis::AntiDiagonal => (0..size - span, span..size),
    };
    let stride = match axis {
        Axis::Horizontal => 1,
        Axis::Vertical => size,
        Axis::Diagonal => size + 1,
        Axis::AntiDiagonal => size - 1,
    };

    for row in rows {
        for col in cols.clone() {
            let start = row * size + col;
            if let Some(run) = run_from(marks, start, stride, win_length) {
                return Some(run);
            }
        }
    }
    None
}

/// Check `win_length` cells from `start` along `stride`.
///
/// Bails out on the first empty or differing cell.
#[inline]
fn run_from(marks: &[Mark], start: usize, stride: usize, win_length: usize) -> Option<Run> {
    let first = marks[start];
    if first.is_empty() {
        return None;
    }

    let mut run = Run::new();
    run.push(start);
    for step in 1..win_length {
        let cell = start + step * stride;
        if marks[cell] != first {
            return None;
        }
        run.push(cell);
    }
    Some(run)
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Mark = Mark::Empty;
    const X: Mark = Mark::Player;
    const O: Mark = Mark::Opponent;

    #[test]
    fn test_empty_board_has_no_run() {
        for size in 1..=6 {
            let marks = vec![E; size * size];
            for win in 1..=size {
                assert_eq!(find_completed_run(&marks, size, win), None);
            }
        }
    }

    #[test]
    fn test_row_run() {
        let marks = [E, E, E, O, O, O, E, E, E];
        let run = find_completed_run(&marks, 3, 3).unwrap();
        assert_eq!(run.as_slice(), &[3, 4, 5]);
        assert_eq!(run_owner(&marks, &run), Some(Side::Opponent));
    }

    #[test]
    fn test_column_run() {
        let marks = [E, X, E, E, X, E, E, X, E];
        let run = find_completed_run(&marks, 3, 3).unwrap();
        assert_eq!(run.as_slice(), &[1, 4, 7]);
    }

    #[test]
    fn test_anti_diagonal_run() {
        let marks = [E, E, O, E, O, E, O, E, E];
        let run = find_completed_run(&marks, 3, 3).unwrap();
        assert_eq!(run.as_slice(), &[2, 4, 6]);
    }

    #[test]
    fn test_run_shorter_than_board() {
        // 5x5, connect 3, diagonal from (1,2) to (3,4)
        let mut marks = vec![E; 25];
        for (r, c) in [(1, 2), (2, 3), (3, 4)] {
            marks[r * 5 + c] = X;
        }
        let run = find_completed_run(&marks, 5, 3).unwrap();
        assert_eq!(run.as_slice(), &[7, 13, 19]);
    }

    #[test]
    fn test_mixed_line_is_not_a_run() {
        let marks = [X, X, O, E, E, E, E, E, E];
        assert_eq!(find_completed_run(&marks, 3, 3), None);
    }

    #[test]
    fn test_rows_scanned_before_columns() {
        // Row 0 and column 0 both complete; the row wins the tie-break.
        let marks = [X, X, X, X, E, E, X, E, E];
        assert_eq!(find_completed_run(&marks, 3, 3).unwrap().as_slice(), &[0, 1, 2]);

        // Column 0 and the main diagonal both complete; the column wins.
        let marks = [O, E, E, O, O, E, O, E, O];
        assert_eq!(find_completed_run(&marks, 3, 3).unwrap().as_slice(), &[0, 3, 6]);
    }

    #[test]
    fn test_anti_diagonal_does_not_wrap() {
        // Stride size-1 from column 0 would wrap onto the previous row.
        let mut marks = vec![E; 16];
        for cell in [4, 7, 10] {
            marks[cell] = X; // (1,0), (1,3), (2,2): not a line
        }
        assert_eq!(find_completed_run(&marks, 4, 3), None);
    }

    #[test]
    fn test_single_cell_board() {
        assert_eq!(find_completed_run(&[E], 1, 1), None);
        assert_eq!(find_completed_run(&[X], 1, 1).unwrap().as_slice(), &[0]);
    }

    #[test]
    fn test_degenerate_inputs() {
        let marks = [X, X, X, X];
        assert_eq!(find_completed_run(&marks, 2, 3), None);
        assert_eq!(find_completed_run(&marks, 2, 0), None);
        assert_eq!(find_completed_run(&marks[..3], 2, 2), None);
    }

    #[test]
    fn test_overline_reports_first_window() {
        let marks = [X, X, X, X, E, E, E, E, E, E, E, E, E, E, E, E];
        let run = find_completed_run(&marks, 4, 3).unwrap();
        assert_eq!(run.as_slice(), &[0, 1, 2]);
    }
}
