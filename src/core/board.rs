//! Board snapshot: marks plus blocked-cell overlay on a square grid.
//!
//! Cells are addressed by row-major index (`row * size + col`).
//! A `Board` is validated once at construction; everything downstream
//! (win detection, scoring, move selection) assumes it is well formed.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::BoardError;
use super::mark::{Block, Mark, Side};
use crate::rules::win::{find_completed_run, Run};

/// The four line orientations, in win-scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Left to right, stride `+1`.
    Horizontal,
    /// Top to bottom, stride `+size`.
    Vertical,
    /// Top-left to bottom-right, stride `+(size + 1)`.
    Diagonal,
    /// Top-right to bottom-left, stride `+(size - 1)`.
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// `(d_row, d_col)` step for the positive direction.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

/// Offsets of the 8-neighbourhood, row-major.
pub(crate) const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Offsets of the diagonal neighbours, row-major.
pub(crate) const DIAGONAL_OFFSETS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Square connect-N board with a blocked-cell overlay.
///
/// ## Example
///
/// ```
/// use connect_mana::core::{Board, Mark, Side};
///
/// let mut board = Board::new(3, 3).unwrap();
/// for col in 0..3 {
///     board.set_mark(board.index(1, col), Mark::Opponent);
/// }
///
/// let run = board.completed_run().unwrap();
/// assert_eq!(run.as_slice(), &[3, 4, 5]);
/// assert_eq!(board.run_owner(&run), Some(Side::Opponent));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    win_length: usize,
    marks: Vec<Mark>,
    blocked: Vec<Block>,
}

/// Unvalidated serde form of `Board`.
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    win_length: usize,
    marks: Vec<Mark>,
    blocked: Vec<Block>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        Board::from_parts(raw.size, raw.win_length, raw.marks, raw.blocked)
    }
}

impl Board {
    /// Create an empty, unblocked board.
    pub fn new(size: usize, win_length: usize) -> Result<Self, BoardError> {
        let cells = Self::validate_dimensions(size, win_length)?;
        Ok(Self {
            size,
            win_length,
            marks: vec![Mark::Empty; cells],
            blocked: vec![Block::Unblocked; cells],
        })
    }

    /// Create a board from existing mark and overlay sequences.
    pub fn from_parts(
        size: usize,
        win_length: usize,
        marks: Vec<Mark>,
        blocked: Vec<Block>,
    ) -> Result<Self, BoardError> {
        let cells = Self::validate_dimensions(size, win_length)?;
        if marks.len() != cells {
            return Err(BoardError::LengthMismatch {
                what: "marks",
                expected: cells,
                actual: marks.len(),
            });
        }
        if blocked.len() != cells {
            return Err(BoardError::LengthMismatch {
                what: "blocked overlay",
                expected: cells,
                actual: blocked.len(),
            });
        }
        Ok(Self {
            size,
            win_length,
            marks,
            blocked,
        })
    }

    /// Create an unblocked board from a mark sequence.
    pub fn from_marks(size: usize, win_length: usize, marks: Vec<Mark>) -> Result<Self, BoardError> {
        let cells = marks.len();
        Self::from_parts(size, win_length, marks, vec![Block::Unblocked; cells])
    }

    /// Parse a board from `.`/`X`/`O` symbols; whitespace is ignored.
    ///
    /// The size is inferred from the number of symbols, which must be a
    /// perfect square. Any other character is read as empty.
    ///
    /// ```
    /// use connect_mana::core::{Board, Mark};
    ///
    /// let board = Board::from_symbols(3, "
    ///     X X .
    ///     . O .
    ///     . . .
    /// ").unwrap();
    /// assert_eq!(board.size(), 3);
    /// assert_eq!(board.mark(4), Mark::Opponent);
    /// ```
    pub fn from_symbols(win_length: usize, symbols: &str) -> Result<Self, BoardError> {
        let marks: Vec<Mark> = symbols
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                'X' | 'x' => Mark::Player,
                'O' | 'o' => Mark::Opponent,
                _ => Mark::Empty,
            })
            .collect();

        let size = (marks.len() as f64).sqrt().round() as usize;
        if size * size != marks.len() {
            return Err(BoardError::LengthMismatch {
                what: "marks",
                expected: size * size,
                actual: marks.len(),
            });
        }
        Self::from_marks(size, win_length, marks)
    }

    fn validate_dimensions(size: usize, win_length: usize) -> Result<usize, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        if win_length == 0 {
            return Err(BoardError::ZeroWinLength);
        }
        if win_length > size {
            return Err(BoardError::WinLengthTooLong { size, win_length });
        }
        Ok(size * size)
    }

    // === Dimensions ===

    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    #[must_use]
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Number of cells (`size²`).
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.marks.len()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, cell: usize) -> bool {
        cell < self.marks.len()
    }

    // === Cells ===

    #[inline]
    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    #[inline]
    #[must_use]
    pub fn blocked(&self) -> &[Block] {
        &self.blocked
    }

    /// Mark at `cell`. Panics if `cell` is out of range.
    #[inline]
    #[must_use]
    pub fn mark(&self, cell: usize) -> Mark {
        self.marks[cell]
    }

    /// Overlay entry at `cell`. Panics if `cell` is out of range.
    #[inline]
    #[must_use]
    pub fn block(&self, cell: usize) -> Block {
        self.blocked[cell]
    }

    #[inline]
    pub fn set_mark(&mut self, cell: usize, mark: Mark) {
        self.marks[cell] = mark;
    }

    #[inline]
    pub fn set_block(&mut self, cell: usize, block: Block) {
        self.blocked[cell] = block;
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, cell: usize) -> bool {
        self.marks[cell].is_empty()
    }

    /// True unless the other side has blocked `cell`.
    #[inline]
    #[must_use]
    pub fn is_open_for(&self, cell: usize, side: Side) -> bool {
        !self.blocked[cell].blocks(side)
    }

    /// True if `side` may make a plain placement on `cell`.
    #[inline]
    #[must_use]
    pub fn can_place(&self, cell: usize, side: Side) -> bool {
        self.is_empty(cell) && self.is_open_for(cell, side)
    }

    /// All cells `side` may make a plain placement on, in index order.
    pub fn placeable_cells(&self, side: Side) -> impl Iterator<Item = usize> + '_ {
        (0..self.cell_count()).filter(move |&cell| self.can_place(cell, side))
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.marks.iter().all(|m| !m.is_empty())
    }

    /// Copy of this board with one cell's mark replaced.
    #[must_use]
    pub fn with_mark(&self, cell: usize, mark: Mark) -> Self {
        let mut next = self.clone();
        next.set_mark(cell, mark);
        next
    }

    // === Coordinates ===

    #[inline]
    #[must_use]
    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.size && col < self.size);
        row * self.size + col
    }

    #[inline]
    #[must_use]
    pub fn coords(&self, cell: usize) -> (usize, usize) {
        (cell / self.size, cell % self.size)
    }

    /// Cell reached by stepping `(d_row, d_col)` from `cell`, if on the board.
    #[must_use]
    pub fn offset(&self, cell: usize, d_row: isize, d_col: isize) -> Option<usize> {
        let (row, col) = self.coords(cell);
        let row = row.checked_add_signed(d_row)?;
        let col = col.checked_add_signed(d_col)?;
        (row < self.size && col < self.size).then(|| self.index(row, col))
    }

    /// In-bound 8-neighbourhood of `cell`, row-major.
    #[must_use]
    pub fn neighbours(&self, cell: usize) -> SmallVec<[usize; 8]> {
        self.cells_at(cell, &NEIGHBOUR_OFFSETS)
    }

    /// In-bound diagonal neighbours of `cell`, row-major.
    #[must_use]
    pub fn diagonal_neighbours(&self, cell: usize) -> SmallVec<[usize; 8]> {
        self.cells_at(cell, &DIAGONAL_OFFSETS)
    }

    fn cells_at(&self, cell: usize, offsets: &[(isize, isize)]) -> SmallVec<[usize; 8]> {
        offsets
            .iter()
            .filter_map(|&(dr, dc)| self.offset(cell, dr, dc))
            .collect()
    }

    /// Manhattan distance from `cell` to the centre cell `(size/2, size/2)`.
    #[must_use]
    pub fn center_distance(&self, cell: usize) -> usize {
        let center = self.size / 2;
        let (row, col) = self.coords(cell);
        row.abs_diff(center) + col.abs_diff(center)
    }

    // === Runs ===

    /// First completed run in scan order. See [`find_completed_run`].
    #[must_use]
    pub fn completed_run(&self) -> Option<Run> {
        find_completed_run(&self.marks, self.size, self.win_length)
    }

    /// Side owning `run`, read from its first cell.
    #[must_use]
    pub fn run_owner(&self, run: &Run) -> Option<Side> {
        crate::rules::win::run_owner(&self.marks, run)
    }

    /// True if `side` owns the first completed run on this board.
    #[must_use]
    pub fn is_won_by(&self, side: Side) -> bool {
        self.completed_run()
            .is_some_and(|run| self.run_owner(&run) == Some(side))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.marks.chunks(self.size) {
            let line: Vec<String> = row.iter().map(|m| m.symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
