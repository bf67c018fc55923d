//! Board geometry with (row, col) coordinates

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of rows and columns on the board
pub const BOARD_LENGTH: i32 = 8;

/// Check if (row, col) lies on the board.
///
/// This is the only bounds check in the crate; the board and every piece's
/// geometry go through it.
pub const fn on_board(row: i32, col: i32) -> bool {
    row >= 0 && col >= 0 && row < BOARD_LENGTH && col < BOARD_LENGTH
}

/// A validated board coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32)", into = "(i32, i32)")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Square at (row, col), or `None` if it is off the board
    pub const fn new(row: i32, col: i32) -> Option<Self> {
        if on_board(row, col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub const fn row(self) -> i32 {
        self.row as i32
    }

    pub const fn col(self) -> i32 {
        self.col as i32
    }

    /// Square reached by moving (d_row, d_col), if still on the board
    pub const fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        Self::new(self.row() + d_row, self.col() + d_col)
    }

    /// Iterate all 64 squares, row by row
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_LENGTH as u8).flat_map(|row| (0..BOARD_LENGTH as u8).map(move |col| Square { row, col }))
    }

    pub(crate) const fn index(self) -> (usize, usize) {
        (self.row as usize, self.col as usize)
    }

    /// Squares strictly between `self` and `to` along a rank, file or diagonal.
    ///
    /// Returns `None` when the two squares are not aligned (or are equal).
    pub fn between(self, to: Square) -> Option<impl Iterator<Item = Square>> {
        let d_row = to.row() - self.row();
        let d_col = to.col() - self.col();
        let aligned = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
        if !aligned || (d_row == 0 && d_col == 0) {
            return None;
        }

        let step = (d_row.signum(), d_col.signum());
        let distance = d_row.abs().max(d_col.abs());
        let from = self;
        Some((1..distance).filter_map(move |i| from.offset(step.0 * i, step.1 * i)))
    }
}

impl TryFrom<(i32, i32)> for Square {
    type Error = String;

    fn try_from((row, col): (i32, i32)) -> Result<Self, Self::Error> {
        Square::new(row, col).ok_or_else(|| format!("square ({row}, {col}) is off the board"))
    }
}

impl From<Square> for (i32, i32) {
    fn from(square: Square) -> Self {
        (square.row(), square.col())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
