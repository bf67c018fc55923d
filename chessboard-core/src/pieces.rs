//! Piece definitions and movement geometry

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::color::PlayerColor;
use crate::square::Square;

/// Piece kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// Back row layout, column 0 to 7
pub const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::King,
    PieceKind::Queen,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "PAWN",
            PieceKind::Rook => "ROOK",
            PieceKind::Knight => "KNIGHT",
            PieceKind::Bishop => "BISHOP",
            PieceKind::Queen => "QUEEN",
            PieceKind::King => "KING",
        }
    }

    /// Board symbol: first letter of the name, except `N` for knights
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// A piece. Owned by the board that holds it and mutated in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    color: PlayerColor,
    square: Square,
    has_moved: bool,
    /// Pawns only: forward is increasing row
    moving_up: bool,
    /// Pawns only: may still advance two squares
    double_jumpable: bool,
}

impl Piece {
    /// Create an unmoved piece. Pawns made here move down the board; use
    /// [`Piece::pawn`] to choose.
    pub fn new(kind: PieceKind, color: PlayerColor, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
            has_moved: false,
            moving_up: false,
            double_jumpable: kind == PieceKind::Pawn,
        }
    }

    /// Create an unmoved pawn heading up or down the board
    pub fn pawn(color: PlayerColor, square: Square, moving_up: bool) -> Self {
        Self {
            moving_up,
            ..Self::new(PieceKind::Pawn, color, square)
        }
    }

    /// The same piece, flagged as having moved already
    pub fn moved(mut self) -> Self {
        self.flag_moved();
        self
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> PlayerColor {
        self.color
    }

    pub fn square(&self) -> Square {
        self.square
    }

    pub fn row(&self) -> i32 {
        self.square.row()
    }

    pub fn col(&self) -> i32 {
        self.square.col()
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn is_moving_up(&self) -> bool {
        self.moving_up
    }

    /// Always false for anything but an unmoved pawn
    pub fn is_double_jumpable(&self) -> bool {
        self.double_jumpable
    }

    // ========================================================================
    // MUTATORS (board only)
    // ========================================================================

    pub(crate) fn set_row(&mut self, row: i32) {
        if let Some(square) = Square::new(row, self.square.col()) {
            self.square = square;
        }
    }

    pub(crate) fn set_column(&mut self, col: i32) {
        if let Some(square) = Square::new(self.square.row(), col) {
            self.square = square;
        }
    }

    /// Mark as moved. A pawn loses its double jump for good.
    pub(crate) fn flag_moved(&mut self) {
        self.has_moved = true;
        self.double_jumpable = false;
    }

    // ========================================================================
    // GEOMETRY
    // ========================================================================

    /// Whether this piece may move to (target_row, target_col) on `grid`.
    ///
    /// Off-board targets and targets holding a piece of the same color are
    /// always refused. Does not consider turn order or king captures.
    pub fn can_move(&self, target_row: i32, target_col: i32, grid: &BoardState) -> bool {
        let Some(to) = Square::new(target_row, target_col) else {
            return false;
        };
        if grid.get(to).is_some_and(|occupant| occupant.color() == self.color) {
            return false;
        }

        let d_row = to.row() - self.row();
        let d_col = to.col() - self.col();

        match self.kind {
            PieceKind::Pawn => self.pawn_can_reach(to, d_row, d_col, grid),
            PieceKind::Rook => is_straight(d_row, d_col) && path_clear(self.square, to, grid),
            PieceKind::Bishop => is_diagonal(d_row, d_col) && path_clear(self.square, to, grid),
            PieceKind::Queen => {
                (is_straight(d_row, d_col) || is_diagonal(d_row, d_col))
                    && path_clear(self.square, to, grid)
            }
            PieceKind::Knight => matches!((d_row.abs(), d_col.abs()), (1, 2) | (2, 1)),
            PieceKind::King => d_row.abs().max(d_col.abs()) == 1,
        }
    }

    fn forward(&self) -> i32 {
        if self.moving_up {
            1
        } else {
            -1
        }
    }

    fn pawn_can_reach(&self, to: Square, d_row: i32, d_col: i32, grid: &BoardState) -> bool {
        let forward = self.forward();
        let target_empty = grid.get(to).is_none();

        if d_col == 0 && d_row == forward {
            return target_empty;
        }

        if d_col == 0 && d_row == 2 * forward {
            let middle_empty = self
                .square
                .offset(forward, 0)
                .is_some_and(|middle| grid.get(middle).is_none());
            return self.double_jumpable && middle_empty && target_empty;
        }

        // Diagonal step only as a capture; same color was refused above
        d_col.abs() == 1 && d_row == forward && !target_empty
    }
}

fn is_straight(d_row: i32, d_col: i32) -> bool {
    (d_row == 0) != (d_col == 0)
}

fn is_diagonal(d_row: i32, d_col: i32) -> bool {
    d_row != 0 && d_row.abs() == d_col.abs()
}

/// Every square strictly between `from` and `to` is empty
fn path_clear(from: Square, to: Square, grid: &BoardState) -> bool {
    match from.between(to) {
        Some(mut path) => path.all(|square| grid.get(square).is_none()),
        None => false,
    }
}
