//! Board state, move execution and undo

use crate::color::{Player, PlayerColor, PlayerColors};
use crate::history::{MoveHistory, MoveRecord};
use crate::pieces::{Piece, PieceKind, BACK_ROW};
use crate::square::{Square, BOARD_LENGTH};

const SIZE: usize = BOARD_LENGTH as usize;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Stable handle to a piece owned by a [`Board`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(usize);

/// What a grid cell holds: the piece handle plus its fixed kind and color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Occupant {
    id: PieceId,
    kind: PieceKind,
    color: PlayerColor,
}

impl Occupant {
    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> PlayerColor {
        self.color
    }
}

/// 8x8 occupancy snapshot.
///
/// A plain value: copying it out of a board and keeping it around is safe.
/// Two snapshots are equal when every cell holds the same piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardState {
    cells: [[Option<Occupant>; SIZE]; SIZE],
}

impl BoardState {
    fn empty() -> Self {
        Self {
            cells: [[None; SIZE]; SIZE],
        }
    }

    pub fn get(&self, square: Square) -> Option<Occupant> {
        let (row, col) = square.index();
        self.cells[row][col]
    }

    /// Bounds-checked lookup by raw coordinates
    pub fn at(&self, row: i32, col: i32) -> Option<Occupant> {
        Square::new(row, col).and_then(|square| self.get(square))
    }

    /// Occupied squares, row by row
    pub fn occupants(&self) -> impl Iterator<Item = (Square, Occupant)> + '_ {
        Square::all().filter_map(|square| self.get(square).map(|occupant| (square, occupant)))
    }

    fn set(&mut self, square: Square, occupant: Option<Occupant>) {
        let (row, col) = square.index();
        self.cells[row][col] = occupant;
    }
}

/// Caller-built grid of pieces, indexed `[row][col]`
pub type PieceGrid = [[Option<Piece>; SIZE]; SIZE];

/// A grid with nothing on it
pub fn empty_grid() -> PieceGrid {
    std::array::from_fn(|_| std::array::from_fn(|_| None))
}

/// Why a move was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("({row},{col}) is not on the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("no piece at {0}")]
    EmptySquare(Square),

    #[error("piece at {square} is {color}, not the color in play")]
    NotYourPiece { square: Square, color: PlayerColor },

    #[error("piece at {from} cannot reach {to}")]
    Unreachable { from: Square, to: Square },

    #[error("the king at {0} cannot be captured")]
    KingCapture(Square),
}

// ============================================================================
// BOARD
// ============================================================================

/// Two-player chess board.
///
/// Owns every piece it was built with, including captured ones, which stay in
/// `pieces` off the grid so that undo can put them back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: BoardState,
    pieces: Vec<Piece>,
    colors: PlayerColors,
    player_one_turn: bool,
    history: MoveHistory,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Standard opening position with the named colors.
    ///
    /// Unknown or duplicate colors fall back to BLACK for player one and
    /// WHITE for player two.
    pub fn new(color_p1: &str, color_p2: &str) -> Self {
        Self::with_colors(PlayerColors::from_names(color_p1, color_p2))
    }

    /// Standard opening position.
    ///
    /// ```text
    /// 7 | R N B K Q B N R   player two
    /// 6 | P P P P P P P P
    /// 1 | P P P P P P P P
    /// 0 | R N B K Q B N R   player one
    /// ```
    ///
    /// Player one's pawns move up, player two's move down. Player one starts.
    pub fn with_colors(colors: PlayerColors) -> Self {
        let one = colors.of(Player::One);
        let two = colors.of(Player::Two);

        let mut grid = empty_grid();
        for square in Square::all() {
            let (row, col) = square.index();
            grid[row][col] = match square.row() {
                0 => Some(Piece::new(BACK_ROW[col], one, square)),
                1 => Some(Piece::pawn(one, square, true)),
                6 => Some(Piece::pawn(two, square, false)),
                7 => Some(Piece::new(BACK_ROW[col], two, square)),
                _ => None,
            };
        }

        Self::from_grid_with_colors(grid, true, colors)
    }

    /// Adopt a caller-built grid. Colors are BLACK and WHITE.
    pub fn from_grid(grid: PieceGrid, player_one_turn: bool) -> Self {
        Self::from_grid_with_colors(grid, player_one_turn, PlayerColors::default())
    }

    /// Adopt a caller-built grid with explicit colors.
    ///
    /// The board takes ownership of every piece; each piece's position is
    /// set to the cell it was found in.
    pub fn from_grid_with_colors(grid: PieceGrid, player_one_turn: bool, colors: PlayerColors) -> Self {
        let mut state = BoardState::empty();
        let mut pieces = Vec::new();

        for (square, cell) in Square::all().zip(grid.into_iter().flatten()) {
            let Some(mut piece) = cell else {
                continue;
            };
            if piece.square() != square {
                tracing::trace!("relocating {:?} from {} to its cell {}", piece.kind(), piece.square(), square);
                piece.set_row(square.row());
                piece.set_column(square.col());
            }

            let occupant = Occupant {
                id: PieceId(pieces.len()),
                kind: piece.kind(),
                color: piece.color(),
            };
            state.set(square, Some(occupant));
            pieces.push(piece);
        }

        tracing::trace!("board built with {} pieces", pieces.len());

        Self {
            grid: state,
            pieces,
            colors,
            player_one_turn,
            history: MoveHistory::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Piece at (row, col). `None` for empty or off-board squares.
    pub fn piece_at(&self, row: i32, col: i32) -> Option<&Piece> {
        self.grid.at(row, col).and_then(|occupant| self.piece(occupant.id))
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    /// Copy of the grid
    pub fn board_state(&self) -> BoardState {
        self.grid
    }

    /// Every piece the board owns, captured ones included
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces.iter().enumerate().map(|(i, piece)| (PieceId(i), piece))
    }

    /// Pieces currently off the grid
    pub fn captured_pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces()
            .filter(move |(id, piece)| self.grid.get(piece.square()).map(|occupant| occupant.id) != Some(*id))
    }

    pub fn is_player_one_turn(&self) -> bool {
        self.player_one_turn
    }

    pub fn current_player(&self) -> Player {
        if self.player_one_turn {
            Player::One
        } else {
            Player::Two
        }
    }

    /// Color whose pieces may move now
    pub fn current_color(&self) -> PlayerColor {
        self.colors.of(self.current_player())
    }

    pub fn colors(&self) -> PlayerColors {
        self.colors
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    // ========================================================================
    // TURN & HISTORY
    // ========================================================================

    /// Hand the turn to the other player.
    ///
    /// `move_piece` never does this; whoever drives the rounds calls it after
    /// a successful move. `undo` toggles on its own.
    pub fn toggle_turn(&mut self) {
        self.player_one_turn = !self.player_one_turn;
    }

    pub(crate) fn record(&mut self, record: MoveRecord) {
        self.history.push(record);
    }

    // ========================================================================
    // MOVE
    // ========================================================================

    /// Move the piece at (row, col) to (new_row, new_col) if legal.
    ///
    /// Returns false and leaves the board untouched if any coordinate is off
    /// the board, the source holds no piece of the color in play, the piece
    /// cannot reach the target, or the target holds a king.
    pub fn move_piece(&mut self, row: i32, col: i32, new_row: i32, new_col: i32) -> bool {
        self.try_move(row, col, new_row, new_col).is_ok()
    }

    /// Same as [`Board::move_piece`], reporting why a move was refused.
    ///
    /// On success returns the record that would reverse the move. It is not
    /// added to the history; recording is up to the caller.
    pub fn try_move(&mut self, row: i32, col: i32, new_row: i32, new_col: i32) -> Result<MoveRecord, IllegalMove> {
        let (mover, from, to, captured) = match self.check_move(row, col, new_row, new_col) {
            Ok(checked) => checked,
            Err(err) => {
                tracing::debug!("move rejected: {}", err);
                return Err(err);
            }
        };

        self.grid.set(to, Some(mover));
        self.grid.set(from, None);

        if let Some(piece) = self.pieces.get_mut(mover.id.0) {
            piece.set_row(to.row());
            piece.set_column(to.col());
            piece.flag_moved();
        }

        tracing::debug!(
            "{} {:?} {} -> {}{}",
            mover.color,
            mover.kind,
            from,
            to,
            captured.map(|c| format!(" capturing {:?}", c.kind)).unwrap_or_default()
        );

        Ok(MoveRecord {
            from,
            to,
            moved: mover.id,
            captured: captured.map(|c| c.id),
        })
    }

    fn check_move(
        &self,
        row: i32,
        col: i32,
        new_row: i32,
        new_col: i32,
    ) -> Result<(Occupant, Square, Square, Option<Occupant>), IllegalMove> {
        let from = Square::new(row, col).ok_or(IllegalMove::OutOfBounds { row, col })?;
        let to = Square::new(new_row, new_col).ok_or(IllegalMove::OutOfBounds {
            row: new_row,
            col: new_col,
        })?;

        let mover = self.grid.get(from).ok_or(IllegalMove::EmptySquare(from))?;
        if mover.color != self.current_color() {
            return Err(IllegalMove::NotYourPiece {
                square: from,
                color: mover.color,
            });
        }

        let piece = self.piece(mover.id).ok_or(IllegalMove::EmptySquare(from))?;
        if !piece.can_move(new_row, new_col, &self.grid) {
            return Err(IllegalMove::Unreachable { from, to });
        }

        let captured = self.grid.get(to);
        if captured.is_some_and(|occupant| occupant.kind == PieceKind::King) {
            return Err(IllegalMove::KingCapture(to));
        }

        Ok((mover, from, to, captured))
    }

    // ========================================================================
    // UNDO
    // ========================================================================

    /// Reverse the most recent recorded move and toggle the turn.
    ///
    /// Returns false, changing nothing, if there is nothing to undo or the
    /// board no longer matches the latest record (an unrecorded move shifted
    /// its piece). Moved flags are not restored: a pawn that moved keeps its
    /// double jump lost.
    pub fn undo(&mut self) -> bool {
        let Some(last) = self.history.last().copied() else {
            tracing::debug!("no moves to undo");
            return false;
        };
        if !self.is_undoable(&last) {
            tracing::debug!("board moved on since {} -> {}, refusing undo", last.from, last.to);
            return false;
        }
        self.history.pop();

        self.put_back(last.moved, last.from);
        match last.captured {
            Some(captured) => self.put_back(captured, last.to),
            None => self.grid.set(last.to, None),
        }

        self.toggle_turn();
        tracing::debug!("undid move {} -> {}", last.from, last.to);
        true
    }

    /// The recorded piece still stands on its destination and its source is free
    pub fn is_undoable(&self, record: &MoveRecord) -> bool {
        self.grid.get(record.to).map(|occupant| occupant.id) == Some(record.moved)
            && self.grid.get(record.from).is_none()
    }

    fn put_back(&mut self, id: PieceId, square: Square) {
        let Some(piece) = self.pieces.get_mut(id.0) else {
            return;
        };
        piece.set_row(square.row());
        piece.set_column(square.col());
        self.grid.set(
            square,
            Some(Occupant {
                id,
                kind: piece.kind(),
                color: piece.color(),
            }),
        );
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::with_colors(PlayerColors::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
