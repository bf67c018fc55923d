//! Chessboard Core - two-player chess rules
//!
//! This crate provides the rule engine behind the `chessboard` console game:
//! - Board geometry (8x8 grid, row/col coordinates)
//! - Piece kinds and movement geometry
//! - Board state, move execution and exact undo
//! - Round controller (move/undo with turn handling)
//! - Saved positions (JSON setups)
//!
//! Check, checkmate, castling, en passant, promotion and draws are not
//! implemented. Capturing a king is simply an illegal move.

pub mod square;
pub mod color;
pub mod pieces;
pub mod board;
pub mod history;
pub mod round;
pub mod setup;

// Re-exports for convenient access
pub use square::{on_board, Square, BOARD_LENGTH};
pub use color::{Player, PlayerColor, PlayerColors, UnknownColor, ALLOWED_COLORS};
pub use pieces::{Piece, PieceKind, BACK_ROW};
pub use board::{empty_grid, Board, BoardState, IllegalMove, Occupant, PieceGrid, PieceId};
pub use history::{MoveHistory, MoveRecord};
pub use round::{attempt_round, Action, Outcome, RoundError};
pub use setup::{PlacedPiece, Setup, SetupError};
