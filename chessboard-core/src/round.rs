//! Round controller - one turn of play against a board
//!
//! A round is either a move attempt or an undo. Successful moves are recorded
//! in the board's history and hand the turn over; an undo hands it back by
//! itself.

use crate::board::{Board, IllegalMove};
use crate::pieces::PieceKind;
use crate::square::Square;

/// What the player asked for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move { from: (i32, i32), to: (i32, i32) },
    Undo,
}

/// What a completed round did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Moved {
        from: Square,
        to: Square,
        captured: Option<PieceKind>,
    },
    Undone {
        from: Square,
        to: Square,
    },
}

/// Why a round did not complete. The board is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    #[error("illegal move: {0}")]
    Illegal(#[from] IllegalMove),

    #[error("no moves to undo")]
    NothingToUndo,

    #[error("board no longer matches the move {from} -> {to}")]
    OutOfSync { from: Square, to: Square },
}

/// Play one round
pub fn attempt_round(board: &mut Board, action: Action) -> Result<Outcome, RoundError> {
    match action {
        Action::Move { from, to } => play_move(board, from, to),
        Action::Undo => take_back(board),
    }
}

/// Move, record the move, then pass the turn
pub fn play_move(board: &mut Board, from: (i32, i32), to: (i32, i32)) -> Result<Outcome, RoundError> {
    let record = board.try_move(from.0, from.1, to.0, to.1)?;
    board.record(record);
    board.toggle_turn();

    Ok(Outcome::Moved {
        from: record.from,
        to: record.to,
        captured: record.captured.and_then(|id| board.piece(id)).map(|piece| piece.kind()),
    })
}

/// Undo the latest recorded move (the turn goes back with it)
pub fn take_back(board: &mut Board) -> Result<Outcome, RoundError> {
    let last = board.history().last().copied().ok_or(RoundError::NothingToUndo)?;
    if !board.undo() {
        return Err(RoundError::OutOfSync {
            from: last.from,
            to: last.to,
        });
    }
    Ok(Outcome::Undone {
        from: last.from,
        to: last.to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_move_round_toggles_and_records() {
        let mut board = Board::default();
        let outcome = attempt_round(&mut board, Action::Move { from: (1, 4), to: (3, 4) }).unwrap();

        assert_eq!(
            outcome,
            Outcome::Moved {
                from: sq(1, 4),
                to: sq(3, 4),
                captured: None
            }
        );
        assert!(!board.is_player_one_turn());
        assert_eq!(board.history().len(), 1);
    }

    #[test]
    fn test_failed_round_changes_nothing() {
        let mut board = Board::default();
        let before = board.clone();

        let err = attempt_round(&mut board, Action::Move { from: (6, 4), to: (4, 4) }).unwrap_err();
        assert!(matches!(err, RoundError::Illegal(IllegalMove::NotYourPiece { .. })));
        assert_eq!(board, before);

        assert_eq!(attempt_round(&mut board, Action::Undo), Err(RoundError::NothingToUndo));
        assert_eq!(board, before);
    }

    #[test]
    fn test_undo_round() {
        let mut board = Board::default();
        let state = board.board_state();
        attempt_round(&mut board, Action::Move { from: (0, 6), to: (2, 5) }).unwrap();

        let outcome = attempt_round(&mut board, Action::Undo).unwrap();
        assert_eq!(
            outcome,
            Outcome::Undone {
                from: sq(0, 6),
                to: sq(2, 5)
            }
        );
        assert_eq!(board.board_state(), state);
        assert!(board.is_player_one_turn());
        assert!(board.history().is_empty());
    }

    #[test]
    fn test_undo_round_after_unrecorded_move() {
        let mut board = Board::default();
        attempt_round(&mut board, Action::Move { from: (0, 1), to: (2, 2) }).unwrap();
        board.toggle_turn();
        assert!(board.move_piece(2, 2, 4, 3));
        let before = board.clone();

        assert_eq!(
            attempt_round(&mut board, Action::Undo),
            Err(RoundError::OutOfSync {
                from: sq(0, 1),
                to: sq(2, 2)
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_reported() {
        let mut board = Board::default();
        attempt_round(&mut board, Action::Move { from: (1, 3), to: (3, 3) }).unwrap();
        attempt_round(&mut board, Action::Move { from: (6, 4), to: (4, 4) }).unwrap();

        let outcome = attempt_round(&mut board, Action::Move { from: (3, 3), to: (4, 4) }).unwrap();
        assert_eq!(
            outcome,
            Outcome::Moved {
                from: sq(3, 3),
                to: sq(4, 4),
                captured: Some(PieceKind::Pawn)
            }
        );
        assert_eq!(board.captured_pieces().count(), 1);
    }
}
