//! Integration tests for the chess rules
//!
//! Covers the opening layout, move legality, the move/undo round trip and the
//! documented opening scenarios.

use chessboard_core::{
    attempt_round, empty_grid, Action, Board, IllegalMove, Piece, PieceKind, PlayerColor, RoundError, Square,
};
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn sq(row: i32, col: i32) -> Square {
    Square::new(row, col).unwrap()
}

/// Every on-grid piece sits where its cell says it does
fn assert_consistent(board: &Board) {
    for (square, occupant) in board.board_state().occupants() {
        let piece = board.piece(occupant.id()).unwrap();
        assert_eq!(piece.square(), square);
        assert_eq!(piece.kind(), occupant.kind());
        assert_eq!(piece.color(), occupant.color());
    }
    let kings = board
        .board_state()
        .occupants()
        .filter(|(_, o)| o.kind() == PieceKind::King)
        .count();
    assert_eq!(kings, 2, "kings are never captured");
}

// ============================================================================
// OPENING POSITION
// ============================================================================

#[test]
fn test_fresh_board_rows() {
    let board = Board::default();
    for (square, occupant) in board.board_state().occupants() {
        match occupant.color() {
            PlayerColor::Black => assert!(square.row() <= 1),
            PlayerColor::White => assert!(square.row() >= 6),
            other => panic!("unexpected color {other}"),
        }
    }
    assert_eq!(board.board_state().occupants().count(), 32);
    assert_consistent(&board);
}

#[test]
fn test_invalid_colors_fall_back() {
    let board = Board::new("PURPLE", "WHITE");
    assert_eq!(board.piece_at(0, 0).unwrap().color(), PlayerColor::Black);
    assert_eq!(board.piece_at(7, 0).unwrap().color(), PlayerColor::White);

    let board = Board::new("BLUE", "BLUE");
    assert_eq!(board.piece_at(0, 0).unwrap().color(), PlayerColor::Black);
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_scenarios_a_to_c() {
    let mut board = Board::default();

    // A: pawn double step
    assert!(board.move_piece(1, 4, 3, 4));
    let pawn = board.piece_at(3, 4).unwrap();
    assert_eq!((pawn.row(), pawn.col()), (3, 4));
    assert!(!pawn.is_double_jumpable());
    board.toggle_turn();

    // B: opponent double step
    assert!(board.move_piece(6, 4, 4, 4));
    board.toggle_turn();

    // C: straight-ahead capture is illegal
    let before = board.clone();
    assert!(!board.move_piece(3, 4, 4, 4));
    assert_eq!(board, before);
}

#[test]
fn test_scenario_d_rook_onto_own_knight() {
    let mut board = Board::default();
    let before = board.clone();
    assert!(!board.move_piece(0, 0, 0, 1));
    assert_eq!(board, before);
}

#[test]
fn test_scenario_e_knight_hops() {
    let mut board = Board::default();
    assert!(board.move_piece(0, 1, 2, 2));
    assert_eq!(board.piece_at(2, 2).unwrap().kind(), PieceKind::Knight);
    assert!(board.piece_at(0, 1).is_none());
}

// ============================================================================
// LEGALITY
// ============================================================================

#[test]
fn test_sliders_blocked_by_either_color() {
    let mut grid = empty_grid();
    grid[0][0] = Some(Piece::new(PieceKind::Queen, PlayerColor::Black, sq(0, 0)));
    grid[0][2] = Some(Piece::new(PieceKind::Pawn, PlayerColor::White, sq(0, 2)));
    grid[2][2] = Some(Piece::new(PieceKind::Pawn, PlayerColor::Black, sq(2, 2)));
    let mut board = Board::from_grid(grid, true);

    assert!(!board.move_piece(0, 0, 0, 5)); // through enemy
    assert!(!board.move_piece(0, 0, 4, 4)); // through friend
    assert!(board.move_piece(0, 0, 0, 2)); // capture the blocker itself
}

#[test]
fn test_wrong_turn_rejected() {
    let mut board = Board::default();
    board.toggle_turn();
    assert_eq!(
        board.try_move(1, 0, 2, 0),
        Err(IllegalMove::NotYourPiece {
            square: sq(1, 0),
            color: PlayerColor::Black
        })
    );
    assert!(board.move_piece(6, 0, 5, 0));
}

#[test]
fn test_pawn_double_step_only_once() {
    let mut board = Board::default();
    assert!(board.move_piece(1, 0, 2, 0));
    assert!(!board.move_piece(2, 0, 4, 0));
    assert!(board.move_piece(2, 0, 3, 0));
}

// ============================================================================
// UNDO
// ============================================================================

#[test]
fn test_undo_on_empty_history() {
    let mut board = Board::default();
    let before = board.clone();
    assert!(!board.undo());
    assert_eq!(board, before);
}

#[test]
fn test_move_without_round_is_not_undoable() {
    let mut board = Board::default();
    assert!(board.move_piece(1, 0, 2, 0));
    assert!(!board.undo());
    assert!(board.is_player_one_turn());
}

#[test]
fn test_undo_whole_game() {
    let mut board = Board::default();
    let start = board.board_state();

    let moves = [
        ((1, 4), (3, 4), true),
        ((6, 3), (4, 3), true),
        ((3, 4), (4, 3), true),  // capture
        ((7, 4), (4, 4), false), // queen behind its own pawn
        ((7, 6), (5, 5), true),
        ((0, 4), (3, 7), false), // queen behind its own pawn
    ];
    let mut played = 0;
    for (from, to, legal) in moves {
        let result = attempt_round(&mut board, Action::Move { from, to });
        assert_eq!(result.is_ok(), legal, "{from:?} -> {to:?}");
        if legal {
            played += 1;
        }
    }
    assert_eq!(played, 4);
    assert_eq!(board.history().len(), played);
    assert_eq!(board.captured_pieces().count(), 1);

    for _ in 0..played {
        assert!(board.undo());
    }
    assert_eq!(attempt_round(&mut board, Action::Undo), Err(RoundError::NothingToUndo));
    assert_eq!(board.board_state(), start);
    assert!(board.is_player_one_turn());
    assert_eq!(board.captured_pieces().count(), 0);
    assert_consistent(&board);
}

#[test]
fn test_random_round_trips() {
    for seed in [1u64, 7, 42] {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut board = Board::default();
        let mut successes = 0;

        for _ in 0..3000 {
            let color = board.current_color();
            let Some((from, _)) = board
                .board_state()
                .occupants()
                .filter(|(_, o)| o.color() == color)
                .choose(&mut rng)
            else {
                break;
            };
            let to = (rng.gen_range(-1..9), rng.gen_range(-1..9));
            let action = Action::Move {
                from: (from.row(), from.col()),
                to,
            };

            let before = board.clone();
            match attempt_round(&mut board, action) {
                Ok(_) => {
                    successes += 1;
                    let after = board.clone();

                    assert!(board.undo());
                    assert_eq!(board.board_state(), before.board_state());
                    assert_eq!(board.is_player_one_turn(), before.is_player_one_turn());
                    assert_consistent(&board);

                    board = after;
                }
                Err(_) => assert_eq!(board, before),
            }
            assert_consistent(&board);
        }

        assert!(successes > 0, "seed {seed} never moved");
    }
}
