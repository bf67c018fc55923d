//! Board display for the console
//!
//! Reads the board only through its occupancy snapshot.

use chessboard_core::{Board, BoardState, PlayerColor, BOARD_LENGTH};

const RESET: &str = "\x1b[0m";

/// ANSI escape for a player color
pub fn ansi_code(color: PlayerColor) -> &'static str {
    match color {
        PlayerColor::Black => "\x1b[1;90m",
        PlayerColor::Red => "\x1b[1;31m",
        PlayerColor::Green => "\x1b[1;32m",
        PlayerColor::Yellow => "\x1b[1;33m",
        PlayerColor::Blue => "\x1b[1;34m",
        PlayerColor::Magenta => "\x1b[1;35m",
        PlayerColor::Cyan => "\x1b[1;36m",
        PlayerColor::White => "\x1b[1;37m",
    }
}

/// Wrap text in the color's escape sequence
pub fn color_text(text: &str, color: PlayerColor) -> String {
    format!("{}{}{}", ansi_code(color), text, RESET)
}

/// Render the board, row 7 on top
///
/// ```text
/// 7 | R N B K Q B N R
/// ...
/// 0 | R N B K Q B N R
///     ---------------
///     0 1 2 3 4 5 6 7
/// ```
pub fn render_board(board: &Board, colored: bool) -> String {
    render_state(&board.board_state(), colored)
}

pub fn render_state(state: &BoardState, colored: bool) -> String {
    let mut out = String::new();

    for row in (0..BOARD_LENGTH).rev() {
        out.push_str(&format!("{} | ", row));
        for col in 0..BOARD_LENGTH {
            let symbol = match state.at(row, col) {
                None => "*".to_string(),
                Some(occupant) => {
                    let symbol = occupant.kind().symbol().to_string();
                    if colored {
                        color_text(&symbol, occupant.color())
                    } else {
                        symbol
                    }
                }
            };
            out.push_str(&symbol);
            out.push(' ');
        }
        out.push('\n');
    }

    out.push_str(&format!("{}{}\n", " ".repeat(4), "-".repeat(15)));
    out.push_str(&" ".repeat(4));
    for col in 0..BOARD_LENGTH {
        out.push_str(&format!("{} ", col));
    }
    out.push('\n');

    out
}
