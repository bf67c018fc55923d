//! Play command - a console game between two people at one keyboard
//!
//! ## Architecture
//!
//! - run(): load the board, run the session, save if asked
//! - play_session(): one prompt/attempt/report cycle per round
//! - Tokens, report(): input parsing and output formatting

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use chessboard_core::{attempt_round, Action, Board, Outcome, RoundError, Setup};

use crate::render::render_board;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Color for player one (BLACK, RED, GREEN, YELLOW, BLUE, MAGENTA, CYAN, WHITE)
    #[arg(long, default_value = "BLACK")]
    pub p1_color: String,

    /// Color for player two
    #[arg(long, default_value = "WHITE")]
    pub p2_color: String,

    /// Start from a saved setup instead of the opening position
    #[arg(long, value_name = "FILE")]
    pub setup: Option<PathBuf>,

    /// Save the final position to this file when input ends
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Print the board without ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

/// Counts for one session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub moves: usize,
    pub undos: usize,
    pub rejected: usize,
}

/// One line of player input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Entry {
    Square(i32, i32),
    Other,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let mut board = load_board(args.setup.as_deref(), &args.p1_color, &args.p2_color)?;

    tracing::info!(
        "Starting game: player one {}, player two {}",
        board.colors().of(chessboard_core::Player::One),
        board.colors().of(chessboard_core::Player::Two)
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = play_session(&mut board, stdin.lock(), stdout.lock(), !args.no_color)
        .context("Console I/O failed")?;

    tracing::info!(
        "Session over: {} moves, {} undos, {} rejected",
        summary.moves,
        summary.undos,
        summary.rejected
    );

    if let Some(path) = &args.save {
        Setup::from_board(&board).save(path)?;
        tracing::info!("Saved position to {}", path.display());
    }

    Ok(())
}

/// Board from a setup file, or the opening position in the given colors
pub fn load_board(setup: Option<&Path>, p1_color: &str, p2_color: &str) -> Result<Board> {
    match setup {
        Some(path) => {
            let setup = Setup::load(path)?;
            tracing::debug!("Loaded setup '{}' ({} pieces); color flags ignored", setup.name, setup.pieces.len());
            setup
                .to_board()
                .with_context(|| format!("Unusable setup: {}", path.display()))
        }
        None => Ok(Board::new(p1_color, p2_color)),
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Play rounds until input runs out
pub fn play_session<R: BufRead, W: Write>(
    board: &mut Board,
    input: R,
    mut output: W,
    colored: bool,
) -> io::Result<SessionSummary> {
    let mut summary = SessionSummary::default();
    let mut tokens = Tokens::new(input);

    loop {
        write!(output, "{}", render_board(board, colored))?;
        let player = board.current_player().number();

        writeln!(
            output,
            "[PLAYER {}] Select a piece (Enter two integers: '<row> <col>'), or any other input to undo the last action.",
            player
        )?;
        let action = match tokens.read_entry()? {
            None => break,
            Some(Entry::Other) => Action::Undo,
            Some(Entry::Square(row, col)) => {
                writeln!(
                    output,
                    "[PLAYER {}] Specify a square to move to (Enter two integers: '<row> <col>'), or any other input to undo the last action.",
                    player
                )?;
                match tokens.read_entry()? {
                    None => break,
                    Some(Entry::Other) => Action::Undo,
                    Some(Entry::Square(new_row, new_col)) => Action::Move {
                        from: (row, col),
                        to: (new_row, new_col),
                    },
                }
            }
        };

        let result = attempt_round(board, action);
        match &result {
            Ok(Outcome::Moved { .. }) => summary.moves += 1,
            Ok(Outcome::Undone { .. }) => summary.undos += 1,
            Err(_) => summary.rejected += 1,
        }
        report(&mut output, action, &result)?;
    }

    output.flush()?;
    Ok(summary)
}

/// Whitespace-separated input tokens, read across line breaks
struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
    }

    /// Two integers make a square; a non-integer is a request to undo and
    /// drops the rest of its line. `None` at end of input.
    fn read_entry(&mut self) -> io::Result<Option<Entry>> {
        let Some(first) = self.next_token()? else {
            return Ok(None);
        };
        let Ok(row) = first.parse::<i32>() else {
            self.pending.clear();
            return Ok(Some(Entry::Other));
        };

        let Some(second) = self.next_token()? else {
            return Ok(None);
        };
        match second.parse::<i32>() {
            Ok(col) => Ok(Some(Entry::Square(row, col))),
            Err(_) => {
                self.pending.clear();
                Ok(Some(Entry::Other))
            }
        }
    }
}

fn report<W: Write>(output: &mut W, action: Action, result: &Result<Outcome, RoundError>) -> io::Result<()> {
    match result {
        Ok(Outcome::Moved { from, to, .. }) => writeln!(output, "Moved {} to {}", from, to),
        Ok(Outcome::Undone { from, .. }) => {
            writeln!(output, "Undo move from ({}, {})", from.row(), from.col())
        }
        Err(RoundError::NothingToUndo) => {
            writeln!(output, "No moves to undo.")?;
            writeln!(output, "Undo failed.")
        }
        Err(err @ RoundError::OutOfSync { .. }) => {
            tracing::debug!("{}", err);
            writeln!(output, "Undo failed.")
        }
        Err(RoundError::Illegal(reason)) => {
            tracing::debug!("{}", reason);
            if let Action::Move { from, to } = action {
                writeln!(
                    output,
                    "Unable to move piece at ({},{}) to ({},{})",
                    from.0, from.1, to.0, to.1
                )
            } else {
                Ok(())
            }
        }
    }
}
