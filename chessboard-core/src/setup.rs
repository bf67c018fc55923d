//! Setup - a saved position to start or resume a game from

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::{empty_grid, Board};
use crate::color::{Player, PlayerColors};
use crate::pieces::{Piece, PieceKind};
use crate::square::Square;

/// One piece of a setup
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub kind: PieceKind,
    pub owner: Player,
    pub row: i32,
    pub col: i32,
    #[serde(default)]
    pub has_moved: bool,
    /// Pawns only. Defaults to up for player one, down for player two.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_up: Option<bool>,
}

/// A position on disk
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    #[serde(default = "default_name")]
    pub name: String,
    /// Color names; invalid or equal names fall back to BLACK/WHITE
    #[serde(default = "default_player_one")]
    pub player_one: String,
    #[serde(default = "default_player_two")]
    pub player_two: String,
    #[serde(default = "default_turn")]
    pub player_one_turn: bool,
    pub pieces: Vec<PlacedPiece>,
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_player_one() -> String {
    "BLACK".to_string()
}

fn default_player_two() -> String {
    "WHITE".to_string()
}

fn default_turn() -> bool {
    true
}

/// A setup that cannot be turned into a board
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("piece placed off the board at ({row},{col})")]
    OffBoard { row: i32, col: i32 },

    #[error("two pieces placed on {0}")]
    Occupied(Square),
}

impl Setup {
    /// The opening position
    pub fn standard() -> Self {
        Self {
            name: "standard".to_string(),
            ..Self::from_board(&Board::default())
        }
    }

    /// Snapshot of a board's current position. History is not kept.
    pub fn from_board(board: &Board) -> Self {
        let colors = board.colors();
        let pieces = board
            .board_state()
            .occupants()
            .filter_map(|(square, occupant)| {
                let Some(owner) = colors.owner(occupant.color()) else {
                    tracing::warn!("skipping {} piece at {}: no player has that color", occupant.color(), square);
                    return None;
                };
                let piece = board.piece(occupant.id())?;
                Some(PlacedPiece {
                    kind: piece.kind(),
                    owner,
                    row: square.row(),
                    col: square.col(),
                    has_moved: piece.has_moved(),
                    moving_up: (piece.kind() == PieceKind::Pawn).then(|| piece.is_moving_up()),
                })
            })
            .collect();

        Self {
            name: default_name(),
            player_one: colors.of(Player::One).to_string(),
            player_two: colors.of(Player::Two).to_string(),
            player_one_turn: board.is_player_one_turn(),
            pieces,
        }
    }

    /// Build the board this setup describes
    pub fn to_board(&self) -> Result<Board, SetupError> {
        let colors = PlayerColors::from_names(&self.player_one, &self.player_two);
        let mut grid = empty_grid();

        for placed in &self.pieces {
            let square = Square::new(placed.row, placed.col).ok_or(SetupError::OffBoard {
                row: placed.row,
                col: placed.col,
            })?;
            let (row, col) = square.index();
            if grid[row][col].is_some() {
                return Err(SetupError::Occupied(square));
            }

            let color = colors.of(placed.owner);
            let piece = match placed.kind {
                PieceKind::Pawn => {
                    let moving_up = placed.moving_up.unwrap_or(placed.owner == Player::One);
                    Piece::pawn(color, square, moving_up)
                }
                kind => Piece::new(kind, color, square),
            };
            grid[row][col] = Some(if placed.has_moved { piece.moved() } else { piece });
        }

        Ok(Board::from_grid_with_colors(grid, self.player_one_turn, colors))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse setup")
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize setup")
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read setup: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Invalid setup file: {}", path.display()))
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = self.to_json()?;
        std::fs::write(path, content).with_context(|| format!("Failed to write setup: {}", path.display()))?;
        Ok(())
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::standard()
    }
}
