//! Players and the colors assigned to them

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which side of the table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 1 or 2, for prompts
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// Colors a player may pick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// Every allowed color
pub const ALLOWED_COLORS: [PlayerColor; 8] = [
    PlayerColor::Black,
    PlayerColor::Red,
    PlayerColor::Green,
    PlayerColor::Yellow,
    PlayerColor::Blue,
    PlayerColor::Magenta,
    PlayerColor::Cyan,
    PlayerColor::White,
];

impl PlayerColor {
    pub fn name(self) -> &'static str {
        match self {
            PlayerColor::Black => "BLACK",
            PlayerColor::Red => "RED",
            PlayerColor::Green => "GREEN",
            PlayerColor::Yellow => "YELLOW",
            PlayerColor::Blue => "BLUE",
            PlayerColor::Magenta => "MAGENTA",
            PlayerColor::Cyan => "CYAN",
            PlayerColor::White => "WHITE",
        }
    }
}

/// Error for a color name outside [`ALLOWED_COLORS`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color: {0:?}")]
pub struct UnknownColor(pub String);

impl FromStr for PlayerColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALLOWED_COLORS
            .iter()
            .copied()
            .find(|color| color.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two colors in play. Always distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerColors {
    one: PlayerColor,
    two: PlayerColor,
}

impl PlayerColors {
    /// Pair the two colors, falling back to BLACK/WHITE if they are equal
    pub fn new(one: PlayerColor, two: PlayerColor) -> Self {
        if one == two {
            tracing::debug!("both players asked for {}, using defaults", one);
            return Self::default();
        }
        Self { one, two }
    }

    /// Pair two color names.
    ///
    /// An unknown name on either side, or the same name twice, resets both to
    /// BLACK/WHITE. This never fails.
    pub fn from_names(one: &str, two: &str) -> Self {
        match (one.parse::<PlayerColor>(), two.parse::<PlayerColor>()) {
            (Ok(one), Ok(two)) => Self::new(one, two),
            _ => {
                tracing::debug!("invalid colors {:?}/{:?}, using defaults", one, two);
                Self::default()
            }
        }
    }

    pub fn of(&self, player: Player) -> PlayerColor {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }

    /// Owner of a piece of the given color
    pub fn owner(&self, color: PlayerColor) -> Option<Player> {
        if color == self.one {
            Some(Player::One)
        } else if color == self.two {
            Some(Player::Two)
        } else {
            None
        }
    }
}

impl Default for PlayerColors {
    fn default() -> Self {
        Self {
            one: PlayerColor::Black,
            two: PlayerColor::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!("RED".parse::<PlayerColor>(), Ok(PlayerColor::Red));
        assert_eq!(" cyan ".parse::<PlayerColor>(), Ok(PlayerColor::Cyan));
        assert!("PURPLE".parse::<PlayerColor>().is_err());
    }

    #[test]
    fn test_valid_pair_kept() {
        let colors = PlayerColors::from_names("RED", "BLUE");
        assert_eq!(colors.of(Player::One), PlayerColor::Red);
        assert_eq!(colors.of(Player::Two), PlayerColor::Blue);
    }

    #[test]
    fn test_invalid_pair_defaults() {
        for (one, two) in [("RED", "RED"), ("PURPLE", "BLUE"), ("GREEN", ""), ("", "")] {
            let colors = PlayerColors::from_names(one, two);
            assert_eq!(colors, PlayerColors::default(), "{one}/{two}");
        }
    }

    #[test]
    fn test_owner() {
        let colors = PlayerColors::default();
        assert_eq!(colors.owner(PlayerColor::Black), Some(Player::One));
        assert_eq!(colors.owner(PlayerColor::White), Some(Player::Two));
        assert_eq!(colors.owner(PlayerColor::Red), None);
    }
}
