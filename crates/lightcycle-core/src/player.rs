use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two seats in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Zero-based seat index, usable for fixed-size per-player arrays.
    pub const fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub const fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::One => write!(f, "P1"),
            PlayerId::Two => write!(f, "P2"),
        }
    }
}

/// Trail color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PlayerColor {
    pub const MAGENTA: PlayerColor = PlayerColor {
        r: 0xff,
        g: 0x00,
        b: 0xff,
    };
    pub const CYAN: PlayerColor = PlayerColor {
        r: 0x00,
        g: 0xff,
        b: 0xff,
    };

    /// Default color for a seat: magenta for P1, cyan for P2.
    pub const fn for_player(player: PlayerId) -> PlayerColor {
        match player {
            PlayerId::One => Self::MAGENTA,
            PlayerId::Two => Self::CYAN,
        }
    }

    /// CSS-style `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_are_indexed_and_opposed() {
        assert_eq!(PlayerId::One.index(), 0);
        assert_eq!(PlayerId::Two.index(), 1);
        assert_eq!(PlayerId::One.opponent(), PlayerId::Two);
        assert_eq!(PlayerId::Two.opponent(), PlayerId::One);
    }

    #[test]
    fn default_colors_match_hex() {
        assert_eq!(PlayerColor::for_player(PlayerId::One).to_hex(), "#ff00ff");
        assert_eq!(PlayerColor::for_player(PlayerId::Two).to_hex(), "#00ffff");
    }
}
