use std::fmt;
use std::str::FromStr;

use crate::error::ParseStoneError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// Character used when drawing the board.
    pub fn symbol(self) -> char {
        match self {
            Stone::Black => '#',
            Stone::White => 'O',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stone::Black => "BLACK",
            Stone::White => "WHITE",
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stone {
    type Err = ParseStoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("black") {
            Ok(Stone::Black)
        } else if s.eq_ignore_ascii_case("white") {
            Ok(Stone::White)
        } else {
            Err(ParseStoneError(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involutive() {
        for stone in [Stone::Black, Stone::White] {
            assert_ne!(stone.opponent(), stone);
            assert_eq!(stone.opponent().opponent(), stone);
        }
    }

    #[test]
    fn test_name_roundtrip() {
        assert_eq!(Stone::Black.to_string(), "BLACK");
        assert_eq!("WHITE".parse::<Stone>(), Ok(Stone::White));
        assert_eq!("black".parse::<Stone>(), Ok(Stone::Black));
        assert!("GREY".parse::<Stone>().is_err());
    }
}
