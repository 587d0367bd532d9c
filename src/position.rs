//! Grid addressing.
//!
//! A [`Position`] is a linear index into the `N x N` board, counted row by
//! row from the top-left corner. Human coordinates use a column letter
//! (`A` for the leftmost column) followed by a row number counted from the
//! bottom row (`1`) up to the top row (`N`), so on a 9x9 board `A9` is index
//! 0 and `I1` is index 80.

use std::fmt;
use std::str::FromStr;

use crate::constants::{BOARD_CELLS, DIRECTIONS, N};
use crate::error::GoError;

/// A point on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(usize);

impl Position {
    /// Create a position from its linear index.
    ///
    /// # Errors
    /// [`GoError::InvalidPosition`] if `index` is not below `N * N`.
    pub fn new(index: usize) -> Result<Self, GoError> {
        if index < BOARD_CELLS {
            Ok(Position(index))
        } else {
            Err(GoError::InvalidPosition(index.to_string()))
        }
    }

    /// Create a position from zero-based row and column.
    ///
    /// # Errors
    /// [`GoError::InvalidPosition`] if either coordinate is not below `N`.
    pub fn at(row: usize, col: usize) -> Result<Self, GoError> {
        if row < N && col < N {
            Ok(Position(row * N + col))
        } else {
            Err(GoError::InvalidPosition(format!("({row}, {col})")))
        }
    }

    /// Every position on the board, in index order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_CELLS).map(Position)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    #[inline]
    pub fn row(self) -> usize {
        self.0 / N
    }

    #[inline]
    pub fn col(self) -> usize {
        self.0 % N
    }

    /// The neighbor one step away in direction `(drow, dcol)`, if on the board.
    fn offset(self, (drow, dcol): (isize, isize)) -> Option<Position> {
        let row = self.row().checked_add_signed(drow)?;
        let col = self.col().checked_add_signed(dcol)?;
        (row < N && col < N).then(|| Position(row * N + col))
    }

    /// The orthogonal neighbors that lie on the board: 2 in a corner, 3 on an
    /// edge and 4 elsewhere.
    pub fn adjacents(self) -> impl Iterator<Item = Position> {
        DIRECTIONS.into_iter().filter_map(move |d| self.offset(d))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (b'A' + self.col() as u8) as char;
        write!(f, "{letter}{}", N - self.row())
    }
}

impl FromStr for Position {
    type Err = GoError;

    /// Parse a coordinate such as `"C7"` (or `"c7"`).
    ///
    /// Row numbers have one digit on boards up to 9x9 and one or two digits
    /// on larger boards.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GoError::InvalidPosition(s.to_string());

        let mut chars = s.chars();
        let letter = chars
            .next()
            .filter(char::is_ascii_alphabetic)
            .ok_or_else(invalid)?;

        let digits = chars.as_str();
        let max_digits = if N <= 9 { 1 } else { 2 };
        if digits.is_empty()
            || digits.len() > max_digits
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let number: usize = digits.parse().map_err(|_| invalid())?;
        if number == 0 || number > N {
            return Err(invalid());
        }

        let col = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
        Position::at(N - number, col).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::at(row, col).unwrap()
    }

    #[test]
    fn test_new_by_index() {
        let p = Position::new(0).unwrap();
        assert_eq!((p.index(), p.row(), p.col()), (0, 0, 0));

        let last = Position::new(BOARD_CELLS - 1).unwrap();
        assert_eq!((last.row(), last.col()), (N - 1, N - 1));

        assert!(matches!(
            Position::new(BOARD_CELLS),
            Err(GoError::InvalidPosition(_))
        ));
    }

    #[test]
    fn test_new_by_row_col() {
        let p = pos(1, 2);
        assert_eq!(p.index(), N + 2);
        assert_eq!(p.row(), 1);
        assert_eq!(p.col(), 2);

        assert!(Position::at(3, N).is_err());
        assert!(Position::at(N, 3).is_err());
    }

    #[test]
    fn test_adjacents_interior() {
        let adj: Vec<_> = pos(1, 1).adjacents().collect();
        assert_eq!(adj, vec![pos(0, 1), pos(2, 1), pos(1, 0), pos(1, 2)]);
    }

    #[test]
    fn test_adjacents_corner() {
        let adj: Vec<_> = pos(0, 0).adjacents().collect();
        assert_eq!(adj, vec![pos(1, 0), pos(0, 1)]);

        let adj: Vec<_> = pos(N - 1, N - 1).adjacents().collect();
        assert_eq!(adj.len(), 2);
    }

    #[test]
    fn test_adjacents_edge() {
        let adj: Vec<_> = pos(0, 4).adjacents().collect();
        assert_eq!(adj.len(), 3);
        assert!(adj.contains(&pos(1, 4)));
        assert!(adj.contains(&pos(0, 3)));
        assert!(adj.contains(&pos(0, 5)));
    }

    #[test]
    fn test_display() {
        assert_eq!(pos(0, 0).to_string(), format!("A{N}"));
        assert_eq!(pos(N - 1, 0).to_string(), "A1");
        assert_eq!(pos(N - 3, 2).to_string(), "C3");
    }

    #[test]
    fn test_parse() {
        assert_eq!("C3".parse::<Position>(), Ok(pos(N - 3, 2)));
        assert_eq!("c3".parse::<Position>(), Ok(pos(N - 3, 2)));
        assert_eq!(format!("A{N}").parse::<Position>(), Ok(pos(0, 0)));
    }

    #[test]
    fn test_parse_display_every_position() {
        for p in Position::all() {
            assert_eq!(p.to_string().parse::<Position>(), Ok(p));
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let too_high = format!("A{}", N + 1);
        for bad in ["", "A", "3A", "AA", "A0", "Z1", "A-1", "A1x", "A123", too_high.as_str()] {
            assert!(
                matches!(bad.parse::<Position>(), Err(GoError::InvalidPosition(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
