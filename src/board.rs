//! Game state and move execution.
//!
//! A [`Board`] is an immutable value. [`Board::play`] and [`Board::pass`]
//! return a new board and leave the original untouched, so earlier states
//! stay valid for replay or comparison.

use std::fmt;

use tracing::{debug, info};

use crate::constants::{BOARD_CELLS, N};
use crate::error::GoError;
use crate::group::{Cells, Group, compute_group};
use crate::position::Position;
use crate::score::{Captures, Score, final_score};
use crate::stone::Stone;

/// The state shared by running and passed boards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    cells: Cells,
    /// Cells as they were before the move that produced `cells`.
    prev_cells: Cells,
    player: Stone,
    captures: Captures,
}

/// Boards compare structurally. Finished boards compare by their cells
/// only; the score is derived from them.
#[derive(Clone, Debug)]
pub enum Board {
    Running(Turn),
    /// Same as `Running`, but the previous action was a pass.
    Passed(Turn),
    Finished { cells: Cells, score: Score },
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Board::Running(a), Board::Running(b)) | (Board::Passed(a), Board::Passed(b)) => a == b,
            (Board::Finished { cells: a, .. }, Board::Finished { cells: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for Board {}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board with Black to move.
    pub fn new() -> Self {
        Board::running(Cells::new(), Cells::new(), Stone::Black, Captures::default())
    }

    pub fn running(cells: Cells, prev_cells: Cells, player: Stone, captures: Captures) -> Self {
        Board::Running(Turn::new(cells, prev_cells, player, captures))
    }

    pub fn passed(cells: Cells, prev_cells: Cells, player: Stone, captures: Captures) -> Self {
        Board::Passed(Turn::new(cells, prev_cells, player, captures))
    }

    pub fn finished(cells: Cells, score: Score) -> Self {
        Board::Finished { cells, score }
    }

    /// Place a stone for the player to move.
    ///
    /// # Errors
    /// - [`GoError::OccupiedPosition`] if `pos` already holds a stone
    /// - [`GoError::LibertyViolation`] if the new group has no liberties
    ///   after captures
    /// - [`GoError::KoViolation`] if the result repeats the board from before
    ///   the previous move
    /// - [`GoError::GameOver`] on a finished board
    pub fn play(&self, pos: Position) -> Result<Board, GoError> {
        match self {
            Board::Running(turn) | Board::Passed(turn) => turn.play(pos),
            Board::Finished { .. } => Err(GoError::GameOver),
        }
    }

    /// Pass the turn. Two passes in a row finish the game.
    ///
    /// # Errors
    /// [`GoError::GameOver`] on a finished board.
    pub fn pass(&self) -> Result<Board, GoError> {
        match self {
            Board::Running(turn) => {
                debug!(player = %turn.player, "pass");
                Ok(Board::Passed(Turn {
                    player: turn.player.opponent(),
                    ..turn.clone()
                }))
            }
            Board::Passed(turn) => {
                debug!(player = %turn.player, "second pass");
                Ok(finish(turn.cells.clone(), turn.captures))
            }
            Board::Finished { .. } => Err(GoError::GameOver),
        }
    }

    pub fn cells(&self) -> &Cells {
        match self {
            Board::Running(turn) | Board::Passed(turn) => &turn.cells,
            Board::Finished { cells, .. } => cells,
        }
    }

    pub fn turn(&self) -> Option<&Turn> {
        match self {
            Board::Running(turn) | Board::Passed(turn) => Some(turn),
            Board::Finished { .. } => None,
        }
    }

    /// The color to move, unless the game is over.
    pub fn player(&self) -> Option<Stone> {
        self.turn().map(Turn::player)
    }

    pub fn captures(&self) -> Option<Captures> {
        self.turn().map(Turn::captures)
    }

    pub fn prev_cells(&self) -> Option<&Cells> {
        self.turn().map(Turn::prev_cells)
    }

    pub fn score(&self) -> Option<Score> {
        match self {
            Board::Finished { score, .. } => Some(*score),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Board::Finished { .. })
    }

    pub fn stone_at(&self, pos: Position) -> Option<Stone> {
        self.cells().get(&pos).copied()
    }
}

impl Turn {
    pub fn new(cells: Cells, prev_cells: Cells, player: Stone, captures: Captures) -> Self {
        Turn {
            cells,
            prev_cells,
            player,
            captures,
        }
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn prev_cells(&self) -> &Cells {
        &self.prev_cells
    }

    pub fn player(&self) -> Stone {
        self.player
    }

    pub fn captures(&self) -> Captures {
        self.captures
    }

    fn play(&self, pos: Position) -> Result<Board, GoError> {
        if self.cells.contains_key(&pos) {
            return Err(GoError::OccupiedPosition(pos));
        }

        let mut cells = self.cells.update(pos, self.player);
        let group = compute_group(pos, &cells, Some(self.player));

        let captured: Vec<Group> = group
            .adjacent_groups(&cells, Some(self.player.opponent()))
            .into_iter()
            .filter(|adjacent| !adjacent.has_liberties(&cells))
            .collect();

        let mut captures = self.captures;
        for dead in &captured {
            for p in dead.positions() {
                cells.remove(&p);
            }
            captures = captures.add(self.player, dead.len() as u32);
        }

        if !group.has_liberties(&cells) {
            return Err(GoError::LibertyViolation(pos));
        }
        if cells == self.prev_cells {
            return Err(GoError::KoViolation(pos));
        }

        debug!(
            player = %self.player,
            position = %pos,
            captured = captured.iter().map(Group::len).sum::<usize>(),
            "stone placed"
        );

        if cells.len() == BOARD_CELLS {
            return Ok(finish(cells, captures));
        }
        Ok(Board::Running(Turn {
            cells,
            prev_cells: self.cells.clone(),
            player: self.player.opponent(),
            captures,
        }))
    }
}

fn finish(cells: Cells, captures: Captures) -> Board {
    let score = final_score(&cells, captures);
    info!(black = score.black, white = score.white, "game finished");
    Board::Finished { cells, score }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..N {
            write!(f, " {}", (b'A' + col as u8) as char)?;
        }
        writeln!(f)?;

        for row in 0..N {
            write!(f, "{:<2}", N - row)?;
            for col in 0..N {
                let ch = Position::at(row, col)
                    .ok()
                    .and_then(|pos| self.stone_at(pos))
                    .map_or('.', Stone::symbol);
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }

        match self {
            Board::Running(turn) => write!(
                f,
                "Turn: {} ({}) Captures: {}={} - {}={}",
                turn.player.symbol(),
                turn.player,
                Stone::Black.symbol(),
                turn.captures.black,
                Stone::White.symbol(),
                turn.captures.white,
            ),
            Board::Passed(turn) => write!(
                f,
                "Player {} Passes. Turn: {} ({})",
                turn.player.opponent().symbol(),
                turn.player.symbol(),
                turn.player,
            ),
            Board::Finished { score, .. } => write!(
                f,
                "GAME OVER   SCORE: {}={} - {}={}",
                Stone::Black.symbol(),
                score.black,
                Stone::White.symbol(),
                score.white,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::KOMI;
    use crate::score::Points;

    use Stone::{Black as B, White as W};

    fn pos(row: usize, col: usize) -> Position {
        Position::at(row, col).unwrap()
    }

    fn cells(stones: &[(usize, usize, Stone)]) -> Cells {
        stones
            .iter()
            .map(|&(row, col, stone)| (pos(row, col), stone))
            .collect()
    }

    fn running(stones: &[(usize, usize, Stone)], player: Stone) -> Board {
        Board::running(cells(stones), Cells::new(), player, Captures::default())
    }

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert!(matches!(board, Board::Running(_)));
        assert!(board.cells().is_empty());
        assert_eq!(board.prev_cells(), Some(&Cells::new()));
        assert_eq!(board.player(), Some(B));
        assert_eq!(board.captures(), Some(Captures::default()));
        assert_eq!(board.score(), None);
        assert!(!board.is_finished());
    }

    #[test]
    fn test_play_state_changes() {
        let board = Board::new();
        let after = board.play(pos(0, 0)).unwrap();
        assert!(matches!(after, Board::Running(_)));
        assert_eq!(after.player(), Some(W));
        assert_eq!(after.stone_at(pos(0, 0)), Some(B));
        assert_eq!(after.prev_cells(), Some(board.cells()));

        // The original value is unchanged.
        assert!(board.cells().is_empty());

        let passed = Board::passed(Cells::new(), Cells::new(), B, Captures::default());
        assert!(matches!(passed.play(pos(1, 2)), Ok(Board::Running(_))));
    }

    #[test]
    fn test_play_occupied() {
        let board = Board::new().play(pos(4, 4)).unwrap();
        assert_eq!(
            board.play(pos(4, 4)),
            Err(GoError::OccupiedPosition(pos(4, 4)))
        );
    }

    #[test]
    fn test_pass_state_changes() {
        let board = Board::new().play(pos(2, 2)).unwrap();

        let passed = board.pass().unwrap();
        assert!(matches!(passed, Board::Passed(_)));
        assert_eq!(passed.cells(), board.cells());
        assert_eq!(passed.prev_cells(), board.prev_cells());
        assert_eq!(passed.player(), Some(B));

        let finished = passed.pass().unwrap();
        assert!(finished.is_finished());
        assert_eq!(finished.player(), None);
        assert_eq!(finished.captures(), None);
        assert_eq!(finished.pass(), Err(GoError::GameOver));
        assert_eq!(finished.play(pos(5, 5)), Err(GoError::GameOver));
    }

    #[test]
    fn test_two_passes_score_the_board() {
        let board = Board::new().play(pos(0, 1)).unwrap();
        let finished = board.pass().unwrap().pass().unwrap();
        assert_eq!(
            finished.score(),
            Some(Points::new(0.0, (BOARD_CELLS - 1) as f64 - KOMI))
        );
    }

    #[test]
    #[rustfmt::skip]
    fn test_liberty_rule() {
        let board = running(&[(0, 1, W), (1, 0, W)], B);
        assert_eq!(
            board.play(pos(0, 0)),
            Err(GoError::LibertyViolation(pos(0, 0)))
        );

        // Filling the last liberty of an own group is suicide too.
        let board = running(
            &[
                (1, 2, W), (1, 3, W),
                (2, 1, W), (2, 2, B), (2, 3, B), (2, 4, W),
                (3, 1, W), (3, 2, B), (3, 4, W),
                (4, 2, W), (4, 3, W),
            ],
            B,
        );
        assert_eq!(
            board.play(pos(3, 3)),
            Err(GoError::LibertyViolation(pos(3, 3)))
        );
    }

    #[test]
    #[rustfmt::skip]
    fn test_capture_group() {
        let board = running(
            &[
                (1, 3, W),
                (2, 1, W), (2, 2, B), (2, 3, B), (2, 4, W),
                (3, 1, W), (3, 2, B), (3, 4, W),
                (4, 2, W), (4, 3, W),
            ],
            B,
        );
        let board = board.play(pos(3, 3)).unwrap();
        let board = board.play(pos(1, 2)).unwrap();

        assert_eq!(board.captures(), Some(Points::new(4, 0)));
        for (row, col) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
            assert_eq!(board.stone_at(pos(row, col)), None);
        }
        assert_eq!(board.cells().len(), 8);
    }

    #[test]
    fn test_capture_takes_precedence_over_suicide() {
        // Black at (0, 0) has no liberties of its own but captures (0, 1).
        let board = running(&[(0, 1, W), (1, 0, W), (0, 2, B), (1, 1, B)], B);
        let board = board.play(pos(0, 0)).unwrap();
        assert_eq!(board.stone_at(pos(0, 1)), None);
        assert_eq!(board.captures(), Some(Points::new(0, 1)));
    }

    #[test]
    #[rustfmt::skip]
    fn test_ko_rule() {
        let board = running(
            &[
                (2, 2, W), (2, 3, B),
                (3, 1, W), (3, 2, B), (3, 4, B),
                (4, 2, W), (4, 3, B),
            ],
            W,
        );

        let board = board.play(pos(3, 3)).unwrap();
        assert_eq!(board.captures(), Some(Points::new(1, 0)));
        assert_eq!(board.stone_at(pos(3, 2)), None);
        assert_eq!(board.play(pos(3, 2)), Err(GoError::KoViolation(pos(3, 2))));

        let board = board.play(pos(3, 6)).unwrap();
        let board = board.play(pos(3, 7)).unwrap();
        let board = board.play(pos(3, 2)).unwrap();

        assert_eq!(board.captures(), Some(Points::new(1, 1)));
        assert_eq!(board.stone_at(pos(3, 3)), None);
    }

    #[test]
    #[rustfmt::skip]
    fn test_multiple_captures_with_one_play() {
        let stones = [
            (0, 0, W), (0, 1, W), (0, 2, W), (0, 3, W), (0, 4, W), (0, 5, W), (0, 6, W),
            (1, 0, W), (1, 1, B), (1, 2, W), (1, 3, B), (1, 4, W), (1, 5, B), (1, 6, W),
            (2, 0, W), (2, 1, B), (2, 2, W), (2, 3, B), (2, 4, W), (2, 5, B),
            (3, 0, W), (3, 1, W), (3, 2, W), (3, 3, W), (3, 4, W), (3, 5, W), (3, 6, W),
        ];
        let board = running(&stones, W);
        let after = board.play(pos(2, 6)).unwrap();

        assert_eq!(after.captures(), Some(Points::new(6, 0)));
        for (row, col) in [(1, 1), (1, 3), (1, 5), (2, 1), (2, 3), (2, 5)] {
            assert_eq!(after.stone_at(pos(row, col)), None);
        }
        assert_eq!(after.cells().len(), stones.len() - 5);
    }

    #[test]
    fn test_filling_the_last_point_without_capture_is_suicide() {
        let last = pos(N - 1, N - 1);
        let full: Cells = Position::all()
            .filter(|&p| p != last)
            .map(|p| (p, B))
            .collect();
        let board = Board::running(full, Cells::new(), B, Captures::default());
        assert_eq!(board.play(last), Err(GoError::LibertyViolation(last)));
    }

    #[test]
    fn test_structural_equality() {
        let a = Board::new().play(pos(3, 3)).unwrap();
        let b = Board::new().play(pos(3, 3)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Board::new().play(pos(3, 4)).unwrap());
        assert_ne!(a, a.pass().unwrap());
    }

    #[test]
    fn test_finished_equality_ignores_score() {
        let cells: Cells = [(pos(0, 0), B)].into_iter().collect();
        let a = Board::finished(cells.clone(), Points::new(0.0, 1.5));
        let b = Board::finished(cells, Points::new(2.0, -3.5));
        assert_eq!(a, b);
        assert_ne!(a, Board::finished(Cells::new(), Points::new(0.0, 1.5)));
        assert_ne!(a, Board::new());
    }

    #[test]
    fn test_display() {
        let board = Board::new().play(pos(0, 0)).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), N + 2);
        assert!(lines[0].starts_with("   A B C"));
        assert!(lines[1].starts_with(&format!("{:<2} # .", N)));
        assert_eq!(lines[N + 1], "Turn: O (WHITE) Captures: #=0 - O=0");

        let passed = board.pass().unwrap().to_string();
        assert!(passed.ends_with("Player O Passes. Turn: # (BLACK)"));
    }
}
