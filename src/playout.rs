//! Random self-play.
//!
//! Plays uniformly random legal moves until the game finishes. Used by the
//! demo and by tests that check invariants over many reachable boards.

use crate::board::Board;
use crate::position::Position;

/// Play a random game from the empty board.
///
/// A side passes when it has no legal move other than filling one of its own
/// single-point eyes. After `max_moves` actions both sides pass. Returns every
/// board of the game, starting with the empty one and ending with the
/// finished one.
pub fn random_game(rng: &mut fastrand::Rng, max_moves: usize) -> Vec<Board> {
    let mut history = vec![Board::new()];

    while let Some(board) = history.last() {
        if board.is_finished() {
            break;
        }
        let next = if history.len() > max_moves {
            board.pass()
        } else {
            match random_move(rng, board) {
                Some(next) => Ok(next),
                None => board.pass(),
            }
        };
        match next {
            Ok(next) => history.push(next),
            Err(_) => break,
        }
    }
    history
}

/// Play a random legal move, if there is one.
pub fn random_move(rng: &mut fastrand::Rng, board: &Board) -> Option<Board> {
    let player = board.player()?;
    let cells = board.cells();

    let mut candidates: Vec<Position> = Position::all()
        .filter(|p| !cells.contains_key(p))
        // Never fill a point whose neighbors are all own stones.
        .filter(|p| !p.adjacents().all(|adj| cells.get(&adj) == Some(&player)))
        .collect();
    rng.shuffle(&mut candidates);

    candidates.into_iter().find_map(|p| board.play(p).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEMO_MAX_MOVES;

    #[test]
    fn test_random_game_finishes() {
        let mut rng = fastrand::Rng::with_seed(7);
        let history = random_game(&mut rng, DEMO_MAX_MOVES);

        assert_eq!(history.first(), Some(&Board::new()));
        let last = history.last().unwrap();
        assert!(last.is_finished());
        assert!(last.score().is_some());
        assert!(history[..history.len() - 1].iter().all(|b| !b.is_finished()));
    }

    #[test]
    fn test_random_game_is_reproducible() {
        let a = random_game(&mut fastrand::Rng::with_seed(42), 60);
        let b = random_game(&mut fastrand::Rng::with_seed(42), 60);
        assert_eq!(a, b);
    }

    #[test]
    fn test_move_budget_forces_passes() {
        let history = random_game(&mut fastrand::Rng::with_seed(1), 10);
        // The empty board, 10 actions, then at most two passes.
        assert!(history.len() <= 13);
        assert!(history.last().unwrap().is_finished());
    }

    #[test]
    fn test_no_move_on_finished_board() {
        let finished = Board::new().pass().unwrap().pass().unwrap();
        assert!(random_move(&mut fastrand::Rng::with_seed(3), &finished).is_none());
    }
}
