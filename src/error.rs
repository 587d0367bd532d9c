//! Errors returned by the rules engine.
//!
//! Every variant is a recoverable validation failure. The board the caller
//! held before the failing call is left untouched.

use thiserror::Error;

use crate::position::Position;

/// Reasons a move, a pass or a coordinate can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoError {
    /// Index, row/column or coordinate text outside the board.
    #[error("invalid position {0}")]
    InvalidPosition(String),

    /// The target point already holds a stone.
    #[error("position {0} is already occupied")]
    OccupiedPosition(Position),

    /// The move would leave its own group without liberties.
    #[error("position {0} is not valid (liberty rule)")]
    LibertyViolation(Position),

    /// The move would recreate the board from before the previous move.
    #[error("position {0} is not valid (ko rule)")]
    KoViolation(Position),

    #[error("game over")]
    GameOver,
}

/// Failure to read a stone color from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stone {0:?}")]
pub struct ParseStoneError(pub String);
