//! Go-Rules: the rules of the board game Go.
//!
//! This crate validates and resolves moves (captures, the liberty rule and
//! the ko rule), tracks passes and the end of the game, and scores finished
//! games by territory and captures.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimension (selected by Cargo feature) and komi
//! - [`position`] - Board coordinates and neighbors
//! - [`stone`] - Stone colors
//! - [`group`] - Connected groups and liberties
//! - [`board`] - Immutable game state and move execution
//! - [`score`] - Territory scoring
//! - [`error`] - Rule violations
//! - [`storage`] - Text serialization and game storage
//! - [`clash`] - Two-player sessions over shared storage
//! - [`cli`] - Line-oriented text interface
//! - [`playout`] - Random self-play
//!
//! ## Example
//!
//! ```
//! use go_rules::board::Board;
//! use go_rules::position::Position;
//!
//! // Create a new game
//! let board = Board::new();
//!
//! // Play a move; the old board is left untouched
//! let after = board.play("C3".parse::<Position>()?)?;
//! assert!(board.cells().is_empty());
//! assert_eq!(after.cells().len(), 1);
//!
//! // Two passes end the game
//! let finished = after.pass()?.pass()?;
//! println!("{finished}");
//! # Ok::<(), go_rules::error::GoError>(())
//! ```

pub mod board;
pub mod clash;
pub mod cli;
pub mod constants;
pub mod error;
pub mod group;
pub mod playout;
pub mod position;
pub mod score;
pub mod stone;
pub mod storage;
