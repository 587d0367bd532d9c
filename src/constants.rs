//! Board dimensions, komi and other fixed parameters.
//!
//! # Board Size Configuration
//!
//! The board size is controlled by Cargo features:
//! - `board9x9` (default): 9x9 board, komi 3.5
//! - `board13x13`: 13x13 board, komi 4.5
//! - `board19x19`: 19x19 board, komi 5.5
//!
//! To compile for a specific board size:
//! ```sh
//! cargo build                                               # 9x9 (default)
//! cargo build --no-default-features --features board13x13   # 13x13
//! cargo build --no-default-features --features board19x19   # 19x19
//! ```

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// The supported board dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoardDimension {
    Small,
    Medium,
    Large,
}

impl BoardDimension {
    /// Number of rows (and columns).
    pub const fn size(self) -> usize {
        match self {
            BoardDimension::Small => 9,
            BoardDimension::Medium => 13,
            BoardDimension::Large => 19,
        }
    }

    /// Compensation subtracted from Black's final score.
    pub const fn komi(self) -> f64 {
        match self {
            BoardDimension::Small => 3.5,
            BoardDimension::Medium => 4.5,
            BoardDimension::Large => 5.5,
        }
    }
}

#[cfg(feature = "board9x9")]
pub const BOARD_DIM: BoardDimension = BoardDimension::Small;

#[cfg(feature = "board13x13")]
pub const BOARD_DIM: BoardDimension = BoardDimension::Medium;

#[cfg(feature = "board19x19")]
pub const BOARD_DIM: BoardDimension = BoardDimension::Large;

// Compile-time check: exactly one board size feature must be enabled
#[cfg(any(
    all(feature = "board9x9", feature = "board13x13"),
    all(feature = "board9x9", feature = "board19x19"),
    all(feature = "board13x13", feature = "board19x19"),
))]
compile_error!("Enable only one of the 'board9x9', 'board13x13' and 'board19x19' features");

#[cfg(not(any(feature = "board9x9", feature = "board13x13", feature = "board19x19")))]
compile_error!(
    "Must enable exactly one board size feature: 'board9x9', 'board13x13' or 'board19x19'"
);

/// Board size (NxN).
pub const N: usize = BOARD_DIM.size();

/// Total number of points on the board.
pub const BOARD_CELLS: usize = N * N;

/// Komi for the active board dimension.
pub const KOMI: f64 = BOARD_DIM.komi();

/// Row/column offsets to the orthogonal neighbors.
/// Order: Up, Down, Left, Right
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

// =============================================================================
// Sessions
// =============================================================================

/// How often a waiting clash re-reads the shared game.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Move budget for a self-play demo game before both sides start passing.
pub const DEMO_MAX_MOVES: usize = BOARD_CELLS * 3;
