//! Two-player sessions over shared storage.
//!
//! A [`Clash`] is a plain value: every operation returns the next clash and
//! writes the resulting board to storage. One side starts a game under a name
//! and plays Black; the other joins it and plays White. A waiting side polls
//! the stored game with [`Clash::refresh`] or, in the background, with
//! [`Clash::watch`].

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::board::Board;
use crate::constants::POLL_INTERVAL;
use crate::error::GoError;
use crate::position::Position;
use crate::stone::Stone;
use crate::storage::Storage;

#[derive(Debug, Error)]
pub enum ClashError {
    #[error("clash not started")]
    NotStarted,
    #[error("not your turn")]
    NotYourTurn,
    #[error("clash {0} not found")]
    NotFound(String),
    #[error("game deleted")]
    GameDeleted,
    #[error("no changes")]
    NoChanges,
    #[error("stopped waiting for the other player")]
    Cancelled,
    #[error(transparent)]
    Rules(#[from] GoError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Clone)]
pub enum Clash {
    Idle { storage: Arc<dyn Storage> },
    Running(ClashRun),
}

/// A clash with a game in progress.
#[derive(Clone)]
pub struct ClashRun {
    storage: Arc<dyn Storage>,
    id: String,
    me: Stone,
    game: Board,
}

impl Clash {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Clash::Idle { storage }
    }

    fn storage(&self) -> &Arc<dyn Storage> {
        match self {
            Clash::Idle { storage } => storage,
            Clash::Running(run) => &run.storage,
        }
    }

    fn running(&self) -> Result<&ClashRun, ClashError> {
        match self {
            Clash::Running(run) => Ok(run),
            Clash::Idle { .. } => Err(ClashError::NotStarted),
        }
    }

    pub fn game(&self) -> Option<&Board> {
        self.running().ok().map(|run| &run.game)
    }

    pub fn me(&self) -> Option<Stone> {
        self.running().ok().map(|run| run.me)
    }

    pub fn id(&self) -> Option<&str> {
        self.running().ok().map(|run| run.id.as_str())
    }

    /// Store a new game under `name` and play it as Black.
    pub fn start(&self, name: &str) -> Result<Clash, ClashError> {
        let game = Board::new();
        self.storage().create(name, &game)?;
        debug!(clash = name, "started");
        Ok(self.enter(name, Stone::Black, game))
    }

    /// Join the game stored under `name` as White.
    pub fn join(&self, name: &str) -> Result<Clash, ClashError> {
        let game = self
            .storage()
            .read(name)?
            .ok_or_else(|| ClashError::NotFound(name.to_string()))?;
        debug!(clash = name, "joined");
        Ok(self.enter(name, Stone::White, game))
    }

    fn enter(&self, name: &str, me: Stone, game: Board) -> Clash {
        Clash::Running(ClashRun {
            storage: Arc::clone(self.storage()),
            id: name.to_string(),
            me,
            game,
        })
    }

    pub fn play(&self, pos: Position) -> Result<Clash, ClashError> {
        self.advance(|game| game.play(pos))
    }

    pub fn pass(&self) -> Result<Clash, ClashError> {
        self.advance(Board::pass)
    }

    fn advance(
        &self,
        action: impl FnOnce(&Board) -> Result<Board, GoError>,
    ) -> Result<Clash, ClashError> {
        let run = self.running()?;
        if run.game.player().is_some_and(|player| player != run.me) {
            return Err(ClashError::NotYourTurn);
        }
        let game = action(&run.game)?;
        run.storage.update(&run.id, &game)?;
        Ok(run.with_game(game))
    }

    /// Re-read the stored game.
    ///
    /// # Errors
    /// [`ClashError::NoChanges`] if it equals the game this clash holds and
    /// [`ClashError::GameDeleted`] if it no longer exists.
    pub fn refresh(&self) -> Result<Clash, ClashError> {
        let run = self.running()?;
        let game = run.storage.read(&run.id)?.ok_or(ClashError::GameDeleted)?;
        if game == run.game {
            return Err(ClashError::NoChanges);
        }
        debug!(clash = %run.id, "game changed");
        Ok(run.with_game(game))
    }

    /// Poll the stored game every `interval` on a background thread until it
    /// changes, is deleted or the watch is cancelled.
    ///
    /// Storage failures are logged and polling continues.
    pub fn watch(&self, interval: Duration) -> Result<ClashWatch, ClashError> {
        self.running()?;
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let clash = self.clone();

        let handle = thread::spawn(move || {
            loop {
                thread::park_timeout(interval);
                if flag.load(Ordering::Acquire) {
                    return Err(ClashError::Cancelled);
                }
                match clash.refresh() {
                    Err(ClashError::NoChanges) => trace!("no changes"),
                    Err(ClashError::Storage(err)) => warn!("reading clash failed: {err:#}"),
                    other => return other,
                }
            }
        });

        Ok(ClashWatch { cancelled, handle })
    }

    /// [`Clash::watch`] at the default polling rate.
    pub fn wait(&self) -> Result<ClashWatch, ClashError> {
        self.watch(POLL_INTERVAL)
    }

    /// Replace a game with a fresh board.
    pub fn new_board(&self) -> Result<Clash, ClashError> {
        let run = self.running()?;
        let game = Board::new();
        run.storage.update(&run.id, &game)?;
        Ok(run.with_game(game))
    }

    pub fn can_new_board(&self) -> bool {
        self.game().is_some_and(Board::is_finished)
    }

    /// Remove the stored game if this side started it.
    pub fn delete_if_owner(&self) -> Result<(), ClashError> {
        if let Clash::Running(run) = self {
            if run.me == Stone::Black {
                run.storage.delete(&run.id)?;
            }
        }
        Ok(())
    }
}

impl ClashRun {
    fn with_game(&self, game: Board) -> Clash {
        Clash::Running(ClashRun {
            game,
            ..self.clone()
        })
    }
}

impl fmt::Debug for Clash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clash::Idle { .. } => f.write_str("Clash::Idle"),
            Clash::Running(run) => f
                .debug_struct("Clash::Running")
                .field("id", &run.id)
                .field("me", &run.me)
                .field("game", &run.game)
                .finish(),
        }
    }
}

/// Handle to a background [`Clash::watch`].
pub struct ClashWatch {
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<Result<Clash, ClashError>>,
}

impl ClashWatch {
    /// Stop polling. [`ClashWatch::join`] then returns
    /// [`ClashError::Cancelled`] unless a change was already seen.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.handle.thread().unpark();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the watch to end.
    pub fn join(self) -> Result<Clash, ClashError> {
        self.handle
            .join()
            .map_err(|_| ClashError::Storage(anyhow::anyhow!("clash watcher panicked")))?
    }
}
