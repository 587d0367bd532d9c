//! Text persistence for boards.
//!
//! A board is written as newline-separated fields:
//!
//! ```text
//! Run                   <- or "Pass"
//! 0:BLACK 12:WHITE      <- cells, "index:COLOR" in index order
//! 0:BLACK               <- cells before the last move
//! WHITE                 <- player to move
//! 0 0                   <- captures, white then black
//! ```
//!
//! A finished board is `Finish`, the cells line and the two scores (white
//! then black).

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result, anyhow, bail, ensure};

use crate::board::Board;
use crate::group::Cells;
use crate::position::Position;
use crate::score::Points;
use crate::stone::Stone;

/// Converts values to and from text.
pub trait Serializer<T> {
    fn serialize(&self, data: &T) -> String;
    fn deserialize(&self, text: &str) -> Result<T>;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct BoardSerializer;

impl Serializer<Board> for BoardSerializer {
    fn serialize(&self, data: &Board) -> String {
        match data {
            Board::Running(turn) | Board::Passed(turn) => {
                let header = if matches!(data, Board::Passed(_)) { "Pass" } else { "Run" };
                let captures = turn.captures();
                format!(
                    "{header}\n{}\n{}\n{}\n{} {}",
                    cells_line(turn.cells()),
                    cells_line(turn.prev_cells()),
                    turn.player(),
                    captures.white,
                    captures.black,
                )
            }
            Board::Finished { cells, score } => format!(
                "Finish\n{}\n{:?} {:?}",
                cells_line(cells),
                score.white,
                score.black
            ),
        }
    }

    fn deserialize(&self, text: &str) -> Result<Board> {
        let lines: Vec<&str> = text.trim_end().split('\n').map(str::trim).collect();
        let line = |i: usize| field(&lines, i);

        let header = line(0)?;
        let cells = parse_cells(line(1)?)?;
        match header {
            "Run" | "Pass" => {
                let prev_cells = parse_cells(line(2)?)?;
                let player: Stone = line(3)?.parse()?;
                let (white, black) = parse_pair::<u32>(line(4)?).context("invalid captures")?;
                let captures = Points::new(white, black);
                Ok(if header == "Run" {
                    Board::running(cells, prev_cells, player, captures)
                } else {
                    Board::passed(cells, prev_cells, player, captures)
                })
            }
            "Finish" => {
                let (white, black) = parse_pair::<f64>(line(2)?).context("invalid score")?;
                Ok(Board::finished(cells, Points::new(white, black)))
            }
            other => bail!("invalid board type {other:?}"),
        }
    }
}

fn field<'a>(lines: &[&'a str], i: usize) -> Result<&'a str> {
    lines
        .get(i)
        .copied()
        .with_context(|| format!("missing line {} in board text", i + 1))
}

fn cells_line(cells: &Cells) -> String {
    cells
        .iter()
        .map(|(pos, stone)| format!("{}:{stone}", pos.index()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_cells(line: &str) -> Result<Cells> {
    let mut cells = Cells::new();
    for entry in line.split_whitespace() {
        let (index, stone) = entry
            .split_once(':')
            .with_context(|| format!("invalid cell {entry:?}"))?;
        let index: usize = index
            .parse()
            .with_context(|| format!("invalid cell index in {entry:?}"))?;
        let pos = Position::new(index)?;
        ensure!(!cells.contains_key(&pos), "cell {index} listed twice");
        cells.insert(pos, stone.parse()?);
    }
    Ok(cells)
}

fn parse_pair<T: std::str::FromStr>(line: &str) -> Result<(T, T)> {
    let mut parts = line.split_whitespace().map(str::parse::<T>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(first)), Some(Ok(second)), None) => Ok((first, second)),
        _ => Err(anyhow!("expected two numbers, got {line:?}")),
    }
}

/// Keyed storage of games.
pub trait Storage: Send + Sync {
    /// Store a new game. Fails if `key` is already taken.
    fn create(&self, key: &str, board: &Board) -> Result<()>;
    /// The stored game, or `None` if there is none under `key`.
    fn read(&self, key: &str) -> Result<Option<Board>>;
    fn update(&self, key: &str, board: &Board) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

/// One `<key>.txt` file per game inside a directory.
#[derive(Clone, Debug)]
pub struct TextFileStorage {
    dir: PathBuf,
    serializer: BoardSerializer,
}

impl TextFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            serializer: BoardSerializer,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        ensure!(
            !key.is_empty() && !key.contains(['/', '\\']) && key != "." && key != "..",
            "invalid game name {key:?}"
        );
        Ok(self.dir.join(format!("{key}.txt")))
    }

    /// Replace the file in one step: readers see the old board or the new
    /// one, never a partial write.
    fn write(&self, key: &str, board: &Board) -> Result<()> {
        static NEXT_TMP: AtomicU64 = AtomicU64::new(0);

        let path = self.path(key)?;
        self.create_dir()?;
        let tmp = self.dir.join(format!(
            "{key}.txt.{}-{}.tmp",
            std::process::id(),
            NEXT_TMP.fetch_add(1, Ordering::Relaxed)
        ));
        fs::write(&tmp, self.serializer.serialize(board))
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))
    }

    fn create_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))
    }
}

impl Storage for TextFileStorage {
    fn create(&self, key: &str, board: &Board) -> Result<()> {
        let path = self.path(key)?;
        self.create_dir()?;
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                bail!("game {key} already exists")
            }
            Err(err) => {
                return Err(err).with_context(|| format!("creating {}", path.display()));
            }
        };
        file.write_all(self.serializer.serialize(board).as_bytes())
            .with_context(|| format!("writing {}", path.display()))
    }

    fn read(&self, key: &str) -> Result<Option<Board>> {
        let path = self.path(key)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err).with_context(|| format!("reading {}", path.display())),
        };
        let board = self
            .serializer
            .deserialize(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(board))
    }

    fn update(&self, key: &str, board: &Board) -> Result<()> {
        self.write(key, board)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path(key)?;
        match fs::remove_file(&path) {
            Err(err) if err.kind() != ErrorKind::NotFound => {
                Err(err).with_context(|| format!("deleting {}", path.display()))
            }
            _ => Ok(()),
        }
    }
}

/// Serialized games held in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    games: Mutex<HashMap<String, String>>,
    serializer: BoardSerializer,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn games(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.games
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))
    }
}

impl Storage for MemoryStorage {
    fn create(&self, key: &str, board: &Board) -> Result<()> {
        let mut games = self.games()?;
        ensure!(!games.contains_key(key), "game {key} already exists");
        games.insert(key.to_string(), self.serializer.serialize(board));
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<Board>> {
        let games = self.games()?;
        games
            .get(key)
            .map(|text| self.serializer.deserialize(text))
            .transpose()
    }

    fn update(&self, key: &str, board: &Board) -> Result<()> {
        self.games()?
            .insert(key.to_string(), self.serializer.serialize(board));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.games()?.remove(key);
        Ok(())
    }
}
