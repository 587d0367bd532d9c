//! Line-oriented text interface.
//!
//! ## Supported Commands
//!
//! - `PLAY <position>` - Place a stone for the player to move (e.g. `PLAY C3`)
//! - `PASS` - Pass the turn; two passes in a row end the game
//! - `NEW` - Start over with an empty board
//! - `SAVE <name>` - Store the current game under a name
//! - `LOAD <name>` - Replace the current game with a stored one
//! - `EXIT` - Leave the loop
//!
//! Command names are case-insensitive. After each successful command the
//! board is printed; a failed command prints an error and leaves the game as
//! it was.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::warn;

use crate::board::Board;
use crate::position::Position;
use crate::storage::Storage;

/// The list of known commands.
pub const KNOWN_COMMANDS: &[&str] = &["EXIT", "LOAD", "NEW", "PASS", "PLAY", "SAVE"];

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// A local game and the storage used by `SAVE` and `LOAD`.
pub struct Session {
    board: Board,
    storage: Arc<dyn Storage>,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            board: Board::new(),
            storage,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the command loop until `EXIT` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        writeln!(output, "{}", self.board)?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line.context("reading command")?;
            let Some((command, args)) = parse_line(&line) else {
                write!(output, "> ")?;
                output.flush()?;
                continue;
            };

            match self.execute(&command, &args) {
                Ok(Outcome::Exit) => return Ok(()),
                Ok(Outcome::Continue) => writeln!(output, "{}", self.board)?,
                Err(err) => {
                    warn!(command = %command, "command failed: {err:#}");
                    writeln!(output, "Error: {err:#}")?;
                }
            }
            write!(output, "> ")?;
            output.flush()?;
        }
        Ok(())
    }

    /// Execute one command.
    pub fn execute(&mut self, command: &str, args: &[&str]) -> Result<Outcome> {
        match command {
            "PLAY" => {
                let Some(arg) = args.first() else {
                    bail!("Missing position");
                };
                let pos: Position = arg.parse()?;
                self.board = self.board.play(pos)?;
            }
            "PASS" => self.board = self.board.pass()?,
            "NEW" => self.board = Board::new(),
            "SAVE" => {
                let name = name_arg(args)?;
                if self.storage.read(name)?.is_some() {
                    self.storage.update(name, &self.board)?;
                } else {
                    self.storage.create(name, &self.board)?;
                }
            }
            "LOAD" => {
                let name = name_arg(args)?;
                self.board = self
                    .storage
                    .read(name)?
                    .with_context(|| format!("Game {name} not found"))?;
            }
            "EXIT" => return Ok(Outcome::Exit),
            _ => bail!(
                "Invalid command {command} (expected one of {})",
                KNOWN_COMMANDS.join(", ")
            ),
        }
        Ok(Outcome::Continue)
    }
}

/// Split a line into an upper-cased command name and its arguments.
fn parse_line(line: &str) -> Option<(String, Vec<&str>)> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?.to_uppercase();
    Some((command, parts.collect()))
}

fn name_arg<'a>(args: &[&'a str]) -> Result<&'a str> {
    match args.first() {
        Some(&name) => Ok(name),
        None => bail!("Missing name"),
    }
}
