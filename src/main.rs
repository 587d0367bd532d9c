//! Go-Rules: play Go in the terminal.
//!
//! ## Usage
//!
//! - `go-rules` - Start the interactive command loop
//! - `go-rules play --games-dir saves` - Same, storing games under `saves/`
//! - `go-rules demo --seed 42` - Play and print a random game
//!
//! Set `RUST_LOG=debug` to trace every move.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use go_rules::cli::Session;
use go_rules::constants::{BOARD_DIM, DEMO_MAX_MOVES};
use go_rules::playout::random_game;
use go_rules::storage::TextFileStorage;

/// Go-Rules: the board game Go in a terminal
#[derive(Parser)]
#[command(name = "go-rules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory where SAVE and LOAD keep games
    #[arg(long, global = true, default_value = "games")]
    games_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively (PLAY, PASS, NEW, SAVE, LOAD, EXIT)
    Play,
    /// Play a random game and print the result
    Demo {
        /// Seed for a reproducible game
        #[arg(long)]
        seed: Option<u64>,
        /// Moves before both sides start passing
        #[arg(long, default_value_t = DEMO_MAX_MOVES)]
        max_moves: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play) | None => {
            let storage = Arc::new(TextFileStorage::new(cli.games_dir));
            let mut session = Session::new(storage);
            session.run(io::stdin().lock(), &mut io::stdout())
        }
        Some(Commands::Demo { seed, max_moves }) => {
            run_demo(seed, max_moves);
            Ok(())
        }
    }
}

fn run_demo(seed: Option<u64>, max_moves: usize) {
    println!("Go-Rules: random game on a {0}x{0} board\n", BOARD_DIM.size());

    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let history = random_game(&mut rng, max_moves);

    if let Some(last) = history.last() {
        println!("{last}");
    }
    println!("Actions played: {}", history.len() - 1);
}
