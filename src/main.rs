//! Hex-MC: play Hex against a flat Monte Carlo engine.
//!
//! ## Usage
//!
//! - `hex-mc` - Play against the engine, prompting for size and color
//! - `hex-mc play --size 7 --color red` - Skip the prompts
//! - `hex-mc selfplay` - Watch the engine play itself
//!
//! `-v` logs a summary of each engine move, `-vv` adds every candidate.
//! `RUST_LOG` overrides both.

use std::io;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use hex_mc::board::{Board, Color};
use hex_mc::constants::{DEFAULT_DIM, TRIALS_PER_CANDIDATE};
use hex_mc::game::{Session, parse_color};
use hex_mc::selector::{MoveSelector, SearchConfig};

/// Hex-MC: a Hex engine using flat Monte Carlo playouts
#[derive(Parser)]
#[command(name = "hex-mc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine on the terminal
    Play {
        /// Board size; asked interactively when omitted
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        size: Option<u16>,
        /// Your color, `b` or `r` (blue moves first); asked when omitted
        #[arg(long, value_parser = parse_color)]
        color: Option<Color>,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Let the engine play both sides
    Selfplay {
        /// Board size
        #[arg(long, default_value_t = DEFAULT_DIM as u16, value_parser = clap::value_parser!(u16).range(1..))]
        size: u16,
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args, Clone)]
struct SearchArgs {
    /// Playouts per candidate move
    #[arg(long, default_value_t = TRIALS_PER_CANDIDATE, value_parser = clap::value_parser!(u32).range(1..))]
    trials: u32,
    /// Seed for reproducible engine moves
    #[arg(long)]
    seed: Option<u64>,
    /// Evaluate candidates on a single thread
    #[arg(long)]
    serial: bool,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            trials_per_candidate: self.trials,
            parallel: !self.serial && SearchConfig::default().parallel,
            seed: self.seed,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout());

    let command = cli.command.unwrap_or(Commands::Play {
        size: None,
        color: None,
        search: SearchArgs {
            trials: TRIALS_PER_CANDIDATE,
            seed: None,
            serial: false,
        },
    });

    match command {
        Commands::Play {
            size,
            color,
            search,
        } => run_play(&mut session, size, color, &search),
        Commands::Selfplay { size, search } => {
            let mut board = Board::try_new(size.into())?;
            let mut selector = MoveSelector::new(search.config());
            session.self_play(&mut board, &mut selector)?;
            Ok(())
        }
    }
}

fn run_play<R: io::BufRead, W: io::Write>(
    session: &mut Session<R, W>,
    size: Option<u16>,
    color: Option<Color>,
    search: &SearchArgs,
) -> Result<()> {
    session.banner()?;
    let dim = match size {
        Some(size) => usize::from(size),
        None => session.ask_size()?,
    };
    let human = match color {
        Some(color) => color,
        None => session.ask_color()?,
    };

    let mut board = Board::try_new(dim).context("cannot set up the board")?;
    let mut selector = MoveSelector::new(search.config());
    session.play(&mut board, human, &mut selector)?;
    Ok(())
}
