//! Morris: best-move search for a three-phase mill game.
//!
//! ## Usage
//!
//! - `morris opening <INPUT> <OUTPUT> <DEPTH>` - Placement move for White
//! - `morris opening-improved <INPUT> <OUTPUT> <DEPTH>` - Same, with the mill-aware evaluator
//! - `morris game <INPUT> <OUTPUT> <DEPTH>` - Sliding/flying move for Black
//! - `morris game-ab <INPUT> <OUTPUT> <DEPTH>` - Same, with alpha-beta pruning
//! - `morris search ...` - Any combination of the above
//! - `morris compare` - Node counts of minimax against alpha-beta

use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::{Args, Parser, Subcommand};
use log::info;

use morris_engine::board::{Board, Color};
use morris_engine::eval::Heuristic;
use morris_engine::io::{Report, read_board, write_board};
use morris_engine::movegen::Phase;
use morris_engine::search::{Algorithm, SearchConfig, Searcher, search_signed};

/// Morris: minimax search for a mill game
#[derive(Parser)]
#[command(name = "morris")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Placement move for White, scored by piece difference
    Opening(RunArgs),
    /// Placement move for White, scored by mills and potential mills
    OpeningImproved(RunArgs),
    /// Sliding or flying move for Black, plain minimax
    Game(RunArgs),
    /// Sliding or flying move for Black, alpha-beta pruning
    GameAb(RunArgs),
    /// Search with explicitly chosen rules and strategy
    Search {
        #[command(flatten)]
        run: RunArgs,
        #[arg(long, value_enum, default_value = "game")]
        phase: Phase,
        /// Defaults to the evaluator of the chosen phase
        #[arg(long, value_enum)]
        heuristic: Option<Heuristic>,
        #[arg(long, value_enum, default_value = "minimax")]
        algorithm: Algorithm,
        #[arg(long, value_enum, default_value = "white")]
        color: Color,
    },
    /// Compare node counts of minimax and alpha-beta on random positions
    Compare {
        #[arg(long, default_value_t = 3)]
        depth: u32,
        #[arg(long, default_value_t = 20)]
        boards: usize,
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

#[derive(Args)]
struct RunArgs {
    /// File holding the board as a single line
    input: PathBuf,
    /// File to write the resulting board to
    output: PathBuf,
    /// Search depth in plies
    #[arg(allow_negative_numbers = true)]
    depth: i64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Opening(run) => run_search(&run, SearchConfig::opening()),
        Commands::OpeningImproved(run) => run_search(&run, SearchConfig::opening_improved()),
        Commands::Game(run) => run_search(&run, SearchConfig::game()),
        Commands::GameAb(run) => run_search(&run, SearchConfig::game_alpha_beta()),
        Commands::Search {
            run,
            phase,
            heuristic,
            algorithm,
            color,
        } => {
            let config = SearchConfig::new(phase)
                .with_heuristic(heuristic.unwrap_or(Heuristic::default_for(phase)))
                .with_algorithm(algorithm)
                .with_color(color);
            run_search(&run, config)
        }
        Commands::Compare {
            depth,
            boards,
            seed,
        } => compare(depth, boards, seed),
    }
}

fn run_search(run: &RunArgs, config: SearchConfig) -> Result<()> {
    let board = read_board(&run.input)?;
    info!("searching {board} with {config:?}");

    let best = search_signed(&board, run.depth, &config)?;
    write_board(&run.output, &best.board)?;
    println!("{}", Report(&best));
    Ok(())
}

fn compare(depth: u32, boards: usize, seed: u64) -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let searcher = Searcher::new(Phase::Game, Heuristic::Game);
    let (mut total_full, mut total_pruned) = (0u64, 0u64);

    for _ in 0..boards {
        let (white, black) = (rng.usize(3..=7), rng.usize(3..=7));
        let board = Board::random(&mut rng, white, black);
        let full = searcher.run(&board, depth, Algorithm::Minimax);
        let pruned = searcher.run(&board, depth, Algorithm::AlphaBeta);
        ensure!(
            full.score == pruned.score,
            "scores disagree on {board}: minimax {} against alpha-beta {}",
            full.score,
            pruned.score
        );

        println!("{board}  minimax {:>8}  alpha-beta {:>8}", full.evaluated, pruned.evaluated);
        total_full += full.evaluated;
        total_pruned += pruned.evaluated;
    }

    println!("total               minimax {total_full:>8}  alpha-beta {total_pruned:>8}");
    Ok(())
}
