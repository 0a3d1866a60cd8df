use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use env_logger::Env;
use fifteen_solver::engine::MoveOrder;
use fifteen_solver::heuristics::Heuristic;
use fifteen_solver::solver::{
    solve, MemoryPolicy, SearchConfig, Strategy, Verdict, DEFAULT_MAX_DEPTH, DEFAULT_MAX_MEMORY,
};
use fifteen_solver::utils::{format_outcome, format_unsolvable, parse_puzzle};
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Solves a sliding-tile puzzle read from a file or stdin.
///
/// Prints the solution length and the move string; `-1` when the search
/// gave up and `-2` when the puzzle is unsolvable.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(group(
    ArgGroup::new("strategy")
        .required(true)
        .args(["bfs", "dfs", "idfs", "bf", "astar", "sma"])
))]
struct Args {
    /// Breadth-first search with the given order (e.g. LRUD, or R for random)
    #[clap(short = 'b', long, value_name = "ORDER")]
    bfs: Option<MoveOrder>,

    /// Depth-first search with the given order
    #[clap(short = 'd', long, value_name = "ORDER")]
    dfs: Option<MoveOrder>,

    /// Iterative-deepening depth-first search with the given order
    #[clap(short = 'i', long, value_name = "ORDER")]
    idfs: Option<MoveOrder>,

    /// Greedy best-first search with the given heuristic
    /// (0, misplaced, manhattan, linear_conflict)
    #[clap(short = 'f', long, value_name = "HEURISTIC")]
    bf: Option<Heuristic>,

    /// A* search with the given heuristic
    #[clap(short = 'a', long, value_name = "HEURISTIC")]
    astar: Option<Heuristic>,

    /// Memory-bounded A* with the given heuristic
    #[clap(short = 's', long, value_name = "HEURISTIC")]
    sma: Option<Heuristic>,

    /// Successor order used by the heuristic strategies
    #[clap(long, value_name = "ORDER", default_value = "LRUD")]
    order: MoveOrder,

    /// Give up after this many expanded nodes
    #[clap(long)]
    max_nodes: Option<u64>,

    /// Deepest bound tried by iterative deepening
    #[clap(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Memory cap of the memory-bounded strategy
    #[clap(long, default_value_t = DEFAULT_MAX_MEMORY)]
    max_memory: usize,

    /// What the memory-bounded strategy does when memory is full
    /// (drop-worst or backup)
    #[clap(long, value_name = "POLICY", default_value = "drop-worst")]
    sma_policy: MemoryPolicy,

    /// Seed for the random successor order
    #[clap(long)]
    seed: Option<u64>,

    /// Print node counts and timing to stderr
    #[clap(long)]
    stats: bool,

    /// Puzzle file: `R C` on the first line, then the tiles (stdin if omitted)
    input: Option<PathBuf>,
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        let mut config = SearchConfig {
            order: self.order,
            max_nodes: self.max_nodes,
            max_depth: self.max_depth,
            max_memory: self.max_memory,
            memory_policy: self.sma_policy,
            seed: self.seed,
            ..SearchConfig::default()
        };
        if let Some(order) = self.bfs {
            config.strategy = Strategy::Bfs;
            config.order = order;
        } else if let Some(order) = self.dfs {
            config.strategy = Strategy::Dfs;
            config.order = order;
        } else if let Some(order) = self.idfs {
            config.strategy = Strategy::Iddfs;
            config.order = order;
        } else if let Some(heuristic) = self.bf {
            config.strategy = Strategy::BestFirst;
            config.heuristic = heuristic;
        } else if let Some(heuristic) = self.sma {
            config.strategy = Strategy::Sma;
            config.heuristic = heuristic;
        } else if let Some(heuristic) = self.astar {
            config.strategy = Strategy::AStar;
            config.heuristic = heuristic;
        }
        config
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read puzzle file {}", path.display())),
        None => io::read_to_string(io::stdin()).context("failed to read puzzle from stdin"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let text = read_input(args.input.as_deref())?;
    let board = parse_puzzle(&text).context("invalid puzzle")?;
    info!("loaded {}x{} puzzle", board.rows(), board.cols());

    let config = args.search_config();
    let started = Instant::now();
    match solve(&board, &config) {
        Verdict::Unsolvable => println!("{}", format_unsolvable()),
        Verdict::Searched(report) => {
            println!("{}", format_outcome(&report.outcome));
            if args.stats {
                eprintln!("strategy:     {}", config.strategy);
                eprintln!("outcome:      {}", report.outcome);
                eprintln!("nodes:        {}", report.nodes);
                eprintln!("max frontier: {}", report.max_frontier);
                eprintln!("time:         {:.3?}", started.elapsed());
            }
        }
    }
    Ok(())
}
