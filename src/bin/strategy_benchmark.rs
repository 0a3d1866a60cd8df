use clap::Parser;
use env_logger::Env;
use fifteen_solver::engine::Board;
use fifteen_solver::heuristics::Heuristic;
use fifteen_solver::solver::{search, MemoryPolicy, Outcome, SearchConfig, Strategy};
use log::warn;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

const LEVELS: [(&str, RangeInclusive<usize>); 3] = [("Easy", 5..=12), ("Medium", 12..=18), ("Hard", 18..=25)];

/// Compares the search strategies on seeded 4x4 scrambles.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Puzzles generated per difficulty level
    #[clap(short, long, default_value_t = 5)]
    boards: usize,

    /// Seed of the first puzzle; later puzzles use the following seeds
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Node limit applied to every run
    #[clap(long, default_value_t = 200_000)]
    max_nodes: u64,
}

#[derive(Default)]
struct Tally {
    solved: usize,
    total_len: usize,
    total_nodes: u64,
    total_time: Duration,
    /// Runs whose length could be compared with a BFS optimum.
    compared: usize,
    optimal: usize,
}

impl Tally {
    fn record(&mut self, outcome: &Outcome, nodes: u64, elapsed: Duration, optimum: Option<usize>) {
        self.total_nodes += nodes;
        self.total_time += elapsed;
        if let Outcome::Solved(path) = outcome {
            self.solved += 1;
            self.total_len += path.len();
            if let Some(optimum) = optimum {
                self.compared += 1;
                if path.len() == optimum {
                    self.optimal += 1;
                }
            }
        }
    }
}

fn configurations(max_nodes: u64) -> Vec<(&'static str, SearchConfig)> {
    let base = |strategy, heuristic| SearchConfig {
        heuristic,
        max_nodes: Some(max_nodes),
        seed: Some(0),
        ..SearchConfig::new(strategy)
    };
    vec![
        ("BFS", base(Strategy::Bfs, Heuristic::Zero)),
        ("DFS", base(Strategy::Dfs, Heuristic::Zero)),
        ("IDDFS", base(Strategy::Iddfs, Heuristic::Zero)),
        ("BF manhattan", base(Strategy::BestFirst, Heuristic::Manhattan)),
        ("BF linear_conflict", base(Strategy::BestFirst, Heuristic::LinearConflict)),
        ("A* misplaced", base(Strategy::AStar, Heuristic::Misplaced)),
        ("A* manhattan", base(Strategy::AStar, Heuristic::Manhattan)),
        ("A* linear_conflict", base(Strategy::AStar, Heuristic::LinearConflict)),
        ("SMA* drop-worst", base(Strategy::Sma, Heuristic::Manhattan)),
        (
            "SMA* backup",
            SearchConfig {
                memory_policy: MemoryPolicy::Backup,
                ..base(Strategy::Sma, Heuristic::Manhattan)
            },
        ),
    ]
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let goal = Board::goal(4, 4);
    let configs = configurations(args.max_nodes);

    println!(
        "Benchmarking {} configurations on {} boards per level (node limit {})...",
        configs.len(),
        args.boards,
        args.max_nodes
    );

    for (level_idx, (level, scramble)) in LEVELS.iter().enumerate() {
        let mut tallies: Vec<Tally> = configs.iter().map(|_| Tally::default()).collect();

        for board_idx in 0..args.boards {
            let seed = args.seed + (level_idx * args.boards + board_idx) as u64;
            let mut rng = SmallRng::seed_from_u64(seed);
            let moves = rng.gen_range(scramble.clone());
            let (start, _) = Board::scrambled(4, 4, moves, &mut rng);

            let mut optimum = None;
            for (i, (name, config)) in configs.iter().enumerate() {
                let started = Instant::now();
                let report = search(&start, &goal, config);
                let elapsed = started.elapsed();
                if config.strategy == Strategy::Bfs {
                    optimum = report.outcome.path().map(|p| p.len());
                    if optimum.is_none() {
                        warn!("BFS found no optimum for seed {} ({})", seed, report.outcome);
                    }
                }
                tallies[i].record(&report.outcome, report.nodes, elapsed, optimum);
                if let Outcome::Solved(path) = &report.outcome {
                    if start.replay(path).ok().and_then(|s| s.last().cloned()) != Some(goal.clone()) {
                        warn!("{} returned a path that does not reach the goal (seed {})", name, seed);
                    }
                }
            }
        }

        println!("\n--- {} ({}-{} scramble moves) ---", level, scramble.start(), scramble.end());
        println!(
            "{:<20} {:>7} {:>8} {:>10} {:>10} {:>8}",
            "Strategy", "Solved", "Avg len", "Avg nodes", "Avg ms", "Optimal"
        );
        for ((name, _), tally) in configs.iter().zip(&tallies) {
            let runs = args.boards.max(1) as f64;
            let avg_len = if tally.solved > 0 {
                format!("{:.2}", tally.total_len as f64 / tally.solved as f64)
            } else {
                "-".to_string()
            };
            println!(
                "{:<20} {:>3}/{:<3} {:>8} {:>10.0} {:>10.2} {:>4}/{:<3}",
                name,
                tally.solved,
                args.boards,
                avg_len,
                tally.total_nodes as f64 / runs,
                tally.total_time.as_secs_f64() * 1000.0 / runs,
                tally.optimal,
                tally.compared
            );
        }
    }
}
