//! Search strategies for the sliding puzzle.
//!
//! `solve` is the entry point: it runs the parity check and, if the goal is
//! reachable, dispatches to the strategy chosen in `SearchConfig`. The six
//! strategies live in their own modules and can also be called directly.
//!
//! ## Modules
//! - `bfs`, `dfs`, `iddfs`: uninformed strategies.
//! - `best_first`, `astar`, `sma`: heuristic strategies.
//! - `frontier`: priority frontiers with FIFO tie-breaking.
//! - `trail`: shared-prefix move lists held by frontier entries.
pub mod astar;
pub mod best_first;
pub mod bfs;
pub mod dfs;
pub mod frontier;
pub mod iddfs;
pub mod sma;
pub mod trail;

use crate::engine::{Board, Move, MoveOrder, Path};
use crate::error::PuzzleError;
use crate::heuristics::{GoalPositions, Heuristic};
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fmt;
use std::str::FromStr;

pub use astar::astar;
pub use best_first::best_first;
pub use bfs::bfs;
pub use dfs::dfs;
pub use iddfs::iddfs;
pub use sma::sma_star;

/// Default depth bound of iterative deepening.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Default cap of the memory-bounded strategy.
pub const DEFAULT_MAX_MEMORY: usize = 10_000;

/// The six search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Bfs,
    Dfs,
    Iddfs,
    BestFirst,
    AStar,
    Sma,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Iddfs,
        Strategy::BestFirst,
        Strategy::AStar,
        Strategy::Sma,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "bfs",
            Strategy::Dfs => "dfs",
            Strategy::Iddfs => "idfs",
            Strategy::BestFirst => "bf",
            Strategy::AStar => "astar",
            Strategy::Sma => "sma",
        }
    }

    /// Whether the strategy ranks states with a heuristic.
    pub fn is_informed(self) -> bool {
        matches!(self, Strategy::BestFirst | Strategy::AStar | Strategy::Sma)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Strategy::Bfs),
            "dfs" | "depth-first" => Ok(Strategy::Dfs),
            "idfs" | "iddfs" => Ok(Strategy::Iddfs),
            "bf" | "best-first" | "greedy" => Ok(Strategy::BestFirst),
            "astar" | "a*" => Ok(Strategy::AStar),
            "sma" | "sma*" => Ok(Strategy::Sma),
            _ => Err(PuzzleError::UnknownStrategy(s.to_string())),
        }
    }
}

/// How the memory-bounded strategy behaves when its memory is full.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MemoryPolicy {
    /// A* whose open list is trimmed by discarding its worst entries. Lossy:
    /// nothing is remembered about a discarded entry, so neither optimality
    /// nor completeness survives a trim.
    #[default]
    DropWorst,
    /// SMA*: forgotten leaves back their f-cost up into their parent, which
    /// regenerates them when it becomes the best candidate again.
    Backup,
}

impl fmt::Display for MemoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryPolicy::DropWorst => f.write_str("drop-worst"),
            MemoryPolicy::Backup => f.write_str("backup"),
        }
    }
}

impl FromStr for MemoryPolicy {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop-worst" | "drop_worst" | "simplified" => Ok(MemoryPolicy::DropWorst),
            "backup" => Ok(MemoryPolicy::Backup),
            _ => Err(PuzzleError::UnknownMemoryPolicy(s.to_string())),
        }
    }
}

/// Everything needed to run one search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Successor order; the heuristic strategies use it to order equal keys.
    pub order: MoveOrder,
    /// Ignored by the uninformed strategies.
    pub heuristic: Heuristic,
    /// Cap on frontier pops (or recursive visits for IDDFS).
    pub max_nodes: Option<u64>,
    /// Deepest bound tried by IDDFS.
    pub max_depth: usize,
    /// Open-list cap (`DropWorst`) or node cap (`Backup`) of SMA*.
    pub max_memory: usize,
    pub memory_policy: MemoryPolicy,
    /// Seed for the random successor order; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            strategy: Strategy::AStar,
            order: MoveOrder::default(),
            heuristic: Heuristic::Manhattan,
            max_nodes: None,
            max_depth: DEFAULT_MAX_DEPTH,
            max_memory: DEFAULT_MAX_MEMORY,
            memory_policy: MemoryPolicy::default(),
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Default configuration for `strategy`.
    pub fn new(strategy: Strategy) -> Self {
        SearchConfig {
            strategy,
            ..SearchConfig::default()
        }
    }
}

/// A limit that cut a search short.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Limit {
    Nodes,
    Depth,
    Memory,
}

/// How a strategy run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Solved(Path),
    /// The strategy ran out of states to try without reaching the goal.
    Exhausted,
    /// A resource limit stopped the search. This says nothing about whether
    /// a solution exists.
    LimitReached(Limit),
}

impl Outcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Outcome::Solved(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Solved(path) => write!(f, "solved in {} moves", path.len()),
            Outcome::Exhausted => f.write_str("search space exhausted"),
            Outcome::LimitReached(Limit::Nodes) => f.write_str("node limit reached"),
            Outcome::LimitReached(Limit::Depth) => f.write_str("depth limit reached"),
            Outcome::LimitReached(Limit::Memory) => f.write_str("memory limit reached"),
        }
    }
}

/// Result of one strategy run together with its counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: Outcome,
    /// Frontier pops (recursive visits for IDDFS, selections for SMA*).
    pub nodes: u64,
    /// Largest frontier size seen (recursion depth for IDDFS, live tree
    /// nodes for backed-up SMA*).
    pub max_frontier: usize,
}

impl SearchReport {
    /// Report for a start that already is the goal.
    pub fn already_solved() -> Self {
        SearchReport {
            outcome: Outcome::Solved(Path::new()),
            nodes: 0,
            max_frontier: 0,
        }
    }
}

/// Answer of `solve`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The parity check proved the goal unreachable; no search was run.
    Unsolvable,
    Searched(SearchReport),
}

/// Produces successors in the configured order, owning the random source
/// used by the random order.
pub struct Expander {
    order: MoveOrder,
    rng: SmallRng,
}

impl Expander {
    pub fn new(order: MoveOrder, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Expander { order, rng }
    }

    pub fn expand(&mut self, board: &Board) -> Vec<(Move, Board)> {
        board.successors(&self.order, &mut self.rng)
    }
}

/// Node counter and frontier high-water mark shared by all strategies.
pub(crate) struct Tracker {
    nodes: u64,
    max_nodes: Option<u64>,
    max_frontier: usize,
}

impl Tracker {
    pub(crate) fn new(max_nodes: Option<u64>) -> Self {
        Tracker {
            nodes: 0,
            max_nodes,
            max_frontier: 0,
        }
    }

    /// Counts one node; returns `true` once the limit has been exceeded.
    pub(crate) fn tick(&mut self) -> bool {
        self.nodes += 1;
        self.max_nodes.map_or(false, |max| self.nodes > max)
    }

    pub(crate) fn observe(&mut self, frontier_len: usize) {
        self.max_frontier = self.max_frontier.max(frontier_len);
    }

    pub(crate) fn finish(self, outcome: Outcome) -> SearchReport {
        SearchReport {
            outcome,
            nodes: self.nodes,
            max_frontier: self.max_frontier,
        }
    }
}

/// Runs the configured strategy from `start` towards `goal` without the
/// parity gate.
pub fn search(start: &Board, goal: &Board, config: &SearchConfig) -> SearchReport {
    let mut expander = Expander::new(config.order, config.seed);
    let goal_positions = GoalPositions::new(goal);
    match config.strategy {
        Strategy::Bfs => bfs(start, goal, &mut expander, config.max_nodes),
        Strategy::Dfs => dfs(start, goal, &mut expander, config.max_nodes),
        Strategy::Iddfs => iddfs(start, goal, &mut expander, config.max_depth, config.max_nodes),
        Strategy::BestFirst => best_first(
            start,
            goal,
            &mut expander,
            config.heuristic,
            &goal_positions,
            config.max_nodes,
        ),
        Strategy::AStar => astar(
            start,
            goal,
            &mut expander,
            config.heuristic,
            &goal_positions,
            config.max_nodes,
        ),
        Strategy::Sma => sma_star(
            start,
            goal,
            &mut expander,
            config.heuristic,
            &goal_positions,
            config.max_nodes,
            config.max_memory,
            config.memory_policy,
        ),
    }
}

/// Solves `start` towards the canonical goal of its dimensions.
///
/// The parity check runs first; an unreachable goal yields
/// `Verdict::Unsolvable` without invoking any strategy.
///
/// # Examples
/// ```
/// use fifteen_solver::engine::Board;
/// use fifteen_solver::solver::{solve, SearchConfig, Strategy, Verdict};
///
/// let start = Board::from_cells(2, 2, vec![1, 2, 0, 3]).unwrap();
/// match solve(&start, &SearchConfig::new(Strategy::Bfs)) {
///     Verdict::Searched(report) => assert_eq!(report.outcome.path().unwrap().to_string(), "R"),
///     Verdict::Unsolvable => unreachable!(),
/// }
/// ```
pub fn solve(start: &Board, config: &SearchConfig) -> Verdict {
    let goal = Board::goal(start.rows(), start.cols());
    if !start.is_solvable(&goal) {
        info!("parity check failed, goal is unreachable");
        return Verdict::Unsolvable;
    }
    if config.strategy.is_informed() {
        info!("running {} with heuristic {}", config.strategy, config.heuristic);
    } else {
        info!("running {} with order {:?}", config.strategy, config.order);
    }
    let report = search(start, &goal, config);
    info!("{} after {} nodes", report.outcome, report.nodes);
    Verdict::Searched(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cells: &[u8]) -> Board {
        Board::from_cells(4, 4, cells.to_vec()).unwrap()
    }

    fn config(strategy: Strategy) -> SearchConfig {
        SearchConfig {
            max_nodes: Some(200_000),
            seed: Some(1),
            ..SearchConfig::new(strategy)
        }
    }

    #[test]
    fn test_parse_strategy() {
        for s in Strategy::ALL {
            assert_eq!(s.name().parse::<Strategy>().unwrap(), s);
        }
        assert_eq!("A*".parse::<Strategy>().unwrap(), Strategy::AStar);
        assert_eq!(
            "hill".parse::<Strategy>(),
            Err(PuzzleError::UnknownStrategy("hill".to_string()))
        );
    }

    #[test]
    fn test_parse_memory_policy() {
        assert_eq!("backup".parse::<MemoryPolicy>().unwrap(), MemoryPolicy::Backup);
        assert_eq!("drop-worst".parse::<MemoryPolicy>().unwrap(), MemoryPolicy::DropWorst);
        assert!("lru".parse::<MemoryPolicy>().is_err());
    }

    #[test]
    fn test_solve_reports_unsolvable_by_parity() {
        let start = board(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 15, 14, 0]);
        for s in Strategy::ALL {
            assert_eq!(solve(&start, &config(s)), Verdict::Unsolvable);
        }
    }

    #[test]
    fn test_solve_goal_is_empty_path_for_every_strategy() {
        let goal = Board::goal(4, 4);
        for s in Strategy::ALL {
            assert_eq!(solve(&goal, &config(s)), Verdict::Searched(SearchReport::already_solved()));
        }
    }

    #[test]
    fn test_solve_single_move_for_every_strategy() {
        let start = board(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 0, 15]);
        for s in [Strategy::Bfs, Strategy::Iddfs, Strategy::AStar, Strategy::BestFirst, Strategy::Sma] {
            match solve(&start, &config(s)) {
                Verdict::Searched(report) => {
                    assert_eq!(report.outcome, Outcome::Solved("R".parse().unwrap()), "{s}")
                }
                Verdict::Unsolvable => panic!("{s} reported unsolvable"),
            }
        }
    }

    #[test]
    fn test_tracker_limit() {
        let mut t = Tracker::new(Some(2));
        assert!(!t.tick());
        assert!(!t.tick());
        assert!(t.tick());
        let mut unlimited = Tracker::new(None);
        assert!(!unlimited.tick());
        unlimited.observe(7);
        unlimited.observe(3);
        let report = unlimited.finish(Outcome::Exhausted);
        assert_eq!(report.nodes, 1);
        assert_eq!(report.max_frontier, 7);
    }
}
