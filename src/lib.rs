//! # Fifteen Solver Library
//!
//! This library provides the board model of the sliding-tile puzzle (the
//! 15-puzzle and its R x C generalisations) together with six search
//! strategies that move the blank until the canonical goal is reached.
//!
//! It is used by three binaries:
//! - `puzzle_solver`: Reads a puzzle, runs one strategy and prints the path.
//! - `path_viewer`: Replays a move string on a puzzle step by step.
//! - `strategy_benchmark`: Compares every strategy on seeded scrambles.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`), moves (`Move`, `Path`),
//!   successor ordering (`MoveOrder`), the parity check and path replay.
//! - `heuristics`: Distance estimates used by the informed strategies.
//! - `solver`: BFS, DFS, IDDFS, greedy best-first, A* and memory-bounded A*,
//!   plus `solve`, which runs the parity gate before dispatching.
//! - `error`: The `PuzzleError` type returned at the crate boundary.
//! - `utils`: Parsing the puzzle text format and rendering solver output.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;
