//! Heuristic evaluators for the informed search strategies.
//!
//! Every evaluator maps a board to a lower bound (or, for the greedy search,
//! just a ranking) of the number of moves left to reach the goal. Evaluators
//! are pure: they read the board and a `GoalPositions` table and keep no state
//! between calls.
use crate::engine::{Board, BLANK};
use crate::error::PuzzleError;
use std::fmt;
use std::str::FromStr;

/// Maps every tile value to its index in the goal board.
///
/// Built once per search from the goal only, then shared read-only by every
/// heuristic call of that search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalPositions {
    cols: usize,
    positions: Vec<usize>,
}

impl GoalPositions {
    /// Builds the table for `goal`.
    pub fn new(goal: &Board) -> Self {
        let mut positions = vec![0; goal.cells().len()];
        for (idx, &value) in goal.cells().iter().enumerate() {
            positions[value as usize] = idx;
        }
        GoalPositions {
            cols: goal.cols(),
            positions,
        }
    }

    /// Goal index of `tile`.
    pub fn index_of(&self, tile: u8) -> usize {
        self.positions[tile as usize]
    }

    /// Goal `(row, col)` of `tile`.
    pub fn row_col(&self, tile: u8) -> (usize, usize) {
        let idx = self.index_of(tile);
        (idx / self.cols, idx % self.cols)
    }
}

/// The available heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Always 0; turns A* into uniform-cost search.
    Zero,
    /// Number of tiles out of place.
    Misplaced,
    /// Sum of the tiles' grid distances to their goal cells.
    Manhattan,
    /// Manhattan distance plus two moves per tile that must leave its line.
    LinearConflict,
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Zero,
        Heuristic::Misplaced,
        Heuristic::Manhattan,
        Heuristic::LinearConflict,
    ];

    /// Evaluates this heuristic on `board`.
    pub fn evaluate(self, board: &Board, goal: &GoalPositions) -> u32 {
        match self {
            Heuristic::Zero => h_zero(board, goal),
            Heuristic::Misplaced => h_misplaced(board, goal),
            Heuristic::Manhattan => h_manhattan(board, goal),
            Heuristic::LinearConflict => h_linear_conflict(board, goal),
        }
    }

    /// Canonical identifier, accepted by `from_str`.
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Zero => "zero",
            Heuristic::Misplaced => "misplaced",
            Heuristic::Manhattan => "manhattan",
            Heuristic::LinearConflict => "linear_conflict",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "zero" => Ok(Heuristic::Zero),
            "misplaced" | "hamming" => Ok(Heuristic::Misplaced),
            "manhattan" => Ok(Heuristic::Manhattan),
            "linear_conflict" | "linear-conflict" | "lc" => Ok(Heuristic::LinearConflict),
            _ => Err(PuzzleError::UnknownHeuristic(s.to_string())),
        }
    }
}

pub fn h_zero(_board: &Board, _goal: &GoalPositions) -> u32 {
    0
}

/// Counts the non-blank tiles whose index differs from their goal index.
pub fn h_misplaced(board: &Board, goal: &GoalPositions) -> u32 {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|&(idx, &value)| value != BLANK && goal.index_of(value) != idx)
        .count() as u32
}

/// Sums `|row - goal_row| + |col - goal_col|` over the non-blank tiles.
///
/// Each move shifts one tile by one cell, so this never overestimates and is
/// never below `h_misplaced`.
pub fn h_manhattan(board: &Board, goal: &GoalPositions) -> u32 {
    let mut distance = 0;
    for (idx, &value) in board.cells().iter().enumerate() {
        if value == BLANK {
            continue;
        }
        let (r, c) = board.to_row_col(idx);
        let (gr, gc) = goal.row_col(value);
        distance += r.abs_diff(gr) + c.abs_diff(gc);
    }
    distance as u32
}

/// Manhattan distance plus `2 * (row conflicts + column conflicts)`.
///
/// A tile takes part in a row conflict when it already sits in its goal row
/// but out of goal order with another tile of that row; the two cannot pass
/// each other without one leaving the row, which costs two moves beyond the
/// Manhattan count. The conflicts of a line are counted as the fewest tiles
/// that must leave it for the rest to be in goal order, which keeps the bound
/// admissible when three or more tiles are mutually reversed.
pub fn h_linear_conflict(board: &Board, goal: &GoalPositions) -> u32 {
    let rows = board.rows();
    let cols = board.cols();
    let cells = board.cells();
    let mut conflicts = 0;
    let mut line = Vec::with_capacity(rows.max(cols));

    for r in 0..rows {
        line.clear();
        for c in 0..cols {
            let value = cells[r * cols + c];
            if value == BLANK {
                continue;
            }
            let (gr, gc) = goal.row_col(value);
            if gr == r {
                line.push(gc);
            }
        }
        conflicts += tiles_out_of_order(&line);
    }

    for c in 0..cols {
        line.clear();
        for r in 0..rows {
            let value = cells[r * cols + c];
            if value == BLANK {
                continue;
            }
            let (gr, gc) = goal.row_col(value);
            if gc == c {
                line.push(gr);
            }
        }
        conflicts += tiles_out_of_order(&line);
    }

    h_manhattan(board, goal) + 2 * conflicts
}

/// Number of entries to drop so the remaining goal coordinates increase.
fn tiles_out_of_order(goal_coords: &[usize]) -> u32 {
    if goal_coords.len() < 2 {
        return 0;
    }
    // Longest increasing subsequence; lines hold at most 16 tiles.
    let mut best = vec![1usize; goal_coords.len()];
    for j in 1..goal_coords.len() {
        for i in 0..j {
            if goal_coords[i] < goal_coords[j] && best[i] + 1 > best[j] {
                best[j] = best[i] + 1;
            }
        }
    }
    let longest = best.iter().copied().max().unwrap_or(0);
    (goal_coords.len() - longest) as u32
}
