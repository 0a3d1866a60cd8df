//! Error type shared by the puzzle parser, the selector parsers and path replay.

use crate::engine::Move;

/// Failures detected at the boundary of the engine.
///
/// A puzzle that fails the parity check is not an error; see
/// [`crate::solver::Verdict::Unsolvable`]. Likewise a search that runs out of
/// nodes or memory reports [`crate::solver::Outcome::LimitReached`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("expected board dimensions `R C` on the first line")]
    MissingDimensions,
    #[error("invalid board dimensions {rows}x{cols} (need 2 <= R, C and R*C <= 256)")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("expected {expected} numbers for the puzzle, got {found}")]
    TileCount { expected: usize, found: usize },
    #[error("invalid token `{0}` (expected an integer)")]
    InvalidToken(String),
    #[error("tile value {value} out of range 0..={max}")]
    TileOutOfRange { value: usize, max: usize },
    #[error("tile value {0} appears more than once")]
    DuplicateTile(u8),
    #[error("unknown heuristic `{0}` (use 0, misplaced, manhattan or linear_conflict)")]
    UnknownHeuristic(String),
    #[error("unknown strategy `{0}` (use bfs, dfs, idfs, bf, astar or sma)")]
    UnknownStrategy(String),
    #[error("invalid search order `{0}` (use a permutation of LRUD, or R for random)")]
    InvalidOrder(String),
    #[error("unknown memory policy `{0}` (use drop-worst or backup)")]
    UnknownMemoryPolicy(String),
    #[error("invalid move symbol `{0}` (use U, D, L or R)")]
    InvalidMoveSymbol(char),
    #[error("move {step} ({mv}) takes the blank off the board")]
    IllegalMove { step: usize, mv: Move },
}
