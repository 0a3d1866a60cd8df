use crate::engine::{Board, MAX_CELLS};
use crate::error::PuzzleError;
use crate::solver::Outcome;
use log::warn;

/// Parses a puzzle in the text format read by the binaries.
///
/// The first line holds the dimensions `R C`; the remaining `R*C`
/// whitespace-separated integers are the tiles in row-major order, with `0`
/// standing for the blank. Line breaks after the first line are not
/// significant.
///
/// # Arguments
/// * `input`: the whole puzzle text.
///
/// # Returns
/// * `Ok(Board)` for a well-formed puzzle. Boards other than 4x4 are accepted
///   with a logged warning.
/// * `Err(PuzzleError)` if the dimension line is missing or malformed, the
///   tile count is wrong, or any tile is not an integer, out of range or
///   repeated.
///
/// # Examples
/// ```
/// use fifteen_solver::utils::parse_puzzle;
///
/// let board = parse_puzzle("2 2\n1 2\n0 3\n").unwrap();
/// assert_eq!(board.cells(), &[1, 2, 0, 3]);
/// assert!(parse_puzzle("2 2\n1 2 3").is_err());
/// ```
pub fn parse_puzzle(input: &str) -> Result<Board, PuzzleError> {
    let mut lines = input.lines().skip_while(|line| line.trim().is_empty());
    let header = lines.next().ok_or(PuzzleError::MissingDimensions)?;
    let dims: Vec<&str> = header.split_whitespace().collect();
    let [rows, cols] = dims.as_slice() else {
        return Err(PuzzleError::MissingDimensions);
    };
    let rows = parse_number(rows)?;
    let cols = parse_number(cols)?;

    let expected = rows.saturating_mul(cols);
    if rows < 2 || cols < 2 || expected > MAX_CELLS {
        return Err(PuzzleError::InvalidDimensions { rows, cols });
    }

    let tokens: Vec<&str> = lines.flat_map(str::split_whitespace).collect();
    if tokens.len() != expected {
        return Err(PuzzleError::TileCount {
            expected,
            found: tokens.len(),
        });
    }

    let mut cells = Vec::with_capacity(expected);
    for token in tokens {
        let value = parse_number(token)?;
        let max = expected.saturating_sub(1);
        let tile = u8::try_from(value)
            .ok()
            .filter(|&t| usize::from(t) <= max)
            .ok_or(PuzzleError::TileOutOfRange { value, max })?;
        cells.push(tile);
    }
    let board = Board::from_cells(rows, cols, cells)?;
    if (rows, cols) != (4, 4) {
        warn!("puzzle is {}x{}, not the classic 4x4", rows, cols);
    }
    Ok(board)
}

fn parse_number(token: &str) -> Result<usize, PuzzleError> {
    token
        .parse()
        .map_err(|_| PuzzleError::InvalidToken(token.to_string()))
}

/// Renders an outcome as the two output lines of the solver binary.
///
/// A solution prints its length and its move string. Any other outcome
/// prints `-1` and an empty line.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Solved(path) => format!("{}\n{}", path.len(), path),
        Outcome::Exhausted | Outcome::LimitReached(_) => "-1\n".to_string(),
    }
}

/// Output of the solver binary for a puzzle that fails the parity check.
pub fn format_unsolvable() -> String {
    "-2\n".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Limit;

    #[test]
    fn test_parse_puzzle_valid() {
        let input = "4 4\n1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 0 15\n";
        let board = parse_puzzle(input).unwrap();
        assert_eq!(board.rows(), 4);
        assert_eq!(board.cols(), 4);
        assert_eq!(board.blank_index(), 14);
    }

    #[test]
    fn test_parse_puzzle_free_layout() {
        // Tiles may be spread over any number of lines.
        let board = parse_puzzle("\n3 3\n1 2 3 4 5\n6 7\n\n8 0").unwrap();
        assert_eq!(board, Board::goal(3, 3));
    }

    #[test]
    fn test_parse_puzzle_missing_dimensions() {
        assert_eq!(parse_puzzle(""), Err(PuzzleError::MissingDimensions));
        assert_eq!(parse_puzzle("4\n1 2 3"), Err(PuzzleError::MissingDimensions));
        assert_eq!(parse_puzzle("4 4 4\n"), Err(PuzzleError::MissingDimensions));
    }

    #[test]
    fn test_parse_puzzle_invalid_dimensions() {
        assert_eq!(
            parse_puzzle("1 4\n1 2 3 0"),
            Err(PuzzleError::InvalidDimensions { rows: 1, cols: 4 })
        );
        assert_eq!(parse_puzzle("0 0\n"), Err(PuzzleError::InvalidDimensions { rows: 0, cols: 0 }));
        assert_eq!(
            parse_puzzle("x 4\n"),
            Err(PuzzleError::InvalidToken("x".to_string()))
        );
    }

    #[test]
    fn test_parse_puzzle_wrong_tile_count() {
        assert_eq!(
            parse_puzzle("2 2\n1 2 3"),
            Err(PuzzleError::TileCount { expected: 4, found: 3 })
        );
        assert_eq!(
            parse_puzzle("2 2\n1 2 3 0 4"),
            Err(PuzzleError::TileCount { expected: 4, found: 5 })
        );
    }

    #[test]
    fn test_parse_puzzle_bad_tiles() {
        assert_eq!(
            parse_puzzle("2 2\n1 2 a 0"),
            Err(PuzzleError::InvalidToken("a".to_string()))
        );
        assert_eq!(
            parse_puzzle("2 2\n1 2 -3 0"),
            Err(PuzzleError::InvalidToken("-3".to_string()))
        );
        assert_eq!(
            parse_puzzle("2 2\n1 2 4 0"),
            Err(PuzzleError::TileOutOfRange { value: 4, max: 3 })
        );
        assert_eq!(
            parse_puzzle("2 2\n1 2 900 0"),
            Err(PuzzleError::TileOutOfRange { value: 900, max: 3 })
        );
        assert_eq!(parse_puzzle("2 2\n1 1 2 0"), Err(PuzzleError::DuplicateTile(1)));
    }

    #[test]
    fn test_format_outcome() {
        let solved = Outcome::Solved("LLU".parse().unwrap());
        assert_eq!(format_outcome(&solved), "3\nLLU");
        assert_eq!(format_outcome(&Outcome::Solved(Default::default())), "0\n");
        assert_eq!(format_outcome(&Outcome::Exhausted), "-1\n");
        assert_eq!(format_outcome(&Outcome::LimitReached(Limit::Memory)), "-1\n");
        assert_eq!(format_unsolvable(), "-2\n");
    }
}
