//! Core puzzle model for the sliding-tile puzzle.
//!
//! This module defines the pieces every search strategy is built from:
//! - `Move`: one displacement of the blank (`U`, `D`, `L`, `R`).
//! - `Path`: an immutable sequence of moves, rendered as a move string.
//! - `MoveOrder`: the order in which successors are generated, fixed or random.
//! - `Board`: an immutable R x C configuration with successor generation,
//!   the parity solvability check, replay and scrambling.
use crate::error::PuzzleError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Largest number of cells a board may have; tile values are stored as `u8`.
pub const MAX_CELLS: usize = 256;

/// Value stored in the blank cell.
pub const BLANK: u8 = 0;

/// A displacement of the blank by one cell.
///
/// The direction names where the *blank* goes, not the tile: `Up` swaps the
/// blank with the tile above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions in `U D L R` order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Returns the `(row, col)` delta applied to the blank.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    /// Returns the move that undoes this one.
    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Returns the single-character symbol used in move strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifteen_solver::engine::Move;
    /// assert_eq!(Move::Left.symbol(), 'L');
    /// assert_eq!(Move::from_symbol('U').unwrap(), Move::Up);
    /// ```
    pub fn symbol(self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }

    /// Parses a move symbol. Lowercase symbols are accepted.
    pub fn from_symbol(symbol: char) -> Result<Move, PuzzleError> {
        match symbol.to_ascii_uppercase() {
            'U' => Ok(Move::Up),
            'D' => Ok(Move::Down),
            'L' => Ok(Move::Left),
            'R' => Ok(Move::Right),
            _ => Err(PuzzleError::InvalidMoveSymbol(symbol)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An ordered sequence of moves from a start state.
///
/// The length of the path is the solution cost; every move costs one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Move>);

impl Path {
    /// Creates the empty path.
    pub fn new() -> Self {
        Path(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<Move>> for Path {
    fn from(moves: Vec<Move>) -> Self {
        Path(moves)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mv in &self.0 {
            write!(f, "{}", mv.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PuzzleError;

    /// Parses a move string such as `"LLUR"`. Surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .chars()
            .map(Move::from_symbol)
            .collect::<Result<Vec<_>, _>>()
            .map(Path)
    }
}

/// The order in which the successor generator tries the four directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOrder {
    /// Always the same permutation.
    Fixed([Move; 4]),
    /// A fresh shuffle of the four directions on every expansion.
    Random,
}

impl Default for MoveOrder {
    fn default() -> Self {
        MoveOrder::Fixed([Move::Left, Move::Right, Move::Up, Move::Down])
    }
}

impl MoveOrder {
    /// Resolves the order for one expansion.
    ///
    /// `rng` is only drawn from in the `Random` case, so fixed orders stay
    /// deterministic whatever generator is passed in.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> [Move; 4] {
        match self {
            MoveOrder::Fixed(order) => *order,
            MoveOrder::Random => {
                let mut order = [Move::Left, Move::Right, Move::Up, Move::Down];
                order.shuffle(rng);
                order
            }
        }
    }
}

impl FromStr for MoveOrder {
    type Err = PuzzleError;

    /// Parses an order directive.
    ///
    /// A directive starting with `R` (any case), such as `R`, `RAND` or
    /// `RLUD`, selects random ordering. Anything else must be a four-letter
    /// permutation of `LRUD`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifteen_solver::engine::{Move, MoveOrder};
    /// let order: MoveOrder = "DULR".parse().unwrap();
    /// assert_eq!(order, MoveOrder::Fixed([Move::Down, Move::Up, Move::Left, Move::Right]));
    /// assert_eq!("R".parse::<MoveOrder>().unwrap(), MoveOrder::Random);
    /// assert_eq!("RDUL".parse::<MoveOrder>().unwrap(), MoveOrder::Random);
    /// assert!("DULX".parse::<MoveOrder>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        let invalid = || PuzzleError::InvalidOrder(s.to_string());

        match spec.chars().next() {
            Some(c) if c.eq_ignore_ascii_case(&'R') => return Ok(MoveOrder::Random),
            Some(_) => {}
            None => return Err(invalid()),
        }

        let moves = spec
            .chars()
            .map(Move::from_symbol)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        if moves.len() != 4 || !Move::ALL.iter().all(|m| moves.contains(m)) {
            return Err(invalid());
        }
        let mut order = [Move::Up; 4];
        order.copy_from_slice(&moves);
        Ok(MoveOrder::Fixed(order))
    }
}

/// One configuration of an R x C sliding puzzle.
///
/// Cells are stored row-major; `BLANK` marks the empty cell. Boards are never
/// mutated by the engine: every move produces a new board. Equality and
/// hashing compare the dimensions and every cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
    /// Index of the `BLANK` cell; always consistent with `cells`.
    blank: usize,
}

impl Board {
    /// Builds the canonical goal: `1..R*C-1` in row-major order, blank last.
    ///
    /// # Examples
    /// ```
    /// use fifteen_solver::engine::Board;
    /// let goal = Board::goal(2, 3);
    /// assert_eq!(goal.cells(), &[1, 2, 3, 4, 5, 0]);
    /// ```
    pub fn goal(rows: usize, cols: usize) -> Self {
        debug_assert!(rows * cols <= MAX_CELLS);
        let n = rows * cols;
        let cells = (0..n)
            .map(|i| if i == n - 1 { BLANK } else { (i + 1) as u8 })
            .collect();
        Board {
            rows,
            cols,
            cells,
            blank: n - 1,
        }
    }

    /// Creates a board from row-major cell values after validating them.
    ///
    /// # Arguments
    /// * `rows`, `cols`: board dimensions; both must be at least 2 and
    ///   `rows * cols` at most `MAX_CELLS`.
    /// * `cells`: exactly `rows * cols` values forming a permutation of
    ///   `0..rows * cols`.
    ///
    /// # Returns
    /// * `Ok(Board)` for a well-formed configuration.
    /// * `Err(PuzzleError)` naming the first problem found.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<u8>) -> Result<Self, PuzzleError> {
        if rows < 2 || cols < 2 || rows * cols > MAX_CELLS {
            return Err(PuzzleError::InvalidDimensions { rows, cols });
        }
        let n = rows * cols;
        if cells.len() != n {
            return Err(PuzzleError::TileCount {
                expected: n,
                found: cells.len(),
            });
        }
        let mut seen = vec![false; n];
        let mut blank = 0;
        for (i, &value) in cells.iter().enumerate() {
            let idx = value as usize;
            if idx >= n {
                return Err(PuzzleError::TileOutOfRange {
                    value: idx,
                    max: n - 1,
                });
            }
            if seen[idx] {
                return Err(PuzzleError::DuplicateTile(value));
            }
            seen[idx] = true;
            if value == BLANK {
                blank = i;
            }
        }
        // n distinct values below n always include the blank.
        Ok(Board {
            rows,
            cols,
            cells,
            blank,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major cell values.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Index of the blank cell.
    pub fn blank_index(&self) -> usize {
        self.blank
    }

    /// Converts a row-major index to `(row, col)`.
    pub fn to_row_col(&self, idx: usize) -> (usize, usize) {
        (idx / self.cols, idx % self.cols)
    }

    /// Returns the board reached by moving the blank once, or `None` if the
    /// blank would leave the grid.
    pub fn apply_move(&self, mv: Move) -> Option<Board> {
        let blank = self.blank_index();
        let target = self.neighbor(blank, mv)?;
        let mut cells = self.cells.clone();
        cells.swap(blank, target);
        Some(Board {
            rows: self.rows,
            cols: self.cols,
            cells,
            blank: target,
        })
    }

    fn neighbor(&self, idx: usize, mv: Move) -> Option<usize> {
        let (r, c) = self.to_row_col(idx);
        let (dr, dc) = mv.delta();
        let nr = r as isize + dr;
        let nc = c as isize + dc;
        if nr >= 0 && nr < self.rows as isize && nc >= 0 && nc < self.cols as isize {
            Some(nr as usize * self.cols + nc as usize)
        } else {
            None
        }
    }

    /// Generates the boards one blank move away, in the order chosen by `order`.
    ///
    /// Directions that would take the blank off the grid are skipped, so at
    /// most four entries are returned and none equals `self`. `rng` is only
    /// used when `order` is `MoveOrder::Random`.
    ///
    /// # Arguments
    /// * `order`: the expansion order policy.
    /// * `rng`: source of randomness for the random policy.
    ///
    /// # Returns
    /// A `Vec` of `(Move, Board)` pairs, the move being the one that leads from
    /// `self` to the paired board.
    pub fn successors<R: Rng + ?Sized>(&self, order: &MoveOrder, rng: &mut R) -> Vec<(Move, Board)> {
        let blank = self.blank_index();
        let mut next = Vec::with_capacity(4);
        for mv in order.resolve(rng) {
            if let Some(target) = self.neighbor(blank, mv) {
                let mut cells = self.cells.clone();
                cells.swap(blank, target);
                next.push((
                    mv,
                    Board {
                        rows: self.rows,
                        cols: self.cols,
                        cells,
                        blank: target,
                    },
                ));
            }
        }
        next
    }

    /// Counts pairs of tiles that appear in the wrong relative order.
    ///
    /// The blank is ignored; the count is taken over the row-major sequence.
    pub fn inversions(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != BLANK)
            .map(|(i, &val)| {
                self.cells[i + 1..]
                    .iter()
                    .filter(|&&next| next != BLANK && next < val)
                    .count()
            })
            .sum()
    }

    /// Row of the blank counted from the bottom, starting at 1.
    fn blank_row_from_bottom(&self) -> usize {
        let (row, _) = self.to_row_col(self.blank_index());
        self.rows - row
    }

    fn parity_class(&self) -> usize {
        if self.cols % 2 == 1 {
            self.inversions() % 2
        } else {
            (self.inversions() + self.blank_row_from_bottom()) % 2
        }
    }

    /// Decides whether `goal` can be reached from `self` by blank moves.
    ///
    /// For an odd number of columns a move never changes the inversion parity,
    /// so both boards must share it. For an even number of columns a vertical
    /// move flips the inversion parity together with the blank's row, so the
    /// parity of `inversions + blank row from the bottom` is compared instead.
    pub fn is_solvable(&self, goal: &Board) -> bool {
        self.rows == goal.rows && self.cols == goal.cols && self.parity_class() == goal.parity_class()
    }

    /// Replays `path` from `self`, re-validating every move.
    ///
    /// # Returns
    /// * `Ok(boards)` with `path.len() + 1` boards, starting with `self`.
    /// * `Err(PuzzleError::IllegalMove)` naming the first (1-based) step whose
    ///   move takes the blank off the board.
    pub fn replay(&self, path: &Path) -> Result<Vec<Board>, PuzzleError> {
        let mut boards = Vec::with_capacity(path.len() + 1);
        boards.push(self.clone());
        for (i, mv) in path.iter().enumerate() {
            let current = boards.last().unwrap_or(self);
            let next = current
                .apply_move(mv)
                .ok_or(PuzzleError::IllegalMove { step: i + 1, mv })?;
            boards.push(next);
        }
        Ok(boards)
    }

    /// Scrambles the goal with a random walk of `moves` blank moves.
    ///
    /// The walk never immediately undoes its previous move. The result is
    /// always solvable and at most `moves` moves away from the goal.
    ///
    /// # Returns
    /// The scrambled board and the walk that produced it.
    pub fn scrambled<R: Rng + ?Sized>(rows: usize, cols: usize, moves: usize, rng: &mut R) -> (Board, Path) {
        let mut board = Board::goal(rows, cols);
        let mut walk = Vec::with_capacity(moves);
        let mut last: Option<Move> = None;
        for _ in 0..moves {
            let options: Vec<(Move, Board)> = board
                .successors(&MoveOrder::default(), rng)
                .into_iter()
                .filter(|(mv, _)| last.map_or(true, |l| *mv != l.opposite()))
                .collect();
            let Some((mv, next)) = options.choose(rng).cloned() else {
                break;
            };
            board = next;
            walk.push(mv);
            last = Some(mv);
        }
        (board, Path(walk))
    }
}

impl fmt::Display for Board {
    /// Draws the board in a frame, leaving the blank cell empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = format!("+{}+", "----".repeat(self.cols));
        writeln!(f, "{}", border)?;
        for r in 0..self.rows {
            write!(f, "|")?;
            for c in 0..self.cols {
                match self.cells[r * self.cols + c] {
                    BLANK => write!(f, "    ")?,
                    v => write!(f, " {:>2} ", v)?,
                }
            }
            writeln!(f, "|")?;
        }
        write!(f, "{}", border)
    }
}
