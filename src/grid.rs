use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::rules::{ProbabilisticRules, Rules};

/// Errors raised when constructing a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Grid dimensions must both be positive.
    #[error("grid dimensions must be positive: {rows}x{cols}")]
    InvalidDimensions { rows: i32, cols: i32 },
    /// Pattern text contained a character outside the cell alphabet.
    #[error("unknown cell character: {0:?}")]
    UnknownCellChar(char),
}

/// A (row, col) coordinate. Rows grow downward, columns rightward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the cell offset by the given deltas.
    pub fn translate(self, row_delta: i32, col_delta: i32) -> Self {
        Self::new(self.row + row_delta, self.col + col_delta)
    }

    pub fn north(self) -> Self {
        self.translate(-1, 0)
    }

    pub fn south(self) -> Self {
        self.translate(1, 0)
    }

    pub fn east(self) -> Self {
        self.translate(0, 1)
    }

    pub fn west(self) -> Self {
        self.translate(0, -1)
    }

    pub fn north_east(self) -> Self {
        self.translate(-1, 1)
    }

    pub fn north_west(self) -> Self {
        self.translate(-1, -1)
    }

    pub fn south_east(self) -> Self {
        self.translate(1, 1)
    }

    pub fn south_west(self) -> Self {
        self.translate(1, -1)
    }
}

/// Binary cell state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Alive,
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        matches!(self, CellState::Alive)
    }

    /// Display character: `*` for alive, `.` for dead.
    pub fn symbol(self) -> char {
        match self {
            CellState::Alive => '*',
            CellState::Dead => '.',
        }
    }

    /// Parse a pattern character. `*`, `O`, `1` are alive; `.`, space, `0`
    /// are dead; anything else is an error.
    pub fn from_char(c: char) -> Result<Self, GridError> {
        match c {
            '*' | 'O' | '1' => Ok(CellState::Alive),
            '.' | ' ' | '0' => Ok(CellState::Dead),
            _ => Err(GridError::UnknownCellChar(c)),
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// A bounded rows x cols board storing only its live cells.
///
/// Evolution is copy-on-write: `step` returns a brand-new grid and never
/// touches the receiver. `set` is the only in-place cell mutator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    live: HashSet<Cell>,
}

impl Grid {
    /// Creates an empty grid. Both dimensions must be positive.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            live: HashSet::new(),
        })
    }

    /// Parses a multi-line pattern: rows = line count, cols = first-line
    /// length. Lines shorter than `cols` are padded dead; characters past
    /// `cols` are ignored.
    pub fn from_pattern(pattern: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = pattern.trim().lines().collect();
        let rows = lines.len() as i32;
        let cols = lines.first().map_or(0, |l| l.chars().count()) as i32;
        let mut grid = Self::new(rows, cols)?;

        for (row, line) in lines.iter().enumerate() {
            for (col, c) in line.chars().take(cols as usize).enumerate() {
                if CellState::from_char(c)?.is_alive() {
                    grid.live.insert(Cell::new(row as i32, col as i32));
                }
            }
        }
        Ok(grid)
    }

    /// Constructor for dimensions already known to be positive (e.g. taken
    /// from an existing grid).
    pub(crate) fn empty_with_dimensions(rows: i32, cols: i32) -> Grid {
        debug_assert!(rows > 0 && cols > 0);
        Grid {
            rows,
            cols,
            live: HashSet::new(),
        }
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Bounds test.
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.row < self.rows && cell.col >= 0 && cell.col < self.cols
    }

    /// State of a cell; dead if absent or out of bounds.
    pub fn get(&self, cell: Cell) -> CellState {
        CellState::from(self.live.contains(&cell))
    }

    /// Sets a cell's state. No-op out of bounds; dead cells are never stored.
    pub fn set(&mut self, cell: Cell, state: CellState) {
        if !self.in_bounds(cell) {
            return;
        }
        if state.is_alive() {
            self.live.insert(cell);
        } else {
            self.live.remove(&cell);
        }
    }

    /// The in-bounds Moore neighbors, in N, S, E, W, NE, NW, SE, SW order.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        [
            cell.north(),
            cell.south(),
            cell.east(),
            cell.west(),
            cell.north_east(),
            cell.north_west(),
            cell.south_east(),
            cell.south_west(),
        ]
        .into_iter()
        .filter(|c| self.in_bounds(*c))
        .collect()
    }

    /// Number of live Moore neighbors, 0..=8.
    pub fn count_live_neighbors(&self, cell: Cell) -> u8 {
        self.neighbors(cell)
            .into_iter()
            .filter(|c| self.live.contains(c))
            .count() as u8
    }

    /// Row-major enumeration of every cell on the board.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (rows, cols) = (self.rows, self.cols);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }

    /// Iterator over copies of the live cells (unordered).
    pub fn live_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.live.iter().copied()
    }

    /// Count of live cells.
    pub fn population(&self) -> usize {
        self.live.len()
    }

    /// Removes all live cells.
    pub fn clear(&mut self) {
        self.live.clear();
    }

    /// Fills the grid with random cells at the given density (0.0 = empty,
    /// 1.0 = full), replacing the current contents.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, density: f64) {
        self.live.clear();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if rng.gen_range(0.0..1.0) < density {
                    self.live.insert(Cell::new(row, col));
                }
            }
        }
    }

    /// Advances one generation under `rules`, returning the new grid.
    pub fn step(&self, rules: &Rules) -> Grid {
        self.step_with(rules.births_on(0), |state, n| rules.next_state(state, n))
    }

    /// Advances one generation under a probabilistic rule, drawing each
    /// cell's Bernoulli trial from `rng`.
    pub fn step_probabilistic<R: Rng>(&self, rules: &ProbabilisticRules, rng: &mut R) -> Grid {
        self.step_with(rules.base().births_on(0), |state, n| {
            rules.next_state(state, n, &mut *rng)
        })
    }

    /// Shared evolution step. Candidates are the live cells and their
    /// in-bounds neighbors; that set is only sound while nothing can be born
    /// with 0 neighbors, so `full_scan` forces the rows x cols enumeration.
    fn step_with<F>(&self, full_scan: bool, mut next_state: F) -> Grid
    where
        F: FnMut(CellState, u8) -> CellState,
    {
        let candidates: HashSet<Cell> = if full_scan {
            self.cells().collect()
        } else {
            self.live
                .iter()
                .flat_map(|&cell| {
                    let mut around = self.neighbors(cell);
                    around.push(cell);
                    around
                })
                .collect()
        };

        let live = candidates
            .into_iter()
            .filter(|&cell| next_state(self.get(cell), self.count_live_neighbors(cell)).is_alive())
            .collect();

        Grid {
            rows: self.rows,
            cols: self.cols,
            live,
        }
    }
}

impl fmt::Display for Grid {
    /// Row-major `*`/`.` text, rows joined by newline, no trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                write!(f, "{}", self.get(Cell::new(row, col)).symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_pattern(s)
    }
}
