use crate::grid::{Cell, CellState, Grid};

/// Rotates 90 degrees clockwise: (r, c) on an NxM board maps to
/// (c, N-1-r) on the resulting MxN board.
pub fn rotate90(grid: &Grid) -> Grid {
    let rows = grid.rows();
    let mut out = Grid::empty_with_dimensions(grid.cols(), rows);
    for cell in grid.live_cells() {
        out.set(Cell::new(cell.col, rows - 1 - cell.row), CellState::Alive);
    }
    out
}

/// Mirrors across the vertical axis: (r, c) maps to (r, cols-1-c).
pub fn flip_horizontal(grid: &Grid) -> Grid {
    let cols = grid.cols();
    let mut out = Grid::empty_with_dimensions(grid.rows(), cols);
    for cell in grid.live_cells() {
        out.set(Cell::new(cell.row, cols - 1 - cell.col), CellState::Alive);
    }
    out
}

/// Mirrors across the horizontal axis: (r, c) maps to (rows-1-r, c).
pub fn flip_vertical(grid: &Grid) -> Grid {
    let rows = grid.rows();
    let mut out = Grid::empty_with_dimensions(rows, grid.cols());
    for cell in grid.live_cells() {
        out.set(Cell::new(rows - 1 - cell.row, cell.col), CellState::Alive);
    }
    out
}

/// Shifts every live cell by the given deltas. Cells pushed off the board
/// are dropped; dimensions are unchanged.
pub fn translate(grid: &Grid, row_delta: i32, col_delta: i32) -> Grid {
    let mut out = Grid::empty_with_dimensions(grid.rows(), grid.cols());
    for cell in grid.live_cells() {
        // set() already ignores out-of-bounds targets, which is the clip.
        out.set(cell.translate(row_delta, col_delta), CellState::Alive);
    }
    out
}

/// Anchors (in row-major order) where placing `pattern`'s top-left corner
/// keeps every pattern live cell in-bounds and off the target's live cells.
pub fn find_valid_placements(target: &Grid, pattern: &Grid) -> Vec<Cell> {
    let pattern_live: Vec<Cell> = pattern.live_cells().collect();
    target
        .cells()
        .filter(|&anchor| {
            pattern_live.iter().all(|&offset| {
                let dst = anchor.translate(offset.row, offset.col);
                target.in_bounds(dst) && !target.get(dst).is_alive()
            })
        })
        .collect()
}
