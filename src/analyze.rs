use std::collections::HashMap;

use crate::grid::{Cell, Grid};
use crate::rules::Rules;

/// Cells whose state differs between `grid` and its next generation, in
/// row-major order over the full board.
pub fn changing_cells(grid: &Grid, rules: &Rules) -> Vec<Cell> {
    let next = grid.step(rules);
    grid.cells()
        .filter(|&cell| grid.get(cell) != next.get(cell))
        .collect()
}

/// Groups every cell on the board by its live-neighbor count. Counts with no
/// cells are simply absent from the map.
pub fn group_by_neighbor_count(grid: &Grid) -> HashMap<u8, Vec<Cell>> {
    let mut groups: HashMap<u8, Vec<Cell>> = HashMap::new();
    for cell in grid.cells() {
        groups
            .entry(grid.count_live_neighbors(cell))
            .or_default()
            .push(cell);
    }
    groups
}

/// Live cells with no live neighbors.
pub fn isolated_cells(grid: &Grid) -> Vec<Cell> {
    grid.live_cells()
        .filter(|&cell| grid.count_live_neighbors(cell) == 0)
        .collect()
}

/// Ratio of live cells to total cells, 0.0..=1.0.
pub fn density(grid: &Grid) -> f64 {
    grid.population() as f64 / (grid.rows() as f64 * grid.cols() as f64)
}
