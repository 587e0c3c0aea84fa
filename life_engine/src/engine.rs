// engine.rs - Next-generation computation, serial and as per-row tokio tasks

use std::sync::Arc;

use crate::error::LifeResult;
use crate::grid::Grid;

/// Offsets of the eight Moore neighbors.
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Live neighbors of (row, col). Positions past an edge are skipped, so
/// corner cells see at most three neighbors and edge cells at most five.
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let mut count = 0;
    for &(dr, dc) in &NEIGHBORS {
        let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
            continue;
        };
        if grid.is_alive(nr, nc) {
            count += 1;
        }
    }
    count
}

/// B3/S23.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

fn next_row(grid: &Grid, row: usize) -> Vec<bool> {
    (0..grid.cols())
        .map(|col| next_state(grid.is_alive(row, col), live_neighbors(grid, row, col)))
        .collect()
}

/// Computes the following generation into a fresh grid of the same shape.
pub fn next_generation(grid: &Grid) -> Grid {
    let cells = (0..grid.rows()).flat_map(|row| next_row(grid, row)).collect();
    Grid::from_cells(grid.rows(), grid.cols(), cells)
}

/// Row coroutine: computes one row of the next generation, yielding after
/// every cell so sibling rows interleave on the runtime.
async fn process_row(row_index: usize, current: Arc<Grid>) -> (usize, Vec<bool>) {
    let mut row_result = Vec::with_capacity(current.cols());
    for col in 0..current.cols() {
        let alive = current.is_alive(row_index, col);
        row_result.push(next_state(alive, live_neighbors(&current, row_index, col)));
        tokio::task::yield_now().await;
    }
    (row_index, row_result)
}

/// Same result as [`next_generation`], with every row spawned as its own task.
pub async fn next_generation_rows(grid: &Grid) -> LifeResult<Grid> {
    let snapshot = Arc::new(grid.clone());

    let handles: Vec<_> = (0..grid.rows())
        .map(|row| tokio::spawn(process_row(row, Arc::clone(&snapshot))))
        .collect();

    let mut rows = vec![Vec::new(); grid.rows()];
    for handle in handles {
        let (row_index, completed_row) = handle.await?;
        rows[row_index] = completed_row;
    }

    Ok(Grid::from_cells(grid.rows(), grid.cols(), rows.concat()))
}

/// Strategy used by a [`Board`](crate::board::Board) to advance its grid.
pub trait Engine {
    fn step(&self, grid: &Grid) -> LifeResult<Grid>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SerialEngine;

impl Engine for SerialEngine {
    fn step(&self, grid: &Grid) -> LifeResult<Grid> {
        Ok(next_generation(grid))
    }

    fn name(&self) -> &'static str {
        "serial"
    }
}

/// Runs [`next_generation_rows`] on an owned runtime, blocking until every
/// row has finished so a step is never observed half-done.
pub struct RowTaskEngine {
    runtime: tokio::runtime::Runtime,
}

impl RowTaskEngine {
    pub fn new() -> LifeResult<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        Ok(Self { runtime })
    }
}

impl Engine for RowTaskEngine {
    fn step(&self, grid: &Grid) -> LifeResult<Grid> {
        self.runtime.block_on(next_generation_rows(grid))
    }

    fn name(&self) -> &'static str {
        "rows"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn grid(rows: &[&str]) -> Grid {
        Grid::parse("test", rows).unwrap()
    }

    #[test]
    fn shape_is_preserved() {
        for (rows, cols) in [(1, 1), (3, 7), (10, 4), (100, 100)] {
            let g = Grid::new(rows, cols);
            assert_eq!(next_generation(&g).shape(), (rows, cols));
        }
    }

    #[test]
    fn block_is_still_life() {
        let mut g = Grid::square(100);
        for (r, c) in [(10, 10), (10, 11), (11, 10), (11, 11)] {
            g.set(r, c, true).unwrap();
        }
        assert_eq!(next_generation(&g), g);
    }

    #[test]
    fn blinker_has_period_two() {
        let horizontal = grid(&[".....", ".....", ".###.", ".....", "....."]);
        let vertical = grid(&[".....", "..#..", "..#..", "..#..", "....."]);

        let once = next_generation(&horizontal);
        assert_eq!(once, vertical);
        assert_eq!(next_generation(&once), horizontal);
    }

    #[test]
    fn corner_cell_counts_at_most_three() {
        let full = grid(&["###", "###", "###"]);
        assert_eq!(live_neighbors(&full, 0, 0), 3);
        assert_eq!(live_neighbors(&full, 0, 1), 5);
        assert_eq!(live_neighbors(&full, 1, 1), 8);
        assert_eq!(live_neighbors(&full, 2, 2), 3);
    }

    #[test]
    fn lone_corner_cell_dies() {
        let mut g = Grid::square(5);
        g.set(0, 0, true).unwrap();
        assert_eq!(next_generation(&g).population(), 0);
    }

    #[test]
    fn edges_do_not_wrap() {
        // A toroidal board would keep this vertical blinker alive across the seam.
        let g = grid(&["#...", "#...", "....", "#..."]);
        let next = next_generation(&g);
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn edge_cells_follow_rule() {
        // Three cells along the top edge: the middle column births at row 1.
        let g = grid(&["###", "...", "..."]);
        assert_eq!(next_generation(&g), grid(&[".#.", ".#.", "..."]));
    }

    #[test]
    fn rule_table() {
        assert!(next_state(false, 3));
        assert!(!next_state(false, 2));
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        assert!(!next_state(true, 1));
        assert!(!next_state(true, 4));
        assert!(!next_state(false, 8));
    }

    #[test]
    fn input_is_not_mutated() {
        let g = grid(&[".#.", ".#.", ".#."]);
        let before = g.clone();
        let _ = next_generation(&g);
        assert_eq!(g, before);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn row_tasks_match_serial() {
        let mut rng = StdRng::seed_from_u64(42);
        let g = Grid::random(40, 33, 0.35, &mut rng).unwrap();
        let serial = next_generation(&g);
        let rows = next_generation_rows(&g).await.unwrap();
        assert_eq!(rows, serial);
    }

    #[test]
    fn row_task_engine_steps_like_serial() {
        let mut rng = StdRng::seed_from_u64(3);
        let g = Grid::random(20, 20, 0.5, &mut rng).unwrap();
        let engine = RowTaskEngine::new().unwrap();
        assert_eq!(engine.step(&g).unwrap(), SerialEngine.step(&g).unwrap());
        assert_eq!(engine.name(), "rows");
    }
}
