// board.rs - Grid state holder: current grid, update trigger, pointer and placement modes

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::Rng;

use crate::engine::Engine;
use crate::error::{LifeError, LifeResult};
use crate::grid::Grid;
use crate::overlay;
use crate::patterns::Pattern;

pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_POPULATION: f64 = 0.9;

/// Owns the live grid and decides when it advances.
///
/// Ticking happens only while `updating` is set and no pattern placement
/// is pending. Every tick swaps in a freshly computed grid; user edits
/// write single cells directly.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    generation: u64,
    updating: bool,
    update_interval: Duration,
    last_update: Instant,
    drawing: bool,
    placing: Option<Pattern>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self::from_grid(Grid::square(size))
    }

    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            generation: 0,
            updating: true,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            last_update: Instant::now(),
            drawing: false,
            placing: None,
        }
    }

    pub fn with_interval(mut self, update_interval: Duration) -> Self {
        self.update_interval = update_interval;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Replaces the grid wholesale; the shape has to match.
    pub fn set_grid(&mut self, grid: Grid) -> LifeResult<()> {
        if grid.shape() != self.grid.shape() {
            return Err(LifeError::DimensionMismatch {
                rows: self.grid.rows(),
                cols: self.grid.cols(),
                found_rows: grid.rows(),
                found_cols: grid.cols(),
            });
        }
        self.grid = grid;
        self.generation = 0;
        Ok(())
    }

    pub fn size(&self) -> (usize, usize) {
        self.grid.shape()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<bool> {
        self.grid.get(row, col)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> LifeResult<()> {
        self.grid.set(row, col, alive)
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) -> LifeResult<bool> {
        self.grid.toggle(row, col)
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Share of live cells over the whole area, 0..=100.
    pub fn population_percent(&self) -> f64 {
        match self.grid.area() {
            0 => 0.0,
            area => self.population() as f64 * 100.0 / area as f64,
        }
    }

    // --- update trigger ---

    pub fn updating(&self) -> bool {
        self.updating
    }

    pub fn set_updating(&mut self, updating: bool) {
        if updating && !self.updating {
            // resume on a fresh interval rather than jumping a tick immediately
            self.last_update = Instant::now();
        }
        self.updating = updating;
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    pub fn set_update_interval(&mut self, update_interval: Duration) {
        self.update_interval = update_interval;
    }

    pub fn is_ticking(&self) -> bool {
        self.updating && self.placing.is_none()
    }

    /// Time left until the next tick is due, `None` while ticking is off.
    pub fn time_to_next_tick(&self, now: Instant) -> Option<Duration> {
        self.is_ticking().then(|| {
            let elapsed = now.saturating_duration_since(self.last_update);
            self.update_interval.saturating_sub(elapsed)
        })
    }

    /// Advances one generation unconditionally.
    pub fn step(&mut self, engine: &dyn Engine) -> LifeResult<()> {
        let next = engine.step(&self.grid)?;
        self.grid = next;
        self.generation += 1;
        debug!(
            "generation {} ({} alive, {} engine)",
            self.generation,
            self.population(),
            engine.name()
        );
        Ok(())
    }

    /// Steps once if ticking is enabled and the interval has elapsed since
    /// the previous tick. Returns whether a step happened.
    pub fn tick_if_due(&mut self, now: Instant, engine: &dyn Engine) -> LifeResult<bool> {
        let elapsed = now.saturating_duration_since(self.last_update);
        if !self.is_ticking() || elapsed < self.update_interval {
            return Ok(false);
        }
        self.step(engine)?;
        self.last_update = now;
        Ok(true)
    }

    // --- bulk edits ---

    /// Every cell becomes alive with `probability`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, probability: f64, rng: &mut R) -> LifeResult<()> {
        let (rows, cols) = self.grid.shape();
        self.grid = Grid::random(rows, cols, probability, rng)?;
        self.generation = 0;
        info!(
            "randomized board at {:.0}% population: {} alive",
            probability * 100.0,
            self.population()
        );
        Ok(())
    }

    pub fn clear(&mut self) {
        let (rows, cols) = self.grid.shape();
        self.grid = Grid::new(rows, cols);
        self.generation = 0;
        info!("cleared board");
    }

    // --- pointer interaction ---

    /// Pointer entered the board: hold the simulation still.
    pub fn pointer_enter(&mut self) {
        self.set_updating(false);
    }

    /// Pointer left the board: end any drag and resume.
    pub fn pointer_leave(&mut self) {
        self.drawing = false;
        self.set_updating(true);
    }

    pub fn press(&mut self) {
        self.drawing = true;
    }

    pub fn release(&mut self) {
        self.drawing = false;
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// A plain click flips the cell.
    pub fn click(&mut self, row: usize, col: usize) -> LifeResult<()> {
        self.toggle_cell(row, col).map(|_| ())
    }

    /// While the button is held, every cell the pointer crosses comes alive.
    /// Returns whether the cell was painted.
    pub fn drag_over(&mut self, row: usize, col: usize) -> LifeResult<bool> {
        if !self.drawing {
            return Ok(false);
        }
        self.set_cell(row, col, true)?;
        Ok(true)
    }

    // --- pattern placement ---

    /// Freezes ticking until the pattern is committed or cancelled.
    pub fn begin_placement(&mut self, pattern: Pattern) {
        info!("placing pattern '{}'", pattern.name);
        self.drawing = false;
        self.placing = Some(pattern);
    }

    pub fn placing(&self) -> Option<&Pattern> {
        self.placing.as_ref()
    }

    pub fn cancel_placement(&mut self) {
        if let Some(pattern) = self.placing.take() {
            info!("cancelled placement of '{}'", pattern.name);
        }
    }

    /// The grid as it would look with the pending pattern centered on
    /// (row, col). `None` outside placement mode.
    pub fn placement_preview(&self, row: isize, col: isize) -> Option<Grid> {
        self.placing
            .as_ref()
            .map(|pattern| overlay::overlay(&self.grid, pattern.grid(), row, col))
    }

    /// Writes the pending pattern into the grid and leaves placement mode.
    /// Returns how many cells were born, or `None` if nothing was pending.
    pub fn commit_placement(&mut self, row: isize, col: isize) -> Option<usize> {
        let pattern = self.placing.take()?;
        if overlay::footprint(&self.grid, pattern.grid(), row, col).is_none() {
            warn!("'{}' at ({row}, {col}) lies entirely off the board", pattern.name);
        }
        let born = overlay::overlay_into(&mut self.grid, pattern.grid(), row, col);
        info!("placed '{}' at ({row}, {col}): {born} cells born", pattern.name);
        self.last_update = Instant::now();
        Some(born)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SerialEngine;
    use crate::patterns::PatternLibrary;
    use rand::{SeedableRng, rngs::StdRng};

    fn glider() -> Pattern {
        PatternLibrary::load().unwrap().find("Glider").unwrap().clone()
    }

    #[test]
    fn clear_kills_everything() {
        let mut board = Board::new(30);
        board.randomize(0.5, &mut StdRng::seed_from_u64(5)).unwrap();
        assert!(board.population() > 0);
        board.clear();
        assert_eq!(board.population(), 0);
        assert_eq!(board.generation(), 0);
    }

    #[test]
    fn randomize_matches_probability() {
        let mut board = Board::new(200);
        let mut rng = StdRng::seed_from_u64(2024);
        for probability in [0.1, 0.5, DEFAULT_POPULATION] {
            board.randomize(probability, &mut rng).unwrap();
            let fraction = board.population_percent() / 100.0;
            assert!((fraction - probability).abs() < 0.02, "{fraction} vs {probability}");
        }
    }

    #[test]
    fn randomize_rejects_bad_probability() {
        let mut board = Board::new(4);
        let err = board.randomize(2.0, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, LifeError::InvalidProbability(p) if p == 2.0));
    }

    #[test]
    fn population_percent_uses_area() {
        let mut board = Board::new(10);
        for col in 0..10 {
            board.set_cell(0, col, true).unwrap();
        }
        assert_eq!(board.population(), 10);
        assert!((board.population_percent() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tick_waits_for_interval() {
        let mut board = Board::new(5).with_interval(Duration::from_millis(200));
        board.set_cell(2, 1, true).unwrap();
        board.set_cell(2, 2, true).unwrap();
        board.set_cell(2, 3, true).unwrap();
        let start = board.last_update;

        assert!(!board.tick_if_due(start + Duration::from_millis(50), &SerialEngine).unwrap());
        assert_eq!(board.generation(), 0);

        assert!(board.tick_if_due(start + Duration::from_millis(200), &SerialEngine).unwrap());
        assert_eq!(board.generation(), 1);
        assert!(board.cell(1, 2).unwrap());
        assert!(!board.cell(2, 1).unwrap());

        // interval restarts from the tick
        assert!(!board.tick_if_due(start + Duration::from_millis(300), &SerialEngine).unwrap());
        assert!(board.tick_if_due(start + Duration::from_millis(400), &SerialEngine).unwrap());
        assert_eq!(board.generation(), 2);
    }

    #[test]
    fn hover_pauses_and_leave_resumes() {
        let mut board = Board::new(5).with_interval(Duration::ZERO);
        board.pointer_enter();
        assert!(!board.is_ticking());
        assert!(!board.tick_if_due(Instant::now(), &SerialEngine).unwrap());

        board.press();
        board.pointer_leave();
        assert!(board.is_ticking());
        assert!(!board.is_drawing());
        assert!(board.tick_if_due(Instant::now(), &SerialEngine).unwrap());
    }

    #[test]
    fn click_toggles_and_drag_paints() {
        let mut board = Board::new(5);
        board.click(1, 1).unwrap();
        assert_eq!(board.cell(1, 1), Some(true));
        board.click(1, 1).unwrap();
        assert_eq!(board.cell(1, 1), Some(false));

        assert!(!board.drag_over(2, 2).unwrap());
        assert_eq!(board.cell(2, 2), Some(false));

        board.press();
        assert!(board.drag_over(2, 2).unwrap());
        assert!(board.drag_over(2, 2).unwrap());
        assert_eq!(board.cell(2, 2), Some(true), "painting never clears");
        board.release();
        assert!(!board.drag_over(3, 3).unwrap());
    }

    #[test]
    fn edits_outside_board_fail() {
        let mut board = Board::new(5);
        assert!(matches!(board.click(5, 0), Err(LifeError::OutOfBounds { .. })));
        board.press();
        assert!(board.drag_over(0, 9).is_err());
    }

    #[test]
    fn set_grid_checks_shape() {
        let mut board = Board::new(5);
        assert!(matches!(
            board.set_grid(Grid::square(6)),
            Err(LifeError::DimensionMismatch { rows: 5, found_rows: 6, .. })
        ));
        let mut replacement = Grid::square(5);
        replacement.set(0, 0, true).unwrap();
        board.set_grid(replacement).unwrap();
        assert_eq!(board.population(), 1);
    }

    #[test]
    fn placement_freezes_and_commits() {
        let mut board = Board::new(10).with_interval(Duration::ZERO);
        board.begin_placement(glider());
        assert!(!board.is_ticking());
        assert!(!board.tick_if_due(Instant::now(), &SerialEngine).unwrap());

        let preview = board.placement_preview(5, 5).unwrap();
        assert_eq!(preview.population(), 5);
        assert_eq!(board.population(), 0, "preview must not commit");

        assert_eq!(board.commit_placement(5, 5), Some(5));
        assert_eq!(board.grid(), &preview);
        assert!(board.placing().is_none());
        assert!(board.is_ticking());
        assert_eq!(board.commit_placement(5, 5), None);
    }

    #[test]
    fn placement_at_corner_is_clipped() {
        let mut board = Board::new(10);
        board.set_cell(9, 9, true).unwrap();
        board.begin_placement(glider());
        assert_eq!(board.commit_placement(0, 0), Some(3));
        assert!(board.cell(9, 9).unwrap());
        assert_eq!(board.population(), 4);
    }

    #[test]
    fn cancel_leaves_grid_untouched() {
        let mut board = Board::new(10);
        board.begin_placement(glider());
        board.cancel_placement();
        assert!(board.placement_preview(3, 3).is_none());
        assert_eq!(board.population(), 0);
        assert!(board.is_ticking());
    }

    #[test]
    fn changed_interval_applies_to_next_tick() {
        let mut board = Board::new(3);
        let start = board.last_update;
        assert!(!board.tick_if_due(start + Duration::from_millis(100), &SerialEngine).unwrap());

        board.set_update_interval(Duration::from_millis(100));
        assert_eq!(board.update_interval(), Duration::from_millis(100));
        assert!(board.tick_if_due(start + Duration::from_millis(100), &SerialEngine).unwrap());
    }

    #[test]
    fn time_to_next_tick_counts_down() {
        let board = Board::new(3).with_interval(Duration::from_millis(100));
        let now = board.last_update + Duration::from_millis(30);
        assert_eq!(board.time_to_next_tick(now), Some(Duration::from_millis(70)));

        let mut paused = board.clone();
        paused.set_updating(false);
        assert_eq!(paused.time_to_next_tick(now), None);
    }
}
