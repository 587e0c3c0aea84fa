// preview.rs - Self-running thumbnail of a library pattern

use std::time::{Duration, Instant};

use crate::board::Board;
use crate::engine::Engine;
use crate::error::LifeResult;
use crate::grid::Grid;
use crate::patterns::Pattern;

/// Dead margin around a pattern in its thumbnail.
pub const PREVIEW_MARGIN: usize = 1;

/// One animated library card. Each preview owns its board and timer, so
/// cards never observe each other or the main board.
#[derive(Debug, Clone)]
pub struct PreviewBoard {
    pattern: Pattern,
    board: Board,
}

impl PreviewBoard {
    pub fn new(pattern: Pattern, update_interval: Duration) -> Self {
        let board =
            Board::from_grid(pattern.grid().padded(PREVIEW_MARGIN)).with_interval(update_interval);
        Self { pattern, board }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn grid(&self) -> &Grid {
        self.board.grid()
    }

    pub fn generation(&self) -> u64 {
        self.board.generation()
    }

    pub fn tick_if_due(&mut self, now: Instant, engine: &dyn Engine) -> LifeResult<bool> {
        self.board.tick_if_due(now, engine)
    }

    pub fn time_to_next_tick(&self, now: Instant) -> Option<Duration> {
        self.board.time_to_next_tick(now)
    }

    /// Back to the pattern as authored.
    pub fn reset(&mut self) {
        let interval = self.board.update_interval();
        self.board =
            Board::from_grid(self.pattern.grid().padded(PREVIEW_MARGIN)).with_interval(interval);
    }
}

/// A preview for every pattern, in catalog order.
pub fn previews<'a>(
    patterns: impl IntoIterator<Item = &'a Pattern>,
    update_interval: Duration,
) -> Vec<PreviewBoard> {
    patterns
        .into_iter()
        .map(|pattern| PreviewBoard::new(pattern.clone(), update_interval))
        .collect()
}
