//! Conway's Game of Life on a bounded grid: the update rule, centered
//! pattern placement, a pattern catalog and the board that ties them to a
//! timer and pointer input. Nothing here depends on a UI toolkit.

pub mod board;
pub mod engine;
pub mod error;
pub mod grid;
pub mod overlay;
pub mod patterns;
pub mod preview;

pub use board::Board;
pub use engine::{Engine, RowTaskEngine, SerialEngine, next_generation, next_generation_rows};
pub use error::{LifeError, LifeResult};
pub use grid::Grid;
pub use overlay::{footprint, overlay, overlay_into};
pub use patterns::{Category, Pattern, PatternLibrary};
pub use preview::PreviewBoard;
