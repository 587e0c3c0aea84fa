// grid.rs - Grid type for Conway's Game of Life

use std::fmt;

use rand::Rng;

use crate::error::{LifeError, LifeResult};

/// Default side length of the main board.
pub const DEFAULT_BOARD_SIZE: usize = 100;

/// A rectangular matrix of alive/dead cells stored row-major.
///
/// Every row has the same length; the shape is fixed once the grid exists.
/// Grids built from nested rows go through [`Grid::from_rows`], which
/// rejects ragged input.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid of the given shape.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    pub fn from_rows(rows: Vec<Vec<bool>>) -> LifeResult<Self> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(LifeError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != expected {
                return Err(LifeError::Ragged {
                    row,
                    expected,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }

        Ok(Self {
            rows: rows.len(),
            cols: expected,
            cells,
        })
    }

    /// Parses rows of `.` (dead) and `#` (alive).
    pub fn parse(name: &str, rows: &[&str]) -> LifeResult<Self> {
        let mut parsed = Vec::with_capacity(rows.len());
        for (row, text) in rows.iter().enumerate() {
            let values = text
                .chars()
                .map(|ch| match ch {
                    '#' => Ok(true),
                    '.' => Ok(false),
                    found => Err(LifeError::InvalidPattern {
                        name: name.to_owned(),
                        row,
                        found,
                    }),
                })
                .collect::<LifeResult<Vec<bool>>>()?;
            parsed.push(values);
        }
        Self::from_rows(parsed)
    }

    /// Grid where each cell is alive with `probability`.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        probability: f64,
        rng: &mut R,
    ) -> LifeResult<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LifeError::InvalidProbability(probability));
        }
        let cells = (0..rows * cols).map(|_| rng.gen_bool(probability)).collect();
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        (row < self.rows && col < self.cols).then(|| self.cells[row * self.cols + col])
    }

    /// Out-of-range positions read as dead.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).unwrap_or(false)
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> LifeResult<()> {
        let index = self.index(row, col)?;
        self.cells[index] = alive;
        Ok(())
    }

    pub fn toggle(&mut self, row: usize, col: usize) -> LifeResult<bool> {
        let index = self.index(row, col)?;
        self.cells[index] = !self.cells[index];
        Ok(self.cells[index])
    }

    fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        (0..self.rows).map(move |row| self.row(row))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    /// Copy surrounded by `margin` dead cells on every side.
    pub fn padded(&self, margin: usize) -> Self {
        let mut out = Self::new(self.rows + 2 * margin, self.cols + 2 * margin);
        for (row, values) in self.iter_rows().enumerate() {
            let start = (row + margin) * out.cols + margin;
            out.cells[start..start + self.cols].copy_from_slice(values);
        }
        out
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub(crate) fn set_alive_unchecked(&mut self, row: usize, col: usize) {
        self.cells[row * self.cols + col] = true;
    }

    fn index(&self, row: usize, col: usize) -> LifeResult<usize> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(LifeError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for values in self.iter_rows() {
            for &alive in values {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.rows, self.cols)?;
        fmt::Display::fmt(self, f)
    }
}
