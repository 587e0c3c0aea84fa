// overlay.rs - Centered, clipped pattern placement

use std::ops::Range;

use crate::grid::Grid;

/// The part of a pattern that lands inside the grid once centered on an
/// anchor: `pattern_rows`/`pattern_cols` index the pattern, `top`/`left`
/// are the grid position of the first kept pattern cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    pub top: usize,
    pub left: usize,
    pub pattern_rows: Range<usize>,
    pub pattern_cols: Range<usize>,
}

impl Footprint {
    pub fn height(&self) -> usize {
        self.pattern_rows.len()
    }

    pub fn width(&self) -> usize {
        self.pattern_cols.len()
    }
}

/// Kept pattern indices along one axis, and the grid index of the first one.
/// Computed in i128 so anchors anywhere in the isize range cannot overflow.
fn clip_axis(anchor: isize, pattern_len: usize, grid_len: usize) -> Option<(usize, Range<usize>)> {
    let len = pattern_len as i128;
    let origin = anchor as i128 - len / 2;
    let start = (-origin).clamp(0, len);
    let end = (grid_len as i128 - origin).clamp(0, len);
    if start >= end {
        return None;
    }
    Some(((origin + start) as usize, start as usize..end as usize))
}

/// Where `pattern` lands when its center cell `(h / 2, w / 2)` sits on the
/// anchor. `None` when nothing of it is inside the grid.
pub fn footprint(
    grid: &Grid,
    pattern: &Grid,
    anchor_row: isize,
    anchor_col: isize,
) -> Option<Footprint> {
    let (top, pattern_rows) = clip_axis(anchor_row, pattern.rows(), grid.rows())?;
    let (left, pattern_cols) = clip_axis(anchor_col, pattern.cols(), grid.cols())?;
    Some(Footprint {
        top,
        left,
        pattern_rows,
        pattern_cols,
    })
}

/// In-place version of [`overlay`]. Returns how many cells it brought to life.
pub fn overlay_into(
    grid: &mut Grid,
    pattern: &Grid,
    anchor_row: isize,
    anchor_col: isize,
) -> usize {
    let Some(fp) = footprint(grid, pattern, anchor_row, anchor_col) else {
        return 0;
    };

    let mut born = 0;
    for (dr, pr) in fp.pattern_rows.clone().enumerate() {
        for (dc, pc) in fp.pattern_cols.clone().enumerate() {
            let (row, col) = (fp.top + dr, fp.left + dc);
            if pattern.is_alive(pr, pc) && !grid.is_alive(row, col) {
                grid.set_alive_unchecked(row, col);
                born += 1;
            }
        }
    }
    born
}

/// Composites `pattern` onto a copy of `grid`, centered on the anchor.
///
/// Pattern rows and columns that fall outside the grid are dropped. Cells
/// are OR-ed, so a live grid cell is never cleared. Anchors may be negative
/// or past the edge; a pattern with no overlap leaves the grid unchanged.
pub fn overlay(grid: &Grid, pattern: &Grid, anchor_row: isize, anchor_col: isize) -> Grid {
    let mut out = grid.clone();
    overlay_into(&mut out, pattern, anchor_row, anchor_col);
    out
}
