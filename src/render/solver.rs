//! Column placement for the automatic rendition.
//!
//! Continuous x coordinates are mapped to character columns using the
//! page's average character width. Two kinds of collision are then
//! repaired:
//!
//! - within a row, every cell must start at least one column after the
//!   previous cell's text ends;
//! - between adjacent rows, a lower cell that starts inside an upper cell's
//!   span without being one of its downward neighbors is a false vertical
//!   alignment, and is pushed past the upper cell's text.
//!
//! The inter-row repair is a bounded fixed-point iteration. Each pass only
//! moves cells to the right, and the loop stops after the first pass that
//! moves nothing or after [`MAX_REPAIR_PASSES`] passes, whichever comes
//! first. Hitting the cap is reported, not treated as an error.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::layout::stats::{round_half_up, PageMetrics};
use crate::layout::{build_rows, RenditionMode};
use crate::model::{Fragment, GridCell, GridRow, RenditionGrid, Row};

use super::Rendition;

/// Upper bound on inter-row repair passes.
pub const MAX_REPAIR_PASSES: usize = 10;

/// Advisory attached to a rendition whose repair loop hit the pass cap.
pub const IMPRECISE_LAYOUT_WARNING: &str =
    "Warning: text reconstruction reached max iterations. Layout may be imprecise.";

/// A fragment's position on the character grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCell {
    /// Fragment index
    pub fragment: usize,
    /// First column of the cell
    pub start_col: i64,
    /// Column of the fragment's right edge
    pub physical_end_col: i64,
    /// Character count of the trimmed text
    pub text_len: i64,
}

impl PlacedCell {
    /// Place the fragment at `index` using the page's average character
    /// width.
    pub fn place(index: usize, fragment: &Fragment, avg_char_width: f64) -> Self {
        Self {
            fragment: index,
            start_col: round_half_up(fragment.bounds.min_x / avg_char_width),
            physical_end_col: round_half_up(fragment.bounds.max_x / avg_char_width),
            text_len: fragment.visible_len() as i64,
        }
    }

    /// Column just past the trimmed text.
    pub fn text_end_col(&self) -> i64 {
        self.start_col.saturating_add(self.text_len)
    }

    fn shift(&mut self, amount: i64) {
        self.start_col = self.start_col.saturating_add(amount);
        self.physical_end_col = self.physical_end_col.saturating_add(amount);
    }
}

/// Push cells right until each starts at least one column after the
/// previous cell's text. A push carries along every later cell in the row.
pub fn resolve_row_overlaps(row: &mut [PlacedCell]) {
    for j in 1..row.len() {
        let required = row[j - 1].text_end_col().saturating_add(1);
        if row[j].start_col < required {
            let push = required.saturating_sub(row[j].start_col);
            for cell in &mut row[j..] {
                cell.shift(push);
            }
        }
    }
}

/// Fragments that continue `source`'s column below it.
///
/// A target qualifies when it starts strictly lower, overlaps the source
/// horizontally, and its gap below the source lies in `[0, max_distance)`.
pub fn find_downward_neighbors(
    source: usize,
    fragments: &[Fragment],
    max_distance: f64,
) -> HashSet<usize> {
    let src = &fragments[source].bounds;
    fragments
        .iter()
        .enumerate()
        .filter(|&(i, target)| {
            if i == source || target.bounds.min_y <= src.min_y {
                return false;
            }
            let gap = target.bounds.min_y - src.max_y;
            target.bounds.overlaps_horizontally(src) && gap >= 0.0 && gap < max_distance
        })
        .map(|(i, _)| i)
        .collect()
}

/// Iterative column solver over the rows of one page.
pub struct ColumnSolver<'a> {
    fragments: &'a [Fragment],
    metrics: PageMetrics,
    rows: Vec<Row>,
    neighbors: Vec<HashSet<usize>>,
    cells: Vec<Vec<PlacedCell>>,
}

impl<'a> ColumnSolver<'a> {
    /// Measure the page, precompute downward neighbors, build rows and
    /// place every fragment, resolving overlaps inside each row.
    pub fn new(fragments: &'a [Fragment], parallel: bool) -> Self {
        let metrics = PageMetrics::from_fragments(fragments);
        let reach = metrics.max_vertical_search();

        let neighbors: Vec<HashSet<usize>> = if parallel {
            (0..fragments.len())
                .into_par_iter()
                .map(|i| find_downward_neighbors(i, fragments, reach))
                .collect()
        } else {
            (0..fragments.len())
                .map(|i| find_downward_neighbors(i, fragments, reach))
                .collect()
        };

        let rows = build_rows(fragments);
        let mut cells: Vec<Vec<PlacedCell>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&i| PlacedCell::place(i, &fragments[i], metrics.avg_char_width))
                    .collect()
            })
            .collect();
        for row in &mut cells {
            resolve_row_overlaps(row);
        }

        Self {
            fragments,
            metrics,
            rows,
            neighbors,
            cells,
        }
    }

    /// Page statistics used for placement.
    pub fn metrics(&self) -> &PageMetrics {
        &self.metrics
    }

    /// Rows in top-to-bottom order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Current cell placement, parallel to [`rows`](Self::rows).
    pub fn cells(&self) -> &[Vec<PlacedCell>] {
        &self.cells
    }

    /// Downward neighbors of a fragment.
    pub fn neighbors(&self, fragment: usize) -> Option<&HashSet<usize>> {
        self.neighbors.get(fragment)
    }

    /// Run one inter-row repair pass over every adjacent row pair, top to
    /// bottom. Returns whether any cell moved.
    pub fn repair_pass(&mut self) -> bool {
        let neighbors = &self.neighbors;
        let mut moved = false;

        for i in 1..self.cells.len() {
            let (upper, lower) = self.cells.split_at_mut(i);
            let top = &upper[i - 1];
            let bottom = &mut lower[0];

            let mut shifts = vec![0i64; bottom.len()];
            for top_cell in top {
                let expected = &neighbors[top_cell.fragment];
                for (j, bottom_cell) in bottom.iter().enumerate() {
                    let starts_inside = bottom_cell.start_col >= top_cell.start_col
                        && bottom_cell.start_col <= top_cell.physical_end_col;
                    if !starts_inside || expected.contains(&bottom_cell.fragment) {
                        continue;
                    }
                    let push = top_cell
                        .text_end_col()
                        .saturating_add(1)
                        .saturating_sub(bottom_cell.start_col);
                    if push > 0 {
                        shifts[j] = shifts[j].max(push);
                    }
                }
            }

            if shifts.iter().any(|&s| s > 0) {
                moved = true;
                for (cell, &shift) in bottom.iter_mut().zip(&shifts) {
                    if shift > 0 {
                        cell.shift(shift);
                    }
                }
                resolve_row_overlaps(bottom);
            }
        }

        moved
    }

    /// Iterate repair passes until stable or capped, then assemble the grid.
    pub fn solve(mut self) -> Rendition {
        let mut passes = 0;
        let mut converged = false;
        while passes < MAX_REPAIR_PASSES {
            passes += 1;
            if !self.repair_pass() {
                converged = true;
                break;
            }
        }

        let warning = if converged {
            log::debug!("Column layout stabilized after {} passes", passes);
            None
        } else {
            log::warn!(
                "Column layout still changing after {} passes",
                MAX_REPAIR_PASSES
            );
            Some(IMPRECISE_LAYOUT_WARNING.to_string())
        };

        Rendition {
            mode: RenditionMode::Automatic,
            grid: self.assemble(),
            warning,
            passes,
        }
    }

    /// Lay rows out top to bottom, inserting blank rows for vertical gaps
    /// of more than one median line height.
    fn assemble(&self) -> RenditionGrid {
        let mut grid = RenditionGrid::new();
        let median = self.metrics.median_height;
        let row_y = |row: &Row| self.fragments[row[0]].bounds.min_y;

        let Some(first) = self.rows.first() else {
            return grid;
        };
        let mut last_y = row_y(first);

        for (row, cells) in self.rows.iter().zip(&self.cells) {
            let y = row_y(row);
            if median > 0.0 {
                let jump = round_half_up((y - last_y) / median);
                if jump > 1 {
                    grid.push_blank_rows((jump - 1) as usize);
                }
            }

            grid.push_row(GridRow::new(
                cells
                    .iter()
                    .map(|c| GridCell::new(self.fragments[c.fragment].text.clone(), c.start_col))
                    .collect(),
            ));
            last_y = y;
        }

        grid
    }
}
