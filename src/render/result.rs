//! Rendition result with statistics.

use serde::{Deserialize, Serialize};

use crate::layout::RenditionMode;
use crate::model::RenditionGrid;

/// Result of rendering a page onto the character grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rendition {
    /// Mode that produced the grid
    pub mode: RenditionMode,

    /// The placed text
    pub grid: RenditionGrid,

    /// Set when column repair stopped at its pass cap
    pub warning: Option<String>,

    /// Repair passes run (0 for the simple rendition)
    pub passes: usize,
}

impl Rendition {
    /// Create a rendition without a warning.
    pub fn new(mode: RenditionMode, grid: RenditionGrid) -> Self {
        Self {
            mode,
            grid,
            warning: None,
            passes: 0,
        }
    }

    /// Whether column repair converged.
    pub fn is_precise(&self) -> bool {
        self.warning.is_none()
    }

    /// The grid as plain text, without the warning.
    pub fn grid_text(&self) -> String {
        self.grid.to_text()
    }

    /// Collect statistics over the grid.
    pub fn stats(&self) -> RenditionStats {
        let mut stats = RenditionStats::new();
        for row in &self.grid.rows {
            stats.add_row(row.is_blank());
            for cell in &row.cells {
                stats.count_cell(&cell.text);
            }
        }
        stats.width = self.grid.width();
        stats.passes = self.passes;
        stats
    }
}

/// Statistics about a rendered grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenditionStats {
    /// Rows including blanks
    pub row_count: u32,

    /// Blank rows inserted for vertical gaps
    pub blank_row_count: u32,

    /// Placed cells
    pub cell_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,

    /// Widest row, in columns
    pub width: i64,

    /// Repair passes run
    pub passes: usize,
}

impl RenditionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a row.
    pub fn add_row(&mut self, blank: bool) {
        self.row_count += 1;
        if blank {
            self.blank_row_count += 1;
        }
    }

    /// Count a cell and its visible characters.
    pub fn count_cell(&mut self, text: &str) {
        self.cell_count += 1;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
