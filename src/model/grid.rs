//! The monospace rendition grid.

use serde::{Deserialize, Serialize};

/// A piece of text placed at a character column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// Cell text, as it appeared in the fragment
    pub text: String,
    /// Zero-based character column
    pub column: i64,
}

impl GridCell {
    /// Create a new cell.
    pub fn new(text: impl Into<String>, column: i64) -> Self {
        Self {
            text: text.into(),
            column,
        }
    }
}

/// One line of the grid. A row with no cells is a blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub cells: Vec<GridCell>,
}

impl GridRow {
    /// A blank row.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Create a row from cells.
    pub fn new(cells: Vec<GridCell>) -> Self {
        Self { cells }
    }

    /// Check if the row is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.is_empty()
    }

    /// Render the row as a line of text.
    ///
    /// Cells are laid out by column; a cell that starts before the end of
    /// the previous one is appended without padding.
    pub fn to_line(&self) -> String {
        let mut cells: Vec<&GridCell> = self.cells.iter().collect();
        cells.sort_by_key(|c| c.column);

        let mut line = String::new();
        let mut cursor: i64 = 0;
        for cell in cells {
            let pad = (cell.column - cursor).max(0) as usize;
            line.extend(std::iter::repeat(' ').take(pad));
            line.push_str(&cell.text);
            cursor = cell.column.saturating_add(cell.text.chars().count() as i64);
        }
        line
    }

    /// Column just past the last character of the rightmost cell.
    pub fn end_column(&self) -> i64 {
        self.cells
            .iter()
            .map(|c| c.column.saturating_add(c.text.chars().count() as i64))
            .max()
            .unwrap_or(0)
    }
}

/// Ordered rows of placed text: the final artifact of a rendition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenditionGrid {
    pub rows: Vec<GridRow>,
}

impl RenditionGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row.
    pub fn push_row(&mut self, row: GridRow) {
        self.rows.push(row);
    }

    /// Append `count` blank rows.
    pub fn push_blank_rows(&mut self, count: usize) {
        self.rows
            .extend(std::iter::repeat_with(GridRow::blank).take(count));
    }

    /// Number of rows, blanks included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row end column.
    pub fn width(&self) -> i64 {
        self.rows.iter().map(GridRow::end_column).max().unwrap_or(0)
    }

    /// Render the grid as plain text, one line per row, trimmed.
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(GridRow::to_line)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}
