//! The simple rendition: center-line rows over consolidated items.
//!
//! No collision repair is done; columns come straight from each item's
//! left edge. Blocks therefore appear as single cells carrying their
//! space-joined text.

use crate::layout::stats::{round_half_up, PageMetrics};
use crate::layout::RenditionMode;
use crate::model::{ConsolidatedItem, Fragment, GridCell, GridRow, RenditionGrid};

use super::Rendition;

/// Render consolidated items onto the grid.
///
/// `items` must be in reading order. An item joins the current row when
/// its vertical center is within half an average line height of the last
/// item added to that row. Rows are sorted left to right when closed.
/// Character width and line height are measured over `fragments`.
pub fn render_simple(fragments: &[Fragment], items: &[ConsolidatedItem]) -> Rendition {
    let metrics = PageMetrics::from_fragments(fragments);
    let rows = group_lines(items, metrics.avg_line_height);

    let mut grid = RenditionGrid::new();
    let mut last_y = rows.first().map(|row| row[0].bounds.min_y);

    for row in &rows {
        let y = row[0].bounds.min_y;
        if let Some(prev) = last_y {
            if metrics.avg_line_height > 0.0 {
                let jump = round_half_up((y - prev) / metrics.avg_line_height);
                if jump > 1 {
                    grid.push_blank_rows((jump - 1) as usize);
                }
            }
        }

        grid.push_row(GridRow::new(
            row.iter()
                .map(|item| {
                    let column = (item.bounds.min_x / metrics.avg_char_width).floor() as i64;
                    GridCell::new(item.text.clone(), column)
                })
                .collect(),
        ));
        last_y = Some(y);
    }

    log::debug!("Simple rendition: {} rows", grid.len());
    Rendition::new(RenditionMode::Simple, grid)
}

fn group_lines(items: &[ConsolidatedItem], line_height: f64) -> Vec<Vec<&ConsolidatedItem>> {
    let mut rows: Vec<Vec<&ConsolidatedItem>> = Vec::new();
    let mut current: Vec<&ConsolidatedItem> = Vec::new();

    for item in items {
        let joins = current.last().is_some_and(|prev| {
            (item.bounds.center_y() - prev.bounds.center_y()).abs() < line_height / 2.0
        });
        if !joins && !current.is_empty() {
            rows.push(close_line(std::mem::take(&mut current)));
        }
        current.push(item);
    }
    if !current.is_empty() {
        rows.push(close_line(current));
    }
    rows
}

fn close_line(mut line: Vec<&ConsolidatedItem>) -> Vec<&ConsolidatedItem> {
    line.sort_by(|a, b| a.bounds.min_x.total_cmp(&b.bounds.min_x));
    line
}
