//! Rendering module for placing analyzed pages onto a character grid.

mod json;
mod report;
mod result;
mod simple;
pub mod solver;
mod text;

pub use json::{to_json, JsonFormat};
pub use report::{BlockEntry, DiagnosticReport, PairEntry, TitleEntry};
pub use result::{Rendition, RenditionStats};
pub use simple::render_simple;
pub use solver::{ColumnSolver, PlacedCell, IMPRECISE_LAYOUT_WARNING, MAX_REPAIR_PASSES};
pub use text::to_text;

use crate::layout::{LayoutOptions, PageAnalysis, RenditionMode};
use crate::model::Page;

/// Render a page with the mode selected in `options`.
///
/// The automatic rendition works from the raw fragments; the simple one
/// from the analysis's consolidated items.
pub fn render(page: &Page, analysis: &PageAnalysis, options: &LayoutOptions) -> Rendition {
    match options.rendition_mode {
        RenditionMode::Automatic => ColumnSolver::new(&page.fragments, options.parallel).solve(),
        RenditionMode::Simple => render_simple(&page.fragments, &analysis.items),
    }
}
