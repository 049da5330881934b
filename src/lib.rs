//! # textgrid
//!
//! Spatially faithful plain-text reconstruction from positioned PDF text
//! fragments.
//!
//! A page's text runs, each with a transform and an advance width, are
//! projected into viewport space, grouped into blocks, label-value pairs
//! and titles, and finally placed on a monospace character grid that keeps
//! columns aligned.
//!
//! ## Quick Start
//!
//! ```no_run
//! use textgrid::{reconstruct_file, LayoutOptions};
//!
//! fn main() -> textgrid::Result<()> {
//!     let result = reconstruct_file("page.json", &LayoutOptions::default())?;
//!     println!("{}", result.to_text());
//!     println!("{}", result.report);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two renditions**: iterative column repair, or simple center-line rows
//! - **Structure detection**: vertical blocks, label-value pairs, titles
//! - **Diagnostics**: group report and per-fragment neighbor inspection
//! - **Parallel processing**: Uses Rayon for neighbor precomputation

pub mod error;
pub mod input;
pub mod layout;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use input::{load_page_file, load_page_reader, open_page, parse_page_json};
pub use layout::{
    fragment_at, inspect_neighbors, project_page, LayoutAnalyzer, LayoutOptions,
    NeighborInspection, PageAnalysis, PageMetrics, RenditionMode,
};
pub use model::{
    Block, BoundingBox, ConsolidatedItem, Fragment, GridCell, GridRow, LabelValuePair, Page,
    PageInput, RawFragment, RenditionGrid, Title, Transform, Viewport,
};
pub use render::{DiagnosticReport, JsonFormat, Rendition, RenditionStats};

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Everything the pipeline derives from one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconstruction {
    /// Blocks, consolidated items, pairs and titles
    pub analysis: PageAnalysis,

    /// The character grid
    pub rendition: Rendition,

    /// The analysis resolved to text
    pub report: DiagnosticReport,
}

impl Reconstruction {
    /// The grid as text, with the warning line first when present.
    pub fn to_text(&self) -> String {
        render::to_text(&self.rendition)
    }

    /// The placed text.
    pub fn grid(&self) -> &RenditionGrid {
        &self.rendition.grid
    }

    /// Advisory message, if column repair hit its pass cap.
    pub fn warning(&self) -> Option<&str> {
        self.rendition.warning.as_deref()
    }
}

/// Run the whole pipeline over a projected page.
///
/// # Example
///
/// ```
/// use textgrid::{project_page, reconstruct, LayoutOptions, PageInput, RawFragment, Transform, Viewport};
///
/// let input = PageInput::new(Viewport::identity(200.0, 100.0))
///     .with_fragment(RawFragment::new("Name:", Transform::scale_translate(10.0, 0.0, 0.0), 50.0))
///     .with_fragment(RawFragment::new("Alice", Transform::scale_translate(10.0, 80.0, 0.0), 50.0));
/// let page = project_page(&input);
///
/// let result = reconstruct(&page, &LayoutOptions::default());
/// assert_eq!(result.analysis.pairs.len(), 1);
/// ```
pub fn reconstruct(page: &Page, options: &LayoutOptions) -> Reconstruction {
    let analysis = LayoutAnalyzer::new(page).analyze(options);
    let rendition = render::render(page, &analysis, options);
    let report = DiagnosticReport::new(&analysis, &page.fragments);
    Reconstruction {
        analysis,
        rendition,
        report,
    }
}

/// Project and reconstruct an unprojected page.
pub fn reconstruct_input(input: &PageInput, options: &LayoutOptions) -> Reconstruction {
    reconstruct(&project_page(input), options)
}

/// Load a page dump from a file and reconstruct it.
pub fn reconstruct_file<P: AsRef<Path>>(path: P, options: &LayoutOptions) -> Result<Reconstruction> {
    let input = load_page_file(path)?;
    Ok(reconstruct_input(&input, options))
}

/// Parse a page dump from JSON bytes and reconstruct it.
pub fn reconstruct_bytes(data: &[u8], options: &LayoutOptions) -> Result<Reconstruction> {
    let input = parse_page_json(data)?;
    Ok(reconstruct_input(&input, options))
}

/// Read a page dump from a reader and reconstruct it.
pub fn reconstruct_reader<R: Read>(reader: R, options: &LayoutOptions) -> Result<Reconstruction> {
    let input = load_page_reader(reader)?;
    Ok(reconstruct_input(&input, options))
}

/// Reconstruct a page dump file as plain text with default options.
///
/// # Example
///
/// ```no_run
/// let text = textgrid::to_text("page.json").unwrap();
/// println!("{}", text);
/// ```
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(reconstruct_file(path, &LayoutOptions::default())?.to_text())
}

/// Reconstruct a page dump file and serialize the result.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let result = reconstruct_file(path, &LayoutOptions::default())?;
    render::to_json(&result, format)
}

/// Inspect one fragment, failing when the index is out of range.
pub fn inspect(page: &Page, index: usize) -> Result<NeighborInspection> {
    inspect_neighbors(page, index).ok_or(Error::FragmentOutOfRange(index, page.len()))
}

/// Builder for loading and reconstructing pages.
///
/// # Example
///
/// ```no_run
/// use textgrid::TextGrid;
///
/// let text = TextGrid::new()
///     .with_horizontal_tolerance(4.0)
///     .with_title_ratio(1.5)
///     .open("page.json")?
///     .to_text();
/// # Ok::<(), textgrid::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextGrid {
    options: LayoutOptions,
}

impl TextGrid {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from explicit options.
    pub fn with_options(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Merge a settings file over the current options.
    pub fn with_settings_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        self.options = self.options.merge_settings(&value);
        Ok(self)
    }

    /// Use the simple rendition.
    pub fn simple(mut self) -> Self {
        self.options = self.options.simple();
        self
    }

    /// Set horizontal tolerance for block grouping.
    pub fn with_horizontal_tolerance(mut self, tolerance: f64) -> Self {
        self.options = self.options.with_horizontal_tolerance(tolerance);
        self
    }

    /// Set vertical proximity for block grouping.
    pub fn with_vertical_proximity(mut self, proximity: f64) -> Self {
        self.options = self.options.with_vertical_proximity(proximity);
        self
    }

    /// Set y-axis tolerance for label-value pairing.
    pub fn with_y_axis_tolerance(mut self, tolerance: f64) -> Self {
        self.options = self.options.with_y_axis_tolerance(tolerance);
        self
    }

    /// Set title ratio.
    pub fn with_title_ratio(mut self, ratio: f64) -> Self {
        self.options = self.options.with_title_ratio(ratio);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Current options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Load and reconstruct a page dump file.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<TextGridResult> {
        Ok(self.page(open_page(path)?))
    }

    /// Parse and reconstruct a page dump from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<TextGridResult> {
        Ok(self.page(project_page(&parse_page_json(data)?)))
    }

    /// Reconstruct an unprojected page.
    pub fn input(self, input: &PageInput) -> TextGridResult {
        self.page(project_page(input))
    }

    /// Reconstruct a projected page.
    pub fn page(self, page: Page) -> TextGridResult {
        let reconstruction = reconstruct(&page, &self.options);
        TextGridResult {
            page,
            options: self.options,
            reconstruction,
        }
    }
}

/// A reconstructed page together with the page it came from.
pub struct TextGridResult {
    /// The projected page
    pub page: Page,
    /// Options used
    options: LayoutOptions,
    /// Pipeline output
    pub reconstruction: Reconstruction,
}

impl TextGridResult {
    /// Grid as plain text, warning line first.
    pub fn to_text(&self) -> String {
        self.reconstruction.to_text()
    }

    /// Full reconstruction as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.reconstruction, format)
    }

    /// The diagnostic report.
    pub fn report(&self) -> &DiagnosticReport {
        &self.reconstruction.report
    }

    /// Inspect one fragment of the page.
    pub fn inspect(&self, index: usize) -> Result<NeighborInspection> {
        inspect(&self.page, index)
    }

    /// Topmost fragment under a viewport point.
    pub fn fragment_at(&self, x: f64, y: f64) -> Option<&Fragment> {
        fragment_at(&self.page.fragments, x, y).map(|i| &self.page.fragments[i])
    }

    /// Page statistics.
    pub fn metrics(&self) -> PageMetrics {
        PageMetrics::from_fragments(&self.page.fragments)
    }

    /// Options used for the reconstruction.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }
}
