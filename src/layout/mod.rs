//! Geometric layout analysis.

mod analyzer;
mod blocks;
mod inspector;
mod options;
mod pairs;
mod projector;
mod rows;
pub mod stats;
mod titles;

pub use analyzer::{LayoutAnalyzer, PageAnalysis};
pub use blocks::group_vertical_blocks;
pub use inspector::{fragment_at, inspect_neighbors, NeighborInspection, NeighborZones, Zone};
pub use options::{LayoutOptions, RenditionMode};
pub use pairs::pair_labels;
pub use projector::{project_bounds, project_fragment, project_page};
pub use rows::{build_rows, reading_order};
pub use stats::PageMetrics;
pub use titles::classify_titles;
