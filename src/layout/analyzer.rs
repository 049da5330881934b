//! Structural analysis of a projected page.

use serde::{Deserialize, Serialize};

use crate::model::{Block, ConsolidatedItem, LabelValuePair, Page, Row, Title};

use super::blocks::group_vertical_blocks;
use super::inspector::{inspect_neighbors, NeighborInspection};
use super::options::LayoutOptions;
use super::pairs::pair_labels;
use super::rows::{build_rows, reading_order};
use super::stats::PageMetrics;
use super::titles::classify_titles;

/// Structural groupings found on a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageAnalysis {
    /// Vertical blocks, in discovery order
    pub blocks: Vec<Block>,

    /// Blocks plus standalone fragments, in `(min_y, min_x)` order
    pub items: Vec<ConsolidatedItem>,

    /// Label-value pairs, indices into `items`
    pub pairs: Vec<LabelValuePair>,

    /// Titles, indices into `items`
    pub titles: Vec<Title>,

    /// Median fragment height used for title detection
    pub median_height: f64,

    /// Title ratio used for title detection
    pub title_ratio: f64,
}

impl PageAnalysis {
    /// Look up the label and value items of a pair.
    pub fn pair_items(&self, pair: &LabelValuePair) -> (&ConsolidatedItem, &ConsolidatedItem) {
        (&self.items[pair.label], &self.items[pair.value])
    }

    /// Look up the item of a title.
    pub fn title_item(&self, title: &Title) -> &ConsolidatedItem {
        &self.items[title.item]
    }
}

/// Layout analyzer for a projected page.
pub struct LayoutAnalyzer<'a> {
    page: &'a Page,
    /// Size statistics for the page
    metrics: PageMetrics,
}

impl<'a> LayoutAnalyzer<'a> {
    /// Create a new layout analyzer.
    pub fn new(page: &'a Page) -> Self {
        Self {
            page,
            metrics: PageMetrics::from_fragments(&page.fragments),
        }
    }

    /// The analyzed page.
    pub fn page(&self) -> &'a Page {
        self.page
    }

    /// Size statistics for the page.
    pub fn metrics(&self) -> &PageMetrics {
        &self.metrics
    }

    /// Run block grouping, consolidation, pairing and title detection.
    pub fn analyze(&self, options: &LayoutOptions) -> PageAnalysis {
        let fragments = &self.page.fragments;
        if fragments.is_empty() {
            return PageAnalysis {
                title_ratio: options.title_ratio,
                ..PageAnalysis::default()
            };
        }

        let blocks = group_vertical_blocks(
            fragments,
            options.horizontal_tolerance,
            options.vertical_proximity,
        );
        let items = self.consolidate(&blocks);
        let pairs = pair_labels(&items, options.y_axis_tolerance);
        let titles = classify_titles(
            &items,
            &pairs,
            self.metrics.median_height,
            options.title_ratio,
        );

        log::debug!(
            "Analysis: {} blocks, {} items, {} pairs, {} titles",
            blocks.len(),
            items.len(),
            pairs.len(),
            titles.len()
        );

        PageAnalysis {
            blocks,
            items,
            pairs,
            titles,
            median_height: self.metrics.median_height,
            title_ratio: options.title_ratio,
        }
    }

    /// Collapse each block into one item, keep the remaining fragments,
    /// and sort everything into reading order.
    fn consolidate(&self, blocks: &[Block]) -> Vec<ConsolidatedItem> {
        let fragments = &self.page.fragments;
        let mut in_block = vec![false; fragments.len()];

        let mut items: Vec<ConsolidatedItem> = blocks
            .iter()
            .enumerate()
            .map(|(i, block)| {
                for &m in &block.members {
                    in_block[m] = true;
                }
                ConsolidatedItem::from_block(i, block, fragments)
            })
            .collect();

        items.extend(
            fragments
                .iter()
                .enumerate()
                .filter(|&(i, _)| !in_block[i])
                .map(|(i, f)| ConsolidatedItem::from_fragment(i, f)),
        );

        // Stable: blocks stay ahead of fragments with identical corners.
        items.sort_by(|a, b| reading_order(&a.bounds, &b.bounds));
        items
    }

    /// Rows of the page, as the automatic rendition sees them.
    pub fn rows(&self) -> Vec<Row> {
        build_rows(&self.page.fragments)
    }

    /// Inspect the neighborhood of one fragment.
    pub fn inspect(&self, selected: usize) -> Option<NeighborInspection> {
        inspect_neighbors(self.page, selected)
    }
}
