//! Human-readable summary of the structural analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::PageAnalysis;
use crate::model::{BoundingBox, Fragment};

/// A block with its member texts in chain order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockEntry {
    pub bounds: BoundingBox,
    pub members: Vec<String>,
}

/// A label-value pair by text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairEntry {
    pub label: String,
    pub value: String,
}

/// A title by text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleEntry {
    pub text: String,
    pub height: f64,
}

/// Blocks, pairs and titles of one page, resolved to text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub blocks: Vec<BlockEntry>,
    pub pairs: Vec<PairEntry>,
    pub titles: Vec<TitleEntry>,
    /// Median fragment height behind the title threshold
    pub median_height: f64,
    /// Ratio behind the title threshold
    pub title_ratio: f64,
}

impl DiagnosticReport {
    /// Resolve an analysis against its page's fragments.
    pub fn new(analysis: &PageAnalysis, fragments: &[Fragment]) -> Self {
        let blocks = analysis
            .blocks
            .iter()
            .map(|block| BlockEntry {
                bounds: block.bounds,
                members: block
                    .members
                    .iter()
                    .map(|&i| fragments[i].text.clone())
                    .collect(),
            })
            .collect();

        let pairs = analysis
            .pairs
            .iter()
            .map(|pair| {
                let (label, value) = analysis.pair_items(pair);
                PairEntry {
                    label: label.text.clone(),
                    value: value.text.clone(),
                }
            })
            .collect();

        let titles = analysis
            .titles
            .iter()
            .map(|title| TitleEntry {
                text: analysis.title_item(title).text.clone(),
                height: title.height,
            })
            .collect();

        Self {
            blocks,
            pairs,
            titles,
            median_height: analysis.median_height,
            title_ratio: analysis.title_ratio,
        }
    }

    /// Check if no group of any kind was found.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.pairs.is_empty() && self.titles.is_empty()
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No groups formed.");
        }

        if !self.blocks.is_empty() {
            writeln!(f, "--- Vertical Blocks ({}) ---", self.blocks.len())?;
            for (i, block) in self.blocks.iter().enumerate() {
                let b = &block.bounds;
                writeln!(
                    f,
                    "Block {}: x:{:.2}, y:{:.2}, w:{:.2}, h:{:.2}",
                    i + 1,
                    b.min_x,
                    b.min_y,
                    b.width,
                    b.height
                )?;
                for (j, text) in block.members.iter().enumerate() {
                    writeln!(f, "  {}: \"{}\"", j, text)?;
                }
            }
            writeln!(f)?;
        }

        if !self.pairs.is_empty() {
            writeln!(f, "--- Label-Value Pairs ({}) ---", self.pairs.len())?;
            for (i, pair) in self.pairs.iter().enumerate() {
                writeln!(f, "Pair {}: [L: \"{}\", V: \"{}\"]", i + 1, pair.label, pair.value)?;
            }
            writeln!(f)?;
        }

        if !self.titles.is_empty() {
            writeln!(f, "--- Titles ({}) ---", self.titles.len())?;
            for (i, title) in self.titles.iter().enumerate() {
                writeln!(
                    f,
                    "Title {}: \"{}\" (Font Height: {:.2}, Median: {:.2}, Ratio: {:.2})",
                    i + 1,
                    title.text,
                    title.height,
                    self.median_height,
                    self.title_ratio
                )?;
            }
        }

        Ok(())
    }
}
