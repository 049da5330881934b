//! Structural groupings inferred from fragment geometry.

use super::{BoundingBox, Fragment};
use serde::{Deserialize, Serialize};

/// A chain of vertically stacked, left-aligned fragments.
///
/// Always holds at least two members, in chain order (top to bottom).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Fragment indices in chain order
    pub members: Vec<usize>,

    /// Union of the member boxes
    pub bounds: BoundingBox,

    /// Member texts joined by a single space
    pub text: String,
}

impl Block {
    /// Build a block from a chain of fragment indices.
    pub fn from_chain(members: Vec<usize>, fragments: &[Fragment]) -> Self {
        let bounds = BoundingBox::union(members.iter().map(|&i| &fragments[i].bounds));
        let text = members
            .iter()
            .map(|&i| fragments[i].text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            members,
            bounds,
            text,
        }
    }

    /// Number of member fragments.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Blocks are never empty; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Where a consolidated item came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemSource {
    /// A block, treated as one opaque item
    Block {
        /// Index into the analysis block list
        block: usize,
        /// Member fragment indices in chain order
        members: Vec<usize>,
    },
    /// A fragment that was not absorbed into any block
    Fragment {
        /// Fragment index
        index: usize,
    },
}

/// A block or a standalone fragment: the unit of label and title analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedItem {
    /// Item text (space-joined for blocks)
    pub text: String,

    /// Item bounding box (union box for blocks)
    pub bounds: BoundingBox,

    /// Height used for title classification: the first member's height
    /// for a block, the item's own height otherwise
    pub representative_height: f64,

    /// Origin of the item
    pub source: ItemSource,
}

impl ConsolidatedItem {
    /// Wrap a block.
    pub fn from_block(index: usize, block: &Block, fragments: &[Fragment]) -> Self {
        let representative_height = block
            .members
            .first()
            .map(|&i| fragments[i].bounds.height)
            .unwrap_or(block.bounds.height);
        Self {
            text: block.text.clone(),
            bounds: block.bounds,
            representative_height,
            source: ItemSource::Block {
                block: index,
                members: block.members.clone(),
            },
        }
    }

    /// Wrap the standalone fragment at `index` in the page's fragment list.
    pub fn from_fragment(index: usize, fragment: &Fragment) -> Self {
        Self {
            text: fragment.text.clone(),
            bounds: fragment.bounds,
            representative_height: fragment.bounds.height,
            source: ItemSource::Fragment { index },
        }
    }

    /// Whether this item is a block.
    pub fn is_block(&self) -> bool {
        matches!(self.source, ItemSource::Block { .. })
    }

    /// Fragment indices covered by this item.
    pub fn members(&self) -> Vec<usize> {
        match &self.source {
            ItemSource::Block { members, .. } => members.clone(),
            ItemSource::Fragment { index } => vec![*index],
        }
    }

    /// Whether the trimmed text ends with a colon.
    pub fn is_label(&self) -> bool {
        self.text.trim().ends_with(':')
    }
}

/// A label matched to the value on its right.
///
/// Both fields index into the analysis' consolidated item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelValuePair {
    /// Label item index
    pub label: usize,
    /// Value item index
    pub value: usize,
}

/// A consolidated item classified as a title.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Title {
    /// Consolidated item index
    pub item: usize,
    /// The representative height that triggered the classification
    pub height: f64,
}

/// Fragment indices forming one visual line, sorted left to right.
pub type Row = Vec<usize>;
