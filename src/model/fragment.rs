//! Positioned text fragments.

use super::{BoundingBox, Transform};
use serde::{Deserialize, Serialize};

/// A text run as delivered by the document decoder, before projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFragment {
    /// The text content
    #[serde(rename = "str", alias = "text")]
    pub text: String,

    /// Text-space to page-space transform
    pub transform: Transform,

    /// Advance width in page units
    pub width: f64,
}

impl RawFragment {
    /// Create a new raw fragment.
    pub fn new(text: impl Into<String>, transform: Transform, width: f64) -> Self {
        Self {
            text: text.into(),
            transform,
            width,
        }
    }

    /// Whether the fragment carries any visible text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// A projected fragment with its viewport-space bounding box.
///
/// Fragments are immutable once projected. Every derived structure refers
/// to them by their position in the page's fragment list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// The text content, untrimmed
    pub text: String,

    /// Text-space to page-space transform
    pub transform: Transform,

    /// Advance width in page units
    pub width: f64,

    /// Index in the page's fragment list at projection time
    pub source_index: usize,

    /// Bounding box in viewport space
    pub bounds: BoundingBox,
}

impl Fragment {
    /// Trimmed text.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Number of characters in the trimmed text.
    pub fn visible_len(&self) -> usize {
        self.trimmed().chars().count()
    }
}
