//! Page-wide size statistics.

use serde::{Deserialize, Serialize};

use crate::model::Fragment;

/// Average character width used when a page has no visible characters or
/// only zero-width boxes.
pub const FALLBACK_CHAR_WIDTH: f64 = 8.0;

/// Average line height used when a page has no fragments.
pub const FALLBACK_LINE_HEIGHT: f64 = 15.0;

/// How many median heights below a fragment still count as its column.
pub const VERTICAL_SEARCH_FACTOR: f64 = 10.0;

/// Size statistics over a page's fragment set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageMetrics {
    /// Total box width over total trimmed character count
    pub avg_char_width: f64,
    /// Median box height (0 for an empty page)
    pub median_height: f64,
    /// Mean box height
    pub avg_line_height: f64,
    /// Number of fragments measured
    pub fragment_count: usize,
}

impl PageMetrics {
    /// Measure a fragment set.
    pub fn from_fragments(fragments: &[Fragment]) -> Self {
        let mut total_width = 0.0;
        let mut total_chars = 0usize;
        let mut total_height = 0.0;
        let mut heights = Vec::with_capacity(fragments.len());

        for fragment in fragments {
            let chars = fragment.visible_len();
            if chars > 0 {
                total_width += fragment.bounds.width;
                total_chars += chars;
            }
            total_height += fragment.bounds.height;
            heights.push(fragment.bounds.height);
        }

        let measured = if total_chars > 0 {
            total_width / total_chars as f64
        } else {
            0.0
        };
        let avg_char_width = if measured.is_finite() && measured > 0.0 {
            measured
        } else {
            FALLBACK_CHAR_WIDTH
        };
        let avg_line_height = if fragments.is_empty() {
            FALLBACK_LINE_HEIGHT
        } else {
            total_height / fragments.len() as f64
        };

        Self {
            avg_char_width,
            median_height: median(&heights),
            avg_line_height,
            fragment_count: fragments.len(),
        }
    }

    /// Maximum vertical distance for downward-neighbor and inspector zones.
    pub fn max_vertical_search(&self) -> f64 {
        self.median_height * VERTICAL_SEARCH_FACTOR
    }
}

/// Median of a set of values; the mean of the two middle values for an
/// even count, 0 for an empty set.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Round half toward positive infinity, so that `-2.5` becomes `-2`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
