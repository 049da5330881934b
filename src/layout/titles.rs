//! Title detection by height ratio.

use crate::model::{ConsolidatedItem, LabelValuePair, Title};

/// Flag oversized items as titles.
///
/// Items taking part in a label-value pair are skipped. An item is a title
/// when its representative height exceeds `median_height * title_ratio`,
/// where the median is taken over the page fragments, not the items.
pub fn classify_titles(
    items: &[ConsolidatedItem],
    pairs: &[LabelValuePair],
    median_height: f64,
    title_ratio: f64,
) -> Vec<Title> {
    let mut paired = vec![false; items.len()];
    for pair in pairs {
        paired[pair.label] = true;
        paired[pair.value] = true;
    }

    let threshold = median_height * title_ratio;
    items
        .iter()
        .enumerate()
        .filter(|(i, item)| !paired[*i] && item.representative_height > threshold)
        .map(|(i, item)| Title {
            item: i,
            height: item.representative_height,
        })
        .collect()
}
