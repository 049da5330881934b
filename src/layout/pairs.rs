//! Label-value pairing.

use crate::model::{ConsolidatedItem, LabelValuePair};

/// Pair colon-terminated labels with the nearest item to their right.
///
/// `items` must already be in `(min_y, min_x)` order. Labels are processed
/// in that order and each takes, among the unconsumed items strictly to
/// its right whose top edge is within `y_tolerance`, the one with the
/// smallest horizontal gap. A consumed value is unavailable to later
/// labels, so an earlier label can take a value a later one was closer to.
pub fn pair_labels(items: &[ConsolidatedItem], y_tolerance: f64) -> Vec<LabelValuePair> {
    let mut consumed = vec![false; items.len()];
    let mut pairs = Vec::new();

    for (label_idx, label) in items.iter().enumerate() {
        if !label.is_label() {
            continue;
        }

        let mut best: Option<(usize, f64)> = None;
        for (value_idx, value) in items.iter().enumerate() {
            if value_idx == label_idx || consumed[value_idx] {
                continue;
            }
            if value.bounds.min_x <= label.bounds.max_x {
                continue;
            }
            if (label.bounds.min_y - value.bounds.min_y).abs() > y_tolerance {
                continue;
            }
            let gap = value.bounds.min_x - label.bounds.max_x;
            if best.map_or(true, |(_, best_gap)| gap < best_gap) {
                best = Some((value_idx, gap));
            }
        }

        if let Some((value_idx, _)) = best {
            consumed[value_idx] = true;
            pairs.push(LabelValuePair {
                label: label_idx,
                value: value_idx,
            });
        }
    }

    log::debug!("Paired {} labels with values", pairs.len());
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, ItemSource};

    fn item(text: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> ConsolidatedItem {
        ConsolidatedItem {
            text: text.to_string(),
            bounds: BoundingBox::new(x0, y0, x1, y1),
            representative_height: y1 - y0,
            source: ItemSource::Fragment { index: 0 },
        }
    }

    #[test]
    fn test_simple_pair() {
        let items = vec![
            item("Name:", 0.0, 0.0, 40.0, 10.0),
            item("Alice", 50.0, 0.0, 90.0, 10.0),
        ];
        let pairs = pair_labels(&items, 5.0);
        assert_eq!(pairs, vec![LabelValuePair { label: 0, value: 1 }]);
    }

    #[test]
    fn test_nearest_value_wins() {
        let items = vec![
            item("Date:", 0.0, 0.0, 40.0, 10.0),
            item("2024-01-01", 45.0, 1.0, 120.0, 11.0),
            item("(approx)", 130.0, 0.0, 180.0, 10.0),
        ];
        let pairs = pair_labels(&items, 5.0);
        assert_eq!(pairs, vec![LabelValuePair { label: 0, value: 1 }]);
    }

    #[test]
    fn test_value_must_be_strictly_right() {
        let items = vec![
            item("Key:", 0.0, 0.0, 40.0, 10.0),
            item("touching", 40.0, 0.0, 80.0, 10.0),
        ];
        assert!(pair_labels(&items, 5.0).is_empty());
    }

    #[test]
    fn test_y_tolerance_is_inclusive() {
        let items = vec![
            item("Key:", 0.0, 0.0, 40.0, 10.0),
            item("value", 50.0, 5.0, 80.0, 15.0),
        ];
        assert_eq!(pair_labels(&items, 5.0).len(), 1);
        assert!(pair_labels(&items, 4.9).is_empty());
    }

    #[test]
    fn test_earlier_label_takes_the_value() {
        // L2 is closer to V, but L1 comes first in reading order.
        let items = vec![
            item("L1:", 0.0, 0.0, 20.0, 10.0),
            item("V", 100.0, 6.0, 140.0, 16.0),
            item("L2:", 5.0, 12.0, 60.0, 22.0),
        ];
        let pairs = pair_labels(&items, 8.0);
        assert_eq!(pairs, vec![LabelValuePair { label: 0, value: 1 }]);
    }

    #[test]
    fn test_values_are_unique() {
        let items = vec![
            item("A:", 0.0, 0.0, 20.0, 10.0),
            item("B:", 0.0, 2.0, 20.0, 12.0),
            item("x", 30.0, 1.0, 40.0, 11.0),
            item("y", 50.0, 1.0, 60.0, 11.0),
        ];
        let pairs = pair_labels(&items, 5.0);
        assert_eq!(pairs.len(), 2);
        assert_ne!(pairs[0].value, pairs[1].value);
        assert_eq!(pairs[0], LabelValuePair { label: 0, value: 2 });
        assert_eq!(pairs[1], LabelValuePair { label: 1, value: 3 });
    }
}
