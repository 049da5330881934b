//! Vertical block grouping.
//!
//! Chains fragments that are stacked one below another with nearly equal
//! left edges. The chaining is greedy and order-sensitive: fragments are
//! visited by top edge, each unclaimed fragment seeds a chain, and the
//! chain repeatedly absorbs the closest qualifying fragment below its
//! current tail. There is no backtracking.

use crate::model::{Block, Fragment};

/// Group fragments into vertical blocks.
///
/// A candidate continues a chain when its gap below the tail
/// (`candidate.min_y - tail.max_y`) lies in `[0, y_threshold]` and its left
/// edge is within `x_threshold` of the tail's. The smallest gap wins; ties
/// go to the first candidate in top-edge order. Chains of a single
/// fragment are not returned.
pub fn group_vertical_blocks(
    fragments: &[Fragment],
    x_threshold: f64,
    y_threshold: f64,
) -> Vec<Block> {
    if fragments.is_empty() {
        return vec![];
    }

    let mut order: Vec<usize> = (0..fragments.len()).collect();
    // Stable sort keeps decoder order for equal top edges.
    order.sort_by(|&a, &b| {
        fragments[a]
            .bounds
            .min_y
            .total_cmp(&fragments[b].bounds.min_y)
    });

    let mut claimed = vec![false; order.len()];
    let mut blocks = Vec::new();

    for seed in 0..order.len() {
        if claimed[seed] {
            continue;
        }
        claimed[seed] = true;

        let mut chain = vec![order[seed]];
        let mut tail = &fragments[order[seed]].bounds;

        loop {
            let mut best: Option<(usize, f64)> = None;

            for (pos, &candidate) in order.iter().enumerate() {
                if claimed[pos] {
                    continue;
                }
                let bounds = &fragments[candidate].bounds;

                let gap = bounds.min_y - tail.max_y;
                if !(0.0..=y_threshold).contains(&gap) {
                    continue;
                }
                if (tail.min_x - bounds.min_x).abs() > x_threshold {
                    continue;
                }
                if best.map_or(true, |(_, best_gap)| gap < best_gap) {
                    best = Some((pos, gap));
                }
            }

            let Some((pos, _)) = best else {
                break;
            };
            claimed[pos] = true;
            chain.push(order[pos]);
            tail = &fragments[order[pos]].bounds;
        }

        if chain.len() > 1 {
            blocks.push(Block::from_chain(chain, fragments));
        }
    }

    log::debug!("Grouped {} vertical blocks", blocks.len());
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, Transform};

    fn fragments(boxes: &[(&str, f64, f64, f64, f64)]) -> Vec<Fragment> {
        boxes
            .iter()
            .enumerate()
            .map(|(i, &(text, x0, y0, x1, y1))| Fragment {
                text: text.to_string(),
                transform: Transform::IDENTITY,
                width: x1 - x0,
                source_index: i,
                bounds: BoundingBox::new(x0, y0, x1, y1),
            })
            .collect()
    }

    #[test]
    fn test_stack_of_three() {
        let frags = fragments(&[
            ("one", 0.0, 0.0, 40.0, 10.0),
            ("two", 1.0, 15.0, 40.0, 25.0),
            ("three", 2.0, 30.0, 40.0, 40.0),
        ]);
        let blocks = group_vertical_blocks(&frags, 2.0, 10.0);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].members, vec![0, 1, 2]);
        assert_eq!(blocks[0].text, "one two three");
        assert_eq!(blocks[0].bounds, BoundingBox::new(0.0, 0.0, 40.0, 40.0));
    }

    #[test]
    fn test_offsets_are_measured_from_the_tail() {
        // Left edges 0, 10, 11: only the last two are within 2 of each other.
        let frags = fragments(&[
            ("a", 0.0, 0.0, 40.0, 10.0),
            ("b", 10.0, 15.0, 40.0, 25.0),
            ("c", 11.0, 30.0, 40.0, 40.0),
        ]);
        let blocks = group_vertical_blocks(&frags, 2.0, 10.0);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].members, vec![1, 2]);

        assert!(group_vertical_blocks(&frags, 0.0, 10.0).is_empty());
    }

    #[test]
    fn test_smallest_gap_wins() {
        let frags = fragments(&[
            ("top", 0.0, 0.0, 40.0, 10.0),
            ("far", 0.0, 18.0, 40.0, 28.0),
            ("near", 100.0, 12.0, 140.0, 22.0),
            ("near-aligned", 3.0, 13.0, 40.0, 17.0),
        ]);
        let blocks = group_vertical_blocks(&frags, 5.0, 10.0);
        assert_eq!(blocks[0].members[..2], [0, 3]);
    }

    #[test]
    fn test_equal_gaps_take_first_in_order() {
        let frags = fragments(&[
            ("top", 0.0, 0.0, 40.0, 10.0),
            ("left", 0.0, 12.0, 20.0, 22.0),
            ("right", 2.0, 12.0, 40.0, 22.0),
        ]);
        let blocks = group_vertical_blocks(&frags, 5.0, 5.0);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].members, vec![0, 1]);
    }

    #[test]
    fn test_overlapping_fragments_do_not_chain() {
        let frags = fragments(&[
            ("a", 0.0, 0.0, 40.0, 10.0),
            ("b", 0.0, 5.0, 40.0, 15.0),
        ]);
        assert!(group_vertical_blocks(&frags, 10.0, 10.0).is_empty());
    }

    #[test]
    fn test_blocks_are_disjoint() {
        let frags = fragments(&[
            ("a", 0.0, 0.0, 40.0, 10.0),
            ("b", 0.0, 12.0, 40.0, 22.0),
            ("c", 0.0, 24.0, 40.0, 34.0),
            ("d", 200.0, 0.0, 240.0, 10.0),
            ("e", 201.0, 12.0, 240.0, 22.0),
        ]);
        let blocks = group_vertical_blocks(&frags, 2.0, 5.0);
        let mut seen = std::collections::HashSet::new();
        for block in &blocks {
            assert!(block.len() >= 2);
            for &m in &block.members {
                assert!(seen.insert(m), "fragment {} in two blocks", m);
            }
        }
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_vertical_blocks(&[], 10.0, 10.0).is_empty());
    }
}
