//! Row (text line) construction by vertical-span overlap.

use std::cmp::Ordering;

use crate::model::{BoundingBox, Fragment, Row};

/// Order by top edge, then left edge.
pub fn reading_order(a: &BoundingBox, b: &BoundingBox) -> Ordering {
    a.min_y
        .total_cmp(&b.min_y)
        .then_with(|| a.min_x.total_cmp(&b.min_x))
}

/// Cluster fragments into rows.
///
/// Fragments are visited in `(min_y, min_x)` order. The first unassigned
/// fragment seeds a row, and every unassigned fragment whose vertical span
/// strictly overlaps the seed's joins it in one step. Membership is
/// decided against the seed only, so two members of a row need not overlap
/// each other. Rows come out top to bottom, members left to right.
pub fn build_rows(fragments: &[Fragment]) -> Vec<Row> {
    if fragments.is_empty() {
        return vec![];
    }

    let mut order: Vec<usize> = (0..fragments.len()).collect();
    order.sort_by(|&a, &b| reading_order(&fragments[a].bounds, &fragments[b].bounds));

    let mut assigned = vec![false; fragments.len()];
    let mut rows = Vec::new();

    for &seed in &order {
        if assigned[seed] {
            continue;
        }
        let seed_bounds = &fragments[seed].bounds;

        let mut row: Row = order
            .iter()
            .copied()
            .filter(|&i| !assigned[i] && fragments[i].bounds.overlaps_vertically(seed_bounds))
            .collect();

        // A degenerate seed overlaps nothing, not even itself.
        if !row.contains(&seed) {
            row.insert(0, seed);
        }

        row.sort_by(|&a, &b| fragments[a].bounds.min_x.total_cmp(&fragments[b].bounds.min_x));
        for &i in &row {
            assigned[i] = true;
        }
        rows.push(row);
    }

    log::debug!("Built {} rows from {} fragments", rows.len(), fragments.len());
    rows
}
