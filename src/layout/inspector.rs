//! Neighbor zone inspection for a single fragment.
//!
//! Explains row and column decisions: which fragments sit in the search
//! zones around a selected fragment, and which one the row builder placed
//! immediately after it.

use serde::{Deserialize, Serialize};

use crate::model::{BoundingBox, Fragment, Page};

use super::rows::build_rows;
use super::stats::PageMetrics;

/// An axis-aligned search rectangle given by origin and size.
///
/// Unlike [`BoundingBox`] the size may be negative when the selected
/// fragment extends past the page edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Zone {
    /// Create a new zone.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict overlap test against a box.
    pub fn intersects(&self, bounds: &BoundingBox) -> bool {
        bounds.min_x < self.x + self.width
            && bounds.max_x > self.x
            && bounds.min_y < self.y + self.height
            && bounds.max_y > self.y
    }
}

/// The four search zones around a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeighborZones {
    pub top: Zone,
    pub bottom: Zone,
    pub left: Zone,
    pub right: Zone,
}

impl NeighborZones {
    /// Build the zones around `bounds`.
    ///
    /// Top and bottom extend `reach` vertically over the fragment's width;
    /// left and right extend to the page edges over its height.
    pub fn around(bounds: &BoundingBox, reach: f64, page_width: f64) -> Self {
        Self {
            top: Zone::new(bounds.min_x, bounds.min_y - reach, bounds.width, reach),
            bottom: Zone::new(bounds.min_x, bounds.max_y, bounds.width, reach),
            left: Zone::new(0.0, bounds.min_y, bounds.min_x, bounds.height),
            right: Zone::new(
                bounds.max_x,
                bounds.min_y,
                page_width - bounds.max_x,
                bounds.height,
            ),
        }
    }

    /// Whether a box intersects any zone.
    pub fn intersects(&self, bounds: &BoundingBox) -> bool {
        [self.top, self.bottom, self.left, self.right]
            .iter()
            .any(|zone| zone.intersects(bounds))
    }
}

/// Result of inspecting one fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborInspection {
    /// The inspected fragment
    pub selected: usize,

    /// Search zones around it
    pub zones: NeighborZones,

    /// Fragments intersecting any zone, in page order
    pub candidates: Vec<usize>,

    /// The fragment that follows the selected one in its row
    pub chosen_successor: Option<usize>,
}

impl NeighborInspection {
    /// Candidates other than the chosen successor.
    pub fn other_candidates(&self) -> impl Iterator<Item = usize> + '_ {
        self.candidates
            .iter()
            .copied()
            .filter(move |&c| Some(c) != self.chosen_successor)
    }
}

/// Inspect the neighborhood of fragment `selected`.
///
/// Returns `None` when the index is out of range.
pub fn inspect_neighbors(page: &Page, selected: usize) -> Option<NeighborInspection> {
    let fragments = &page.fragments;
    let target = fragments.get(selected)?;
    let metrics = PageMetrics::from_fragments(fragments);

    let zones = NeighborZones::around(&target.bounds, metrics.max_vertical_search(), page.width());

    let candidates: Vec<usize> = fragments
        .iter()
        .enumerate()
        .filter(|&(i, f)| i != selected && zones.intersects(&f.bounds))
        .map(|(i, _)| i)
        .collect();

    let chosen_successor = build_rows(fragments).iter().find_map(|row| {
        let pos = row.iter().position(|&i| i == selected)?;
        row.get(pos + 1).copied()
    });

    log::debug!(
        "Fragment {}: {} candidates, successor {:?}",
        selected,
        candidates.len(),
        chosen_successor
    );

    Some(NeighborInspection {
        selected,
        zones,
        candidates,
        chosen_successor,
    })
}

/// Find the topmost fragment under a viewport point.
///
/// Later fragments are drawn over earlier ones, so the search runs from
/// the end of the list. Box edges count as inside.
pub fn fragment_at(fragments: &[Fragment], x: f64, y: f64) -> Option<usize> {
    fragments
        .iter()
        .rposition(|f| f.bounds.contains_point(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Transform, Viewport};

    fn page(boxes: &[(f64, f64, f64, f64)]) -> Page {
        let fragments = boxes
            .iter()
            .enumerate()
            .map(|(i, &(x0, y0, x1, y1))| Fragment {
                text: format!("f{}", i),
                transform: Transform::IDENTITY,
                width: x1 - x0,
                source_index: i,
                bounds: BoundingBox::new(x0, y0, x1, y1),
            })
            .collect();
        Page {
            viewport: Viewport::identity(500.0, 500.0),
            fragments,
        }
    }

    #[test]
    fn test_zones_around() {
        let zones = NeighborZones::around(&BoundingBox::new(10.0, 20.0, 50.0, 30.0), 100.0, 500.0);
        assert_eq!(zones.top, Zone::new(10.0, -80.0, 40.0, 100.0));
        assert_eq!(zones.bottom, Zone::new(10.0, 30.0, 40.0, 100.0));
        assert_eq!(zones.left, Zone::new(0.0, 20.0, 10.0, 10.0));
        assert_eq!(zones.right, Zone::new(50.0, 20.0, 450.0, 10.0));
    }

    #[test]
    fn test_candidates_and_successor() {
        let page = page(&[
            (100.0, 100.0, 150.0, 110.0), // selected
            (200.0, 101.0, 250.0, 111.0), // right, same row
            (300.0, 100.0, 350.0, 110.0), // right, same row
            (110.0, 150.0, 140.0, 160.0), // below
            (0.0, 100.0, 50.0, 110.0),    // left
            (300.0, 300.0, 350.0, 310.0), // diagonal, far away
            (120.0, 400.0, 140.0, 410.0), // below, out of reach
        ]);
        let inspection = inspect_neighbors(&page, 0).unwrap();
        assert_eq!(inspection.candidates, vec![1, 2, 3, 4]);
        assert_eq!(inspection.chosen_successor, Some(1));
        assert_eq!(inspection.other_candidates().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_last_in_row_has_no_successor() {
        let page = page(&[(0.0, 0.0, 50.0, 10.0), (60.0, 0.0, 90.0, 10.0)]);
        let inspection = inspect_neighbors(&page, 1).unwrap();
        assert_eq!(inspection.chosen_successor, None);
        assert_eq!(inspection.candidates, vec![0]);
    }

    #[test]
    fn test_out_of_range() {
        let page = page(&[(0.0, 0.0, 50.0, 10.0)]);
        assert!(inspect_neighbors(&page, 1).is_none());
    }

    #[test]
    fn test_fragment_at_prefers_topmost() {
        let page = page(&[(0.0, 0.0, 50.0, 10.0), (40.0, 0.0, 90.0, 10.0)]);
        assert_eq!(fragment_at(&page.fragments, 45.0, 5.0), Some(1));
        assert_eq!(fragment_at(&page.fragments, 10.0, 10.0), Some(0));
        assert_eq!(fragment_at(&page.fragments, 95.0, 5.0), None);
    }
}
