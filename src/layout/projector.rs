//! Projection of fragments from text space into viewport space.

use crate::model::{BoundingBox, Fragment, Page, PageInput, RawFragment, Transform};

/// Line height of a fragment in its own text space.
const LOCAL_LINE_HEIGHT: f64 = 1.0;

/// Compute the viewport-space bounding box of a text run.
///
/// The run occupies the local rectangle `(0, 0)..(width / xScale, -1)`.
/// Its vertical axis is flipped before composing with the viewport
/// transform, since text space grows upward and viewport space downward.
/// A zero horizontal scale makes the local width unbounded; it is clamped
/// to zero so the result is a degenerate box rather than NaN coordinates.
pub fn project_bounds(transform: &Transform, width: f64, viewport: &Transform) -> BoundingBox {
    let composed = viewport.multiply(&transform.flip_vertical());

    let mut local_width = width / transform.x_scale();
    if !local_width.is_finite() {
        local_width = 0.0;
    }

    BoundingBox::enclosing([
        composed.apply(0.0, 0.0),
        composed.apply(local_width, 0.0),
        composed.apply(local_width, -LOCAL_LINE_HEIGHT),
        composed.apply(0.0, -LOCAL_LINE_HEIGHT),
    ])
}

/// Project one raw fragment.
pub fn project_fragment(raw: &RawFragment, source_index: usize, viewport: &Transform) -> Fragment {
    Fragment {
        text: raw.text.clone(),
        transform: raw.transform,
        width: raw.width,
        source_index,
        bounds: project_bounds(&raw.transform, raw.width, viewport),
    }
}

/// Project a page, dropping fragments whose trimmed text is empty.
///
/// Source indices are assigned after filtering, so they are dense.
pub fn project_page(input: &PageInput) -> Page {
    let viewport = &input.viewport.transform;
    let fragments: Vec<Fragment> = input
        .items
        .iter()
        .filter(|raw| raw.has_text())
        .enumerate()
        .map(|(i, raw)| project_fragment(raw, i, viewport))
        .collect();

    log::debug!(
        "Projected {} of {} fragments",
        fragments.len(),
        input.items.len()
    );

    Page {
        viewport: input.viewport,
        fragments,
    }
}
