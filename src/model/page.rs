//! Page-level types.

use super::{Fragment, RawFragment, Transform};
use serde::{Deserialize, Serialize};

/// The page viewport: the transform from page space to pixel space plus
/// the pixel dimensions of the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Page-space to viewport-space transform
    pub transform: Transform,

    /// Viewport width in pixels
    #[serde(default)]
    pub width: f64,

    /// Viewport height in pixels
    #[serde(default)]
    pub height: f64,
}

impl Viewport {
    /// Create a new viewport.
    pub fn new(transform: Transform, width: f64, height: f64) -> Self {
        Self {
            transform,
            width,
            height,
        }
    }

    /// Viewport for a page of the given size in points, rendered at `scale`
    /// with the y axis flipped so that it grows downward.
    pub fn for_page(page_width: f64, page_height: f64, scale: f64) -> Self {
        Self {
            transform: Transform::new(scale, 0.0, 0.0, -scale, 0.0, page_height * scale),
            width: page_width * scale,
            height: page_height * scale,
        }
    }

    /// Identity viewport with the given pixel size.
    pub fn identity(width: f64, height: f64) -> Self {
        Self::new(Transform::IDENTITY, width, height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        // US Letter at scale 1.0
        Self::for_page(612.0, 792.0, 1.0)
    }
}

/// A page of unprojected fragments, the input contract of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    /// Page viewport
    #[serde(default)]
    pub viewport: Viewport,

    /// Text runs in decoder order
    #[serde(default)]
    pub items: Vec<RawFragment>,
}

impl PageInput {
    /// Create a page input with the given viewport and no fragments.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            items: Vec::new(),
        }
    }

    /// Append a fragment.
    pub fn push(&mut self, fragment: RawFragment) {
        self.items.push(fragment);
    }

    /// Builder-style append.
    pub fn with_fragment(mut self, fragment: RawFragment) -> Self {
        self.items.push(fragment);
        self
    }
}

/// A projected page: the fragment arena that every stage indexes into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page viewport
    pub viewport: Viewport,

    /// Projected fragments, indexed by position
    pub fragments: Vec<Fragment>,
}

impl Page {
    /// Number of fragments on the page.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if the page has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Get a fragment by index.
    pub fn fragment(&self, index: usize) -> Option<&Fragment> {
        self.fragments.get(index)
    }

    /// Viewport width, used as the right page edge.
    pub fn width(&self) -> f64 {
        self.viewport.width
    }
}
