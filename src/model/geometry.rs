//! Affine transforms and axis-aligned boxes.

use serde::{Deserialize, Serialize};

/// A 2D affine transform `[a, b, c, d, e, f]`.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`, the layout used by
/// PDF text matrices and viewport transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transform(pub [f64; 6]);

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Transform = Transform([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Create a transform from its six components.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self([a, b, c, d, e, f])
    }

    /// Uniform scale plus translation, the common case for horizontal text.
    pub fn scale_translate(scale: f64, x: f64, y: f64) -> Self {
        Self([scale, 0.0, 0.0, scale, x, y])
    }

    /// Horizontal scale component (`a`).
    pub fn x_scale(&self) -> f64 {
        self.0[0]
    }

    /// Matrix product `self × other`: applies `other` first, then `self`.
    pub fn multiply(&self, other: &Transform) -> Transform {
        let [va, vb, vc, vd, ve, vf] = self.0;
        let [a, b, c, d, e, f] = other.0;
        Transform([
            va * a + vc * b,
            vb * a + vd * b,
            va * c + vc * d,
            vb * c + vd * d,
            va * e + vc * f + ve,
            vb * e + vd * f + vf,
        ])
    }

    /// Flip the sign of the vertical axis (`c` and `d`).
    pub fn flip_vertical(&self) -> Transform {
        let mut m = self.0;
        m[2] = -m[2];
        m[3] = -m[3];
        Transform(m)
    }

    /// Map a point through this transform.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + c * y + e, b * x + d * y + f)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// An axis-aligned bounding box in viewport pixel space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Create a box from its extreme coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// The min/max envelope of a set of points.
    ///
    /// Returns an all-zero box for an empty set.
    pub fn enclosing<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let Some((x0, y0)) = iter.next() else {
            return Self::default();
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for (x, y) in iter {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Self::new(min_x, min_y, max_x, max_y)
    }

    /// Union of several boxes. Returns an all-zero box for an empty set.
    pub fn union<'a, I>(boxes: I) -> Self
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        Self::enclosing(
            boxes
                .into_iter()
                .flat_map(|b| [(b.min_x, b.min_y), (b.max_x, b.max_y)]),
        )
    }

    /// Vertical center.
    pub fn center_y(&self) -> f64 {
        self.min_y + self.height / 2.0
    }

    /// Strict overlap of the vertical spans.
    pub fn overlaps_vertically(&self, other: &BoundingBox) -> bool {
        self.min_y < other.max_y && self.max_y > other.min_y
    }

    /// Strict overlap of the horizontal spans.
    pub fn overlaps_horizontally(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x && self.max_x > other.min_x
    }

    /// Strict AABB intersection.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.overlaps_horizontally(other) && self.overlaps_vertically(other)
    }

    /// Whether a point lies inside the box, edges included.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x
            && x <= self.min_x + self.width
            && y >= self.min_y
            && y <= self.min_y + self.height
    }

    /// Whether the box has zero area.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}
