//! Shared page builders for integration tests.

#![allow(dead_code)]

use textgrid::{PageInput, RawFragment, Transform, Viewport};

/// A fragment whose box under the identity viewport is
/// `(x, y)..(x + width, y + height)`.
pub fn boxed(text: &str, x: f64, y: f64, width: f64, height: f64) -> RawFragment {
    RawFragment::new(text, Transform::scale_translate(height, x, y), width)
}

/// A page on the identity viewport.
pub fn page_of(fragments: Vec<RawFragment>) -> PageInput {
    let mut input = PageInput::new(Viewport::identity(612.0, 792.0));
    for f in fragments {
        input.push(f);
    }
    input
}

/// Deterministic generator for synthetic pages.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let i = (self.next_f64() * items.len() as f64) as usize;
        &items[i.min(items.len() - 1)]
    }
}

/// A scattered page of `count` fragments, with some labels and some
/// left-aligned stacks.
pub fn synthetic_page(seed: u64, count: usize) -> PageInput {
    let words = ["Total:", "Name:", "12.50", "Qty", "Description", "x", "Invoice", "ok"];
    let heights = [8.0, 10.0, 10.0, 12.0, 24.0];
    let mut rng = Lcg::new(seed);

    let mut fragments = Vec::with_capacity(count);
    while fragments.len() < count {
        let text = *rng.pick(&words);
        let height = *rng.pick(&heights);
        let x = rng.range(0.0, 500.0).floor();
        let y = rng.range(0.0, 700.0).floor();
        let width = text.len() as f64 * height * 0.5;
        fragments.push(boxed(text, x, y, width, height));

        // Occasionally stack a continuation line below.
        if rng.next_f64() < 0.2 && fragments.len() < count {
            fragments.push(boxed("cont", x + 1.0, y + height + 2.0, 4.0 * height * 0.5, height));
        }
    }
    page_of(fragments)
}
